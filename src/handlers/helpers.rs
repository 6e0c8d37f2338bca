use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use rand::RngCore;

use crate::models::{AppState, SharedController};
use crate::services::create_service::CreateController;

pub const SESSION_COOKIE: &str = "console_session";

pub fn random_session_id() -> String {
    let mut b = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut b);
    hex::encode(b)
}

/// Get the anonymous console session id, minting a cookie on first contact.
/// The returned jar must go back out with the response.
pub fn ensure_session(jar: CookieJar) -> (CookieJar, String) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let sid = cookie.value().to_string();
        return (jar, sid);
    }
    let sid = random_session_id();
    let mut cookie = Cookie::new(SESSION_COOKIE, sid.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    (jar.add(cookie), sid)
}

pub fn push_flash(state: &AppState, sid: &str, message: String) {
    state
        .flash_store
        .lock()
        .unwrap()
        .entry(sid.to_string())
        .or_default()
        .push(message);
}

pub fn take_flash_messages(state: &AppState, sid: &str) -> Vec<String> {
    state.flash_store.lock().unwrap().remove(sid).unwrap_or_default()
}

pub struct TemplateGlobals {
    pub api_hostname: String,
    pub base_url: String,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,
}

pub fn build_template_globals(state: &AppState, sid: &str) -> TemplateGlobals {
    let flash_messages = take_flash_messages(state, sid);
    TemplateGlobals {
        api_hostname: crate::utils::hostname_from_url(&state.api_base_url),
        base_url: state.public_base_url.clone(),
        has_flash_messages: !flash_messages.is_empty(),
        flash_messages,
    }
}

impl TemplateGlobals {
    /// Page-local messages rendered in the same response, the counterpart of
    /// a blocking dialog.
    pub fn push_alerts(&mut self, alerts: Vec<String>) {
        self.flash_messages.extend(alerts);
        self.has_flash_messages = !self.flash_messages.is_empty();
    }
}

pub fn absolute_url_from_state(state: &AppState, path: &str) -> String {
    crate::utils::absolute_url(&state.public_base_url, path)
}

pub fn render_template<T: askama::Template>(t: T) -> Response {
    match t.render() {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// The session's creation form controller; `true` when this request created
/// it and the form needs its initial load.
pub fn form_controller(state: &AppState, sid: &str) -> (SharedController, bool) {
    let mut forms = state.create_forms.lock().unwrap();
    if let Some(existing) = forms.get(sid) {
        return (existing.clone(), false);
    }
    let controller = SharedController::new(tokio::sync::Mutex::new(CreateController::default()));
    forms.insert(sid.to_string(), controller.clone());
    (controller, true)
}
