use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::api::load_servers;
use crate::models::{AppState, ServerRow};
use crate::services::{action_label, perform_server_action};
use crate::templates::ServersPageTemplate;

use super::helpers::{
    absolute_url_from_state, build_template_globals, ensure_session, push_flash, render_template,
};

pub async fn servers_get(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (jar, sid) = ensure_session(jar);
    let mut globals = build_template_globals(&state, &sid);

    let rows: Vec<ServerRow> =
        match load_servers(&state.client, &state.api_base_url, &state.api_token).await {
            Ok(list) => list.iter().map(ServerRow::from_view).collect(),
            Err(e) => {
                globals.push_alerts(vec![format!("Failed to load servers: {}", e)]);
                Vec::new()
            }
        };

    let template = ServersPageTemplate {
        api_hostname: globals.api_hostname,
        base_url: globals.base_url,
        flash_messages: globals.flash_messages,
        has_flash_messages: globals.has_flash_messages,
        servers: &rows,
    };
    (jar, render_template(template)).into_response()
}

#[derive(Deserialize)]
pub struct ActionForm {
    pub action: String,
}

pub async fn server_action_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(server_id): Path<String>,
    Form(form): Form<ActionForm>,
) -> Response {
    let (jar, sid) = ensure_session(jar);
    let servers_url = absolute_url_from_state(&state, "/servers");

    let Some(label) = action_label(&form.action) else {
        push_flash(&state, &sid, format!("Unsupported action: {}", form.action));
        return (jar, Redirect::to(&servers_url)).into_response();
    };

    match perform_server_action(&state, &server_id, &form.action).await {
        Ok(()) => push_flash(&state, &sid, format!("{} requested for server {}.", label, server_id)),
        Err(e) => push_flash(&state, &sid, format!("{} failed: {}", label, e)),
    }
    (jar, Redirect::to(&servers_url)).into_response()
}
