use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;

use crate::api::{self, CreateOutcome, HttpComputeApi};
use crate::models::{option_views, AppState, CreateForm, NetworkTagFilter, SelectOptionView};
use crate::services::{parse_selection, validate_submission, SelectorField};
use crate::templates::{CreateConfirmTemplate, CreatePageTemplate, HiddenField, SummaryRow};
use crate::utils::build_query_string;

use super::helpers::{
    absolute_url_from_state, build_template_globals, ensure_session, form_controller, push_flash,
    render_template,
};

/// The creation form. Selector changes round-trip through this handler as
/// GET requests carrying the whole form state; the controller diffs the
/// posted selection against its own and refreshes whatever depends on the
/// changed field.
pub async fn create_get(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let (jar, sid) = ensure_session(jar);
    let (controller, fresh) = form_controller(&state, &sid);
    let api = HttpComputeApi::from_state(&state);
    let mut controller = controller.lock().await;

    let incoming = parse_selection(&q);
    let alerts = if fresh {
        let mut selection = incoming.unwrap_or_default();
        if selection.service_id == 0 {
            selection.service_id = state.default_service_id();
        }
        controller.initial_load(selection, &api).await
    } else {
        match incoming {
            Some(selection) => controller.handle_form_event(selection, &api).await,
            None => Vec::new(),
        }
    };

    let mut globals = build_template_globals(&state, &sid);
    globals.push_alerts(alerts);

    let selection = controller.selection().clone();
    let rendered = controller.rendered();

    let services: Vec<SelectOptionView> = state
        .services
        .iter()
        .map(|s| SelectOptionView {
            value: s.id.to_string(),
            label: s.name.clone(),
            selected: s.id == selection.service_id,
            hidden: false,
        })
        .collect();

    // The tag filter is presentation only: every option stays in the page,
    // the filtered ones are just hidden.
    let networks: Vec<SelectOptionView> = rendered
        .get(SelectorField::Network)
        .iter()
        .map(|opt| SelectOptionView {
            value: opt.value.clone(),
            label: opt.label.clone(),
            selected: !selection.network_id.is_empty() && opt.value == selection.network_id,
            hidden: !selection.network_tag.allows(opt.public.unwrap_or(false)),
        })
        .collect();

    let template = CreatePageTemplate {
        api_hostname: globals.api_hostname,
        base_url: globals.base_url,
        flash_messages: globals.flash_messages,
        has_flash_messages: globals.has_flash_messages,
        services,
        azones: option_views(rendered.get(SelectorField::Azone), &selection.azone_id),
        flavors: option_views(rendered.get(SelectorField::Flavor), &selection.flavor_id),
        images: option_views(rendered.get(SelectorField::Image), &selection.image_id),
        networks,
        tag_options: tag_option_views(selection.network_tag),
        quota_id: q.get("quota_id").cloned().unwrap_or_default(),
        pay_type: q.get("pay_type").cloned().unwrap_or_default(),
        period: q.get("period").cloned().unwrap_or_default(),
    };
    (jar, render_template(template)).into_response()
}

fn tag_option_views(current: NetworkTagFilter) -> Vec<SelectOptionView> {
    [
        (NetworkTagFilter::All, "All networks"),
        (NetworkTagFilter::PublicOnly, "Public only"),
        (NetworkTagFilter::PrivateOnly, "Private only"),
    ]
    .into_iter()
    .map(|(filter, label)| SelectOptionView {
        value: filter.as_param().to_string(),
        label: label.to_string(),
        selected: filter == current,
        hidden: false,
    })
    .collect()
}

fn back_to_form_url(state: &AppState, form: &CreateForm) -> String {
    let query = build_query_string(&form.to_query_pairs());
    if query.is_empty() {
        absolute_url_from_state(state, "/create")
    } else {
        absolute_url_from_state(state, &format!("/create?{}", query))
    }
}

/// Validate the posted form. Failures flash the message and return to the
/// form without any network traffic; a valid request renders the
/// confirmation page.
pub async fn create_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CreateForm>,
) -> Response {
    let (jar, sid) = ensure_session(jar);
    let back_url = back_to_form_url(&state, &form);

    let request = match validate_submission(&form) {
        Ok(request) => request,
        Err(msg) => {
            push_flash(&state, &sid, msg);
            return (jar, Redirect::to(&back_url)).into_response();
        }
    };

    let (controller, _) = form_controller(&state, &sid);
    let controller = controller.lock().await;
    let service_name = state
        .services
        .iter()
        .find(|s| s.id == request.service_id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| request.service_id.to_string());
    let label_or = |field: SelectorField, value: &str| {
        controller
            .label_for(field, value)
            .unwrap_or_else(|| value.to_string())
    };

    let mut rows = vec![
        SummaryRow {
            label: "Service endpoint".into(),
            value: service_name,
        },
        SummaryRow {
            label: "Network".into(),
            value: label_or(SelectorField::Network, &request.network_id),
        },
        SummaryRow {
            label: "System image".into(),
            value: label_or(SelectorField::Image, &request.image_id),
        },
        SummaryRow {
            label: "Configuration".into(),
            value: label_or(SelectorField::Flavor, &request.flavor_id),
        },
    ];
    if let Some(zone) = &request.azone_id {
        rows.push(SummaryRow {
            label: "Availability zone".into(),
            value: label_or(SelectorField::Azone, zone),
        });
    }
    if let Some(quota) = &request.quota_id {
        rows.push(SummaryRow {
            label: "Quota".into(),
            value: quota.clone(),
        });
    }
    if let Some(pay_type) = &request.pay_type {
        rows.push(SummaryRow {
            label: "Payment".into(),
            value: pay_type.clone(),
        });
    }
    if let Some(period) = request.period {
        rows.push(SummaryRow {
            label: "Period (months)".into(),
            value: period.to_string(),
        });
    }
    drop(controller);

    let globals = build_template_globals(&state, &sid);
    let template = CreateConfirmTemplate {
        api_hostname: globals.api_hostname,
        base_url: globals.base_url,
        flash_messages: globals.flash_messages,
        has_flash_messages: globals.has_flash_messages,
        rows,
        hidden_fields: form
            .to_query_pairs()
            .into_iter()
            .map(|(name, value)| HiddenField { name, value })
            .collect(),
        confirm_url: absolute_url_from_state(&state, "/create/confirm"),
        cancel_url: back_url,
    };
    (jar, render_template(template)).into_response()
}

/// The confirmed submission. The submission slot is reserved before the
/// request goes out and released whatever comes back, so a double-posted
/// confirmation cannot create two servers.
pub async fn create_confirm_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CreateForm>,
) -> Response {
    let (jar, sid) = ensure_session(jar);
    let back_url = back_to_form_url(&state, &form);
    let servers_url = absolute_url_from_state(&state, "/servers");

    let request = match validate_submission(&form) {
        Ok(request) => request,
        Err(msg) => {
            push_flash(&state, &sid, msg);
            return (jar, Redirect::to(&back_url)).into_response();
        }
    };

    let (controller, _) = form_controller(&state, &sid);
    if let Err(e) = controller.lock().await.begin_submission() {
        push_flash(&state, &sid, e.to_string());
        return (jar, Redirect::to(&back_url)).into_response();
    }

    let result = api::create_server(&state.client, &state.api_base_url, &state.api_token, &request).await;
    controller.lock().await.finish_submission();

    match result {
        Ok(CreateOutcome::Created) => {
            push_flash(&state, &sid, "Server instance created.".to_string());
            (jar, Redirect::to(&servers_url)).into_response()
        }
        Ok(CreateOutcome::Accepted) => {
            push_flash(
                &state,
                &sid,
                "Creation accepted; the server is being provisioned in the background.".to_string(),
            );
            (jar, Redirect::to(&servers_url)).into_response()
        }
        Err(e) => {
            push_flash(&state, &sid, format!("Failed to create server: {}", e));
            (jar, Redirect::to(&back_url)).into_response()
        }
    }
}
