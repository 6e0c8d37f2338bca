use crate::api::{self, ApiError};
use crate::models::AppState;

/// Display label and style class for a backend status code. Unknown codes
/// fall back to a neutral label instead of failing the page.
pub fn status_display(code: i64) -> (&'static str, &'static str) {
    match code {
        0 => ("no state", "default"),
        1 => ("running", "success"),
        2 => ("blocked", "info"),
        3 => ("paused", "info"),
        4 => ("shut down", "info"),
        5 => ("shut off", "info"),
        6 => ("crashed", "danger"),
        7 => ("suspended", "info"),
        9 => ("host unreachable", "danger"),
        10 => ("missing", "warning"),
        11 => ("building", "secondary"),
        12 => ("build failed", "danger"),
        13 => ("error", "danger"),
        _ => ("unknown", "default"),
    }
}

/// Past-tense label of a lifecycle action for flash messages; `None` marks
/// an action the console does not offer.
pub fn action_label(action: &str) -> Option<&'static str> {
    match action {
        "start" => Some("Start"),
        "reboot" => Some("Reboot"),
        "shutdown" => Some("Shutdown"),
        "poweroff" => Some("Power-off"),
        "delete" => Some("Delete"),
        "delete_force" => Some("Force delete"),
        _ => None,
    }
}

/// Run one lifecycle action against the backend. Deletion goes through the
/// resource endpoint; everything else is posted to the action endpoint.
pub async fn perform_server_action(
    state: &AppState,
    server_id: &str,
    action: &str,
) -> Result<(), ApiError> {
    match action {
        "delete" => {
            api::delete_server(&state.client, &state.api_base_url, &state.api_token, server_id, false)
                .await
        }
        "delete_force" => {
            api::delete_server(&state.client, &state.api_base_url, &state.api_token, server_id, true)
                .await
        }
        _ => {
            api::server_action(&state.client, &state.api_base_url, &state.api_token, server_id, action)
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_table_matches_the_console_legend() {
        assert_eq!(status_display(1), ("running", "success"));
        assert_eq!(status_display(11), ("building", "secondary"));
        assert_eq!(status_display(12), ("build failed", "danger"));
        assert_eq!(status_display(13), ("error", "danger"));
    }

    #[test]
    fn unknown_status_is_neutral() {
        assert_eq!(status_display(8), ("unknown", "default"));
        assert_eq!(status_display(99), ("unknown", "default"));
    }

    #[test]
    fn action_labels_cover_the_offered_verbs() {
        for action in ["start", "reboot", "shutdown", "poweroff", "delete", "delete_force"] {
            assert!(action_label(action).is_some());
        }
        assert!(action_label("migrate").is_none());
    }
}
