use crate::models::SelectOption;

use super::client::api_call;
use super::error::ApiError;
use super::id_string;

/// Load the networks of a service endpoint, optionally scoped to an
/// availability zone. The response is a bare array, and every entry carries
/// a `public` tag the presentation filter keys on.
pub async fn load_networks(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    service_id: i64,
    azone_id: Option<&str>,
) -> Result<Vec<SelectOption>, ApiError> {
    let mut params = vec![("service_id".to_string(), service_id.to_string())];
    if let Some(zone) = azone_id {
        if !zone.is_empty() {
            params.push(("azone_id".to_string(), zone.to_string()));
        }
    }
    let payload = api_call(client, api_base_url, api_token, "GET", "/api/network", None, Some(params))
        .await?
        .into_result()?;

    let mut options = Vec::new();
    if let Some(arr) = payload.as_array() {
        for network in arr {
            if let Some(obj) = network.as_object() {
                let id = id_string(obj.get("id"));
                let name = obj
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or(&id)
                    .to_string();
                let public = obj.get("public").and_then(|v| v.as_bool()).unwrap_or(false);
                options.push(SelectOption::tagged(id, name, public));
            }
        }
    }
    Ok(options)
}
