use crate::models::SelectOption;

use super::client::api_call;
use super::error::ApiError;
use super::id_string;

/// Load the availability zones of a service endpoint.
pub async fn load_azones(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    service_id: i64,
) -> Result<Vec<SelectOption>, ApiError> {
    let params = vec![("service_id".to_string(), service_id.to_string())];
    let payload = api_call(client, api_base_url, api_token, "GET", "/api/azone", None, Some(params))
        .await?
        .into_result()?;

    let mut options = Vec::new();
    if let Some(arr) = payload.get("zones").and_then(|z| z.as_array()) {
        for zone in arr {
            if let Some(obj) = zone.as_object() {
                let id = id_string(obj.get("id"));
                let name = obj
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or(&id)
                    .to_string();
                options.push(SelectOption::new(id, name));
            }
        }
    }
    Ok(options)
}
