use crate::models::SelectOption;

use super::client::api_call;
use super::error::ApiError;
use super::id_string;

/// Load the system images available on a service endpoint, filtered by the
/// selected flavor. The flavor filter may be empty.
pub async fn load_images(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    service_id: i64,
    flavor_id: &str,
) -> Result<Vec<SelectOption>, ApiError> {
    let params = vec![
        ("service_id".to_string(), service_id.to_string()),
        ("flavor_id".to_string(), flavor_id.to_string()),
    ];
    let payload = api_call(client, api_base_url, api_token, "GET", "/api/image", None, Some(params))
        .await?
        .into_result()?;

    let mut options = Vec::new();
    if let Some(arr) = payload.get("results").and_then(|r| r.as_array()) {
        for image in arr {
            if let Some(obj) = image.as_object() {
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
