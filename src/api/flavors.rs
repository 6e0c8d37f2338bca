use crate::models::SelectOption;

use super::client::api_call;
use super::error::ApiError;
use super::id_string;

/// Load the flavor catalog of a service endpoint. The display label carries
/// the sizing the way the form shows it.
pub async fn load_flavors(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    service_id: i64,
) -> Result<Vec<SelectOption>, ApiError> {
    let params = vec![("service_id".to_string(), service_id.to_string())];
    let payload = api_call(client, api_base_url, api_token, "GET", "/api/flavor", None, Some(params))
        .await?
        .into_result()?;

    let mut options = Vec::new();
    if let Some(arr) = payload.get("flavors").and_then(|f| f.as_array()) {
        for flavor in arr {
            if let Some(obj) = flavor.as_object() {
                let id = id_string(obj.get("id"));
                let vcpus = obj.get("vcpus").and_then(|v| v.as_i64()).unwrap_or(0);
                let ram_gib = obj.get("ram_gib").and_then(|v| v.as_i64()).unwrap_or(0);
                options.push(SelectOption::new(id, format!("vCPU:{}/RAM:{}GB", vcpus, ram_gib)));
            }
        }
    }
    Ok(options)
}
