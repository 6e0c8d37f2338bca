use serde_json::Value;

use crate::models::{CreateRequest, ServerView};

use super::client::api_call;
use super::error::ApiError;
use super::id_string;

/// How the backend acknowledged a creation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreateOutcome {
    /// 200/201: the server exists.
    Created,
    /// 202: accepted, provisioning continues in the background.
    Accepted,
}

/// Submit one creation request. 200/201 and 202 are distinct successes; any
/// other status surfaces the server's message.
pub async fn create_server(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    request: &CreateRequest,
) -> Result<CreateOutcome, ApiError> {
    let body = serde_json::to_value(request).map_err(|e| ApiError::Transport(e.to_string()))?;
    let resp = api_call(client, api_base_url, api_token, "POST", "/api/server", Some(body), None).await?;
    match resp.status {
        200 | 201 => Ok(CreateOutcome::Created),
        202 => Ok(CreateOutcome::Accepted),
        status => Err(ApiError::Api {
            status,
            message: resp.message(),
        }),
    }
}

/// Load the server listing.
pub async fn load_servers(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
) -> Result<Vec<ServerView>, ApiError> {
    let payload = api_call(client, api_base_url, api_token, "GET", "/api/server", None, None)
        .await?
        .into_result()?;

    let mut servers = Vec::new();
    if let Some(arr) = payload.get("servers").and_then(|s| s.as_array()) {
        for item in arr {
            if let Some(obj) = item.as_object() {
                servers.push(ServerView {
                    id: id_string(obj.get("id")),
                    name: obj.get("name").and_then(|v| v.as_str()).unwrap_or("").to_string(),
                    vcpus: obj.get("vcpus").and_then(|v| v.as_i64()).unwrap_or(0),
                    ram_gib: obj.get("ram_gib").and_then(|v| v.as_i64()).unwrap_or(0),
                    ipv4: obj.get("ipv4").and_then(|v| v.as_str()).unwrap_or("").to_string(),
                    image: obj.get("image").and_then(|v| v.as_str()).unwrap_or("").to_string(),
                    creation_time: obj
                        .get("creation_time")
                        .and_then(|v| v.as_str())
                        .unwrap_or("")
                        .to_string(),
                    remarks: obj.get("remarks").and_then(|v| v.as_str()).unwrap_or("").to_string(),
                    status: obj.get("status").and_then(|v| v.as_i64()).unwrap_or(0),
                });
            }
        }
    }
    Ok(servers)
}

/// Raw detail payload of one server.
pub async fn get_server(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    server_id: &str,
) -> Result<Value, ApiError> {
    let endpoint = format!("/api/server/{}", server_id);
    api_call(client, api_base_url, api_token, "GET", &endpoint, None, None)
        .await?
        .into_result()
}

/// Request a lifecycle action (start, reboot, shutdown, poweroff).
pub async fn server_action(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    server_id: &str,
    action: &str,
) -> Result<(), ApiError> {
    let endpoint = format!("/api/server/{}/action", server_id);
    let body = serde_json::json!({ "action": action });
    api_call(client, api_base_url, api_token, "POST", &endpoint, Some(body), None)
        .await?
        .into_result()
        .map(|_| ())
}

/// Delete a server, optionally forcing removal of a running instance.
pub async fn delete_server(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    server_id: &str,
    force: bool,
) -> Result<(), ApiError> {
    let endpoint = format!("/api/server/{}", server_id);
    let params = force.then(|| vec![("force".to_string(), "true".to_string())]);
    api_call(client, api_base_url, api_token, "DELETE", &endpoint, None, params)
        .await?
        .into_result()
        .map(|_| ())
}
