use std::env;
use std::path::Path;

use crate::models::ServiceEntry;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_BASE_URL: &str = "";
pub const DEFAULT_API_TOKEN: &str = "";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "";

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()))
}

pub fn get_api_token() -> String {
    env::var("API_TOKEN").unwrap_or_else(|_| DEFAULT_API_TOKEN.to_string())
}

pub fn get_public_base_url() -> String {
    let raw = env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string());
    raw.trim().trim_end_matches('/').to_string()
}

/// Service endpoints the console can provision against. The backend has no
/// discovery endpoint for these, so they come from the `SERVICES` env var as
/// a comma separated list of `id=name` pairs, e.g. `1=East Cloud,2=West Cloud`.
pub fn get_services() -> Vec<ServiceEntry> {
    parse_services(&env::var("SERVICES").unwrap_or_default())
}

pub fn parse_services(raw: &str) -> Vec<ServiceEntry> {
    let mut services = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (id_str, name) = match part.split_once('=') {
            Some((id, name)) => (id.trim(), name.trim()),
            None => (part, ""),
        };
        let id: i64 = match id_str.parse() {
            Ok(n) if n > 0 => n,
            _ => continue,
        };
        let name = if name.is_empty() {
            format!("service {}", id)
        } else {
            name.to_string()
        };
        services.push(ServiceEntry { id, name });
    }
    services
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "http://localhost:8000".to_string()
    } else {
        trimmed.to_string()
    }
}
