// Atomic API modules
pub mod azones;
pub mod client;
pub mod compute;
pub mod error;
pub mod flavors;
pub mod images;
pub mod networks;
pub mod servers;

// Re-export commonly used items
pub use azones::load_azones;
pub use client::{api_call, ApiResponse};
pub use compute::{ComputeApi, HttpComputeApi};
pub use error::ApiError;
pub use flavors::load_flavors;
pub use images::load_images;
pub use networks::load_networks;
pub use servers::{
    create_server, delete_server, get_server, load_servers, server_action, CreateOutcome,
};

use serde_json::Value;

/// Backend ids come back as strings or numbers depending on the resource;
/// the selectors carry them as strings either way.
pub(crate) fn id_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
