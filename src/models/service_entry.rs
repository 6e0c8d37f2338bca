use serde::{Deserialize, Serialize};

/// A backend service endpoint the console can provision servers against.
/// Configured locally (`SERVICES` env var); the backend exposes no discovery
/// endpoint for these.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ServiceEntry {
    pub id: i64,
    pub name: String,
}
