use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::service_entry::ServiceEntry;
use crate::services::create_service::CreateController;

/// A creation form controller shared between requests of one console session.
/// Events on one form run behind its async mutex, which serializes them the
/// way a browser UI thread would.
pub type SharedController = Arc<tokio::sync::Mutex<CreateController>>;

#[derive(Clone)]
pub struct AppState {
    pub api_base_url: String,
    pub api_token: String,
    pub public_base_url: String,
    /// Configured service endpoints, in display order.
    pub services: Arc<Vec<ServiceEntry>>,
    pub client: reqwest::Client,
    pub flash_store: Arc<Mutex<HashMap<String, Vec<String>>>>,
    /// One creation form controller per console session, keyed by session id.
    pub create_forms: Arc<Mutex<HashMap<String, SharedController>>>,
    pub custom_css: Option<String>,
}

impl AppState {
    pub fn default_service_id(&self) -> i64 {
        self.services.first().map(|s| s.id).unwrap_or(0)
    }
}
