use async_trait::async_trait;

use crate::models::{AppState, CreateRequest, SelectOption};

use super::error::ApiError;
use super::servers::CreateOutcome;

/// The backend compute service as the creation form sees it: the four option
/// feeds plus the creation endpoint. The controller is written against this
/// seam so its cache and fetch-count behavior is testable without HTTP.
#[async_trait]
pub trait ComputeApi {
    async fn azones(&self, service_id: i64) -> Result<Vec<SelectOption>, ApiError>;
    async fn flavors(&self, service_id: i64) -> Result<Vec<SelectOption>, ApiError>;
    async fn images(&self, service_id: i64, flavor_id: &str) -> Result<Vec<SelectOption>, ApiError>;
    async fn networks(
        &self,
        service_id: i64,
        azone_id: Option<&str>,
    ) -> Result<Vec<SelectOption>, ApiError>;
    async fn create_server(&self, request: &CreateRequest) -> Result<CreateOutcome, ApiError>;
}

/// REST-backed implementation over the atomic loader functions.
pub struct HttpComputeApi<'a> {
    pub client: &'a reqwest::Client,
    pub api_base_url: &'a str,
    pub api_token: &'a str,
}

impl<'a> HttpComputeApi<'a> {
    pub fn from_state(state: &'a AppState) -> Self {
        HttpComputeApi {
            client: &state.client,
            api_base_url: &state.api_base_url,
            api_token: &state.api_token,
        }
    }
}

#[async_trait]
impl ComputeApi for HttpComputeApi<'_> {
    async fn azones(&self, service_id: i64) -> Result<Vec<SelectOption>, ApiError> {
        super::azones::load_azones(self.client, self.api_base_url, self.api_token, service_id).await
    }

    async fn flavors(&self, service_id: i64) -> Result<Vec<SelectOption>, ApiError> {
        super::flavors::load_flavors(self.client, self.api_base_url, self.api_token, service_id).await
    }

    async fn images(&self, service_id: i64, flavor_id: &str) -> Result<Vec<SelectOption>, ApiError> {
        super::images::load_images(self.client, self.api_base_url, self.api_token, service_id, flavor_id)
            .await
    }

    async fn networks(
        &self,
        service_id: i64,
        azone_id: Option<&str>,
    ) -> Result<Vec<SelectOption>, ApiError> {
        super::networks::load_networks(self.client, self.api_base_url, self.api_token, service_id, azone_id)
            .await
    }

    async fn create_server(&self, request: &CreateRequest) -> Result<CreateOutcome, ApiError> {
        super::servers::create_server(self.client, self.api_base_url, self.api_token, request).await
    }
}
