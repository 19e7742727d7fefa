use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::ApiConfig;
use crate::model::{BulkRequest, Moid, ResourceKind};

mod error;
pub use self::error::TransportError;

mod http_client;

mod types;
pub use self::types::*;
mod operations;

/// Remote capabilities the resolver and orchestrator depend on.
///
/// One long-lived implementation is injected into each orchestrator; the
/// HTTP-backed one is [`ApiClient`], tests substitute recording fakes.
#[async_trait]
pub trait Transport: Send + Sync {
    /// List objects of `kind` matching an OData `$filter` expression, in the
    /// order the backend returns them.
    async fn list_resources(
        &self,
        kind: ResourceKind,
        filter: &str,
    ) -> Result<Vec<ResourceSummary>, TransportError>;

    async fn submit_bulk(&self, request: &BulkRequest) -> Result<BulkResponse, TransportError>;

    async fn update_resource(
        &self,
        kind: ResourceKind,
        moid: &Moid,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn list_resources(
        &self,
        kind: ResourceKind,
        filter: &str,
    ) -> Result<Vec<ResourceSummary>, TransportError> {
        (**self).list_resources(kind, filter).await
    }

    async fn submit_bulk(&self, request: &BulkRequest) -> Result<BulkResponse, TransportError> {
        (**self).submit_bulk(request).await
    }

    async fn update_resource(
        &self,
        kind: ResourceKind,
        moid: &Moid,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, TransportError> {
        (**self).update_resource(kind, moid, body).await
    }
}

pub struct ApiClient {
    config: ApiConfig,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("osdeploy/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.insecure)
            .build()
            .map_err(TransportError::Client)?;
        Ok(Self { config, client })
    }
}
