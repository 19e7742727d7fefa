//! `Transport` implementation over the management REST API.

use tracing::debug;

use super::*;

/// Mirrors the page size the API documents for filtered list calls.
const MAX_OBJECTS_PER_FETCH: &str = "100";

#[async_trait]
impl Transport for ApiClient {
    async fn list_resources(
        &self,
        kind: ResourceKind,
        filter: &str,
    ) -> Result<Vec<ResourceSummary>, TransportError> {
        let label = format!("list {}", kind);
        debug!(kind = %kind, filter, "listing resources");
        let resp = self
            .client
            .get(self.url(kind.collection_path()))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .query(&[("$filter", filter), ("$top", MAX_OBJECTS_PER_FETCH)])
            .send()
            .await
            .map_err(|source| TransportError::Request {
                label: label.clone(),
                source,
            })?;

        let list: ListResponse = self
            .ensure_ok(resp, &label)
            .await?
            .json()
            .await
            .map_err(|source| TransportError::Decode { label, source })?;
        Ok(list.results.unwrap_or_default())
    }

    async fn submit_bulk(&self, request: &BulkRequest) -> Result<BulkResponse, TransportError> {
        let label = "bulk request".to_string();
        debug!(operations = request.operations().len(), "submitting bulk request");
        let resp = self
            .client
            .post(self.url("/bulk/Requests"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&BulkRequestBody::from(request))
            .send()
            .await
            .map_err(|source| TransportError::Request {
                label: label.clone(),
                source,
            })?;

        let out: BulkResponse = self
            .ensure_ok(resp, &label)
            .await?
            .json()
            .await
            .map_err(|source| TransportError::Decode { label, source })?;
        Ok(out)
    }

    async fn update_resource(
        &self,
        kind: ResourceKind,
        moid: &Moid,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, TransportError> {
        let label = format!("update {} {}", kind, moid);
        let resp = self
            .client
            .patch(self.url(&format!("{}/{}", kind.collection_path(), moid)))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(body)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                label: label.clone(),
                source,
            })?;

        let updated: serde_json::Value = self
            .ensure_ok(resp, &label)
            .await?
            .json()
            .await
            .map_err(|source| TransportError::Decode { label, source })?;
        Ok(updated)
    }
}
