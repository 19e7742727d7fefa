//! DTOs and payload types for management API requests/responses.

use serde::{Deserialize, Serialize};

use crate::model::{BulkOperation, BulkRequest, HttpVerb, Moid, OperationBody, ResourceKind};

/// One row of a filtered collection listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSummary {
    #[serde(rename = "Moid")]
    pub moid: Moid,

    #[serde(rename = "Name", default)]
    pub name: Option<String>,

    #[serde(rename = "ObjectType", default)]
    pub object_type: Option<String>,

    /// Concrete type behind a summary view (`compute.RackUnit`, `compute.Blade`).
    #[serde(rename = "SourceObjectType", default)]
    pub source_object_type: Option<String>,
}

impl ResourceSummary {
    /// Type to use when another object references this one.
    pub fn native_type(&self, kind: ResourceKind) -> String {
        let reported = match kind {
            ResourceKind::Server => self
                .source_object_type
                .as_deref()
                .or(self.object_type.as_deref()),
            _ => self.object_type.as_deref(),
        };
        reported
            .filter(|t| !t.is_empty())
            .unwrap_or(kind.object_type())
            .to_string()
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ListResponse {
    #[serde(rename = "Results", default)]
    pub(super) results: Option<Vec<ResourceSummary>>,
}

/// Outcome of one bulk sub-request as reported by the remote side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BulkResult {
    #[serde(rename = "Status")]
    pub status: u16,

    #[serde(rename = "Body", default)]
    pub body: serde_json::Value,
}

impl BulkResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Acknowledgment returned when a bulk request is accepted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkResponse {
    #[serde(rename = "Moid", default)]
    pub moid: Option<Moid>,

    #[serde(rename = "Results", default)]
    pub results: Vec<BulkResult>,
}

impl BulkResponse {
    pub fn failed_results(&self) -> impl Iterator<Item = &BulkResult> {
        self.results.iter().filter(|r| !r.is_success())
    }
}

#[derive(Debug, Serialize)]
pub(super) struct BulkRequestBody<'a> {
    #[serde(rename = "Verb")]
    pub(super) verb: HttpVerb,
    #[serde(rename = "Uri")]
    pub(super) uri: &'a str,
    #[serde(rename = "Requests")]
    pub(super) requests: Vec<BulkSubRequestBody<'a>>,
}

#[derive(Debug, Serialize)]
pub(super) struct BulkSubRequestBody<'a> {
    #[serde(rename = "ObjectType")]
    pub(super) object_type: &'static str,
    #[serde(rename = "Verb")]
    pub(super) verb: HttpVerb,
    #[serde(rename = "Uri")]
    pub(super) uri: &'a str,
    #[serde(rename = "Body")]
    pub(super) body: &'a OperationBody,
}

impl<'a> From<&'a BulkOperation> for BulkSubRequestBody<'a> {
    fn from(op: &'a BulkOperation) -> Self {
        Self {
            object_type: "bulk.RestSubRequest",
            verb: op.verb,
            uri: &op.uri,
            body: &op.body,
        }
    }
}

impl<'a> From<&'a BulkRequest> for BulkRequestBody<'a> {
    fn from(request: &'a BulkRequest) -> Self {
        let first = request.first();
        Self {
            verb: first.verb,
            uri: &first.uri,
            requests: request.operations().iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/remote/types_tests.rs"]
mod tests;
