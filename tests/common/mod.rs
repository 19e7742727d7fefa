#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use osdeploy::config::InstallSettings;
use osdeploy::files::FileReader;
use osdeploy::model::{BulkRequest, Moid, ResourceKind};
use osdeploy::remote::{BulkResponse, BulkResult, ResourceSummary, Transport, TransportError};
use osdeploy::resolve::name_filter;

#[derive(Clone, Debug)]
pub enum Call {
    List { kind: ResourceKind, filter: String },
    Bulk(BulkRequest),
    Update {
        kind: ResourceKind,
        moid: Moid,
        body: serde_json::Value,
    },
}

/// In-memory backend that records every call made against it.
#[derive(Default)]
pub struct FakeTransport {
    resources: HashMap<ResourceKind, Vec<ResourceSummary>>,
    failing_lists: HashSet<ResourceKind>,
    hanging_lists: HashSet<ResourceKind>,
    submit_failure: Option<u16>,
    bulk_results: Vec<BulkResult>,
    calls: Mutex<Vec<Call>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        kind: ResourceKind,
        moid: &str,
        name: &str,
        object_type: &str,
        source_object_type: Option<&str>,
    ) -> Self {
        self.resources
            .entry(kind)
            .or_default()
            .push(ResourceSummary {
                moid: Moid::new(moid),
                name: Some(name.to_string()),
                object_type: Some(object_type.to_string()),
                source_object_type: source_object_type.map(str::to_string),
            });
        self
    }

    /// Backend with one of each install prerequisite plus a server profile.
    pub fn lab() -> Self {
        Self::new()
            .with(
                ResourceKind::Server,
                "srv-moid",
                "rack1-node3",
                "compute.PhysicalSummary",
                Some("compute.RackUnit"),
            )
            .with(
                ResourceKind::Organization,
                "org-moid",
                "default",
                "organization.Organization",
                None,
            )
            .with(
                ResourceKind::OperatingSystemImage,
                "os-moid",
                "ubuntu-22.04",
                "softwarerepository.OperatingSystemFile",
                None,
            )
            .with(
                ResourceKind::ConfigUtilityImage,
                "scu-moid",
                "ucs-scu-6.3",
                "firmware.ServerConfigurationUtilityDistributable",
                None,
            )
            .with(
                ResourceKind::ServerProfile,
                "sp-moid",
                "sp-blade-01",
                "server.Profile",
                None,
            )
    }

    pub fn failing_list(mut self, kind: ResourceKind) -> Self {
        self.failing_lists.insert(kind);
        self
    }

    pub fn hanging_list(mut self, kind: ResourceKind) -> Self {
        self.hanging_lists.insert(kind);
        self
    }

    pub fn failing_submit(mut self, status: u16) -> Self {
        self.submit_failure = Some(status);
        self
    }

    pub fn bulk_results(mut self, results: Vec<BulkResult>) -> Self {
        self.bulk_results = results;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> Vec<(ResourceKind, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::List { kind, filter } => Some((kind, filter)),
                _ => None,
            })
            .collect()
    }

    pub fn bulk_calls(&self) -> Vec<BulkRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Bulk(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn update_calls(&self) -> Vec<(ResourceKind, Moid, serde_json::Value)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Update { kind, moid, body } => Some((kind, moid, body)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn unavailable(label: &str, status: u16) -> TransportError {
    TransportError::Status {
        label: label.to_string(),
        status,
        message: "backend unavailable".to_string(),
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn list_resources(
        &self,
        kind: ResourceKind,
        filter: &str,
    ) -> Result<Vec<ResourceSummary>, TransportError> {
        self.record(Call::List {
            kind,
            filter: filter.to_string(),
        });
        if self.hanging_lists.contains(&kind) {
            std::future::pending::<()>().await;
        }
        if self.failing_lists.contains(&kind) {
            return Err(unavailable("list", 503));
        }
        Ok(self
            .resources
            .get(&kind)
            .map(|all| {
                all.iter()
                    .filter(|r| {
                        r.name
                            .as_deref()
                            .is_some_and(|name| name_filter(name) == filter)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn submit_bulk(&self, request: &BulkRequest) -> Result<BulkResponse, TransportError> {
        self.record(Call::Bulk(request.clone()));
        if let Some(status) = self.submit_failure {
            return Err(unavailable("bulk request", status));
        }
        let results = if self.bulk_results.is_empty() {
            vec![BulkResult {
                status: 200,
                body: serde_json::json!({ "ObjectType": "os.Install" }),
            }]
        } else {
            self.bulk_results.clone()
        };
        Ok(BulkResponse {
            moid: Some(Moid::new("bulk-moid")),
            results,
        })
    }

    async fn update_resource(
        &self,
        kind: ResourceKind,
        moid: &Moid,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, TransportError> {
        self.record(Call::Update {
            kind,
            moid: moid.clone(),
            body: body.clone(),
        });
        if let Some(status) = self.submit_failure {
            return Err(unavailable("update", status));
        }
        let mut updated = body.clone();
        updated["Moid"] = serde_json::Value::String(moid.to_string());
        Ok(updated)
    }
}

/// File reader backed by a map; unknown paths are `NotFound`.
#[derive(Default)]
pub struct FakeFiles {
    files: HashMap<PathBuf, String>,
}

impl FakeFiles {
    pub fn with(mut self, path: &str, content: &str) -> Self {
        self.files.insert(PathBuf::from(path), content.to_string());
        self
    }
}

impl FileReader for FakeFiles {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }
}

pub const ANSWER_FILE: &str = "ubuntu-ai-config.cfg";
pub const ANSWERS: &str = "#cloud-config\nautoinstall:\n  version: 1\n";

pub fn answer_files() -> FakeFiles {
    FakeFiles::default().with(ANSWER_FILE, ANSWERS)
}

pub fn lab_settings() -> InstallSettings {
    InstallSettings {
        server: "rack1-node3".to_string(),
        organization: "default".to_string(),
        os_image: "ubuntu-22.04".to_string(),
        scu_image: "ucs-scu-6.3".to_string(),
        answer_file: PathBuf::from(ANSWER_FILE),
    }
}
