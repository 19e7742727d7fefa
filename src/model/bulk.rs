use serde::{Deserialize, Serialize};

use super::{Moid, ResolvedIdentifier};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Post,
}

/// One sub-request of a bulk call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BulkOperation {
    pub verb: HttpVerb,
    /// Target collection relative to the API root, e.g. `/v1/os/Installs`.
    pub uri: String,
    pub body: OperationBody,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperationBody {
    OsInstall(Box<OsInstall>),
}

/// Ordered, non-empty set of operations submitted in a single call.
///
/// The remote side processes each sub-request independently, so a bulk
/// request is atomic in transport only.
#[derive(Clone, Debug, PartialEq)]
pub struct BulkRequest {
    operations: Vec<BulkOperation>,
}

impl BulkRequest {
    pub fn single(operation: BulkOperation) -> Self {
        Self {
            operations: vec![operation],
        }
    }

    pub fn operations(&self) -> &[BulkOperation] {
        &self.operations
    }

    pub fn first(&self) -> &BulkOperation {
        &self.operations[0]
    }
}

/// Typed reference to another managed object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoRef {
    #[serde(rename = "ClassId")]
    pub class_id: String,
    #[serde(rename = "Moid")]
    pub moid: Moid,
    #[serde(rename = "ObjectType")]
    pub object_type: String,
}

impl MoRef {
    pub fn new(moid: Moid, object_type: impl Into<String>) -> Self {
        Self {
            class_id: "mo.MoRef".to_string(),
            moid,
            object_type: object_type.into(),
        }
    }
}

impl From<&ResolvedIdentifier> for MoRef {
    fn from(id: &ResolvedIdentifier) -> Self {
        MoRef::new(id.moid.clone(), id.native_type.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsAnswers {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "AnswerFile")]
    pub answer_file: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualDrive {
    #[serde(rename = "ClassId")]
    pub class_id: String,
    #[serde(rename = "ObjectType")]
    pub object_type: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "StorageControllerSlotId")]
    pub storage_controller_slot_id: String,
    #[serde(rename = "Id")]
    pub id: String,
}

/// Body of an `os.Install` create request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsInstall {
    #[serde(rename = "ClassId")]
    pub class_id: String,
    #[serde(rename = "ObjectType")]
    pub object_type: String,
    #[serde(rename = "InstallMethod")]
    pub install_method: String,
    #[serde(rename = "Image")]
    pub image: MoRef,
    #[serde(rename = "OsduImage")]
    pub osdu_image: MoRef,
    #[serde(rename = "OverrideSecureBoot")]
    pub override_secure_boot: bool,
    #[serde(rename = "Organization")]
    pub organization: MoRef,
    #[serde(rename = "Answers")]
    pub answers: OsAnswers,
    #[serde(rename = "InstallTarget")]
    pub install_target: VirtualDrive,
    #[serde(rename = "Server")]
    pub server: MoRef,
}
