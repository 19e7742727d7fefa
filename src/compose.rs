//! Assembly of the OS-install bulk request. Pure data, no I/O.

use crate::model::{
    BulkOperation, BulkRequest, HttpVerb, MoRef, OperationBody, OsAnswers, OsInstall,
    ResolvedIdentifier, VirtualDrive,
};

pub const OS_INSTALL_URI: &str = "/v1/os/Installs";
pub const INSTALL_METHOD_VMEDIA: &str = "vMedia";
pub const ANSWER_SOURCE_FILE: &str = "File";

/// Boot drive every target server exposes through its M.2 RAID controller.
pub const BOOT_DRIVE_NAME: &str = "MStorBootVd";
pub const BOOT_DRIVE_CONTROLLER_SLOT: &str = "MSTOR-RAID";
pub const BOOT_DRIVE_ID: &str = "0";

/// Installer configuration text embedded inline in the install request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerPayload(pub String);

impl AnswerPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The four identifiers an OS install references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstallTargets {
    pub server: ResolvedIdentifier,
    pub organization: ResolvedIdentifier,
    pub os_image: ResolvedIdentifier,
    pub scu_image: ResolvedIdentifier,
}

pub fn boot_drive() -> VirtualDrive {
    VirtualDrive {
        class_id: "os.VirtualDrive".to_string(),
        object_type: "os.VirtualDrive".to_string(),
        name: BOOT_DRIVE_NAME.to_string(),
        storage_controller_slot_id: BOOT_DRIVE_CONTROLLER_SLOT.to_string(),
        id: BOOT_DRIVE_ID.to_string(),
    }
}

pub fn os_install(targets: &InstallTargets, answers: AnswerPayload) -> OsInstall {
    OsInstall {
        class_id: "os.Install".to_string(),
        object_type: "os.Install".to_string(),
        install_method: INSTALL_METHOD_VMEDIA.to_string(),
        image: MoRef::from(&targets.os_image),
        osdu_image: MoRef::from(&targets.scu_image),
        override_secure_boot: true,
        organization: MoRef::from(&targets.organization),
        answers: OsAnswers {
            source: ANSWER_SOURCE_FILE.to_string(),
            answer_file: answers.0,
        },
        install_target: boot_drive(),
        server: MoRef::from(&targets.server),
    }
}

/// Build the single-operation bulk request that starts an OS install.
pub fn compose(targets: &InstallTargets, answers: AnswerPayload) -> BulkRequest {
    BulkRequest::single(BulkOperation {
        verb: HttpVerb::Post,
        uri: OS_INSTALL_URI.to_string(),
        body: OperationBody::OsInstall(Box::new(os_install(targets, answers))),
    })
}

#[cfg(test)]
#[path = "tests/compose_tests.rs"]
mod tests;
