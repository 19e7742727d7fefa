mod action;
mod bulk;
mod ids;
mod kind;

pub use self::action::{ProfileActionUpdate, ScheduledAction};
pub use self::bulk::{
    BulkOperation, BulkRequest, HttpVerb, MoRef, OperationBody, OsAnswers, OsInstall,
    VirtualDrive,
};
pub use self::ids::{Moid, NamedResource, ResolvedIdentifier};
pub use self::kind::ResourceKind;
