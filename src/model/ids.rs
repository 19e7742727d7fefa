use std::fmt;

use serde::{Deserialize, Serialize};

use super::ResourceKind;

/// Opaque identifier the remote API assigns to every managed object.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Moid(pub String);

impl Moid {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Moid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resource the caller refers to by its display name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamedResource {
    kind: ResourceKind,
    name: String,
}

impl NamedResource {
    /// Returns `None` when the name is empty or only whitespace.
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return None;
        }
        Some(Self { kind, name })
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for NamedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.name)
    }
}

/// Result of a successful name lookup.
///
/// `native_type` is the concrete object type the remote model expects when
/// this resource is referenced from another object (for servers this is the
/// physical subtype, e.g. `compute.RackUnit` or `compute.Blade`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedIdentifier {
    pub kind: ResourceKind,
    pub moid: Moid,
    pub native_type: String,
}

impl ResolvedIdentifier {
    pub fn new(kind: ResourceKind, moid: Moid, native_type: impl Into<String>) -> Self {
        Self {
            kind,
            moid,
            native_type: native_type.into(),
        }
    }
}
