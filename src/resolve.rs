//! Name → identifier lookups against the management API.

use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{NamedResource, ResolvedIdentifier, ResourceKind};
use crate::remote::{Transport, TransportError};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{kind} name must not be empty")]
    EmptyName { kind: ResourceKind },

    #[error("no {kind} named '{name}'")]
    NotFound { kind: ResourceKind, name: String },

    #[error("looking up {kind} '{name}'")]
    Transport {
        kind: ResourceKind,
        name: String,
        #[source]
        source: TransportError,
    },
}

impl ResolveError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::NotFound { .. })
    }
}

/// OData equality filter on the `Name` property.
///
/// Single quotes inside the value are doubled so the literal stays intact.
pub fn name_filter(name: &str) -> String {
    format!("Name eq '{}'", name.replace('\'', "''"))
}

/// Look up a single resource by exact name.
///
/// Issues one list call per invocation; nothing is cached. When several
/// objects share the name, the first one in backend order wins and the
/// ambiguity is only logged.
pub async fn resolve<T: Transport + ?Sized>(
    transport: &T,
    kind: ResourceKind,
    name: &str,
) -> Result<ResolvedIdentifier, ResolveError> {
    let target = NamedResource::new(kind, name).ok_or(ResolveError::EmptyName { kind })?;
    resolve_named(transport, &target).await
}

pub async fn resolve_named<T: Transport + ?Sized>(
    transport: &T,
    target: &NamedResource,
) -> Result<ResolvedIdentifier, ResolveError> {
    let kind = target.kind();
    let name = target.name();
    let matches = transport
        .list_resources(kind, &name_filter(name))
        .await
        .map_err(|source| ResolveError::Transport {
            kind,
            name: name.to_string(),
            source,
        })?;

    let Some(first) = matches.first() else {
        debug!(kind = %kind, resource = name, "no match");
        return Err(ResolveError::NotFound {
            kind,
            name: name.to_string(),
        });
    };
    if matches.len() > 1 {
        warn!(
            kind = %kind,
            resource = name,
            count = matches.len(),
            chosen = %first.moid,
            "name is ambiguous; using first match"
        );
    }

    let resolved = ResolvedIdentifier::new(kind, first.moid.clone(), first.native_type(kind));
    debug!(
        kind = %kind,
        resource = name,
        moid = %resolved.moid,
        native_type = %resolved.native_type,
        "resolved"
    );
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_filter_is_exact_equality() {
        assert_eq!(name_filter("rack1-node3"), "Name eq 'rack1-node3'");
    }

    #[test]
    fn name_filter_escapes_quotes() {
        assert_eq!(name_filter("o'brien"), "Name eq 'o''brien'");
    }
}
