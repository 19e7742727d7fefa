//! `$NAME` / `${NAME}` placeholder substitution for generated config files.
//!
//! `$$` produces a literal `$`. Identifiers are ASCII letters, digits and
//! underscores, not starting with a digit.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("missing variable {0}")]
    MissingVariable(String),

    #[error("invalid placeholder at byte {offset}")]
    InvalidPlaceholder { offset: usize },

    #[error("read template {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Replace every placeholder, failing on the first unknown or malformed one.
pub fn substitute(template: &str, vars: &HashMap<String, String>) -> Result<String, TemplateError> {
    expand(template, vars, true)
}

/// Replace known placeholders and leave everything else untouched.
pub fn safe_substitute(template: &str, vars: &HashMap<String, String>) -> String {
    // Non-strict expansion never errors.
    expand(template, vars, false).unwrap_or_else(|_| template.to_string())
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn expand(
    template: &str,
    vars: &HashMap<String, String>,
    strict: bool,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let at = offset + pos;
        let after = &rest[pos + 1..];

        // (placeholder text consumed including '$', identifier if well-formed)
        let (consumed, ident) = if after.starts_with('$') {
            out.push('$');
            (2, None)
        } else if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) if is_identifier(&braced[..end]) => (end + 3, Some(&braced[..end])),
                _ => (1, None),
            }
        } else if after.starts_with(is_ident_start) {
            let len = after.find(|c: char| !is_ident_char(c)).unwrap_or(after.len());
            (len + 1, Some(&after[..len]))
        } else {
            (1, None)
        };

        let literal = &rest[pos..pos + consumed];
        match ident {
            Some(name) => match vars.get(name) {
                Some(value) => out.push_str(value),
                None if strict => return Err(TemplateError::MissingVariable(name.to_string())),
                None => out.push_str(literal),
            },
            None if literal == "$$" => {}
            None if strict => return Err(TemplateError::InvalidPlaceholder { offset: at }),
            None => out.push_str(literal),
        }

        rest = &rest[pos + consumed..];
        offset += pos + consumed;
    }
    out.push_str(rest);
    Ok(out)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if is_ident_start(c)) && chars.all(is_ident_char)
}

/// A template shipped alongside the deployment scripts.
#[derive(Clone, Copy, Debug)]
pub struct Preset {
    pub name: &'static str,
    pub template: &'static str,
    pub output: &'static str,
    /// Variable names with an optional default used when the environment
    /// does not provide one.
    pub vars: &'static [(&'static str, Option<&'static str>)],
}

pub const UBUNTU_AUTOINSTALL: Preset = Preset {
    name: "ubuntu",
    template: "ubuntu-ai-config.template",
    output: "ubuntu-ai-config.cfg",
    vars: &[
        ("PROXY_URL", None),
        ("SERVER_INTERFACE", None),
        ("SERVER_IP_ADDRESS", None),
        ("SERVER_GATEWAY", None),
        ("PRIMARY_DNS", None),
        ("SERVER_HOSTNAME", Some("ai-server")),
        ("SERVER_TIMEZONE", Some("Europe/Paris")),
    ],
};

pub const JSON_CONFIG: Preset = Preset {
    name: "json",
    template: "config.template.json",
    output: "config.json",
    vars: &[
        ("SERVER_PROFILE_NAME", None),
        ("SERVER_SERIAL", None),
        ("NATIVE_VLAN_ID", None),
        ("ALLOWED_VLANS", None),
        ("INBAND_VLAN_ID", None),
        ("MGMT_IP_FROM", None),
        ("MGMT_IP_TO", None),
        ("MGMT_GATEWAY", None),
        ("MGMT_PRIMARY_DNS", None),
        ("MGMT_SECONDARY_DNS", None),
    ],
};

impl Preset {
    /// Values for this preset's variables; unset variables without a
    /// default are left out so substitution reports them as missing.
    pub fn collect_vars(&self, read_env: impl Fn(&str) -> Option<String>) -> HashMap<String, String> {
        self.vars
            .iter()
            .filter_map(|(name, default)| {
                read_env(name)
                    .or_else(|| default.map(str::to_string))
                    .map(|value| (name.to_string(), value))
            })
            .collect()
    }
}

/// What [`generate`] wrote.
#[derive(Debug)]
pub struct Generated {
    pub output: PathBuf,
    /// Set when strict substitution failed and placeholders were left as-is.
    pub fallback: Option<TemplateError>,
}

/// Render `template_path` into `output_path`.
///
/// Strict substitution is tried first; on failure the output is produced with
/// unknown placeholders kept verbatim and the reason is returned in
/// [`Generated::fallback`].
pub fn generate(
    template_path: &Path,
    output_path: &Path,
    vars: &HashMap<String, String>,
) -> Result<Generated, TemplateError> {
    let template =
        std::fs::read_to_string(template_path).map_err(|source| TemplateError::Read {
            path: template_path.to_path_buf(),
            source,
        })?;

    let (content, fallback) = match substitute(&template, vars) {
        Ok(content) => (content, None),
        Err(err) => {
            warn!(template = %template_path.display(), error = %err, "using template as-is for unresolved placeholders");
            (safe_substitute(&template, vars), Some(err))
        }
    };

    std::fs::write(output_path, content).map_err(|source| TemplateError::Write {
        path: output_path.to_path_buf(),
        source,
    })?;
    info!(output = %output_path.display(), template = %template_path.display(), "generated");

    Ok(Generated {
        output: output_path.to_path_buf(),
        fallback,
    })
}

#[cfg(test)]
#[path = "tests/template_tests.rs"]
mod tests;
