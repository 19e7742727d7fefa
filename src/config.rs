//! Process-level configuration read from environment variables.
//!
//! Every loader takes a `read_env` lookup instead of touching the process
//! environment directly, so callers can layer CLI overrides on top and tests
//! can supply a plain map.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_HOST: &str = "INTERSIGHT_HOST";
pub const ENV_ACCESS_TOKEN: &str = "INTERSIGHT_ACCESS_TOKEN";
pub const ENV_INSECURE: &str = "INTERSIGHT_INSECURE";
pub const ENV_TIMEOUT_SECS: &str = "INTERSIGHT_TIMEOUT_SECS";
pub const ENV_SERVER_NAME: &str = "SERVER_NAME";
pub const ENV_ORGANIZATION_NAME: &str = "ORGANIZATION_NAME";
pub const ENV_OS_IMAGE_NAME: &str = "OS_IMAGE_NAME";
pub const ENV_SCU_IMAGE_NAME: &str = "SCU_IMAGE_NAME";
pub const ENV_ANSWER_FILE: &str = "ANSWER_FILE";
pub const ENV_SERVER_PROFILE_NAME: &str = "SERVER_PROFILE_NAME";

/// Optional dotenv file read from the working directory at startup.
pub const DOTENV_FILE: &str = ".env";

pub const DEFAULT_ORGANIZATION: &str = "default";
pub const DEFAULT_ANSWER_FILE: &str = "./ubuntu-ai-config.cfg";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("invalid {var} value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("load {path}: {reason}")]
    DotEnv { path: String, reason: String },
}

/// Connection settings for the management API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,

    #[serde(skip_serializing)]
    pub access_token: String,

    /// Accept self-signed or otherwise invalid TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ApiConfig {
    pub fn from_env(read_env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = required(&read_env, ENV_HOST)?;
        let access_token = required(&read_env, ENV_ACCESS_TOKEN)?;
        let insecure = match non_empty(&read_env, ENV_INSECURE) {
            Some(v) => parse_bool(ENV_INSECURE, &v)?,
            None => false,
        };
        let timeout_secs = match non_empty(&read_env, ENV_TIMEOUT_SECS) {
            Some(v) => match v.parse::<u64>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: ENV_TIMEOUT_SECS,
                        value: v,
                        reason: "expected a positive number of seconds",
                    });
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };
        Ok(Self {
            base_url,
            access_token,
            insecure,
            timeout_secs,
        })
    }
}

/// Names and paths an OS installation run needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallSettings {
    pub server: String,
    pub organization: String,
    pub os_image: String,
    pub scu_image: String,
    pub answer_file: PathBuf,
}

impl InstallSettings {
    pub fn from_env(read_env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            server: required(&read_env, ENV_SERVER_NAME)?,
            organization: non_empty(&read_env, ENV_ORGANIZATION_NAME)
                .unwrap_or_else(|| DEFAULT_ORGANIZATION.to_string()),
            os_image: required(&read_env, ENV_OS_IMAGE_NAME)?,
            scu_image: required(&read_env, ENV_SCU_IMAGE_NAME)?,
            answer_file: non_empty(&read_env, ENV_ANSWER_FILE)
                .unwrap_or_else(|| DEFAULT_ANSWER_FILE.to_string())
                .into(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSettings {
    pub profile: String,
}

impl ProfileSettings {
    pub fn from_env(read_env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            profile: required(&read_env, ENV_SERVER_PROFILE_NAME)?,
        })
    }
}

/// Load `KEY=value` lines from `path` into the process environment.
///
/// Variables that are already set keep their values. Returns `false` when the
/// file does not exist.
pub fn load_dotenv(path: &Path) -> Result<bool, ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(err) if err.not_found() => Ok(false),
        Err(err) => Err(ConfigError::DotEnv {
            path: path.display().to_string(),
            reason: err.to_string(),
        }),
    }
}

fn non_empty(read_env: &impl Fn(&str) -> Option<String>, var: &str) -> Option<String> {
    read_env(var)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(
    read_env: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    non_empty(read_env, var).ok_or(ConfigError::Missing(var))
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: "expected true or false",
        }),
    }
}
