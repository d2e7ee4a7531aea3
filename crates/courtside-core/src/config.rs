use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::types::DEFAULT_BUFFER_RANGE;

pub const DEFAULTS_DIR: &str = ".courtside";
pub const DEFAULTS_FILE: &str = ".courtside/defaults.json";
pub const BUFFER_ENV: &str = "COURTSIDE_BUFFER_RANGE";

/// Workspace defaults read from `.courtside/defaults.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_range: Option<f64>,

    /// Reject malformed category sets before classifying.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

impl WorkspaceDefaults {
    pub fn starter() -> Self {
        Self {
            buffer_range: Some(DEFAULT_BUFFER_RANGE),
            strict: Some(true),
        }
    }
}

/// Load workspace defaults from `root`. A missing file yields `None`.
pub fn load_workspace_defaults(root: &Path) -> Result<Option<WorkspaceDefaults>, ConfigError> {
    let path = root.join(DEFAULTS_FILE);
    let shown = path.display().to_string();
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: shown,
                source,
            })
        }
    };
    let defaults = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: shown.clone(),
        source,
    })?;
    tracing::debug!(path = %shown, "loaded workspace defaults");
    Ok(Some(defaults))
}

/// Resolve the buffer range: flag > workspace defaults > environment > built-in.
pub fn resolve_buffer_range(
    flag: Option<f64>,
    defaults: Option<&WorkspaceDefaults>,
    env_value: Option<&str>,
) -> Result<f64, ConfigError> {
    if let Some(b) = flag {
        return Ok(b);
    }
    if let Some(b) = defaults.and_then(|d| d.buffer_range) {
        return Ok(b);
    }
    if let Some(raw) = env_value {
        return raw.trim().parse().map_err(|_| ConfigError::Env {
            var: BUFFER_ENV,
            value: raw.to_string(),
        });
    }
    Ok(DEFAULT_BUFFER_RANGE)
}

/// Strict mode: explicit lenient flag wins, then workspace defaults, then on.
pub fn resolve_strict(lenient_flag: bool, defaults: Option<&WorkspaceDefaults>) -> bool {
    if lenient_flag {
        return false;
    }
    defaults.and_then(|d| d.strict).unwrap_or(true)
}
