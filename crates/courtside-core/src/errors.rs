use crate::types::TournamentCategory;

/// Rejection raised by strict classification when inputs are malformed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EligibilityError {
    #[error("invalid category {category}: {message}")]
    InvalidCategory {
        category: TournamentCategory,
        message: String,
    },
    #[error("invalid buffer range {0}: must be finite and non-negative")]
    InvalidBuffer(f64),
    #[error("invalid ELO rating {0}: must be finite")]
    InvalidRating(f64),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("{path}: invalid defaults: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid value for {var}: {value}")]
    Env { var: &'static str, value: String },
}

/// Structured check result for `court check --json`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CheckReport {
    pub file: String,
    pub version: String,
    pub pass: bool,
    pub errors: Vec<CheckIssue>,
    pub warnings: Vec<CheckIssue>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CheckIssue {
    pub code: String,
    pub check: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl CheckIssue {
    pub fn is_error(&self) -> bool {
        self.code.starts_with('E')
    }
}
