use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance applied on each side of a category's ELO range when no buffer is given.
pub const DEFAULT_BUFFER_RANGE: f64 = 0.2;

/// Skill bracket tag ("Bronze", "Gold", ...). The set is defined by each club.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TournamentCategory(String);

impl TournamentCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TournamentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TournamentCategory {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TournamentCategory {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Admission status of one category for one rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EligibilityStatus {
    Eligible,
    Borderline,
    Ineligible,
}

impl EligibilityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EligibilityStatus::Eligible => "eligible",
            EligibilityStatus::Borderline => "borderline",
            EligibilityStatus::Ineligible => "ineligible",
        }
    }
}

impl fmt::Display for EligibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
