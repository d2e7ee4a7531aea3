pub mod category;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use self::category::CategoryEligibilityData;

/// Category set a club publishes for one tournament (v1.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySet {
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema_uri: Option<String>,

    #[serde(default = "default_version")]
    pub version: String,

    pub tournament: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,

    pub categories: Vec<CategoryEligibilityData>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl CategorySet {
    pub fn find(&self, name: &str) -> Option<&CategoryEligibilityData> {
        self.categories.iter().find(|c| c.category.as_str() == name)
    }

    /// Total (max, current) participants across all categories, saturating.
    pub fn seats(&self) -> (i64, i64) {
        self.categories.iter().fold((0, 0), |(max, cur), c| {
            (
                max.saturating_add(c.max_participants),
                cur.saturating_add(c.current_participants),
            )
        })
    }
}

/// Load a category set document from disk as raw JSON.
pub fn load_value(path: &str) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path).with_context(|| format!("cannot read {path}"))?;
    serde_json::from_str(&content).with_context(|| format!("{path}: invalid JSON"))
}

/// Parse a category set from a JSON value.
pub fn from_value(data: serde_json::Value) -> Result<CategorySet> {
    serde_json::from_value(data).context("not a valid category set")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CategorySet {
        from_value(serde_json::json!({
            "tournament": "Autumn Open",
            "categories": [
                {"category": "Silver", "min_elo": 1.0, "max_elo": 2.0, "max_participants": 16, "current_participants": 4},
                {"category": "Gold", "min_elo": 2.0, "max_elo": 3.0, "max_participants": 10}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn version_defaults_to_1_0() {
        assert_eq!(sample().version, "1.0");
    }

    #[test]
    fn find_by_name() {
        let set = sample();
        assert_eq!(set.find("Gold").map(|c| c.max_participants), Some(10));
        assert!(set.find("Platinum").is_none());
    }

    #[test]
    fn seats_are_summed() {
        assert_eq!(sample().seats(), (26, 4));
    }

    #[test]
    fn seats_saturate_instead_of_overflowing() {
        let mut set = sample();
        set.categories[0].max_participants = i64::MAX;
        set.categories[1].max_participants = 1;
        assert_eq!(set.seats(), (i64::MAX, 4));
    }

    #[test]
    fn missing_categories_is_an_error() {
        let err = from_value(serde_json::json!({"tournament": "x"}));
        assert!(err.is_err());
    }
}
