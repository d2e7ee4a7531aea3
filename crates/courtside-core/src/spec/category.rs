use serde::{Deserialize, Serialize};

use crate::types::TournamentCategory;

/// Admission rule for one category at evaluation time.
///
/// `min_elo <= max_elo` and non-negative capacities are expected but not
/// enforced here; see `validate::validate_categories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEligibilityData {
    pub category: TournamentCategory,
    pub min_elo: f64,
    pub max_elo: f64,
    pub max_participants: i64,

    #[serde(default)]
    pub current_participants: i64,
}

impl CategoryEligibilityData {
    pub fn new(category: impl Into<TournamentCategory>, min_elo: f64, max_elo: f64) -> Self {
        Self {
            category: category.into(),
            min_elo,
            max_elo,
            max_participants: 0,
            current_participants: 0,
        }
    }

    pub fn with_capacity(mut self, max_participants: i64, current_participants: i64) -> Self {
        self.max_participants = max_participants;
        self.current_participants = current_participants;
        self
    }

    pub fn is_full(&self) -> bool {
        self.current_participants >= self.max_participants
    }

    /// Open seats, floored at zero.
    pub fn spots_left(&self) -> i64 {
        self.max_participants
            .saturating_sub(self.current_participants)
            .max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_participants_defaults_to_zero() {
        let data: CategoryEligibilityData = serde_json::from_str(
            r#"{"category":"Gold","min_elo":2.0,"max_elo":3.0,"max_participants":10}"#,
        )
        .unwrap();
        assert_eq!(data.current_participants, 0);
        assert!(!data.is_full());
        assert_eq!(data.spots_left(), 10);
    }

    #[test]
    fn zero_capacity_is_full() {
        let data = CategoryEligibilityData::new("Bronze", 0.0, 1.0);
        assert!(data.is_full());
        assert_eq!(data.spots_left(), 0);
    }

    #[test]
    fn overbooked_has_no_spots() {
        let data = CategoryEligibilityData::new("Silver", 1.0, 2.0).with_capacity(8, 9);
        assert!(data.is_full());
        assert_eq!(data.spots_left(), 0);
    }

    #[test]
    fn extreme_capacities_saturate() {
        let data = CategoryEligibilityData::new("Gold", 2.0, 3.0).with_capacity(i64::MAX, -1);
        assert_eq!(data.spots_left(), i64::MAX);
        let data = CategoryEligibilityData::new("Gold", 2.0, 3.0).with_capacity(i64::MIN, 1);
        assert_eq!(data.spots_left(), 0);
    }
}
