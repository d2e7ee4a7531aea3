use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{EligibilityStatus, TournamentCategory};

/// One category's verdict with its explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryVerdict {
    pub category: TournamentCategory,
    pub status: EligibilityStatus,
    pub reason: String,
}

/// Partition of a category set for one rating.
///
/// Every input category lands in exactly one of the three lists, in input
/// order, and has exactly one entry in `reasons`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub is_eligible: bool,
    pub eligible_categories: Vec<TournamentCategory>,
    pub borderline_categories: Vec<TournamentCategory>,
    pub ineligible_categories: Vec<TournamentCategory>,
    pub reasons: BTreeMap<TournamentCategory, String>,
}

impl EligibilityResult {
    pub fn from_verdicts(verdicts: impl IntoIterator<Item = CategoryVerdict>) -> Self {
        let mut result = Self::default();
        for v in verdicts {
            result.push(v);
        }
        result
    }

    pub fn push(&mut self, verdict: CategoryVerdict) {
        let bucket = match verdict.status {
            EligibilityStatus::Eligible => {
                self.is_eligible = true;
                &mut self.eligible_categories
            }
            EligibilityStatus::Borderline => &mut self.borderline_categories,
            EligibilityStatus::Ineligible => &mut self.ineligible_categories,
        };
        bucket.push(verdict.category.clone());
        self.reasons.insert(verdict.category, verdict.reason);
    }

    /// Status assigned to `category`, if it was part of the evaluated set.
    pub fn status_of(&self, category: &TournamentCategory) -> Option<EligibilityStatus> {
        if self.eligible_categories.contains(category) {
            Some(EligibilityStatus::Eligible)
        } else if self.borderline_categories.contains(category) {
            Some(EligibilityStatus::Borderline)
        } else if self.ineligible_categories.contains(category) {
            Some(EligibilityStatus::Ineligible)
        } else {
            None
        }
    }

    pub fn reason(&self, category: &TournamentCategory) -> Option<&str> {
        self.reasons.get(category).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.eligible_categories.len()
            + self.borderline_categories.len()
            + self.ineligible_categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
