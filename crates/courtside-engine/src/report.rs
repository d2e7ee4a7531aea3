use chrono::{DateTime, Utc};
use serde::Serialize;

use courtside_core::result::EligibilityResult;
use courtside_core::spec::CategorySet;
use courtside_core::traits::EligibilityClassifier;
use courtside_core::types::{EligibilityStatus, TournamentCategory};

use crate::cache::input_fingerprint;

/// Evaluation detail for one category, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDetail {
    pub category: TournamentCategory,
    pub status: EligibilityStatus,
    pub reason: String,
    pub min_elo: f64,
    pub max_elo: f64,
    pub spots_left: i64,
}

/// Classification of one category set for one rating, as printed by `court classify`.
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityReport {
    pub tournament: String,
    pub rating: Option<f64>,
    pub buffer_range: f64,
    pub fingerprint: String,
    pub evaluated_at: DateTime<Utc>,
    pub result: EligibilityResult,
    pub details: Vec<CategoryDetail>,
}

impl EligibilityReport {
    pub fn build(
        set: &CategorySet,
        rating: Option<f64>,
        buffer_range: f64,
        classifier: &dyn EligibilityClassifier,
    ) -> Self {
        let result = classifier.classify(&set.categories, rating, buffer_range);
        Self::from_result(set, rating, buffer_range, result)
    }

    /// Assemble a report around an already computed result.
    ///
    /// Details are read back from `result`, so they always agree with it.
    /// Categories the result does not cover are left out.
    pub fn from_result(
        set: &CategorySet,
        rating: Option<f64>,
        buffer_range: f64,
        result: EligibilityResult,
    ) -> Self {
        let details = set
            .categories
            .iter()
            .filter_map(|data| {
                let status = result.status_of(&data.category)?;
                let reason = result.reason(&data.category)?.to_string();
                Some(CategoryDetail {
                    category: data.category.clone(),
                    status,
                    reason,
                    min_elo: data.min_elo,
                    max_elo: data.max_elo,
                    spots_left: data.spots_left(),
                })
            })
            .collect();

        Self {
            tournament: set.tournament.clone(),
            rating,
            buffer_range,
            fingerprint: input_fingerprint(&set.categories, rating, buffer_range),
            evaluated_at: Utc::now(),
            result,
            details,
        }
    }

    /// Aligned text table.
    pub fn render_text(&self) -> String {
        let rating = self
            .rating
            .map(|r| format!("{r:.1}"))
            .unwrap_or_else(|| "(not signed in)".to_string());
        let mut out = format!(
            "{}  rating {rating}  buffer {}\n",
            self.tournament, self.buffer_range
        );

        let w_cat = self
            .details
            .iter()
            .map(|d| d.category.as_str().len())
            .max()
            .unwrap_or(8)
            .max(8);
        out.push_str(&format!(
            "{:<w_cat$}  {:<10}  {:<9}  {:<5}  REASON\n",
            "CATEGORY", "STATUS", "RANGE", "SPOTS"
        ));
        for d in &self.details {
            out.push_str(&format!(
                "{:<w_cat$}  {:<10}  {:<9}  {:<5}  {}\n",
                d.category.as_str(),
                d.status.as_str(),
                format!("{:.1}-{:.1}", d.min_elo, d.max_elo),
                d.spots_left,
                d.reason
            ));
        }
        let summary = if self.result.is_eligible {
            "eligible for at least one category"
        } else {
            "not eligible for any category"
        };
        out.push_str(summary);
        out.push('\n');
        out
    }
}
