use courtside_core::errors::EligibilityError;
use courtside_core::result::{CategoryVerdict, EligibilityResult};
use courtside_core::spec::category::CategoryEligibilityData;
use courtside_core::traits::EligibilityClassifier;
use courtside_core::types::EligibilityStatus;
use courtside_core::validate::ensure_valid;

pub const LOGIN_REQUIRED: &str = "Login required to check eligibility";
pub const CATEGORY_FULL: &str = "Category is full";
pub const ELIGIBLE: &str = "Eligible to register";

/// ELO eligibility classifier.
///
/// Per category, in input order:
/// 1. No rating: ineligible, login required (applies to every category)
/// 2. Full (`current >= max` participants): ineligible, regardless of rating
/// 3. `min_elo <= rating <= max_elo`: eligible
/// 4. Within `buffer_range` below `min_elo` or above `max_elo`: borderline
/// 5. Otherwise ineligible, too low or too high
///
/// Stateless and pure. Malformed categories are not rejected here; use
/// `classify_strict` for that.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultClassifier;

impl EligibilityClassifier for DefaultClassifier {
    fn classify(
        &self,
        categories: &[CategoryEligibilityData],
        rating: Option<f64>,
        buffer_range: f64,
    ) -> EligibilityResult {
        classify(categories, rating, buffer_range)
    }

    fn classify_strict(
        &self,
        categories: &[CategoryEligibilityData],
        rating: Option<f64>,
        buffer_range: f64,
    ) -> Result<EligibilityResult, EligibilityError> {
        check_inputs(categories, rating, buffer_range)?;
        Ok(classify(categories, rating, buffer_range))
    }
}

/// Reject malformed categories, a negative or non-finite buffer, or a non-finite rating.
pub fn check_inputs(
    categories: &[CategoryEligibilityData],
    rating: Option<f64>,
    buffer_range: f64,
) -> Result<(), EligibilityError> {
    ensure_valid(categories, buffer_range)?;
    match rating {
        Some(r) if !r.is_finite() => Err(EligibilityError::InvalidRating(r)),
        _ => Ok(()),
    }
}

/// Partition `categories` into eligible, borderline, and ineligible for `rating`.
pub fn classify(
    categories: &[CategoryEligibilityData],
    rating: Option<f64>,
    buffer_range: f64,
) -> EligibilityResult {
    let result = EligibilityResult::from_verdicts(verdicts(categories, rating, buffer_range));
    tracing::debug!(
        categories = categories.len(),
        rating = ?rating,
        buffer_range,
        eligible = result.eligible_categories.len(),
        borderline = result.borderline_categories.len(),
        ineligible = result.ineligible_categories.len(),
        "classified category set"
    );
    result
}

/// Per-category verdicts in input order.
pub fn verdicts(
    categories: &[CategoryEligibilityData],
    rating: Option<f64>,
    buffer_range: f64,
) -> Vec<CategoryVerdict> {
    categories
        .iter()
        .map(|data| match rating {
            Some(r) => evaluate_category(data, r, buffer_range),
            None => CategoryVerdict {
                category: data.category.clone(),
                status: EligibilityStatus::Ineligible,
                reason: LOGIN_REQUIRED.to_string(),
            },
        })
        .collect()
}

/// Status of a single category. `None` when there is no rating.
///
/// Agrees with `classify` for the same category and inputs.
pub fn eligibility_status(
    data: &CategoryEligibilityData,
    rating: Option<f64>,
    buffer_range: f64,
) -> Option<EligibilityStatus> {
    rating.map(|r| evaluate_category(data, r, buffer_range).status)
}

/// Apply rules 2-5 to one category for a known rating.
pub fn evaluate_category(
    data: &CategoryEligibilityData,
    rating: f64,
    buffer_range: f64,
) -> CategoryVerdict {
    let (status, reason) = if data.is_full() {
        (EligibilityStatus::Ineligible, CATEGORY_FULL.to_string())
    } else if rating >= data.min_elo && rating <= data.max_elo {
        (EligibilityStatus::Eligible, ELIGIBLE.to_string())
    } else if (rating >= data.min_elo - buffer_range && rating < data.min_elo)
        || (rating > data.max_elo && rating <= data.max_elo + buffer_range)
    {
        (
            EligibilityStatus::Borderline,
            format!(
                "ELO rating ({rating:.1}) is close to range ({:.1}-{:.1})",
                data.min_elo, data.max_elo
            ),
        )
    } else if rating < data.min_elo {
        (
            EligibilityStatus::Ineligible,
            format!(
                "ELO rating too low (need {}+, have {rating:.1})",
                data.min_elo
            ),
        )
    } else {
        (
            EligibilityStatus::Ineligible,
            format!("ELO rating too high (max {}, have {rating:.1})", data.max_elo),
        )
    };

    tracing::trace!(category = %data.category, rating, %status, "category evaluated");
    CategoryVerdict {
        category: data.category.clone(),
        status,
        reason,
    }
}
