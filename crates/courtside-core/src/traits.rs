use crate::errors::EligibilityError;
use crate::result::EligibilityResult;
use crate::spec::category::CategoryEligibilityData;

/// Supplies the rating of whoever is asking. `None` means not signed in or unrated.
///
/// Session state is passed in explicitly rather than read from a global.
pub trait RatingProvider {
    fn elo_rating(&self) -> Option<f64>;
}

impl RatingProvider for Option<f64> {
    fn elo_rating(&self) -> Option<f64> {
        *self
    }
}

/// Signed-in player context.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSession {
    pub player_id: String,
    pub elo_rating: Option<f64>,
}

impl RatingProvider for PlayerSession {
    fn elo_rating(&self) -> Option<f64> {
        self.elo_rating
    }
}

/// Classifies a category set for a rating.
pub trait EligibilityClassifier {
    /// Lenient classification. Never fails.
    fn classify(
        &self,
        categories: &[CategoryEligibilityData],
        rating: Option<f64>,
        buffer_range: f64,
    ) -> EligibilityResult;

    /// Rejects malformed categories, buffers, or ratings before classifying.
    fn classify_strict(
        &self,
        categories: &[CategoryEligibilityData],
        rating: Option<f64>,
        buffer_range: f64,
    ) -> Result<EligibilityResult, EligibilityError>;

    /// Classify for whoever `player` represents.
    fn classify_for(
        &self,
        player: &dyn RatingProvider,
        categories: &[CategoryEligibilityData],
        buffer_range: f64,
    ) -> EligibilityResult {
        self.classify(categories, player.elo_rating(), buffer_range)
    }
}
