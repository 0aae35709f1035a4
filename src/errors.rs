// Error types and error handling module
// This file defines the error taxonomy returned by the route optimizer
// and its catalog checks
//
// Numan Thabit 2025 Nov

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error("offer catalog is empty")]
    EmptyCatalog,
    #[error("no offers match bank filter '{0}'")]
    NoMatchingOffers(String),
    #[error("no route of the allowed size can fill {0}")]
    NoFeasibleRoute(f64),
    #[error("target amount must be positive and finite, got {0}")]
    InvalidTargetAmount(f64),
    #[error("max offers per route must be at least 1")]
    InvalidMaxOffers,
    #[error("invalid offer {id}: {reason}")]
    InvalidOffer { id: String, reason: String },
    #[error("catalog mixes BUY and SELL offers")]
    MixedDirections,
    #[error("search space of {combinations} combinations exceeds ceiling {ceiling}")]
    SearchBudgetExceeded { combinations: u64, ceiling: u64 },
}

impl RouteError {
    /// Stable label used for metrics and API error codes
    pub fn kind(&self) -> &'static str {
        match self {
            RouteError::EmptyCatalog => "empty_catalog",
            RouteError::NoMatchingOffers(_) => "no_matching_offers",
            RouteError::NoFeasibleRoute(_) => "no_feasible_route",
            RouteError::InvalidTargetAmount(_) => "invalid_target_amount",
            RouteError::InvalidMaxOffers => "invalid_max_offers",
            RouteError::InvalidOffer { .. } => "invalid_offer",
            RouteError::MixedDirections => "mixed_directions",
            RouteError::SearchBudgetExceeded { .. } => "search_budget_exceeded",
        }
    }

    /// Whether the request itself was malformed, as opposed to a well-formed
    /// request that the catalog cannot satisfy
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            RouteError::InvalidTargetAmount(_)
                | RouteError::InvalidMaxOffers
                | RouteError::InvalidOffer { .. }
                | RouteError::MixedDirections
        )
    }
}

pub type Result<T> = std::result::Result<T, RouteError>;
