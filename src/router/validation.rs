// Pre-route validation module
// Validates request parameters and the catalog before any subset is enumerated
//
// Numan Thabit 2025 Nov

use crate::errors::{Result, RouteError};
use crate::offers::{validate_offers, Direction, Offer};

/// Check every precondition of a route request and return the side being filled.
///
/// Order matters for callers matching on the error: an empty catalog is
/// reported before bad parameters, bad parameters before bad offers.
pub fn validate_route_request(
    offers: &[Offer],
    target_amount: f64,
    max_offers_per_route: usize,
) -> Result<Direction> {
    if offers.is_empty() {
        return Err(RouteError::EmptyCatalog);
    }
    if !(target_amount.is_finite() && target_amount > 0.0) {
        return Err(RouteError::InvalidTargetAmount(target_amount));
    }
    if max_offers_per_route == 0 {
        return Err(RouteError::InvalidMaxOffers);
    }
    validate_offers(offers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one() -> Vec<Offer> {
        vec![Offer::new("a", 36.0, 10.0, Direction::Buy)]
    }

    #[test]
    fn empty_catalog_reported_first() {
        assert_eq!(validate_route_request(&[], -1.0, 0), Err(RouteError::EmptyCatalog));
    }

    #[test]
    fn rejects_bad_target() {
        assert_eq!(validate_route_request(&one(), 0.0, 5), Err(RouteError::InvalidTargetAmount(0.0)));
        assert!(matches!(
            validate_route_request(&one(), f64::INFINITY, 5),
            Err(RouteError::InvalidTargetAmount(_))
        ));
    }

    #[test]
    fn rejects_zero_offers_per_route() {
        assert_eq!(validate_route_request(&one(), 5.0, 0), Err(RouteError::InvalidMaxOffers));
    }

    #[test]
    fn accepts_valid_request() {
        assert_eq!(validate_route_request(&one(), 5.0, 1), Ok(Direction::Buy));
    }
}
