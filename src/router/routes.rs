// Route types and result envelope
// This file defines routes, route scoring and the summary handed to the
// presentation side
//
// Numan Thabit 2025 Nov

use serde::Serialize;

use crate::offers::{Direction, Offer};

/// One offer and the amount taken from it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    pub offer: Offer,
    /// Never exceeds `offer.available_amount`
    pub amount: f64,
    /// price * amount
    pub cost: f64,
}

/// A combination of offers and per-offer amounts that fills the target exactly
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub offers_used: Vec<RouteLeg>,
    pub total_amount: f64,
    pub total_cost: f64,
    pub average_price: f64,
    /// Percentage of the best single price; 100.0 means no blending loss
    pub efficiency: f64,
    /// Cost advantage versus filling everything at the worst catalog price
    pub savings: f64,
}

impl Route {
    pub fn offer_count(&self) -> usize {
        self.offers_used.len()
    }
}

/// Reference prices of the filtered, sorted catalog that every route is scored against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBounds {
    pub direction: Direction,
    /// First price in best-price order
    pub best: f64,
    /// Last price in best-price order
    pub worst: f64,
}

impl PriceBounds {
    /// Efficiency of a route averaging `average_price`, as a percentage.
    /// BUY compares best/average, SELL average/best. Rounding in a blended
    /// average can land a hair past the best price, so the ratio is capped at 100.
    pub fn efficiency(&self, average_price: f64) -> f64 {
        let ratio = match self.direction {
            Direction::Buy => self.best / average_price,
            Direction::Sell => average_price / self.best,
        };
        (ratio * 100.0).min(100.0)
    }

    /// Savings of a route versus filling `amount` at the worst price
    pub fn savings(&self, total_cost: f64, amount: f64) -> f64 {
        let worst_case = self.worst * amount;
        match self.direction {
            Direction::Buy => worst_case - total_cost,
            Direction::Sell => total_cost - worst_case,
        }
    }
}

/// Key figures of the best route plus catalog-wide context
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub direction: Direction,
    pub target_amount: f64,
    pub total_cost: f64,
    pub average_price: f64,
    pub efficiency: f64,
    pub offers_used: usize,
    pub savings: f64,
    pub best_single_price: f64,
    pub worst_single_price: f64,
    /// Cost of the whole amount at the worst catalog price
    pub worst_case_cost: f64,
    pub combinations_evaluated: u64,
    pub feasible_routes: usize,
}

/// Route selection result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    pub target_amount: f64,
    pub best_route: Route,
    /// Next best by efficiency, never better than `best_route`
    pub alternative_routes: Vec<Route>,
    pub summary: RouteSummary,
}

impl RouteResult {
    pub fn best_route(&self) -> &Route {
        &self.best_route
    }

    /// Best route followed by the alternatives, in rank order
    pub fn ranked(&self) -> impl Iterator<Item = &Route> {
        std::iter::once(&self.best_route).chain(self.alternative_routes.iter())
    }
}
