// Route optimizer - fills a target amount from a bounded subset of offers
// Enumerates every subset of up to k offers, allocates the target greedily
// in best-price order and hands feasible routes to the selector
//
// Numan Thabit 2025 Nov

use tracing::{debug, info};

use crate::config::OptimizerConfig;
use crate::errors::{Result, RouteError};
use crate::metrics::{ROUTE_COMBINATIONS, ROUTE_LATENCY, ROUTE_REQUESTS};
use crate::offers::Offer;
use crate::router::combinations::{search_space, Combinations};
use crate::router::filter::filter_by_bank;
use crate::router::routes::{PriceBounds, Route, RouteLeg, RouteResult, RouteSummary};
use crate::router::selector::{Candidate, RouteSelector};
use crate::router::validation::validate_route_request;

/// Amount below which a remaining target counts as filled
pub const FILL_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Default)]
pub struct RouteOptimizer {
    config: OptimizerConfig,
}

impl RouteOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Find the cheapest way to fill `target_amount` using at most
    /// `max_offers_per_route` offers, optionally restricted to offers whose
    /// rails match `bank_query`.
    ///
    /// The catalog is never mutated. Routes are ranked by efficiency; ties
    /// keep enumeration order (smaller subsets first, then lexicographic over
    /// the best-price order), with no preference for fewer offers beyond that.
    /// Efficiencies within `EFFICIENCY_TOLERANCE` of each other count as tied.
    ///
    /// Alternatives are distinct routes. A larger subset that fills the target
    /// before reaching its extra members yields the same legs as a smaller one;
    /// only the first of those is ranked, though `feasible_routes` counts all.
    #[tracing::instrument(
        skip_all,
        fields(
            offers = offers.len(),
            target = target_amount,
            max_offers = max_offers_per_route,
            bank = ?bank_query
        )
    )]
    pub fn compute_best_route(
        &self,
        offers: &[Offer],
        target_amount: f64,
        max_offers_per_route: usize,
        bank_query: Option<&str>,
    ) -> Result<RouteResult> {
        let timer = ROUTE_LATENCY.start_timer();
        let outcome = self.optimize(offers, target_amount, max_offers_per_route, bank_query);
        timer.observe_duration();

        let label = match &outcome {
            Ok(_) => "ok",
            Err(err) => err.kind(),
        };
        ROUTE_REQUESTS.with_label_values(&[label]).inc();
        if let Err(err) = &outcome {
            debug!(error = %err, "route optimization failed");
        }
        outcome
    }

    fn optimize(
        &self,
        offers: &[Offer],
        target_amount: f64,
        max_offers_per_route: usize,
        bank_query: Option<&str>,
    ) -> Result<RouteResult> {
        let direction = validate_route_request(offers, target_amount, max_offers_per_route)?;

        let mut sorted = filter_by_bank(offers, bank_query)?;
        // stable: equal prices keep catalog order
        sorted.sort_by(|a, b| direction.compare_prices(a.price, b.price));

        let n = sorted.len();
        let bounds = PriceBounds {
            direction,
            best: sorted[0].price,
            worst: sorted[n - 1].price,
        };

        let max_k = max_offers_per_route.min(n);
        let space = search_space(n, max_k);
        if space > self.config.max_combinations {
            return Err(RouteError::SearchBudgetExceeded {
                combinations: space,
                ceiling: self.config.max_combinations,
            });
        }
        debug!(
            offers = n,
            max_k = max_k,
            combinations = space,
            best_price = bounds.best,
            worst_price = bounds.worst,
            %direction,
            "enumerating offer subsets"
        );

        let mut selector = RouteSelector::new(self.config.max_alternatives);
        let mut evaluated: u64 = 0;
        for k in 1..=max_k {
            let mut combos = Combinations::new(n, k);
            while let Some(combo) = combos.next_slice() {
                evaluated += 1;
                if let Some(candidate) = allocate(&sorted, combo, target_amount, &bounds) {
                    selector.offer(candidate);
                }
            }
        }
        ROUTE_COMBINATIONS.observe(evaluated as f64);

        let selection = selector
            .finish()
            .ok_or(RouteError::NoFeasibleRoute(target_amount))?;

        let best_route = materialize(&sorted, &selection.plan);
        let alternative_routes: Vec<Route> = selection
            .alternatives
            .iter()
            .map(|c| materialize(&sorted, c))
            .collect();

        let summary = RouteSummary {
            direction,
            target_amount,
            total_cost: best_route.total_cost,
            average_price: best_route.average_price,
            efficiency: best_route.efficiency,
            offers_used: best_route.offer_count(),
            savings: best_route.savings,
            best_single_price: bounds.best,
            worst_single_price: bounds.worst,
            worst_case_cost: bounds.worst * target_amount,
            combinations_evaluated: evaluated,
            feasible_routes: selection.feasible,
        };

        info!(
            offers_used = summary.offers_used,
            total_cost = summary.total_cost,
            average_price = summary.average_price,
            efficiency = summary.efficiency,
            alternatives = alternative_routes.len(),
            evaluated = evaluated,
            feasible = selection.feasible,
            "selected best route"
        );

        Ok(RouteResult {
            target_amount,
            best_route,
            alternative_routes,
            summary,
        })
    }
}

/// Greedy fill of one subset. `combo` indices ascend over the sorted catalog,
/// so walking them in order visits members in best-price order.
/// Returns `None` when the subset lacks the liquidity to reach the target.
fn allocate(
    sorted: &[&Offer],
    combo: &[usize],
    target_amount: f64,
    bounds: &PriceBounds,
) -> Option<Candidate> {
    let capacity: f64 = combo.iter().map(|&i| sorted[i].available_amount).sum();
    if capacity + FILL_EPSILON < target_amount {
        return None;
    }

    let mut remaining = target_amount;
    let mut filled = 0.0;
    let mut total_cost = 0.0;
    let mut legs = Vec::with_capacity(combo.len());
    for &i in combo {
        if remaining <= FILL_EPSILON {
            break;
        }
        let offer = sorted[i];
        let take = remaining.min(offer.available_amount);
        legs.push((i, take));
        filled += take;
        total_cost += take * offer.price;
        remaining -= take;
    }

    // weighted form of total_cost / filled; a single leg yields its exact price
    let average_price: f64 = legs
        .iter()
        .map(|&(i, take)| sorted[i].price * (take / filled))
        .sum();
    Some(Candidate {
        legs,
        total_cost,
        average_price,
        efficiency: bounds.efficiency(average_price),
        savings: bounds.savings(total_cost, filled),
    })
}

fn materialize(sorted: &[&Offer], candidate: &Candidate) -> Route {
    let offers_used: Vec<RouteLeg> = candidate
        .legs
        .iter()
        .map(|&(i, amount)| RouteLeg {
            offer: sorted[i].clone(),
            amount,
            cost: sorted[i].price * amount,
        })
        .collect();
    let total_amount = candidate.legs.iter().map(|&(_, amount)| amount).sum();

    Route {
        offers_used,
        total_amount,
        total_cost: candidate.total_cost,
        average_price: candidate.average_price,
        efficiency: candidate.efficiency,
        savings: candidate.savings,
    }
}

/// `RouteOptimizer::compute_best_route` with default settings
pub fn compute_best_route(
    offers: &[Offer],
    target_amount: f64,
    max_offers_per_route: usize,
    bank_query: Option<&str>,
) -> Result<RouteResult> {
    RouteOptimizer::default().compute_best_route(offers, target_amount, max_offers_per_route, bank_query)
}
