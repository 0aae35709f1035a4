use approx::assert_relative_eq;
use p2p_router::config::OptimizerConfig;
use p2p_router::{compute_best_route, Direction, Offer, PaymentRail, RouteError, RouteOptimizer, RouteResult};
use rstest::*;

const TOLERANCE: f64 = 1e-9;

#[fixture]
fn two_offers() -> Vec<Offer> {
    vec![
        Offer::new("first", 36.0, 100.0, Direction::Buy),
        Offer::new("second", 36.5, 50.0, Direction::Buy),
    ]
}

#[fixture]
fn demo_catalog() -> Vec<Offer> {
    serde_json::from_str(include_str!("../demos/ves_buy.json")).unwrap()
}

fn ids(result: &RouteResult) -> Vec<&str> {
    result
        .best_route
        .offers_used
        .iter()
        .map(|leg| leg.offer.id.as_str())
        .collect()
}

fn assert_route_invariants(result: &RouteResult) {
    for route in result.ranked() {
        let filled: f64 = route.offers_used.iter().map(|leg| leg.amount).sum();
        assert_relative_eq!(filled, result.target_amount, epsilon = TOLERANCE);
        assert_relative_eq!(route.total_amount, result.target_amount, epsilon = TOLERANCE);
        for leg in &route.offers_used {
            assert!(leg.amount > 0.0);
            assert!(leg.amount <= leg.offer.available_amount + TOLERANCE);
        }
        assert!(route.efficiency <= 100.0 + TOLERANCE);
        assert!(route.savings >= -TOLERANCE);
        assert!(result.best_route.efficiency + TOLERANCE >= route.efficiency);
    }
    assert!(result.alternative_routes.len() <= 3);
}

#[rstest]
fn blends_two_offers_to_reach_target(two_offers: Vec<Offer>) {
    let result = compute_best_route(&two_offers, 120.0, 5, None).unwrap();
    let best = &result.best_route;

    assert_eq!(ids(&result), vec!["first", "second"]);
    assert_relative_eq!(best.offers_used[0].amount, 100.0);
    assert_relative_eq!(best.offers_used[1].amount, 20.0);
    assert_relative_eq!(best.total_cost, 4330.0, epsilon = TOLERANCE);
    assert_relative_eq!(best.average_price, 36.083333333, epsilon = 1e-8);
    assert_relative_eq!(best.efficiency, 99.769053, epsilon = 1e-5);
    assert_relative_eq!(best.savings, 50.0, epsilon = TOLERANCE);
    assert!(result.alternative_routes.is_empty());
    assert_route_invariants(&result);
}

#[rstest]
fn insufficient_liquidity_is_infeasible(two_offers: Vec<Offer>) {
    assert_eq!(
        compute_best_route(&two_offers, 200.0, 5, None),
        Err(RouteError::NoFeasibleRoute(200.0))
    );
}

#[test]
fn single_deep_offer_is_perfect() {
    let offers = vec![Offer::new("deep", 36.0, 500.0, Direction::Buy)];
    let result = compute_best_route(&offers, 50.0, 5, None).unwrap();

    assert_eq!(result.best_route.offer_count(), 1);
    assert_eq!(result.best_route.efficiency, 100.0);
    assert_eq!(result.best_route.savings, 0.0);
    assert_eq!(result.summary.savings, 0.0);
    assert_relative_eq!(result.summary.total_cost, 1800.0);
}

#[rstest]
fn exact_availability_fills_with_one_offer(two_offers: Vec<Offer>) {
    let result = compute_best_route(&two_offers, 100.0, 5, None).unwrap();
    assert_eq!(ids(&result), vec!["first"]);
    assert_eq!(result.best_route.efficiency, 100.0);
}

#[rstest]
fn cap_on_offers_per_route_can_exclude_feasible_blends(two_offers: Vec<Offer>) {
    assert_eq!(
        compute_best_route(&two_offers, 120.0, 1, None),
        Err(RouteError::NoFeasibleRoute(120.0))
    );
}

#[test]
fn empty_catalog_fails() {
    assert_eq!(compute_best_route(&[], 10.0, 5, None), Err(RouteError::EmptyCatalog));
}

#[rstest]
#[case(0.0)]
#[case(-5.0)]
#[case(f64::NAN)]
fn non_positive_target_fails(two_offers: Vec<Offer>, #[case] target: f64) {
    assert!(matches!(
        compute_best_route(&two_offers, target, 5, None),
        Err(RouteError::InvalidTargetAmount(_))
    ));
}

#[rstest]
fn zero_offers_per_route_fails(two_offers: Vec<Offer>) {
    assert_eq!(
        compute_best_route(&two_offers, 10.0, 0, None),
        Err(RouteError::InvalidMaxOffers)
    );
}

#[rstest]
fn picks_cheapest_blend_from_demo_catalog(demo_catalog: Vec<Offer>) {
    let result = compute_best_route(&demo_catalog, 100.0, 5, None).unwrap();

    // 80 @ 36.35 then 20 @ 36.38
    assert_eq!(ids(&result), vec!["11529004413920580609", "11529004413920580611"]);
    assert_relative_eq!(result.best_route.total_cost, 3635.6, epsilon = 1e-9);
    assert_relative_eq!(result.summary.best_single_price, 36.35);
    assert_relative_eq!(result.summary.worst_single_price, 36.61);
    assert_relative_eq!(result.summary.worst_case_cost, 3661.0, epsilon = 1e-9);
    assert_eq!(result.alternative_routes.len(), 3);
    assert_route_invariants(&result);
}

#[rstest]
#[case(10.0)]
#[case(80.0)]
#[case(125.5)]
#[case(333.3)]
#[case(1500.0)]
#[case(2175.5)]
fn every_returned_route_fills_exactly(demo_catalog: Vec<Offer>, #[case] target: f64) {
    let result = compute_best_route(&demo_catalog, target, 5, None).unwrap();
    assert_route_invariants(&result);
    assert_eq!(result.summary.combinations_evaluated, 31);
}

#[rstest]
fn total_liquidity_bounds_feasibility(demo_catalog: Vec<Offer>) {
    let total: f64 = demo_catalog.iter().map(|o| o.available_amount).sum();
    assert!(compute_best_route(&demo_catalog, total, 5, None).is_ok());
    assert_eq!(
        compute_best_route(&demo_catalog, total + 1.0, 5, None),
        Err(RouteError::NoFeasibleRoute(total + 1.0))
    );
}

#[rstest]
fn best_priced_deep_offer_wins_outright(mut demo_catalog: Vec<Offer>) {
    demo_catalog.push(Offer::new("whale", 36.10, 5_000.0, Direction::Buy));
    let result = compute_best_route(&demo_catalog, 900.0, 5, None).unwrap();
    assert_eq!(ids(&result), vec!["whale"]);
    assert_eq!(result.best_route.efficiency, 100.0);
}

#[rstest]
fn bank_filter_scores_against_filtered_catalog(demo_catalog: Vec<Offer>) {
    let result = compute_best_route(&demo_catalog, 100.0, 5, Some("BANESCO")).unwrap();

    for route in result.ranked() {
        for leg in &route.offers_used {
            assert!(leg.offer.rail_identifiers().any(|r| r == "Banesco"));
        }
    }
    assert_eq!(ids(&result), vec!["11529004413920580608"]);
    assert_eq!(result.best_route.efficiency, 100.0);
    assert_relative_eq!(result.best_route.savings, 8.0, epsilon = 1e-9);
}

#[rstest]
fn unknown_bank_fails(demo_catalog: Vec<Offer>) {
    assert_eq!(
        compute_best_route(&demo_catalog, 100.0, 5, Some("Chase")),
        Err(RouteError::NoMatchingOffers("Chase".to_string()))
    );
}

#[rstest]
fn filtered_liquidity_can_be_insufficient(demo_catalog: Vec<Offer>) {
    // Mercantil only backs the 80 unit offer
    assert_eq!(
        compute_best_route(&demo_catalog, 100.0, 5, Some("mercantil")),
        Err(RouteError::NoFeasibleRoute(100.0))
    );
}

#[test]
fn sell_side_prefers_highest_prices() {
    let offers = vec![
        Offer::new("low", 36.0, 80.0, Direction::Sell),
        Offer::new("high", 36.5, 50.0, Direction::Sell),
        Offer::new("mid", 36.2, 100.0, Direction::Sell),
    ];
    let result = compute_best_route(&offers, 120.0, 3, None).unwrap();

    assert_eq!(ids(&result), vec!["high", "mid"]);
    assert_relative_eq!(result.best_route.total_cost, 4359.0, epsilon = 1e-9);
    assert_relative_eq!(result.best_route.efficiency, 36.325 / 36.5 * 100.0, epsilon = 1e-9);
    assert_relative_eq!(result.best_route.savings, 39.0, epsilon = 1e-9);

    let alt_costs: Vec<f64> = result.alternative_routes.iter().map(|r| r.total_cost).collect();
    assert_eq!(alt_costs.len(), 2);
    assert_relative_eq!(alt_costs[0], 4345.0, epsilon = 1e-9);
    assert_relative_eq!(alt_costs[1], 4340.0, epsilon = 1e-9);
    assert_route_invariants(&result);
}

#[test]
fn equal_prices_tie_break_on_catalog_order() {
    let offers = vec![
        Offer::new("a", 36.0, 100.0, Direction::Buy),
        Offer::new("b", 36.0, 100.0, Direction::Buy),
    ];
    let result = compute_best_route(&offers, 50.0, 2, None).unwrap();

    assert_eq!(ids(&result), vec!["a"]);
    assert_eq!(result.alternative_routes.len(), 1);
    assert_eq!(result.alternative_routes[0].offers_used[0].offer.id, "b");
    assert_eq!(result.alternative_routes[0].efficiency, 100.0);
}

#[test]
fn catalog_is_not_mutated() {
    let offers = vec![
        Offer::new("x", 37.0, 10.0, Direction::Buy)
            .with_rail(PaymentRail::new("BankTransfer", Some("Banesco"))),
        Offer::new("y", 36.0, 10.0, Direction::Buy)
            .with_rail(PaymentRail::new("BankTransfer", Some("Banesco"))),
    ];
    let before = offers.clone();
    compute_best_route(&offers, 15.0, 2, Some("banesco")).unwrap();
    assert_eq!(offers, before);
}

#[test]
fn alternatives_respect_configured_cap() {
    let offers: Vec<Offer> = (0..6)
        .map(|i| Offer::new(format!("o{i}"), 36.0 + i as f64 * 0.1, 100.0, Direction::Buy))
        .collect();
    let optimizer = RouteOptimizer::new(OptimizerConfig {
        max_alternatives: 1,
        ..OptimizerConfig::default()
    });
    let result = optimizer.compute_best_route(&offers, 50.0, 3, None).unwrap();
    assert_eq!(result.alternative_routes.len(), 1);
    assert_eq!(ids(&result), vec!["o0"]);
    assert_eq!(result.alternative_routes[0].offers_used[0].offer.id, "o1");
}

#[rstest]
fn same_price_blend_never_outranks_single_offer(
    #[values(36.0, 36.5, 0.1, 1.0, 7.3, 123.45)] price: f64,
    #[values(0.1, 3.8, 7.7, 12.9, 19.9)] shallow: f64,
) {
    let offers = vec![
        Offer::new("deep", price, 1_000.0, Direction::Buy),
        Offer::new("shallow", price, shallow, Direction::Buy),
        Offer::new("backup", price, 1_000.0, Direction::Buy),
    ];
    let result = compute_best_route(&offers, shallow + 0.3, 2, None).unwrap();

    assert_eq!(ids(&result), vec!["deep"]);
    assert_eq!(result.best_route.efficiency, 100.0);
    assert_eq!(result.alternative_routes[0].offers_used[0].offer.id, "backup");
    for route in result.ranked() {
        assert!(route.efficiency <= 100.0);
    }
    assert_route_invariants(&result);
}
