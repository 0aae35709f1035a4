// Router module - offer combination and route selection plane
// This file wires the combination generator, bank filter, greedy allocator
// and selector into the route optimizer
//
// Numan Thabit 2025 Nov

pub mod combinations;
pub mod filter;
pub mod optimizer;
pub mod routes;
pub mod selector;
pub mod validation;

pub use filter::{filter_by_bank, list_banks};
pub use optimizer::{compute_best_route, RouteOptimizer};
pub use routes::{Route, RouteLeg, RouteResult, RouteSummary};
pub use selector::RouteSelector;
