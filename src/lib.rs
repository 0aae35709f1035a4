// Library root module for p2p-router
// This file defines the public API and module structure for the p2p-router library
// It exports the route optimizer and the catalog types it operates on
//
// Numan Thabit 2025 Nov

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod format;
pub mod metrics;
pub mod offers;
pub mod router;

pub use errors::RouteError;
pub use offers::{Counterparty, Direction, Offer, PaymentRail};
pub use router::{compute_best_route, list_banks, Route, RouteOptimizer, RouteResult};
