// Offers module - the catalog the optimizer consumes
//
// Numan Thabit 2025 Nov

pub mod catalog;
pub mod offer;

pub use catalog::{validate_offers, Catalog};
pub use offer::{Counterparty, Direction, Offer, PaymentRail};
