// Bank/rail filtering and rail listing
//
// Numan Thabit 2025 Nov

use std::collections::BTreeSet;
use tracing::debug;

use crate::errors::{Result, RouteError};
use crate::offers::Offer;

/// Narrow the catalog to offers accepting a rail whose bank name or rail
/// type contains `query`, case-insensitively.
///
/// `None`, or a query that is blank after trimming, passes every offer through
/// in catalog order. A query matching nothing fails with `NoMatchingOffers`.
pub fn filter_by_bank<'a>(offers: &'a [Offer], query: Option<&str>) -> Result<Vec<&'a Offer>> {
    let needle = match query.map(str::trim) {
        Some(q) if !q.is_empty() => q.to_lowercase(),
        _ => return Ok(offers.iter().collect()),
    };

    let matched: Vec<&Offer> = offers.iter().filter(|o| accepts(o, &needle)).collect();
    debug!(
        query = %needle,
        total = offers.len(),
        matched = matched.len(),
        "applied bank filter"
    );

    if matched.is_empty() {
        // report the caller's spelling, not the normalized needle
        return Err(RouteError::NoMatchingOffers(query.unwrap_or_default().to_string()));
    }
    Ok(matched)
}

fn accepts(offer: &Offer, needle: &str) -> bool {
    offer.payment_rails.iter().any(|rail| {
        rail.bank_name
            .as_deref()
            .is_some_and(|b| b.to_lowercase().contains(needle))
            || rail.rail_type.to_lowercase().contains(needle)
    })
}

/// Deduplicated, lexicographically sorted rail identifiers across the catalog
pub fn list_banks(offers: &[Offer]) -> Vec<String> {
    offers
        .iter()
        .flat_map(Offer::rail_identifiers)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
