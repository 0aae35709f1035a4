// Offer catalog loading and validation
// Reads a catalog produced by the data-acquisition side from JSON or YAML
// and checks it before it reaches the optimizer
//
// Numan Thabit 2025 Nov

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use crate::errors::{self, RouteError};
use crate::offers::offer::{Direction, Offer};

/// An owned, ordered list of offers
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub offers: Vec<Offer>,
}

impl Catalog {
    /// Load a catalog file. `.yaml`/`.yml` are parsed as YAML, anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read catalog {}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let offers: Vec<Offer> = if is_yaml {
            serde_yaml::from_str(&raw)
                .with_context(|| format!("parse YAML catalog {}", path.display()))?
        } else {
            serde_json::from_str(&raw)
                .with_context(|| format!("parse JSON catalog {}", path.display()))?
        };

        debug!(path = %path.display(), offers = offers.len(), "loaded offer catalog");
        Ok(Self { offers })
    }

    pub fn as_slice(&self) -> &[Offer] {
        &self.offers
    }
}

/// Check catalog preconditions and return the side being filled.
///
/// Fails with `EmptyCatalog` for an empty slice, `InvalidOffer` for a price or
/// available amount that is not finite and positive, and `MixedDirections`
/// when BUY and SELL offers are combined.
pub fn validate_offers(offers: &[Offer]) -> errors::Result<Direction> {
    let first = offers.first().ok_or(RouteError::EmptyCatalog)?;

    for offer in offers {
        if !(offer.price.is_finite() && offer.price > 0.0) {
            return Err(RouteError::InvalidOffer {
                id: offer.id.clone(),
                reason: format!("price {} must be positive", offer.price),
            });
        }
        if !(offer.available_amount.is_finite() && offer.available_amount > 0.0) {
            return Err(RouteError::InvalidOffer {
                id: offer.id.clone(),
                reason: format!("available amount {} must be positive", offer.available_amount),
            });
        }
        if offer.direction != first.direction {
            return Err(RouteError::MixedDirections);
        }
    }

    Ok(first.direction)
}
