// Offer data model
// One marketplace advertisement with its price, liquidity, side,
// accepted payment rails and counterparty details
//
// Numan Thabit 2025 Nov

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which side of the trade the optimizer is filling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Filling a purchase: lower prices are better
    Buy,
    /// Filling a sale: higher prices are better
    Sell,
}

impl Direction {
    /// Best-price ordering for this side. `Less` means `a` is the better price.
    pub fn compare_prices(self, a: f64, b: f64) -> Ordering {
        match self {
            Direction::Buy => a.total_cmp(&b),
            Direction::Sell => b.total_cmp(&a),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Buy => "BUY",
            Direction::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepted payment method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRail {
    pub rail_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
}

impl PaymentRail {
    pub fn new(rail_type: impl Into<String>, bank_name: Option<&str>) -> Self {
        Self {
            rail_type: rail_type.into(),
            bank_name: bank_name.map(str::to_string),
        }
    }

    /// Bank name if present, otherwise the rail type
    pub fn identifier(&self) -> &str {
        self.bank_name.as_deref().unwrap_or(&self.rail_type)
    }
}

/// Counterparty details. Informational only; never used in route math.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Counterparty {
    pub display_name: String,
    pub reputation_score: f64,
    pub completed_order_count: u64,
    pub completion_rate: f64,
}

/// A single priced, quantity-limited advertisement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(default)]
    pub id: String,
    /// Fiat per unit of asset
    pub price: f64,
    /// Maximum asset quantity transactable against this offer
    pub available_amount: f64,
    pub direction: Direction,
    #[serde(default)]
    pub payment_rails: Vec<PaymentRail>,
    #[serde(default)]
    pub counterparty: Counterparty,
}

impl Offer {
    pub fn new(id: impl Into<String>, price: f64, available_amount: f64, direction: Direction) -> Self {
        Self {
            id: id.into(),
            price,
            available_amount,
            direction,
            payment_rails: Vec::new(),
            counterparty: Counterparty::default(),
        }
    }

    pub fn with_rail(mut self, rail: PaymentRail) -> Self {
        self.payment_rails.push(rail);
        self
    }

    /// Identifiers of every accepted rail, in declaration order
    pub fn rail_identifiers(&self) -> impl Iterator<Item = &str> {
        self.payment_rails.iter().map(PaymentRail::identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_orders_prices_by_side() {
        assert_eq!(Direction::Buy.compare_prices(36.0, 36.5), Ordering::Less);
        assert_eq!(Direction::Sell.compare_prices(36.0, 36.5), Ordering::Greater);
        assert_eq!(Direction::Sell.compare_prices(36.0, 36.0), Ordering::Equal);
    }

    #[test]
    fn rail_identifier_prefers_bank_name() {
        let offer = Offer::new("a", 36.0, 10.0, Direction::Buy)
            .with_rail(PaymentRail::new("BankTransfer", Some("Banesco")))
            .with_rail(PaymentRail::new("PagoMovil", None));
        let ids: Vec<_> = offer.rail_identifiers().collect();
        assert_eq!(ids, vec!["Banesco", "PagoMovil"]);
    }

    #[test]
    fn deserializes_camel_case_payload() {
        let raw = r#"{
            "id": "adv-1",
            "price": 36.2,
            "availableAmount": 150.0,
            "direction": "SELL",
            "paymentRails": [{"railType": "BankTransfer", "bankName": "Mercantil"}],
            "counterparty": {"displayName": "trader", "completionRate": 0.98}
        }"#;
        let offer: Offer = serde_json::from_str(raw).unwrap();
        assert_eq!(offer.direction, Direction::Sell);
        assert_eq!(offer.available_amount, 150.0);
        assert_eq!(offer.payment_rails[0].identifier(), "Mercantil");
        assert_eq!(offer.counterparty.completed_order_count, 0);
    }
}
