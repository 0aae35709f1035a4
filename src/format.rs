// Route formatting for display
// Turns route figures into locale-grouped currency strings and a
// one-decimal efficiency percentage
//
// Numan Thabit 2025 Nov

use serde::Serialize;

use crate::config::DisplayConfig;
use crate::router::Route;

/// Digit grouping and decimal mark for a locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberStyle {
    pub group: char,
    pub decimal: char,
}

impl NumberStyle {
    /// Resolve from a BCP 47 tag by its language subtag. Unknown languages
    /// fall back to `1,234.56`.
    pub fn for_locale(tag: &str) -> Self {
        let lang = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match lang.as_str() {
            "es" | "de" | "pt" | "it" | "nl" | "id" | "tr" | "da" => Self { group: '.', decimal: ',' },
            // narrow no-break space
            "fr" => Self { group: '\u{202f}', decimal: ',' },
            _ => Self { group: ',', decimal: '.' },
        }
    }

    /// Two-decimal, grouped rendering of `value`
    pub fn format(&self, value: f64) -> String {
        let fixed = format!("{:.2}", value.abs());
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(self.group);
            }
            grouped.push(ch);
        }

        // -0.00 prints without a sign
        let sign = if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            "-"
        } else {
            ""
        };
        format!("{sign}{grouped}{}{frac_part}", self.decimal)
    }
}

/// Display strings for one route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedRoute {
    pub total_cost: String,
    pub average_price: String,
    pub savings: String,
    pub efficiency: String,
}

#[derive(Debug, Clone)]
pub struct RouteFormatter {
    fiat: String,
    style: NumberStyle,
}

impl RouteFormatter {
    pub fn new(fiat: impl Into<String>, locale: &str) -> Self {
        Self {
            fiat: fiat.into(),
            style: NumberStyle::for_locale(locale),
        }
    }

    pub fn from_config(display: &DisplayConfig) -> Self {
        Self::new(display.fiat.clone(), &display.locale)
    }

    pub fn currency(&self, value: f64) -> String {
        format!("{} {}", self.fiat, self.style.format(value))
    }

    pub fn percent(value: f64) -> String {
        format!("{value:.1}%")
    }

    pub fn format_route(&self, route: &Route) -> FormattedRoute {
        FormattedRoute {
            total_cost: self.currency(route.total_cost),
            average_price: self.currency(route.average_price),
            savings: self.currency(route.savings),
            efficiency: Self::percent(route.efficiency),
        }
    }
}

impl Default for RouteFormatter {
    fn default() -> Self {
        Self::from_config(&DisplayConfig::default())
    }
}
