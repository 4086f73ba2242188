//! Tax calculators offered on tax rates.

use super::{round_currency, Calculator};
use crate::model::Order;

/// A single rate applied to the item total of orders shipping to one country.
#[derive(Debug, Clone)]
pub struct DefaultTax {
    pub country_iso: String,
    pub rate: f64,
}

impl DefaultTax {
    pub fn new(country_iso: impl Into<String>, rate: f64) -> Self {
        Self {
            country_iso: country_iso.into(),
            rate,
        }
    }
}

impl Default for DefaultTax {
    fn default() -> Self {
        Self::new("US", 0.05)
    }
}

impl Calculator for DefaultTax {
    fn description(&self) -> &'static str {
        "Default tax"
    }

    fn available(&self, order: &Order) -> bool {
        order.ship_country_iso.eq_ignore_ascii_case(&self.country_iso)
    }

    fn compute(&self, order: &Order) -> f64 {
        round_currency(order.item_total() * self.rate)
    }
}
