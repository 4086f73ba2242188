//! Shipping calculators offered on shipping methods.

use super::{round_currency, Calculator};
use crate::model::Order;

/// The same amount for every order.
#[derive(Debug, Clone)]
pub struct FlatRate {
    pub amount: f64,
}

impl Default for FlatRate {
    fn default() -> Self {
        Self { amount: 10.0 }
    }
}

impl Calculator for FlatRate {
    fn description(&self) -> &'static str {
        "Flat rate"
    }

    fn compute(&self, _order: &Order) -> f64 {
        round_currency(self.amount)
    }
}

/// A fixed amount per unit shipped.
#[derive(Debug, Clone)]
pub struct PerItem {
    pub amount: f64,
}

impl Default for PerItem {
    fn default() -> Self {
        Self { amount: 2.0 }
    }
}

impl Calculator for PerItem {
    fn description(&self) -> &'static str {
        "Flat rate per item"
    }

    fn available(&self, order: &Order) -> bool {
        order.quantity() > 0
    }

    fn compute(&self, order: &Order) -> f64 {
        round_currency(self.amount * order.quantity() as f64)
    }
}

/// A percentage of the item total.
#[derive(Debug, Clone)]
pub struct FlatPercentItemTotal {
    pub percent: f64,
}

impl Default for FlatPercentItemTotal {
    fn default() -> Self {
        Self { percent: 10.0 }
    }
}

impl Calculator for FlatPercentItemTotal {
    fn description(&self) -> &'static str {
        "Flat percent"
    }

    fn compute(&self, order: &Order) -> f64 {
        round_currency(order.item_total() * self.percent / 100.0)
    }
}

/// `normal_amount` below `minimal_amount` of item total, `discount_amount` at or above it.
#[derive(Debug, Clone)]
pub struct PriceSack {
    pub minimal_amount: f64,
    pub normal_amount: f64,
    pub discount_amount: f64,
}

impl Default for PriceSack {
    fn default() -> Self {
        Self {
            minimal_amount: 100.0,
            normal_amount: 12.0,
            discount_amount: 0.0,
        }
    }
}

impl Calculator for PriceSack {
    fn description(&self) -> &'static str {
        "Price sack"
    }

    fn compute(&self, order: &Order) -> f64 {
        if order.item_total() < self.minimal_amount {
            round_currency(self.normal_amount)
        } else {
            round_currency(self.discount_amount)
        }
    }
}
