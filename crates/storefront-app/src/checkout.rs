//! # Checkout Quoting
//!
//! The consumer side of the preference environment. Quoting never hard-codes a
//! calculator: it walks the registered set, builds each member through the
//! [`Catalog`], and keeps those whose [`Calculator::available`] check passes.

use crate::calculators::{round_currency, Calculator};
use crate::config::AppConfiguration;
use crate::model::Order;
use storefront_core::{Catalog, ClassRef};
use tracing::{debug, info, instrument};

/// One shipping option offered for an order.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingRate {
    pub calculator: ClassRef,
    pub description: &'static str,
    pub cost: f64,
    pub selected: bool,
}

/// Rates from every available shipping calculator, cheapest first.
///
/// Rates with equal cost keep the registration order of their calculators. The
/// cheapest rate is marked `selected`.
#[instrument(skip_all, fields(order = %order.number))]
pub fn quote_shipping(
    config: &AppConfiguration,
    catalog: &Catalog<dyn Calculator>,
    order: &Order,
) -> Vec<ShippingRate> {
    let registered = config.environment().calculators().shipping_methods();
    let mut rates: Vec<ShippingRate> = catalog
        .resolve(registered)
        .into_iter()
        .filter(|resolved| resolved.instance.available(order))
        .map(|resolved| ShippingRate {
            cost: resolved.instance.compute(order),
            description: resolved.instance.description(),
            calculator: resolved.class,
            selected: false,
        })
        .collect();

    rates.sort_by(|a, b| a.cost.total_cmp(&b.cost));
    if let Some(cheapest) = rates.first_mut() {
        cheapest.selected = true;
        debug!(calculator = %cheapest.calculator, cost = cheapest.cost, "Cheapest rate");
    }

    info!(registered = registered.len(), offered = rates.len(), "Shipping quoted");
    rates
}

/// Total tax from every tax calculator that applies to the order.
#[instrument(skip_all, fields(order = %order.number))]
pub fn compute_tax(
    config: &AppConfiguration,
    catalog: &Catalog<dyn Calculator>,
    order: &Order,
) -> f64 {
    let total: f64 = catalog
        .resolve(config.environment().calculators().tax_rates())
        .iter()
        .filter(|resolved| resolved.instance.available(order))
        .map(|resolved| resolved.instance.compute(order))
        .sum();
    let total = round_currency(total);
    debug!(total, "Tax computed");
    total
}
