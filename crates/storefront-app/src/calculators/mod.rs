//! # Calculators
//!
//! A calculator turns an [`Order`] into an amount: a shipping cost, a tax, a discount.
//! Which calculators a store may pick from is decided by the preference environment
//! (`calculators.shipping_methods`, `calculators.tax_rates`, ...); this module provides
//! the implementations and the [`Catalog`] that builds them from their [`ClassRef`].
//!
//! ## Capability Check
//!
//! Resolution is explicit. Checkout iterates a registered set, builds each member
//! through the catalog and asks [`Calculator::available`] whether it applies to the
//! order at hand:
//!
//! ```rust
//! use storefront_app::calculators::{self, Calculator};
//! use storefront_app::model::Order;
//!
//! let order = Order::new("R1", "US").with_item("MUG", 12.0, 2);
//! let flat = calculators::shipping::FlatRate::default();
//! assert!(flat.available(&order));
//! assert_eq!(flat.compute(&order), 10.0);
//! ```

pub mod shipping;
pub mod tax;

use crate::model::Order;
use storefront_core::{Catalog, ClassRef};

/// Computes an amount for an order.
pub trait Calculator: Send + Sync {
    /// Human-readable name shown to store administrators.
    fn description(&self) -> &'static str;

    /// Whether this calculator applies to `order`. Defaults to always.
    fn available(&self, _order: &Order) -> bool {
        true
    }

    /// The computed amount, rounded to cents.
    fn compute(&self, order: &Order) -> f64;
}

/// Rounds to two decimal places, half away from zero.
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

fn build<T: Calculator + Default + 'static>() -> Box<dyn Calculator> {
    Box::new(T::default())
}

/// Factories for every calculator this crate ships, using default preferences.
pub fn default_catalog() -> Catalog<dyn Calculator> {
    let mut catalog = Catalog::new();
    catalog
        .provide(ClassRef::of::<shipping::FlatRate>(), build::<shipping::FlatRate>)
        .provide(ClassRef::of::<shipping::PerItem>(), build::<shipping::PerItem>)
        .provide(
            ClassRef::of::<shipping::FlatPercentItemTotal>(),
            build::<shipping::FlatPercentItemTotal>,
        )
        .provide(ClassRef::of::<shipping::PriceSack>(), build::<shipping::PriceSack>)
        .provide(ClassRef::of::<tax::DefaultTax>(), build::<tax::DefaultTax>);
    catalog
}
