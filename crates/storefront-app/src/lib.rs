//! # Storefront App Library
//!
//! The storefront application built on [`storefront_core`].
//!
//! ## 🚀 Core Components
//!
//! - **[config]**: The [`AppConfiguration`](config::AppConfiguration) root, its TOML file
//!   layer and `STOREFRONT_*` environment overrides.
//! - **[engine]**: The boot sequence. Named initializers seed the preference environment,
//!   then plugins and the application adjust it.
//! - **[calculators]**: Shipping and tax [`Calculator`](calculators::Calculator)
//!   implementations plus the catalog that builds them from a `ClassRef`.
//! - **[checkout]**: Consumers that iterate registered calculators to quote an order.
//! - **[param_filter]**: Redaction of passwords and card data in logged parameters.
//! - **[model]**: Plain order data.
//!
//! ## 📚 Quick Start
//!
//! ```rust
//! use storefront_app::calculators;
//! use storefront_app::checkout;
//! use storefront_app::config::AppConfiguration;
//! use storefront_app::engine::Engine;
//! use storefront_app::model::Order;
//!
//! let config = Engine::new().boot(AppConfiguration::new()).unwrap();
//! let catalog = calculators::default_catalog();
//!
//! let order = Order::new("R1001", "US").with_item("MUG", 12.0, 1);
//! let rates = checkout::quote_shipping(&config, &catalog, &order);
//! assert!(rates[0].selected);
//! ```
//!
//! ## 🧪 Testing
//!
//! Integration tests live in `tests/`: `boot_test.rs` covers initializer ordering and
//! registration, `checkout_test.rs` covers resolution through the catalog.

pub mod calculators;
pub mod checkout;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod param_filter;
