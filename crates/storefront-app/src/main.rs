//! # Storefront Demo
//!
//! Boots the storefront and quotes a few sample orders concurrently.
//!
//! ```bash
//! # Default registrations
//! RUST_LOG=info cargo run -p storefront-app
//!
//! # With a configuration file, showing every registration
//! RUST_LOG=debug cargo run -p storefront-app -- storefront.toml
//! ```
//!
//! The flow is:
//! 1. Load the optional configuration file.
//! 2. Boot the [`Engine`]: core initializers, a sample plugin, the config file, then
//!    `STOREFRONT_*` overrides.
//! 3. Share the frozen configuration with one Tokio task per order.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use storefront_app::calculators::{self, shipping, Calculator};
use storefront_app::checkout;
use storefront_app::config::{AppConfiguration, ConfigFile};
use storefront_app::engine::Engine;
use storefront_app::model::Order;
use storefront_core::tracing::setup_tracing;
use storefront_core::ClassRef;
use tracing::{error, info, Instrument};

/// Registered by the sample plugin and provided to the catalog below.
const EXPRESS: ClassRef = ClassRef::named("acme::calculator::Express");

fn express() -> Box<dyn Calculator> {
    Box::new(shipping::FlatRate { amount: 24.0 })
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let mut engine = Engine::new();
    engine
        .initializer("acme.register.calculators", |config| {
            config
                .environment_mut()
                .calculators_mut()
                .shipping_methods_mut()
                .add(EXPRESS);
            Ok(())
        })
        .map_err(|e| e.to_string())?;

    if let Some(path) = std::env::args().nth(1).map(PathBuf::from) {
        let file = ConfigFile::load(&path).map_err(|e| e.to_string())?;
        engine.with_config_file(file).map_err(|e| e.to_string())?;
    }
    engine.with_env_overrides();

    let config = engine.boot(AppConfiguration::new()).map_err(|e| e.to_string())?;

    let mut catalog = calculators::default_catalog();
    catalog.provide(EXPRESS, express);
    let catalog = Arc::new(catalog);

    let params: BTreeMap<String, String> = [
        ("user.email", "alice@example.com"),
        ("user.password", "hunter2"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect();
    info!(params = ?config.param_filter().redact(&params), "Checkout request");

    let orders = vec![
        Order::new("R1001", "US").with_item("TSHIRT", 20.0, 2),
        Order::new("R1002", "US").with_item("POSTER", 150.0, 1),
        Order::new("R1003", "CA").with_item("MUG", 9.5, 4),
    ];

    let mut handles = Vec::new();
    for order in orders {
        let config = Arc::clone(&config);
        let catalog = Arc::clone(&catalog);
        let span = tracing::info_span!("quote", order = %order.number);
        handles.push(tokio::spawn(
            async move {
                let rates = checkout::quote_shipping(&config, &catalog, &order);
                let tax = checkout::compute_tax(&config, &catalog, &order);
                (order, rates, tax)
            }
            .instrument(span),
        ));
    }

    for handle in handles {
        match handle.await {
            Ok((order, rates, tax)) => {
                for rate in &rates {
                    info!(
                        order = %order.number,
                        calculator = rate.calculator.short_name(),
                        cost = rate.cost,
                        selected = rate.selected,
                        "{}",
                        rate.description
                    );
                }
                info!(order = %order.number, item_total = order.item_total(), tax, "Quoted");
            }
            Err(e) => error!(error = %e, "Quote task failed"),
        }
    }

    info!("Application completed successfully");
    Ok(())
}
