use std::sync::Arc;
use storefront_app::calculators::{self, shipping, tax, Calculator};
use storefront_app::checkout::{compute_tax, quote_shipping};
use storefront_app::config::AppConfiguration;
use storefront_app::engine::Engine;
use storefront_app::model::Order;
use storefront_core::ClassRef;

const TWIN_FLAT: ClassRef = ClassRef::named("acme::calculator::TwinFlat");

fn twin_flat() -> Box<dyn Calculator> {
    Box::new(shipping::FlatRate { amount: 10.0 })
}

fn sample_order() -> Order {
    Order::new("R500", "US")
        .with_item("TSHIRT", 20.0, 2)
        .with_item("MUG", 7.5, 1)
}

#[test]
fn test_quote_with_default_registrations() {
    let config = Engine::new().boot(AppConfiguration::new()).unwrap();
    let catalog = calculators::default_catalog();

    let rates = quote_shipping(&config, &catalog, &sample_order());

    let summary: Vec<(&str, f64, bool)> = rates
        .iter()
        .map(|rate| (rate.calculator.short_name(), rate.cost, rate.selected))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("FlatPercentItemTotal", 4.75, true),
            ("PerItem", 6.0, false),
            ("FlatRate", 10.0, false),
            ("PriceSack", 12.0, false),
        ]
    );
}

#[test]
fn test_equal_costs_keep_registration_order() {
    let mut engine = Engine::new();
    engine
        .initializer("acme.twin_flat", |config| {
            config
                .environment_mut()
                .calculators_mut()
                .shipping_methods_mut()
                .add(TWIN_FLAT);
            Ok(())
        })
        .unwrap();
    let config = engine.boot(AppConfiguration::new()).unwrap();
    let mut catalog = calculators::default_catalog();
    catalog.provide(TWIN_FLAT, twin_flat);

    let rates = quote_shipping(&config, &catalog, &sample_order());
    let tied: Vec<&ClassRef> = rates
        .iter()
        .filter(|rate| rate.cost == 10.0)
        .map(|rate| &rate.calculator)
        .collect();

    assert_eq!(tied, vec![&ClassRef::of::<shipping::FlatRate>(), &TWIN_FLAT]);
}

#[test]
fn test_unavailable_and_unbuildable_calculators_are_skipped() {
    let mut engine = Engine::new();
    engine
        .initializer("acme.unlinked", |config| {
            config
                .environment_mut()
                .calculators_mut()
                .shipping_methods_mut()
                .add(ClassRef::named("acme::calculator::NotLinked"));
            Ok(())
        })
        .unwrap();
    let config = engine.boot(AppConfiguration::new()).unwrap();

    // PerItem is unavailable for an order with no units.
    let rates = quote_shipping(&config, &calculators::default_catalog(), &Order::new("R501", "US"));

    assert_eq!(rates.len(), 3);
    assert!(rates
        .iter()
        .all(|rate| !rate.calculator.is::<shipping::PerItem>()));
    assert!(rates
        .iter()
        .all(|rate| rate.calculator != ClassRef::named("acme::calculator::NotLinked")));
}

#[test]
fn test_no_registered_calculators_yields_no_rates() {
    let config = Engine::bare().boot(AppConfiguration::new()).unwrap();
    let rates = quote_shipping(&config, &calculators::default_catalog(), &sample_order());
    assert!(rates.is_empty());
}

#[test]
fn test_tax_applies_by_country() {
    let config = Engine::new().boot(AppConfiguration::new()).unwrap();
    let catalog = calculators::default_catalog();

    let domestic = Order::new("R600", "US").with_item("BOOK", 40.0, 1);
    let foreign = Order::new("R601", "CA").with_item("BOOK", 40.0, 1);

    assert_eq!(compute_tax(&config, &catalog, &domestic), 2.0);
    assert_eq!(compute_tax(&config, &catalog, &foreign), 0.0);
}

#[test]
fn test_removed_tax_calculator_is_not_consulted() {
    let mut engine = Engine::new();
    engine
        .initializer("app.no_tax", |config| {
            config
                .environment_mut()
                .calculators_mut()
                .tax_rates_mut()
                .remove(&ClassRef::of::<tax::DefaultTax>());
            Ok(())
        })
        .unwrap();
    let config = engine.boot(AppConfiguration::new()).unwrap();

    let order = Order::new("R602", "US").with_item("BOOK", 40.0, 1);
    assert_eq!(compute_tax(&config, &calculators::default_catalog(), &order), 0.0);
}

/// The booted configuration is shared read-only across tasks.
#[tokio::test]
async fn test_concurrent_quotes_share_one_configuration() {
    let config = Engine::new().boot(AppConfiguration::new()).unwrap();
    let catalog = Arc::new(calculators::default_catalog());

    let mut handles = Vec::new();
    for n in 1..=8u32 {
        let config = Arc::clone(&config);
        let catalog = Arc::clone(&catalog);
        handles.push(tokio::spawn(async move {
            let order = Order::new(format!("R7{n:02}"), "US").with_item("SOCKS", 5.0, n);
            quote_shipping(&config, &catalog, &order)
        }));
    }

    for handle in handles {
        let rates = handle.await.unwrap();
        assert_eq!(rates.len(), 4);
        assert_eq!(rates.iter().filter(|rate| rate.selected).count(), 1);
    }
}
