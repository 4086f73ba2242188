use storefront_app::calculators::{shipping, tax};
use storefront_app::config::{AppConfiguration, ConfigFile};
use storefront_app::engine::Engine;
use storefront_app::error::BootError;
use storefront_core::{ClassRef, Environment, EnvironmentError};

struct CalculatorA;
struct CalculatorB;

/// Full boot with only the engine's own initializers.
#[test]
fn test_default_boot_seeds_every_namespace() {
    let config = Engine::new().boot(AppConfiguration::new()).unwrap();
    let env = config.environment();

    assert_eq!(
        env.calculators().shipping_methods().to_sequence(),
        vec![
            ClassRef::of::<shipping::FlatPercentItemTotal>(),
            ClassRef::of::<shipping::FlatRate>(),
            ClassRef::of::<shipping::PerItem>(),
            ClassRef::of::<shipping::PriceSack>(),
        ]
    );
    assert_eq!(
        env.calculators().tax_rates().to_sequence(),
        vec![ClassRef::of::<tax::DefaultTax>()]
    );
    assert_eq!(env.payment_methods().len(), 4);
    assert_eq!(
        env.stock_splitters().to_sequence(),
        vec![
            ClassRef::named("stock::splitter::ShippingCategory"),
            ClassRef::named("stock::splitter::Backordered"),
        ]
    );
    assert!(env
        .promotions()
        .rules()
        .contains(&ClassRef::named("promotion::rule::FirstOrder")));
    assert_eq!(
        env.promotions().shipping_actions().to_sequence(),
        vec![ClassRef::named("promotion::action::FreeShipping")]
    );

    for path in Environment::set_names() {
        assert!(!env.set(&path).unwrap().is_empty(), "{path} was not seeded");
    }
}

/// A plugin registering calculators after the defaults, including a duplicate,
/// then unregistering one of them.
#[test]
fn test_plugin_registration_scenario() {
    let mut engine = Engine::new();
    engine
        .initializer("plugin.register", |config| {
            let set = config.environment_mut().calculators_mut().shipping_methods_mut();
            set.add(ClassRef::of::<CalculatorA>());
            set.add(ClassRef::of::<CalculatorB>());
            set.add(ClassRef::of::<CalculatorA>());
            Ok(())
        })
        .unwrap()
        .initializer("plugin.cleanup", |config| {
            config
                .environment_mut()
                .unregister("calculators.shipping_methods", &ClassRef::of::<CalculatorB>())?;
            Ok(())
        })
        .unwrap();

    let config = engine.boot(AppConfiguration::new()).unwrap();
    let sequence = config.environment().calculators().shipping_methods().to_sequence();

    assert_eq!(sequence.len(), 5);
    assert_eq!(sequence.last(), Some(&ClassRef::of::<CalculatorA>()));
    assert!(!sequence.contains(&ClassRef::of::<CalculatorB>()));
}

#[test]
fn test_application_initializers_see_core_defaults() {
    let mut engine = Engine::new();
    engine
        .initializer("app.drop_price_sack", |config| {
            let removed = config
                .environment_mut()
                .calculators_mut()
                .shipping_methods_mut()
                .remove(&ClassRef::of::<shipping::PriceSack>());
            assert!(removed, "core defaults must be registered first");
            Ok(())
        })
        .unwrap();

    let config = engine.boot(AppConfiguration::new()).unwrap();
    assert!(!config
        .environment()
        .calculators()
        .shipping_methods()
        .contains(&ClassRef::of::<shipping::PriceSack>()));
}

#[test]
fn test_duplicate_application_initializer_is_rejected() {
    let mut engine = Engine::bare();
    engine.initializer("app.once", |_| Ok(())).unwrap();

    let err = engine.initializer("app.once", |_| Ok(())).unwrap_err();
    assert_eq!(err.to_string(), "Initializer registered twice: app.once");
}

#[test]
fn test_failing_initializer_aborts_boot() {
    let mut engine = Engine::new();
    engine
        .initializer("app.broken", |config| {
            config.environment_mut().register("gift_cards", ClassRef::named("acme::GiftCard"))?;
            Ok(())
        })
        .unwrap();

    match engine.boot(AppConfiguration::new()) {
        Err(BootError::Initializer { name, source }) => {
            assert_eq!(name, "app.broken");
            assert_eq!(
                source.downcast_ref::<EnvironmentError>(),
                Some(&EnvironmentError::UnknownSet {
                    path: "gift_cards".to_string()
                })
            );
        }
        other => panic!("expected initializer failure, got {other:?}"),
    }
}

#[test]
fn test_config_file_applies_after_defaults() {
    let file = ConfigFile::parse(
        r#"
layout = "my/layout"

[[registrations]]
set = "calculators.shipping_methods"
remove = ["storefront_app::calculators::shipping::FlatRate"]
add = ["acme::calculator::ZoneRate"]

[[registrations]]
set = "promotions.rules"
remove = ["promotion::rule::Store"]
"#,
    )
    .unwrap();

    let mut engine = Engine::new();
    engine.with_config_file(file).unwrap();
    let config = engine.boot(AppConfiguration::new()).unwrap();

    assert_eq!(config.layout, "my/layout");
    let methods = config.environment().calculators().shipping_methods();
    assert!(!methods.contains(&ClassRef::of::<shipping::FlatRate>()));
    assert_eq!(
        methods.iter().last(),
        Some(&ClassRef::named("acme::calculator::ZoneRate"))
    );
    assert!(!config
        .environment()
        .promotions()
        .rules()
        .contains(&ClassRef::named("promotion::rule::Store")));
}

#[test]
fn test_env_overrides_win_over_config_file() {
    let file = ConfigFile::parse(
        r#"
layout = "file/layout"
default_country_iso = "CA"
"#,
    )
    .unwrap();
    let mut engine = Engine::new();
    engine
        .with_overrides(|key| match key {
            "STOREFRONT_LAYOUT" => Some("env/layout".to_string()),
            _ => None,
        })
        .with_config_file(file)
        .unwrap();

    let config = engine.boot(AppConfiguration::new()).unwrap();

    assert_eq!(config.layout, "env/layout");
    assert_eq!(config.default_country_iso, "CA");
}

#[test]
fn test_config_file_with_unknown_set_fails_boot() {
    let file = ConfigFile::parse(
        r#"
[[registrations]]
set = "calculators.gift_wrap"
add = ["acme::calculator::Bow"]
"#,
    )
    .unwrap();

    let mut engine = Engine::new();
    engine.with_config_file(file).unwrap();
    let err = engine.boot(AppConfiguration::new()).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Initializer storefront.config_file failed: Unknown preference set: calculators.gift_wrap"
    );
}

#[test]
fn test_boot_compiles_param_filter() {
    let mut engine = Engine::new();
    engine
        .initializer("app.filters", |config| {
            config.filter_parameters.push("^api_key$".to_string());
            Ok(())
        })
        .unwrap();

    let config = engine.boot(AppConfiguration::new()).unwrap();
    let filter = config.param_filter();

    assert!(filter.is_filtered("password"));
    assert!(filter.is_filtered("order.payments_attributes.0.source_attributes.verification_value"));
    assert!(filter.is_filtered("api_key"));
    assert!(!filter.is_filtered("email"));
}

#[test]
fn test_invalid_filter_pattern_fails_boot() {
    let mut engine = Engine::new();
    engine
        .initializer("app.bad_filter", |config| {
            config.filter_parameters.push("(unclosed".to_string());
            Ok(())
        })
        .unwrap();

    let err = engine.boot(AppConfiguration::new()).unwrap_err();
    assert!(matches!(err, BootError::InvalidFilter(_)));
}
