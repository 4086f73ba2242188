//! # Engine Boot
//!
//! The [`Engine`] builds the [`AppConfiguration`] by running named initializers, then
//! freezes it behind an `Arc`.
//!
//! ## Phases
//!
//! Initializers run in two phases, each in registration order:
//!
//! 1. [`Phase::Core`] - the engine's own initializers. They prepare the preference
//!    environment, seed default registrations and the parameter filter.
//! 2. [`Phase::Application`] - everything registered through [`Engine::initializer`]:
//!    plugins and the host application. Because they run second, they can rely on the
//!    defaults being present and remove or reorder them.
//!
//! ```rust
//! use storefront_app::config::AppConfiguration;
//! use storefront_app::engine::Engine;
//! use storefront_core::ClassRef;
//!
//! let mut engine = Engine::new();
//! engine
//!     .initializer("acme.register.payment_methods", |config| {
//!         config
//!             .environment_mut()
//!             .payment_methods_mut()
//!             .add(ClassRef::named("acme::payment::Invoice"));
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let config = engine.boot(AppConfiguration::new()).unwrap();
//! let methods = config.environment().payment_methods();
//! assert_eq!(methods.iter().last(), Some(&ClassRef::named("acme::payment::Invoice")));
//! ```
//!
//! ## Overrides
//!
//! [`Engine::with_env_overrides`] makes `STOREFRONT_*` variables win over everything
//! the initializers set, including a configuration file: they are applied once all
//! initializers have run.
//!
//! ## After Boot
//!
//! [`Engine::boot`] returns `Arc<AppConfiguration>`. Nothing can mutate the environment
//! through it, which is what makes sharing it across request handlers safe without
//! locks.

use crate::calculators::{shipping, tax};
use crate::config::{self, AppConfiguration, ConfigFile};
use crate::error::{BootError, BoxError};
use crate::param_filter::DEFAULT_FILTER_PARAMETERS;
use std::fmt;
use std::sync::Arc;
use storefront_core::{ClassRef, Environment};
use tracing::{debug, info, info_span, warn};

/// When an initializer runs relative to the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Core,
    Application,
}

type InitializerFn = Box<dyn FnOnce(&mut AppConfiguration) -> Result<(), BoxError>>;
type CoreInitializer = fn(&mut AppConfiguration) -> Result<(), BoxError>;
type OverrideSource = Box<dyn Fn(&str) -> Option<String>>;

struct Initializer {
    name: String,
    phase: Phase,
    run: InitializerFn,
}

const CORE_INITIALIZERS: &[(&str, CoreInitializer)] = &[
    ("storefront.environment", prepare_environment),
    ("storefront.register.calculators", register_calculators),
    ("storefront.register.stock_splitters", register_stock_splitters),
    ("storefront.register.payment_methods", register_payment_methods),
    (
        "storefront.promo.register.promotion.calculators",
        register_promotion_calculators,
    ),
    ("storefront.promo.register.promotion.rules", register_promotion_rules),
    ("storefront.promo.register.promotions.actions", register_promotion_actions),
    (
        "storefront.promo.register.promotions.shipping_actions",
        register_promotion_shipping_actions,
    ),
    ("storefront.params.filter", register_param_filter),
];

/// Runs initializers against a fresh configuration.
pub struct Engine {
    initializers: Vec<Initializer>,
    overrides: Option<OverrideSource>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("initializers", &self.initializer_names())
            .field("overrides", &self.overrides.is_some())
            .finish()
    }
}

impl Engine {
    /// An engine with the core initializers registered.
    pub fn new() -> Self {
        let initializers = CORE_INITIALIZERS
            .iter()
            .map(|&(name, run)| Initializer {
                name: name.to_string(),
                phase: Phase::Core,
                run: Box::new(run),
            })
            .collect();
        Self {
            initializers,
            overrides: None,
        }
    }

    /// An engine with no initializers at all. Boot leaves every set empty.
    pub fn bare() -> Self {
        Self {
            initializers: Vec::new(),
            overrides: None,
        }
    }

    /// Registers an application-phase initializer.
    ///
    /// Names must be unique across both phases.
    pub fn initializer<F>(&mut self, name: impl Into<String>, run: F) -> Result<&mut Self, BootError>
    where
        F: FnOnce(&mut AppConfiguration) -> Result<(), BoxError> + 'static,
    {
        let name = name.into();
        if self.initializers.iter().any(|existing| existing.name == name) {
            return Err(BootError::DuplicateInitializer(name));
        }
        debug!(initializer = %name, "Initializer registered");
        self.initializers.push(Initializer {
            name,
            phase: Phase::Application,
            run: Box::new(run),
        });
        Ok(self)
    }

    /// Registers `storefront.config_file`, which applies `file`'s scalar preferences
    /// and registrations.
    pub fn with_config_file(&mut self, file: ConfigFile) -> Result<&mut Self, BootError> {
        self.initializer("storefront.config_file", move |config| {
            file.apply_scalars(config);
            file.apply_registrations(config.environment_mut())?;
            Ok(())
        })
    }

    /// Applies `STOREFRONT_*` environment variables after every initializer.
    pub fn with_env_overrides(&mut self) -> &mut Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Like [`with_env_overrides`](Self::with_env_overrides), reading variables from `lookup`.
    pub fn with_overrides<F>(&mut self, lookup: F) -> &mut Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        self.overrides = Some(Box::new(lookup));
        self
    }

    /// Initializer names in the order [`boot`](Self::boot) will run them.
    pub fn initializer_names(&self) -> Vec<&str> {
        let mut ordered: Vec<&Initializer> = self.initializers.iter().collect();
        ordered.sort_by_key(|initializer| initializer.phase);
        ordered
            .into_iter()
            .map(|initializer| initializer.name.as_str())
            .collect()
    }

    /// Runs every initializer, compiles the parameter filter and freezes the result.
    pub fn boot(self, mut config: AppConfiguration) -> Result<Arc<AppConfiguration>, BootError> {
        let Engine {
            mut initializers,
            overrides,
        } = self;
        initializers.sort_by_key(|initializer| initializer.phase);
        info!(initializers = initializers.len(), "Booting storefront");

        for Initializer { name, phase, run } in initializers {
            let span = info_span!("initializer", name = %name, ?phase);
            let _enter = span.enter();
            debug!("Running");
            if let Err(source) = run(&mut config) {
                warn!(error = %source, "Initializer failed");
                return Err(BootError::Initializer { name, source });
            }
        }

        if let Some(lookup) = overrides {
            debug!("Applying overrides");
            config::apply_overrides(&mut config, lookup);
        }

        config.compile_param_filter()?;

        let environment = config.environment();
        info!(
            payment_methods = environment.payment_methods().len(),
            stock_splitters = environment.stock_splitters().len(),
            shipping_calculators = environment.calculators().shipping_methods().len(),
            promotion_rules = environment.promotions().rules().len(),
            "Storefront booted"
        );
        Ok(Arc::new(config))
    }
}

// =============================================================================
// Core initializers
// =============================================================================

const STOCK_SPLITTERS: &[&str] = &[
    "stock::splitter::ShippingCategory",
    "stock::splitter::Backordered",
];

const PAYMENT_METHODS: &[&str] = &[
    "payment_method::BogusCreditCard",
    "payment_method::SimpleBogusCreditCard",
    "payment_method::StoreCredit",
    "payment_method::Check",
];

const CREATE_ADJUSTMENT_CALCULATORS: &[&str] = &[
    "calculator::FlatPercentItemTotal",
    "calculator::FlatRate",
    "calculator::FlexiRate",
    "calculator::TieredPercent",
    "calculator::TieredFlatRate",
];

const CREATE_ITEM_ADJUSTMENT_CALCULATORS: &[&str] = &[
    "calculator::DistributedAmount",
    "calculator::FlatRate",
    "calculator::FlexiRate",
    "calculator::PercentOnLineItem",
    "calculator::TieredPercent",
];

const CREATE_QUANTITY_ADJUSTMENT_CALCULATORS: &[&str] =
    &["calculator::PercentOnLineItem", "calculator::FlatRate"];

const PROMOTION_RULES: &[&str] = &[
    "promotion::rule::ItemTotal",
    "promotion::rule::Product",
    "promotion::rule::User",
    "promotion::rule::FirstOrder",
    "promotion::rule::UserLoggedIn",
    "promotion::rule::OneUsePerUser",
    "promotion::rule::Taxon",
    "promotion::rule::MinimumQuantity",
    "promotion::rule::NthOrder",
    "promotion::rule::OptionValue",
    "promotion::rule::FirstRepeatPurchaseSince",
    "promotion::rule::UserRole",
    "promotion::rule::Store",
];

const PROMOTION_ACTIONS: &[&str] = &[
    "promotion::action::CreateAdjustment",
    "promotion::action::CreateItemAdjustments",
    "promotion::action::CreateQuantityAdjustments",
    "promotion::action::FreeShipping",
];

const PROMOTION_SHIPPING_ACTIONS: &[&str] = &["promotion::action::FreeShipping"];

fn named(names: &'static [&'static str]) -> impl Iterator<Item = ClassRef> {
    names.iter().copied().map(ClassRef::named)
}

/// Creates every set up front so the namespace tree is complete before plugins run.
fn prepare_environment(config: &mut AppConfiguration) -> Result<(), BoxError> {
    let environment = config.environment_mut();
    for path in Environment::set_names() {
        environment.set_mut(&path)?;
    }
    Ok(())
}

fn register_calculators(config: &mut AppConfiguration) -> Result<(), BoxError> {
    let calculators = config.environment_mut().calculators_mut();
    calculators.shipping_methods_mut().extend([
        ClassRef::of::<shipping::FlatPercentItemTotal>(),
        ClassRef::of::<shipping::FlatRate>(),
        ClassRef::of::<shipping::PerItem>(),
        ClassRef::of::<shipping::PriceSack>(),
    ]);
    calculators
        .tax_rates_mut()
        .add(ClassRef::of::<tax::DefaultTax>());
    Ok(())
}

fn register_stock_splitters(config: &mut AppConfiguration) -> Result<(), BoxError> {
    config
        .environment_mut()
        .stock_splitters_mut()
        .extend(named(STOCK_SPLITTERS));
    Ok(())
}

fn register_payment_methods(config: &mut AppConfiguration) -> Result<(), BoxError> {
    config
        .environment_mut()
        .payment_methods_mut()
        .extend(named(PAYMENT_METHODS));
    Ok(())
}

fn register_promotion_calculators(config: &mut AppConfiguration) -> Result<(), BoxError> {
    let calculators = config.environment_mut().calculators_mut();
    calculators
        .promotion_actions_create_adjustments_mut()
        .extend(named(CREATE_ADJUSTMENT_CALCULATORS));
    calculators
        .promotion_actions_create_item_adjustments_mut()
        .extend(named(CREATE_ITEM_ADJUSTMENT_CALCULATORS));
    calculators
        .promotion_actions_create_quantity_adjustments_mut()
        .extend(named(CREATE_QUANTITY_ADJUSTMENT_CALCULATORS));
    Ok(())
}

fn register_promotion_rules(config: &mut AppConfiguration) -> Result<(), BoxError> {
    config
        .environment_mut()
        .promotions_mut()
        .rules_mut()
        .extend(named(PROMOTION_RULES));
    Ok(())
}

fn register_promotion_actions(config: &mut AppConfiguration) -> Result<(), BoxError> {
    config
        .environment_mut()
        .promotions_mut()
        .actions_mut()
        .extend(named(PROMOTION_ACTIONS));
    Ok(())
}

fn register_promotion_shipping_actions(config: &mut AppConfiguration) -> Result<(), BoxError> {
    config
        .environment_mut()
        .promotions_mut()
        .shipping_actions_mut()
        .extend(named(PROMOTION_SHIPPING_ACTIONS));
    Ok(())
}

fn register_param_filter(config: &mut AppConfiguration) -> Result<(), BoxError> {
    for pattern in DEFAULT_FILTER_PARAMETERS {
        if !config.filter_parameters.iter().any(|existing| existing.as_str() == *pattern) {
            config.filter_parameters.push(pattern.to_string());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_initializers_precede_application_ones() {
        let mut engine = Engine::new();
        engine.initializer("acme.first", |_| Ok(())).unwrap();

        let names = engine.initializer_names();
        assert_eq!(names.first(), Some(&"storefront.environment"));
        assert_eq!(names.last(), Some(&"acme.first"));
        assert_eq!(names.len(), CORE_INITIALIZERS.len() + 1);
    }

    #[test]
    fn test_core_names_cannot_be_reused() {
        let mut engine = Engine::new();
        let err = engine
            .initializer("storefront.params.filter", |_| Ok(()))
            .unwrap_err();
        assert!(matches!(err, BootError::DuplicateInitializer(name) if name == "storefront.params.filter"));
    }

    #[test]
    fn test_bare_engine_leaves_sets_empty() {
        let config = Engine::bare().boot(AppConfiguration::new()).unwrap();
        assert!(config.environment().payment_methods().is_empty());
        assert!(config.filter_parameters.is_empty());
    }

    #[test]
    fn test_overrides_apply_after_application_initializers() {
        let mut engine = Engine::new();
        engine
            .initializer("acme.layout", |config| {
                config.layout = "acme/layout".to_string();
                config.migration_path = "acme/migrate".into();
                Ok(())
            })
            .unwrap()
            .with_overrides(|key| (key == "STOREFRONT_LAYOUT").then(|| "env/layout".to_string()));

        let config = engine.boot(AppConfiguration::new()).unwrap();
        assert_eq!(config.layout, "env/layout");
        assert_eq!(config.migration_path, std::path::PathBuf::from("acme/migrate"));
    }

    #[test]
    fn test_param_filter_seeding_is_idempotent() {
        let mut config = AppConfiguration::new();
        register_param_filter(&mut config).unwrap();
        register_param_filter(&mut config).unwrap();
        assert_eq!(config.filter_parameters.len(), DEFAULT_FILTER_PARAMETERS.len());
    }
}
