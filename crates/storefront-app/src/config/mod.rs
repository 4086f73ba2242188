//! # Application Configuration
//!
//! [`AppConfiguration`] is the storefront's configuration root. There is exactly one per
//! process, but it is *not* a global: [`Engine::boot`](crate::engine::Engine::boot)
//! builds it once and hands back an `Arc` that callers pass to whoever needs it.
//!
//! It carries the preference [`Environment`] plus a handful of scalar preferences:
//!
//! | Preference | Default |
//! |------------|---------|
//! | `layout` | `storefront/layouts/storefront_application` |
//! | `searcher_class` | `search::Base` |
//! | `variant_search_class` | `search::Variant` |
//! | `variant_price_selector_class` | `variant::PriceSelector` |
//! | `promotion_adjuster_class` | `promotion::OrderAdjustmentsRecalculator` |
//! | `default_country_iso` | `US` |
//! | `admin_vat_country_iso` | none |
//! | `migration_path` | `db/migrate` |
//! | `events.adapter` | `event::adapters::ActiveSupportNotifications` |
//!
//! ## Deprecated Preferences
//!
//! `mails_from`, `extra_taxon_validations` and `extra_taxonomy_validations` are still
//! stored so existing callers keep working, but every write logs a warning on the
//! `storefront::deprecation` target.

pub mod loader;

pub use loader::*;

use crate::model::TaxLocation;
use crate::param_filter::ParamFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use storefront_core::{ClassRef, Environment};
use tracing::warn;

const DEPRECATION: &str = "storefront::deprecation";

/// Classes that drive stock allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockConfiguration {
    pub coordinator_class: ClassRef,
    pub estimator_class: ClassRef,
    pub location_filter_class: ClassRef,
    pub location_sorter_class: ClassRef,
}

impl Default for StockConfiguration {
    fn default() -> Self {
        Self {
            coordinator_class: ClassRef::named("stock::SimpleCoordinator"),
            estimator_class: ClassRef::named("stock::Estimator"),
            location_filter_class: ClassRef::named("stock::location_filter::Active"),
            location_sorter_class: ClassRef::named("stock::location_sorter::Unsorted"),
        }
    }
}

/// Event bus settings. Only the adapter class is recorded; nothing subscribes here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsConfiguration {
    pub adapter: ClassRef,
}

impl Default for EventsConfiguration {
    fn default() -> Self {
        Self {
            adapter: ClassRef::named("event::adapters::ActiveSupportNotifications"),
        }
    }
}

/// The configuration root.
#[derive(Debug)]
pub struct AppConfiguration {
    pub layout: String,
    pub searcher_class: ClassRef,
    pub variant_search_class: ClassRef,
    pub variant_price_selector_class: ClassRef,
    pub promotion_adjuster_class: ClassRef,
    pub default_country_iso: String,
    pub admin_vat_country_iso: Option<String>,
    pub migration_path: PathBuf,
    pub stock: StockConfiguration,
    pub events: EventsConfiguration,
    /// Regex sources for sensitive request parameters.
    pub filter_parameters: Vec<String>,
    pricing_options_class: Option<ClassRef>,
    mails_from: Option<String>,
    extra_taxon_validations: bool,
    extra_taxonomy_validations: bool,
    param_filter: ParamFilter,
    environment: Environment,
}

impl Default for AppConfiguration {
    fn default() -> Self {
        Self {
            layout: "storefront/layouts/storefront_application".to_string(),
            searcher_class: ClassRef::named("search::Base"),
            variant_search_class: ClassRef::named("search::Variant"),
            variant_price_selector_class: ClassRef::named("variant::PriceSelector"),
            promotion_adjuster_class: ClassRef::named("promotion::OrderAdjustmentsRecalculator"),
            default_country_iso: "US".to_string(),
            admin_vat_country_iso: None,
            migration_path: PathBuf::from("db/migrate"),
            stock: StockConfiguration::default(),
            events: EventsConfiguration::default(),
            filter_parameters: Vec::new(),
            pricing_options_class: None,
            mails_from: None,
            extra_taxon_validations: true,
            extra_taxonomy_validations: true,
            param_filter: ParamFilter::default(),
            environment: Environment::new(),
        }
    }
}

impl AppConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    /// The pricing options class paired with the variant price selector.
    ///
    /// Unless overridden, this is the `PricingOptions` type living next to the
    /// selector: `variant::PriceSelector` pairs with `variant::PricingOptions`.
    pub fn pricing_options_class(&self) -> ClassRef {
        if let Some(class) = &self.pricing_options_class {
            return class.clone();
        }
        let selector = self.variant_price_selector_class.name();
        match selector.rsplit_once("::") {
            Some((module, _)) => ClassRef::new(format!("{module}::PricingOptions")),
            None => ClassRef::named("PricingOptions"),
        }
    }

    pub fn set_pricing_options_class(&mut self, class: ClassRef) {
        self.pricing_options_class = Some(class);
    }

    /// Location used to compute prices shown in the admin.
    pub fn admin_vat_location(&self) -> TaxLocation {
        TaxLocation::new(self.admin_vat_country_iso.clone(), None)
    }

    /// Filter compiled from [`filter_parameters`](Self::filter_parameters) at boot.
    pub fn param_filter(&self) -> &ParamFilter {
        &self.param_filter
    }

    pub(crate) fn compile_param_filter(&mut self) -> Result<(), regex::Error> {
        self.param_filter = ParamFilter::compile(self.filter_parameters.as_slice())?;
        Ok(())
    }

    pub fn mails_from(&self) -> Option<&str> {
        self.mails_from.as_deref()
    }

    pub fn set_mails_from(&mut self, value: impl Into<String>) {
        warn!(
            target: DEPRECATION,
            "The storefront doesn't use `mails_from`; configure the sender on each store instead"
        );
        self.mails_from = Some(value.into());
    }

    pub fn extra_taxon_validations(&self) -> bool {
        self.extra_taxon_validations
    }

    pub fn set_extra_taxon_validations(&mut self, value: bool) {
        warn!(
            target: DEPRECATION,
            "`extra_taxon_validations` will be removed; taxon validations will always run"
        );
        self.extra_taxon_validations = value;
    }

    pub fn extra_taxonomy_validations(&self) -> bool {
        self.extra_taxonomy_validations
    }

    pub fn set_extra_taxonomy_validations(&mut self, value: bool) {
        warn!(
            target: DEPRECATION,
            "`extra_taxonomy_validations` will be removed; taxonomy validations will always run"
        );
        self.extra_taxonomy_validations = value;
    }
}
