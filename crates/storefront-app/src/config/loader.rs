//! Configuration file loading and environment overrides.
//!
//! A `storefront.toml` file overrides scalar preferences and adds or removes
//! registrations from the preference environment:
//!
//! ```toml
//! layout = "my/layout"
//! default_country_iso = "CA"
//!
//! [[registrations]]
//! set = "calculators.shipping_methods"
//! add = ["acme::calculator::ZoneRate"]
//! remove = ["storefront_app::calculators::shipping::PriceSack"]
//! ```
//!
//! Registrations are applied by an application-phase initializer, i.e. after the
//! engine has seeded its defaults (see [`Engine::with_config_file`](crate::engine::Engine::with_config_file)).
//!
//! `STOREFRONT_*` environment variables take precedence over the file. The engine
//! applies them after every initializer (see
//! [`Engine::with_env_overrides`](crate::engine::Engine::with_env_overrides)).

use super::{AppConfiguration, EventsConfiguration, StockConfiguration};
use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use storefront_core::{ClassRef, Environment, EnvironmentError};
use tracing::{debug, info};

/// Registration changes for one preference set. Removals are applied before additions,
/// so listing a class in both moves it to the end of the set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Registration {
    pub set: String,
    pub add: Vec<ClassRef>,
    pub remove: Vec<ClassRef>,
}

/// The contents of a configuration file. Every key is optional; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub layout: Option<String>,
    pub default_country_iso: Option<String>,
    pub admin_vat_country_iso: Option<String>,
    pub migration_path: Option<PathBuf>,
    pub searcher_class: Option<ClassRef>,
    pub variant_search_class: Option<ClassRef>,
    pub variant_price_selector_class: Option<ClassRef>,
    pub pricing_options_class: Option<ClassRef>,
    pub promotion_adjuster_class: Option<ClassRef>,
    pub stock: Option<StockConfiguration>,
    pub events: Option<EventsConfiguration>,
    /// Appended to the engine's default filter patterns.
    pub filter_parameters: Vec<String>,
    pub registrations: Vec<Registration>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), registrations = file.registrations.len(), "Configuration loaded");
        Ok(file)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Copies every scalar preference present in the file onto `config`.
    pub fn apply_scalars(&self, config: &mut AppConfiguration) {
        if let Some(layout) = &self.layout {
            config.layout = layout.clone();
        }
        if let Some(iso) = &self.default_country_iso {
            config.default_country_iso = iso.clone();
        }
        if let Some(iso) = &self.admin_vat_country_iso {
            config.admin_vat_country_iso = Some(iso.clone());
        }
        if let Some(path) = &self.migration_path {
            config.migration_path = path.clone();
        }
        if let Some(class) = &self.searcher_class {
            config.searcher_class = class.clone();
        }
        if let Some(class) = &self.variant_search_class {
            config.variant_search_class = class.clone();
        }
        if let Some(class) = &self.variant_price_selector_class {
            config.variant_price_selector_class = class.clone();
        }
        if let Some(class) = &self.pricing_options_class {
            config.set_pricing_options_class(class.clone());
        }
        if let Some(class) = &self.promotion_adjuster_class {
            config.promotion_adjuster_class = class.clone();
        }
        if let Some(stock) = &self.stock {
            config.stock = stock.clone();
        }
        if let Some(events) = &self.events {
            config.events = events.clone();
        }
        for pattern in &self.filter_parameters {
            if !config.filter_parameters.contains(pattern) {
                config.filter_parameters.push(pattern.clone());
            }
        }
    }

    /// Applies every [`Registration`] in file order.
    pub fn apply_registrations(&self, environment: &mut Environment) -> Result<(), EnvironmentError> {
        for registration in &self.registrations {
            let set = environment.set_mut(&registration.set)?;
            for class in &registration.remove {
                set.remove(class);
            }
            for class in &registration.add {
                set.add(class.clone());
            }
            debug!(
                set = %registration.set,
                added = registration.add.len(),
                removed = registration.remove.len(),
                "Registrations applied"
            );
        }
        Ok(())
    }
}

/// Apply `STOREFRONT_*` overrides read through `lookup`.
pub fn apply_overrides(config: &mut AppConfiguration, lookup: impl Fn(&str) -> Option<String>) {
    // STOREFRONT_LAYOUT
    if let Some(layout) = lookup("STOREFRONT_LAYOUT") {
        config.layout = layout;
    }

    // STOREFRONT_DEFAULT_COUNTRY_ISO
    if let Some(iso) = lookup("STOREFRONT_DEFAULT_COUNTRY_ISO") {
        let iso = iso.trim().to_uppercase();
        if !iso.is_empty() {
            config.default_country_iso = iso;
        }
    }

    // STOREFRONT_MIGRATION_PATH
    if let Some(path) = lookup("STOREFRONT_MIGRATION_PATH") {
        config.migration_path = PathBuf::from(path);
    }
}
