//! # The Preference Environment
//!
//! The [`Environment`] groups every [`PreferenceSet`] the storefront knows about into
//! a fixed tree of namespaces:
//!
//! ```text
//! payment_methods
//! stock_splitters
//! calculators.shipping_methods
//! calculators.tax_rates
//! calculators.promotion_actions_create_adjustments
//! calculators.promotion_actions_create_item_adjustments
//! calculators.promotion_actions_create_quantity_adjustments
//! promotions.rules
//! promotions.actions
//! promotions.shipping_actions
//! ```
//!
//! The *structure* is fixed at compile time; only set *contents* vary.
//!
//! ## Memoization
//!
//! Every set (and every namespace) is created on first access and then kept for the
//! lifetime of the environment. Two accesses to the same name always reach the same
//! collection, so registrations made by one plugin are visible to everyone else:
//!
//! ```rust
//! use storefront_core::{ClassRef, Environment};
//!
//! let mut env = Environment::new();
//! env.set_mut("promotions.rules")
//!     .unwrap()
//!     .add(ClassRef::named("promotion::rule::FirstOrder"));
//!
//! assert_eq!(env.promotions().rules().len(), 1);
//! ```
//!
//! ## Named Access
//!
//! Typed accessors (`calculators().tax_rates()`) are the normal way in. Code driven by
//! configuration can address sets by dotted path with [`Environment::set`] and
//! [`Environment::set_mut`]; an undefined path yields
//! [`EnvironmentError::UnknownSet`].

use crate::class_ref::ClassRef;
use crate::error::EnvironmentError;
use crate::preference_set::PreferenceSet;
use std::sync::OnceLock;
use tracing::debug;

/// A value built on first access and memoized afterwards.
#[derive(Debug)]
struct Memoized<T>(OnceLock<T>);

impl<T> Default for Memoized<T> {
    fn default() -> Self {
        Self(OnceLock::new())
    }
}

impl<T> Memoized<T> {
    fn get_or_init(&self, init: impl FnOnce() -> T) -> &T {
        self.0.get_or_init(init)
    }

    fn get_mut_or_init(&mut self, init: impl FnOnce() -> T) -> &mut T {
        if self.0.get().is_none() {
            self.0 = OnceLock::from(init());
        }
        self.0.get_mut().unwrap_or_else(|| unreachable!())
    }
}

fn create_set(name: &'static str) -> PreferenceSet {
    debug!(set = name, "Preference set created");
    PreferenceSet::new(name)
}

/// Declares a namespace struct holding a fixed list of memoized preference sets.
///
/// For each `field` the macro generates `field(&self)`, `field_mut(&mut self)` and an
/// arm in the by-name lookup used by [`Environment::set`].
macro_rules! preference_namespace {
    (
        $(#[$meta:meta])*
        pub struct $ns:ident in $prefix:literal {
            $( $(#[$field_meta:meta])* $field:ident, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $ns {
            $( $field: Memoized<PreferenceSet>, )+
        }

        impl $ns {
            /// Set names in this namespace, without the namespace prefix.
            pub const SET_NAMES: &'static [&'static str] = &[$(stringify!($field)),+];

            $(
                $(#[$field_meta])*
                pub fn $field(&self) -> &PreferenceSet {
                    self.$field
                        .get_or_init(|| create_set(concat!($prefix, stringify!($field))))
                }

                paste::paste! {
                    /// Mutable access to the same memoized set.
                    pub fn [<$field _mut>](&mut self) -> &mut PreferenceSet {
                        self.$field
                            .get_mut_or_init(|| create_set(concat!($prefix, stringify!($field))))
                    }
                }
            )+

            fn lookup(&self, name: &str) -> Option<&PreferenceSet> {
                match name {
                    $( stringify!($field) => Some(self.$field()), )+
                    _ => None,
                }
            }

            fn lookup_mut(&mut self, name: &str) -> Option<&mut PreferenceSet> {
                match name {
                    $( stringify!($field) => Some(paste::paste! { self.[<$field _mut>]() }), )+
                    _ => None,
                }
            }
        }
    };
}

preference_namespace! {
    /// Calculators grouped by the purpose they are offered for.
    pub struct Calculators in "calculators." {
        /// Calculators selectable on a shipping method.
        shipping_methods,
        /// Calculators selectable on a tax rate.
        tax_rates,
        /// Calculators for the order-level "create adjustment" promotion action.
        promotion_actions_create_adjustments,
        /// Calculators for the "create item adjustments" promotion action.
        promotion_actions_create_item_adjustments,
        /// Calculators for the "create quantity adjustments" promotion action.
        promotion_actions_create_quantity_adjustments,
    }
}

preference_namespace! {
    /// Promotion building blocks.
    pub struct Promotions in "promotions." {
        /// Eligibility rules.
        rules,
        /// Actions applied to eligible orders.
        actions,
        /// Actions that affect shipping.
        shipping_actions,
    }
}

/// Fixed collection of named preference sets grouped by feature area.
#[derive(Debug, Default)]
pub struct Environment {
    payment_methods: Memoized<PreferenceSet>,
    stock_splitters: Memoized<PreferenceSet>,
    calculators: Memoized<Calculators>,
    promotions: Memoized<Promotions>,
}

impl Environment {
    const TOP_LEVEL_SETS: &'static [&'static str] = &["payment_methods", "stock_splitters"];

    pub fn new() -> Self {
        Self::default()
    }

    /// Payment method implementations offered to the store.
    pub fn payment_methods(&self) -> &PreferenceSet {
        self.payment_methods
            .get_or_init(|| create_set("payment_methods"))
    }

    pub fn payment_methods_mut(&mut self) -> &mut PreferenceSet {
        self.payment_methods
            .get_mut_or_init(|| create_set("payment_methods"))
    }

    /// Splitters applied, in order, when packaging an order's stock.
    pub fn stock_splitters(&self) -> &PreferenceSet {
        self.stock_splitters
            .get_or_init(|| create_set("stock_splitters"))
    }

    pub fn stock_splitters_mut(&mut self) -> &mut PreferenceSet {
        self.stock_splitters
            .get_mut_or_init(|| create_set("stock_splitters"))
    }

    pub fn calculators(&self) -> &Calculators {
        self.calculators.get_or_init(Calculators::default)
    }

    pub fn calculators_mut(&mut self) -> &mut Calculators {
        self.calculators.get_mut_or_init(Calculators::default)
    }

    pub fn promotions(&self) -> &Promotions {
        self.promotions.get_or_init(Promotions::default)
    }

    pub fn promotions_mut(&mut self) -> &mut Promotions {
        self.promotions.get_mut_or_init(Promotions::default)
    }

    /// Every valid dotted path, in declaration order.
    pub fn set_names() -> Vec<String> {
        let top = Self::TOP_LEVEL_SETS.iter().map(|name| name.to_string());
        let calculators = Calculators::SET_NAMES
            .iter()
            .map(|name| format!("calculators.{name}"));
        let promotions = Promotions::SET_NAMES
            .iter()
            .map(|name| format!("promotions.{name}"));
        top.chain(calculators).chain(promotions).collect()
    }

    /// Looks up a set by dotted path, e.g. `calculators.shipping_methods`.
    pub fn set(&self, path: &str) -> Result<&PreferenceSet, EnvironmentError> {
        let found = match path.split_once('.') {
            None => match path {
                "payment_methods" => Some(self.payment_methods()),
                "stock_splitters" => Some(self.stock_splitters()),
                _ => None,
            },
            Some(("calculators", rest)) => self.calculators().lookup(rest),
            Some(("promotions", rest)) => self.promotions().lookup(rest),
            Some(_) => None,
        };
        found.ok_or_else(|| unknown(path))
    }

    /// Mutable counterpart of [`Environment::set`].
    pub fn set_mut(&mut self, path: &str) -> Result<&mut PreferenceSet, EnvironmentError> {
        let found = match path.split_once('.') {
            None => match path {
                "payment_methods" => Some(self.payment_methods_mut()),
                "stock_splitters" => Some(self.stock_splitters_mut()),
                _ => None,
            },
            Some(("calculators", rest)) => self.calculators_mut().lookup_mut(rest),
            Some(("promotions", rest)) => self.promotions_mut().lookup_mut(rest),
            Some(_) => None,
        };
        found.ok_or_else(|| unknown(path))
    }

    /// Adds `class` to the set at `path`. Returns whether the set changed.
    pub fn register(&mut self, path: &str, class: ClassRef) -> Result<bool, EnvironmentError> {
        Ok(self.set_mut(path)?.add(class))
    }

    /// Removes `class` from the set at `path`. Returns whether the set changed.
    pub fn unregister(&mut self, path: &str, class: &ClassRef) -> Result<bool, EnvironmentError> {
        Ok(self.set_mut(path)?.remove(class))
    }
}

fn unknown(path: &str) -> EnvironmentError {
    EnvironmentError::UnknownSet {
        path: path.to_string(),
    }
}
