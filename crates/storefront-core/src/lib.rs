//! # Storefront Core
//!
//! This crate provides the extension registry that the storefront's business logic
//! consults at runtime. Payment methods, stock splitters, calculators and promotion
//! rules/actions are all *pluggable*: the engine registers its defaults, plugins and
//! applications add or remove their own, and checkout code iterates whatever ended up
//! registered.
//!
//! ## Architecture Overview
//!
//! The crate separates concerns into three layers:
//!
//! 1. **Identity Layer** ([`ClassRef`]) - An opaque handle naming one implementation
//! 2. **Registry Layer** ([`PreferenceSet`], [`Environment`]) - Ordered, duplicate-free
//!    sets grouped into a fixed set of namespaces
//! 3. **Resolution Layer** ([`Catalog`]) - Turns a registered set into live instances
//!    behind a trait object
//!
//! ## Core Abstractions
//!
//! ### [`PreferenceSet`] - One Extension Point
//!
//! ```rust
//! use storefront_core::{ClassRef, PreferenceSet};
//!
//! struct CalculatorA;
//! struct CalculatorB;
//!
//! let mut set = PreferenceSet::new("calculators.shipping_methods");
//! set.add(ClassRef::of::<CalculatorA>());
//! set.add(ClassRef::of::<CalculatorB>());
//! set.add(ClassRef::of::<CalculatorA>()); // duplicate, ignored
//!
//! assert_eq!(
//!     set.to_sequence(),
//!     vec![ClassRef::of::<CalculatorA>(), ClassRef::of::<CalculatorB>()]
//! );
//! ```
//!
//! ### [`Environment`] - The Fixed Namespace Tree
//!
//! ```rust
//! use storefront_core::{ClassRef, Environment};
//!
//! let mut env = Environment::new();
//! env.calculators_mut()
//!     .tax_rates_mut()
//!     .add(ClassRef::named("calculator::DefaultTax"));
//!
//! // Same set, reached by its dotted path.
//! let tax_rates = env.set("calculators.tax_rates").unwrap();
//! assert!(tax_rates.contains(&ClassRef::named("calculator::DefaultTax")));
//! ```
//!
//! ## Concurrency Model
//!
//! - Mutation needs `&mut`, so registration happens during single-threaded boot
//! - After boot the environment is only read; it is `Send + Sync` and can be shared
//!   behind an `Arc`
//! - No locks: sets are memoized with `OnceLock`, which only synchronizes first access

pub mod catalog;
pub mod class_ref;
pub mod environment;
pub mod error;
pub mod preference_set;
pub mod tracing;

pub use catalog::{Catalog, Resolved};
pub use class_ref::ClassRef;
pub use environment::{Calculators, Environment, Promotions};
pub use error::EnvironmentError;
pub use preference_set::PreferenceSet;
