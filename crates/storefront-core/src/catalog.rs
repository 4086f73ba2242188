//! # Catalog: From Registration to Instance
//!
//! A [`PreferenceSet`] only records *which* implementations are enabled. Consumers need
//! live objects behind a trait (`dyn Calculator`, `dyn StockSplitter`, ...). A
//! [`Catalog`] maps each [`ClassRef`] to a factory and resolves a whole set at once,
//! keeping the set's order.
//!
//! ```rust
//! use storefront_core::{Catalog, ClassRef, PreferenceSet};
//!
//! trait Greeter { fn greet(&self) -> String; }
//!
//! #[derive(Default)] struct English;
//! impl Greeter for English { fn greet(&self) -> String { "hello".into() } }
//!
//! fn english() -> Box<dyn Greeter> { Box::new(English) }
//!
//! let mut catalog: Catalog<dyn Greeter> = Catalog::new();
//! catalog.provide(ClassRef::of::<English>(), english);
//!
//! let set = PreferenceSet::with_items("greeters", [ClassRef::of::<English>()]);
//! let greeters = catalog.resolve(&set);
//! assert_eq!(greeters[0].instance.greet(), "hello");
//! ```
//!
//! Registered members without a factory are skipped with a warning rather than
//! failing the whole resolution: a plugin may register a name whose implementation
//! this process does not link.

use crate::class_ref::ClassRef;
use crate::preference_set::PreferenceSet;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

type Factory<C> = Box<dyn Fn() -> Box<C> + Send + Sync>;

/// One resolved member of a preference set.
pub struct Resolved<C: ?Sized> {
    pub class: ClassRef,
    pub instance: Box<C>,
}

impl<C: ?Sized> fmt::Debug for Resolved<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}

/// Factories for the implementations of one capability `C`.
pub struct Catalog<C: ?Sized> {
    factories: HashMap<ClassRef, Factory<C>>,
}

impl<C: ?Sized> Default for Catalog<C> {
    fn default() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }
}

impl<C: ?Sized> fmt::Debug for Catalog<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut classes: Vec<&ClassRef> = self.factories.keys().collect();
        classes.sort();
        f.debug_struct("Catalog").field("classes", &classes).finish()
    }
}

impl<C: ?Sized> Catalog<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the factory for `class`, replacing any previous one.
    pub fn provide<F>(&mut self, class: ClassRef, factory: F) -> &mut Self
    where
        F: Fn() -> Box<C> + Send + Sync + 'static,
    {
        debug!(%class, "Factory provided");
        self.factories.insert(class, Box::new(factory));
        self
    }

    pub fn knows(&self, class: &ClassRef) -> bool {
        self.factories.contains_key(class)
    }

    /// Builds a fresh instance of `class`, if a factory is known.
    pub fn build(&self, class: &ClassRef) -> Option<Box<C>> {
        self.factories.get(class).map(|factory| factory())
    }

    /// Builds every member of `set` that has a factory, in set order.
    pub fn resolve(&self, set: &PreferenceSet) -> Vec<Resolved<C>> {
        set.iter()
            .filter_map(|class| match self.build(class) {
                Some(instance) => Some(Resolved {
                    class: class.clone(),
                    instance,
                }),
                None => {
                    warn!(set = set.name(), %class, "No factory for registered class, skipping");
                    None
                }
            })
            .collect()
    }
}
