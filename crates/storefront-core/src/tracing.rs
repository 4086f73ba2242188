//! # Tracing Setup
//!
//! Registry mutations are logged at `debug` level with the qualified set name, so
//! `RUST_LOG=storefront_core=debug` shows every registration made during boot:
//!
//! ```text
//! DEBUG storefront_core::preference_set: Registered set="calculators.shipping_methods" item=ClassRef("storefront_app::calculators::shipping::FlatRate") size=1
//! ```

/// Initializes the tracing/logging infrastructure for the application.
///
/// Verbosity is controlled by the `RUST_LOG` environment variable:
/// - `RUST_LOG=info` - Boot progress and initializer names
/// - `RUST_LOG=debug` - Every registration and removal
/// - `RUST_LOG=storefront_core=debug` - Registry detail only
///
/// Call once, at the start of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
