//! # Domain Models
//!
//! Plain data consumed by calculators and checkout. Persistence is not handled here.

pub mod order;
pub mod tax_location;

pub use order::*;
pub use tax_location::*;
