//! Core types for Shoppe Delights.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod catalog;
pub mod id;
pub mod order;
pub mod price;

pub use catalog::{MenuItem, Restaurant};
pub use id::*;
pub use order::OrderId;
pub use price::Price;
