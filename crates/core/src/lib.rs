//! Delights Core - Shared types library.
//!
//! This crate provides common types used across all Shoppe Delights
//! components:
//! - `flow` - Cart, navigation, and checkout state machine
//! - `cli` - Terminal front-end driving the flow
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no timers, no async. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices, plus the
//!   restaurant/menu catalog types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
