//! Delights Flow - the ordering-flow engine.
//!
//! This crate implements the cart/order state machine and navigation
//! controller behind the Shoppe Delights screens: browse → menu → cart →
//! checkout → payment → completion.
//!
//! # Architecture
//!
//! The engine is split in two layers:
//!
//! - [`order::OrderFlow`] is a pure reducer. It owns the cart, the
//!   navigator, the checkout details, and the payment phase, and reacts to
//!   discrete [`order::Event`]s by mutating state and returning
//!   [`order::Effect`]s. It never touches the clock or spawns anything, so
//!   every state transition is unit-testable without a runtime.
//! - [`runtime::SessionHandle`] drives a session on tokio: a single task
//!   owns the `OrderFlow` (one logical writer), executes effects as
//!   abortable timer tasks, and feeds their results back in as events.
//!
//! Views are external collaborators: they render [`order::Snapshot`]s and
//! emit events, nothing more.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod config;
pub mod nav;
pub mod order;
pub mod payment;
pub mod runtime;

pub use cart::{Cart, CartLine, NewCartLine};
pub use checkout::{DeliveryDetails, DeliveryDetailsError, DeliveryDraft};
pub use config::{ConfigError, FlowConfig};
pub use nav::{Navigator, Screen};
pub use order::{Effect, Event, OrderFlow, Snapshot, Totals};
pub use payment::{PaymentMethod, PaymentOutcome, PaymentPhase};
pub use runtime::{PaymentGateway, SessionClosed, SessionHandle, SimulatedGateway};
