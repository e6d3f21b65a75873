//! Integration tests for Shoppe Delights.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p delights-integration-tests
//! ```
//!
//! The suites drive whole order sessions through `delights-flow`'s session
//! runtime under `tokio::time::pause`, so the gateway delay and the success
//! countdown elapse instantly while keeping their relative order.
//!
//! # Test Categories
//!
//! - `order_flow` - End-to-end ordering sessions
//! - `cart_properties` - Cart store invariants
//! - `checkout_validation` - Delivery-details gating and payment failure

use std::time::Duration;

use delights_core::{ItemId, Price};
use delights_flow::{DeliveryDraft, FlowConfig, NewCartLine, PaymentGateway, PaymentOutcome};

/// The reference configuration, pinned explicitly so tests don't depend on
/// the environment.
#[must_use]
pub fn test_config() -> FlowConfig {
    FlowConfig {
        delivery_fee: Price::new(15_000),
        countdown_start: 5,
        payment_delay: Duration::from_secs(2),
        countdown_tick: Duration::from_secs(1),
    }
}

/// A cart candidate with the given id and unit price.
#[must_use]
pub fn line(id: &str, price: u64) -> NewCartLine {
    NewCartLine {
        id: ItemId::from(id),
        name: format!("item {id}"),
        unit_price: Price::new(price),
        image_url: String::new(),
        restaurant_name: "Ăn Vặt RyTy - Shop Online".to_owned(),
    }
}

/// A complete delivery form.
#[must_use]
pub fn full_draft() -> DeliveryDraft {
    DeliveryDraft {
        recipient_name: "Nguyễn Văn A".to_owned(),
        phone: "0905123456".to_owned(),
        address: "161/3 Thành Thủy, Đà Nẵng".to_owned(),
        driver_note: String::new(),
    }
}

/// A gateway that always declines, for exercising the failure branch the
/// simulated gateway never takes.
#[derive(Debug, Clone)]
pub struct DecliningGateway {
    pub delay: Duration,
    pub reason: &'static str,
}

impl PaymentGateway for DecliningGateway {
    async fn authorize(&self, _payable: Price) -> PaymentOutcome {
        tokio::time::sleep(self.delay).await;
        PaymentOutcome::Declined {
            reason: self.reason.to_owned(),
        }
    }
}
