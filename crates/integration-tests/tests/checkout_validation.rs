//! Checkout gating and the payment failure branch.

use std::time::Duration;

use delights_flow::{PaymentMethod, PaymentPhase, Screen, SessionHandle};

use delights_integration_tests::{DecliningGateway, full_draft, line, test_config};

// =============================================================================
// Delivery Details Gating
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_missing_fields_keep_payment_out_of_reach() {
    let handle = SessionHandle::spawn(test_config());
    handle.add_to_cart(line("1", 15_000)).expect("send");
    handle.navigate(Screen::Checkout).expect("send");

    for missing in ["name", "phone", "address"] {
        let mut draft = full_draft();
        match missing {
            "name" => draft.recipient_name.clear(),
            "phone" => draft.phone.clear(),
            _ => draft.address.clear(),
        }
        handle.submit_delivery_details(draft).expect("send");
        let snapshot = handle.snapshot().await.expect("snapshot");
        assert_eq!(snapshot.screen, Screen::Checkout, "missing {missing}");
        assert!(!snapshot.can_proceed_to_payment, "missing {missing}");
    }

    // Filling all three enables and performs the advance.
    handle.submit_delivery_details(full_draft()).expect("send");
    let snapshot = handle.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.screen, Screen::Payment);
}

#[tokio::test(start_paused = true)]
async fn test_empty_cart_checkout_cannot_become_an_order() {
    let handle = SessionHandle::spawn(test_config());
    handle.navigate(Screen::Checkout).expect("send");
    handle.submit_delivery_details(full_draft()).expect("send");

    // Submitting valid details with nothing in the cart goes nowhere.
    let snapshot = handle.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.screen, Screen::Checkout);

    // Even forcing the payment screen, the pay action is refused.
    handle.navigate(Screen::Payment).expect("send");
    handle
        .initiate_payment(PaymentMethod::CashOnDelivery)
        .expect("send");
    tokio::time::sleep(Duration::from_secs(10)).await;
    let snapshot = handle.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.phase, PaymentPhase::Idle);
}

// =============================================================================
// Failure Branch
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_declined_payment_surfaces_failure_and_keeps_cart() {
    let gateway = DecliningGateway {
        delay: Duration::from_secs(2),
        reason: "insufficient funds",
    };
    let handle = SessionHandle::spawn_with_gateway(test_config(), gateway);
    handle.add_to_cart(line("1", 15_000)).expect("send");
    handle.navigate(Screen::Checkout).expect("send");
    handle.submit_delivery_details(full_draft()).expect("send");
    handle
        .initiate_payment(PaymentMethod::Card)
        .expect("send");

    tokio::time::sleep(Duration::from_millis(2_100)).await;
    let snapshot = handle.snapshot().await.expect("snapshot");
    assert_eq!(
        snapshot.phase,
        PaymentPhase::Failed {
            reason: "insufficient funds".to_owned()
        }
    );
    // The order did not complete: cart intact, still on the payment screen.
    assert_eq!(snapshot.screen, Screen::Payment);
    assert_eq!(snapshot.total_items, 1);
}

#[tokio::test(start_paused = true)]
async fn test_failed_attempt_can_be_retried() {
    let gateway = DecliningGateway {
        delay: Duration::from_millis(500),
        reason: "gateway timeout",
    };
    let handle = SessionHandle::spawn_with_gateway(test_config(), gateway);
    handle.add_to_cart(line("1", 15_000)).expect("send");
    handle.navigate(Screen::Checkout).expect("send");
    handle.submit_delivery_details(full_draft()).expect("send");

    handle
        .initiate_payment(PaymentMethod::Momo)
        .expect("send");
    tokio::time::sleep(Duration::from_millis(600)).await;

    handle
        .initiate_payment(PaymentMethod::CashOnDelivery)
        .expect("send");
    let snapshot = handle.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.phase, PaymentPhase::Processing);
    assert_eq!(snapshot.payment_method, PaymentMethod::CashOnDelivery);
}
