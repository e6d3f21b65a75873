//! The order-flow orchestrator.
//!
//! Composes the cart store and the navigation controller into the
//! end-to-end flow and enforces the rules that span them: checkout gating,
//! one consistent set of totals, the payment state machine, and the
//! completion side effects.
//!
//! [`OrderFlow`] is a pure reducer over discrete [`Event`]s. It never reads
//! the clock and never spawns anything; work that needs time (the gateway
//! call, the success-screen countdown) is requested through [`Effect`]s and
//! performed by the session runtime, which feeds the results back in as
//! events. Invalid events are silent no-ops, mirroring disabled buttons in
//! a view.

use delights_core::{ItemId, Price, Restaurant};
use serde::Serialize;

use crate::cart::{Cart, CartLine, NewCartLine};
use crate::checkout::{DeliveryDetails, DeliveryDraft};
use crate::config::FlowConfig;
use crate::nav::{Navigator, Screen};
use crate::payment::{PaymentMethod, PaymentOutcome, PaymentPhase};

/// An input to the flow: a user action or a timer firing.
#[derive(Debug, Clone)]
pub enum Event {
    /// A restaurant card was clicked on the browse screen.
    SelectRestaurant(Restaurant),
    /// A menu item's add button was clicked.
    AddToCart(NewCartLine),
    /// A cart line's quantity stepper was used. Zero or less removes.
    UpdateQuantity { id: ItemId, quantity: i64 },
    /// A plain navigation request.
    Navigate(Screen),
    /// The checkout form was submitted.
    SubmitDeliveryDetails(DeliveryDraft),
    /// The pay button was pressed.
    InitiatePayment(PaymentMethod),
    /// The gateway answered a pending attempt.
    PaymentResolved(PaymentOutcome),
    /// One unit of success-screen countdown time elapsed.
    CountdownTick,
    /// The "return home now" button on the success screen.
    ReturnHomeNow,
}

/// Deferred work the runtime must perform for the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Ask the payment gateway to resolve the current attempt.
    ResolvePayment,
    /// Abort the pending gateway call; its answer is no longer wanted.
    CancelPaymentResolution,
    /// Start ticking the success-screen countdown.
    StartCountdown,
    /// Stop the countdown ticker.
    StopCountdown,
}

/// The one place order totals are computed.
///
/// Every screen that shows money renders this struct, so the subtotal, fee,
/// and payable amount can never disagree between cart, checkout, and
/// payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub payable: Price,
}

/// Read-only view of the whole flow, for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub screen: Screen,
    pub selected_restaurant: Option<Restaurant>,
    pub lines: Vec<CartLine>,
    pub total_items: u32,
    pub totals: Totals,
    pub delivery: DeliveryDraft,
    /// Whether the checkout form would currently advance to payment.
    pub can_proceed_to_payment: bool,
    pub payment_method: PaymentMethod,
    pub phase: PaymentPhase,
}

/// The ordering-flow state machine.
pub struct OrderFlow {
    config: FlowConfig,
    cart: Cart,
    nav: Navigator,
    delivery_draft: DeliveryDraft,
    delivery_details: Option<DeliveryDetails>,
    payment_method: PaymentMethod,
    phase: PaymentPhase,
}

impl OrderFlow {
    /// A fresh session: empty cart, browse screen, idle payment.
    #[must_use]
    pub const fn new(config: FlowConfig) -> Self {
        Self {
            config,
            cart: Cart::new(),
            nav: Navigator::new(),
            delivery_draft: DeliveryDraft {
                recipient_name: String::new(),
                phone: String::new(),
                address: String::new(),
                driver_note: String::new(),
            },
            delivery_details: None,
            payment_method: PaymentMethod::CashOnDelivery,
            phase: PaymentPhase::Idle,
        }
    }

    /// The cart store.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The navigation controller.
    #[must_use]
    pub const fn navigator(&self) -> &Navigator {
        &self.nav
    }

    /// The payment phase of the current attempt.
    #[must_use]
    pub const fn phase(&self) -> &PaymentPhase {
        &self.phase
    }

    /// What the customer has typed into the checkout form.
    #[must_use]
    pub const fn delivery_draft(&self) -> &DeliveryDraft {
        &self.delivery_draft
    }

    /// The validated delivery details, once checkout has been submitted.
    #[must_use]
    pub const fn delivery_details(&self) -> Option<&DeliveryDetails> {
        self.delivery_details.as_ref()
    }

    /// Subtotal, delivery fee, and payable total for the current cart.
    #[must_use]
    pub fn totals(&self) -> Totals {
        let subtotal = self.cart.subtotal();
        Totals {
            subtotal,
            delivery_fee: self.config.delivery_fee,
            payable: subtotal + self.config.delivery_fee,
        }
    }

    /// Whether submitting the checkout form would advance to payment.
    #[must_use]
    pub fn can_proceed_to_payment(&self) -> bool {
        !self.cart.is_empty() && self.delivery_draft.is_complete()
    }

    /// A serializable view of the whole flow.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            screen: self.nav.current(),
            selected_restaurant: self.nav.selected_restaurant().cloned(),
            lines: self.cart.lines().to_vec(),
            total_items: self.cart.total_item_count(),
            totals: self.totals(),
            delivery: self.delivery_draft.clone(),
            can_proceed_to_payment: self.can_proceed_to_payment(),
            payment_method: self.payment_method,
            phase: self.phase.clone(),
        }
    }

    /// React to one event.
    ///
    /// Returns the effects the runtime must perform. Events that are not
    /// valid in the current state are ignored (a view would have shown the
    /// corresponding control disabled).
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::SelectRestaurant(restaurant) => {
                let effects = self.leave_payment_screen_cleanup(Screen::Menu);
                tracing::info!(restaurant = %restaurant.name, "restaurant selected");
                self.nav.select_restaurant(restaurant);
                effects
            }
            Event::AddToCart(candidate) => {
                tracing::debug!(item = %candidate.id, "adding to cart");
                self.cart.add(candidate);
                Vec::new()
            }
            Event::UpdateQuantity { id, quantity } => {
                tracing::debug!(item = %id, quantity, "updating quantity");
                self.cart.update_quantity(&id, quantity);
                Vec::new()
            }
            Event::Navigate(screen) => {
                let effects = self.leave_payment_screen_cleanup(screen);
                tracing::info!(%screen, "navigating");
                self.nav.goto(screen);
                effects
            }
            Event::SubmitDeliveryDetails(draft) => self.submit_delivery_details(draft),
            Event::InitiatePayment(method) => self.initiate_payment(method),
            Event::PaymentResolved(outcome) => self.payment_resolved(outcome),
            Event::CountdownTick => self.countdown_tick(),
            Event::ReturnHomeNow => {
                if matches!(self.phase, PaymentPhase::Succeeded { .. }) {
                    self.complete_order()
                } else {
                    tracing::debug!("return-home-now outside success screen ignored");
                    Vec::new()
                }
            }
        }
    }

    fn submit_delivery_details(&mut self, draft: DeliveryDraft) -> Vec<Effect> {
        // The draft is kept either way so the form redisplays what was
        // typed.
        self.delivery_draft = draft;

        if self.nav.current() != Screen::Checkout {
            tracing::debug!(screen = %self.nav.current(), "checkout submit outside checkout ignored");
            return Vec::new();
        }
        if self.cart.is_empty() {
            tracing::debug!("checkout submit with empty cart ignored");
            return Vec::new();
        }
        match DeliveryDetails::parse(&self.delivery_draft) {
            Ok(details) => {
                tracing::info!(recipient = details.recipient_name(), "delivery details accepted");
                self.delivery_details = Some(details);
                self.nav.goto(Screen::Payment);
            }
            Err(err) => {
                tracing::debug!(%err, "delivery details incomplete");
            }
        }
        Vec::new()
    }

    fn initiate_payment(&mut self, method: PaymentMethod) -> Vec<Effect> {
        if self.nav.current() != Screen::Payment {
            tracing::debug!(screen = %self.nav.current(), "pay outside payment screen ignored");
            return Vec::new();
        }
        if !self.phase.can_initiate() {
            tracing::debug!("payment already in flight, ignoring");
            return Vec::new();
        }
        if self.cart.is_empty() {
            tracing::debug!("pay with empty cart ignored");
            return Vec::new();
        }

        let totals = self.totals();
        tracing::info!(%method, payable = %totals.payable, "payment initiated");
        self.payment_method = method;
        self.phase = PaymentPhase::Processing;
        vec![Effect::ResolvePayment]
    }

    fn payment_resolved(&mut self, outcome: PaymentOutcome) -> Vec<Effect> {
        if !self.phase.is_processing() {
            tracing::debug!("stale payment resolution dropped");
            return Vec::new();
        }
        match outcome {
            PaymentOutcome::Confirmed { order_id } => {
                tracing::info!(%order_id, "payment confirmed");
                self.phase = PaymentPhase::Succeeded {
                    order_id,
                    remaining: self.config.countdown_start,
                };
                vec![Effect::StartCountdown]
            }
            PaymentOutcome::Declined { reason } => {
                tracing::warn!(%reason, "payment declined");
                self.phase = PaymentPhase::Failed { reason };
                Vec::new()
            }
        }
    }

    fn countdown_tick(&mut self) -> Vec<Effect> {
        match &mut self.phase {
            PaymentPhase::Succeeded { remaining, .. } if *remaining > 1 => {
                *remaining -= 1;
                Vec::new()
            }
            PaymentPhase::Succeeded { .. } => self.complete_order(),
            _ => {
                tracing::debug!("stale countdown tick dropped");
                Vec::new()
            }
        }
    }

    /// Both completion effects in one reduction: clear the cart and go
    /// home. Also resets checkout and payment state so the next order
    /// starts clean.
    fn complete_order(&mut self) -> Vec<Effect> {
        if let PaymentPhase::Succeeded { order_id, .. } = &self.phase {
            tracing::info!(%order_id, "order completed, returning home");
        }
        self.cart.clear();
        self.delivery_details = None;
        self.delivery_draft = DeliveryDraft::default();
        self.payment_method = PaymentMethod::default();
        self.phase = PaymentPhase::Idle;
        self.nav.goto(Screen::Browse);
        vec![Effect::StopCountdown]
    }

    /// Cleanup owed when a navigation request moves off the payment screen:
    /// a pending gateway call is canceled, a running countdown is stopped.
    fn leave_payment_screen_cleanup(&mut self, destination: Screen) -> Vec<Effect> {
        if self.nav.current() != Screen::Payment || destination == Screen::Payment {
            return Vec::new();
        }
        match self.phase {
            PaymentPhase::Processing => {
                tracing::info!("left payment screen mid-attempt, canceling");
                self.phase = PaymentPhase::Idle;
                vec![Effect::CancelPaymentResolution]
            }
            PaymentPhase::Succeeded { .. } => {
                tracing::info!("left success screen before countdown finished");
                self.phase = PaymentPhase::Idle;
                vec![Effect::StopCountdown]
            }
            PaymentPhase::Idle | PaymentPhase::Failed { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use delights_core::{OrderId, RestaurantId};

    fn flow() -> OrderFlow {
        OrderFlow::new(FlowConfig::default())
    }

    fn restaurant(name: &str) -> Restaurant {
        Restaurant {
            id: RestaurantId::new(1),
            name: name.to_owned(),
            address: String::new(),
            image_url: String::new(),
            discount_label: String::new(),
            category: String::new(),
        }
    }

    fn candidate(id: &str, price: u64) -> NewCartLine {
        NewCartLine {
            id: ItemId::from(id),
            name: format!("item {id}"),
            unit_price: Price::new(price),
            image_url: String::new(),
            restaurant_name: "Ăn Vặt RyTy".to_owned(),
        }
    }

    fn full_draft() -> DeliveryDraft {
        DeliveryDraft {
            recipient_name: "Nguyễn Văn A".to_owned(),
            phone: "0905123456".to_owned(),
            address: "161/3 Thành Thủy".to_owned(),
            driver_note: String::new(),
        }
    }

    fn confirmed() -> PaymentOutcome {
        PaymentOutcome::Confirmed {
            order_id: OrderId::from_timestamp(Utc::now()),
        }
    }

    /// Drive a fresh flow to the payment screen with one item in the cart.
    fn flow_at_payment() -> OrderFlow {
        let mut flow = flow();
        flow.apply(Event::AddToCart(candidate("1", 15_000)));
        flow.apply(Event::Navigate(Screen::Checkout));
        flow.apply(Event::SubmitDeliveryDetails(full_draft()));
        assert_eq!(flow.navigator().current(), Screen::Payment);
        flow
    }

    #[test]
    fn test_select_restaurant_lands_on_menu() {
        let mut flow = flow();
        let effects = flow.apply(Event::SelectRestaurant(restaurant("Xuân Thu")));

        assert!(effects.is_empty());
        assert_eq!(flow.navigator().current(), Screen::Menu);
        assert_eq!(
            flow.navigator().selected_restaurant().map(|r| r.name.as_str()),
            Some("Xuân Thu")
        );
    }

    #[test]
    fn test_totals_are_subtotal_plus_flat_fee() {
        let mut flow = flow();
        flow.apply(Event::AddToCart(candidate("a", 15_000)));
        flow.apply(Event::AddToCart(candidate("b", 20_000)));
        flow.apply(Event::AddToCart(candidate("b", 20_000)));

        let totals = flow.totals();
        assert_eq!(totals.subtotal, Price::new(55_000));
        assert_eq!(totals.delivery_fee, Price::new(15_000));
        assert_eq!(totals.payable, Price::new(70_000));
    }

    #[test]
    fn test_totals_identical_on_every_screen() {
        let mut flow = flow();
        flow.apply(Event::AddToCart(candidate("a", 15_000)));

        let mut seen = Vec::new();
        for screen in [Screen::Cart, Screen::Checkout, Screen::Payment] {
            flow.apply(Event::Navigate(screen));
            seen.push(flow.totals());
        }
        assert!(seen.iter().all(|t| *t == seen[0]));
        assert_eq!(seen[0].payable, Price::new(30_000));
    }

    #[test]
    fn test_checkout_reachable_with_empty_cart() {
        let mut flow = flow();
        flow.apply(Event::Navigate(Screen::Checkout));
        assert_eq!(flow.navigator().current(), Screen::Checkout);
    }

    #[test]
    fn test_empty_cart_cannot_reach_payment_via_submit() {
        let mut flow = flow();
        flow.apply(Event::Navigate(Screen::Checkout));
        flow.apply(Event::SubmitDeliveryDetails(full_draft()));

        assert_eq!(flow.navigator().current(), Screen::Checkout);
        assert!(!flow.can_proceed_to_payment());
    }

    #[test]
    fn test_incomplete_details_do_not_advance() {
        let mut flow = flow();
        flow.apply(Event::AddToCart(candidate("1", 15_000)));
        flow.apply(Event::Navigate(Screen::Checkout));

        let mut draft = full_draft();
        draft.phone.clear();
        flow.apply(Event::SubmitDeliveryDetails(draft.clone()));

        assert_eq!(flow.navigator().current(), Screen::Checkout);
        assert!(flow.delivery_details().is_none());
        // What was typed is kept for the form.
        assert_eq!(flow.delivery_draft(), &draft);
    }

    #[test]
    fn test_complete_details_advance_to_payment() {
        let flow = flow_at_payment();
        assert!(flow.delivery_details().is_some());
    }

    #[test]
    fn test_initiate_payment_requires_payment_screen() {
        let mut flow = flow();
        flow.apply(Event::AddToCart(candidate("1", 15_000)));
        let effects = flow.apply(Event::InitiatePayment(PaymentMethod::Momo));

        assert!(effects.is_empty());
        assert_eq!(flow.phase(), &PaymentPhase::Idle);
    }

    #[test]
    fn test_initiate_payment_starts_processing() {
        let mut flow = flow_at_payment();
        let effects = flow.apply(Event::InitiatePayment(PaymentMethod::Momo));

        assert_eq!(effects, vec![Effect::ResolvePayment]);
        assert!(flow.phase().is_processing());
    }

    #[test]
    fn test_at_most_one_attempt_in_flight() {
        let mut flow = flow_at_payment();
        flow.apply(Event::InitiatePayment(PaymentMethod::CashOnDelivery));
        let effects = flow.apply(Event::InitiatePayment(PaymentMethod::Card));

        assert!(effects.is_empty());
    }

    #[test]
    fn test_confirmation_starts_countdown() {
        let mut flow = flow_at_payment();
        flow.apply(Event::InitiatePayment(PaymentMethod::CashOnDelivery));
        let effects = flow.apply(Event::PaymentResolved(confirmed()));

        assert_eq!(effects, vec![Effect::StartCountdown]);
        assert!(matches!(
            flow.phase(),
            PaymentPhase::Succeeded { remaining: 5, .. }
        ));
    }

    #[test]
    fn test_decline_lands_in_failed_and_keeps_cart() {
        let mut flow = flow_at_payment();
        flow.apply(Event::InitiatePayment(PaymentMethod::Card));
        let effects = flow.apply(Event::PaymentResolved(PaymentOutcome::Declined {
            reason: "thẻ bị từ chối".to_owned(),
        }));

        assert!(effects.is_empty());
        assert!(matches!(flow.phase(), PaymentPhase::Failed { .. }));
        assert_eq!(flow.cart().total_item_count(), 1);

        // A failed attempt may be retried.
        let effects = flow.apply(Event::InitiatePayment(PaymentMethod::CashOnDelivery));
        assert_eq!(effects, vec![Effect::ResolvePayment]);
    }

    #[test]
    fn test_countdown_runs_down_then_completes() {
        let mut flow = flow_at_payment();
        flow.apply(Event::InitiatePayment(PaymentMethod::CashOnDelivery));
        flow.apply(Event::PaymentResolved(confirmed()));

        for expected in [4, 3, 2, 1] {
            let effects = flow.apply(Event::CountdownTick);
            assert!(effects.is_empty());
            assert!(matches!(
                flow.phase(),
                PaymentPhase::Succeeded { remaining, .. } if *remaining == expected
            ));
        }

        let effects = flow.apply(Event::CountdownTick);
        assert_eq!(effects, vec![Effect::StopCountdown]);
        assert!(flow.cart().is_empty());
        assert_eq!(flow.navigator().current(), Screen::Browse);
        assert_eq!(flow.phase(), &PaymentPhase::Idle);
        assert!(flow.delivery_details().is_none());
    }

    #[test]
    fn test_return_home_now_short_circuits() {
        let mut flow = flow_at_payment();
        flow.apply(Event::InitiatePayment(PaymentMethod::CashOnDelivery));
        flow.apply(Event::PaymentResolved(confirmed()));

        let effects = flow.apply(Event::ReturnHomeNow);
        assert_eq!(effects, vec![Effect::StopCountdown]);
        assert!(flow.cart().is_empty());
        assert_eq!(flow.navigator().current(), Screen::Browse);
    }

    #[test]
    fn test_return_home_now_ignored_outside_success() {
        let mut flow = flow_at_payment();
        let effects = flow.apply(Event::ReturnHomeNow);
        assert!(effects.is_empty());
        assert_eq!(flow.navigator().current(), Screen::Payment);
    }

    #[test]
    fn test_leaving_mid_attempt_cancels_resolution() {
        let mut flow = flow_at_payment();
        flow.apply(Event::InitiatePayment(PaymentMethod::CashOnDelivery));

        let effects = flow.apply(Event::Navigate(Screen::Cart));
        assert_eq!(effects, vec![Effect::CancelPaymentResolution]);
        assert_eq!(flow.phase(), &PaymentPhase::Idle);

        // A resolution that raced the cancellation is dropped.
        let effects = flow.apply(Event::PaymentResolved(confirmed()));
        assert!(effects.is_empty());
        assert_eq!(flow.phase(), &PaymentPhase::Idle);
    }

    #[test]
    fn test_leaving_success_screen_stops_countdown() {
        let mut flow = flow_at_payment();
        flow.apply(Event::InitiatePayment(PaymentMethod::CashOnDelivery));
        flow.apply(Event::PaymentResolved(confirmed()));

        let effects = flow.apply(Event::Navigate(Screen::Browse));
        assert_eq!(effects, vec![Effect::StopCountdown]);
        // Only the two completion paths clear the cart.
        assert_eq!(flow.cart().total_item_count(), 1);
    }

    #[test]
    fn test_stale_countdown_tick_is_dropped() {
        let mut flow = flow();
        let effects = flow.apply(Event::CountdownTick);
        assert!(effects.is_empty());
        assert_eq!(flow.phase(), &PaymentPhase::Idle);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut flow = flow();
        flow.apply(Event::SelectRestaurant(restaurant("Xuân Thu")));
        flow.apply(Event::AddToCart(candidate("1", 15_000)));

        let snapshot = flow.snapshot();
        assert_eq!(snapshot.screen, Screen::Menu);
        assert_eq!(snapshot.total_items, 1);
        assert_eq!(snapshot.totals.payable, Price::new(30_000));
        assert_eq!(snapshot.phase, PaymentPhase::Idle);
        assert!(!snapshot.can_proceed_to_payment);
    }
}
