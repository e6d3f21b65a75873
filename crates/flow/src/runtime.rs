//! The tokio session runtime.
//!
//! One spawned task owns the [`OrderFlow`] for a session, so there is
//! exactly one logical writer. Views hold a [`SessionHandle`] and talk to
//! the task over a channel: events in, snapshots out.
//!
//! The task also executes the flow's effects. The two deferred callbacks of
//! the flow - the gateway resolution and the success-screen countdown - run
//! as separate spawned tasks whose `JoinHandle`s are kept so they can be
//! aborted the moment the flow no longer wants them, and are aborted
//! unconditionally when the session ends. Timer tasks hold only a weak
//! sender back into the session, so a session whose handles are all dropped
//! shuts down instead of being kept alive by its own timers.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use delights_core::{ItemId, OrderId, Price, Restaurant};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use crate::cart::NewCartLine;
use crate::checkout::DeliveryDraft;
use crate::config::FlowConfig;
use crate::nav::Screen;
use crate::order::{Effect, Event, OrderFlow, Snapshot};
use crate::payment::{PaymentMethod, PaymentOutcome};

/// Resolves payment attempts.
///
/// The seam where a real gateway would plug in; the shipped implementation
/// is [`SimulatedGateway`].
pub trait PaymentGateway: Send + Sync + 'static {
    /// Resolve one payment attempt for `payable`.
    fn authorize(&self, payable: Price) -> impl Future<Output = PaymentOutcome> + Send;
}

/// The reference gateway: waits a configured delay, then confirms.
///
/// It never declines; the decline path exists for real gateways and is
/// exercised in tests with a declining stand-in.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    /// A gateway that confirms after `delay`.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl PaymentGateway for SimulatedGateway {
    async fn authorize(&self, payable: Price) -> PaymentOutcome {
        tokio::time::sleep(self.delay).await;
        tracing::debug!(%payable, "simulated gateway confirmed");
        PaymentOutcome::Confirmed {
            order_id: OrderId::from_timestamp(Utc::now()),
        }
    }
}

/// The session has ended; its task is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("order session has ended")]
pub struct SessionClosed;

enum Command {
    Apply(Event),
    Snapshot(oneshot::Sender<Snapshot>),
}

/// Cheaply cloneable handle to a running order session.
///
/// Dropping every handle ends the session and aborts its timers.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl SessionHandle {
    /// Start a session with the simulated gateway from `config`.
    #[must_use]
    pub fn spawn(config: FlowConfig) -> Self {
        let gateway = SimulatedGateway::new(config.payment_delay);
        Self::spawn_with_gateway(config, gateway)
    }

    /// Start a session with a caller-provided gateway.
    #[must_use]
    pub fn spawn_with_gateway<G: PaymentGateway>(config: FlowConfig, gateway: G) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = SessionTask {
            flow: OrderFlow::new(config.clone()),
            countdown_tick: config.countdown_tick,
            gateway: Arc::new(gateway),
            feedback: tx.downgrade(),
            payment_task: None,
            countdown_task: None,
        };
        let span = tracing::info_span!("order_session", session_id = %Uuid::new_v4());
        tokio::spawn(task.run(rx).instrument(span));
        Self { tx }
    }

    /// Choose a restaurant and open its menu.
    pub fn select_restaurant(&self, restaurant: Restaurant) -> Result<(), SessionClosed> {
        self.send(Event::SelectRestaurant(restaurant))
    }

    /// Add one unit of an item to the cart.
    pub fn add_to_cart(&self, candidate: NewCartLine) -> Result<(), SessionClosed> {
        self.send(Event::AddToCart(candidate))
    }

    /// Set a cart line's quantity; zero or less removes it.
    pub fn update_quantity(&self, id: ItemId, quantity: i64) -> Result<(), SessionClosed> {
        self.send(Event::UpdateQuantity { id, quantity })
    }

    /// Navigate to a screen.
    pub fn navigate(&self, screen: Screen) -> Result<(), SessionClosed> {
        self.send(Event::Navigate(screen))
    }

    /// Submit the checkout form.
    pub fn submit_delivery_details(&self, draft: DeliveryDraft) -> Result<(), SessionClosed> {
        self.send(Event::SubmitDeliveryDetails(draft))
    }

    /// Press the pay button.
    pub fn initiate_payment(&self, method: PaymentMethod) -> Result<(), SessionClosed> {
        self.send(Event::InitiatePayment(method))
    }

    /// Skip the success-screen countdown and return home immediately.
    pub fn return_home_now(&self) -> Result<(), SessionClosed> {
        self.send(Event::ReturnHomeNow)
    }

    /// Read the current state of the flow.
    ///
    /// # Errors
    ///
    /// Returns [`SessionClosed`] if the session task has ended.
    pub async fn snapshot(&self) -> Result<Snapshot, SessionClosed> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Snapshot(reply))
            .map_err(|_| SessionClosed)?;
        rx.await.map_err(|_| SessionClosed)
    }

    fn send(&self, event: Event) -> Result<(), SessionClosed> {
        self.tx.send(Command::Apply(event)).map_err(|_| SessionClosed)
    }
}

struct SessionTask<G> {
    flow: OrderFlow,
    countdown_tick: Duration,
    gateway: Arc<G>,
    /// Weak so timer tasks never keep a handle-less session alive.
    feedback: mpsc::WeakUnboundedSender<Command>,
    payment_task: Option<JoinHandle<()>>,
    countdown_task: Option<JoinHandle<()>>,
}

impl<G: PaymentGateway> SessionTask<G> {
    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Command>) {
        while let Some(command) = rx.recv().await {
            match command {
                Command::Apply(event) => {
                    for effect in self.flow.apply(event) {
                        self.perform(effect);
                    }
                }
                Command::Snapshot(reply) => {
                    let _ = reply.send(self.flow.snapshot());
                }
            }
        }
        // Every handle is gone: nothing may fire against the dead session.
        self.abort_payment();
        self.abort_countdown();
        tracing::debug!("session ended");
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::ResolvePayment => {
                self.abort_payment();
                let gateway = Arc::clone(&self.gateway);
                let feedback = self.feedback.clone();
                let payable = self.flow.totals().payable;
                self.payment_task = Some(tokio::spawn(async move {
                    let outcome = gateway.authorize(payable).await;
                    if let Some(tx) = feedback.upgrade() {
                        let _ = tx.send(Command::Apply(Event::PaymentResolved(outcome)));
                    }
                }));
            }
            Effect::CancelPaymentResolution => self.abort_payment(),
            Effect::StartCountdown => {
                self.abort_countdown();
                let feedback = self.feedback.clone();
                let tick = self.countdown_tick;
                self.countdown_task = Some(tokio::spawn(async move {
                    loop {
                        tokio::time::sleep(tick).await;
                        let Some(tx) = feedback.upgrade() else { break };
                        if tx.send(Command::Apply(Event::CountdownTick)).is_err() {
                            break;
                        }
                    }
                }));
            }
            Effect::StopCountdown => self.abort_countdown(),
        }
    }

    fn abort_payment(&mut self) {
        if let Some(task) = self.payment_task.take() {
            task.abort();
        }
    }

    fn abort_countdown(&mut self) {
        if let Some(task) = self.countdown_task.take() {
            task.abort();
        }
    }
}
