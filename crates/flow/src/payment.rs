//! Payment phases, methods, and outcomes.

use delights_core::OrderId;
use serde::{Deserialize, Serialize};

/// How the customer wants to pay.
///
/// Selection is recorded for the receipt; it does not change how the
/// simulated payment behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Thanh toán khi nhận hàng.
    #[default]
    CashOnDelivery,
    /// Ví MoMo.
    Momo,
    /// Chuyển khoản ngân hàng.
    BankTransfer,
    /// Thẻ tín dụng/ghi nợ.
    Card,
}

impl PaymentMethod {
    /// Customer-facing label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CashOnDelivery => "Thanh toán khi nhận hàng (COD)",
            Self::Momo => "Ví MoMo",
            Self::BankTransfer => "Chuyển khoản ngân hàng",
            Self::Card => "Thẻ tín dụng/ghi nợ",
        }
    }
}

impl core::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::CashOnDelivery => write!(f, "cod"),
            Self::Momo => write!(f, "momo"),
            Self::BankTransfer => write!(f, "bank"),
            Self::Card => write!(f, "card"),
        }
    }
}

impl core::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cod" => Ok(Self::CashOnDelivery),
            "momo" => Ok(Self::Momo),
            "bank" => Ok(Self::BankTransfer),
            "card" => Ok(Self::Card),
            _ => Err(format!("unknown payment method: {s}")),
        }
    }
}

/// Where the current payment attempt stands.
///
/// One attempt moves `Idle → Processing → Succeeded`; a declined attempt
/// lands in `Failed`, from which a new attempt may start. At most one
/// attempt is in flight at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PaymentPhase {
    /// No attempt in progress.
    Idle,
    /// An attempt is waiting on the gateway.
    Processing,
    /// The order is confirmed; the success screen is counting down to the
    /// return home.
    Succeeded {
        order_id: OrderId,
        /// Ticks left until the automatic return to browse.
        remaining: u32,
    },
    /// The gateway declined the attempt.
    Failed { reason: String },
}

impl PaymentPhase {
    /// Whether an attempt is currently waiting on the gateway.
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        matches!(self, Self::Processing)
    }

    /// Whether a new attempt may be initiated.
    #[must_use]
    pub const fn can_initiate(&self) -> bool {
        matches!(self, Self::Idle | Self::Failed { .. })
    }
}

/// What the payment gateway decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PaymentOutcome {
    /// Payment went through; the order exists now.
    Confirmed { order_id: OrderId },
    /// Payment was declined. The simulated gateway never produces this, but
    /// the flow handles it so a real gateway could.
    Declined { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_method_from_str_roundtrip() {
        for method in [
            PaymentMethod::CashOnDelivery,
            PaymentMethod::Momo,
            PaymentMethod::BankTransfer,
            PaymentMethod::Card,
        ] {
            let parsed: PaymentMethod = method.to_string().parse().expect("roundtrip");
            assert_eq!(parsed, method);
        }
        assert!("cash".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_default_method_is_cod() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::CashOnDelivery);
    }

    #[test]
    fn test_phase_gates() {
        assert!(PaymentPhase::Idle.can_initiate());
        assert!(
            PaymentPhase::Failed {
                reason: "declined".to_owned()
            }
            .can_initiate()
        );
        assert!(!PaymentPhase::Processing.can_initiate());
        assert!(PaymentPhase::Processing.is_processing());

        let succeeded = PaymentPhase::Succeeded {
            order_id: OrderId::from_timestamp(Utc::now()),
            remaining: 5,
        };
        assert!(!succeeded.can_initiate());
        assert!(!succeeded.is_processing());
    }
}
