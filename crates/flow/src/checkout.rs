//! Delivery details captured on the checkout screen.
//!
//! The draft is free-form and owned by the checkout step; it never enters
//! the cart. A [`DeliveryDetails`] value only exists once the three required
//! fields are non-empty, which is what enables the proceed-to-payment
//! action.

use serde::{Deserialize, Serialize};

/// Errors that can occur when validating a [`DeliveryDraft`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryDetailsError {
    /// The recipient name is empty.
    #[error("recipient name is required")]
    EmptyRecipientName,
    /// The phone number is empty.
    #[error("phone number is required")]
    EmptyPhone,
    /// The delivery address is empty.
    #[error("delivery address is required")]
    EmptyAddress,
}

/// What the customer has typed into the checkout form so far.
///
/// All fields accept any string, including empty ones; validation happens
/// when the form is submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDraft {
    pub recipient_name: String,
    pub phone: String,
    pub address: String,
    /// Optional note for the driver, e.g. "gọi trước khi giao".
    pub driver_note: String,
}

impl DeliveryDraft {
    /// Whether all required fields are filled.
    ///
    /// Views use this to enable the proceed-to-payment action; it mirrors
    /// exactly what [`DeliveryDetails::parse`] will accept.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        DeliveryDetails::parse(self).is_ok()
    }
}

/// Validated delivery details.
///
/// Every instance has a non-empty recipient name, phone, and address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryDetails {
    recipient_name: String,
    phone: String,
    address: String,
    driver_note: Option<String>,
}

impl DeliveryDetails {
    /// Validate a draft into delivery details.
    ///
    /// Required fields are trimmed; whitespace-only input counts as empty.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing required field.
    pub fn parse(draft: &DeliveryDraft) -> Result<Self, DeliveryDetailsError> {
        let recipient_name = draft.recipient_name.trim();
        if recipient_name.is_empty() {
            return Err(DeliveryDetailsError::EmptyRecipientName);
        }

        let phone = draft.phone.trim();
        if phone.is_empty() {
            return Err(DeliveryDetailsError::EmptyPhone);
        }

        let address = draft.address.trim();
        if address.is_empty() {
            return Err(DeliveryDetailsError::EmptyAddress);
        }

        let driver_note = match draft.driver_note.trim() {
            "" => None,
            note => Some(note.to_owned()),
        };

        Ok(Self {
            recipient_name: recipient_name.to_owned(),
            phone: phone.to_owned(),
            address: address.to_owned(),
            driver_note,
        })
    }

    /// The recipient's name.
    #[must_use]
    pub fn recipient_name(&self) -> &str {
        &self.recipient_name
    }

    /// The recipient's phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// The delivery address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The note for the driver, if one was given.
    #[must_use]
    pub fn driver_note(&self) -> Option<&str> {
        self.driver_note.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_draft() -> DeliveryDraft {
        DeliveryDraft {
            recipient_name: "Nguyễn Văn A".to_owned(),
            phone: "0905123456".to_owned(),
            address: "161/3 Thành Thủy, Đà Nẵng".to_owned(),
            driver_note: String::new(),
        }
    }

    #[test]
    fn test_parse_complete_draft() {
        let details = DeliveryDetails::parse(&full_draft()).expect("valid");
        assert_eq!(details.recipient_name(), "Nguyễn Văn A");
        assert_eq!(details.phone(), "0905123456");
        assert!(details.driver_note().is_none());
    }

    #[test]
    fn test_each_required_field_reported() {
        let mut draft = full_draft();
        draft.recipient_name.clear();
        assert_eq!(
            DeliveryDetails::parse(&draft),
            Err(DeliveryDetailsError::EmptyRecipientName)
        );

        let mut draft = full_draft();
        draft.phone.clear();
        assert_eq!(
            DeliveryDetails::parse(&draft),
            Err(DeliveryDetailsError::EmptyPhone)
        );

        let mut draft = full_draft();
        draft.address.clear();
        assert_eq!(
            DeliveryDetails::parse(&draft),
            Err(DeliveryDetailsError::EmptyAddress)
        );
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let mut draft = full_draft();
        draft.phone = "   ".to_owned();
        assert!(!draft.is_complete());
    }

    #[test]
    fn test_driver_note_is_optional() {
        let mut draft = full_draft();
        assert!(draft.is_complete());

        draft.driver_note = "Để ở bảo vệ".to_owned();
        let details = DeliveryDetails::parse(&draft).expect("valid");
        assert_eq!(details.driver_note(), Some("Để ở bảo vệ"));
    }
}
