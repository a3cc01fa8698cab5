use std::fmt;

use chrono::{DateTime, Utc};

use super::errors::DomainError;

pub const CARD_NUMBER_ERROR: &str = "Card number must be exactly 16 digits.";

/// Card details as entered at the till. The full number only lives here and
/// is reduced to its last four digits before anything is stored.
#[derive(Clone, PartialEq, Eq)]
pub struct CardDetails {
    pub card_id: Option<String>,
    pub card_holder_name: String,
    pub card_number: String,
    pub card_expiry: String,
}

impl CardDetails {
    /// `^\d{16}$`
    pub fn validate_number(&self) -> Result<(), DomainError> {
        let n = &self.card_number;
        if n.len() == 16 && n.bytes().all(|b| b.is_ascii_digit()) {
            Ok(())
        } else {
            Err(DomainError::invalid(CARD_NUMBER_ERROR))
        }
    }

    pub fn last4(&self) -> &str {
        let n = &self.card_number;
        n.get(n.len().saturating_sub(4)..).unwrap_or_default()
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("card_id", &self.card_id)
            .field("card_holder_name", &self.card_holder_name)
            .field("card_number", &format_args!("****{}", self.last4()))
            .field("card_expiry", &self.card_expiry)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub customer_id: i32,
    pub card_id: String,
    pub card_holder_name: String,
    pub card_last4: String,
    pub card_expiry: String,
}

impl NewPayment {
    /// Build the masked record for `card`. Fails unless the number is
    /// exactly 16 digits.
    pub fn masked(customer_id: i32, card: &CardDetails) -> Result<Self, DomainError> {
        card.validate_number()?;
        Ok(Self {
            customer_id,
            card_id: card.card_id.clone().unwrap_or_default(),
            card_holder_name: card.card_holder_name.clone(),
            card_last4: card.last4().to_string(),
            card_expiry: card.card_expiry.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub id: i32,
    pub customer_id: i32,
    pub card_id: String,
    pub card_holder_name: String,
    pub card_last4: String,
    pub card_expiry: String,
    pub recorded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(number: &str) -> CardDetails {
        CardDetails {
            card_id: Some("visa-01".to_string()),
            card_holder_name: "Jane Doe".to_string(),
            card_number: number.to_string(),
            card_expiry: "08/28".to_string(),
        }
    }

    #[test]
    fn sixteen_digits_are_accepted() {
        assert!(card("4111111111111111").validate_number().is_ok());
    }

    #[test]
    fn every_other_length_is_rejected() {
        for len in (0..=24).filter(|l| *l != 16) {
            let number = "4".repeat(len);
            let err = card(&number).validate_number().unwrap_err();
            assert_eq!(err.to_string(), CARD_NUMBER_ERROR, "length {len}");
        }
    }

    #[test]
    fn non_digit_characters_are_rejected() {
        for number in [
            "411111111111111a",
            "4111 11111111111",
            "4111-11111111111",
            "41111111111111１1",
            " 411111111111111",
        ] {
            assert!(card(number).validate_number().is_err(), "{number}");
        }
    }

    #[test]
    fn masked_record_keeps_only_last_four() {
        let payment = NewPayment::masked(7, &card("4111111111114242")).expect("valid card");

        assert_eq!(payment.card_last4, "4242");
        assert_eq!(payment.customer_id, 7);
        assert_eq!(payment.card_id, "visa-01");
        let rendered = format!("{:?}", payment);
        assert!(!rendered.contains("4111111111114242"));
    }

    #[test]
    fn missing_card_id_defaults_to_empty() {
        let mut details = card("4111111111114242");
        details.card_id = None;
        let payment = NewPayment::masked(1, &details).expect("valid card");
        assert_eq!(payment.card_id, "");
    }

    #[test]
    fn debug_output_masks_the_number() {
        let rendered = format!("{:?}", card("4111111111114242"));
        assert!(rendered.contains("****4242"));
        assert!(!rendered.contains("4111111111114242"));
    }
}
