//! Payment domain entities

use chrono::{DateTime, Utc};

/// Card details as submitted by the client. Never validated against a card
/// network here; only the issuer and last digits are kept.
#[derive(Debug, Clone)]
pub struct CardData {
    pub issuer: String,
    pub number: String,
    pub name: String,
    pub expiration_date: String,
    pub cvv: String,
}

impl CardData {
    /// Last four digits of the card number (fewer if the number is shorter)
    pub fn last_digits(&self) -> String {
        let digits: Vec<char> = self.number.chars().filter(char::is_ascii_digit).collect();
        let start = digits.len().saturating_sub(4);
        digits[start..].iter().collect()
    }
}

/// Payment record for a ticket, immutable once created
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i32,
    pub ticket_id: i32,
    /// Amount paid in cents
    pub value: i32,
    pub card_issuer: String,
    pub card_last_digits: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values needed to insert a payment
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub ticket_id: i32,
    pub value: i32,
    pub card_issuer: String,
    pub card_last_digits: String,
}

impl NewPayment {
    pub fn from_card(ticket_id: i32, value: i32, card: &CardData) -> Self {
        Self {
            ticket_id,
            value,
            card_issuer: card.issuer.clone(),
            card_last_digits: card.last_digits(),
        }
    }
}
