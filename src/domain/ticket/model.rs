//! Ticket domain entities

use chrono::{DateTime, Utc};

use crate::shared::errors::BlockReason;

/// Ticket payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    /// Reserved, waiting for payment
    Reserved,
    /// Payment processed
    Paid,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "RESERVED",
            Self::Paid => "PAID",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "RESERVED" => Some(Self::Reserved),
            "PAID" => Some(Self::Paid),
            _ => None,
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ticket catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct TicketType {
    pub id: i32,
    pub name: String,
    /// Price in cents
    pub price: i32,
    pub is_remote: bool,
    pub includes_hotel: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TicketType {
    pub fn new(
        id: i32,
        name: impl Into<String>,
        price: i32,
        is_remote: bool,
        includes_hotel: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            price,
            is_remote,
            includes_hotel,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Ticket purchased through an enrollment
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: i32,
    pub ticket_type_id: i32,
    pub enrollment_id: i32,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    pub fn new(id: i32, enrollment_id: i32, ticket_type_id: i32, status: TicketStatus) -> Self {
        let now = Utc::now();
        Self {
            id,
            ticket_type_id,
            enrollment_id,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == TicketStatus::Paid
    }

    pub fn mark_paid(&mut self) {
        self.status = TicketStatus::Paid;
        self.updated_at = Utc::now();
    }
}

/// Ticket joined with its type
#[derive(Debug, Clone, PartialEq)]
pub struct TicketWithType {
    pub ticket: Ticket,
    pub ticket_type: TicketType,
}

impl TicketWithType {
    /// Check the hotel access rules: paid, in person, hotel included.
    pub fn hotel_eligibility(&self) -> Result<(), BlockReason> {
        if !self.ticket.is_paid() {
            return Err(BlockReason::TicketNotPaid);
        }
        if self.ticket_type.is_remote {
            return Err(BlockReason::RemoteTicket);
        }
        if !self.ticket_type.includes_hotel {
            return Err(BlockReason::HotelNotIncluded);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_type(status: TicketStatus, is_remote: bool, includes_hotel: bool) -> TicketWithType {
        TicketWithType {
            ticket: Ticket::new(1, 1, 1, status),
            ticket_type: TicketType::new(1, "Presencial + Hotel", 60000, is_remote, includes_hotel),
        }
    }

    #[test]
    fn paid_in_person_with_hotel_is_eligible() {
        assert_eq!(with_type(TicketStatus::Paid, false, true).hotel_eligibility(), Ok(()));
    }

    #[test]
    fn reserved_ticket_is_not_eligible() {
        assert_eq!(
            with_type(TicketStatus::Reserved, false, true).hotel_eligibility(),
            Err(BlockReason::TicketNotPaid)
        );
    }

    #[test]
    fn remote_ticket_is_not_eligible() {
        assert_eq!(
            with_type(TicketStatus::Paid, true, true).hotel_eligibility(),
            Err(BlockReason::RemoteTicket)
        );
    }

    #[test]
    fn ticket_without_hotel_is_not_eligible() {
        assert_eq!(
            with_type(TicketStatus::Paid, false, false).hotel_eligibility(),
            Err(BlockReason::HotelNotIncluded)
        );
    }

    #[test]
    fn mark_paid_sets_paid() {
        let mut t = Ticket::new(1, 1, 1, TicketStatus::Reserved);
        assert!(!t.is_paid());
        t.mark_paid();
        assert!(t.is_paid());
    }

    #[test]
    fn status_strings() {
        assert_eq!(TicketStatus::from_str("PAID"), Some(TicketStatus::Paid));
        assert_eq!(TicketStatus::from_str("RESERVED"), Some(TicketStatus::Reserved));
        assert_eq!(TicketStatus::from_str("paid"), None);
    }
}
