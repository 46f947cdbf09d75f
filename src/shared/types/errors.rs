use std::fmt;

use thiserror::Error;

/// Call site that refused to proceed.
///
/// Every business-rule rejection is the same kind of error; the action only
/// decides how the rejection is named towards the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockedAction {
    /// Generic eligibility gate
    Proceed,
    /// Creating or changing a room booking
    Book,
    /// Listing hotels and rooms
    ListHotels,
}

impl BlockedAction {
    pub fn error_name(&self) -> &'static str {
        match self {
            Self::Proceed => "CannotProceedError",
            Self::Book => "CannotBookingError",
            Self::ListHotels => "CannotListHotelsError",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Proceed => "Cannot proceed with this request!",
            Self::Book => "Cannot booking this room! Overcapacity!",
            Self::ListHotels => "Cannot list hotels!",
        }
    }
}

impl fmt::Display for BlockedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proceed => write!(f, "Cannot proceed"),
            Self::Book => write!(f, "Cannot book room"),
            Self::ListHotels => write!(f, "Cannot list hotels"),
        }
    }
}

/// Business rule that blocked the action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// User has no enrollment
    NoEnrollment,
    /// Enrollment exists but no ticket was reserved yet
    NoTicket,
    TicketNotPaid,
    RemoteTicket,
    HotelNotIncluded,
    /// Room reached its capacity
    RoomFull,
    /// User already holds a booking
    AlreadyBooked,
    /// Booking belongs to another user
    NotBookingOwner,
    /// Enrollment already holds its one ticket
    TicketExists,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NoEnrollment => "user has no enrollment",
            Self::NoTicket => "enrollment has no ticket",
            Self::TicketNotPaid => "ticket is not paid",
            Self::RemoteTicket => "ticket is remote-only",
            Self::HotelNotIncluded => "ticket does not include hotel",
            Self::RoomFull => "room is at capacity",
            Self::AlreadyBooked => "user already holds a booking",
            Self::NotBookingOwner => "booking belongs to another user",
            Self::TicketExists => "enrollment already holds a ticket",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{action}: {reason}")]
    Blocked {
        action: BlockedAction,
        reason: BlockReason,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    pub fn blocked(action: BlockedAction, reason: BlockReason) -> Self {
        Self::Blocked { action, reason }
    }

    /// Stable error name surfaced to clients.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NotFoundError",
            Self::BadRequest(_) => "BadRequestError",
            Self::Blocked { action, .. } => action.error_name(),
            Self::Unauthorized(_) => "UnauthorizedError",
            Self::Storage(_) => "InternalServerError",
        }
    }

    /// Human message surfaced to clients. Details stay in the `Display` form.
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "No result for this search!",
            Self::BadRequest(_) => "Bad Request Error!",
            Self::Blocked { action, .. } => action.message(),
            Self::Unauthorized(_) => "You must be signed in to continue",
            Self::Storage(_) => "Internal server error",
        }
    }

    /// Re-label a rejection for another call site.
    ///
    /// Blocked errors keep their reason. A missing enrollment becomes a
    /// rejection as well when `enrollment_missing_blocks` is set; every other
    /// error passes through untouched.
    pub fn relabel(self, action: BlockedAction, enrollment_missing_blocks: bool) -> Self {
        match self {
            Self::Blocked { reason, .. } => Self::Blocked { action, reason },
            Self::NotFound {
                entity: "Enrollment",
                ..
            } if enrollment_missing_blocks => Self::Blocked {
                action,
                reason: BlockReason::NoEnrollment,
            },
            other => other,
        }
    }

    /// Whether the error is a business-rule outcome rather than a fault.
    pub fn is_business_rule(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_names_follow_action() {
        let book = DomainError::blocked(BlockedAction::Book, BlockReason::RoomFull);
        assert_eq!(book.name(), "CannotBookingError");
        assert_eq!(book.message(), "Cannot booking this room! Overcapacity!");

        let list = DomainError::blocked(BlockedAction::ListHotels, BlockReason::NoTicket);
        assert_eq!(list.name(), "CannotListHotelsError");
        assert_eq!(list.message(), "Cannot list hotels!");
    }

    #[test]
    fn relabel_keeps_reason() {
        let err = DomainError::blocked(BlockedAction::Proceed, BlockReason::RemoteTicket)
            .relabel(BlockedAction::Book, true);
        assert_eq!(
            err,
            DomainError::blocked(BlockedAction::Book, BlockReason::RemoteTicket)
        );
    }

    #[test]
    fn relabel_missing_enrollment() {
        let missing = DomainError::not_found("Enrollment", "user_id", 1);

        let booking = missing.clone().relabel(BlockedAction::Book, true);
        assert_eq!(
            booking,
            DomainError::blocked(BlockedAction::Book, BlockReason::NoEnrollment)
        );

        let listing = missing.clone().relabel(BlockedAction::ListHotels, false);
        assert_eq!(listing, missing);
    }

    #[test]
    fn relabel_leaves_other_not_found_alone() {
        let missing_room = DomainError::not_found("Room", "id", 7);
        assert_eq!(
            missing_room.clone().relabel(BlockedAction::Book, true),
            missing_room
        );
    }

    #[test]
    fn storage_is_not_business_rule() {
        assert!(!DomainError::Storage("boom".into()).is_business_rule());
        assert!(DomainError::BadRequest("room_id".into()).is_business_rule());
        assert_eq!(DomainError::Unauthorized("x".into()).name(), "UnauthorizedError");
    }
}
