use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::types::ResidentStatus;

/// expected business outcomes that stop a payment from being recorded
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    #[error("resident has no billable room")]
    NoBillableRoom,

    #[error("period already settled and no arrears outstanding")]
    AlreadySettled,

    #[error("no payment needed: rent is fully discounted and no arrears outstanding")]
    NoPaymentNeeded,
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("payment rejected: {0}")]
    Rejected(#[from] RejectionReason),

    #[error("invalid input: {message}")]
    InvalidInput {
        message: String,
    },

    #[error("resident not found: {id}")]
    ResidentNotFound {
        id: Uuid,
    },

    #[error("room not found: {id}")]
    RoomNotFound {
        id: Uuid,
    },

    #[error("room {room_number} is full: capacity {capacity}")]
    RoomFull {
        room_number: String,
        capacity: u32,
    },

    #[error("invalid transition: cannot {action} a resident in status {status:?}")]
    InvalidTransition {
        action: String,
        status: ResidentStatus,
    },

    #[error("resident must be assigned a room first")]
    RoomAssignmentRequired,

    #[error("outstanding arrears of {arrears} must be cleared first")]
    OutstandingArrears {
        arrears: crate::decimal::Money,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("record store error: {message}")]
    Store {
        message: String,
    },
}

impl LedgerError {
    /// the rejection reason, if this is an expected business rejection
    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            LedgerError::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        LedgerError::InvalidInput {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Store {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_is_recoverable() {
        let err: LedgerError = RejectionReason::AlreadySettled.into();
        assert_eq!(err.rejection(), Some(RejectionReason::AlreadySettled));
        assert_eq!(
            err.to_string(),
            "payment rejected: period already settled and no arrears outstanding"
        );

        let other = LedgerError::invalid_input("amount must be positive");
        assert!(other.rejection().is_none());
    }
}
