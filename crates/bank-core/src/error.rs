//! Error types for The Bank

use thiserror::Error;

use crate::GroupName;

/// Core errors
///
/// Every variant is recoverable: the session reports it and carries on with
/// its state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    // Timer errors
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid time format: {0:?} (expected MM:SS)")]
    InvalidTimeFormat(String),

    #[error("Invalid inflation rate: {0:?} (expected 1..=250 percent)")]
    InvalidRate(String),

    // Ledger errors
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Group already exists: {0}")]
    DuplicateGroup(GroupName),

    #[error("Invalid group name: {0:?}")]
    InvalidGroupName(String),

    // Persistence errors
    #[error("Storage error: {0}")]
    Storage(String),

    // Session errors
    #[error("Session closed")]
    SessionClosed,
}

impl BankError {
    /// Short name of the failure kind, as surfaced to the operator
    pub fn kind(&self) -> &'static str {
        match self {
            BankError::InvalidDuration(_) => "InvalidDuration",
            BankError::InvalidTimeFormat(_) => "InvalidTimeFormat",
            BankError::InvalidRate(_) => "InvalidRate",
            BankError::InvalidAmount(_) => "InvalidAmount",
            BankError::GroupNotFound(_) => "GroupNotFound",
            BankError::DuplicateGroup(_) => "DuplicateGroup",
            BankError::InvalidGroupName(_) => "InvalidGroupName",
            BankError::Storage(_) => "Storage",
            BankError::SessionClosed => "SessionClosed",
        }
    }
}

/// Result type for bank operations
pub type BankResult<T> = Result<T, BankError>;
