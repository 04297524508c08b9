//! The Bank Ledger - authoritative record of groups
//!
//! This crate implements the ledger engine:
//! - Group registry with unique names and stable display order
//! - Deposits, withdrawals and answered-question counting
//! - Uniform inflation across every balance
//! - Competition ranking by wealth

pub mod ledger;
pub mod rank;

pub use ledger::*;
pub use rank::*;
