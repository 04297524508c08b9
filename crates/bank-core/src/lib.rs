//! The Bank Core - Fundamental types and primitives
//!
//! This crate defines the types shared by every other crate of the session:
//! - Group identity and ledger rows (GroupName, Group)
//! - Currency and inflation primitives (Amount, InflationRate)
//! - Countdown durations in MM:SS form (Countdown)
//! - The error taxonomy (BankError)

pub mod error;
pub mod group;
pub mod money;
pub mod time;

pub use error::*;
pub use group::*;
pub use money::*;
pub use time::*;
