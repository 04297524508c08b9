//! The Bank Time - inflation countdown
//!
//! This crate implements the countdown that drives inflation:
//! - Idle / Running / Stopped lifecycle
//! - One-second tick evaluation with MM:SS display updates
//! - Expiry callback followed by automatic restart
//! - Cooperative, flag-based stop

pub mod config;
pub mod countdown;

pub use config::*;
pub use countdown::*;
