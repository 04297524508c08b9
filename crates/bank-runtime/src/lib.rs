//! The Bank Runtime - session orchestration
//!
//! This crate wires the ledger to the inflation countdown:
//! 1. Operator commands are parsed into typed requests
//! 2. The session task serialises requests and one-second ticks
//! 3. The controller mutates the ledger or the timer
//! 4. Timer expiry inflates every balance
//! 5. Presenters are notified with a fresh snapshot

pub mod command;
pub mod config;
pub mod controller;
pub mod presenter;
pub mod session;
pub mod telemetry;

pub use command::*;
pub use config::*;
pub use controller::*;
pub use presenter::*;
pub use session::*;
pub use telemetry::*;
