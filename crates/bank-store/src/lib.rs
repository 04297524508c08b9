//! The Bank Store - ledger persistence
//!
//! Loads the ledger once at startup and saves it on operator command.
//! The stored layout is a flat table of four named columns:
//! `Group Name`, `Rank`, `Ans. Questions`, `Wealth`.

pub mod csv_store;

pub use csv_store::*;

use bank_core::BankResult;
use bank_ledger::Ledger;

/// Persistence collaborator
pub trait LedgerStore: Send {
    /// Load the stored ledger; an absent or empty source is an empty ledger
    fn load(&self) -> BankResult<Ledger>;

    /// Replace the stored ledger with this one
    fn save(&self, ledger: &Ledger) -> BankResult<()>;
}
