//! Wallet balance and daily-limit logic.
//!
//! This module implements the wallet ledger:
//! - Balance arithmetic (credit, debit, hold, release, commit)
//! - Daily send/top-up limits with lazy midnight reset
//! - Wallet status lifecycle (Active, Frozen, Closed)
//! - Error types for wallet operations

pub mod error;
pub mod ledger;
pub mod types;

#[cfg(test)]
mod props;

pub use error::WalletError;
pub use types::{Wallet, WalletStatus};
