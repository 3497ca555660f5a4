//! Wallet error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::wallet::types::WalletStatus;

/// Errors that can occur during wallet operations.
///
/// Every error is reported synchronously as the immediate result of the
/// operation; a failed operation leaves the wallet unchanged.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Amount must be positive.
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Operation would push the available balance negative.
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// The requested amount.
        requested: Decimal,
        /// The available (settled minus held) balance.
        available: Decimal,
    },

    /// Release exceeds currently held pending funds.
    #[error("Cannot release {requested}: only {held} held")]
    OverRelease {
        /// The requested release amount.
        requested: Decimal,
        /// The currently held pending balance.
        held: Decimal,
    },

    /// Commit exceeds currently held pending funds.
    #[error("Cannot commit {requested}: only {held} held")]
    OverCommit {
        /// The requested commit amount.
        requested: Decimal,
        /// The currently held pending balance.
        held: Decimal,
    },

    /// Attempted an invalid status transition.
    #[error("Invalid wallet status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: WalletStatus,
        /// The attempted target status.
        to: WalletStatus,
    },
}

impl WalletError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::OverRelease { .. } => "OVER_RELEASE",
            Self::OverCommit { .. } => "OVER_COMMIT",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
        }
    }
}
