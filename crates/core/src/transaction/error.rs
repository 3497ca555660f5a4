//! Transaction error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::transaction::types::TransactionStatus;

/// Errors that can occur during transaction record operations.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// Attempted an invalid status transition.
    #[error("Invalid transaction status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: TransactionStatus,
        /// The attempted target status.
        to: TransactionStatus,
    },

    /// Amount must be positive.
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Fee cannot be negative.
    #[error("Fee cannot be negative, got {0}")]
    NegativeFee(Decimal),

    /// Fee exceeds the transaction amount.
    #[error("Fee {fee} exceeds transaction amount {amount}")]
    FeeExceedsAmount {
        /// The fee being applied.
        fee: Decimal,
        /// The transaction amount.
        amount: Decimal,
    },

    /// Failure reason is required but not provided.
    #[error("Failure reason is required")]
    FailureReasonRequired,
}

impl TransactionError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::NegativeFee(_) => "NEGATIVE_FEE",
            Self::FeeExceedsAmount { .. } => "FEE_EXCEEDS_AMOUNT",
            Self::FailureReasonRequired => "FAILURE_REASON_REQUIRED",
        }
    }
}
