//! Loan error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::loan::types::LoanStatus;

/// Errors that can occur during loan operations.
#[derive(Debug, Error)]
pub enum LoanError {
    /// Attempted an invalid status transition.
    #[error("Invalid loan status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: LoanStatus,
        /// The attempted target status.
        to: LoanStatus,
    },

    /// Amount must be positive.
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Interest rate cannot be negative.
    #[error("Interest rate cannot be negative, got {0}")]
    InvalidInterestRate(Decimal),

    /// Term must be at least one month.
    #[error("Loan term must be at least 1 month, got {0}")]
    InvalidTerm(u32),

    /// A repayment arrived with no pending installment to apply it to.
    #[error("No pending installment to apply the repayment to")]
    NoPendingInstallment,

    /// Referenced installment does not exist in the schedule.
    #[error("Installment {0} not found in the repayment schedule")]
    InstallmentNotFound(u32),
}

impl LoanError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InvalidInterestRate(_) => "INVALID_INTEREST_RATE",
            Self::InvalidTerm(_) => "INVALID_TERM",
            Self::NoPendingInstallment => "NO_PENDING_INSTALLMENT",
            Self::InstallmentNotFound(_) => "INSTALLMENT_NOT_FOUND",
        }
    }
}
