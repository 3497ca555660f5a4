//! Invoice error types.

use paykit_shared::types::LineItemId;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::invoice::types::InvoiceStatus;

/// Errors that can occur during invoice operations.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// Attempted an invalid status transition.
    #[error("Invalid invoice status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: InvoiceStatus,
        /// The attempted target status.
        to: InvoiceStatus,
    },

    /// Line item not found.
    #[error("Line item not found: {0}")]
    ItemNotFound(LineItemId),

    /// Amount must be positive.
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Flat discount cannot be negative.
    #[error("Discount amount cannot be negative, got {0}")]
    InvalidDiscountAmount(Decimal),

    /// Percent discount must lie within 0–100.
    #[error("Discount percent must be between 0 and 100, got {0}")]
    InvalidDiscountPercent(Decimal),

    /// Tax rate cannot be negative.
    #[error("Tax rate cannot be negative, got {0}")]
    InvalidTaxRate(Decimal),
}

impl InvoiceError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::ItemNotFound(_) => "ITEM_NOT_FOUND",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InvalidDiscountAmount(_) => "INVALID_DISCOUNT_AMOUNT",
            Self::InvalidDiscountPercent(_) => "INVALID_DISCOUNT_PERCENT",
            Self::InvalidTaxRate(_) => "INVALID_TAX_RATE",
        }
    }
}
