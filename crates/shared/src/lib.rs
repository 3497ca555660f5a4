//! Shared types for Paykit.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Currency codes for monetary amounts
//!
//! Human-readable reference numbers (wallet number, transaction reference,
//! invoice number, loan reference) are opaque strings generated by the
//! calling service layer; the core never validates their format.

pub mod types;

pub use types::{
    Currency, InvoiceId, LineItemId, LoanId, PaymentMethodId, TransactionId, UserId, WalletId,
};
