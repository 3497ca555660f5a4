//! Itemized billing with derived totals.
//!
//! This module implements the invoice ledger:
//! - Line items and the subtotal → discount → tax → total derivation chain
//! - Structural discount exclusivity (flat XOR percent)
//! - Payment application and settlement detection
//! - Overdue detection and the Draft → Sent lifecycle

pub mod error;
pub mod ledger;
pub mod types;

#[cfg(test)]
mod props;

pub use error::InvoiceError;
pub use ledger::Invoice;
pub use types::{Discount, InvoiceStatus, LineItem};
