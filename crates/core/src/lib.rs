//! Core business logic for Paykit.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain state machines, balance arithmetic, and
//! derived-value recomputation live here. The collaborating service layer
//! persists state after each mutating call and supplies the current time
//! to every time-dependent operation.
//!
//! # Modules
//!
//! - `wallet` - Balance, holds, and daily send/top-up limits
//! - `transaction` - Money-movement records and their status lifecycle
//! - `invoice` - Itemized billing with derived totals and payment application
//! - `loan` - Flat-interest amortization, repayment, and delinquency

pub mod invoice;
pub mod loan;
pub mod transaction;
pub mod wallet;
