//! Money-movement records and their status lifecycle.
//!
//! This module implements the transaction record state machine:
//! - Type and status classification for every money movement
//! - A checked transition table (terminal statuses reject everything)
//! - Amount/fee/net derivation
//! - Money-request expiry detection

pub mod error;
pub mod record;
pub mod types;

pub use error::TransactionError;
pub use record::TransactionRecord;
pub use types::{TransactionStatus, TransactionType};
