//! Business lending with flat-interest amortization.
//!
//! This module implements the loan lifecycle:
//! - Application, review, approval/rejection, cancellation, disbursement
//! - Flat-interest schedule generation at approval
//! - Repayments applied to the first pending installment
//! - Delinquency tracking and default after repeated misses

pub mod amortizer;
pub mod error;
pub mod types;

#[cfg(test)]
mod props;

pub use amortizer::Loan;
pub use error::LoanError;
pub use types::{
    DeclaredFinancials, Installment, InstallmentStatus, LoanPurposeCategory, LoanStatus,
};
