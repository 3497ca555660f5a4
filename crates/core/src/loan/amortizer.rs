//! Loan lifecycle and repayment schedule management.
//!
//! Approval computes flat interest (`approved × rate × term/12`), derives an
//! equal-installment schedule, and seeds the running balances. Repayments
//! walk the schedule in order and apply to the first pending installment.
//! Monthly amounts are kept at full `Decimal` precision; the 0.01 closure
//! tolerance absorbs the residue of the equal division.

use chrono::{DateTime, Months, Utc};
use paykit_shared::types::{LoanId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::loan::error::LoanError;
use crate::loan::types::{
    DeclaredFinancials, Installment, InstallmentStatus, LoanPurposeCategory, LoanStatus,
};

/// Remaining balance at or below this closes the loan.
pub const CLOSURE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// A business loan: application, approved terms, schedule, and balances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    /// Unique identifier.
    pub id: LoanId,
    /// Human-readable reference (e.g. "LN-2024-000001"), caller-generated.
    pub loan_reference: String,
    /// Borrowing user.
    pub borrower: UserId,
    /// Borrower's account identifier.
    pub borrower_account: String,
    /// Borrower's business name.
    pub borrower_business_name: String,
    /// Amount asked for at application.
    pub requested_amount: Decimal,
    /// Free-text reason for the loan.
    pub purpose: String,
    /// Purpose category.
    pub purpose_category: LoanPurposeCategory,
    /// Financial snapshot declared at application.
    pub financials: DeclaredFinancials,
    /// Amount granted at approval.
    pub approved_amount: Decimal,
    /// Annual interest rate as a fraction (e.g. 0.12 for 12%).
    pub interest_rate: Decimal,
    /// Loan duration in months.
    pub term_months: u32,
    /// Scheduled amount per installment, full precision.
    pub monthly_repayment_amount: Decimal,
    /// First installment due date.
    pub repayment_start_date: Option<DateTime<Utc>>,
    /// Principal not yet repaid, clamped at zero.
    pub principal_remaining: Decimal,
    /// Cumulative repayments received.
    pub total_repaid: Decimal,
    /// Principal plus interest still owed, clamped at zero.
    pub remaining_balance: Decimal,
    /// Repayment schedule, ascending by installment number.
    pub schedule: Vec<Installment>,
    /// Current lifecycle status.
    pub status: LoanStatus,
    /// Why the application was denied.
    pub rejection_reason: Option<String>,
    /// Reviewing admin identifier.
    pub reviewed_by: Option<String>,
    /// Application timestamp.
    pub applied_at: DateTime<Utc>,
    /// Review decision timestamp.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Disbursement timestamp.
    pub disbursed_at: Option<DateTime<Utc>>,
    /// Closure timestamp.
    pub closed_at: Option<DateTime<Utc>>,
    /// Due date of the next pending installment; None when none remain.
    pub next_repayment_due_at: Option<DateTime<Utc>>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Count of missed installments.
    pub missed_payments: u32,
    /// Whether the borrower has missed any payment.
    pub is_delinquent: bool,
}

impl Loan {
    /// Submits a loan application in the Applied state.
    #[allow(clippy::too_many_arguments)]
    pub fn apply(
        loan_reference: String,
        borrower: UserId,
        borrower_account: String,
        borrower_business_name: String,
        requested_amount: Decimal,
        purpose: String,
        purpose_category: LoanPurposeCategory,
        financials: DeclaredFinancials,
        now: DateTime<Utc>,
    ) -> Result<Self, LoanError> {
        if requested_amount <= Decimal::ZERO {
            return Err(LoanError::InvalidAmount(requested_amount));
        }
        Ok(Self {
            id: LoanId::new(),
            loan_reference,
            borrower,
            borrower_account,
            borrower_business_name,
            requested_amount,
            purpose,
            purpose_category,
            financials,
            approved_amount: Decimal::ZERO,
            interest_rate: Decimal::ZERO,
            term_months: 0,
            monthly_repayment_amount: Decimal::ZERO,
            repayment_start_date: None,
            principal_remaining: Decimal::ZERO,
            total_repaid: Decimal::ZERO,
            remaining_balance: Decimal::ZERO,
            schedule: Vec::new(),
            status: LoanStatus::Applied,
            rejection_reason: None,
            reviewed_by: None,
            applied_at: now,
            reviewed_at: None,
            disbursed_at: None,
            closed_at: None,
            next_repayment_due_at: None,
            updated_at: now,
            missed_payments: 0,
            is_delinquent: false,
        })
    }

    /// Moves an Applied loan under admin review.
    pub fn start_review(&mut self, reviewer: String, now: DateTime<Utc>) -> Result<(), LoanError> {
        self.transition_status(LoanStatus::UnderReview, now)?;
        self.reviewed_by = Some(reviewer);
        Ok(())
    }

    /// Approves the loan with the given terms and generates the repayment
    /// schedule.
    ///
    /// Only valid from Applied or UnderReview, so an already-approved loan
    /// cannot have its schedule regenerated out from under recorded
    /// repayments.
    pub fn approve(
        &mut self,
        approved_amount: Decimal,
        interest_rate: Decimal,
        term_months: u32,
        repayment_start: DateTime<Utc>,
        reviewer: String,
        now: DateTime<Utc>,
    ) -> Result<(), LoanError> {
        if approved_amount <= Decimal::ZERO {
            return Err(LoanError::InvalidAmount(approved_amount));
        }
        if interest_rate < Decimal::ZERO {
            return Err(LoanError::InvalidInterestRate(interest_rate));
        }
        if term_months == 0 {
            return Err(LoanError::InvalidTerm(term_months));
        }
        self.transition_status(LoanStatus::Approved, now)?;

        let term = Decimal::from(term_months);
        let total_interest = approved_amount * interest_rate * term / MONTHS_PER_YEAR;
        let total_payable = approved_amount + total_interest;

        self.approved_amount = approved_amount;
        self.interest_rate = interest_rate;
        self.term_months = term_months;
        self.repayment_start_date = Some(repayment_start);
        self.monthly_repayment_amount = total_payable / term;
        self.principal_remaining = approved_amount;
        self.remaining_balance = total_payable;
        self.reviewed_by = Some(reviewer);
        self.reviewed_at = Some(now);

        self.schedule = (1..=term_months)
            .map(|i| {
                Installment::new(
                    i,
                    repayment_start + Months::new(i - 1),
                    self.monthly_repayment_amount,
                )
            })
            .collect();
        self.next_repayment_due_at = Some(repayment_start);
        Ok(())
    }

    /// Denies the application. Terminal.
    pub fn reject(
        &mut self,
        reason: String,
        reviewer: String,
        now: DateTime<Utc>,
    ) -> Result<(), LoanError> {
        self.transition_status(LoanStatus::Rejected, now)?;
        self.rejection_reason = Some(reason);
        self.reviewed_by = Some(reviewer);
        self.reviewed_at = Some(now);
        Ok(())
    }

    /// Cancels the application before disbursement. Terminal.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<(), LoanError> {
        self.transition_status(LoanStatus::Cancelled, now)
    }

    /// Marks the loan as disbursed and starts repayment.
    pub fn disburse(&mut self, now: DateTime<Utc>) -> Result<(), LoanError> {
        self.transition_status(LoanStatus::Active, now)?;
        self.disbursed_at = Some(now);
        Ok(())
    }

    /// Records a repayment against the first pending installment.
    ///
    /// Only an Active loan accepts repayments; closure stays a legal
    /// Active → Closed move. A payment of at least the scheduled amount
    /// marks the installment Paid, anything less marks it Partial. The
    /// loan closes when the remaining balance drops to
    /// [`CLOSURE_TOLERANCE`] or below.
    pub fn record_repayment(
        &mut self,
        amount: Decimal,
        transaction_ref: String,
        now: DateTime<Utc>,
    ) -> Result<(), LoanError> {
        if self.status != LoanStatus::Active {
            return Err(LoanError::InvalidTransition {
                from: self.status,
                to: LoanStatus::Closed,
            });
        }
        if amount <= Decimal::ZERO {
            return Err(LoanError::InvalidAmount(amount));
        }
        let entry = self
            .schedule
            .iter_mut()
            .find(|e| e.status == InstallmentStatus::Pending)
            .ok_or(LoanError::NoPendingInstallment)?;

        entry.paid_amount = amount;
        entry.paid_at = Some(now);
        entry.transaction_ref = Some(transaction_ref);
        entry.status = if amount >= entry.scheduled_amount {
            InstallmentStatus::Paid
        } else {
            InstallmentStatus::Partial
        };

        self.total_repaid += amount;
        self.remaining_balance = (self.remaining_balance - amount).max(Decimal::ZERO);
        self.principal_remaining = (self.principal_remaining - amount).max(Decimal::ZERO);
        self.update_next_repayment_due();

        if self.remaining_balance <= CLOSURE_TOLERANCE {
            self.status = LoanStatus::Closed;
            self.closed_at = Some(now);
        }
        self.updated_at = now;
        Ok(())
    }

    /// Marks an installment as missed and updates delinquency.
    ///
    /// Three or more missed payments force the loan into Defaulted.
    pub fn record_missed_payment(
        &mut self,
        installment_number: u32,
        now: DateTime<Utc>,
    ) -> Result<(), LoanError> {
        let entry = self
            .schedule
            .iter_mut()
            .find(|e| e.installment_number == installment_number)
            .ok_or(LoanError::InstallmentNotFound(installment_number))?;
        entry.status = InstallmentStatus::Missed;

        self.missed_payments += 1;
        self.is_delinquent = true;
        if self.missed_payments >= 3 {
            self.status = LoanStatus::Defaulted;
        }
        self.update_next_repayment_due();
        self.updated_at = now;
        Ok(())
    }

    /// Forgives a pending installment. Waived installments are skipped by
    /// the repayment walk; non-pending installments are left untouched.
    pub fn waive_installment(
        &mut self,
        installment_number: u32,
        now: DateTime<Utc>,
    ) -> Result<(), LoanError> {
        let entry = self
            .schedule
            .iter_mut()
            .find(|e| e.installment_number == installment_number)
            .ok_or(LoanError::InstallmentNotFound(installment_number))?;
        if entry.status == InstallmentStatus::Pending {
            entry.status = InstallmentStatus::Waived;
            self.update_next_repayment_due();
        }
        self.updated_at = now;
        Ok(())
    }

    /// Number of fully paid installments.
    #[must_use]
    pub fn paid_installments(&self) -> usize {
        self.schedule
            .iter()
            .filter(|e| e.status == InstallmentStatus::Paid)
            .count()
    }

    /// Number of installments still pending.
    #[must_use]
    pub fn remaining_installments(&self) -> usize {
        self.schedule
            .iter()
            .filter(|e| e.status == InstallmentStatus::Pending)
            .count()
    }

    fn update_next_repayment_due(&mut self) {
        self.next_repayment_due_at = self
            .schedule
            .iter()
            .find(|e| e.status == InstallmentStatus::Pending)
            .map(|e| e.due_date);
    }

    fn transition_status(&mut self, to: LoanStatus, now: DateTime<Utc>) -> Result<(), LoanError> {
        if !LoanStatus::can_transition(self.status, to) {
            return Err(LoanError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.updated_at = now;
        Ok(())
    }
}
