//! Loan domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Loan lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// Application submitted, awaiting review.
    Applied,
    /// Under admin review.
    UnderReview,
    /// Approved, not yet disbursed.
    Approved,
    /// Application denied.
    Rejected,
    /// Disbursed, repayment ongoing.
    Active,
    /// Fully repaid.
    Closed,
    /// Declared in default after repeated missed payments.
    Defaulted,
    /// Cancelled by the applicant before disbursement.
    Cancelled,
}

impl LoanStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Active => "active",
            Self::Closed => "closed",
            Self::Defaulted => "defaulted",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if the status is terminal.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Rejected | Self::Closed | Self::Defaulted | Self::Cancelled
        )
    }

    /// Validates a status transition.
    #[must_use]
    pub fn can_transition(from: Self, to: Self) -> bool {
        match from {
            Self::Applied => matches!(
                to,
                Self::UnderReview | Self::Approved | Self::Rejected | Self::Cancelled
            ),
            Self::UnderReview => {
                matches!(to, Self::Approved | Self::Rejected | Self::Cancelled)
            }
            Self::Approved => matches!(to, Self::Active | Self::Cancelled),
            Self::Active => matches!(to, Self::Closed | Self::Defaulted),
            Self::Rejected | Self::Closed | Self::Defaulted | Self::Cancelled => false,
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Declared purpose of a business loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanPurposeCategory {
    /// Day-to-day operating funds.
    WorkingCapital,
    /// Machinery or equipment purchase.
    EquipmentPurchase,
    /// Stock purchase.
    Inventory,
    /// Business expansion.
    Expansion,
    /// Marketing spend.
    Marketing,
    /// Technology investment.
    Technology,
    /// Consolidating existing debt.
    DebtConsolidation,
    /// Property purchase or improvement.
    RealEstate,
    /// Anything else.
    Other,
}

/// Financial snapshot declared by the applicant at application time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclaredFinancials {
    /// Declared monthly revenue.
    pub monthly_revenue: Decimal,
    /// Declared annual revenue.
    pub annual_revenue: Decimal,
    /// Years the business has operated.
    pub years_in_business: u32,
    /// Other loans and liabilities declared.
    pub existing_debt: Decimal,
}

/// Per-installment repayment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    /// Not yet paid.
    Pending,
    /// Paid in full.
    Paid,
    /// Partially paid.
    Partial,
    /// Due date passed without payment.
    Missed,
    /// Forgiven by the lender.
    Waived,
}

/// One entry in a loan's repayment schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based position within the schedule.
    pub installment_number: u32,
    /// When this installment falls due.
    pub due_date: DateTime<Utc>,
    /// Amount scheduled for this installment.
    pub scheduled_amount: Decimal,
    /// Amount actually received.
    pub paid_amount: Decimal,
    /// When the payment landed.
    pub paid_at: Option<DateTime<Utc>>,
    /// Repayment status of this installment.
    pub status: InstallmentStatus,
    /// Transaction reference of the payment.
    pub transaction_ref: Option<String>,
}

impl Installment {
    /// Creates a pending installment.
    #[must_use]
    pub fn new(installment_number: u32, due_date: DateTime<Utc>, scheduled_amount: Decimal) -> Self {
        Self {
            installment_number,
            due_date,
            scheduled_amount,
            paid_amount: Decimal::ZERO,
            paid_at: None,
            status: InstallmentStatus::Pending,
            transaction_ref: None,
        }
    }

    /// Returns true if this installment is pending and past its due date.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == InstallmentStatus::Pending && now > self.due_date
    }
}
