//! Transaction records: one money-movement event each.
//!
//! A record is created Pending and moves through the checked transition
//! table in [`crate::transaction::types`]. `net_amount` is recomputed
//! whenever the fee changes; it is never set directly.

use chrono::{DateTime, Utc};
use paykit_shared::types::{Currency, PaymentMethodId, TransactionId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transaction::error::TransactionError;
use crate::transaction::types::{TransactionStatus, TransactionType};

/// A single money-movement record.
///
/// Other entities reference a record only by its `reference_number`;
/// the record itself never reaches into wallets, invoices, or loans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique identifier.
    pub id: TransactionId,
    /// Human-readable reference (e.g. "TXN-20240101-000001"), caller-generated.
    pub reference_number: String,
    /// Sending user.
    pub sender: UserId,
    /// Sender's account identifier.
    pub sender_account: String,
    /// Receiving user.
    pub receiver: UserId,
    /// Receiver's account identifier.
    pub receiver_account: String,
    /// Gross amount moved.
    pub amount: Decimal,
    /// Platform fee deducted from the amount.
    pub fee: Decimal,
    /// Amount received after the fee: `amount - fee`. Derived.
    pub net_amount: Decimal,
    /// Transaction currency.
    pub currency: Currency,
    /// Movement classification.
    pub transaction_type: TransactionType,
    /// Current lifecycle status.
    pub status: TransactionStatus,
    /// Optional memo from the sender.
    pub note: Option<String>,
    /// Populated when the record is marked failed.
    pub failure_reason: Option<String>,
    /// Linked invoice number, for invoice payments.
    pub invoice_number: Option<String>,
    /// Linked loan reference, for disbursements and repayments.
    pub loan_reference: Option<String>,
    /// External payment method used; None means the wallet itself.
    pub payment_method: Option<PaymentMethodId>,
    /// Expiry instant; meaningful only when `transaction_type` is MoneyRequest.
    pub request_expires_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Settlement timestamp, stamped on completion.
    pub completed_at: Option<DateTime<Utc>>,
}

impl TransactionRecord {
    /// Creates a new Pending record with zero fee.
    pub fn new(
        reference_number: String,
        sender: UserId,
        sender_account: String,
        receiver: UserId,
        receiver_account: String,
        amount: Decimal,
        transaction_type: TransactionType,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, TransactionError> {
        if amount <= Decimal::ZERO {
            return Err(TransactionError::InvalidAmount(amount));
        }
        Ok(Self {
            id: TransactionId::new(),
            reference_number,
            sender,
            sender_account,
            receiver,
            receiver_account,
            amount,
            fee: Decimal::ZERO,
            net_amount: amount,
            currency: Currency::default(),
            transaction_type,
            status: TransactionStatus::Pending,
            note,
            failure_reason: None,
            invoice_number: None,
            loan_reference: None,
            payment_method: None,
            request_expires_at: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        })
    }

    /// Sets the expiry instant for a money request.
    #[must_use]
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.request_expires_at = Some(expires_at);
        self
    }

    /// Applies a platform fee and recomputes the net amount.
    pub fn apply_fee(&mut self, fee: Decimal, now: DateTime<Utc>) -> Result<(), TransactionError> {
        if fee < Decimal::ZERO {
            return Err(TransactionError::NegativeFee(fee));
        }
        if fee > self.amount {
            return Err(TransactionError::FeeExceedsAmount {
                fee,
                amount: self.amount,
            });
        }
        self.fee = fee;
        self.net_amount = self.amount - fee;
        self.updated_at = now;
        Ok(())
    }

    /// Moves the record into gateway processing.
    pub fn mark_processing(&mut self, now: DateTime<Utc>) -> Result<(), TransactionError> {
        self.transition(TransactionStatus::Processing, now)
    }

    /// Settles the record and stamps the completion time.
    pub fn mark_completed(&mut self, now: DateTime<Utc>) -> Result<(), TransactionError> {
        self.transition(TransactionStatus::Completed, now)?;
        self.completed_at = Some(now);
        Ok(())
    }

    /// Fails the record with a reason.
    pub fn mark_failed(
        &mut self,
        reason: String,
        now: DateTime<Utc>,
    ) -> Result<(), TransactionError> {
        if reason.trim().is_empty() {
            return Err(TransactionError::FailureReasonRequired);
        }
        self.transition(TransactionStatus::Failed, now)?;
        self.failure_reason = Some(reason);
        Ok(())
    }

    /// Cancels the record before completion.
    pub fn mark_cancelled(&mut self, now: DateTime<Utc>) -> Result<(), TransactionError> {
        self.transition(TransactionStatus::Cancelled, now)
    }

    /// Marks a money request declined by the receiver.
    pub fn mark_declined(&mut self, now: DateTime<Utc>) -> Result<(), TransactionError> {
        self.transition(TransactionStatus::Declined, now)
    }

    /// Marks a money request expired without response.
    pub fn mark_expired(&mut self, now: DateTime<Utc>) -> Result<(), TransactionError> {
        self.transition(TransactionStatus::Expired, now)
    }

    /// Returns true if this is a money request past its expiry.
    #[must_use]
    pub fn is_request_expired(&self, now: DateTime<Utc>) -> bool {
        self.transaction_type == TransactionType::MoneyRequest
            && self.request_expires_at.is_some_and(|at| now > at)
    }

    /// Returns true if the record is awaiting action.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == TransactionStatus::Pending
    }

    /// Returns true if the record settled successfully.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }

    /// Returns true if the record failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == TransactionStatus::Failed
    }

    /// Returns true if the record was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.status == TransactionStatus::Cancelled
    }

    fn transition(
        &mut self,
        to: TransactionStatus,
        now: DateTime<Utc>,
    ) -> Result<(), TransactionError> {
        if !TransactionStatus::can_transition(self.status, to) {
            return Err(TransactionError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.updated_at = now;
        Ok(())
    }
}
