//! Invoice derivation chain and payment application.
//!
//! Every field from `subtotal` through `amount_due` is a pure function of
//! the line items, discount, tax rate, and `amount_paid`. The single
//! derivation function [`Invoice::recalculate_totals`] runs after every
//! mutation; no mutator writes a derived field by hand.

use chrono::{DateTime, Days, Utc};
use paykit_shared::types::{Currency, InvoiceId, LineItemId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::invoice::error::InvoiceError;
use crate::invoice::types::{Discount, InvoiceStatus, LineItem};

/// A business invoice with itemized billing and payment tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier.
    pub id: InvoiceId,
    /// Human-readable invoice number (e.g. "INV-2024-000001"), caller-generated.
    pub invoice_number: String,
    /// Issuing business user.
    pub issuer: UserId,
    /// Issuer's account identifier.
    pub issuer_account: String,
    /// Issuer's business name.
    pub issuer_business_name: String,
    /// Customer display name.
    pub customer_name: String,
    /// Customer email.
    pub customer_email: String,
    /// Customer's account identifier; None if not a platform user.
    pub customer_account: Option<String>,
    /// Ordered line items.
    pub items: Vec<LineItem>,
    /// Derived: sum of line item totals.
    pub subtotal: Decimal,
    /// Active discount mode.
    pub discount: Discount,
    /// Derived: flat value of the active discount.
    pub discount_amount: Decimal,
    /// Tax rate as a fraction (e.g. 0.08 for 8%).
    pub tax_rate: Decimal,
    /// Derived: `(subtotal - discount) × tax_rate`.
    pub tax_amount: Decimal,
    /// Derived: `subtotal - discount + tax_amount`.
    pub total_amount: Decimal,
    /// Cumulative amount received.
    pub amount_paid: Decimal,
    /// Derived: `total_amount - amount_paid`.
    pub amount_due: Decimal,
    /// Invoice currency.
    pub currency: Currency,
    /// Payment terms (e.g. 30 for "Net 30").
    pub payment_terms_days: u32,
    /// Current lifecycle status.
    pub status: InvoiceStatus,
    /// Transaction reference of the most recent payment.
    pub linked_transaction_ref: Option<String>,
    /// Issue timestamp.
    pub issued_at: DateTime<Utc>,
    /// Derived from issue time and payment terms.
    pub due_at: DateTime<Utc>,
    /// Settlement timestamp.
    pub paid_at: Option<DateTime<Utc>>,
    /// Cancellation timestamp.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Whether the customer has been notified.
    pub notification_sent: bool,
    /// When the customer was notified.
    pub notification_sent_at: Option<DateTime<Utc>>,
    /// Number of reminders sent.
    pub reminder_count: u32,
    /// When the last reminder was sent.
    pub last_reminder_sent_at: Option<DateTime<Utc>>,
}

impl Invoice {
    /// Creates a Draft invoice with no items.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        invoice_number: String,
        issuer: UserId,
        issuer_account: String,
        issuer_business_name: String,
        customer_name: String,
        customer_email: String,
        payment_terms_days: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: InvoiceId::new(),
            invoice_number,
            issuer,
            issuer_account,
            issuer_business_name,
            customer_name,
            customer_email,
            customer_account: None,
            items: Vec::new(),
            subtotal: Decimal::ZERO,
            discount: Discount::None,
            discount_amount: Decimal::ZERO,
            tax_rate: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            amount_paid: Decimal::ZERO,
            amount_due: Decimal::ZERO,
            currency: Currency::default(),
            payment_terms_days,
            status: InvoiceStatus::Draft,
            linked_transaction_ref: None,
            issued_at: now,
            due_at: now + Days::new(u64::from(payment_terms_days)),
            paid_at: None,
            cancelled_at: None,
            updated_at: now,
            notification_sent: false,
            notification_sent_at: None,
            reminder_count: 0,
            last_reminder_sent_at: None,
        }
    }

    /// Adds a line item and rederives the totals.
    pub fn add_item(&mut self, item: LineItem, now: DateTime<Utc>) {
        self.items.push(item);
        self.recalculate_totals(now);
    }

    /// Removes a line item by ID and rederives the totals.
    pub fn remove_item(&mut self, id: LineItemId, now: DateTime<Utc>) -> Result<(), InvoiceError> {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return Err(InvoiceError::ItemNotFound(id));
        }
        self.recalculate_totals(now);
        Ok(())
    }

    /// Sets the discount mode and rederives the totals.
    pub fn set_discount(
        &mut self,
        discount: Discount,
        now: DateTime<Utc>,
    ) -> Result<(), InvoiceError> {
        match discount {
            Discount::Flat(amount) if amount < Decimal::ZERO => {
                return Err(InvoiceError::InvalidDiscountAmount(amount));
            }
            Discount::Percent(percent)
                if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED =>
            {
                return Err(InvoiceError::InvalidDiscountPercent(percent));
            }
            _ => {}
        }
        self.discount = discount;
        self.recalculate_totals(now);
        Ok(())
    }

    /// Sets the tax rate and rederives the totals.
    pub fn set_tax_rate(&mut self, rate: Decimal, now: DateTime<Utc>) -> Result<(), InvoiceError> {
        if rate < Decimal::ZERO {
            return Err(InvoiceError::InvalidTaxRate(rate));
        }
        self.tax_rate = rate;
        self.recalculate_totals(now);
        Ok(())
    }

    /// Updates the payment terms and rederives the due date.
    pub fn set_payment_terms(&mut self, days: u32, now: DateTime<Utc>) {
        self.payment_terms_days = days;
        self.due_at = self.issued_at + Days::new(u64::from(days));
        self.updated_at = now;
    }

    /// Rederives every financial field from the line items, discount, tax
    /// rate, and cumulative payments.
    ///
    /// Also the consistency hook to call after a bulk field restore from
    /// storage, before the invoice is used.
    pub fn recalculate_totals(&mut self, now: DateTime<Utc>) {
        self.subtotal = self.items.iter().map(|item| item.total_price).sum();
        self.discount_amount = self.discount.amount_for(self.subtotal);
        let after_discount = self.subtotal - self.discount_amount;
        self.tax_amount = after_discount * self.tax_rate;
        self.total_amount = after_discount + self.tax_amount;
        self.amount_due = self.total_amount - self.amount_paid;
        self.updated_at = now;
    }

    /// Records a payment against this invoice.
    ///
    /// Settlement is detected by exact comparison: `Decimal` addition is
    /// exact, so no float tolerance is needed.
    pub fn record_payment(
        &mut self,
        amount: Decimal,
        transaction_ref: String,
        now: DateTime<Utc>,
    ) -> Result<(), InvoiceError> {
        if amount <= Decimal::ZERO {
            return Err(InvoiceError::InvalidAmount(amount));
        }
        self.amount_paid += amount;
        self.amount_due = self.total_amount - self.amount_paid;
        self.linked_transaction_ref = Some(transaction_ref);

        if self.amount_due <= Decimal::ZERO {
            self.status = InvoiceStatus::Paid;
            self.paid_at = Some(now);
        } else {
            self.status = InvoiceStatus::PartiallyPaid;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Returns true if the due date has passed without full payment.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        now > self.due_at
            && matches!(
                self.status,
                InvoiceStatus::Unpaid | InvoiceStatus::PartiallyPaid | InvoiceStatus::Sent
            )
    }

    /// Transitions to Overdue when [`Invoice::is_overdue`] holds. Idempotent.
    pub fn check_and_mark_overdue(&mut self, now: DateTime<Utc>) {
        if self.is_overdue(now) {
            self.status = InvoiceStatus::Overdue;
            self.updated_at = now;
        }
    }

    /// Sends a Draft invoice to the customer. One-way.
    pub fn mark_sent(&mut self, now: DateTime<Utc>) -> Result<(), InvoiceError> {
        if self.status != InvoiceStatus::Draft {
            return Err(InvoiceError::InvalidTransition {
                from: self.status,
                to: InvoiceStatus::Sent,
            });
        }
        self.status = InvoiceStatus::Sent;
        self.notification_sent = true;
        self.notification_sent_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Voids the invoice at the issuer's discretion. Terminal.
    pub fn cancel(&mut self, now: DateTime<Utc>) {
        self.status = InvoiceStatus::Cancelled;
        self.cancelled_at = Some(now);
        self.updated_at = now;
    }

    /// Records that a payment reminder went out to the customer.
    pub fn record_reminder_sent(&mut self, now: DateTime<Utc>) {
        self.reminder_count += 1;
        self.last_reminder_sent_at = Some(now);
        self.updated_at = now;
    }
}
