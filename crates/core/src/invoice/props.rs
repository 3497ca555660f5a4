//! Property-based tests for the invoice derivation chain.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::invoice::ledger::Invoice;
use crate::invoice::types::{Discount, LineItem};
use paykit_shared::types::UserId;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
}

fn test_invoice() -> Invoice {
    Invoice::new(
        "INV-PROP-000001".to_string(),
        UserId::new(),
        "ACC-PROP".to_string(),
        "Prop Testing LLC".to_string(),
        "Customer".to_string(),
        "customer@example.com".to_string(),
        30,
        t0(),
    )
}

/// Cents in 0.01..=500.00, exact in `Decimal`.
fn money_strategy() -> impl Strategy<Value = Decimal> {
    (1u64..=50_000).prop_map(|cents| Decimal::new(cents as i64, 2))
}

fn discount_strategy() -> impl Strategy<Value = Discount> {
    prop_oneof![
        Just(Discount::None),
        money_strategy().prop_map(Discount::Flat),
        (0u32..=100).prop_map(|p| Discount::Percent(Decimal::from(p))),
    ]
}

fn items_strategy() -> impl Strategy<Value = Vec<(u32, Decimal)>> {
    prop::collection::vec((1u32..=20, money_strategy()), 1..8)
}

proptest! {
    /// The derivation chain holds after arbitrary item/discount/tax setup.
    #[test]
    fn prop_totals_follow_derivation_chain(
        items in items_strategy(),
        discount in discount_strategy(),
        tax_bps in 0u32..=3000,
    ) {
        let mut invoice = test_invoice();
        for (quantity, unit_price) in items {
            invoice.add_item(
                LineItem::new("Item".to_string(), quantity, unit_price),
                t0(),
            );
        }
        invoice.set_discount(discount, t0()).unwrap();
        invoice.set_tax_rate(Decimal::new(i64::from(tax_bps), 4), t0()).unwrap();

        let after_discount = invoice.subtotal - invoice.discount_amount;
        prop_assert_eq!(invoice.tax_amount, after_discount * invoice.tax_rate);
        prop_assert_eq!(invoice.total_amount, after_discount + invoice.tax_amount);
        prop_assert_eq!(invoice.amount_due, invoice.total_amount - invoice.amount_paid);
        prop_assert_eq!(
            invoice.subtotal,
            invoice.items.iter().map(|i| i.total_price).sum::<Decimal>()
        );
    }

    /// Payments only ever shrink the amount due, and the running totals
    /// stay consistent after every application.
    #[test]
    fn prop_payments_monotonically_reduce_amount_due(
        unit_price in money_strategy(),
        payments in prop::collection::vec(money_strategy(), 1..6),
    ) {
        let mut invoice = test_invoice();
        invoice.add_item(LineItem::new("Item".to_string(), 10, unit_price), t0());

        let mut previous_due = invoice.amount_due;
        for (i, payment) in payments.into_iter().enumerate() {
            invoice
                .record_payment(payment, format!("TXN-{i}"), t0())
                .unwrap();
            prop_assert!(invoice.amount_due < previous_due);
            prop_assert_eq!(
                invoice.amount_due,
                invoice.total_amount - invoice.amount_paid
            );
            previous_due = invoice.amount_due;
        }
    }

    /// Settlement status is exactly `amount_due <= 0` after any payment.
    #[test]
    fn prop_paid_iff_amount_due_non_positive(
        unit_price in money_strategy(),
        payment in money_strategy(),
    ) {
        let mut invoice = test_invoice();
        invoice.add_item(LineItem::new("Item".to_string(), 1, unit_price), t0());
        invoice.record_payment(payment, "TXN-1".to_string(), t0()).unwrap();

        use crate::invoice::types::InvoiceStatus;
        if invoice.amount_due <= Decimal::ZERO {
            prop_assert_eq!(invoice.status, InvoiceStatus::Paid);
        } else {
            prop_assert_eq!(invoice.status, InvoiceStatus::PartiallyPaid);
        }
    }
}
