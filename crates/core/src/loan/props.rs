//! Property-based tests for the loan schedule and repayment walk.

use chrono::{DateTime, Months, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::loan::amortizer::{Loan, CLOSURE_TOLERANCE};
use crate::loan::types::{DeclaredFinancials, LoanPurposeCategory, LoanStatus};
use paykit_shared::types::UserId;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

fn start_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()
}

fn approved_loan(amount: Decimal, rate_bps: u32, term: u32) -> Loan {
    let mut loan = Loan::apply(
        "LN-PROP-000001".to_string(),
        UserId::new(),
        "ACC-PROP".to_string(),
        "Prop Testing LLC".to_string(),
        amount,
        "Working capital".to_string(),
        LoanPurposeCategory::WorkingCapital,
        DeclaredFinancials {
            monthly_revenue: amount,
            annual_revenue: amount * Decimal::from(12),
            years_in_business: 3,
            existing_debt: Decimal::ZERO,
        },
        t0(),
    )
    .unwrap();
    loan.approve(
        amount,
        Decimal::new(i64::from(rate_bps), 4),
        term,
        start_date(),
        "admin-prop".to_string(),
        t0(),
    )
    .unwrap();
    loan
}

proptest! {
    /// The generated schedule has one installment per term month, dates
    /// advancing monthly, and scheduled amounts summing to the balance
    /// within the closure tolerance.
    #[test]
    fn prop_schedule_shape(
        amount_hundreds in 10u32..=5_000,
        rate_bps in 0u32..=3_000,
        term in 1u32..=60,
    ) {
        let amount = Decimal::from(amount_hundreds * 100);
        let loan = approved_loan(amount, rate_bps, term);

        prop_assert_eq!(loan.schedule.len(), term as usize);
        for (i, entry) in loan.schedule.iter().enumerate() {
            prop_assert_eq!(entry.installment_number as usize, i + 1);
            prop_assert_eq!(entry.due_date, start_date() + Months::new(i as u32));
        }

        let scheduled_total: Decimal =
            loan.schedule.iter().map(|e| e.scheduled_amount).sum();
        let residue = (loan.remaining_balance - scheduled_total).abs();
        prop_assert!(residue <= CLOSURE_TOLERANCE);
    }

    /// Paying every scheduled installment closes the loan, regardless of
    /// amount, rate, and term.
    #[test]
    fn prop_full_schedule_payment_closes_loan(
        amount_hundreds in 10u32..=1_000,
        rate_bps in 0u32..=2_000,
        term in 1u32..=36,
    ) {
        let amount = Decimal::from(amount_hundreds * 100);
        let mut loan = approved_loan(amount, rate_bps, term);
        loan.disburse(t0()).unwrap();

        let monthly = loan.monthly_repayment_amount;
        for i in 0..term {
            loan.record_repayment(monthly, format!("TXN-{i}"), t0()).unwrap();
        }

        prop_assert_eq!(loan.status, LoanStatus::Closed);
        prop_assert!(loan.remaining_balance <= CLOSURE_TOLERANCE);
        prop_assert_eq!(loan.next_repayment_due_at, None);
        prop_assert_eq!(loan.remaining_installments(), 0);
    }

    /// The third missed payment forces Defaulted; fewer leave the loan
    /// Active but delinquent.
    #[test]
    fn prop_default_on_third_miss(misses in 1u32..=3) {
        let mut loan = approved_loan(Decimal::from(10_000), 600, 12);
        loan.disburse(t0()).unwrap();

        for n in 1..=misses {
            loan.record_missed_payment(n, t0()).unwrap();
        }

        prop_assert!(loan.is_delinquent);
        prop_assert_eq!(loan.missed_payments, misses);
        if misses >= 3 {
            prop_assert_eq!(loan.status, LoanStatus::Defaulted);
        } else {
            prop_assert_eq!(loan.status, LoanStatus::Active);
        }
    }

    /// Running balances stay non-negative and consistent under arbitrary
    /// repayment amounts.
    #[test]
    fn prop_balances_never_negative(
        payments in prop::collection::vec(1u64..=200_000, 1..12),
    ) {
        let mut loan = approved_loan(Decimal::from(10_000), 800, 12);
        loan.disburse(t0()).unwrap();

        let mut expected_repaid = Decimal::ZERO;
        for (i, cents) in payments.into_iter().enumerate() {
            let amount = Decimal::new(cents as i64, 2);
            if loan.record_repayment(amount, format!("TXN-{i}"), t0()).is_err() {
                break;
            }
            expected_repaid += amount;
            prop_assert!(loan.remaining_balance >= Decimal::ZERO);
            prop_assert!(loan.principal_remaining >= Decimal::ZERO);
            prop_assert_eq!(loan.total_repaid, expected_repaid);
        }
    }
}
