//! Invoice domain types.

use paykit_shared::types::LineItemId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Invoice status lifecycle.
///
/// Draft → Sent is one-way; payment application drives
/// Unpaid/PartiallyPaid/Paid; Overdue is entered when the due date passes
/// without full payment. Cancelled and Refunded are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Created but not yet sent to the customer.
    Draft,
    /// Sent/shared with the customer.
    Sent,
    /// Due but not yet paid.
    Unpaid,
    /// Partial payment received.
    PartiallyPaid,
    /// Fully settled.
    Paid,
    /// Past due date without full payment.
    Overdue,
    /// Voided by the issuer.
    Cancelled,
    /// Payment reversed.
    Refunded,
}

impl InvoiceStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Unpaid => "unpaid",
            Self::PartiallyPaid => "partially_paid",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Discount applied to an invoice subtotal.
///
/// The two modes are mutually exclusive by construction: an invoice holds
/// exactly one `Discount`, so setting a percent discount structurally
/// replaces any flat one and vice versa.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum Discount {
    /// No discount.
    #[default]
    None,
    /// Flat amount off the subtotal.
    Flat(Decimal),
    /// Percentage of the subtotal (0–100).
    Percent(Decimal),
}

impl Discount {
    /// Computes the flat discount value for a given subtotal.
    #[must_use]
    pub fn amount_for(&self, subtotal: Decimal) -> Decimal {
        match self {
            Self::None => Decimal::ZERO,
            Self::Flat(amount) => *amount,
            Self::Percent(percent) => subtotal * *percent / Decimal::ONE_HUNDRED,
        }
    }
}

/// One invoice line item.
///
/// `total_price` is derived from quantity and unit price and maintained by
/// [`LineItem::recalculate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique identifier.
    pub id: LineItemId,
    /// What is being billed.
    pub description: String,
    /// Number of units.
    pub quantity: u32,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Derived: `quantity × unit_price`.
    pub total_price: Decimal,
    /// Optional unit label (e.g. "hr", "pc", "kg").
    pub unit: Option<String>,
}

impl LineItem {
    /// Creates a line item with its total derived.
    #[must_use]
    pub fn new(description: String, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            id: LineItemId::new(),
            description,
            quantity,
            unit_price,
            total_price: Decimal::from(quantity) * unit_price,
            unit: None,
        }
    }

    /// Sets the unit label.
    #[must_use]
    pub fn with_unit(mut self, unit: String) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Rederives `total_price` after a quantity or price edit.
    pub fn recalculate(&mut self) {
        self.total_price = Decimal::from(self.quantity) * self.unit_price;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_line_item_total_derived() {
        let item = LineItem::new("Consulting".to_string(), 3, dec!(150.00));
        assert_eq!(item.total_price, dec!(450.00));
    }

    #[test]
    fn test_line_item_recalculate() {
        let mut item = LineItem::new("Widgets".to_string(), 2, dec!(9.99));
        item.quantity = 5;
        item.recalculate();
        assert_eq!(item.total_price, dec!(49.95));
    }

    #[test]
    fn test_line_item_with_unit() {
        let item = LineItem::new("Labor".to_string(), 8, dec!(75)).with_unit("hr".to_string());
        assert_eq!(item.unit.as_deref(), Some("hr"));
    }

    #[test]
    fn test_discount_amount_for() {
        assert_eq!(Discount::None.amount_for(dec!(100)), Decimal::ZERO);
        assert_eq!(Discount::Flat(dec!(15)).amount_for(dec!(100)), dec!(15));
        assert_eq!(Discount::Percent(dec!(10)).amount_for(dec!(125)), dec!(12.5));
    }

    #[test]
    fn test_discount_default_is_none() {
        assert_eq!(Discount::default(), Discount::None);
    }

    #[test]
    fn test_discount_serde_representation() {
        let json = serde_json::to_string(&Discount::Percent(dec!(10))).unwrap();
        assert_eq!(json, r#"{"mode":"percent","value":"10"}"#);

        let parsed: Discount =
            serde_json::from_str(r#"{"mode":"flat","value":"15.50"}"#).unwrap();
        assert_eq!(parsed, Discount::Flat(dec!(15.50)));
    }

    #[test]
    fn test_status_serde_matches_as_str() {
        let json = serde_json::to_string(&InvoiceStatus::PartiallyPaid).unwrap();
        assert_eq!(json, format!("\"{}\"", InvoiceStatus::PartiallyPaid.as_str()));
    }
}
