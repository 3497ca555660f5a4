//! Transaction domain types.

use serde::{Deserialize, Serialize};

/// Transaction type classification.
///
/// Categorizes every money movement on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Peer-to-peer payment.
    Send,
    /// Request for money from another user.
    MoneyRequest,
    /// External card/bank funds added to a wallet.
    TopUp,
    /// Wallet funds withdrawn to a bank account.
    Withdrawal,
    /// Payment against a business invoice.
    InvoicePayment,
    /// Loan funds credited to a wallet.
    LoanDisbursement,
    /// Loan repayment debited from a wallet.
    LoanRepayment,
    /// Reversal of a previous transaction.
    Refund,
}

/// Transaction status lifecycle.
///
/// Valid transitions:
/// - Pending → Processing | Completed | Failed | Cancelled | Declined | Expired
/// - Processing → Completed | Failed | Cancelled
///
/// Completed, Failed, Cancelled, Declined, and Expired are terminal; once
/// reached no further transition is accepted. An "undo" is expressed as a
/// compensating Refund record, never by rolling a status back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Awaiting action (e.g. a money request not yet accepted).
    Pending,
    /// Payment gateway processing.
    Processing,
    /// Successfully settled.
    Completed,
    /// Processing error or gateway decline.
    Failed,
    /// Cancelled by the sender before completion.
    Cancelled,
    /// Receiver declined a money request.
    Declined,
    /// Money request passed its expiry without response.
    Expired,
}

impl TransactionStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Declined => "declined",
            Self::Expired => "expired",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            "cancelled" => Some(Self::Cancelled),
            "declined" => Some(Self::Declined),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }

    /// Returns true if no further transition is accepted from this status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::Cancelled | Self::Declined | Self::Expired
        )
    }

    /// Returns true if a status transition is valid.
    #[must_use]
    pub fn can_transition(from: Self, to: Self) -> bool {
        match from {
            Self::Pending => to != Self::Pending,
            Self::Processing => {
                matches!(to, Self::Completed | Self::Failed | Self::Cancelled)
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
