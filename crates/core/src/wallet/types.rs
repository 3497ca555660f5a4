//! Wallet domain types.

use chrono::{DateTime, Utc};
use paykit_shared::types::{Currency, UserId, WalletId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::wallet::ledger::next_utc_midnight;

/// Wallet status lifecycle.
///
/// Valid transitions:
/// - Active → Frozen (freeze)
/// - Frozen → Active (unfreeze)
/// - Active → Closed (close)
/// - Frozen → Closed (close)
///
/// Closed is terminal; wallets are never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletStatus {
    /// Wallet is open for all operations.
    Active,
    /// Temporarily blocked (e.g. suspicious activity).
    Frozen,
    /// Permanently closed.
    Closed,
}

impl WalletStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Frozen => "frozen",
            Self::Closed => "closed",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "frozen" => Some(Self::Frozen),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    /// Returns true if a status transition is valid.
    #[must_use]
    pub fn can_transition(from: Self, to: Self) -> bool {
        matches!(
            (from, to),
            (Self::Active, Self::Frozen | Self::Closed) | (Self::Frozen, Self::Active | Self::Closed)
        )
    }
}

impl std::fmt::Display for WalletStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's wallet: settled balance, pending holds, and daily usage limits.
///
/// Derived state (`available_balance`, the daily used counters, and
/// `limits_reset_at`) is maintained exclusively by the methods in
/// [`crate::wallet::ledger`]. After a bulk field restore from storage no
/// recomputation is needed; all fields are stored values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    /// Unique identifier.
    pub id: WalletId,
    /// Human-readable wallet number (e.g. "WLT-000001"), caller-generated.
    pub wallet_number: String,
    /// Owning user.
    pub owner: UserId,
    /// Settled balance.
    pub balance: Decimal,
    /// Funds held for pending outgoing transactions.
    pub pending_balance: Decimal,
    /// Wallet currency.
    pub currency: Currency,
    /// Maximum total outgoing amount per day.
    pub daily_send_limit: Decimal,
    /// Outgoing amount used today; resets at midnight.
    pub daily_send_used: Decimal,
    /// Maximum total top-up amount per day.
    pub daily_top_up_limit: Decimal,
    /// Top-up amount used today; resets at midnight.
    pub daily_top_up_used: Decimal,
    /// Next midnight (UTC) at which the daily counters reset.
    pub limits_reset_at: DateTime<Utc>,
    /// Current status.
    pub status: WalletStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// Default daily send limit for newly opened wallets.
    pub const DEFAULT_DAILY_SEND_LIMIT: Decimal = Decimal::from_parts(5_000, 0, 0, false, 0);
    /// Default daily top-up limit for newly opened wallets.
    pub const DEFAULT_DAILY_TOP_UP_LIMIT: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

    /// Opens a new wallet with zero balances and default limits.
    #[must_use]
    pub fn open(owner: UserId, wallet_number: String, now: DateTime<Utc>) -> Self {
        Self {
            id: WalletId::new(),
            wallet_number,
            owner,
            balance: Decimal::ZERO,
            pending_balance: Decimal::ZERO,
            currency: Currency::default(),
            daily_send_limit: Self::DEFAULT_DAILY_SEND_LIMIT,
            daily_send_used: Decimal::ZERO,
            daily_top_up_limit: Self::DEFAULT_DAILY_TOP_UP_LIMIT,
            daily_top_up_used: Decimal::ZERO,
            limits_reset_at: next_utc_midnight(now),
            status: WalletStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the spendable balance: settled minus held funds.
    #[must_use]
    pub fn available_balance(&self) -> Decimal {
        self.balance - self.pending_balance
    }

    /// Returns true if the wallet can transact.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == WalletStatus::Active
    }

    /// Returns true if the available balance covers the given amount.
    #[must_use]
    pub fn has_sufficient_balance(&self, amount: Decimal) -> bool {
        self.available_balance() >= amount
    }
}
