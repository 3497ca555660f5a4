//! Wallet balance mutations and daily-limit enforcement.
//!
//! Every mutating operation is all-or-nothing: validation happens before
//! any field is written, so a returned error leaves the wallet untouched.
//! Every entry point that reads or records daily usage first applies the
//! lazy midnight reset, which keeps the counters correct under arbitrary
//! call timing without a background timer.

use chrono::{DateTime, Days, NaiveTime, Utc};
use rust_decimal::Decimal;

use crate::wallet::error::WalletError;
use crate::wallet::types::{Wallet, WalletStatus};

/// Returns the first UTC midnight strictly after the given instant.
pub(crate) fn next_utc_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    let tomorrow = now.date_naive() + Days::new(1);
    tomorrow.and_time(NaiveTime::MIN).and_utc()
}

impl Wallet {
    /// Debits the wallet for a completed outgoing transaction.
    ///
    /// Reduces the settled balance and registers the amount against the
    /// daily send limit.
    pub fn debit(&mut self, amount: Decimal, now: DateTime<Utc>) -> Result<(), WalletError> {
        self.reset_daily_limits_if_needed(now);
        if amount <= Decimal::ZERO {
            return Err(WalletError::InvalidAmount(amount));
        }
        if !self.has_sufficient_balance(amount) {
            return Err(WalletError::InsufficientFunds {
                requested: amount,
                available: self.available_balance(),
            });
        }
        self.balance -= amount;
        self.daily_send_used += amount;
        self.updated_at = now;
        Ok(())
    }

    /// Credits the wallet for an incoming transaction or settled top-up.
    pub fn credit(&mut self, amount: Decimal, now: DateTime<Utc>) -> Result<(), WalletError> {
        if amount <= Decimal::ZERO {
            return Err(WalletError::InvalidAmount(amount));
        }
        self.balance += amount;
        self.updated_at = now;
        Ok(())
    }

    /// Holds funds in the pending balance (e.g. awaiting recipient acceptance).
    pub fn hold_funds(&mut self, amount: Decimal, now: DateTime<Utc>) -> Result<(), WalletError> {
        if amount <= Decimal::ZERO {
            return Err(WalletError::InvalidAmount(amount));
        }
        if !self.has_sufficient_balance(amount) {
            return Err(WalletError::InsufficientFunds {
                requested: amount,
                available: self.available_balance(),
            });
        }
        self.pending_balance += amount;
        self.updated_at = now;
        Ok(())
    }

    /// Releases previously held funds back to the available balance
    /// (e.g. the money request was declined).
    pub fn release_funds(&mut self, amount: Decimal, now: DateTime<Utc>) -> Result<(), WalletError> {
        if amount <= Decimal::ZERO {
            return Err(WalletError::InvalidAmount(amount));
        }
        if amount > self.pending_balance {
            return Err(WalletError::OverRelease {
                requested: amount,
                held: self.pending_balance,
            });
        }
        self.pending_balance -= amount;
        self.updated_at = now;
        Ok(())
    }

    /// Commits held funds: removes them from both the pending and settled
    /// balance and counts them toward the daily send limit (a previously
    /// held send has completed).
    pub fn commit_held_funds(
        &mut self,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), WalletError> {
        self.reset_daily_limits_if_needed(now);
        if amount <= Decimal::ZERO {
            return Err(WalletError::InvalidAmount(amount));
        }
        if amount > self.pending_balance {
            return Err(WalletError::OverCommit {
                requested: amount,
                held: self.pending_balance,
            });
        }
        self.pending_balance -= amount;
        self.balance -= amount;
        self.daily_send_used += amount;
        self.updated_at = now;
        Ok(())
    }

    /// Registers a settled top-up against the daily top-up limit.
    pub fn record_top_up_usage(
        &mut self,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), WalletError> {
        self.reset_daily_limits_if_needed(now);
        if amount <= Decimal::ZERO {
            return Err(WalletError::InvalidAmount(amount));
        }
        self.daily_top_up_used += amount;
        self.updated_at = now;
        Ok(())
    }

    /// Returns true if a send of `amount` stays within the daily send limit.
    pub fn is_within_daily_send_limit(&mut self, amount: Decimal, now: DateTime<Utc>) -> bool {
        self.reset_daily_limits_if_needed(now);
        self.daily_send_used + amount <= self.daily_send_limit
    }

    /// Returns true if a top-up of `amount` stays within the daily top-up limit.
    pub fn is_within_daily_top_up_limit(&mut self, amount: Decimal, now: DateTime<Utc>) -> bool {
        self.reset_daily_limits_if_needed(now);
        self.daily_top_up_used + amount <= self.daily_top_up_limit
    }

    /// Returns the unused portion of today's send limit.
    pub fn remaining_daily_send_limit(&mut self, now: DateTime<Utc>) -> Decimal {
        self.reset_daily_limits_if_needed(now);
        self.daily_send_limit - self.daily_send_used
    }

    /// Returns the unused portion of today's top-up limit.
    pub fn remaining_daily_top_up_limit(&mut self, now: DateTime<Utc>) -> Decimal {
        self.reset_daily_limits_if_needed(now);
        self.daily_top_up_limit - self.daily_top_up_used
    }

    /// Zeroes the daily counters and advances the reset instant once
    /// midnight has passed.
    fn reset_daily_limits_if_needed(&mut self, now: DateTime<Utc>) {
        if now > self.limits_reset_at {
            self.daily_send_used = Decimal::ZERO;
            self.daily_top_up_used = Decimal::ZERO;
            self.limits_reset_at = next_utc_midnight(now);
        }
    }

    /// Freezes an active wallet.
    pub fn freeze(&mut self, now: DateTime<Utc>) -> Result<(), WalletError> {
        self.transition_status(WalletStatus::Frozen, now)
    }

    /// Unfreezes a frozen wallet back to active.
    pub fn unfreeze(&mut self, now: DateTime<Utc>) -> Result<(), WalletError> {
        self.transition_status(WalletStatus::Active, now)
    }

    /// Closes the wallet. Terminal; wallets are never deleted.
    pub fn close(&mut self, now: DateTime<Utc>) -> Result<(), WalletError> {
        self.transition_status(WalletStatus::Closed, now)
    }

    fn transition_status(
        &mut self,
        to: WalletStatus,
        now: DateTime<Utc>,
    ) -> Result<(), WalletError> {
        if !WalletStatus::can_transition(self.status, to) {
            return Err(WalletError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.updated_at = now;
        Ok(())
    }
}
