//! In-process ledger.
//!
//! Stands in for the persistent balance store. Every operation takes one
//! short mutex, which makes the conditional debit atomic.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::{Amount, UserId};
use crate::error::LedgerError;
use crate::port::outbound::Ledger;

/// Balances held in memory, keyed by user.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    balances: Mutex<HashMap<UserId, Amount>>,
}

impl MemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger with opening balances.
    pub fn with_accounts(accounts: impl IntoIterator<Item = (UserId, Amount)>) -> Self {
        Self {
            balances: Mutex::new(accounts.into_iter().collect()),
        }
    }

    /// Open or overwrite an account.
    pub fn set_balance(&self, user: UserId, amount: Amount) {
        self.balances.lock().insert(user, amount);
    }

    /// Balance without going through the async port.
    #[must_use]
    pub fn snapshot(&self, user: &UserId) -> Amount {
        self.balances
            .lock()
            .get(user)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn balance(&self, user: &UserId) -> Result<Amount, LedgerError> {
        Ok(self.snapshot(user))
    }

    async fn try_debit(&self, user: &UserId, amount: Amount) -> Result<Amount, LedgerError> {
        let mut balances = self.balances.lock();
        let available = balances.get(user).copied().unwrap_or(Decimal::ZERO);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                user: user.clone(),
                available,
                requested: amount,
            });
        }
        let remaining = available - amount;
        balances.insert(user.clone(), remaining);
        Ok(remaining)
    }

    async fn credit(&self, user: &UserId, amount: Amount) -> Result<Amount, LedgerError> {
        let mut balances = self.balances.lock();
        let balance = balances.entry(user.clone()).or_insert(Decimal::ZERO);
        *balance += amount;
        Ok(*balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn unknown_user_reads_zero() {
        let ledger = MemoryLedger::new();
        assert_eq!(ledger.balance(&UserId::from("ghost")).await, Ok(Decimal::ZERO));
    }

    #[tokio::test]
    async fn debit_refuses_to_overdraw() {
        let ledger = MemoryLedger::with_accounts([(UserId::from("u"), dec!(50))]);

        assert_eq!(ledger.try_debit(&"u".into(), dec!(30)).await, Ok(dec!(20)));
        let err = ledger.try_debit(&"u".into(), dec!(30)).await.unwrap_err();

        assert!(matches!(err, LedgerError::InsufficientBalance { available, .. } if available == dec!(20)));
        assert_eq!(ledger.snapshot(&"u".into()), dec!(20));
    }

    #[tokio::test]
    async fn credit_opens_missing_accounts() {
        let ledger = MemoryLedger::new();
        assert_eq!(ledger.credit(&"w".into(), dec!(180)).await, Ok(dec!(180)));
        assert_eq!(ledger.credit(&"w".into(), dec!(0.5)).await, Ok(dec!(180.5)));
    }

    #[tokio::test]
    async fn set_balance_overwrites_existing_accounts() {
        let ledger = MemoryLedger::with_accounts([(UserId::from("u"), dec!(50))]);

        ledger.set_balance("u".into(), dec!(5));
        ledger.set_balance("new".into(), dec!(12));

        assert_eq!(ledger.balance(&"u".into()).await, Ok(dec!(5)));
        assert_eq!(ledger.try_debit(&"new".into(), dec!(12)).await, Ok(Decimal::ZERO));
    }
}
