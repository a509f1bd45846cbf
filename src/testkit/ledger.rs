//! Ledger doubles.
//!
//! - [`FlakyLedger`] - refuses a scripted number of credits, or every balance
//!   read. Best for: settlement retry and ledger-outage paths.
//! - [`SlowLedger`] - yields to the scheduler inside every call.
//!   Best for: concurrency tests that need interleaving.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::adapter::outbound::memory_ledger::MemoryLedger;
use crate::domain::{Amount, UserId};
use crate::error::LedgerError;
use crate::port::outbound::Ledger;

// ---------------------------------------------------------------------------
// FlakyLedger
// ---------------------------------------------------------------------------

/// Wraps a [`MemoryLedger`] and fails on demand.
pub struct FlakyLedger {
    inner: Arc<MemoryLedger>,
    credit_failures: AtomicU32,
    credit_attempts: AtomicU32,
    balance_down: AtomicBool,
}

impl FlakyLedger {
    pub fn new(inner: Arc<MemoryLedger>) -> Self {
        Self {
            inner,
            credit_failures: AtomicU32::new(0),
            credit_attempts: AtomicU32::new(0),
            balance_down: AtomicBool::new(false),
        }
    }

    /// Refuse the next `count` credits.
    pub fn fail_credits(self, count: u32) -> Self {
        self.credit_failures.store(count, Ordering::SeqCst);
        self
    }

    /// Make balance reads fail until switched back.
    pub fn set_balance_down(&self, down: bool) {
        self.balance_down.store(down, Ordering::SeqCst);
    }

    /// Credits attempted so far, successful or not.
    pub fn credit_attempts(&self) -> u32 {
        self.credit_attempts.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &Arc<MemoryLedger> {
        &self.inner
    }
}

#[async_trait]
impl Ledger for FlakyLedger {
    async fn balance(&self, user: &UserId) -> Result<Amount, LedgerError> {
        if self.balance_down.load(Ordering::SeqCst) {
            return Err(LedgerError::Unavailable("balance store offline".into()));
        }
        self.inner.balance(user).await
    }

    async fn try_debit(&self, user: &UserId, amount: Amount) -> Result<Amount, LedgerError> {
        self.inner.try_debit(user, amount).await
    }

    async fn credit(&self, user: &UserId, amount: Amount) -> Result<Amount, LedgerError> {
        self.credit_attempts.fetch_add(1, Ordering::SeqCst);
        let remaining = self.credit_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.credit_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(LedgerError::Unavailable("credit refused".into()));
        }
        self.inner.credit(user, amount).await
    }
}

// ---------------------------------------------------------------------------
// SlowLedger
// ---------------------------------------------------------------------------

/// Wraps a ledger and yields before and after every inner call.
pub struct SlowLedger {
    inner: Arc<dyn Ledger>,
}

impl SlowLedger {
    pub fn new(inner: Arc<dyn Ledger>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Ledger for SlowLedger {
    async fn balance(&self, user: &UserId) -> Result<Amount, LedgerError> {
        tokio::task::yield_now().await;
        let balance = self.inner.balance(user).await;
        tokio::task::yield_now().await;
        balance
    }

    async fn try_debit(&self, user: &UserId, amount: Amount) -> Result<Amount, LedgerError> {
        tokio::task::yield_now().await;
        self.inner.try_debit(user, amount).await
    }

    async fn credit(&self, user: &UserId, amount: Amount) -> Result<Amount, LedgerError> {
        tokio::task::yield_now().await;
        self.inner.credit(user, amount).await
    }
}
