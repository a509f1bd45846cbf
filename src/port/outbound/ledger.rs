//! Ledger port for user balances.
//!
//! The engine never holds balances itself. Stakes are debited through
//! [`Ledger::try_debit`] and payouts credited through [`Ledger::credit`].

use async_trait::async_trait;

use crate::domain::{Amount, UserId};
use crate::error::LedgerError;

/// Balance store owned by an external system.
///
/// # Implementation Notes
///
/// - Each call must be atomic on its own.
/// - `try_debit` is a conditional decrement: it fails with
///   [`LedgerError::InsufficientBalance`] instead of letting the balance go
///   negative, even when called concurrently for the same user.
/// - Unknown users read as a zero balance.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Current balance of `user`.
    async fn balance(&self, user: &UserId) -> Result<Amount, LedgerError>;

    /// Remove `amount` from `user` if the result stays non-negative.
    ///
    /// Returns the balance after the debit.
    async fn try_debit(&self, user: &UserId, amount: Amount) -> Result<Amount, LedgerError>;

    /// Add `amount` to `user`. Returns the balance after the credit.
    async fn credit(&self, user: &UserId, amount: Amount) -> Result<Amount, LedgerError>;
}
