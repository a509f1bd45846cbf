//! Monetary types for stakes, balances and payouts.

use rust_decimal::Decimal;

/// Money represented as a Decimal for precision.
pub type Amount = Decimal;

/// Payout multiplier represented as a Decimal for precision.
pub type Odds = Decimal;
