//! # rendezvous-coins
//!
//! Fewest coins adding up to an amount, solved bottom-up: `table[i]` holds the
//! fewest coins summing to `i`, built only from smaller indices, so the table
//! is filled in increasing order starting from `table[0] = 0`.
//!
//! ```text
//! coins [4, 3, 1]
//! amount | 0 1 2 3 4 5 6
//! coins  | 0 1 2 1 1 2 2
//! ```
//!
//! Unreachable amounts are `None` rather than a large sentinel count.

mod coin_change;

#[cfg(test)]
mod coin_change_tests;

pub use coin_change::{coin_breakdown, greedy_coins, min_coins, min_coins_or_negative, PROBLEM};
