//! Fewest coins for an amount.
//!
//! Run with: cargo run --bin coin_change -- <amount> <coin> [coin...]
//! Without arguments, a few classic cases are printed.

use rendezvous_coins::{coin_breakdown, greedy_coins, min_coins_or_negative, PROBLEM};
use rendezvous_rt::threads as rt;
use std::env;

fn report(coins: &[u32], amount: u32) {
    let fewest = min_coins_or_negative(coins, amount);
    match coin_breakdown(coins, amount) {
        Some(breakdown) => tracing::info!("coins {coins:?}, amount {amount}: {fewest} ({breakdown:?})"),
        None => tracing::info!("coins {coins:?}, amount {amount}: {fewest} (unreachable)"),
    }
    if let Some(greedy) = greedy_coins(coins, amount) {
        tracing::info!("  first-fit would use {greedy}");
    }
}

fn main() {
    rt::run(|| {
        tracing::info!("{PROBLEM}");

        let numbers: Result<Vec<u32>, _> = env::args().skip(1).map(|arg| arg.parse::<u32>()).collect();
        match numbers {
            Ok(numbers) if numbers.len() >= 2 => report(&numbers[1..], numbers[0]),
            Ok(numbers) if numbers.is_empty() => {
                report(&[6, 5, 1], 14);
                report(&[14, 13, 11], 1);
                report(&[4, 3, 1], 6);
                report(&[25, 10, 5], 30);
            }
            Ok(_) => tracing::error!("usage: coin_change <amount> <coin> [coin...]"),
            Err(e) => tracing::error!("invalid number: {e}"),
        }
    })
}
