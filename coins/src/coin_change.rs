/// Where the problem comes from.
pub const PROBLEM: &str = "322. Coin Change: https://leetcode.com/problems/coin-change";

/// Fewest coins from `denominations` summing to `amount`, `None` if no
/// combination does.
///
/// Order and duplicates in `denominations` are irrelevant and zero-valued
/// coins are ignored. An amount of zero needs no coins, whatever the
/// denominations. Runs in `O(amount * denominations.len())` time and
/// `O(amount)` space.
pub fn min_coins(denominations: &[u32], amount: u32) -> Option<u32> {
    if amount == 0 {
        return Some(0);
    }
    let table = CoinTable::build(denominations, amount);
    table.fewest[amount as usize]
}

/// [`min_coins`] with the classic contract: `-1` when the amount cannot be
/// reached.
pub fn min_coins_or_negative(denominations: &[u32], amount: u32) -> i64 {
    min_coins(denominations, amount).map_or(-1, i64::from)
}

/// One minimal multiset of coins summing to `amount`, largest coin first.
/// `None` when the amount cannot be reached.
pub fn coin_breakdown(denominations: &[u32], amount: u32) -> Option<Vec<u32>> {
    let table = CoinTable::build(denominations, amount);
    table.fewest[amount as usize]?;

    let mut coins = Vec::new();
    let mut remaining = amount as usize;
    while remaining > 0 {
        let coin = table.last_coin[remaining];
        coins.push(coin);
        remaining -= coin as usize;
    }
    coins.sort_unstable_by(|a, b| b.cmp(a));
    tracing::trace!("{amount} = {coins:?}");
    Some(coins)
}

/// Naive first-fit: repeatedly takes the first denomination, in the given
/// order, that still fits. No backtracking, so the count may exceed the
/// optimum (`[4, 3, 1]` for 6 gives 4+1+1) or miss a solution entirely
/// (`[5, 3]` for 9).
pub fn greedy_coins(denominations: &[u32], amount: u32) -> Option<u32> {
    let mut remaining = amount;
    let mut count = 0;
    while remaining > 0 {
        let coin = denominations
            .iter()
            .copied()
            .find(|&coin| coin != 0 && coin <= remaining)?;
        remaining -= coin;
        count += 1;
    }
    Some(count)
}

struct CoinTable {
    fewest: Vec<Option<u32>>,
    // Coin chosen for the optimum at each reachable amount.
    last_coin: Vec<u32>,
}

impl CoinTable {
    fn build(denominations: &[u32], amount: u32) -> Self {
        let size = amount as usize + 1;
        let mut fewest = vec![None; size];
        let mut last_coin = vec![0; size];
        fewest[0] = Some(0);

        for i in 1..size {
            for &coin in denominations {
                let coin_value = coin as usize;
                if coin_value == 0 || coin_value > i {
                    continue;
                }
                let Some(rest) = fewest[i - coin_value] else {
                    continue;
                };
                if fewest[i].is_none_or(|current| rest + 1 < current) {
                    fewest[i] = Some(rest + 1);
                    last_coin[i] = coin;
                }
            }
        }
        Self { fewest, last_coin }
    }
}
