use std::collections::{HashSet, VecDeque};

use proptest::prelude::*;

use crate::{coin_breakdown, greedy_coins, min_coins, min_coins_or_negative, PROBLEM};

struct Case {
    coins: &'static [u32],
    target: u32,
    output: i64,
}

impl Case {
    fn describe(&self) -> String {
        format!(
            "coins: {:?}, target: {}, expected_output: {}",
            self.coins, self.target, self.output
        )
    }
}

const CASES: &[Case] = &[
    Case { coins: &[], target: 0, output: 0 },
    Case { coins: &[6, 5, 1], target: 14, output: 4 },
    Case { coins: &[14, 13, 11], target: 1, output: -1 },
    Case { coins: &[4, 3, 1], target: 6, output: 2 },
    Case { coins: &[25, 10, 5], target: 30, output: 2 },
    Case { coins: &[], target: 7, output: -1 },
    Case { coins: &[2], target: 3, output: -1 },
    Case { coins: &[1, 1, 1], target: 3, output: 3 },
    Case { coins: &[0, 3], target: 6, output: 2 },
];

#[test]
fn known_cases() {
    for case in CASES {
        assert_eq!(
            min_coins_or_negative(case.coins, case.target),
            case.output,
            "{}",
            case.describe()
        );
    }
}

#[test]
fn zero_amount_needs_no_coins() {
    assert_eq!(min_coins(&[], 0), Some(0));
    assert_eq!(min_coins(&[7, 3], 0), Some(0));
    assert_eq!(coin_breakdown(&[7, 3], 0), Some(vec![]));
}

#[test]
fn unreachable_is_none() {
    assert_eq!(min_coins(&[], 5), None);
    assert_eq!(min_coins(&[14, 13, 11], 1), None);
    assert_eq!(coin_breakdown(&[4], 6), None);
}

#[test]
fn larger_amounts_can_need_fewer_coins() {
    // 5 needs two coins but 6 needs one.
    assert_eq!(min_coins(&[6, 4, 1], 5), Some(2));
    assert_eq!(min_coins(&[6, 4, 1], 6), Some(1));
}

#[test]
fn breakdown_is_a_minimal_witness() {
    assert_eq!(coin_breakdown(&[6, 5, 1], 14), Some(vec![6, 6, 1, 1]));
    assert_eq!(coin_breakdown(&[4, 3, 1], 6), Some(vec![3, 3]));
    assert_eq!(coin_breakdown(&[25, 10, 5], 30), Some(vec![25, 5]));
}

#[test]
fn greedy_is_not_optimal() {
    assert_eq!(greedy_coins(&[4, 3, 1], 6), Some(3));
    assert_eq!(min_coins(&[4, 3, 1], 6), Some(2));

    assert_eq!(greedy_coins(&[5, 3], 9), None);
    assert_eq!(min_coins(&[5, 3], 9), Some(3));

    assert_eq!(greedy_coins(&[25, 10, 5], 30), Some(2));
}

#[test]
fn problem_statement_is_referenced() {
    assert!(PROBLEM.starts_with("322."));
}

/// Fewest coins by breadth-first search over partial sums.
fn fewest_by_search(coins: &[u32], amount: u32) -> Option<u32> {
    let mut visited = HashSet::from([0u32]);
    let mut queue = VecDeque::from([(0u32, 0u32)]);
    while let Some((sum, count)) = queue.pop_front() {
        if sum == amount {
            return Some(count);
        }
        for &coin in coins {
            let next = sum + coin;
            if coin != 0 && next <= amount && visited.insert(next) {
                queue.push_back((next, count + 1));
            }
        }
    }
    None
}

proptest! {
    #[test]
    fn matches_exhaustive_search(
        coins in prop::collection::vec(1u32..30, 0..5),
        amount in 0u32..200,
    ) {
        prop_assert_eq!(min_coins(&coins, amount), fewest_by_search(&coins, amount));
    }

    #[test]
    fn breakdown_sums_to_amount(
        coins in prop::collection::vec(1u32..30, 1..5),
        amount in 0u32..200,
    ) {
        match (coin_breakdown(&coins, amount), min_coins(&coins, amount)) {
            (Some(breakdown), Some(count)) => {
                prop_assert_eq!(breakdown.iter().sum::<u32>(), amount);
                prop_assert_eq!(breakdown.len() as u32, count);
                prop_assert!(breakdown.iter().all(|coin| coins.contains(coin)));
            }
            (None, None) => {}
            (breakdown, count) => prop_assert!(false, "{breakdown:?} vs {count:?}"),
        }
    }

    #[test]
    fn greedy_never_beats_the_optimum(
        coins in prop::collection::vec(1u32..30, 1..5),
        amount in 0u32..200,
    ) {
        if let Some(greedy) = greedy_coins(&coins, amount) {
            prop_assert!(min_coins(&coins, amount).is_some_and(|best| best <= greedy));
        }
    }
}
