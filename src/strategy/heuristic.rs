//! Cheap, non-searching strategies.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::game::{has_progression, is_progression, GameError};
use crate::strategy::{PositionView, Strategy};

/// Uniform choice among available numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStrategy;

impl Strategy for RandomStrategy {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&self, view: &PositionView<'_>, rng: &mut StdRng) -> Result<i64, GameError> {
        view.available
            .choose(rng)
            .copied()
            .ok_or(GameError::NoMoveAvailable)
    }
}

/// Always the smallest available number.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinStrategy;

impl Strategy for MinStrategy {
    fn name(&self) -> &str {
        "min"
    }

    fn choose_move(&self, view: &PositionView<'_>, _rng: &mut StdRng) -> Result<i64, GameError> {
        view.available
            .iter()
            .copied()
            .min()
            .ok_or(GameError::NoMoveAvailable)
    }
}

/// Prefer numbers close to the median of the pool and close to own holdings.
///
/// Score is `-|c - median| - min |c - h|` over own holdings `h` (the second
/// term is dropped while holdings are empty). The first maximum in input
/// order wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedianHeuristicStrategy;

impl Strategy for MedianHeuristicStrategy {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn choose_move(&self, view: &PositionView<'_>, _rng: &mut StdRng) -> Result<i64, GameError> {
        let median = median(view.available).ok_or(GameError::NoMoveAvailable)?;

        let mut best_move = view.available[0];
        let mut best_score = f64::NEG_INFINITY;
        for &candidate in view.available {
            let mut score = -(candidate as f64 - median).abs();
            if let Some(nearest) = view.own.iter().map(|&h| candidate.abs_diff(h)).min() {
                score -= nearest as f64;
            }
            if score > best_score {
                best_score = score;
                best_move = candidate;
            }
        }
        Ok(best_move)
    }
}

/// Median of `values`; the mean of the two middle values for even lengths.
fn median(values: &[i64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid] as f64)
    } else {
        Some((sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0)
    }
}

/// Three-phase move ordering:
///
/// 1. take a number that completes a progression with own holdings;
/// 2. otherwise take a number that would complete one for the opponent;
/// 3. otherwise take the number with the most potential, counting partners
///    `o` in the available and own numbers for which `c, o, 2o - c` can still
///    be completed inside that same set.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastHeuristicStrategy;

impl Strategy for FastHeuristicStrategy {
    fn name(&self) -> &str {
        "heuristic_fast"
    }

    fn choose_move(&self, view: &PositionView<'_>, _rng: &mut StdRng) -> Result<i64, GameError> {
        if view.available.is_empty() {
            return Err(GameError::NoMoveAvailable);
        }

        if let Some(&win) = view
            .available
            .iter()
            .find(|&&c| completes_progression(c, view.own, view.k))
        {
            debug!(value = win, "heuristic_fast: winning move");
            return Ok(win);
        }

        if let Some(&block) = view
            .available
            .iter()
            .find(|&&c| completes_progression(c, view.opponent, view.k))
        {
            debug!(value = block, "heuristic_fast: blocking move");
            return Ok(block);
        }

        let reachable: FxHashSet<i64> = view.available.iter().chain(view.own).copied().collect();
        let mut best_move = view.available[0];
        let mut best_score = 0usize;
        for (i, &candidate) in view.available.iter().enumerate() {
            let score = reachable
                .iter()
                .filter(|&&other| other != candidate && reflection_in(&reachable, other, candidate))
                .count();
            if i == 0 || score > best_score {
                best_score = score;
                best_move = candidate;
            }
        }
        Ok(best_move)
    }
}

/// True if some `k - 1` of `held` together with `candidate` form a
/// progression.
/// Whether `2 * other - candidate`, the third term of `candidate, other, _`,
/// is in `set`.
fn reflection_in(set: &FxHashSet<i64>, other: i64, candidate: i64) -> bool {
    i64::try_from(2 * other as i128 - candidate as i128).map_or(false, |v| set.contains(&v))
}

fn completes_progression(candidate: i64, held: &[i64], k: usize) -> bool {
    let need = k.saturating_sub(1);
    if held.len() < need {
        return false;
    }

    let mut combined = held.to_vec();
    combined.push(candidate);
    // No progression anywhere means no combination can be one.
    if !has_progression(k, &combined) {
        return false;
    }

    let mut terms = Vec::with_capacity(k);
    any_combination(held, need, |combo| {
        terms.clear();
        terms.extend_from_slice(combo);
        terms.push(candidate);
        is_progression(&terms)
    })
}

/// Visit the `r`-combinations of `items` in lexicographic index order until
/// `pred` accepts one.
fn any_combination<F>(items: &[i64], r: usize, mut pred: F) -> bool
where
    F: FnMut(&[i64]) -> bool,
{
    let n = items.len();
    if r > n {
        return false;
    }

    let mut idx: Vec<usize> = (0..r).collect();
    let mut combo: Vec<i64> = Vec::with_capacity(r);
    loop {
        combo.clear();
        combo.extend(idx.iter().map(|&i| items[i]));
        if pred(&combo) {
            return true;
        }

        // Rightmost position that can still advance.
        let mut i = r;
        while i > 0 && idx[i - 1] == i - 1 + n - r {
            i -= 1;
        }
        if i == 0 {
            return false;
        }
        idx[i - 1] += 1;
        for j in i..r {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        let view = PositionView::new(&[], &[1], &[2], 3);
        let strategies: [&dyn Strategy; 4] = [
            &RandomStrategy,
            &MinStrategy,
            &MedianHeuristicStrategy,
            &FastHeuristicStrategy,
        ];
        for strategy in strategies {
            assert_eq!(
                strategy.choose_move(&view, &mut rng()),
                Err(GameError::NoMoveAvailable),
                "{}",
                strategy.name()
            );
        }
    }

    #[test]
    fn test_random_returns_available() {
        let available = [4, 8, 15, 16, 23, 42];
        let view = PositionView::new(&available, &[], &[], 3);
        let mut rng = rng();
        for _ in 0..100 {
            let value = RandomStrategy.choose_move(&view, &mut rng).unwrap();
            assert!(available.contains(&value));
        }
    }

    #[test]
    fn test_min() {
        let view = PositionView::new(&[9, -3, 7], &[], &[], 3);
        assert_eq!(MinStrategy.choose_move(&view, &mut rng()), Ok(-3));
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[5, 1, 3]), Some(3.0));
        assert_eq!(median(&[4, 1, 3, 2]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_heuristic_prefers_median() {
        let view = PositionView::new(&[1, 2, 3, 4, 5], &[], &[], 3);
        assert_eq!(MedianHeuristicStrategy.choose_move(&view, &mut rng()), Ok(3));
    }

    #[test]
    fn test_heuristic_ties_keep_first() {
        // Median 2.5: 2 and 3 tie, 2 comes first in input order.
        let view = PositionView::new(&[1, 2, 3, 4], &[], &[], 3);
        assert_eq!(MedianHeuristicStrategy.choose_move(&view, &mut rng()), Ok(2));
        let view = PositionView::new(&[4, 3, 2, 1], &[], &[], 3);
        assert_eq!(MedianHeuristicStrategy.choose_move(&view, &mut rng()), Ok(3));
    }

    #[test]
    fn test_heuristic_pulls_toward_holdings() {
        let view = PositionView::new(&[60, 50, 40], &[38], &[], 3);
        // 60: -10-22 = -32, 50: 0-12 = -12, 40: -10-2 = -12 -> 50 first.
        assert_eq!(MedianHeuristicStrategy.choose_move(&view, &mut rng()), Ok(50));
    }

    #[test]
    fn test_fast_takes_own_win() {
        let view = PositionView::new(&[3], &[1, 5], &[], 3);
        assert_eq!(FastHeuristicStrategy.choose_move(&view, &mut rng()), Ok(3));

        let view = PositionView::new(&[8, 2, 9, 3], &[1, 5], &[6, 7], 3);
        assert_eq!(FastHeuristicStrategy.choose_move(&view, &mut rng()), Ok(9));
    }

    #[test]
    fn test_fast_blocks_opponent() {
        // No own win available; opponent threatens 6 (2,4,6) and 3 (2,3,4).
        let view = PositionView::new(&[10, 6, 3, 20], &[50, 91], &[2, 4], 3);
        assert_eq!(FastHeuristicStrategy.choose_move(&view, &mut rng()), Ok(6));
    }

    #[test]
    fn test_fast_win_beats_block() {
        let view = PositionView::new(&[6, 11], &[1, 21], &[2, 4], 3);
        assert_eq!(FastHeuristicStrategy.choose_move(&view, &mut rng()), Ok(11));
    }

    #[test]
    fn test_fast_potential_score() {
        // Nothing to win or block at k=4. 9 extends 1,5 (as 9,5,1) while 3
        // has no partner whose reflection stays in the set.
        let view = PositionView::new(&[3, 9], &[1, 5], &[], 4);
        assert_eq!(FastHeuristicStrategy.choose_move(&view, &mut rng()), Ok(9));

        // Ties keep the first candidate.
        let view = PositionView::new(&[1, 3, 5, 2, 4], &[], &[], 4);
        assert_eq!(FastHeuristicStrategy.choose_move(&view, &mut rng()), Ok(1));
    }

    #[test]
    fn test_extreme_values() {
        let available = [i64::MIN, 0, i64::MAX];
        let view = PositionView::new(&available, &[i64::MIN + 1], &[], 3);
        assert!(MedianHeuristicStrategy.choose_move(&view, &mut rng()).is_ok());
        // Only i64::MAX has a partner: 0 reflects it onto i64::MIN + 1.
        assert_eq!(FastHeuristicStrategy.choose_move(&view, &mut rng()), Ok(i64::MAX));

        let view = PositionView::new(&[0], &[i64::MIN + 1], &[], 3);
        assert!(completes_progression(i64::MAX, &[i64::MIN + 1, 0], 3));
        assert!(!completes_progression(i64::MAX, &[i64::MIN, 0], 3));
        assert_eq!(FastHeuristicStrategy.choose_move(&view, &mut rng()), Ok(0));
    }

    #[test]
    fn test_completes_progression() {
        assert!(completes_progression(3, &[1, 5], 3));
        assert!(completes_progression(7, &[1, 4, 20], 3));
        assert!(!completes_progression(8, &[1, 4, 20], 3));
        assert!(completes_progression(13, &[1, 5, 9, 2], 4));
        assert!(!completes_progression(3, &[1], 3));
        assert!(completes_progression(3, &[], 1));
    }

    #[test]
    fn test_any_combination_order() {
        let mut seen = Vec::new();
        any_combination(&[1, 2, 3, 4], 2, |c| {
            seen.push(c.to_vec());
            false
        });
        assert_eq!(
            seen,
            vec![
                vec![1, 2],
                vec![1, 3],
                vec![1, 4],
                vec![2, 3],
                vec![2, 4],
                vec![3, 4]
            ]
        );

        let mut count = 0;
        assert!(!any_combination(&[1, 2], 0, |c| {
            count += 1;
            !c.is_empty()
        }));
        assert_eq!(count, 1);
    }
}
