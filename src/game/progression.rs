//! Arithmetic-progression detection over integer sets.
//!
//! All functions here are pure and treat their input as a set: duplicate
//! values collapse before any search. A progression of length `k` is
//! `a, a+d, ..., a+(k-1)d` with `d >= 1`, always reported sorted ascending.
//!
//! The search enumerates ordered pairs `(i, j)` of the sorted distinct
//! values, uses `v[j] - v[i]` as the candidate difference and walks forward
//! through the set. Every progression has a unique pair made of its two
//! smallest terms, so the enumeration never reports the same progression twice.

use rand::seq::{index, SliceRandom};
use rand::Rng;
use rustc_hash::FxHashSet;

use crate::game::error::GameError;

/// Sorted distinct values plus a membership set.
fn distinct_sorted(numbers: &[i64]) -> (Vec<i64>, FxHashSet<i64>) {
    let set: FxHashSet<i64> = numbers.iter().copied().collect();
    let mut sorted: Vec<i64> = set.iter().copied().collect();
    sorted.sort_unstable();
    (sorted, set)
}

/// Membership for a term computed in `i128`; terms outside `i64` are absent.
fn contains(set: &FxHashSet<i64>, value: i128) -> bool {
    i64::try_from(value).map_or(false, |v| set.contains(&v))
}

/// Build `start, start+d, ...` of length `k` if every term is in `set`.
///
/// Terms are stepped in `i128` so differences spanning the whole `i64`
/// range cannot overflow.
fn progression_from(start: i64, d: i128, k: usize, set: &FxHashSet<i64>) -> Option<Vec<i64>> {
    let mut prog = Vec::with_capacity(k);
    let mut value = start as i128;
    for _ in 0..k {
        if !contains(set, value) {
            return None;
        }
        prog.push(value as i64);
        value += d;
    }
    Some(prog)
}

/// True iff some length-`k` progression is a subset of `numbers`.
///
/// `k == 0` is degenerate and always true. `k == 1` holds only for a
/// non-empty set, not for every input: an empty set has no one-term
/// progression to return, and this keeps `has_progression` true exactly
/// when [`find_one_progression`] returns `Some`.
pub fn has_progression(k: usize, numbers: &[i64]) -> bool {
    if k == 0 {
        return true;
    }
    let (sorted, set) = distinct_sorted(numbers);
    let n = sorted.len();
    if n < k {
        return false;
    }
    if k <= 2 {
        return true;
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let d = sorted[j] as i128 - sorted[i] as i128;
            let mut count = 2;
            let mut next = sorted[j] as i128 + d;
            while contains(&set, next) {
                count += 1;
                if count >= k {
                    return true;
                }
                next += d;
            }
        }
    }
    false
}

/// First length-`k` progression contained in `numbers`.
///
/// Ties break on the smallest first term, then the smallest second term,
/// which is also the first progression in ascending lexicographic order.
pub fn find_one_progression(k: usize, numbers: &[i64]) -> Option<Vec<i64>> {
    if k == 0 {
        return Some(Vec::new());
    }
    let (sorted, set) = distinct_sorted(numbers);
    if k == 1 {
        return sorted.first().map(|&v| vec![v]);
    }

    let n = sorted.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let d = sorted[j] as i128 - sorted[i] as i128;
            if let Some(prog) = progression_from(sorted[i], d, k, &set) {
                return Some(prog);
            }
        }
    }
    None
}

/// Every length-`k` progression contained in `numbers`, in ascending
/// lexicographic order of their terms.
pub fn find_all_progressions(k: usize, numbers: &[i64]) -> Vec<Vec<i64>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    let (sorted, set) = distinct_sorted(numbers);
    if k == 1 {
        return sorted.into_iter().map(|v| vec![v]).collect();
    }

    let n = sorted.len();
    let mut progs = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            let d = sorted[j] as i128 - sorted[i] as i128;
            if let Some(prog) = progression_from(sorted[i], d, k, &set) {
                progs.push(prog);
            }
        }
    }
    progs.sort();
    progs
}

/// Exact test for a candidate set pinned to its final size: sorted, the
/// values must share one common difference `d >= 1`.
///
/// Sets of fewer than two values are trivially progressions.
pub fn is_progression(values: &[i64]) -> bool {
    if values.len() < 2 {
        return true;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let d = sorted[1] as i128 - sorted[0] as i128;
    d >= 1 && sorted.windows(2).all(|w| w[1] as i128 - w[0] as i128 == d)
}

/// Generate a shuffled pool of `pool_size` distinct integers in
/// `[lower, bound]` that contains a planted length-`k` progression.
///
/// Returns `(pool, planted)` with `planted` sorted ascending. The planted
/// progression is guaranteed to be in the pool but other progressions may
/// appear in the random fill.
pub fn generate_pool_with_planted_progression<R: Rng + ?Sized>(
    k: usize,
    pool_size: usize,
    lower: i64,
    bound: i64,
    rng: &mut R,
) -> Result<(Vec<i64>, Vec<i64>), GameError> {
    if k == 0 {
        return Err(GameError::invalid("progression length must be at least 1"));
    }
    if lower > bound {
        return Err(GameError::invalid(format!(
            "lower bound {} exceeds upper bound {}",
            lower, bound
        )));
    }
    // `bound - lower` as u64; the span itself overflows only for the full
    // i64 range, which holds any pool size.
    let width = bound.abs_diff(lower);
    if pool_size < k || width.checked_add(1).map_or(false, |span| pool_size as u64 > span) {
        return Err(GameError::invalid(format!(
            "pool size {} must lie in [{}, {}]",
            pool_size,
            k,
            width as u128 + 1
        )));
    }

    let planted: Vec<i64> = if k == 1 {
        vec![rng.gen_range(lower..=bound)]
    } else {
        let steps = k as u64 - 1;
        let max_d = width / steps;
        if max_d < 1 {
            return Err(GameError::invalid(format!(
                "range [{}, {}] is too small for a progression of length {}",
                lower, bound, k
            )));
        }
        let d = rng.gen_range(1..=max_d);
        let a_max = offset(bound, 0u64.wrapping_sub(steps * d));
        let a = rng.gen_range(lower..=a_max);
        (0..steps + 1).map(|m| offset(a, m * d)).collect()
    };

    // Map a uniform index sample over the range minus the planted terms
    // back onto values by skipping each planted term in ascending order.
    let free = (width - (k as u64 - 1)) as usize;
    let fill = index::sample(rng, free, pool_size - k).into_iter().map(|idx| {
        let mut value = offset(lower, idx as u64);
        for &p in &planted {
            if value >= p {
                value += 1;
            }
        }
        value
    });

    let mut pool: Vec<i64> = planted.iter().copied().chain(fill).collect();
    pool.shuffle(rng);
    Ok((pool, planted))
}

/// `base + delta` modulo 2^64; exact whenever the true sum fits in `i64`.
fn offset(base: i64, delta: u64) -> i64 {
    base.wrapping_add(delta as i64)
}
