//! Seeded sampling of distinct indices without replacement.
//!
//! Draws `min(requested, total)` distinct values from `[0, total)` where `total` can be
//! as large as `u128` allows. Two regimes:
//!
//! - **Bounded** (`total <= 2^32`): partial Fisher–Yates from the end of a virtual array
//!   `[0, total)`. For `i` from `total - 1` down to `total - requested`, draw
//!   `j = floor(u * (i + 1))` and swap slots `i` and `j`; the tail is the sample. Only
//!   displaced slots are stored, so memory is `O(requested)`, but the swap transcript is
//!   the same as shuffling an explicit array.
//! - **Huge** (`total > 2^32`): draw a masked multi-word integer, reject values
//!   `>= total`, insert into an ordered set until it holds `requested` values.
//!
//! Both regimes are exactly uniform. They do not consume the generator the same way, so
//! a seed means different things in each.
//!
//! ## References
//!
//! - Durstenfeld (1964): Algorithm 235, random permutation.
//! - Knuth, TAOCP Vol. 2, §3.4.2 (sampling and shuffling).

use std::collections::{BTreeSet, HashMap};

use rand::RngCore;

use crate::rng::{unit_f64, Mulberry32};

/// Largest `total` sampled by partial shuffle.
pub const BOUNDED_LIMIT: u128 = 1 << 32;

/// Which algorithm a given index-space size is sampled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Bounded,
    Huge,
}

impl Regime {
    pub fn for_total(total: u128) -> Self {
        if total <= BOUNDED_LIMIT {
            Self::Bounded
        } else {
            Self::Huge
        }
    }
}

/// Sample distinct indices from `[0, total)`, sorted ascending.
///
/// `requested > total` takes everything; `requested == 0` returns an empty sample.
pub fn sample_indices_with_rng<R: RngCore + ?Sized>(
    total: u128,
    requested: usize,
    rng: &mut R,
) -> Vec<u128> {
    let take = (requested as u128).min(total) as usize;
    if take == 0 {
        return Vec::new();
    }

    match Regime::for_total(total) {
        Regime::Bounded => partial_shuffle_tail(total as u64, take, rng),
        Regime::Huge => rejection_sample(total, take, rng),
    }
}

/// Sample with a fresh [`Mulberry32`] seeded with `seed`.
pub fn sample_indices(total: u128, requested: usize, seed: u32) -> Vec<u128> {
    SeededSampler::new(seed).sample(total, requested)
}

fn partial_shuffle_tail<R: RngCore + ?Sized>(total: u64, take: usize, rng: &mut R) -> Vec<u128> {
    let stop = total - take as u64;
    let mut displaced: HashMap<u64, u64> = HashMap::with_capacity(take);
    let mut out = Vec::with_capacity(take);

    for i in (stop..total).rev() {
        let j = (unit_f64(rng) * (i + 1) as f64).floor() as u64;
        let at_i = displaced.get(&i).copied().unwrap_or(i);
        let at_j = displaced.get(&j).copied().unwrap_or(j);
        displaced.insert(j, at_i);
        // j <= i, and later draws only reach slots below i: slot i is final.
        out.push(u128::from(at_j));
    }

    out.sort_unstable();
    out
}

fn rejection_sample<R: RngCore + ?Sized>(total: u128, take: usize, rng: &mut R) -> Vec<u128> {
    let bits = 128 - (total - 1).leading_zeros();
    let words = bits.div_ceil(32);
    let mask = if bits == 128 {
        u128::MAX
    } else {
        (1u128 << bits) - 1
    };

    let mut chosen = BTreeSet::new();
    while chosen.len() < take {
        chosen.insert(draw_below(total, words, mask, rng));
    }
    chosen.into_iter().collect()
}

/// Uniform value in `[0, total)`. Fewer than two draws expected: `mask` is the smallest
/// all-ones value covering `total - 1`.
fn draw_below<R: RngCore + ?Sized>(total: u128, words: u32, mask: u128, rng: &mut R) -> u128 {
    loop {
        let mut x = 0u128;
        for _ in 0..words {
            x = (x << 32) | u128::from(rng.next_u32());
        }
        x &= mask;
        if x < total {
            return x;
        }
    }
}

/// A seeded sampler over combination index spaces.
///
/// Successive calls continue the same generator stream.
#[derive(Debug, Clone)]
pub struct SeededSampler {
    seed: u32,
    rng: Mulberry32,
}

impl SeededSampler {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            rng: Mulberry32::new(seed),
        }
    }

    /// The seed this sampler started from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// `min(requested, total)` distinct indices in `[0, total)`, sorted ascending.
    pub fn sample(&mut self, total: u128, requested: usize) -> Vec<u128> {
        sample_indices_with_rng(total, requested, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Partial shuffle over an explicit array, as a transcript reference.
    fn explicit_shuffle_tail(total: usize, take: usize, seed: u32) -> Vec<u128> {
        let mut rng = Mulberry32::new(seed);
        let mut a: Vec<u128> = (0..total as u128).collect();
        for i in (total - take..total).rev() {
            let j = (rng.next_f64() * (i + 1) as f64).floor() as usize;
            a.swap(i, j);
        }
        let mut tail = a[total - take..].to_vec();
        tail.sort_unstable();
        tail
    }

    #[test]
    fn bounded_reference_transcripts() {
        assert_eq!(
            sample_indices(15_504, 10, 42),
            vec![2709, 4234, 6949, 7318, 8161, 9319, 9681, 10381, 13214, 13411]
        );
        assert_eq!(sample_indices(84, 5, 7), vec![0, 5, 41, 56, 80]);
        assert_eq!(sample_indices(7, 3, 99), vec![1, 2, 4]);
    }

    #[test]
    fn sparse_shuffle_matches_explicit_array() {
        for (total, take) in [(1, 1), (7, 7), (50, 3), (500, 250), (15_504, 200)] {
            for seed in [0u32, 1, 42, 0xDEAD_BEEF] {
                assert_eq!(
                    sample_indices(total as u128, take, seed),
                    explicit_shuffle_tail(total, take, seed),
                    "total={total} take={take} seed={seed}"
                );
            }
        }
    }

    #[test]
    fn clamps_and_empties() {
        assert_eq!(sample_indices(10, 10, 1), (0..10).collect::<Vec<_>>());
        assert_eq!(sample_indices(5, 99, 3), (0..5).collect::<Vec<_>>());
        assert!(sample_indices(5, 0, 3).is_empty());
        assert!(sample_indices(0, 10, 3).is_empty());
    }

    #[test]
    fn regimes_split_at_two_pow_32() {
        assert_eq!(Regime::for_total(1), Regime::Bounded);
        assert_eq!(Regime::for_total(BOUNDED_LIMIT), Regime::Bounded);
        assert_eq!(Regime::for_total(BOUNDED_LIMIT + 1), Regime::Huge);
    }

    #[test]
    fn bounded_regime_at_limit_uses_little_memory() {
        let s = sample_indices(BOUNDED_LIMIT, 100, 5);
        assert_eq!(s.len(), 100);
        assert!(s.windows(2).all(|w| w[0] < w[1]));
        assert!(s.iter().all(|&x| x < BOUNDED_LIMIT));
    }

    #[test]
    fn huge_regime_is_distinct_sorted_and_reproducible() {
        let total = crate::space::binomial(100, 50).unwrap();
        let a = sample_indices(total, 1_000, 42);
        let b = sample_indices(total, 1_000, 42);
        assert_eq!(a, b);
        assert_eq!(a.len(), 1_000);
        assert!(a.windows(2).all(|w| w[0] < w[1]));
        assert!(a.iter().all(|&x| x < total));
        assert_ne!(a, sample_indices(total, 1_000, 43));
    }

    #[test]
    fn huge_regime_full_width() {
        let s = sample_indices(u128::MAX, 16, 11);
        assert_eq!(s.len(), 16);
        assert!(s.iter().all(|&x| x < u128::MAX));
    }

    #[test]
    fn sampler_stream_continues() {
        let mut s = SeededSampler::new(9);
        assert_eq!(s.seed(), 9);
        let first = s.sample(1_000, 5);
        let second = s.sample(1_000, 5);
        assert_eq!(first, sample_indices(1_000, 5, 9));
        assert_ne!(first, second);
    }

    #[test]
    fn bounded_distribution_uniform() {
        // Deterministic chi-squared smoke test, as for the reservoir samplers.
        let n = 40u128;
        let k = 5;
        let trials = 8_000;
        let mut counts = vec![0usize; n as usize];

        for t in 0..trials {
            let mut rng = ChaCha8Rng::seed_from_u64(t as u64);
            for idx in sample_indices_with_rng(n, k, &mut rng) {
                counts[idx as usize] += 1;
            }
        }

        let expected = trials as f64 * (k as f64 / n as f64);
        let chi2: f64 = counts
            .iter()
            .map(|&c| {
                let diff = c as f64 - expected;
                (diff * diff) / expected
            })
            .sum();

        // df = 39.
        assert!(chi2 < 110.0, "chi2 too large (chi2={chi2:.2}). counts={counts:?}");
    }

    #[test]
    fn huge_distribution_uniform_by_bucket() {
        let total = BOUNDED_LIMIT * 3 + 17;
        let buckets = 16u128;
        let trials = 4_000;
        let mut counts = vec![0usize; buckets as usize];

        for t in 0..trials {
            let mut rng = ChaCha8Rng::seed_from_u64(t as u64);
            for idx in sample_indices_with_rng(total, 4, &mut rng) {
                counts[(idx * buckets / total) as usize] += 1;
            }
        }

        let expected = (trials * 4) as f64 / buckets as f64;
        let chi2: f64 = counts
            .iter()
            .map(|&c| {
                let diff = c as f64 - expected;
                (diff * diff) / expected
            })
            .sum();

        // df = 15.
        assert!(chi2 < 60.0, "chi2 too large (chi2={chi2:.2}). counts={counts:?}");
    }
}
