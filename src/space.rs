//! Combination spaces: exact counting and lexicographic (un)ranking of k-subsets.
//!
//! A k-combination of `{0, .., n-1}` is an increasing tuple `c_0 < c_1 < .. < c_{k-1}`.
//! Tuples are ordered lexicographically: `A < B` iff at the first differing position
//! `A` holds the smaller element. The rank of a tuple is its position in that order.
//!
//! Unranking uses the combinatorial number system (combinadic). The combinadic of the
//! complemented tuple `n-1-c_i` is the *reverse* lexicographic rank, so we unrank
//! `total - 1 - index` greedily and complement back:
//!
//! \[
//! \mathrm{rank}(c) = \binom{n}{k} - 1 - \sum_{i=0}^{k-1} \binom{n-1-c_i}{k-i}
//! \]
//!
//! This never materializes the space, so indices into `C(100, 50) ≈ 1e29` are fine.
//!
//! ## References
//!
//! - Knuth, TAOCP Vol. 4A, §7.2.1.3 (combinatorial number system).
//! - Buckles & Lybanon (1977): Algorithm 515, generation of a vector from its
//!   lexicographical index.

use crate::error::DomainError;

/// Largest space [`CombinationSpace::enumerate_all`] will materialize.
pub const MAX_ENUMERATION: usize = 200_000;

/// Pascal tables above this many cells are not cached.
const TABLE_LIMIT: usize = 1 << 16;

/// Exact `C(n, k)`.
///
/// Each step divides out the gcd first, so intermediates never exceed the final result
/// by more than a factor of `n`.
pub fn binomial(n: usize, k: usize) -> Result<u128, DomainError> {
    if k > n {
        return Err(DomainError::InvalidDrawSize { n, k });
    }
    let small = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..small {
        let num = (n - i) as u128;
        let den = (i + 1) as u128;
        let g = gcd(acc, den);
        // acc * num / den is C(n, i + 1); den / g is coprime with acc / g so it divides num.
        acc = (acc / g)
            .checked_mul(num / (den / g))
            .ok_or(DomainError::CountOverflow { n, k })?;
    }
    Ok(acc)
}

/// `C(n, k)`, with `0` for `k > n` and `u128::MAX` on overflow.
fn binomial_saturating(n: usize, k: usize) -> u128 {
    match binomial(n, k) {
        Ok(c) => c,
        Err(DomainError::InvalidDrawSize { .. }) => 0,
        Err(_) => u128::MAX,
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// `C(n, k)`. Same as [`binomial`].
pub fn count(n: usize, k: usize) -> Result<u128, DomainError> {
    binomial(n, k)
}

/// Unrank `index` in the space of k-subsets of an n-set.
pub fn index_to_combination(index: u128, n: usize, k: usize) -> Result<Vec<usize>, DomainError> {
    CombinationSpace::new(n, k)?.index_to_combination(index)
}

/// Rank `combination` in the space of k-subsets of an n-set.
pub fn combination_to_index(combination: &[usize], n: usize, k: usize) -> Result<u128, DomainError> {
    CombinationSpace::new(n, k)?.combination_to_index(combination)
}

/// The k-subsets of `{0, .., n-1}`, with exact size and bijective indexing.
#[derive(Debug, Clone)]
pub struct CombinationSpace {
    n: usize,
    k: usize,
    total: u128,
    /// Row-major `C(v, r)` for `r <= k`, `v <= n`, saturating at `u128::MAX`.
    table: Option<Vec<u128>>,
}

impl CombinationSpace {
    /// Create the space of `k`-subsets of an `n`-set.
    ///
    /// Fails if `k > n` or if `C(n, k)` does not fit in a `u128`.
    pub fn new(n: usize, k: usize) -> Result<Self, DomainError> {
        let total = binomial(n, k)?;
        let cells = (n + 1).saturating_mul(k + 1);
        let table = (cells <= TABLE_LIMIT).then(|| pascal_table(n, k));
        Ok(Self { n, k, total, table })
    }

    /// Pool size.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Combination size.
    pub fn k(&self) -> usize {
        self.k
    }

    /// `C(n, k)`.
    pub fn count(&self) -> u128 {
        self.total
    }

    #[inline]
    fn choose(&self, v: usize, r: usize) -> u128 {
        if r > v {
            return 0;
        }
        match &self.table {
            Some(t) => t[r * (self.n + 1) + v],
            None => binomial_saturating(v, r),
        }
    }

    /// The combination at lexicographic rank `index`.
    pub fn index_to_combination(&self, index: u128) -> Result<Vec<usize>, DomainError> {
        if index >= self.total {
            return Err(DomainError::IndexOutOfRange {
                index,
                total: self.total,
            });
        }

        let mut m = self.total - 1 - index;
        let mut out = Vec::with_capacity(self.k);
        let mut upper = self.n;

        for r in (1..=self.k).rev() {
            // Largest v < upper with C(v, r) <= m. C(r - 1, r) = 0 bounds the scan.
            let mut v = upper - 1;
            while self.choose(v, r) > m {
                v -= 1;
            }
            m -= self.choose(v, r);
            out.push(self.n - 1 - v);
            upper = v;
        }

        Ok(out)
    }

    /// Lexicographic rank of `combination`.
    pub fn combination_to_index(&self, combination: &[usize]) -> Result<u128, DomainError> {
        let invalid = |reason| DomainError::InvalidCombination {
            n: self.n,
            k: self.k,
            reason,
        };

        if combination.len() != self.k {
            return Err(invalid("wrong length"));
        }
        if combination.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invalid("not strictly increasing"));
        }
        if combination.last().is_some_and(|&c| c >= self.n) {
            return Err(invalid("element out of range"));
        }

        let mut complement: u128 = 0;
        for (i, &c) in combination.iter().enumerate() {
            complement += self.choose(self.n - 1 - c, self.k - i);
        }
        Ok(self.total - 1 - complement)
    }

    /// Lazily iterate every combination in lexicographic order.
    pub fn combinations(&self) -> Combinations {
        Combinations {
            n: self.n,
            current: Some((0..self.k).collect()),
        }
    }

    /// Materialize every combination in lexicographic order.
    ///
    /// Refuses spaces larger than [`MAX_ENUMERATION`].
    pub fn enumerate_all(&self) -> Result<Vec<Vec<usize>>, DomainError> {
        if self.total > MAX_ENUMERATION as u128 {
            return Err(DomainError::EnumerationTooLarge {
                count: self.total,
                limit: MAX_ENUMERATION,
            });
        }

        let all: Vec<Vec<usize>> = self.combinations().collect();
        if all.len() as u128 != self.total {
            return Err(DomainError::EnumerationMismatch {
                expected: self.total,
                got: all.len(),
            });
        }
        Ok(all)
    }
}

fn pascal_table(n: usize, k: usize) -> Vec<u128> {
    let w = n + 1;
    let mut t = vec![0u128; w * (k + 1)];
    t[..w].fill(1);
    for r in 1..=k {
        for v in 1..=n {
            t[r * w + v] = t[(r - 1) * w + v - 1].saturating_add(t[r * w + v - 1]);
        }
    }
    t
}

/// Lexicographic successor iterator over k-combinations.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    current: Option<Vec<usize>>,
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.current.take()?;
        let k = out.len();

        // Rightmost position that can still move up.
        let mut next = out.clone();
        let pivot = (0..k).rev().find(|&i| next[i] < self.n - k + i);
        if let Some(i) = pivot {
            next[i] += 1;
            for j in i + 1..k {
                next[j] = next[j - 1] + 1;
            }
            self.current = Some(next);
        }

        Some(out)
    }
}
