//! Lottery presets and pool rules.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Supported number lotteries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Lottery {
    MegaSena,
    Lotofacil,
    Quina,
    Lotomania,
}

impl Lottery {
    pub const ALL: [Lottery; 4] = [
        Lottery::MegaSena,
        Lottery::Lotofacil,
        Lottery::Quina,
        Lottery::Lotomania,
    ];

    /// Valid ball numbers, in canonical form.
    pub fn number_range(&self) -> RangeInclusive<u32> {
        match self {
            Lottery::MegaSena => 1..=60,
            Lottery::Lotofacil => 1..=25,
            Lottery::Quina => 1..=80,
            // Printed as 00..99; canonical 0 is 100.
            Lottery::Lotomania => 1..=100,
        }
    }

    /// Numbers per bet.
    pub fn bet_size(&self) -> usize {
        match self {
            Lottery::MegaSena => 6,
            Lottery::Lotofacil => 15,
            Lottery::Quina => 5,
            Lottery::Lotomania => 50,
        }
    }

    /// Numbers in an official draw.
    pub fn drawn_count(&self) -> usize {
        match self {
            Lottery::MegaSena => 6,
            Lottery::Lotofacil => 15,
            Lottery::Quina => 5,
            Lottery::Lotomania => 20,
        }
    }

    /// Accepted pool lengths.
    pub fn pool_len(&self) -> RangeInclusive<usize> {
        match self {
            Lottery::MegaSena => 7..=15,
            Lottery::Lotofacil => 15..=20,
            Lottery::Quina => 6..=15,
            Lottery::Lotomania => 50..=100,
        }
    }

    /// Whether a bet with `hits` matches wins a prize.
    pub fn is_prize_tier(&self, hits: usize) -> bool {
        match self {
            Lottery::MegaSena => (4..=6).contains(&hits),
            Lottery::Lotofacil => (11..=15).contains(&hits),
            Lottery::Quina => (2..=5).contains(&hits),
            Lottery::Lotomania => hits == 0 || (15..=20).contains(&hits),
        }
    }

    /// Map a printed number to its canonical value (Lotomania prints 100 as `0`).
    pub fn canonicalize(&self, raw: i64) -> i64 {
        match (self, raw) {
            (Lottery::Lotomania, 0) => 100,
            _ => raw,
        }
    }

    /// [`Lottery::canonicalize`] over a whole input list.
    pub fn canonicalize_all(&self, raw: &[i64]) -> Vec<i64> {
        raw.iter().map(|&n| self.canonicalize(n)).collect()
    }

    /// Pool rules for this lottery.
    pub fn rules(&self) -> PoolRules {
        PoolRules {
            numbers: self.number_range(),
            pool_len: self.pool_len(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Lottery::MegaSena => "mega-sena",
            Lottery::Lotofacil => "lotofacil",
            Lottery::Quina => "quina",
            Lottery::Lotomania => "lotomania",
        }
    }
}

impl fmt::Display for Lottery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lottery {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match key.as_str() {
            "mega-sena" | "megasena" => Ok(Lottery::MegaSena),
            "lotofacil" | "lotofácil" => Ok(Lottery::Lotofacil),
            "quina" => Ok(Lottery::Quina),
            "lotomania" => Ok(Lottery::Lotomania),
            _ => Err(ValidationError::UnknownLottery(s.to_string())),
        }
    }
}

/// Which numbers a pool may contain and how many.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolRules {
    pub numbers: RangeInclusive<u32>,
    pub pool_len: RangeInclusive<usize>,
}

impl PoolRules {
    /// Keep in-range values, dedupe, sort, then check the length.
    pub fn normalize(&self, raw: &[i64]) -> Result<Vec<u32>, ValidationError> {
        let lo = i64::from(*self.numbers.start());
        let hi = i64::from(*self.numbers.end());

        let mut pool: Vec<u32> = raw
            .iter()
            .filter(|&&n| (lo..=hi).contains(&n))
            .map(|&n| n as u32)
            .collect();
        pool.sort_unstable();
        pool.dedup();

        if !self.pool_len.contains(&pool.len()) {
            return Err(ValidationError::PoolSize {
                min: *self.pool_len.start(),
                max: *self.pool_len.end(),
                got: pool.len(),
            });
        }
        Ok(pool)
    }
}
