//! Checking bets against an official draw.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ValidationError;
use crate::lottery::Lottery;
use crate::service::BetItem;

/// A validated official result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    lottery: Lottery,
    numbers: Vec<u32>,
}

impl Draw {
    /// `numbers` must be exactly the lottery's drawn count of distinct, in-range values.
    /// Lotomania's printed `0` is accepted as `100`.
    pub fn new(lottery: Lottery, numbers: &[i64]) -> Result<Self, ValidationError> {
        let range = lottery.number_range();
        let mut canonical: Vec<i64> = lottery.canonicalize_all(numbers);
        canonical.sort_unstable();
        canonical.dedup();

        let valid = canonical.len() == numbers.len()
            && canonical.len() == lottery.drawn_count()
            && canonical
                .iter()
                .all(|&n| n >= i64::from(*range.start()) && n <= i64::from(*range.end()));

        if !valid {
            return Err(ValidationError::InvalidDraw {
                expected: lottery.drawn_count(),
                min: *range.start(),
                max: *range.end(),
                got: numbers.to_vec(),
            });
        }

        Ok(Self {
            lottery,
            numbers: canonical.into_iter().map(|n| n as u32).collect(),
        })
    }

    pub fn lottery(&self) -> Lottery {
        self.lottery
    }

    /// Drawn numbers, ascending.
    pub fn numbers(&self) -> &[u32] {
        &self.numbers
    }

    /// How many of `numbers` were drawn.
    pub fn hits(&self, numbers: &[u32]) -> usize {
        numbers
            .iter()
            .filter(|n| self.numbers.binary_search(n).is_ok())
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckedItem {
    pub position: i128,
    pub numbers: Vec<u32>,
    pub hits: usize,
    pub prize: bool,
}

/// Items per hit count, plus the number of prize-winning items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HitSummary {
    pub by_hits: BTreeMap<usize, usize>,
    pub prize_items: usize,
    pub best: Option<usize>,
}

pub fn check_items(draw: &Draw, items: &[BetItem]) -> Vec<CheckedItem> {
    items
        .iter()
        .map(|it| {
            let hits = draw.hits(&it.numbers);
            CheckedItem {
                position: it.position,
                numbers: it.numbers.clone(),
                hits,
                prize: draw.lottery.is_prize_tier(hits),
            }
        })
        .collect()
}

pub fn summarize(checked: &[CheckedItem]) -> HitSummary {
    let mut summary = HitSummary::default();
    for c in checked {
        *summary.by_hits.entry(c.hits).or_default() += 1;
        if c.prize {
            summary.prize_items += 1;
        }
    }
    summary.best = summary.by_hits.keys().next_back().copied();
    summary
}
