//! Bet set generation: pool in, reproducible sample of combinations out.
//!
//! `generate` and `resample` run the same pipeline:
//!
//! 1. normalize the pool (in range, deduped, ascending) and check its length;
//! 2. count `C(n, k)`;
//! 3. resolve the seed (caller's, or fresh entropy);
//! 4. clamp the sample to `min(sample_size, total, hard_cap)`;
//! 5. sample distinct combination indices and sort them;
//! 6. unrank each index and map it through the pool.
//!
//! Each item's `position` is its combination index, not a counter. Negative positions
//! are left for manually entered bets.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::{SamplingConfig, DEFAULT_HARD_CAP};
use crate::error::{DomainError, Error, Result, ValidationError};
use crate::lottery::{Lottery, PoolRules};
use crate::sampler::{Regime, SeededSampler};
use crate::space::CombinationSpace;
use crate::store::{SetId, SetStore};

/// One bet: a combination of pool numbers, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BetItem {
    pub position: i128,
    pub numbers: Vec<u32>,
}

impl BetItem {
    /// Entered by hand rather than generated.
    pub fn is_manual(&self) -> bool {
        self.position < 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(alias = "numbers")]
    pub pool: Vec<i64>,
    #[serde(alias = "k")]
    pub draw_size: usize,
    /// Omitted by routes that want as many bets as the cap allows.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    #[serde(default)]
    pub seed: Option<u32>,
}

fn default_sample_size() -> usize {
    DEFAULT_HARD_CAP
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResampleOptions {
    /// Falls back to the stored sample size.
    #[serde(default)]
    pub sample_size: Option<usize>,
    #[serde(default)]
    pub seed: Option<u32>,
}

/// A generated set of bets and what it takes to reproduce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BetSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_id: Option<SetId>,
    pub seed: u32,
    pub total: u128,
    pub items: Vec<BetItem>,
}

#[derive(Debug, Clone)]
pub struct BetSetService {
    rules: PoolRules,
    hard_cap: usize,
}

impl BetSetService {
    pub fn new(rules: PoolRules, config: &SamplingConfig) -> Self {
        Self {
            rules,
            hard_cap: config.hard_cap.max(1),
        }
    }

    /// Service with the lottery's pool rules and the default hard cap.
    pub fn for_lottery(lottery: Lottery) -> Self {
        Self::new(lottery.rules(), &SamplingConfig::default())
    }

    /// A cap of `0` is raised to `1`.
    pub fn with_hard_cap(mut self, hard_cap: usize) -> Self {
        self.hard_cap = hard_cap.max(1);
        self
    }

    pub fn hard_cap(&self) -> usize {
        self.hard_cap
    }

    pub fn rules(&self) -> &PoolRules {
        &self.rules
    }

    /// Generate a fresh bet set from a caller-supplied pool.
    pub fn generate(&self, request: &GenerateRequest) -> Result<BetSet> {
        let pool = self.rules.normalize(&request.pool)?;
        self.sample_pool(&pool, request.draw_size, request.sample_size, request.seed)
    }

    /// Regenerate the items of a stored set and replace them in `store`.
    ///
    /// The stored set's own lottery decides the pool rules. Nothing is written unless
    /// generation succeeds.
    pub fn resample<S: SetStore + ?Sized>(
        &self,
        store: &S,
        set_id: SetId,
        options: &ResampleOptions,
    ) -> Result<BetSet> {
        let set = store.load_set(set_id)?.ok_or(Error::SetNotFound(set_id))?;

        let raw: Vec<i64> = set.pool.iter().map(|&n| i64::from(n)).collect();
        let pool = set.lottery.rules().normalize(&raw)?;
        let sample_size = options.sample_size.unwrap_or(set.sample_size);

        let mut bet_set = self.sample_pool(&pool, set.draw_size, sample_size, options.seed)?;
        store.replace_items(set_id, bet_set.items.clone())?;
        bet_set.set_id = Some(set_id);

        info!(
            set_id = %set_id,
            lottery = %set.lottery,
            seed = bet_set.seed,
            items = bet_set.items.len(),
            "resampled set"
        );
        Ok(bet_set)
    }

    fn sample_pool(
        &self,
        pool: &[u32],
        draw_size: usize,
        sample_size: usize,
        seed: Option<u32>,
    ) -> Result<BetSet> {
        let n = pool.len();
        let k = draw_size;
        if k == 0 || k > n {
            return Err(ValidationError::InvalidDrawSize { n, k }.into());
        }

        let space = CombinationSpace::new(n, k).map_err(|e| match e {
            DomainError::CountOverflow { .. } => {
                Error::from(ValidationError::InvalidCombinationCount { n, k })
            }
            other => domain(other),
        })?;
        let total = space.count();
        // Positions are signed.
        if total == 0 || total > i128::MAX as u128 {
            return Err(ValidationError::InvalidCombinationCount { n, k }.into());
        }

        let seed = seed.unwrap_or_else(|| rand::rng().random());
        let effective = sample_size.min(self.hard_cap);
        let indices = SeededSampler::new(seed).sample(total, effective);

        let mut items = Vec::with_capacity(indices.len());
        for index in indices {
            let combo = space.index_to_combination(index).map_err(domain)?;
            // Pool is ascending and combo is increasing, so numbers come out ascending.
            let numbers = combo.iter().map(|&p| pool[p]).collect();
            items.push(BetItem {
                position: index as i128,
                numbers,
            });
        }

        debug!(
            n,
            k,
            total = %total,
            regime = ?Regime::for_total(total),
            requested = sample_size,
            items = items.len(),
            seed,
            "generated bet set"
        );

        Ok(BetSet {
            set_id: None,
            seed,
            total,
            items,
        })
    }
}

fn domain(err: DomainError) -> Error {
    error!(%err, "combinatorial invariant violated");
    Error::Domain(err)
}
