//! `bolao`: combination indexing and seed-reproducible bet sampling for number lotteries.
//!
//! Given a pool of `n` chosen numbers and a bet size `k`, this crate counts `C(n, k)`
//! exactly, maps indices to combinations and back without enumerating the space, and
//! draws a uniform sample of combinations that replays bit-for-bit from a 32-bit seed.
//!
//! Exposed modules:
//! - `space`: exact binomials and lexicographic (un)ranking of k-subsets.
//! - `rng`: the Mulberry32 seeded generator.
//! - `sampler`: distinct-index sampling (partial Fisher–Yates / rejection).
//! - `service`: `generate` / `resample` orchestration over a pool.
//! - `lottery`: Mega-Sena, Lotofácil, Quina, Lotomania presets.
//! - `store`: the persistence seam for stored sets.
//! - `checker`: hit counting against official draws.

#![forbid(unsafe_code)]

pub mod checker;
pub mod config;
pub mod error;
pub mod lottery;
pub mod rng;
pub mod sampler;
pub mod service;
pub mod space;
pub mod store;

pub use checker::{check_items, summarize, CheckedItem, Draw, HitSummary};
pub use config::{Config, SamplingConfig, DEFAULT_HARD_CAP};
pub use error::{ConfigError, DomainError, Error, ErrorBody, Result, ValidationError};
pub use lottery::{Lottery, PoolRules};
pub use rng::Mulberry32;
pub use sampler::{sample_indices, sample_indices_with_rng, Regime, SeededSampler};
pub use service::{BetItem, BetSet, BetSetService, GenerateRequest, ResampleOptions};
pub use space::{binomial, CombinationSpace, MAX_ENUMERATION};
pub use store::{InMemorySetStore, SetId, SetStore, StoredSet};
