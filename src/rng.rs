//! Mulberry32: a tiny 32-bit seeded generator.
//!
//! Stored seeds replay bets that were generated long ago, so the output sequence for a
//! seed is frozen. Do not change the constants.
//!
//! ```text
//! s  = s + 0x6D2B79F5
//! t  = (s ^ s >> 15) * (s | 1)
//! t ^= t + (t ^ t >> 7) * (t | 61)
//! out = t ^ t >> 14
//! ```
//!
//! All arithmetic wraps at 32 bits. `next_f64` divides by `2^32`, giving `[0, 1)`.
//!
//! It implements [`RngCore`], so every `rand` helper accepts it, but callers that need
//! reproducible transcripts should stick to [`Mulberry32::next_u32`] and
//! [`Mulberry32::next_f64`]: `rand`'s distributions are free to change between releases.

use rand::rand_core::impls;
use rand::{RngCore, SeedableRng};

const INCREMENT: u32 = 0x6D2B79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Mulberry32 generator state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Seed the generator.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Uniform value in `[0, 1)` with 32 bits of resolution.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.step()) / TWO_POW_32
    }

    #[inline]
    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_add(INCREMENT);
        let s = self.state;
        let mut t = (s ^ (s >> 15)).wrapping_mul(s | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }
}

impl RngCore for Mulberry32 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Float draw for any generator, matching [`Mulberry32::next_f64`] for Mulberry32.
#[inline]
pub(crate) fn unit_f64<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    f64::from(rng.next_u32()) / TWO_POW_32
}
