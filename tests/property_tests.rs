use bolao::sampler::{sample_indices, sample_indices_with_rng};
use bolao::space::{binomial, CombinationSpace};
use bolao::{BetSetService, GenerateRequest, PoolRules, SamplingConfig};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

proptest! {
    #[test]
    fn prop_binomial_symmetry(n in 0usize..120, k_frac in 0.0f64..=1.0) {
        let k = ((n as f64) * k_frac) as usize;
        prop_assert_eq!(binomial(n, k).unwrap(), binomial(n, n - k).unwrap());
        prop_assert_eq!(binomial(n, 0).unwrap(), 1);
        prop_assert_eq!(binomial(n, n).unwrap(), 1);
    }

    #[test]
    fn prop_pascal_rule(n in 1usize..120, k in 1usize..60) {
        prop_assume!(k < n);
        prop_assert_eq!(
            binomial(n, k).unwrap(),
            binomial(n - 1, k - 1).unwrap() + binomial(n - 1, k).unwrap()
        );
    }

    #[test]
    fn prop_unrank_rank_roundtrip(n in 1usize..100, k_frac in 0.0f64..=1.0, r in any::<u128>()) {
        let k = ((n as f64) * k_frac) as usize;
        let space = CombinationSpace::new(n, k).unwrap();
        let index = r % space.count();

        let combo = space.index_to_combination(index).unwrap();
        prop_assert_eq!(combo.len(), k);
        prop_assert!(combo.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(combo.iter().all(|&c| c < n));
        prop_assert_eq!(space.combination_to_index(&combo).unwrap(), index);
    }

    #[test]
    fn prop_unranking_preserves_order(n in 2usize..60, k in 1usize..8, r in any::<u128>()) {
        prop_assume!(k < n);
        let space = CombinationSpace::new(n, k).unwrap();
        prop_assume!(space.count() >= 2);
        let index = r % (space.count() - 1);

        let a = space.index_to_combination(index).unwrap();
        let b = space.index_to_combination(index + 1).unwrap();
        prop_assert!(a < b, "{:?} !< {:?}", a, b);
    }
}

proptest! {
    #[test]
    fn prop_sample_size_and_distinctness(
        total in 0u128..5_000,
        requested in 0usize..300,
        seed in any::<u32>(),
    ) {
        let s = sample_indices(total, requested, seed);
        prop_assert_eq!(s.len() as u128, (requested as u128).min(total));
        prop_assert!(s.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(s.iter().all(|&x| x < total));
        prop_assert_eq!(s, sample_indices(total, requested, seed));
    }

    #[test]
    fn prop_huge_sample_invariants(
        extra in 1u128..u128::MAX / 2,
        requested in 0usize..64,
        rng_seed in any::<u64>(),
    ) {
        let total = (1u128 << 32) + extra;
        let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);
        let s = sample_indices_with_rng(total, requested, &mut rng);
        prop_assert_eq!(s.len(), requested);
        prop_assert!(s.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(s.iter().all(|&x| x < total));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_generate_invariants(
        raw in prop::collection::vec(1i64..=60, 1..40),
        k in 1usize..8,
        sample_size in 0usize..400,
        seed in any::<u32>(),
    ) {
        let rules = PoolRules { numbers: 1..=60, pool_len: 1..=60 };
        let svc = BetSetService::new(rules, &SamplingConfig { hard_cap: 250 });
        let req = GenerateRequest { pool: raw.clone(), draw_size: k, sample_size, seed: Some(seed) };

        let mut pool = raw.clone();
        pool.sort_unstable();
        pool.dedup();
        prop_assume!(k <= pool.len());

        let set = svc.generate(&req).unwrap();
        let total = binomial(pool.len(), k).unwrap();
        prop_assert_eq!(set.total, total);
        prop_assert_eq!(set.seed, seed);
        prop_assert_eq!(set.items.len() as u128, (sample_size.min(250) as u128).min(total));

        let space = CombinationSpace::new(pool.len(), k).unwrap();
        for w in set.items.windows(2) {
            prop_assert!(w[0].position < w[1].position);
        }
        for it in &set.items {
            prop_assert_eq!(it.numbers.len(), k);
            prop_assert!(it.numbers.windows(2).all(|w| w[0] < w[1]));
            let combo: Vec<usize> = it
                .numbers
                .iter()
                .map(|&x| pool.binary_search(&i64::from(x)).unwrap())
                .collect();
            prop_assert_eq!(space.combination_to_index(&combo).unwrap() as i128, it.position);
        }

        prop_assert_eq!(set, svc.generate(&req).unwrap());
    }
}

#[test]
fn unranking_every_index_enumerates_the_space() {
    for (n, k) in [(10, 3), (12, 6), (15, 15), (20, 2), (7, 6)] {
        let space = CombinationSpace::new(n, k).unwrap();
        let all: Vec<Vec<usize>> = (0..space.count())
            .map(|i| space.index_to_combination(i).unwrap())
            .collect();
        assert_eq!(all, space.enumerate_all().unwrap());

        let distinct: std::collections::HashSet<_> = all.iter().collect();
        assert_eq!(distinct.len() as u128, space.count());
    }
}
