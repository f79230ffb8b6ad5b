use proptest::prelude::*;
use seqdiff::{
    DiffConfig, EditOp, Fingerprint, HeuristicDiff, Modulus, RollingHasher, TokenizeConfig, Tokens,
    algo::{CONTENT_BASE, CONTENT_MODULUS, DEFAULT_BASE},
    diff_with_config, exact_script, heuristic_script, lcs_length,
};

/// Sequences over a small alphabet so common subsequences are likely.
fn seq(max_len: usize, alphabet: u64) -> impl Strategy<Value = Vec<Fingerprint>> {
    prop::collection::vec((0..alphabet).prop_map(Fingerprint::from_raw), 0..max_len)
}

/// LCS by trying every subsequence of the shorter input and matching it
/// greedily against the longer one.
fn lcs_brute_force(a: &[Fingerprint], b: &[Fingerprint]) -> usize {
    let (small, big) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    assert!(small.len() <= 20);

    let mut best = 0;
    for mask in 0u32..(1 << small.len()) {
        let mut ptr = 0;
        let mut found = 0;
        for (i, token) in small.iter().enumerate() {
            if mask >> i & 1 == 0 {
                continue;
            }
            while ptr < big.len() && big[ptr] != *token {
                ptr += 1;
            }
            if ptr == big.len() {
                break;
            }
            found += 1;
            ptr += 1;
        }
        best = best.max(found);
    }
    best
}

proptest! {
    #[test]
    fn test_exact_length_identity(a in seq(60, 5), b in seq(60, 5)) {
        // Test invariant: |script| = |A| + |B| - LCS and the script is a valid alignment
        let script = exact_script(&a, &b).unwrap();
        let lcs = lcs_length(&a, &b).unwrap();

        prop_assert_eq!(script.len(), a.len() + b.len() - lcs);
        prop_assert_eq!(script.common_len(), lcs);
        prop_assert!(script.verify(&a, &b).is_ok());
        prop_assert_eq!(script.reconstruct_a(&a), a);
        prop_assert_eq!(script.reconstruct_b(&b), b);
    }

    #[test]
    fn test_lcs_matches_brute_force(a in seq(12, 4), b in seq(25, 4)) {
        prop_assert_eq!(lcs_length(&a, &b).unwrap(), lcs_brute_force(&a, &b));
    }

    #[test]
    fn test_heuristic_valid_and_never_shorter(a in seq(120, 6), b in seq(120, 6)) {
        // Test invariant: the heuristic covers both inputs and cannot beat the optimum
        let heuristic = heuristic_script(&a, &b).unwrap();
        let exact = exact_script(&a, &b).unwrap();

        prop_assert!(heuristic.verify(&a, &b).is_ok());
        prop_assert!(heuristic.len() >= exact.len());
        prop_assert!(heuristic.common_len() <= exact.common_len());
        prop_assert_eq!(heuristic.len(), a.len() + b.len() - heuristic.common_len());
    }

    #[test]
    fn test_heuristic_identical_inputs(a in seq(200, 3)) {
        let script = heuristic_script(&a, &a).unwrap();
        prop_assert_eq!(script.stats().matched, a.len());
        prop_assert!(script.iter().all(EditOp::is_match));
    }

    #[test]
    fn test_heuristic_prime_modulus(a in seq(80, 4), b in seq(80, 4)) {
        let script = HeuristicDiff::<PrimeHasher>::with_range_hasher().edit_script(&a, &b).unwrap();
        prop_assert!(script.verify(&a, &b).is_ok());
    }

    #[test]
    fn test_rolling_hash_no_false_negatives(
        tokens in prop::collection::vec(any::<u64>(), 1..40),
        prefix in prop::collection::vec(any::<u64>(), 0..10),
        suffix in prop::collection::vec(any::<u64>(), 0..10),
    ) {
        // Test invariant: equal windows hash equally wherever they sit
        let a: Vec<_> = tokens.iter().copied().map(Fingerprint::from_raw).collect();
        let b: Vec<_> = prefix
            .iter()
            .chain(&tokens)
            .chain(&suffix)
            .copied()
            .map(Fingerprint::from_raw)
            .collect();

        for modulus in [Modulus::Wrapping, Modulus::Prime(CONTENT_MODULUS)] {
            let base = if modulus == Modulus::Wrapping { DEFAULT_BASE } else { CONTENT_BASE };
            let ha = RollingHasher::with_modulus(&a, base, modulus);
            let hb = RollingHasher::with_modulus(&b, base, modulus);
            let offset = prefix.len();
            for l in 0..a.len() {
                for r in l..=a.len() {
                    prop_assert_eq!(ha.range_hash(l, r), hb.range_hash(offset + l, offset + r));
                }
            }
        }
    }

    #[test]
    fn test_auto_agrees_with_exact(a in seq(40, 5), b in seq(40, 5)) {
        let auto = diff_with_config(&a, &b, &DiffConfig::default()).unwrap();
        prop_assert_eq!(auto, exact_script(&a, &b).unwrap());
    }

    #[test]
    fn test_text_diff_reconstructs_input(a in "[ab\n]{0,40}", b in "[ab\n]{0,40}") {
        let config = TokenizeConfig::chars();
        let ta = Tokens::from_text(&a, &config);
        let tb = Tokens::from_text(&b, &config);
        let script = exact_script(ta.fingerprints(), tb.fingerprints()).unwrap();

        let texts: Vec<&str> = ta.texts().iter().map(|t| t.as_str()).collect();
        prop_assert_eq!(script.reconstruct_a(&texts).concat(), a);
    }
}

/// Rolling hasher over the prime modulus, as a `RangeHasher` instantiation.
struct PrimeHasher(RollingHasher);

impl seqdiff::RangeHasher for PrimeHasher {
    fn build(tokens: &[Fingerprint]) -> Self {
        Self(RollingHasher::with_modulus(tokens, CONTENT_BASE, Modulus::Prime(CONTENT_MODULUS)))
    }

    fn range_hash(&self, l: usize, r: usize) -> u64 {
        self.0.range_hash(l, r)
    }
}
