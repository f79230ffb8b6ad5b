//! Anchor-and-split heuristic diff
//!
//! Finds a long common substring (the *anchor*) with rolling hashes, assumes it
//! was not edited, and solves the ranges left and right of it independently.
//! When one side of a range is empty the answer is trivial.
//!
//! # Algorithm
//!
//! 1. Probe length `L` starts at `min(|A|, |B|)` and only ever shrinks,
//!    geometrically by 2/3, across the whole call.
//! 2. For a range pair, hash every length-`L` window of the A range into a map,
//!    then scan the B range left to right for the first window whose hash is
//!    present. No hit means `L` shrinks and the probe repeats.
//! 3. The hit is re-checked token by token and extended greedily. A hash
//!    collision can only produce a shorter (possibly empty) anchor.
//! 4. Split: left range, anchor matches, right range.
//!
//! # Complexity
//!
//! Expected O((n + m) log(n + m)) map operations. Inputs with no long common
//! substrings only make it slower, never wrong.
//!
//! # Correctness
//!
//! Ops are emitted only by the two empty-range cases and by the verified
//! anchor extension, never straight from a hash hit, so every index of A and B
//! appears exactly once whatever the hasher does. The script is not always
//! shortest.
//!
//! # Stack usage
//!
//! Splits are driven by an explicit work stack instead of recursion, with the
//! same left / anchor / right order. Nesting depth is capped by
//! [`HeuristicDiff::with_max_depth`].

use std::fmt;
use std::marker::PhantomData;

use rustc_hash::FxHashMap;
use smallvec::{SmallVec, smallvec};
use tracing::{debug, debug_span, trace};

use crate::edit::{EditOp, EditScript};
use crate::error::{DiffError, DiffResult};
use crate::fingerprint::Fingerprint;

use super::rolling::{RangeHasher, RollingHasher};

/// Default maximum split nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 1_000_000;

// =============================================================================
// HeuristicDiff
// =============================================================================

/// Sub-quadratic approximate diff engine, generic over the range hasher.
pub struct HeuristicDiff<H = RollingHasher> {
    max_depth: usize,
    _hasher: PhantomData<fn() -> H>,
}

impl HeuristicDiff {
    /// Engine using the polynomial [`RollingHasher`].
    pub fn new() -> Self {
        Self::with_range_hasher()
    }
}

impl Default for HeuristicDiff {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Clone for HeuristicDiff<H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for HeuristicDiff<H> {}

impl<H> fmt::Debug for HeuristicDiff<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeuristicDiff")
            .field("max_depth", &self.max_depth)
            .field("hasher", &std::any::type_name::<H>())
            .finish()
    }
}

impl<H: RangeHasher> HeuristicDiff<H> {
    /// Engine using a custom range hasher.
    pub fn with_range_hasher() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH, _hasher: PhantomData }
    }

    /// Cap split nesting; deeper inputs fail with [`DiffError::DepthExceeded`].
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Approximate edit script transforming `a` into `b`
    pub fn edit_script(&self, a: &[Fingerprint], b: &[Fingerprint]) -> DiffResult<EditScript> {
        let _span = debug_span!("heuristic_diff", len_a = a.len(), len_b = b.len()).entered();

        let mut ctx = SearchContext::<H>::new(a, b);
        ctx.run(self.max_depth)?;

        debug!(
            ops = ctx.ops.len(),
            anchors = ctx.anchors,
            probes = ctx.probes,
            final_probe_len = ctx.probe_len,
            "heuristic diff complete"
        );
        Ok(EditScript::new(ctx.ops))
    }
}

// =============================================================================
// Search Context
// =============================================================================

/// Pending work, popped LIFO.
#[derive(Debug, Clone, Copy)]
enum Task {
    /// Solve `A[la..ra)` against `B[lb..rb)`; anchors longer than `max_common` are not sought
    Solve { la: usize, ra: usize, lb: usize, rb: usize, max_common: usize, depth: usize },
    /// Emit `len` matches starting after `(sa, sb)`
    Matches { sa: usize, sb: usize, len: usize },
}

/// State owned by a single diff call.
struct SearchContext<'a, H> {
    a: &'a [Fingerprint],
    b: &'a [Fingerprint],
    hasher_a: H,
    hasher_b: H,
    /// Current probe length, shrinking monotonically over the whole call
    probe_len: usize,
    /// Window hash -> start in A; cleared per probe
    windows: FxHashMap<u64, usize>,
    ops: Vec<EditOp>,
    probes: usize,
    anchors: usize,
}

impl<'a, H: RangeHasher> SearchContext<'a, H> {
    fn new(a: &'a [Fingerprint], b: &'a [Fingerprint]) -> Self {
        Self {
            a,
            b,
            hasher_a: H::build(a),
            hasher_b: H::build(b),
            probe_len: a.len().min(b.len()),
            windows: FxHashMap::default(),
            ops: Vec::with_capacity(a.len() + b.len()),
            probes: 0,
            anchors: 0,
        }
    }

    fn run(&mut self, max_depth: usize) -> DiffResult<()> {
        let (n, m) = (self.a.len(), self.b.len());
        let mut stack: SmallVec<[Task; 32]> =
            smallvec![Task::Solve { la: 0, ra: n, lb: 0, rb: m, max_common: n.min(m), depth: 0 }];

        while let Some(task) = stack.pop() {
            match task {
                Task::Matches { sa, sb, len } => {
                    self.ops.extend((1..=len).map(|k| EditOp::Match { pos_a: sa + k, pos_b: sb + k }));
                }
                Task::Solve { la, ra, lb, rb, .. } if la == ra => {
                    self.ops.extend((lb..rb).map(|i| EditOp::Insert { pos_b: i + 1 }));
                }
                Task::Solve { la, ra, lb, rb, .. } if lb == rb => {
                    self.ops.extend((la..ra).map(|i| EditOp::Delete { pos_a: i + 1 }));
                }
                Task::Solve { la, ra, lb, rb, max_common, depth } => {
                    if depth > max_depth {
                        return Err(DiffError::DepthExceeded { depth, limit: max_depth });
                    }

                    let (sa, sb) = self.common_substring(la, ra, lb, rb, max_common);
                    let limit = (ra - sa).min(rb - sb);
                    let mut len = 0;
                    while len < limit && self.a[sa + len] == self.b[sb + len] {
                        len += 1;
                    }
                    self.anchors += 1;

                    // Pushed in reverse: left range runs first
                    stack.push(Task::Solve {
                        la: sa + len,
                        ra,
                        lb: sb + len,
                        rb,
                        max_common: len.min(limit - len),
                        depth: depth + 1,
                    });
                    stack.push(Task::Matches { sa, sb, len });
                    stack.push(Task::Solve {
                        la,
                        ra: sa,
                        lb,
                        rb: sb,
                        max_common: len.min(sa - la).min(sb - lb),
                        depth: depth + 1,
                    });
                }
            }
        }
        Ok(())
    }

    /// Start of an (approximately) longest common substring of the two ranges.
    ///
    /// Only the start is returned; its length is re-measured on raw tokens.
    fn common_substring(&mut self, la: usize, ra: usize, lb: usize, rb: usize, max_common: usize) -> (usize, usize) {
        while self.probe_len > max_common {
            self.shrink_probe();
        }
        loop {
            if let Some(found) = self.find_by_len(la, ra, lb, rb) {
                return found;
            }
            self.shrink_probe();
        }
    }

    /// First B window (scanning left to right) whose hash matches some A window
    /// of the current probe length.
    fn find_by_len(&mut self, la: usize, ra: usize, lb: usize, rb: usize) -> Option<(usize, usize)> {
        let len = self.probe_len;
        self.probes += 1;

        // Empty windows match everywhere
        if len == 0 {
            return Some((ra, lb));
        }
        if len > ra - la || len > rb - lb {
            return None;
        }

        self.windows.clear();
        for i in la..=ra - len {
            self.windows.insert(self.hasher_a.range_hash(i, i + len), i);
        }
        (lb..=rb - len).find_map(|j| {
            self.windows
                .get(&self.hasher_b.range_hash(j, j + len))
                .map(|&i| (i, j))
        })
    }

    fn shrink_probe(&mut self) {
        self.probe_len = self.probe_len * 2 / 3;
        trace!(probe_len = self.probe_len, "probe length shrunk");
    }
}

// =============================================================================
// Main API
// =============================================================================

/// Approximate edit script with the default hasher and limits
pub fn heuristic_script(a: &[Fingerprint], b: &[Fingerprint]) -> DiffResult<EditScript> {
    HeuristicDiff::new().edit_script(a, b)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::exact::exact_script;

    fn fps(nums: &[u64]) -> Vec<Fingerprint> {
        nums.iter().map(|&n| Fingerprint::from_raw(n)).collect()
    }

    /// Deterministic pseudo-random sequence over a small alphabet.
    fn lcg_seq(seed: u64, len: usize, alphabet: u64) -> Vec<Fingerprint> {
        let mut state = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
                Fingerprint::from_raw((state >> 33) % alphabet)
            })
            .collect()
    }

    /// Every window hashes to the same value.
    struct Colliding;

    impl RangeHasher for Colliding {
        fn build(_tokens: &[Fingerprint]) -> Self {
            Colliding
        }

        fn range_hash(&self, _l: usize, _r: usize) -> u64 {
            7
        }
    }

    #[test]
    fn test_empty_sequences() {
        let script = heuristic_script(&[], &[]).unwrap();
        assert!(script.is_empty());
    }

    #[test]
    fn test_one_side_empty() {
        let a = fps(&[1, 2, 3]);
        assert_eq!(heuristic_script(&a, &[]).unwrap(), EditScript::delete_all(3));
        assert_eq!(heuristic_script(&[], &a).unwrap(), EditScript::insert_all(3));
    }

    #[test]
    fn test_identical_sequences_all_match() {
        let a = fps(&[4, 8, 15, 16, 23, 42]);
        let script = heuristic_script(&a, &a).unwrap();
        assert_eq!(script.stats().matched, 6);
        assert!(script.stats().is_empty());
    }

    #[test]
    fn test_small_split() {
        let script = heuristic_script(&fps(&[1, 3]), &fps(&[2, 3])).unwrap();
        assert_eq!(
            script.ops,
            vec![
                EditOp::Delete { pos_a: 1 },
                EditOp::Insert { pos_b: 1 },
                EditOp::Match { pos_a: 2, pos_b: 2 },
            ]
        );
    }

    #[test]
    fn test_anchor_in_middle() {
        let a = fps(&[9, 1, 2, 3, 4, 5, 8]);
        let b = fps(&[7, 7, 1, 2, 3, 4, 5, 6]);
        let script = heuristic_script(&a, &b).unwrap();
        assert!(script.verify(&a, &b).is_ok());
        assert_eq!(script.stats().matched, 5);
    }

    #[test]
    fn test_coverage_with_colliding_hasher() {
        let engine = HeuristicDiff::<Colliding>::with_range_hasher();
        for seed in 0..50 {
            let a = lcg_seq(seed, 1 + (seed as usize * 7) % 40, 4);
            let b = lcg_seq(seed + 1000, 1 + (seed as usize * 11) % 40, 4);
            let script = engine.edit_script(&a, &b).unwrap();
            script.verify(&a, &b).unwrap();
        }
    }

    #[test]
    fn test_never_shorter_than_exact() {
        for seed in 0..100 {
            let a = lcg_seq(seed, (seed as usize * 13) % 60, 6);
            let b = lcg_seq(seed ^ 0xdead, (seed as usize * 17) % 60, 6);
            let heuristic = heuristic_script(&a, &b).unwrap();
            let exact = exact_script(&a, &b).unwrap();
            heuristic.verify(&a, &b).unwrap();
            assert!(heuristic.len() >= exact.len(), "seed {seed}");
        }
    }

    #[test]
    fn test_large_input_with_few_edits() {
        // Distinct tokens so the only common substrings are the unedited runs
        let a: Vec<_> = (0..20_000u64).map(|i| Fingerprint::from_raw(i * 31 + 7)).collect();
        let mut b = a.clone();
        b.remove(10_000);
        b.insert(500, Fingerprint::from_raw(u64::MAX));
        b[15_000] = Fingerprint::from_raw(u64::MAX - 1);

        let script = heuristic_script(&a, &b).unwrap();
        script.verify(&a, &b).unwrap();
        assert!(script.stats().edit_count() <= 10);
    }

    #[test]
    fn test_disjoint_inputs() {
        let a: Vec<_> = (0..500).map(Fingerprint::from_raw).collect();
        let b: Vec<_> = (1000..1300).map(Fingerprint::from_raw).collect();
        let script = heuristic_script(&a, &b).unwrap();
        assert_eq!(script.stats(), crate::ScriptStats { matched: 0, inserted: 300, deleted: 500 });
        script.verify(&a, &b).unwrap();
    }

    #[test]
    fn test_depth_limit() {
        let a = fps(&[1, 2, 3]);
        let b = fps(&[1, 9, 3]);
        let err = HeuristicDiff::new().with_max_depth(0).edit_script(&a, &b).unwrap_err();
        assert!(matches!(err, DiffError::DepthExceeded { depth: 1, limit: 0 }));
        assert!(HeuristicDiff::new().edit_script(&a, &b).is_ok());
    }

    #[test]
    fn test_repeated_calls_identical() {
        let engine = HeuristicDiff::new();
        let a = lcg_seq(1, 300, 5);
        let b = lcg_seq(2, 280, 5);
        assert_eq!(engine.edit_script(&a, &b).unwrap(), engine.edit_script(&a, &b).unwrap());
    }

    #[test]
    fn test_engine_is_send_sync() {
        static_assertions::assert_impl_all!(HeuristicDiff: Send, Sync, Copy);
    }
}
