//! Move operators, one per encoding.
//!
//! - [`FlipBits`]: flip `k` distinct bits of a binary solution.
//! - [`HypersphereJump`]: jump a real solution a fixed distance in a uniformly
//!   random direction.
//! - [`SubstituteAttributes`]: give `k` discrete attributes a different value.
//! - [`SwapPairs`]: exchange values within `k` disjoint index pairs of a
//!   permutation.
//!
//! Ledger-producing operators carry the source fitness over to the neighbor
//! so a partial objective can update it from the ledger alone.

use std::marker::PhantomData;

use rand::seq::index;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use super::combinatorics::{
    binomial, cartesian_product, disjoint_pair_count, elementary_symmetric, perfect_matchings,
    Combinations,
};
use super::moves::{Move, Neighbor};
use crate::error::{Error, Result};
use crate::fitness::Modifs;
use crate::representation::{
    Attribute, BinaryEncoding, DiscreteEncoding, Encoding, EncodingKind, PermutationEncoding,
    RealEncoding, Solution,
};

// ============================================================================
// Flip bits
// ============================================================================

/// Flips `k` distinct bits.
///
/// Every neighbor is at Hamming distance exactly `k` from its source.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_metabench::neighborhood::{FlipBits, Move};
/// use u_metabench::random::create_rng;
/// use u_metabench::representation::{BinaryEncoding, Solution};
///
/// let enc = Arc::new(BinaryEncoding::new(5).unwrap());
/// let source = Solution::new(vec![0, 0, 1, 0, 1], enc).unwrap();
/// let mut rng = create_rng(42);
///
/// let all = FlipBits.enumerate(&source, 1, 10, &mut rng).unwrap();
/// assert_eq!(all.len(), 5);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FlipBits;

impl FlipBits {
    fn check(solution: &Solution<BinaryEncoding>, k: usize) -> Result<()> {
        if k == 0 {
            return Err(Error::InvalidMoveStep {
                operator: "flip-bits",
                reason: "must flip at least one bit".into(),
            });
        }
        if k > solution.len() {
            return Err(Error::StepExceedsCandidates {
                operator: "flip-bits",
                requested: k,
                available: solution.len(),
            });
        }
        Ok(())
    }

    fn flip(solution: &Solution<BinaryEncoding>, indices: &[usize]) -> Neighbor<BinaryEncoding> {
        let source = solution.values();
        let mut neighbor = solution.copy(false);
        let mut modifs = Modifs::with_capacity(indices.len());
        for &i in indices {
            let after = source[i] ^ 1;
            neighbor.set(i, after);
            modifs.add_modif(i, source[i], after);
        }
        neighbor.reassert_fitness(solution.fitness());
        Neighbor::new(neighbor, modifs)
    }
}

impl Move for FlipBits {
    type Encoding = BinaryEncoding;
    type Step = usize;

    fn name(&self) -> &'static str {
        "flip-bits"
    }

    fn apply<R: Rng + ?Sized>(
        &self,
        solution: &Solution<BinaryEncoding>,
        k: usize,
        rng: &mut R,
    ) -> Result<Neighbor<BinaryEncoding>> {
        Self::check(solution, k)?;
        let indices = index::sample(rng, solution.len(), k).into_vec();
        Ok(Self::flip(solution, &indices))
    }

    fn candidate_count(&self, solution: &Solution<BinaryEncoding>, k: usize) -> Result<Option<u128>> {
        Self::check(solution, k)?;
        Ok(binomial(solution.len(), k))
    }

    fn all_candidates(
        &self,
        solution: &Solution<BinaryEncoding>,
        k: usize,
    ) -> Result<Vec<Neighbor<BinaryEncoding>>> {
        Self::check(solution, k)?;
        Ok(Combinations::new(solution.len(), k)
            .map(|indices| Self::flip(solution, &indices))
            .collect())
    }
}

// ============================================================================
// Hypersphere jump
// ============================================================================

/// Moves a real solution by `radius` along a uniformly random direction,
/// then clamps it back into bounds.
///
/// The direction is a standard-normal vector scaled to unit length, which
/// is uniform on the sphere. The ledger stays empty: a jump touches every
/// coordinate, so neighbors are always re-evaluated in full.
#[derive(Debug, Clone, Copy, Default)]
pub struct HypersphereJump;

impl HypersphereJump {
    fn check(radius: f64) -> Result<()> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(Error::InvalidMoveStep {
                operator: "hypersphere-jump",
                reason: format!("radius must be finite and non-negative, got {radius}"),
            });
        }
        Ok(())
    }

    fn direction<R: Rng + ?Sized>(dim: usize, rng: &mut R) -> Vec<f64> {
        loop {
            let v: Vec<f64> = (0..dim)
                .map(|_| {
                    let x: f64 = StandardNormal.sample(rng);
                    x
                })
                .collect();
            let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
            if norm > 0.0 {
                return v.into_iter().map(|x| x / norm).collect();
            }
        }
    }
}

impl Move for HypersphereJump {
    type Encoding = RealEncoding;
    type Step = f64;

    fn name(&self) -> &'static str {
        "hypersphere-jump"
    }

    fn apply<R: Rng + ?Sized>(
        &self,
        solution: &Solution<RealEncoding>,
        radius: f64,
        rng: &mut R,
    ) -> Result<Neighbor<RealEncoding>> {
        Self::check(radius)?;
        let direction = Self::direction(solution.len(), rng);
        let mut neighbor = solution.copy(false);
        for (i, (x, d)) in solution.values().iter().zip(&direction).enumerate() {
            neighbor.set(i, x + radius * d);
        }
        neighbor.clamp_to_bounds();
        Ok(Neighbor::new(neighbor, Modifs::new()))
    }

    fn candidate_count(&self, _solution: &Solution<RealEncoding>, radius: f64) -> Result<Option<u128>> {
        Self::check(radius)?;
        Ok(None)
    }

    fn all_candidates(
        &self,
        _solution: &Solution<RealEncoding>,
        _radius: f64,
    ) -> Result<Vec<Neighbor<RealEncoding>>> {
        Err(Error::Unsupported {
            operation: "exhaustive enumeration",
            kind: EncodingKind::Real,
        })
    }
}

// ============================================================================
// Substitute attributes
// ============================================================================

/// Replaces `k` discrete attributes with a uniformly drawn different value.
///
/// Attributes whose domain has a single value cannot change and are never
/// picked. No ledger entry has `before == after`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstituteAttributes;

impl SubstituteAttributes {
    /// Indices that admit at least one alternative value.
    fn eligible(solution: &Solution<DiscreteEncoding>) -> Vec<usize> {
        (0..solution.len())
            .filter(|&i| !Self::alternatives(solution, i).is_empty())
            .collect()
    }

    fn bounds(solution: &Solution<DiscreteEncoding>, i: usize) -> (i64, i64) {
        let bounds = solution.encoding().boundaries();
        match bounds {
            Some(b) => (b.min_val(i), b.max_val(i)),
            None => (i64::MIN, i64::MAX),
        }
    }

    /// Count of values attribute `i` can move to.
    fn alternative_count(solution: &Solution<DiscreteEncoding>, i: usize) -> u128 {
        let domain = solution.encoding().domain_size(i);
        let (lo, hi) = Self::bounds(solution, i);
        let current = solution.values()[i];
        if (lo..=hi).contains(&current) {
            domain - 1
        } else {
            domain
        }
    }

    fn alternatives(solution: &Solution<DiscreteEncoding>, i: usize) -> AlternativeRange {
        let (lo, hi) = Self::bounds(solution, i);
        AlternativeRange {
            lo,
            hi,
            current: solution.values()[i],
        }
    }

    fn check(solution: &Solution<DiscreteEncoding>, k: usize) -> Result<Vec<usize>> {
        if k == 0 {
            return Err(Error::InvalidMoveStep {
                operator: "substitute-attributes",
                reason: "must substitute at least one attribute".into(),
            });
        }
        let eligible = Self::eligible(solution);
        if k > eligible.len() {
            return Err(Error::StepExceedsCandidates {
                operator: "substitute-attributes",
                requested: k,
                available: eligible.len(),
            });
        }
        Ok(eligible)
    }

    fn substitute(
        solution: &Solution<DiscreteEncoding>,
        changes: &[(usize, i64)],
    ) -> Neighbor<DiscreteEncoding> {
        let source = solution.values();
        let mut neighbor = solution.copy(false);
        let mut modifs = Modifs::with_capacity(changes.len());
        for &(i, after) in changes {
            neighbor.set(i, after);
            modifs.add_modif(i, source[i], after);
        }
        neighbor.reassert_fitness(solution.fitness());
        Neighbor::new(neighbor, modifs)
    }
}

/// Values in `lo..=hi` other than `current`.
struct AlternativeRange {
    lo: i64,
    hi: i64,
    current: i64,
}

impl AlternativeRange {
    fn is_empty(&self) -> bool {
        self.lo == self.hi && self.lo == self.current
    }

    fn includes_current(&self) -> bool {
        (self.lo..=self.hi).contains(&self.current)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        if !self.includes_current() {
            return rng.random_range(self.lo..=self.hi);
        }
        let drawn = rng.random_range(self.lo..=self.hi - 1);
        if drawn >= self.current {
            drawn + 1
        } else {
            drawn
        }
    }

    fn to_vec(&self) -> Vec<i64> {
        (self.lo..=self.hi).filter(|&v| v != self.current).collect()
    }
}

impl Move for SubstituteAttributes {
    type Encoding = DiscreteEncoding;
    type Step = usize;

    fn name(&self) -> &'static str {
        "substitute-attributes"
    }

    fn apply<R: Rng + ?Sized>(
        &self,
        solution: &Solution<DiscreteEncoding>,
        k: usize,
        rng: &mut R,
    ) -> Result<Neighbor<DiscreteEncoding>> {
        let eligible = Self::check(solution, k)?;
        let changes: Vec<(usize, i64)> = index::sample(rng, eligible.len(), k)
            .into_iter()
            .map(|pos| {
                let i = eligible[pos];
                (i, Self::alternatives(solution, i).sample(rng))
            })
            .collect();
        Ok(Self::substitute(solution, &changes))
    }

    fn candidate_count(
        &self,
        solution: &Solution<DiscreteEncoding>,
        k: usize,
    ) -> Result<Option<u128>> {
        let eligible = Self::check(solution, k)?;
        let weights: Vec<u128> = eligible
            .iter()
            .map(|&i| Self::alternative_count(solution, i))
            .collect();
        Ok(elementary_symmetric(&weights, k))
    }

    fn all_candidates(
        &self,
        solution: &Solution<DiscreteEncoding>,
        k: usize,
    ) -> Result<Vec<Neighbor<DiscreteEncoding>>> {
        let eligible = Self::check(solution, k)?;
        let mut out = Vec::new();
        for positions in Combinations::new(eligible.len(), k) {
            let indices: Vec<usize> = positions.iter().map(|&p| eligible[p]).collect();
            let choices: Vec<Vec<i64>> = indices
                .iter()
                .map(|&i| Self::alternatives(solution, i).to_vec())
                .collect();
            for values in cartesian_product(&choices) {
                let changes: Vec<(usize, i64)> = indices.iter().copied().zip(values).collect();
                out.push(Self::substitute(solution, &changes));
            }
        }
        Ok(out)
    }
}

// ============================================================================
// Swap pairs
// ============================================================================

/// Exchanges values within `k` index pairs that share no index.
///
/// Neighbors are at Hamming distance exactly `2k` (permutation items are
/// distinct), and each pair contributes two ledger entries.
#[derive(Debug, Clone, Copy)]
pub struct SwapPairs<T = usize> {
    _item: PhantomData<fn() -> T>,
}

impl<T> SwapPairs<T> {
    pub fn new() -> Self {
        Self { _item: PhantomData }
    }
}

impl<T> Default for SwapPairs<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Attribute> SwapPairs<T> {
    fn check(solution: &Solution<PermutationEncoding<T>>, k: usize) -> Result<()> {
        if k == 0 {
            return Err(Error::InvalidMoveStep {
                operator: "swap-pairs",
                reason: "must swap at least one pair".into(),
            });
        }
        if k.saturating_mul(2) > solution.len() {
            return Err(Error::TooManyPairs {
                pairs: k,
                len: solution.len(),
            });
        }
        Ok(())
    }

    fn swap(
        solution: &Solution<PermutationEncoding<T>>,
        pairs: &[(usize, usize)],
    ) -> Neighbor<PermutationEncoding<T>> {
        let source = solution.values();
        let mut neighbor = solution.copy(false);
        let mut modifs = Modifs::with_capacity(2 * pairs.len());
        for &(i, j) in pairs {
            neighbor.set(i, source[j]);
            neighbor.set(j, source[i]);
            modifs.add_modif(i, source[i], source[j]);
            modifs.add_modif(j, source[j], source[i]);
        }
        neighbor.reassert_fitness(solution.fitness());
        Neighbor::new(neighbor, modifs)
    }
}

impl<T: Attribute> Move for SwapPairs<T> {
    type Encoding = PermutationEncoding<T>;
    type Step = usize;

    fn name(&self) -> &'static str {
        "swap-pairs"
    }

    fn apply<R: Rng + ?Sized>(
        &self,
        solution: &Solution<PermutationEncoding<T>>,
        k: usize,
        rng: &mut R,
    ) -> Result<Neighbor<PermutationEncoding<T>>> {
        Self::check(solution, k)?;
        let picked = index::sample(rng, solution.len(), 2 * k).into_vec();
        let pairs: Vec<(usize, usize)> = picked.chunks_exact(2).map(|p| (p[0], p[1])).collect();
        Ok(Self::swap(solution, &pairs))
    }

    fn candidate_count(
        &self,
        solution: &Solution<PermutationEncoding<T>>,
        k: usize,
    ) -> Result<Option<u128>> {
        Self::check(solution, k)?;
        Ok(disjoint_pair_count(solution.len(), k))
    }

    fn all_candidates(
        &self,
        solution: &Solution<PermutationEncoding<T>>,
        k: usize,
    ) -> Result<Vec<Neighbor<PermutationEncoding<T>>>> {
        Self::check(solution, k)?;
        let mut out = Vec::new();
        for chosen in Combinations::new(solution.len(), 2 * k) {
            for pairs in perfect_matchings(&chosen) {
                out.push(Self::swap(solution, &pairs));
            }
        }
        Ok(out)
    }
}
