//! Capped, duplicate-free neighborhood generation.

use std::fmt;

use rand::{Rng, RngCore};

use super::move_range::MoveRange;
use super::moves::{Move, Neighbor};
use crate::error::{Error, Result};
use crate::representation::{Encoding, Solution};

/// Object-safe neighborhood source, so problems can hold any generator.
pub trait Neighborhood<E: Encoding>: Send + Sync {
    /// Neighbors of `solution` at normalized step `step` in `[0, 1]`.
    fn neighbors(
        &self,
        solution: &Solution<E>,
        step: f64,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Neighbor<E>>>;
}

/// Pairs a move operator with a step range and a neighbor cap.
///
/// Each call converts the normalized step once, then asks the operator for
/// at most `max_neighbors` neighbors whose ledgers are pairwise different.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_metabench::neighborhood::{DiscreteMoveRange, FlipBits, NeighborhoodGenerator};
/// use u_metabench::random::create_rng;
/// use u_metabench::representation::{BinaryEncoding, Solution};
///
/// let range = DiscreteMoveRange::linear(1, 3).unwrap();
/// let generator = NeighborhoodGenerator::new(FlipBits, range, 4).unwrap();
///
/// let enc = Arc::new(BinaryEncoding::new(8).unwrap());
/// let mut rng = create_rng(42);
/// let source = Solution::random(&enc, &mut rng);
///
/// let neighbors = generator.generate(&source, 0.0, &mut rng).unwrap();
/// assert_eq!(neighbors.len(), 4);
/// assert!(neighbors.iter().all(|n| n.modifs.len() == 1));
/// ```
pub struct NeighborhoodGenerator<M, R> {
    move_op: M,
    move_range: R,
    max_neighbors: usize,
}

impl<M, R> NeighborhoodGenerator<M, R>
where
    M: Move,
    R: MoveRange,
    M::Step: TryFrom<R::Step>,
{
    /// # Errors
    /// [`Error::InvalidNeighborCap`] when `max_neighbors` is zero.
    pub fn new(move_op: M, move_range: R, max_neighbors: usize) -> Result<Self> {
        if max_neighbors == 0 {
            return Err(Error::InvalidNeighborCap);
        }
        Ok(Self {
            move_op,
            move_range,
            max_neighbors,
        })
    }

    pub fn move_op(&self) -> &M {
        &self.move_op
    }

    pub fn move_range(&self) -> &R {
        &self.move_range
    }

    pub fn max_neighbors(&self) -> usize {
        self.max_neighbors
    }

    /// Move step for normalized step `step`.
    pub fn move_step(&self, step: f64) -> Result<M::Step> {
        let raw = self.move_range.convert(step)?;
        <M::Step as TryFrom<R::Step>>::try_from(raw).map_err(|_| Error::InvalidMoveStep {
            operator: self.move_op.name(),
            reason: format!("range produced {raw:?}, which the operator cannot use"),
        })
    }

    /// Generic counterpart of [`Neighborhood::neighbors`].
    pub fn generate<G: Rng + ?Sized>(
        &self,
        solution: &Solution<M::Encoding>,
        step: f64,
        rng: &mut G,
    ) -> Result<Vec<Neighbor<M::Encoding>>> {
        let move_step = self.move_step(step)?;
        let neighbors = self
            .move_op
            .enumerate(solution, move_step, self.max_neighbors, rng)?;
        tracing::trace!(
            operator = self.move_op.name(),
            step,
            move_step = ?move_step,
            count = neighbors.len(),
            "generated neighbors"
        );
        Ok(neighbors)
    }
}

impl<M, R> Neighborhood<M::Encoding> for NeighborhoodGenerator<M, R>
where
    M: Move,
    R: MoveRange,
    M::Step: TryFrom<R::Step>,
{
    fn neighbors(
        &self,
        solution: &Solution<M::Encoding>,
        step: f64,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Neighbor<M::Encoding>>> {
        self.generate(solution, step, rng)
    }
}

impl<M: Move, R: MoveRange> fmt::Debug for NeighborhoodGenerator<M, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NeighborhoodGenerator")
            .field("move_op", &self.move_op.name())
            .field("move_range", &self.move_range)
            .field("max_neighbors", &self.max_neighbors)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighborhood::{
        ContinuousMoveRange, DiscreteMoveRange, FlipBits, HypersphereJump, SubstituteAttributes,
        SwapPairs,
    };
    use crate::random::create_rng;
    use crate::representation::{
        BinaryEncoding, Boundaries, DiscreteEncoding, PermutationEncoding, RealEncoding,
    };
    use std::collections::HashSet;
    use std::sync::Arc;

    fn distinct_ledgers<E: Encoding>(neighbors: &[Neighbor<E>]) -> bool {
        let keys: HashSet<_> = neighbors.iter().map(|n| n.modifs.content_key()).collect();
        keys.len() == neighbors.len()
    }

    #[test]
    fn test_zero_cap_rejected() {
        let range = DiscreteMoveRange::linear(1, 2).unwrap();
        assert!(matches!(
            NeighborhoodGenerator::new(FlipBits, range, 0),
            Err(Error::InvalidNeighborCap)
        ));
    }

    #[test]
    fn test_small_space_is_exhausted() {
        let range = DiscreteMoveRange::linear(1, 1).unwrap();
        let generator = NeighborhoodGenerator::new(FlipBits, range, 50).unwrap();
        let enc = Arc::new(BinaryEncoding::new(5).unwrap());
        let source = Solution::new(vec![0, 0, 1, 0, 1], enc).unwrap();
        let mut rng = create_rng(42);
        let neighbors = generator.generate(&source, 0.7, &mut rng).unwrap();
        assert_eq!(neighbors.len(), 5);
        assert!(distinct_ledgers(&neighbors));
    }

    #[test]
    fn test_large_space_is_capped_and_distinct() {
        let range = DiscreteMoveRange::linear(1, 4).unwrap();
        let generator = NeighborhoodGenerator::new(FlipBits, range, 15).unwrap();
        let enc = Arc::new(BinaryEncoding::new(20).unwrap());
        let mut rng = create_rng(42);
        let source = Solution::random(&enc, &mut rng);
        for t in [0.0, 0.3, 0.6, 1.0] {
            let neighbors = generator.generate(&source, t, &mut rng).unwrap();
            assert_eq!(neighbors.len(), 15);
            assert!(distinct_ledgers(&neighbors));
        }
    }

    #[test]
    fn test_cap_equal_to_space() {
        let range = DiscreteMoveRange::linear(1, 1).unwrap();
        let generator = NeighborhoodGenerator::new(SwapPairs::new(), range, 6).unwrap();
        let enc = Arc::new(PermutationEncoding::indices(4));
        let source = Solution::new(vec![3, 1, 0, 2], enc).unwrap();
        let mut rng = create_rng(1);
        let neighbors = generator.generate(&source, 0.5, &mut rng).unwrap();
        assert_eq!(neighbors.len(), 6);
        assert!(distinct_ledgers(&neighbors));
    }

    #[test]
    fn test_empty_ledgers_are_not_deduplicated() {
        let range = ContinuousMoveRange::linear(0.0, 0.5).unwrap();
        let generator = NeighborhoodGenerator::new(HypersphereJump, range, 12).unwrap();
        let bounds = Boundaries::uniform(3, -5.0, 5.0).unwrap();
        let enc = Arc::new(RealEncoding::new(bounds).unwrap());
        let source = Solution::new(vec![0.0; 3], enc).unwrap();
        let mut rng = create_rng(42);
        // Radius zero: every neighbor equals the source and has an empty ledger.
        let neighbors = generator.generate(&source, 0.0, &mut rng).unwrap();
        assert_eq!(neighbors.len(), 12);
        assert!(neighbors.iter().all(|n| n.solution.values() == source.values()));
    }

    #[test]
    fn test_negative_discrete_step_rejected() {
        let range = DiscreteMoveRange::linear(-2, 2).unwrap();
        let generator = NeighborhoodGenerator::new(SubstituteAttributes, range, 5).unwrap();
        let bounds = Boundaries::uniform(4, 0i64, 9).unwrap();
        let enc = Arc::new(DiscreteEncoding::new(bounds).unwrap());
        let mut rng = create_rng(42);
        let source = Solution::random(&enc, &mut rng);
        assert!(matches!(
            generator.generate(&source, 0.0, &mut rng),
            Err(Error::InvalidMoveStep { .. })
        ));
        assert_eq!(generator.generate(&source, 1.0, &mut rng).unwrap().len(), 5);
    }

    #[test]
    fn test_step_errors_propagate() {
        let range = DiscreteMoveRange::linear(1, 2).unwrap();
        let generator = NeighborhoodGenerator::new(FlipBits, range, 5).unwrap();
        let enc = Arc::new(BinaryEncoding::new(4).unwrap());
        let mut rng = create_rng(42);
        let source = Solution::random(&enc, &mut rng);
        assert!(matches!(
            generator.generate(&source, 1.5, &mut rng),
            Err(Error::StepOutOfRange(_))
        ));
    }

    #[test]
    fn test_trait_object_dispatch() {
        let range = DiscreteMoveRange::logarithmic(1, 3).unwrap();
        let generator = NeighborhoodGenerator::new(FlipBits, range, 8).unwrap();
        let boxed: Box<dyn Neighborhood<BinaryEncoding>> = Box::new(generator);
        let enc = Arc::new(BinaryEncoding::new(10).unwrap());
        let mut rng = create_rng(42);
        let source = Solution::random(&enc, &mut rng);
        let neighbors = boxed.neighbors(&source, 1.0, &mut rng).unwrap();
        assert_eq!(neighbors.len(), 8);
        assert!(neighbors.iter().all(|n| n.modifs.len() == 3));
    }
}
