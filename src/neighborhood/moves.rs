//! Move abstraction shared by all operators.

use std::collections::HashSet;
use std::fmt;

use rand::Rng;

use crate::error::Result;
use crate::fitness::Modifs;
use crate::random::shuffle;
use crate::representation::{Encoding, Solution};

/// A solution produced by a move, with the ledger describing the change.
///
/// An empty ledger means the move did not track its changes (a continuous
/// jump, for instance); such neighbors are always fully re-evaluated.
pub struct Neighbor<E: Encoding> {
    pub solution: Solution<E>,
    pub modifs: Modifs<E::Value>,
}

impl<E: Encoding> Neighbor<E> {
    pub fn new(solution: Solution<E>, modifs: Modifs<E::Value>) -> Self {
        Self { solution, modifs }
    }

    pub fn fitness(&self) -> Option<f64> {
        self.solution.fitness()
    }
}

impl<E: Encoding> Clone for Neighbor<E> {
    fn clone(&self) -> Self {
        Self {
            solution: self.solution.clone(),
            modifs: self.modifs.clone(),
        }
    }
}

impl<E: Encoding> fmt::Debug for Neighbor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Neighbor")
            .field("solution", &self.solution)
            .field("modifs", &self.modifs)
            .finish()
    }
}

/// A perturbation operator over one encoding.
///
/// Operators are bound to their encoding through [`Move::Encoding`], so
/// pairing an operator with the wrong kind of solution does not compile.
///
/// Implementors provide single random moves ([`Move::apply`]) and, when
/// the neighborhood is finite, exhaustive listing ([`Move::all_candidates`]).
/// [`Move::enumerate`] combines both to produce a capped, duplicate-free
/// neighborhood.
pub trait Move: Send + Sync {
    type Encoding: Encoding;
    /// Step magnitude understood by the operator.
    type Step: Copy + fmt::Debug + Send + Sync;

    fn name(&self) -> &'static str;

    /// One random neighbor of `solution` at `step`.
    ///
    /// The source solution is never modified.
    fn apply<R: Rng + ?Sized>(
        &self,
        solution: &Solution<Self::Encoding>,
        step: Self::Step,
        rng: &mut R,
    ) -> Result<Neighbor<Self::Encoding>>;

    /// Number of distinct neighbors at `step`.
    ///
    /// `Ok(None)` when the neighborhood is continuous or too large to count.
    /// Invalid steps fail here with the same error as [`Move::apply`].
    fn candidate_count(
        &self,
        solution: &Solution<Self::Encoding>,
        step: Self::Step,
    ) -> Result<Option<u128>>;

    /// Every distinct neighbor at `step`.
    ///
    /// Only called when [`Move::candidate_count`] is small enough.
    fn all_candidates(
        &self,
        solution: &Solution<Self::Encoding>,
        step: Self::Step,
    ) -> Result<Vec<Neighbor<Self::Encoding>>>;

    /// Up to `cap` neighbors, distinct by ledger.
    ///
    /// Small neighborhoods are listed exhaustively and shuffled. Larger ones
    /// are sampled, rejecting any neighbor whose ledger matches one already
    /// kept. Neighbors with an empty ledger are never rejected.
    fn enumerate<R: Rng + ?Sized>(
        &self,
        solution: &Solution<Self::Encoding>,
        step: Self::Step,
        cap: usize,
        rng: &mut R,
    ) -> Result<Vec<Neighbor<Self::Encoding>>> {
        let total = self.candidate_count(solution, step)?;
        if cap == 0 {
            return Ok(Vec::new());
        }

        if let Some(total) = total.filter(|&t| t <= cap as u128) {
            let mut all = self.all_candidates(solution, step)?;
            debug_assert_eq!(all.len() as u128, total);
            shuffle(&mut all, rng);
            return Ok(all);
        }

        // More candidates than the cap, so sampling terminates.
        let mut seen = HashSet::with_capacity(cap);
        let mut out = Vec::with_capacity(cap);
        while out.len() < cap {
            let neighbor = self.apply(solution, step, rng)?;
            if neighbor.modifs.is_empty() || seen.insert(neighbor.modifs.content_key()) {
                out.push(neighbor);
            }
        }
        Ok(out)
    }
}
