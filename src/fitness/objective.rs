//! Fitness function wrapper.

use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::modifs::Modifs;
use crate::neighborhood::Neighbor;
use crate::representation::{Encoding, Solution};

/// Wraps a full fitness function and an optional incremental one.
///
/// The objective never returns a value: it writes the fitness into the
/// solution it evaluates. Lower is better throughout the crate.
///
/// # Choosing the evaluator
///
/// | cached fitness | ledger | partial fn | action |
/// |---|---|---|---|
/// | none | any | any | full |
/// | set | absent | any | keep cached value |
/// | set | non-empty | present | partial |
/// | set | empty, or no partial fn | - | full |
///
/// The partial function receives the neighbor (still carrying the source's
/// fitness) and the ledger of the move that produced it. It must agree with
/// the full function; that is not checked here.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_metabench::fitness::{Modifs, Objective};
/// use u_metabench::representation::{BinaryEncoding, Solution};
///
/// // OneMax: count of zero bits, updated from flipped bits only.
/// let objective = Objective::new(|s: &Solution<BinaryEncoding>| {
///     s.values().iter().filter(|&&b| b == 0).count() as f64
/// })
/// .with_partial(|s, modifs: &Modifs<u8>| {
///     let base = s.fitness().unwrap_or_default();
///     modifs.iter().fold(base, |f, m| f + m.before as f64 - m.after as f64)
/// });
///
/// let enc = Arc::new(BinaryEncoding::new(4).unwrap());
/// let mut s = Solution::new(vec![0, 1, 0, 0], enc).unwrap();
/// objective.evaluate(&mut s, None);
/// assert_eq!(s.fitness(), Some(3.0));
/// ```
pub struct Objective<E: Encoding> {
    full: Box<dyn Fn(&Solution<E>) -> f64 + Send + Sync>,
    partial: Option<Box<dyn Fn(&Solution<E>, &Modifs<E::Value>) -> f64 + Send + Sync>>,
}

impl<E: Encoding> Objective<E> {
    /// Objective with only a full fitness function.
    pub fn new<F>(full: F) -> Self
    where
        F: Fn(&Solution<E>) -> f64 + Send + Sync + 'static,
    {
        Self {
            full: Box::new(full),
            partial: None,
        }
    }

    /// Adds an incremental fitness function.
    pub fn with_partial<P>(mut self, partial: P) -> Self
    where
        P: Fn(&Solution<E>, &Modifs<E::Value>) -> f64 + Send + Sync + 'static,
    {
        self.partial = Some(Box::new(partial));
        self
    }

    pub fn has_partial(&self) -> bool {
        self.partial.is_some()
    }

    /// Fills the fitness of `solution`.
    ///
    /// `modifs` is the ledger of the move that produced `solution`, if any.
    /// Returns `true` when a fitness function was actually called.
    pub fn evaluate(&self, solution: &mut Solution<E>, modifs: Option<&Modifs<E::Value>>) -> bool {
        let value = match (solution.fitness(), modifs) {
            (Some(_), None) => return false,
            (Some(_), Some(m)) if !m.is_empty() => match &self.partial {
                Some(partial) => partial(solution, m),
                None => (self.full)(solution),
            },
            _ => (self.full)(solution),
        };
        solution.set_fitness(value);
        true
    }

    /// Evaluates every neighbor against its own ledger.
    ///
    /// Runs in parallel with the `parallel` feature.
    pub fn evaluate_all(&self, neighbors: &mut [Neighbor<E>]) {
        #[cfg(feature = "parallel")]
        {
            neighbors
                .par_iter_mut()
                .for_each(|n| {
                    self.evaluate(&mut n.solution, Some(&n.modifs));
                });
        }

        #[cfg(not(feature = "parallel"))]
        {
            for n in neighbors.iter_mut() {
                self.evaluate(&mut n.solution, Some(&n.modifs));
            }
        }
    }
}

impl<E: Encoding> fmt::Debug for Objective<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Objective")
            .field("partial", &self.has_partial())
            .finish_non_exhaustive()
    }
}
