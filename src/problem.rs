//! Benchmark problem: an encoding, an objective and a neighborhood.
//!
//! This is the surface a metaheuristic driver sees. It never inspects the
//! encoding directly; it generates solutions, asks for neighbors and reads
//! the fitness written by [`Problem::evaluate`].

use std::fmt;
use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::error::{Error, Result};
use crate::fitness::{Modifs, Objective};
use crate::neighborhood::{Neighbor, Neighborhood};
use crate::representation::{Encoding, Solution};

/// A minimization problem over one encoding.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_metabench::fitness::Objective;
/// use u_metabench::neighborhood::{DiscreteMoveRange, FlipBits, NeighborhoodGenerator};
/// use u_metabench::problem::Problem;
/// use u_metabench::random::create_rng;
/// use u_metabench::representation::{BinaryEncoding, Solution};
///
/// let enc = Arc::new(BinaryEncoding::new(6).unwrap());
/// let objective = Objective::new(|s: &Solution<BinaryEncoding>| {
///     s.values().iter().filter(|&&b| b == 0).count() as f64
/// });
/// let neighborhood = NeighborhoodGenerator::new(
///     FlipBits,
///     DiscreteMoveRange::linear(1, 2).unwrap(),
///     10,
/// )
/// .unwrap();
/// let problem = Problem::new(objective, enc)
///     .with_neighborhood(neighborhood)
///     .with_known_min(0.0);
///
/// let mut rng = create_rng(42);
/// let mut s = problem.generate_solution(&mut rng);
/// problem.evaluate(&mut s, None);
/// assert!(s.fitness().is_some());
///
/// let neighbors = problem.get_neighbors(&s, 0.0, &mut rng).unwrap();
/// assert_eq!(neighbors.len(), 6);
/// ```
pub struct Problem<E: Encoding> {
    objective: Objective<E>,
    encoding: Arc<E>,
    neighborhood: Option<Box<dyn Neighborhood<E>>>,
    known_min: Option<f64>,
}

impl<E: Encoding> Problem<E> {
    pub fn new(objective: Objective<E>, encoding: Arc<E>) -> Self {
        Self {
            objective,
            encoding,
            neighborhood: None,
            known_min: None,
        }
    }

    pub fn with_neighborhood<N>(mut self, neighborhood: N) -> Self
    where
        N: Neighborhood<E> + 'static,
    {
        self.neighborhood = Some(Box::new(neighborhood));
        self
    }

    /// Records the best achievable fitness, when known.
    pub fn with_known_min(mut self, known_min: f64) -> Self {
        self.known_min = Some(known_min);
        self
    }

    pub fn encoding(&self) -> &Arc<E> {
        &self.encoding
    }

    pub fn objective(&self) -> &Objective<E> {
        &self.objective
    }

    pub fn known_min(&self) -> Option<f64> {
        self.known_min
    }

    pub fn has_neighborhood(&self) -> bool {
        self.neighborhood.is_some()
    }

    /// Uniformly random, unevaluated solution.
    pub fn generate_solution<R: Rng + ?Sized>(&self, rng: &mut R) -> Solution<E> {
        Solution::random(&self.encoding, rng)
    }

    /// See [`Objective::evaluate`].
    pub fn evaluate(&self, solution: &mut Solution<E>, modifs: Option<&Modifs<E::Value>>) -> bool {
        self.objective.evaluate(solution, modifs)
    }

    /// Neighbors of `solution` at normalized step `step`.
    ///
    /// # Errors
    /// [`Error::NoNeighborhood`] when the problem has no neighborhood, plus
    /// any error raised while generating.
    pub fn get_neighbors<R: RngCore>(
        &self,
        solution: &Solution<E>,
        step: f64,
        rng: &mut R,
    ) -> Result<Vec<Neighbor<E>>> {
        let neighborhood = self.neighborhood.as_ref().ok_or(Error::NoNeighborhood)?;
        neighborhood.neighbors(solution, step, rng)
    }
}

impl<E: Encoding> fmt::Debug for Problem<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Problem")
            .field("encoding", &self.encoding)
            .field("objective", &self.objective)
            .field("has_neighborhood", &self.has_neighborhood())
            .field("known_min", &self.known_min)
            .finish()
    }
}
