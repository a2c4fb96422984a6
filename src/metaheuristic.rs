//! Common surface of solution-based metaheuristics.

use rand::Rng;

use crate::error::Result;
use crate::problem::Problem;
use crate::representation::{Encoding, Solution};

/// Outcome of one metaheuristic run.
#[derive(Debug, Clone)]
pub struct SearchResult<E: Encoding> {
    /// The best solution found, with its fitness set.
    pub best: Solution<E>,

    /// Fitness of the best solution.
    pub best_fitness: f64,

    /// Number of completed iterations.
    pub iterations: usize,

    /// Number of fitness function calls (full or partial).
    pub evaluations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Fitness of the current solution, recorded once initially and after
    /// every iteration.
    pub fitness_history: Vec<f64>,
}

impl<E: Encoding> SearchResult<E> {
    /// Distance between the best fitness and the problem's known minimum.
    pub fn gap(&self, problem: &Problem<E>) -> Option<f64> {
        problem.known_min().map(|min| self.best_fitness - min)
    }
}

/// A search procedure that can be benchmarked against any [`Problem`].
///
/// Lower fitness is better.
pub trait Metaheuristic<E: Encoding> {
    /// Display name used in benchmark reports.
    fn name(&self) -> &'static str;

    /// Searches `problem`, drawing all randomness from `rng`.
    fn run<R: Rng>(&self, problem: &Problem<E>, rng: &mut R) -> Result<SearchResult<E>>;
}
