//! HC execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;

use super::config::HcConfig;
use crate::error::{Error, Result};
use crate::metaheuristic::{Metaheuristic, SearchResult};
use crate::problem::Problem;
use crate::random::rng_from_seed;
use crate::representation::Encoding;

/// Executes Hill Climbing with an RNG seeded from the configuration.
pub struct HcRunner;

impl HcRunner {
    /// Runs HC optimization.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] when `config` fails validation,
    /// [`Error::NoNeighborhood`] when `problem` has no neighborhood, and any
    /// error raised by neighbor generation.
    pub fn run<E: Encoding>(problem: &Problem<E>, config: &HcConfig) -> Result<SearchResult<E>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs HC with an optional cancellation token.
    pub fn run_with_cancel<E: Encoding>(
        problem: &Problem<E>,
        config: &HcConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult<E>> {
        let mut rng = rng_from_seed(config.seed);
        search(problem, config, &mut rng, cancel.as_deref())
    }
}

/// Hill Climbing as a [`Metaheuristic`], drawing randomness from the caller.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_metabench::fitness::Objective;
/// use u_metabench::hc::{HcConfig, HillClimbing};
/// use u_metabench::metaheuristic::Metaheuristic;
/// use u_metabench::neighborhood::{DiscreteMoveRange, FlipBits, NeighborhoodGenerator};
/// use u_metabench::problem::Problem;
/// use u_metabench::random::create_rng;
/// use u_metabench::representation::{BinaryEncoding, Solution};
///
/// let enc = Arc::new(BinaryEncoding::new(12).unwrap());
/// let objective = Objective::new(|s: &Solution<BinaryEncoding>| {
///     s.values().iter().filter(|&&b| b == 0).count() as f64
/// });
/// let neighborhood =
///     NeighborhoodGenerator::new(FlipBits, DiscreteMoveRange::linear(1, 1).unwrap(), 12).unwrap();
/// let problem = Problem::new(objective, enc).with_neighborhood(neighborhood);
///
/// let hc = HillClimbing::new(HcConfig::default()).unwrap();
/// let result = hc.run(&problem, &mut create_rng(42)).unwrap();
/// assert_eq!(result.best_fitness, 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HillClimbing {
    config: HcConfig,
}

impl HillClimbing {
    /// # Errors
    /// [`Error::InvalidConfig`] when `config` fails validation.
    pub fn new(config: HcConfig) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HcConfig {
        &self.config
    }
}

impl<E: Encoding> Metaheuristic<E> for HillClimbing {
    fn name(&self) -> &'static str {
        "Hill Climbing"
    }

    fn run<R: Rng>(&self, problem: &Problem<E>, rng: &mut R) -> Result<SearchResult<E>> {
        search(problem, &self.config, rng, None)
    }
}

#[tracing::instrument(level = "debug", name = "Hill Climbing", skip_all)]
fn search<E: Encoding, R: Rng>(
    problem: &Problem<E>,
    config: &HcConfig,
    rng: &mut R,
    cancel: Option<&AtomicBool>,
) -> Result<SearchResult<E>> {
    config.validate().map_err(Error::InvalidConfig)?;

    let mut evaluations = 0usize;
    let mut current = problem.generate_solution(rng);
    if problem.evaluate(&mut current, None) {
        evaluations += 1;
    }
    let mut current_fitness = current.fitness().unwrap_or(f64::INFINITY);

    let mut fitness_history = vec![current_fitness];
    let mut iterations = 0usize;
    let mut cancelled = false;

    loop {
        if config.max_iterations > 0 && iterations >= config.max_iterations {
            break;
        }
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            cancelled = true;
            break;
        }

        let mut neighbors = problem.get_neighbors(&current, config.base_step, rng)?;
        let candidates = neighbors.len();

        // Ties move the search along a plateau.
        let mut selected = None;
        let mut selected_fitness = current_fitness;
        for (i, neighbor) in neighbors.iter_mut().enumerate() {
            if problem.evaluate(&mut neighbor.solution, Some(&neighbor.modifs)) {
                evaluations += 1;
            }
            let fitness = neighbor.fitness().unwrap_or(f64::INFINITY);
            if fitness <= selected_fitness {
                selected = Some(i);
                selected_fitness = fitness;
            }
        }

        iterations += 1;
        let improved = selected_fitness < current_fitness;
        if let Some(i) = selected {
            current = neighbors.swap_remove(i).solution;
            current_fitness = selected_fitness;
        }
        fitness_history.push(current_fitness);

        tracing::debug!(
            iteration = iterations,
            fitness = current_fitness,
            candidates,
            improved,
            "hill climbing step"
        );

        if !improved {
            break;
        }
    }

    tracing::debug!(
        iterations,
        evaluations,
        best_fitness = current_fitness,
        cancelled,
        "hill climbing finished"
    );

    Ok(SearchResult {
        best: current,
        best_fitness: current_fitness,
        iterations,
        evaluations,
        cancelled,
        fitness_history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::{Modifs, Objective};
    use crate::neighborhood::{
        ContinuousMoveRange, DiscreteMoveRange, FlipBits, HypersphereJump, NeighborhoodGenerator,
        SubstituteAttributes, SwapPairs,
    };
    use crate::random::create_rng;
    use crate::representation::{
        BinaryEncoding, Boundaries, DiscreteEncoding, PermutationEncoding, RealEncoding, Solution,
    };

    // ---- OneMax: minimize the number of zero bits ----

    fn one_max(n: usize) -> Problem<BinaryEncoding> {
        let enc = Arc::new(BinaryEncoding::new(n).unwrap());
        let objective = Objective::new(|s: &Solution<BinaryEncoding>| {
            s.values().iter().filter(|&&b| b == 0).count() as f64
        })
        .with_partial(|s, m: &Modifs<u8>| {
            let base = s.fitness().unwrap_or_default();
            m.iter()
                .fold(base, |f, e| f + e.before as f64 - e.after as f64)
        });
        let range = DiscreteMoveRange::linear(1, 1).unwrap();
        let generator = NeighborhoodGenerator::new(FlipBits, range, n).unwrap();
        Problem::new(objective, enc)
            .with_neighborhood(generator)
            .with_known_min(0.0)
    }

    // ---- Sphere: minimize sum(x_i^2) over [-5, 5]^d ----

    fn sphere(dim: usize) -> Problem<RealEncoding> {
        let bounds = Boundaries::uniform(dim, -5.0, 5.0).unwrap();
        let enc = Arc::new(RealEncoding::new(bounds).unwrap());
        let objective =
            Objective::new(|s: &Solution<RealEncoding>| s.values().iter().map(|x| x * x).sum());
        let range = ContinuousMoveRange::logarithmic(0.01, 1.0).unwrap();
        let generator = NeighborhoodGenerator::new(HypersphereJump, range, dim * 100).unwrap();
        Problem::new(objective, enc)
            .with_neighborhood(generator)
            .with_known_min(0.0)
    }

    #[test]
    fn test_hc_solves_one_max() {
        let problem = one_max(20);
        let config = HcConfig::default().with_seed(42);
        let result = HcRunner::run(&problem, &config).unwrap();
        assert_eq!(result.best_fitness, 0.0);
        assert_eq!(result.best.fitness(), Some(0.0));
        assert!(result.best.values().iter().all(|&b| b == 1));
        assert_eq!(result.gap(&problem), Some(0.0));
        assert!(!result.cancelled);
    }

    #[test]
    fn test_hc_history_non_increasing() {
        let problem = sphere(3);
        let config = HcConfig::default().with_base_step(0.5).with_seed(7);
        let result = HcRunner::run(&problem, &config).unwrap();
        assert_eq!(result.fitness_history.len(), result.iterations + 1);
        for w in result.fitness_history.windows(2) {
            assert!(w[1] <= w[0], "history increased: {} -> {}", w[0], w[1]);
        }
        assert_eq!(result.fitness_history.last(), Some(&result.best_fitness));
    }

    #[test]
    fn test_hc_improves_sphere() {
        let problem = sphere(2);
        let config = HcConfig::default().with_base_step(0.3).with_seed(3);
        let result = HcRunner::run(&problem, &config).unwrap();
        let initial = result.fitness_history[0];
        assert!(result.best_fitness <= initial);
        assert!(result.best_fitness < 0.5, "got {}", result.best_fitness);
    }

    #[test]
    fn test_hc_stops_without_improvement() {
        // Constant objective: the first iteration cannot improve.
        let enc = Arc::new(BinaryEncoding::new(6).unwrap());
        let range = DiscreteMoveRange::linear(1, 2).unwrap();
        let generator = NeighborhoodGenerator::new(FlipBits, range, 10).unwrap();
        let problem = Problem::new(Objective::new(|_| 1.0), enc).with_neighborhood(generator);
        let result = HcRunner::run(&problem, &HcConfig::default().with_seed(1)).unwrap();
        assert_eq!(result.iterations, 1);
        assert_eq!(result.fitness_history, vec![1.0, 1.0]);
    }

    #[test]
    fn test_hc_max_iterations_limit() {
        let problem = one_max(50);
        let config = HcConfig::default().with_max_iterations(3).with_seed(42);
        let result = HcRunner::run(&problem, &config).unwrap();
        assert_eq!(result.iterations, 3);
        assert_eq!(result.fitness_history.len(), 4);
    }

    #[test]
    fn test_hc_cancellation() {
        let problem = one_max(30);
        let cancel = Arc::new(AtomicBool::new(true));
        let config = HcConfig::default().with_seed(42);
        let result = HcRunner::run_with_cancel(&problem, &config, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.evaluations, 1);
    }

    #[test]
    fn test_hc_counts_evaluations() {
        let problem = one_max(8);
        let config = HcConfig::default().with_max_iterations(2).with_seed(5);
        let result = HcRunner::run(&problem, &config).unwrap();
        // One initial evaluation, then one per neighbor (8 single-bit flips).
        assert_eq!(result.evaluations, 1 + 8 * result.iterations);
    }

    #[test]
    fn test_hc_requires_neighborhood() {
        let enc = Arc::new(BinaryEncoding::new(4).unwrap());
        let problem = Problem::new(Objective::new(|_| 0.0), enc);
        let err = HcRunner::run(&problem, &HcConfig::default().with_seed(1)).unwrap_err();
        assert_eq!(err, Error::NoNeighborhood);
    }

    #[test]
    fn test_hc_rejects_invalid_config() {
        assert!(matches!(
            HillClimbing::new(HcConfig::default().with_base_step(2.0)),
            Err(Error::InvalidConfig(_))
        ));
        let problem = one_max(4);
        let config = HcConfig::default().with_base_step(-1.0);
        assert!(matches!(
            HcRunner::run(&problem, &config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_hc_same_seed_same_result() {
        let problem = sphere(3);
        let hc = HillClimbing::new(HcConfig::default().with_base_step(0.4)).unwrap();
        let a = hc.run(&problem, &mut create_rng(99)).unwrap();
        let b = hc.run(&problem, &mut create_rng(99)).unwrap();
        assert_eq!(a.best.values(), b.best.values());
        assert_eq!(a.fitness_history, b.fitness_history);
        assert_eq!(Metaheuristic::<RealEncoding>::name(&hc), "Hill Climbing");
    }

    #[test]
    fn test_hc_on_discrete_and_permutation() {
        // Distance to a target vector.
        let bounds = Boundaries::uniform(5, 0i64, 9).unwrap();
        let enc = Arc::new(DiscreteEncoding::new(bounds).unwrap());
        let objective = Objective::new(|s: &Solution<DiscreteEncoding>| {
            s.values().iter().map(|&v| (v - 7).abs() as f64).sum()
        });
        let range = DiscreteMoveRange::linear(1, 2).unwrap();
        let generator = NeighborhoodGenerator::new(SubstituteAttributes, range, 50).unwrap();
        let problem = Problem::new(objective, enc).with_neighborhood(generator);
        let result = HcRunner::run(&problem, &HcConfig::default().with_seed(11)).unwrap();
        assert_eq!(result.best_fitness, 0.0);

        // Number of misplaced items; swaps sort the permutation.
        let enc = Arc::new(PermutationEncoding::indices(6));
        let objective = Objective::new(|s: &Solution<PermutationEncoding>| {
            s.values().iter().enumerate().filter(|&(i, &v)| i != v).count() as f64
        });
        let range = DiscreteMoveRange::linear(1, 1).unwrap();
        let generator = NeighborhoodGenerator::new(SwapPairs::new(), range, 15).unwrap();
        let problem = Problem::new(objective, enc).with_neighborhood(generator);
        let result = HcRunner::run(&problem, &HcConfig::default().with_seed(4)).unwrap();
        assert_eq!(result.best_fitness, 0.0);
        assert_eq!(result.best.values(), &[0, 1, 2, 3, 4, 5]);
    }
}
