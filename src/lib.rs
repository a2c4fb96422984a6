//! Solution representation, neighborhood generation and incremental
//! fitness for benchmarking metaheuristics.
//!
//! The crate is the engine a benchmark driver runs heuristics on:
//!
//! - **Representation**: [`Boundaries`](representation::Boundaries) and the
//!   four encodings (binary, bounded integer, bounded real, permutation),
//!   plus [`Solution`](representation::Solution) carrying a cached fitness.
//! - **Fitness**: the [`Modifs`](fitness::Modifs) ledger records exactly
//!   which attributes a move touched, so an
//!   [`Objective`](fitness::Objective) with a partial function recomputes
//!   fitness from the delta alone.
//! - **Neighborhood**: move operators bound to their encoding, step
//!   normalization through [`MoveRange`](neighborhood::MoveRange), and a
//!   [`NeighborhoodGenerator`](neighborhood::NeighborhoodGenerator) that
//!   caps and deduplicates neighbors.
//! - **Search**: [`Problem`](problem::Problem) bundles the above for a
//!   driver; [`hc`] provides Hill Climbing as a reference
//!   [`Metaheuristic`](metaheuristic::Metaheuristic).
//!
//! Fitness is always minimized.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for boundaries, move ranges and
//!   search configurations.
//! - `parallel`: evaluates neighborhoods with rayon in
//!   [`Objective::evaluate_all`](fitness::Objective::evaluate_all).

pub mod error;
pub mod fitness;
pub mod hc;
pub mod metaheuristic;
pub mod neighborhood;
pub mod problem;
pub mod random;
pub mod representation;

pub use error::{Error, Result};
