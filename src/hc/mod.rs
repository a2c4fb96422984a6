//! Hill Climbing (HC).
//!
//! Steepest-descent local search over a [`Problem`](crate::problem::Problem)
//! neighborhood. Each iteration evaluates the neighbors of the current
//! solution at a fixed normalized step and moves to the best one. The
//! search ends as soon as an iteration fails to improve the fitness.
//!
//! Neighbors are evaluated against the ledger of the move that produced
//! them, so objectives with a partial function update fitness
//! incrementally.

mod config;
mod runner;

pub use config::HcConfig;
pub use runner::{HcRunner, HillClimbing};
