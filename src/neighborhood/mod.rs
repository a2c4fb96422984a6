//! Neighborhood generation.
//!
//! A neighborhood is built from three pieces:
//!
//! - a [`MoveRange`] turning a normalized step `t ∈ [0, 1]` into an operator
//!   step ([`ContinuousMoveRange`], [`DiscreteMoveRange`]);
//! - a [`Move`] operator bound to one encoding ([`FlipBits`],
//!   [`HypersphereJump`], [`SubstituteAttributes`], [`SwapPairs`]);
//! - a [`NeighborhoodGenerator`] capping the neighbor count and rejecting
//!   neighbors with duplicate ledgers.

mod combinatorics;
mod generator;
mod move_range;
mod moves;
mod operators;

pub use generator::{Neighborhood, NeighborhoodGenerator};
pub use move_range::{ContinuousMoveRange, DiscreteMoveRange, MoveRange, StepScale};
pub use moves::{Move, Neighbor};
pub use operators::{FlipBits, HypersphereJump, SubstituteAttributes, SwapPairs};
