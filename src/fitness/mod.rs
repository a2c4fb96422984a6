//! Fitness evaluation.
//!
//! [`Objective`] decides between a full and an incremental recomputation
//! from the cached fitness of a solution and the [`Modifs`] ledger of the
//! move that produced it.

mod modifs;
mod objective;

pub use modifs::{Modif, Modifs};
pub use objective::Objective;
