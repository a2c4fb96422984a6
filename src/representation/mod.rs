//! Solution representation.
//!
//! - [`Boundaries`]: inclusive per-attribute limits with zero-guarded spans.
//! - [`Encoding`]: the closed family of solution spaces
//!   ([`BinaryEncoding`], [`DiscreteEncoding`], [`RealEncoding`],
//!   [`PermutationEncoding`]).
//! - [`Solution`]: an attribute vector bound to its encoding, with a cached
//!   fitness.

mod attribute;
mod boundaries;
pub mod distance;
mod encoding;
mod solution;

pub use attribute::Attribute;
pub use boundaries::Boundaries;
pub use encoding::{
    BinaryEncoding, DiscreteEncoding, Encoding, EncodingKind, PermutationEncoding, RealEncoding,
};
pub use solution::Solution;
