//! Solution encodings.
//!
//! An encoding describes the space in which candidate solutions live: which
//! attribute vectors are legal, how to draw one uniformly at random, how big
//! the space is, and how far apart two candidates are.
//!
//! | Encoding | Value | Distance | Space size |
//! |---|---|---|---|
//! | [`BinaryEncoding`] | `u8` in {0, 1} | Hamming | `2^n` |
//! | [`DiscreteEncoding`] | `i64` in bounds | Manhattan | `∏(max - min + 1)` |
//! | [`RealEncoding`] | `f64` in bounds | Euclidean | unsupported |
//! | [`PermutationEncoding`] | any item | unsupported | `n!` |

use std::cmp::Ordering;
use std::fmt;

use rand::Rng;

use super::attribute::Attribute;
use super::boundaries::Boundaries;
use super::distance;
use crate::error::{Error, Result};

/// Tag identifying the family of an encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncodingKind {
    Binary,
    Discrete,
    Real,
    Permutation,
}

impl fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EncodingKind::Binary => "binary",
            EncodingKind::Discrete => "discrete",
            EncodingKind::Real => "real",
            EncodingKind::Permutation => "permutation",
        };
        f.write_str(name)
    }
}

/// Contract shared by every encoding.
///
/// Encodings are immutable once built and are shared between solutions
/// through an `Arc`.
pub trait Encoding: fmt::Debug + Send + Sync + 'static {
    /// Scalar type of one attribute.
    type Value: Attribute;

    fn kind(&self) -> EncodingKind;

    /// Number of attributes of every solution.
    fn size(&self) -> usize;

    /// Per-attribute bounds, if the encoding defines any.
    fn boundaries(&self) -> Option<&Boundaries<Self::Value>> {
        None
    }

    /// Whether `values` is a legal attribute vector for this encoding.
    fn contains(&self, values: &[Self::Value]) -> bool;

    /// Draws an attribute vector uniformly from the space.
    fn generate_random_value<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Self::Value>;

    /// Number of distinct attribute vectors.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] when the space is not countable and
    /// [`Error::SpaceSizeOverflow`] when the count exceeds `u128`.
    fn space_size(&self) -> Result<u128>;

    /// Native distance between two attribute vectors.
    fn distance(&self, _a: &[Self::Value], _b: &[Self::Value]) -> Result<f64> {
        Err(Error::Unsupported {
            operation: "distance",
            kind: self.kind(),
        })
    }

    /// Distance computed on the difference normalized by the attribute spans.
    fn normalized_distance(&self, _a: &[Self::Value], _b: &[Self::Value]) -> Result<f64> {
        Err(Error::Unsupported {
            operation: "distance",
            kind: self.kind(),
        })
    }
}

fn normalized_diff<T: Attribute>(bounds: &Boundaries<T>, a: &[T], b: &[T]) -> Result<Vec<f64>> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    let diff: Vec<f64> = a
        .iter()
        .zip(b)
        .map(|(x, y)| x.to_f64() - y.to_f64())
        .collect();
    bounds.normalize(&diff)
}

// ============================================================================
// Binary
// ============================================================================

/// Fixed-length bit vectors, stored as `u8` values in {0, 1}.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryEncoding {
    bounds: Boundaries<u8>,
}

impl BinaryEncoding {
    /// # Errors
    /// [`Error::EmptyEncoding`] when `size == 0`.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::EmptyEncoding);
        }
        Ok(Self {
            bounds: Boundaries::uniform(size, 0, 1)?,
        })
    }
}

impl Encoding for BinaryEncoding {
    type Value = u8;

    fn kind(&self) -> EncodingKind {
        EncodingKind::Binary
    }

    fn size(&self) -> usize {
        self.bounds.len()
    }

    fn boundaries(&self) -> Option<&Boundaries<u8>> {
        Some(&self.bounds)
    }

    fn contains(&self, values: &[u8]) -> bool {
        values.len() == self.size() && values.iter().all(|&v| v <= 1)
    }

    fn generate_random_value<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<u8> {
        (0..self.size()).map(|_| rng.random_range(0..=1u8)).collect()
    }

    fn space_size(&self) -> Result<u128> {
        u32::try_from(self.size())
            .ok()
            .and_then(|n| 1u128.checked_shl(n))
            .ok_or(Error::SpaceSizeOverflow(EncodingKind::Binary))
    }

    fn distance(&self, a: &[u8], b: &[u8]) -> Result<f64> {
        distance::hamming(a, b).map(|d| d as f64)
    }

    /// Normalizing by spans of one leaves the count of differing bits intact.
    fn normalized_distance(&self, a: &[u8], b: &[u8]) -> Result<f64> {
        self.distance(a, b)
    }
}

// ============================================================================
// Discrete
// ============================================================================

/// Bounded integer vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteEncoding {
    bounds: Boundaries<i64>,
}

impl DiscreteEncoding {
    pub fn new(bounds: Boundaries<i64>) -> Result<Self> {
        if bounds.is_empty() {
            return Err(Error::EmptyEncoding);
        }
        Ok(Self { bounds })
    }

    /// Number of values attribute `index` can take.
    pub fn domain_size(&self, index: usize) -> u128 {
        (self.bounds.max_val(index) as i128 - self.bounds.min_val(index) as i128 + 1) as u128
    }
}

impl Encoding for DiscreteEncoding {
    type Value = i64;

    fn kind(&self) -> EncodingKind {
        EncodingKind::Discrete
    }

    fn size(&self) -> usize {
        self.bounds.len()
    }

    fn boundaries(&self) -> Option<&Boundaries<i64>> {
        Some(&self.bounds)
    }

    fn contains(&self, values: &[i64]) -> bool {
        self.bounds.contains(values)
    }

    fn generate_random_value<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<i64> {
        (0..self.size())
            .map(|i| rng.random_range(self.bounds.min_val(i)..=self.bounds.max_val(i)))
            .collect()
    }

    fn space_size(&self) -> Result<u128> {
        (0..self.size()).try_fold(1u128, |acc, i| {
            acc.checked_mul(self.domain_size(i))
                .ok_or(Error::SpaceSizeOverflow(EncodingKind::Discrete))
        })
    }

    fn distance(&self, a: &[i64], b: &[i64]) -> Result<f64> {
        distance::manhattan(a, b)
    }

    fn normalized_distance(&self, a: &[i64], b: &[i64]) -> Result<f64> {
        Ok(normalized_diff(&self.bounds, a, b)?
            .iter()
            .map(|d| d.abs())
            .sum())
    }
}

// ============================================================================
// Real
// ============================================================================

/// Bounded continuous box.
#[derive(Debug, Clone, PartialEq)]
pub struct RealEncoding {
    bounds: Boundaries<f64>,
}

impl RealEncoding {
    /// # Errors
    /// [`Error::EmptyEncoding`] for zero attributes and
    /// [`Error::InvalidValues`] when a bound or span is not finite.
    pub fn new(bounds: Boundaries<f64>) -> Result<Self> {
        if bounds.is_empty() {
            return Err(Error::EmptyEncoding);
        }
        let finite = bounds
            .min_vals()
            .iter()
            .zip(bounds.max_vals())
            .all(|(lo, hi)| (hi - lo).is_finite());
        if !finite {
            return Err(Error::InvalidValues {
                kind: EncodingKind::Real,
                reason: "bounds must be finite".into(),
            });
        }
        Ok(Self { bounds })
    }
}

impl Encoding for RealEncoding {
    type Value = f64;

    fn kind(&self) -> EncodingKind {
        EncodingKind::Real
    }

    fn size(&self) -> usize {
        self.bounds.len()
    }

    fn boundaries(&self) -> Option<&Boundaries<f64>> {
        Some(&self.bounds)
    }

    fn contains(&self, values: &[f64]) -> bool {
        self.bounds.contains(values)
    }

    fn generate_random_value<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        (0..self.size())
            .map(|i| rng.random_range(self.bounds.min_val(i)..=self.bounds.max_val(i)))
            .collect()
    }

    fn space_size(&self) -> Result<u128> {
        Err(Error::Unsupported {
            operation: "space size",
            kind: EncodingKind::Real,
        })
    }

    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        distance::euclidean(a, b)
    }

    fn normalized_distance(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        Ok(normalized_diff(&self.bounds, a, b)?
            .iter()
            .map(|d| d * d)
            .sum::<f64>()
            .sqrt())
    }
}

// ============================================================================
// Permutation
// ============================================================================

/// All orderings of a fixed multiset of items.
#[derive(Debug, Clone, PartialEq)]
pub struct PermutationEncoding<T = usize> {
    items: Vec<T>,
}

impl<T: Attribute> PermutationEncoding<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }
}

impl PermutationEncoding<usize> {
    /// Permutations of `0..n`.
    pub fn indices(n: usize) -> Self {
        Self::new((0..n).collect())
    }
}

fn sorted<T: Attribute>(values: &[T]) -> Vec<T> {
    let mut v = values.to_vec();
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    v
}

impl<T: Attribute> Encoding for PermutationEncoding<T> {
    type Value = T;

    fn kind(&self) -> EncodingKind {
        EncodingKind::Permutation
    }

    fn size(&self) -> usize {
        self.items.len()
    }

    fn contains(&self, values: &[T]) -> bool {
        values.len() == self.items.len() && sorted(values) == sorted(&self.items)
    }

    fn generate_random_value<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<T> {
        let mut values = self.items.clone();
        crate::random::shuffle(&mut values, rng);
        values
    }

    fn space_size(&self) -> Result<u128> {
        (1..=self.items.len() as u128).try_fold(1u128, |acc, k| {
            acc.checked_mul(k)
                .ok_or(Error::SpaceSizeOverflow(EncodingKind::Permutation))
        })
    }
}
