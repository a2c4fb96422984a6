//! Per-attribute bounds of a solution space.

use super::attribute::Attribute;
use crate::error::{Error, Result};

/// Inclusive minimum and maximum values for every attribute of a solution.
///
/// Besides the limits themselves, the boundaries keep the span of each
/// attribute (`max - min`, plus `f64::EPSILON`) so that differences between
/// two solutions can be normalized without ever dividing by zero.
///
/// # Examples
///
/// ```
/// use u_metabench::representation::Boundaries;
///
/// let bounds = Boundaries::new(vec![0.0, -1.0], vec![4.0, 1.0]).unwrap();
/// assert_eq!(bounds.max_val(0), 4.0);
/// assert_eq!(bounds.min_vals(), &[0.0, -1.0]);
///
/// let err = Boundaries::new(vec![0, 5, 2], vec![1, 4, 1]).unwrap_err();
/// assert_eq!(err.to_string(),
///     "maximum bound is lower than the minimum bound at indexes [1, 2]");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Boundaries<T> {
    min: Vec<T>,
    max: Vec<T>,
    scale: Vec<f64>,
}

impl<T: Attribute> Boundaries<T> {
    /// Builds boundaries from parallel minimum and maximum vectors.
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] when the vectors differ in length and
    /// [`Error::InvertedBounds`] listing every index where `max < min`.
    pub fn new(min: Vec<T>, max: Vec<T>) -> Result<Self> {
        if min.len() != max.len() {
            return Err(Error::LengthMismatch {
                expected: min.len(),
                actual: max.len(),
            });
        }

        // `!(lo <= hi)` also catches NaN bounds.
        let indices: Vec<usize> = min
            .iter()
            .zip(&max)
            .enumerate()
            .filter(|(_, (lo, hi))| !(lo <= hi))
            .map(|(i, _)| i)
            .collect();
        if !indices.is_empty() {
            return Err(Error::InvertedBounds { indices });
        }

        let scale = min
            .iter()
            .zip(&max)
            .map(|(&lo, &hi)| (hi.to_f64() - lo.to_f64()) + f64::EPSILON)
            .collect();

        Ok(Self { min, max, scale })
    }

    /// Same bounds `[min, max]` for `len` attributes.
    pub fn uniform(len: usize, min: T, max: T) -> Result<Self> {
        Self::new(vec![min; len], vec![max; len])
    }

    /// Number of bounded attributes.
    pub fn len(&self) -> usize {
        self.min.len()
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_empty()
    }

    /// Minimum value authorized at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn min_val(&self, index: usize) -> T {
        self.min[index]
    }

    /// Maximum value authorized at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn max_val(&self, index: usize) -> T {
        self.max[index]
    }

    pub fn min_vals(&self) -> &[T] {
        &self.min
    }

    pub fn max_vals(&self) -> &[T] {
        &self.max
    }

    /// Span of every attribute, strictly positive.
    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    /// Divides each component of `vector` by the span of its attribute.
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] when `vector` does not have one component
    /// per attribute.
    pub fn normalize(&self, vector: &[f64]) -> Result<Vec<f64>> {
        if vector.len() != self.len() {
            return Err(Error::LengthMismatch {
                expected: self.len(),
                actual: vector.len(),
            });
        }
        Ok(vector.iter().zip(&self.scale).map(|(v, s)| v / s).collect())
    }

    /// Clips `value` into `[min, max]` of attribute `index`.
    pub fn clamp(&self, index: usize, value: T) -> T {
        let (lo, hi) = (self.min[index], self.max[index]);
        if value < lo {
            lo
        } else if value > hi {
            hi
        } else {
            value
        }
    }

    /// Whether every value lies within its bounds.
    pub fn contains(&self, values: &[T]) -> bool {
        values.len() == self.len()
            && values
                .iter()
                .enumerate()
                .all(|(i, v)| self.min[i] <= *v && *v <= self.max[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_accessors() {
        let b = Boundaries::new(vec![0i64, 2, -3], vec![4, 2, 3]).unwrap();
        assert_eq!(b.len(), 3);
        assert_eq!(b.min_val(2), -3);
        assert_eq!(b.max_val(0), 4);
        assert_eq!(b.max_vals(), &[4, 2, 3]);
    }

    #[test]
    fn test_length_mismatch() {
        let err = Boundaries::new(vec![0.0, 1.0], vec![1.0]).unwrap_err();
        assert_eq!(
            err,
            Error::LengthMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_reports_all_inverted_indices() {
        let err = Boundaries::new(vec![0, 5, 2, 1], vec![1, 4, 1, 1]).unwrap_err();
        assert_eq!(
            err,
            Error::InvertedBounds {
                indices: vec![1, 2]
            }
        );
    }

    #[test]
    fn test_nan_bound_is_rejected() {
        let err = Boundaries::new(vec![0.0, f64::NAN], vec![1.0, 1.0]).unwrap_err();
        assert_eq!(err, Error::InvertedBounds { indices: vec![1] });
    }

    #[test]
    fn test_degenerate_attribute_scale_is_positive() {
        let b = Boundaries::new(vec![3i64], vec![3]).unwrap();
        assert!(b.scale()[0] > 0.0);
        let n = b.normalize(&[0.0]).unwrap();
        assert_eq!(n, vec![0.0]);
    }

    #[test]
    fn test_normalize_divides_by_span() {
        let b = Boundaries::new(vec![0.0, -2.0], vec![4.0, 2.0]).unwrap();
        let n = b.normalize(&[2.0, 1.0]).unwrap();
        assert!((n[0] - 0.5).abs() < 1e-12);
        assert!((n[1] - 0.25).abs() < 1e-12);
        assert!(b.normalize(&[1.0]).is_err());
    }

    #[test]
    fn test_clamp_and_contains() {
        let b = Boundaries::uniform(3, 0i64, 4).unwrap();
        assert_eq!(b.clamp(0, -2), 0);
        assert_eq!(b.clamp(1, 9), 4);
        assert_eq!(b.clamp(2, 3), 3);
        assert!(b.contains(&[0, 4, 2]));
        assert!(!b.contains(&[0, 5, 2]));
        assert!(!b.contains(&[0, 4]));
    }

    proptest! {
        #[test]
        fn prop_scale_strictly_positive(
            pairs in prop::collection::vec((-1e6f64..1e6, 0.0f64..1e6), 1..32)
        ) {
            let min: Vec<f64> = pairs.iter().map(|(lo, _)| *lo).collect();
            let max: Vec<f64> = pairs.iter().map(|(lo, span)| lo + span).collect();
            let b = Boundaries::new(min, max).unwrap();
            prop_assert!(b.scale().iter().all(|s| *s > 0.0));
            let ones = vec![1.0; b.len()];
            prop_assert!(b.normalize(&ones).unwrap().iter().all(|v| v.is_finite()));
        }
    }
}
