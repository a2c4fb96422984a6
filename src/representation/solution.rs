//! Candidate solutions.

use std::fmt;
use std::sync::Arc;

use rand::Rng;

use super::encoding::Encoding;
use crate::error::{Error, Result};
use crate::fitness::Modifs;

/// One candidate: an attribute vector bound to its encoding, plus a cached
/// fitness value.
///
/// The fitness is `None` until an [`Objective`](crate::fitness::Objective)
/// fills it. Any change to the attributes clears it; callers that know the
/// cached value is still meaningful (e.g. as the baseline of an incremental
/// evaluation) re-assert it with [`reassert_fitness`](Solution::reassert_fitness).
pub struct Solution<E: Encoding> {
    values: Vec<E::Value>,
    encoding: Arc<E>,
    fitness: Option<f64>,
}

impl<E: Encoding> Solution<E> {
    /// Binds `values` to `encoding`.
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] when the vector does not have one value per
    /// attribute, [`Error::InvalidValues`] when it leaves the encoding's domain.
    pub fn new(values: Vec<E::Value>, encoding: Arc<E>) -> Result<Self> {
        if values.len() != encoding.size() {
            return Err(Error::LengthMismatch {
                expected: encoding.size(),
                actual: values.len(),
            });
        }
        if !encoding.contains(&values) {
            return Err(Error::InvalidValues {
                kind: encoding.kind(),
                reason: format!("{values:?} is outside the solution space"),
            });
        }
        Ok(Self {
            values,
            encoding,
            fitness: None,
        })
    }

    /// Draws a uniformly random solution from `encoding`.
    pub fn random<R: Rng + ?Sized>(encoding: &Arc<E>, rng: &mut R) -> Self {
        Self {
            values: encoding.generate_random_value(rng),
            encoding: Arc::clone(encoding),
            fitness: None,
        }
    }

    pub fn values(&self) -> &[E::Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<E::Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<E::Value> {
        self.values.get(index).copied()
    }

    /// Overwrites one attribute and clears the cached fitness.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn set(&mut self, index: usize, value: E::Value) {
        self.values[index] = value;
        self.fitness = None;
    }

    pub fn encoding(&self) -> &Arc<E> {
        &self.encoding
    }

    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    pub fn clear_fitness(&mut self) {
        self.fitness = None;
    }

    /// Restores a fitness value after attribute edits invalidated it.
    pub fn reassert_fitness(&mut self, fitness: Option<f64>) {
        self.fitness = fitness;
    }

    /// Independent copy sharing the same encoding.
    ///
    /// The fitness is carried over only when `preserve_fitness` is set.
    pub fn copy(&self, preserve_fitness: bool) -> Self {
        Self {
            values: self.values.clone(),
            encoding: Arc::clone(&self.encoding),
            fitness: if preserve_fitness { self.fitness } else { None },
        }
    }

    /// Clips every attribute into its declared bounds.
    ///
    /// No-op for encodings without bounds. The fitness is cleared only if a
    /// value actually moved.
    pub fn clamp_to_bounds(&mut self) {
        let Some(bounds) = self.encoding.boundaries() else {
            return;
        };
        let mut changed = false;
        for (i, v) in self.values.iter_mut().enumerate() {
            let clamped = bounds.clamp(i, *v);
            if clamped != *v {
                *v = clamped;
                changed = true;
            }
        }
        if changed {
            self.fitness = None;
        }
    }

    /// Writes the after-value of every ledger entry and clears the fitness.
    ///
    /// # Panics
    /// Panics if the ledger references an index out of range.
    pub fn apply_modifs(&mut self, modifs: &Modifs<E::Value>) {
        modifs.replay(&mut self.values);
        self.fitness = None;
    }

    /// Lower bound of attribute `index`, if the encoding defines bounds.
    pub fn min_val(&self, index: usize) -> Option<E::Value> {
        self.encoding.boundaries().map(|b| b.min_val(index))
    }

    /// Upper bound of attribute `index`, if the encoding defines bounds.
    pub fn max_val(&self, index: usize) -> Option<E::Value> {
        self.encoding.boundaries().map(|b| b.max_val(index))
    }

    pub fn min_vals(&self) -> Option<&[E::Value]> {
        self.encoding.boundaries().map(|b| b.min_vals())
    }

    pub fn max_vals(&self) -> Option<&[E::Value]> {
        self.encoding.boundaries().map(|b| b.max_vals())
    }

    /// Native distance to `other`, which must share this solution's encoding.
    pub fn distance(&self, other: &Self) -> Result<f64> {
        if !Arc::ptr_eq(&self.encoding, &other.encoding) {
            return Err(Error::EncodingMismatch);
        }
        self.encoding.distance(&self.values, &other.values)
    }
}

impl<E: Encoding> Clone for Solution<E> {
    fn clone(&self) -> Self {
        self.copy(true)
    }
}

impl<E: Encoding> fmt::Debug for Solution<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solution")
            .field("values", &self.values)
            .field("kind", &self.encoding.kind())
            .field("fitness", &self.fitness)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::representation::{
        BinaryEncoding, Boundaries, DiscreteEncoding, PermutationEncoding, RealEncoding,
    };

    fn real_encoding() -> Arc<RealEncoding> {
        Arc::new(RealEncoding::new(Boundaries::uniform(3, 0.0, 4.0).unwrap()).unwrap())
    }

    #[test]
    fn test_new_validates_length_and_domain() {
        let enc = Arc::new(BinaryEncoding::new(3).unwrap());
        assert!(Solution::new(vec![0, 1, 1], Arc::clone(&enc)).is_ok());
        assert!(matches!(
            Solution::new(vec![0, 1], Arc::clone(&enc)),
            Err(Error::LengthMismatch { .. })
        ));
        assert!(matches!(
            Solution::new(vec![0, 2, 1], enc),
            Err(Error::InvalidValues { .. })
        ));
    }

    #[test]
    fn test_random_solution_is_unevaluated() {
        let enc = real_encoding();
        let mut rng = create_rng(42);
        let s = Solution::random(&enc, &mut rng);
        assert!(s.fitness().is_none());
        assert!(Arc::ptr_eq(s.encoding(), &enc));
        assert!(enc.contains(s.values()));
    }

    #[test]
    fn test_copy_fitness_policy() {
        let enc = Arc::new(PermutationEncoding::indices(5));
        let mut rng = create_rng(1);
        let mut s = Solution::random(&enc, &mut rng);
        s.set_fitness(1.0);

        let c1 = s.copy(false);
        assert!(c1.fitness().is_none());
        assert_eq!(c1.values(), s.values());
        assert!(Arc::ptr_eq(c1.encoding(), s.encoding()));

        let c2 = s.copy(true);
        assert_eq!(c2.fitness(), Some(1.0));
    }

    #[test]
    fn test_copy_does_not_alias_values() {
        let enc = Arc::new(BinaryEncoding::new(3).unwrap());
        let s = Solution::new(vec![0, 0, 0], enc).unwrap();
        let mut c = s.copy(true);
        c.set(1, 1);
        assert_eq!(s.values(), &[0, 0, 0]);
        assert_eq!(c.values(), &[0, 1, 0]);
    }

    #[test]
    fn test_set_invalidates_fitness() {
        let enc = Arc::new(BinaryEncoding::new(3).unwrap());
        let mut s = Solution::new(vec![0, 0, 0], enc).unwrap();
        s.set_fitness(3.0);
        s.set(0, 1);
        assert!(s.fitness().is_none());
        s.reassert_fitness(Some(3.0));
        assert_eq!(s.fitness(), Some(3.0));
    }

    #[test]
    fn test_clamp_to_bounds() {
        let enc = real_encoding();
        let mut s = Solution::new(vec![1.0, 2.0, 3.0], enc).unwrap();
        s.set_fitness(0.0);
        s.clamp_to_bounds();
        assert_eq!(s.fitness(), Some(0.0));

        s.values = vec![-1.0, 2.0, 9.0];
        s.clamp_to_bounds();
        assert_eq!(s.values(), &[0.0, 2.0, 4.0]);
        assert!(s.fitness().is_none());
    }

    #[test]
    fn test_clamp_is_noop_for_permutations() {
        let enc = Arc::new(PermutationEncoding::new(vec![10i64, -3, 7]));
        let mut s = Solution::new(vec![7, 10, -3], enc).unwrap();
        s.clamp_to_bounds();
        assert_eq!(s.values(), &[7, 10, -3]);
        assert!(s.min_val(0).is_none());
    }

    #[test]
    fn test_bounds_accessors() {
        let enc = Arc::new(
            DiscreteEncoding::new(Boundaries::new(vec![0, 1], vec![4, 3]).unwrap()).unwrap(),
        );
        let s = Solution::new(vec![2, 2], enc).unwrap();
        assert_eq!(s.min_val(1), Some(1));
        assert_eq!(s.max_val(0), Some(4));
        assert_eq!(s.min_vals(), Some(&[0, 1][..]));
        assert_eq!(s.max_vals(), Some(&[4, 3][..]));
    }

    #[test]
    fn test_distance_requires_same_encoding() {
        let enc = Arc::new(BinaryEncoding::new(3).unwrap());
        let a = Solution::new(vec![0, 1, 1], Arc::clone(&enc)).unwrap();
        let b = Solution::new(vec![1, 1, 0], enc).unwrap();
        assert_eq!(a.distance(&b).unwrap(), 2.0);

        let other = Arc::new(BinaryEncoding::new(3).unwrap());
        let c = Solution::new(vec![1, 1, 0], other).unwrap();
        assert_eq!(a.distance(&c).unwrap_err(), Error::EncodingMismatch);
    }

    #[test]
    fn test_apply_modifs_replays_after_values() {
        let enc = Arc::new(BinaryEncoding::new(4).unwrap());
        let mut s = Solution::new(vec![0, 0, 1, 1], enc).unwrap();
        s.set_fitness(2.0);
        let mut m = Modifs::new();
        m.add_modif(0, 0, 1);
        m.add_modif(3, 1, 0);
        s.apply_modifs(&m);
        assert_eq!(s.values(), &[1, 0, 1, 0]);
        assert!(s.fitness().is_none());
    }
}
