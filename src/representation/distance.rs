//! Plain vector distances.

use super::attribute::Attribute;
use crate::error::{Error, Result};

fn check_lengths(a: usize, b: usize) -> Result<()> {
    if a != b {
        return Err(Error::LengthMismatch {
            expected: a,
            actual: b,
        });
    }
    Ok(())
}

/// Number of positions at which the two vectors differ.
pub fn hamming<T: PartialEq>(a: &[T], b: &[T]) -> Result<usize> {
    check_lengths(a.len(), b.len())?;
    Ok(a.iter().zip(b).filter(|(x, y)| x != y).count())
}

/// L1 norm of `a - b`.
pub fn manhattan<T: Attribute>(a: &[T], b: &[T]) -> Result<f64> {
    check_lengths(a.len(), b.len())?;
    Ok(a.iter()
        .zip(b)
        .map(|(x, y)| (x.to_f64() - y.to_f64()).abs())
        .sum())
}

/// L2 norm of `a - b`.
pub fn euclidean<T: Attribute>(a: &[T], b: &[T]) -> Result<f64> {
    check_lengths(a.len(), b.len())?;
    Ok(a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x.to_f64() - y.to_f64();
            d * d
        })
        .sum::<f64>()
        .sqrt())
}
