//! Normalized step conversion.
//!
//! Metaheuristics reason about exploration intensity as a number `t` in
//! `[0, 1]`. A [`MoveRange`] turns that number into the step a move
//! operator understands: a radius for continuous moves, a count of changed
//! attributes for discrete ones.
//!
//! Every range maps `0.0` to its `low` bound and `1.0` to its `high` bound,
//! and is monotonically non-decreasing in between.

use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// How `t` is spread over the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepScale {
    /// Equal increments of `t` give equal increments of step.
    #[default]
    Linear,
    /// Equal increments of `t` multiply the step by a constant factor,
    /// sweeping several orders of magnitude smoothly.
    Logarithmic,
}

/// Converts a normalized step into a move step.
pub trait MoveRange: fmt::Debug + Send + Sync {
    /// Step type produced for the move operator.
    type Step: Copy + fmt::Debug + Send + Sync;

    /// # Errors
    ///
    /// [`Error::NonFiniteStep`] when `step` is NaN or infinite and
    /// [`Error::StepOutOfRange`] when it lies outside `[0, 1]`.
    fn convert(&self, step: f64) -> Result<Self::Step>;
}

fn check_step(step: f64) -> Result<f64> {
    if !step.is_finite() {
        return Err(Error::NonFiniteStep(step));
    }
    if !(0.0..=1.0).contains(&step) {
        return Err(Error::StepOutOfRange(step));
    }
    Ok(step)
}

// ============================================================================
// Continuous
// ============================================================================

/// Real-valued steps in `[low, high]`.
///
/// # Examples
///
/// ```
/// use u_metabench::neighborhood::{ContinuousMoveRange, MoveRange};
///
/// let linear = ContinuousMoveRange::linear(1.0, 10.0).unwrap();
/// assert_eq!(linear.convert(0.5).unwrap(), 5.5);
///
/// let log = ContinuousMoveRange::logarithmic(0.001, 10.0).unwrap();
/// assert_eq!(log.convert(0.0).unwrap(), 0.001);
/// assert!((log.convert(0.3).unwrap() - 0.015848931924611134).abs() < 1e-12);
/// assert_eq!(log.convert(1.0).unwrap(), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContinuousMoveRange {
    low: f64,
    high: f64,
    scale: StepScale,
}

impl ContinuousMoveRange {
    /// # Errors
    ///
    /// [`Error::InvalidMoveRange`] when a bound is not finite, when
    /// `high < low`, or when a logarithmic range has `low <= 0`.
    pub fn new(low: f64, high: f64, scale: StepScale) -> Result<Self> {
        let invalid = |reason| Error::InvalidMoveRange { low, high, reason };
        if !low.is_finite() || !high.is_finite() {
            return Err(invalid("bounds must be finite"));
        }
        if high < low {
            return Err(invalid("high bound is lower than low bound"));
        }
        if scale == StepScale::Logarithmic && low <= 0.0 {
            return Err(invalid("logarithmic range needs a positive low bound"));
        }
        Ok(Self { low, high, scale })
    }

    pub fn linear(low: f64, high: f64) -> Result<Self> {
        Self::new(low, high, StepScale::Linear)
    }

    pub fn logarithmic(low: f64, high: f64) -> Result<Self> {
        Self::new(low, high, StepScale::Logarithmic)
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn scale(&self) -> StepScale {
        self.scale
    }
}

impl MoveRange for ContinuousMoveRange {
    type Step = f64;

    fn convert(&self, step: f64) -> Result<f64> {
        let t = check_step(step)?;
        if t == 0.0 {
            return Ok(self.low);
        }
        if t == 1.0 {
            return Ok(self.high);
        }
        let value = match self.scale {
            StepScale::Linear => self.low + (self.high - self.low) * t,
            StepScale::Logarithmic => {
                let (log_low, log_high) = (self.low.log10(), self.high.log10());
                10f64.powf(log_low + (log_high - log_low) * t)
            }
        };
        Ok(value.max(self.low).min(self.high))
    }
}

// ============================================================================
// Discrete
// ============================================================================

/// Integer steps drawn from `low..=high`.
///
/// The linear scale splits `[0, 1]` into `high - low + 1` equal buckets;
/// the logarithmic scale makes buckets grow geometrically, so small steps
/// get most of the range.
///
/// # Examples
///
/// ```
/// use u_metabench::neighborhood::{DiscreteMoveRange, MoveRange};
///
/// let linear = DiscreteMoveRange::linear(1, 3).unwrap();
/// assert_eq!(linear.convert(0.0).unwrap(), 1);
/// assert_eq!(linear.convert(0.5).unwrap(), 2);
/// assert_eq!(linear.convert(1.0).unwrap(), 3);
///
/// let log = DiscreteMoveRange::logarithmic(0, 10).unwrap();
/// let steps: Vec<i64> = [0.0, 0.3, 0.6, 0.9, 1.0]
///     .iter()
///     .map(|&t| log.convert(t).unwrap())
///     .collect();
/// assert_eq!(steps, vec![0, 1, 3, 8, 10]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscreteMoveRange {
    low: i64,
    high: i64,
    scale: StepScale,
}

impl DiscreteMoveRange {
    /// # Errors
    /// [`Error::InvalidMoveRange`] when `high < low`.
    pub fn new(low: i64, high: i64, scale: StepScale) -> Result<Self> {
        if high < low {
            return Err(Error::InvalidMoveRange {
                low: low as f64,
                high: high as f64,
                reason: "high bound is lower than low bound",
            });
        }
        Ok(Self { low, high, scale })
    }

    pub fn linear(low: i64, high: i64) -> Result<Self> {
        Self::new(low, high, StepScale::Linear)
    }

    pub fn logarithmic(low: i64, high: i64) -> Result<Self> {
        Self::new(low, high, StepScale::Logarithmic)
    }

    /// Every step the range can produce, in increasing order.
    pub fn values(&self) -> RangeInclusive<i64> {
        self.low..=self.high
    }

    /// Number of representable steps.
    pub fn nb_values(&self) -> u128 {
        (self.high as i128 - self.low as i128 + 1) as u128
    }

    pub fn scale(&self) -> StepScale {
        self.scale
    }

    fn index(&self, t: f64) -> u128 {
        let nb = self.nb_values();
        let last = nb - 1;
        let raw = match self.scale {
            StepScale::Linear => (nb as f64 * t).floor() as u128,
            // Float-to-int casts saturate, so the rounded power cannot wrap.
            StepScale::Logarithmic => {
                let power = 10f64.powf((nb as f64).log10() * t).round() as u128;
                power.saturating_sub(1)
            }
        };
        raw.min(last)
    }
}

impl MoveRange for DiscreteMoveRange {
    type Step = i64;

    fn convert(&self, step: f64) -> Result<i64> {
        let t = check_step(step)?;
        if t == 1.0 {
            return Ok(self.high);
        }
        Ok((self.low as i128 + self.index(t) as i128) as i64)
    }
}
