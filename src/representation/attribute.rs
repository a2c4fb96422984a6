//! Scalar attribute values stored in solutions.

use std::fmt;

/// A scalar value that can populate a solution attribute.
///
/// Implemented for the primitive integer and float types. `ledger_key`
/// maps a value to a hashable identity so modification ledgers can be
/// compared even when the attribute type is a float.
pub trait Attribute: Copy + PartialEq + PartialOrd + fmt::Debug + Send + Sync + 'static {
    /// Lossy conversion used for distances and normalization.
    fn to_f64(self) -> f64;

    /// Bit-level identity of the value.
    fn ledger_key(self) -> u64;
}

macro_rules! impl_int_attribute {
    ($($t:ty),*) => {
        $(
            impl Attribute for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn ledger_key(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

impl_int_attribute!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl Attribute for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn ledger_key(self) -> u64 {
        self.to_bits()
    }
}

impl Attribute for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn ledger_key(self) -> u64 {
        self.to_bits() as u64
    }
}
