use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Sub};

mod private {
    pub trait Sealed {}
}

/// Floating-point types the range codec accepts.
///
/// The codec only needs subtraction, comparison and a linear blend, so each
/// type computes in its own precision: `f32` in `f32`, `f64` in `f64`.
/// `half::f16` (feature `half`) computes through `half`'s own operators.
///
/// # Examples
///
/// ```
/// use quantized::Quantize;
///
/// assert_eq!(f32::from_level(255), 255.0);
/// assert_eq!(186.65f64.to_level(), 186);
/// assert_eq!((-3.0f32).to_level(), 0);
/// ```
pub trait Quantize:
    Copy
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + private::Sealed
{
    const ZERO: Self;
    const ONE: Self;
    const HALF: Self;

    /// Converts a quantization level to this type.
    fn from_level(level: u64) -> Self;

    /// Truncates toward zero into a level. Negative values and NaN give 0,
    /// values past `u64::MAX` saturate.
    fn to_level(self) -> u64;
}

macro_rules! impl_quantize {
    ($($t:ty),* $(,)?) => {
        $(
            impl private::Sealed for $t {}

            impl Quantize for $t {
                const ZERO: Self = 0.0;
                const ONE: Self = 1.0;
                const HALF: Self = 0.5;

                #[inline(always)]
                fn from_level(level: u64) -> Self {
                    level as $t
                }

                #[inline(always)]
                fn to_level(self) -> u64 {
                    // float -> int casts saturate and map NaN to 0
                    self as u64
                }
            }
        )*
    };
}

impl_quantize!(f32, f64);

#[cfg(feature = "half")]
impl private::Sealed for half::f16 {}

#[cfg(feature = "half")]
impl Quantize for half::f16 {
    const ZERO: Self = half::f16::ZERO;
    const ONE: Self = half::f16::ONE;
    const HALF: Self = half::f16::from_f32_const(0.5);

    #[inline]
    fn from_level(level: u64) -> Self {
        half::f16::from_f64(level as f64)
    }

    #[inline]
    fn to_level(self) -> u64 {
        self.to_f32() as u64
    }
}

/// Clamps into `[0, 1]`; NaN becomes 0.
#[inline]
pub(crate) fn unit_clamp<T: Quantize>(x: T) -> T {
    if !(x > T::ZERO) {
        T::ZERO
    } else if x > T::ONE {
        T::ONE
    } else {
        x
    }
}
