//! # Checked math
//!
//! Mathematical functions installed as calculator built-ins.
//!
//! The logarithms, `exp`, `sqrt` and `pow` validate their arguments and
//! results: an argument outside the function's domain yields
//! [`MathError::Domain`], a pole or a finite computation that overflows (or
//! underflows to zero) yields [`MathError::Range`]. Both carry the diagnostic
//! text printed by the calculator. NaN arguments are not errors; they flow
//! through unchanged.
//!
//! Every function shares the [`MathResult`] signature so the symbol table can
//! store them behind plain function pointers.
//!
//! ```rust
//! # use hoc_calc::math::{self, MathError};
//! assert_eq!(math::sqrt(4.0), Ok(2.0));
//! assert_eq!(math::sqrt(-1.0), Err(MathError::Domain));
//! assert_eq!(math::log(0.0), Err(MathError::Range));
//! ```

use thiserror::Error;

/// Failure of a checked math call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    /// The argument lies outside the function's domain (e.g. `sqrt(-1)`).
    #[error("argument out of domain")]
    Domain,

    /// The result is a pole or cannot be represented (e.g. `exp(1000)`).
    #[error("result out of range")]
    Range,
}

/// Result of a built-in math function.
pub type MathResult = Result<f64, MathError>;

/// Flags a finite computation whose result escaped the representable range.
#[inline]
fn range_checked(finite_args: bool, nonzero_args: bool, r: f64) -> MathResult {
    if finite_args && (r.is_infinite() || (nonzero_args && r == 0.0)) {
        Err(MathError::Range)
    } else {
        Ok(r)
    }
}

/// Natural logarithm.
pub fn log(x: f64) -> MathResult {
    if x < 0.0 {
        Err(MathError::Domain)
    } else if x == 0.0 {
        Err(MathError::Range)
    } else {
        Ok(x.ln())
    }
}

/// Common (base 10) logarithm.
pub fn log10(x: f64) -> MathResult {
    if x < 0.0 {
        Err(MathError::Domain)
    } else if x == 0.0 {
        Err(MathError::Range)
    } else {
        Ok(x.log10())
    }
}

/// `e` raised to `x`; overflow and underflow are range errors.
pub fn exp(x: f64) -> MathResult {
    range_checked(x.is_finite(), true, x.exp())
}

/// Square root.
pub fn sqrt(x: f64) -> MathResult {
    if x < 0.0 {
        Err(MathError::Domain)
    } else {
        Ok(x.sqrt())
    }
}

/// `x` raised to the power `y`.
///
/// A negative finite base with a finite non-integer exponent has no real
/// result (domain error); a zero base with a negative exponent is a pole
/// (range error).
///
/// ```rust
/// # use hoc_calc::math::{pow, MathError};
/// assert_eq!(pow(2.0, 10.0), Ok(1024.0));
/// assert_eq!(pow(-8.0, 1.0 / 3.0), Err(MathError::Domain));
/// assert_eq!(pow(0.0, -1.0), Err(MathError::Range));
/// assert_eq!(pow(10.0, 400.0), Err(MathError::Range));
/// ```
pub fn pow(x: f64, y: f64) -> MathResult {
    if x < 0.0 && x.is_finite() && y.is_finite() && y.fract() != 0.0 {
        return Err(MathError::Domain);
    }
    if x == 0.0 && y < 0.0 {
        return Err(MathError::Range);
    }
    range_checked(x.is_finite() && y.is_finite(), x != 0.0, x.powf(y))
}

macro_rules! infallible {
    ( $( $(#[$meta:meta])* fn $name:ident ( $( $arg:ident ),* ) = $body:expr ; )+ ) => {
        $(
            $(#[$meta])*
            #[inline]
            pub fn $name( $( $arg: f64 ),* ) -> MathResult {
                Ok($body)
            }
        )+
    };
}

infallible! {
    /// Pseudo-random value uniformly distributed in `[0, 1)`.
    fn random() = ::rand::random::<f64>();
    /// Sine of `x` radians.
    fn sin(x) = x.sin();
    /// Cosine of `x` radians.
    fn cos(x) = x.cos();
    /// Arc tangent, in radians.
    fn atan(x) = x.atan();
    /// Four-quadrant arc tangent of `y / x`, in radians.
    fn atan2(y, x) = y.atan2(x);
    /// Integer part of `x`, truncated toward zero.
    fn int(x) = x.trunc();
    /// Absolute value.
    fn abs(x) = x.abs();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logarithms_reject_non_positive_arguments() {
        assert_eq!(log(-1.0), Err(MathError::Domain));
        assert_eq!(log(0.0), Err(MathError::Range));
        assert_eq!(log(1.0), Ok(0.0));
        assert_eq!(log10(-0.5), Err(MathError::Domain));
        assert_eq!(log10(0.0), Err(MathError::Range));
        assert_eq!(log10(1000.0), Ok(3.0));
    }

    #[test]
    fn exp_overflow_and_underflow_are_range_errors() {
        assert_eq!(exp(0.0), Ok(1.0));
        assert_eq!(exp(1000.0), Err(MathError::Range));
        assert_eq!(exp(-1000.0), Err(MathError::Range));
        // Infinite input is not an overflow.
        assert_eq!(exp(f64::INFINITY), Ok(f64::INFINITY));
        assert_eq!(exp(f64::NEG_INFINITY), Ok(0.0));
    }

    #[test]
    fn sqrt_checks_domain() {
        assert_eq!(sqrt(4.0), Ok(2.0));
        assert_eq!(sqrt(0.0), Ok(0.0));
        assert_eq!(sqrt(-1.0), Err(MathError::Domain));
    }

    #[test]
    fn pow_domain_and_range() {
        assert_eq!(pow(2.0, 3.0), Ok(8.0));
        assert_eq!(pow(-2.0, 3.0), Ok(-8.0));
        assert_eq!(pow(-2.0, 0.5), Err(MathError::Domain));
        assert_eq!(pow(0.0, -2.0), Err(MathError::Range));
        assert_eq!(pow(0.0, 0.0), Ok(1.0));
        assert_eq!(pow(0.0, 2.0), Ok(0.0));
        assert_eq!(pow(1e300, 2.0), Err(MathError::Range));
        assert_eq!(pow(0.5, 5000.0), Err(MathError::Range));
    }

    #[test]
    fn nan_passes_through_unchecked() {
        assert!(log(f64::NAN).unwrap().is_nan());
        assert!(sqrt(f64::NAN).unwrap().is_nan());
        assert!(exp(f64::NAN).unwrap().is_nan());
        assert!(pow(f64::NAN, 2.0).unwrap().is_nan());
    }

    #[test]
    fn infallible_wrappers() {
        assert_eq!(int(-2.7), Ok(-2.0));
        assert_eq!(int(2.7), Ok(2.0));
        assert_eq!(abs(-3.0), Ok(3.0));
        assert_eq!(sin(0.0), Ok(0.0));
        assert_eq!(cos(0.0), Ok(1.0));
        assert_eq!(atan2(0.0, 1.0), Ok(0.0));
        for _ in 0..100 {
            let r = random().unwrap();
            assert!((0.0..1.0).contains(&r));
        }
    }

    #[test]
    fn error_messages() {
        assert_eq!(MathError::Domain.to_string(), "argument out of domain");
        assert_eq!(MathError::Range.to_string(), "result out of range");
    }
}
