//! Error-budget quantization.
//!
//! Allocating raw fractional bounds lets precision requirements grow without
//! limit across recursion levels; snapping every derived bound down to a
//! power of ten keeps them predictable and lets the refinement loops
//! terminate in practice.

use num_rational::BigRational;
use num_traits::Signed;

use crate::error::EvalError;
use crate::numeric::pow10;

/// Exponent k of the largest 10^k <= v. Fails for v <= 0.
pub fn cons_exponent(v: &BigRational) -> Result<i64, EvalError> {
    if !v.is_positive() {
        return Err(EvalError::NonPositiveBound(v.to_string()));
    }
    // Digit counts put the estimate within one of the true exponent; the
    // exact comparisons below correct it.
    let digits = |n: &num_bigint::BigInt| n.to_string().len() as i64;
    let mut k = digits(v.numer()) - digits(v.denom());
    let mut candidate = pow10(k);
    while &candidate > v {
        k -= 1;
        candidate = pow10(k);
    }
    while &pow10(k + 1) <= v {
        k += 1;
    }
    Ok(k)
}

/// The largest power of ten that is <= v. Fails for v <= 0.
pub fn cons(v: &BigRational) -> Result<BigRational, EvalError> {
    Ok(pow10(cons_exponent(v)?))
}

/// Iteration ceiling for the shrinking-epsilon refinement loops.
///
/// Scales with the requested bound so tightening epsilon never turns a
/// convergent evaluation into a spurious failure, while a true zero
/// denominator still hits the cap instead of looping forever.
pub fn refinement_cap(eps: &BigRational) -> Result<usize, EvalError> {
    let k = cons_exponent(eps)?;
    Ok(64 + 2 * k.unsigned_abs() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::ratio;
    use num_bigint::BigInt;

    #[test]
    fn cons_snaps_down() {
        let v = BigRational::new(BigInt::from(5), BigInt::from(100)); // 0.05
        assert_eq!(cons(&v).unwrap(), pow10(-2));
    }

    #[test]
    fn cons_keeps_exact_powers() {
        assert_eq!(cons(&pow10(-7)).unwrap(), pow10(-7));
        assert_eq!(cons(&ratio(1)).unwrap(), ratio(1));
    }

    #[test]
    fn cons_handles_values_above_one() {
        assert_eq!(cons(&ratio(25)).unwrap(), ratio(10));
        assert_eq!(cons(&ratio(9)).unwrap(), ratio(1));
    }

    #[test]
    fn cons_rejects_non_positive() {
        assert!(matches!(
            cons(&ratio(0)),
            Err(EvalError::NonPositiveBound(_))
        ));
        assert!(matches!(
            cons(&ratio(-3)),
            Err(EvalError::NonPositiveBound(_))
        ));
    }

    #[test]
    fn cap_scales_with_bound() {
        let loose = refinement_cap(&pow10(-1)).unwrap();
        let tight = refinement_cap(&pow10(-100)).unwrap();
        assert!(tight > loose);
        assert_eq!(tight, 64 + 200);
    }
}
