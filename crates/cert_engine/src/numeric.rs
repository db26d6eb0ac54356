//! Rational helpers shared by the evaluators. All arithmetic here is exact.

use num_bigint::BigInt;
use num_integer::Roots;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Shorthand for an integer-valued rational.
pub fn ratio(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

/// 10^exp for any integer exponent.
pub fn pow10(exp: i64) -> BigRational {
    let ten = BigInt::from(10);
    let mut mag = BigInt::one();
    for _ in 0..exp.unsigned_abs() {
        mag *= &ten;
    }
    if exp >= 0 {
        BigRational::from_integer(mag)
    } else {
        BigRational::new(BigInt::one(), mag)
    }
}

/// x reduced modulo m into [0, m), for m > 0.
pub fn euclid_mod(x: &BigRational, m: &BigRational) -> BigRational {
    x - m * (x / m).floor()
}

/// Parse a plain decimal string ("-3.25", "14", ".5") to an exact rational.
pub fn parse_decimal(s: &str) -> BigRational {
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, f),
        None => (digits, ""),
    };
    let int_val: BigInt = if int_part.is_empty() {
        BigInt::zero()
    } else {
        int_part.parse().unwrap_or_else(|_| BigInt::zero())
    };
    let frac_val: BigInt = if frac_part.is_empty() {
        BigInt::zero()
    } else {
        frac_part.parse().unwrap_or_else(|_| BigInt::zero())
    };
    let ten = BigInt::from(10);
    let mut denom = BigInt::one();
    for _ in 0..frac_part.len() {
        denom *= &ten;
    }
    BigRational::new(BigInt::from(sign) * (int_val * &denom + frac_val), denom)
}

/// A rational s with |s - sqrt(r)| < delta, for r >= 0 and delta > 0.
///
/// Scaled integer square root: with r = p/q and N = ceil(1/delta),
/// s = isqrt(p*q*N^2) / (q*N) satisfies sqrt(r) - 1/(q*N) < s <= sqrt(r),
/// and 1/(q*N) <= delta. The approximation is one-sided from below.
pub fn sqrt_within(r: &BigRational, delta: &BigRational) -> BigRational {
    debug_assert!(!r.is_negative());
    debug_assert!(delta.is_positive());
    if r.is_zero() {
        return BigRational::zero();
    }
    let scale = if delta >= &BigRational::one() {
        BigInt::one()
    } else {
        delta.recip().ceil().to_integer()
    };
    let p = r.numer().clone();
    let q = r.denom().clone();
    let scaled = &p * &q * &scale * &scale;
    BigRational::new(scaled.sqrt(), q * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow10_signs() {
        assert_eq!(pow10(0), ratio(1));
        assert_eq!(pow10(2), ratio(100));
        assert_eq!(pow10(-1), BigRational::new(BigInt::from(1), BigInt::from(10)));
    }

    #[test]
    fn euclid_mod_is_nonnegative() {
        let m = ratio(3);
        assert_eq!(euclid_mod(&ratio(7), &m), ratio(1));
        assert_eq!(euclid_mod(&ratio(-7), &m), ratio(2));
        assert_eq!(euclid_mod(&ratio(0), &m), ratio(0));
    }

    #[test]
    fn sqrt_within_bounds() {
        let delta = pow10(-30);
        let r = ratio(2);
        let s = sqrt_within(&r, &delta);
        // s^2 <= 2 and (s + delta)^2 > 2
        assert!(&s * &s <= r);
        let upper = &s + &delta;
        assert!(&upper * &upper > ratio(2));
    }

    #[test]
    fn parse_decimal_exact() {
        assert_eq!(parse_decimal("14"), ratio(14));
        assert_eq!(
            parse_decimal("-3.25"),
            BigRational::new(BigInt::from(-13), BigInt::from(4))
        );
        assert_eq!(
            parse_decimal(".5"),
            BigRational::new(BigInt::from(1), BigInt::from(2))
        );
    }

    #[test]
    fn sqrt_within_exact_square() {
        let delta = pow10(-10);
        let s = sqrt_within(&BigRational::new(BigInt::from(25), BigInt::from(9)), &delta);
        assert_eq!(s, BigRational::new(BigInt::from(5), BigInt::from(3)));
    }
}
