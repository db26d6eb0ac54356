//! Presentation formatting: fixed-significant-digit scientific notation.
//!
//! This is the collaborator boundary: the core hands out exact rationals,
//! and rounding to the requested digit count happens here, once.

use cert_engine::bound::cons_exponent;
use cert_engine::numeric::pow10;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Render `value` with `sig_digits` significant digits in scientific
/// notation, round-half-even. `sig_digits` must be at least 1.
pub fn format_sig_digits(value: &BigRational, sig_digits: usize) -> String {
    let sig_digits = sig_digits.max(1);
    if value.is_zero() {
        return if sig_digits == 1 {
            "0e0".to_string()
        } else {
            format!("0.{}e0", "0".repeat(sig_digits - 1))
        };
    }

    let magnitude = value.abs();
    let mut exponent = cons_exponent(&magnitude).expect("magnitude is positive");

    let scaled = &magnitude * pow10(sig_digits as i64 - 1 - exponent);
    let mut mantissa = round_half_even(&scaled);

    // Rounding can carry over: 9.99... -> 10.0
    let limit = pow10(sig_digits as i64).to_integer();
    if mantissa >= limit {
        mantissa /= BigInt::from(10);
        exponent += 1;
    }

    let digits = mantissa.to_string();
    let sign = if value.is_negative() { "-" } else { "" };
    if sig_digits == 1 {
        format!("{}{}e{}", sign, digits, exponent)
    } else {
        format!("{}{}.{}e{}", sign, &digits[..1], &digits[1..], exponent)
    }
}

// Nearest integer, ties to even. x must be non-negative.
fn round_half_even(x: &BigRational) -> BigInt {
    let floor = x.floor().to_integer();
    let frac = x - BigRational::from_integer(floor.clone());
    let half = BigRational::new(BigInt::from(1), BigInt::from(2));
    if frac > half {
        floor + BigInt::one()
    } else if frac < half {
        floor
    } else if floor.is_even() {
        floor
    } else {
        floor + BigInt::one()
    }
}
