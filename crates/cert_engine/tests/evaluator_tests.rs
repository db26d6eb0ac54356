//! End-to-end bound-contract tests against high-precision references.

use cert_engine::numeric::{parse_decimal, pow10, ratio};
use cert_engine::Evaluator;
use cert_parser::parse;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

// 100 decimal places each.
const PI_100: &str = "3.1415926535897932384626433832795028841971693993751058209749445923078164062862089986280348253421170679";
const E_100: &str = "2.7182818284590452353602874713526624977572470936999595749669676277240766303535475945713821785251664274";
const SQRT2_100: &str = "1.4142135623730950488016887242096980785696718753769480731766797379907324784621070388503875343276415727";

fn eval_str(input: &str, eps: &BigRational) -> BigRational {
    let expr = parse(input).expect("parse failed");
    let mut ev = Evaluator::new();
    ev.evaluate(&expr, eps).expect("evaluation failed")
}

#[test]
fn arithmetic_is_exact() {
    // 2 + 3 * 4 carries no error at all
    let r = eval_str("2 + 3 * 4", &pow10(-20));
    assert_eq!(r, ratio(14));
}

#[test]
fn sin_of_zero_is_zero() {
    for k in [-5i64, -20, -80] {
        assert_eq!(eval_str("sin(0)", &pow10(k)), ratio(0));
    }
}

#[test]
fn exp_of_one_matches_euler() {
    let r = eval_str("e^1", &pow10(-50));
    let reference = parse_decimal(E_100);
    assert!((r - reference).abs() < pow10(-50));
}

#[test]
fn ln_of_e_is_one() {
    let r = eval_str("ln(e)", &pow10(-30));
    assert_eq!(r, ratio(1));
}

#[test]
fn ln_of_e_series_path_agrees() {
    // Feed a 60-digit decimal approximation of e through the series path;
    // it must land within the bound of 1 as well.
    let input = "ln(2.718281828459045235360287471352662497757247093699959574966968)";
    let r = eval_str(input, &pow10(-30));
    assert!((r - ratio(1)).abs() < pow10(-28));
}

#[test]
fn one_third_within_bound() {
    let r = eval_str("1/3", &pow10(-40));
    let third = BigRational::new(BigInt::from(1), BigInt::from(3));
    assert!((r - third).abs() < pow10(-40));
}

#[test]
fn machin_product_recovers_pi() {
    let r = eval_str("arctan(1) * 4", &pow10(-50));
    let reference = parse_decimal(PI_100);
    assert!((r - reference).abs() < pow10(-50));
}

#[test]
fn pi_constant_matches_reference() {
    let r = eval_str("pi", &pow10(-50));
    let reference = parse_decimal(PI_100);
    assert!((r - reference).abs() < pow10(-90));
}

#[test]
fn square_root_via_power() {
    let r = eval_str("2^0.5", &pow10(-40));
    let reference = parse_decimal(SQRT2_100);
    assert!((r - reference).abs() < pow10(-40));
}

#[test]
fn integer_power_via_exp_ln() {
    let r = eval_str("2^10", &pow10(-30));
    assert!((r - ratio(1024)).abs() < pow10(-30));
}

#[test]
fn cos_of_pi_is_minus_one() {
    let r = eval_str("cos(pi)", &pow10(-30));
    assert!((r + ratio(1)).abs() < pow10(-30));
}

#[test]
fn tan_of_quarter_pi_is_one() {
    // tan is a sin/cos ratio; each leg is certified to the node bound, so
    // the quotient is checked against a slightly relaxed tolerance.
    let r = eval_str("tan(pi / 4)", &pow10(-22));
    assert!((r - ratio(1)).abs() < pow10(-20));
}

#[test]
fn log_change_of_base() {
    let r = eval_str("log(2, 8)", &pow10(-30));
    assert!((r - ratio(3)).abs() < pow10(-30));
}

#[test]
fn hyperbolics_match_reference() {
    // sinh(1) and cosh(1) to 30 digits
    let sinh1 = parse_decimal("1.175201193643801456882381850596");
    let cosh1 = parse_decimal("1.543080634815243778477905620757");
    let r = eval_str("sinh(1)", &pow10(-20));
    assert!((r - sinh1).abs() < pow10(-20));
    let r = eval_str("cosh(1)", &pow10(-20));
    assert!((r - cosh1).abs() < pow10(-20));
}

#[test]
fn arcsin_of_one_is_half_pi() {
    let r = eval_str("arcsin(1)", &pow10(-30));
    let reference = parse_decimal(PI_100) / ratio(2);
    assert!((r - reference).abs() < pow10(-30));
}

#[test]
fn arccos_of_zero_is_half_pi() {
    let r = eval_str("arccos(0)", &pow10(-25));
    let reference = parse_decimal(PI_100) / ratio(2);
    assert!((r - reference).abs() < pow10(-25));
}

#[test]
fn bound_contract_at_increasing_precision() {
    // Rational-valued expressions have exact references at any precision.
    let third = BigRational::new(BigInt::from(1), BigInt::from(3));
    for k in [-10i64, -50, -300] {
        let r = eval_str("1/3", &pow10(k));
        assert!((&r - &third).abs() < pow10(k));
        let r = eval_str("2 + 3 * 4", &pow10(k));
        assert_eq!(r, ratio(14));
    }
}

#[test]
fn bound_contract_transcendental_tightening() {
    // Monotonic tightening: the value at a tighter bound stays within the
    // looser bound of the value at the looser bound, for both to sit
    // within eps2 of the true value.
    for input in ["sin(1)", "e^1", "ln(2)", "arctan(1) * 4"] {
        let loose = eval_str(input, &pow10(-10));
        let tight = eval_str(input, &pow10(-50));
        assert!(
            (loose - &tight).abs() < ratio(2) * pow10(-10),
            "tightening failed for {input}"
        );
        let tighter = eval_str(input, &pow10(-300));
        assert!(
            (tight - tighter).abs() < ratio(2) * pow10(-50),
            "deep tightening failed for {input}"
        );
    }
}

#[test]
fn negation_passes_bound_through() {
    let r = eval_str("-(1/3)", &pow10(-30));
    let third = BigRational::new(BigInt::from(1), BigInt::from(3));
    assert!((r + third).abs() < pow10(-30));
}
