//! Property tests: the cons contract, and certified results cross-checked
//! against f64 math as an independent (coarse) reference.
//!
//! Fixed case counts for CI stability; f64 tolerance 1e-9 is far above
//! f64's own error and far below the certified bounds used here.

use cert_ast::{Expr, Func};
use cert_engine::numeric::{pow10, ratio};
use cert_engine::{cons, cons_exponent, Evaluator};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};
use proptest::prelude::*;

const F64_EPS: f64 = 1e-9;

fn rational(num: i64, den: i64) -> BigRational {
    BigRational::new(BigInt::from(num), BigInt::from(den))
}

fn eval_func(f: Func, x: BigRational, k: i64) -> BigRational {
    let expr = Expr::func(f, Expr::number(x));
    let mut ev = Evaluator::new();
    ev.evaluate(&expr, &pow10(k)).expect("evaluation failed")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn cons_contract(num in 1i64..1_000_000_000, den in 1i64..1_000_000_000) {
        let v = rational(num, den);
        let c = cons(&v).unwrap();
        let k = cons_exponent(&v).unwrap();
        // cons(v) is the power of ten at the reported exponent
        prop_assert_eq!(&c, &pow10(k));
        // cons(v) <= v, and it is maximal: the next power of ten is > v
        prop_assert!(c <= v);
        prop_assert!(pow10(k + 1) > v);
    }

    #[test]
    fn sin_matches_f64(n in -3000i64..3000) {
        let x = rational(n, 1000);
        let r = eval_func(Func::Sin, x, -20);
        let expected = (n as f64 / 1000.0).sin();
        prop_assert!((r.to_f64().unwrap() - expected).abs() < F64_EPS);
    }

    #[test]
    fn arctan_matches_f64(n in -5000i64..5000) {
        let x = rational(n, 1000);
        let r = eval_func(Func::Arctan, x, -20);
        let expected = (n as f64 / 1000.0).atan();
        prop_assert!((r.to_f64().unwrap() - expected).abs() < F64_EPS);
    }

    #[test]
    // Arguments below 0.1 push the symmetric series' ratio toward 1 and
    // the term count into the tens of thousands; keep the sweep above it.
    fn ln_matches_f64(n in 100i64..5000) {
        let x = rational(n, 1000);
        let r = eval_func(Func::Ln, x, -20);
        let expected = (n as f64 / 1000.0).ln();
        prop_assert!((r.to_f64().unwrap() - expected).abs() < F64_EPS);
    }

    #[test]
    fn exp_matches_f64(n in -4000i64..4000) {
        let x = rational(n, 1000);
        let expr = Expr::pow(
            Expr::constant(cert_ast::Constant::E),
            Expr::number(x),
        );
        let mut ev = Evaluator::new();
        let r = ev.evaluate(&expr, &pow10(-20)).unwrap();
        let expected = (n as f64 / 1000.0).exp();
        prop_assert!((r.to_f64().unwrap() - expected).abs() < F64_EPS * expected.max(1.0));
    }

    #[test]
    fn tightening_never_widens(n in -2000i64..2000) {
        let x = rational(n, 1000);
        let loose = eval_func(Func::Sin, x.clone(), -10);
        let tight = eval_func(Func::Sin, x, -25);
        // Both lie within 1e-10 of the true value, so within 2e-10 of
        // each other.
        prop_assert!((loose - tight).abs() < ratio(2) * pow10(-10));
    }
}
