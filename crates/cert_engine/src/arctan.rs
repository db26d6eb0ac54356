//! Arctangent: alternating series inside [-1, 1], halving identity outside.

use cert_ast::Expr;
use num_rational::BigRational;
use num_traits::{One, Signed};

use crate::bound::cons;
use crate::constants;
use crate::error::EvalError;
use crate::evaluator::Evaluator;
use crate::numeric::{ratio, sqrt_within};
use crate::trace::format_val;

impl Evaluator {
    /// arctan(a) for an arbitrary sub-expression. |arctan'| <= 1, so the
    /// operand estimate at eps/2 plus the series at eps/2 stays under eps.
    pub(crate) fn arctan(&mut self, a: &Expr, eps: &BigRational) -> Result<BigRational, EvalError> {
        if let Expr::Number(c) = a {
            return self.arctan1(c, eps);
        }
        let half = eps / ratio(2);
        let a_tilde = self.eval(a, &half)?;
        self.trace.detail(format!(
            "arctan: argument estimate {} (bound {})",
            format_val(&a_tilde),
            format_val(&half)
        ));
        self.arctan1(&a_tilde, &half)
    }

    /// arctan(c) for a concrete value.
    pub(crate) fn arctan1(&mut self, c: &BigRational, eps: &BigRational) -> Result<BigRational, EvalError> {
        if c.is_one() {
            self.trace.summary("arctan(1) = pi/4");
            let pi = Expr::Number(constants::pi());
            let four = Expr::Number(ratio(4));
            return self.div(&pi, &four, eps);
        }

        // The series degenerates at the other endpoint (terms shrink like
        // 1/(2n+1)), so -1 gets the mirrored fast path.
        if *c == -BigRational::one() {
            self.trace.summary("arctan(-1) = -pi/4");
            let pi = Expr::Number(constants::pi());
            let four = Expr::Number(ratio(4));
            let quarter = self.div(&pi, &four, eps)?;
            return Ok(-quarter);
        }

        if c.abs() > BigRational::one() {
            self.trace.summary(
                "|x| > 1: halving identity arctan(x) = 2*arctan(x / (1 + sqrt(1 + x^2)))",
            );
            // Budget: the inner series gets eps/4 (doubled: eps/2); the
            // square-root perturbation delta enters damped below 1 and
            // doubled contributes < eps/4. Total stays under eps.
            let delta = cons(&(eps / ratio(8)))?;
            let radicand = BigRational::one() + c * c;
            let root = sqrt_within(&radicand, &delta);
            let t = c / (BigRational::one() + root);
            let inner = self.arctan1(&t, &(eps / ratio(4)))?;
            return Ok(ratio(2) * inner);
        }

        self.trace.summary(format!(
            "computing arctan({}) by Taylor expansion",
            format_val(&c)
        ));

        let half_eps = eps / ratio(2);
        let c_sq = c * c;
        let mut n: usize = 1;
        let mut result = c.clone();
        let mut c_pow = c * &c_sq; // c^(2n+1)
        let mut negative = true; // sign of (-1)^n
        loop {
            let term = &c_pow / ratio(2 * n as i64 + 1);
            if term.abs() < half_eps {
                break;
            }
            if negative {
                result -= term;
            } else {
                result += term;
            }
            negative = !negative;
            n += 1;
            c_pow = &c_pow * &c_sq;
        }

        self.trace.summary(format!(
            "arctan expansion with {} terms satisfies the bound",
            n
        ));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{parse_decimal, pow10};

    #[test]
    fn arctan1_of_zero_is_zero() {
        let mut ev = Evaluator::new();
        assert_eq!(ev.arctan1(&ratio(0), &pow10(-30)).unwrap(), ratio(0));
    }

    #[test]
    fn arctan1_of_one_is_quarter_pi() {
        let mut ev = Evaluator::new();
        let eps = pow10(-40);
        let r = ev.arctan1(&ratio(1), &eps).unwrap();
        let quarter_pi =
            parse_decimal("0.7853981633974483096156608458198757210493");
        assert!((r - quarter_pi).abs() < pow10(-38));
    }

    #[test]
    fn arctan1_small_argument_matches_reference() {
        // arctan(1/5) to 40 digits
        let reference = parse_decimal("0.1973955598498807583700497651947902934475");
        let mut ev = Evaluator::new();
        let eps = pow10(-35);
        let c = BigRational::new(1.into(), 5.into());
        let r = ev.arctan1(&c, &eps).unwrap();
        assert!((r - reference).abs() < eps);
    }

    #[test]
    fn arctan1_large_argument_uses_halving() {
        // arctan(2) to 30 digits
        let reference = parse_decimal("1.107148717794090503017065460178");
        let mut ev = Evaluator::new();
        let eps = pow10(-25);
        let r = ev.arctan1(&ratio(2), &eps).unwrap();
        assert!((r - reference).abs() < eps);
    }

    #[test]
    fn arctan1_complementary_angles() {
        // arctan(t) + arctan(1/t) = pi/2 for t > 0
        let mut ev = Evaluator::new();
        let eps = pow10(-25);
        let a = ev.arctan1(&ratio(3), &eps).unwrap();
        let b = ev.arctan1(&BigRational::new(1.into(), 3.into()), &eps).unwrap();
        let half_pi = parse_decimal("1.570796326794896619231321691640");
        assert!((a + b - half_pi).abs() < pow10(-24));
    }
}
