//! Natural logarithm by the symmetric series in (c-1)/(c+1).

use cert_ast::{Constant, Expr};
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::bound::refinement_cap;
use crate::error::EvalError;
use crate::evaluator::Evaluator;
use crate::numeric::{pow10, ratio};
use crate::trace::format_val;

impl Evaluator {
    /// ln(a) for an arbitrary sub-expression.
    ///
    /// The log derivative exceeds 1 below c = 1, so a fixed coarse bound is
    /// not enough: the estimation bound shrinks until the estimate is both
    /// well separated from 0 and tight enough that the propagated operand
    /// error stays under eps.
    pub(crate) fn ln(&mut self, a: &Expr, eps: &BigRational) -> Result<BigRational, EvalError> {
        // ln(e) = 1 exactly; a guarded branch, not an equality probe.
        if matches!(a, Expr::Constant(Constant::E)) {
            self.trace.summary("ln(e) = 1");
            return Ok(BigRational::one());
        }
        if let Expr::Number(c) = a {
            return self.ln1(c, eps);
        }

        let mut eps_prime = pow10(-1);
        let mut a_tilde = self.eval(a, &eps_prime)?;
        let cap = refinement_cap(eps)?;
        let mut steps = 0usize;
        while a_tilde.abs() <= ratio(2) * &eps_prime
            || ratio(2) * &eps_prime > (a_tilde.abs() - &eps_prime) * eps
        {
            steps += 1;
            if steps > cap {
                return Err(EvalError::BoundUnsatisfiable {
                    context: "ln argument estimation",
                    steps,
                });
            }
            eps_prime *= pow10(-1);
            a_tilde = self.eval(a, &eps_prime)?;
            tracing::debug!(steps, "ln: shrinking argument estimation bound");
        }
        self.trace.detail(format!(
            "ln: argument estimate {} (bound {})",
            format_val(&a_tilde),
            format_val(&eps_prime)
        ));

        self.ln1(&a_tilde, &(eps / ratio(2)))
    }

    /// ln(c) for a concrete value, by the symmetric Taylor series
    /// ln(c) = 2 * sum u^(2k+1)/(2k+1) with u = (c-1)/(c+1).
    ///
    /// The term count grows until 2*|c-1|^(2n+1) < 4n*c*(c+1)^(2n-1)*eps,
    /// which bounds the tail analytically before summation.
    pub(crate) fn ln1(&mut self, c: &BigRational, eps: &BigRational) -> Result<BigRational, EvalError> {
        if !c.is_positive() {
            return Err(EvalError::LnDomain(format_val(&c)));
        }
        if c.is_one() {
            self.trace.summary("ln(1) = 0");
            return Ok(BigRational::zero());
        }

        self.trace.summary(format!(
            "computing ln({}) by the symmetric Taylor expansion",
            format_val(&c)
        ));

        let d = c - BigRational::one(); // c - 1
        let s = c + BigRational::one(); // c + 1
        let d_abs = d.abs();

        let mut n: usize = 1;
        let mut result = ratio(2) * &d / &s;
        // Powers tracked incrementally: d^(2n+1) and s^(2n-1).
        let mut d_pow = &d_abs * &d_abs * &d_abs;
        let mut s_pow = s.clone();
        let d_signed_sq = &d * &d;
        let mut d_signed_pow = &d * &d_signed_sq; // d^(2n+1), sign kept
        loop {
            let tail_bound = ratio(2) * &d_pow;
            let allowance = ratio(4 * n as i64) * c * &s_pow * eps;
            if tail_bound < allowance {
                break;
            }
            n += 1;
            // term_n = 2 * d^(2n-1) / ((2n-1) * s^(2n-1))
            let odd = ratio(2 * n as i64 - 1);
            s_pow = &s_pow * &s * &s;
            let term = ratio(2) * &d_signed_pow / (&odd * &s_pow);
            result += term;
            d_pow = &d_pow * &d_abs * &d_abs;
            d_signed_pow = &d_signed_pow * &d_signed_sq;
        }

        self.trace.summary(format!(
            "ln expansion with {} terms satisfies the bound",
            n
        ));
        Ok(result)
    }
}
