//! Sine by range reduction and the alternating odd Taylor series.

use cert_ast::Expr;
use num_rational::BigRational;
use num_traits::Signed;

use crate::constants;
use crate::error::EvalError;
use crate::evaluator::Evaluator;
use crate::numeric::ratio;
use crate::trace::format_val;

impl Evaluator {
    /// sin(x) for an arbitrary sub-expression: estimate the argument to
    /// eps/2, then run the series at eps/2. |sin'| <= 1, so operand error
    /// passes through undamped and the halves add up under eps.
    pub(crate) fn sin(&mut self, x: &Expr, eps: &BigRational) -> Result<BigRational, EvalError> {
        if let Expr::Number(c) = x {
            return self.sin1(c, eps);
        }
        let half = eps / ratio(2);
        let x_tilde = self.eval(x, &half)?;
        self.trace.detail(format!(
            "sin: argument estimate {} (bound {})",
            format_val(&x_tilde),
            format_val(&half)
        ));
        self.sin1(&x_tilde, &half)
    }

    /// sin(x) for a concrete value.
    ///
    /// The argument is reduced modulo 2*pi into [-pi, pi] with the cached
    /// pi (fixed precision, independent of the caller's eps), then the
    /// alternating series runs until the next term drops below eps/2.
    pub(crate) fn sin1(&mut self, x: &BigRational, eps: &BigRational) -> Result<BigRational, EvalError> {
        let pi = constants::pi();
        let two_pi = ratio(2) * &pi;
        let k = (x / &two_pi).round();
        let x = x - k * two_pi;
        self.trace.detail(format!(
            "sin: argument reduced into [-pi, pi]: {}",
            format_val(&x)
        ));

        let half_eps = eps / ratio(2);
        let x_sq = &x * &x;
        let mut n: usize = 1;
        let mut result = x.clone();
        let mut x_pow = &x * &x_sq; // x^(2n+1)
        let mut negative = true; // sign of (-1)^n
        loop {
            let term = &x_pow / self.factorials.get_ratio(2 * n + 1);
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
            x_pow = &x_pow * &x_sq;
        }

        self.trace.summary(format!(
            "sin Taylor expansion with {} terms satisfies the bound",
            n
        ));
        Ok(result)
    }
}
