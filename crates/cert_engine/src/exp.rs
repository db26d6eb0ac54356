//! The exponential evaluator: e^a for an expression or a concrete value.

use cert_ast::Expr;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive};

use crate::bound::cons;
use crate::error::EvalError;
use crate::evaluator::Evaluator;
use crate::numeric::{pow10, ratio};
use crate::trace::format_val;

impl Evaluator {
    /// exp(a) for an arbitrary sub-expression: estimate the argument
    /// coarsely to learn its magnitude, derive a tightened bound from eps
    /// and that magnitude, then re-estimate and hand off to the series.
    pub(crate) fn exp(&mut self, a: &Expr, eps: &BigRational) -> Result<BigRational, EvalError> {
        if let Expr::Number(c) = a {
            return self.exp1(c, eps);
        }

        let eps_prime = pow10(-1);
        let a_tilde = self.eval(a, &eps_prime)?;
        self.trace.detail(format!(
            "exp: coarse argument estimate {} (bound 0.1)",
            format_val(&a_tilde)
        ));

        // Magnitude probe: an upper estimate of exp(a), good enough to size
        // the argument bound. exp is increasing, so a_tilde + 0.1 majorizes.
        let eps_double_prime = ratio(2) / ratio(10);
        let y1 = self.exp1(&(&a_tilde + &eps_prime), &eps_double_prime)?;

        let refined = cons(&(eps / (ratio(2) * (y1 + &eps_double_prime))))?;
        let a_tilde = self.eval(a, &refined)?;
        self.trace.detail(format!(
            "exp: refined argument estimate {} (bound {})",
            format_val(&a_tilde),
            format_val(&refined)
        ));

        self.exp1(&a_tilde, &(eps / ratio(2)))
    }

    /// e^c for a concrete value, by Taylor series.
    ///
    /// The term count n is proven sufficient before summation starts:
    /// the Lagrange remainder of the series after n terms is below eps
    /// once 2*c^n < (n-1)!*(n-c)*eps.
    pub(crate) fn exp1(&mut self, c: &BigRational, eps: &BigRational) -> Result<BigRational, EvalError> {
        if c.is_negative() {
            self.trace
                .summary("negative exponent: computing e^c as 1 / e^(-c)");
            let y = self.exp1(&(-c), eps)?;
            let one = Expr::Number(BigRational::one());
            let y_expr = Expr::Number(y);
            return self.div(&one, &y_expr, eps);
        }

        self.trace.summary(format!(
            "computing e^{} by Taylor expansion",
            format_val(&c)
        ));

        // Seed the search at n0 = max(ceil(c), 1); below c the remainder
        // bound is not yet monotone.
        let mut n = c.ceil().to_integer().to_usize().unwrap_or(0).max(1);
        let mut c_pow = pow_rational(c, n);
        loop {
            let remainder_bound = ratio(2) * &c_pow;
            let denom = self.factorials.get_ratio(n - 1) * (ratio(n as i64) - c) * eps;
            if remainder_bound < denom {
                break;
            }
            n += 1;
            c_pow *= c;
        }

        let mut term = BigRational::one();
        let mut result = BigRational::one();
        for i in 1..=n {
            term = term * c / ratio(i as i64);
            result += &term;
        }

        self.trace.summary(format!(
            "Taylor expansion of e^c with {} terms satisfies the bound",
            n
        ));
        Ok(result)
    }
}

fn pow_rational(c: &BigRational, n: usize) -> BigRational {
    let mut acc = BigRational::one();
    for _ in 0..n {
        acc *= c;
    }
    acc
}
