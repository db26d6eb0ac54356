//! Division with denominator-aware error-budget refinement.

use cert_ast::Expr;
use num_rational::BigRational;
use num_traits::Signed;

use crate::bound::{cons, refinement_cap};
use crate::error::EvalError;
use crate::evaluator::Evaluator;
use crate::numeric::{pow10, ratio};
use crate::trace::format_val;

impl Evaluator {
    /// a1 / a2 within eps. Error amplifies as the denominator shrinks, so
    /// the denominator-estimation bound eps2 shrinks until the estimate is
    /// well separated from 0 (|ã2| > 2*eps2) and the propagated reciprocal
    /// error fits (4*|a1|*eps2 < |ã2|*(|ã2|-eps2)*eps). A true zero
    /// denominator can never satisfy the first condition; the capped loops
    /// turn that into an error instead of running forever.
    pub(crate) fn div(&mut self, a1: &Expr, a2: &Expr, eps: &BigRational) -> Result<BigRational, EvalError> {
        self.trace.summary("performing division");

        let tenth = pow10(-1);
        let a1_tilde = self.eval(a1, &tenth)?;
        let a1_bound = a1_tilde.abs() + &tenth;
        self.trace.detail(format!(
            "div step 1: numerator magnitude bound {}",
            format_val(&a1_bound)
        ));

        let cap = refinement_cap(eps)?;

        let mut eps2 = tenth.clone();
        let mut a2_tilde = self.eval(a2, &eps2)?;
        let mut steps = 0usize;
        while a2_tilde.abs() <= ratio(2) * &eps2 {
            steps += 1;
            if steps > cap {
                return Err(EvalError::BoundUnsatisfiable {
                    context: "division denominator separation",
                    steps,
                });
            }
            eps2 *= pow10(-1);
            a2_tilde = self.eval(a2, &eps2)?;
            tracing::debug!(steps, "div: shrinking denominator bound for separation");
        }
        self.trace.detail(format!(
            "div step 2: denominator {} (bound {})",
            format_val(&a2_tilde),
            format_val(&eps2)
        ));

        let mut lower = a2_tilde.abs() - &eps2;
        while ratio(4) * &a1_bound * &eps2 >= a2_tilde.abs() * &lower * eps {
            steps += 1;
            if steps > cap {
                return Err(EvalError::BoundUnsatisfiable {
                    context: "division denominator refinement",
                    steps,
                });
            }
            eps2 *= pow10(-1);
            a2_tilde = self.eval(a2, &eps2)?;
            lower = a2_tilde.abs() - &eps2;
            tracing::debug!(steps, "div: shrinking denominator bound for propagation");
        }

        let eps1 = cons(&(a2_tilde.abs() / ratio(4) * eps))?;
        let a1_tilde = self.eval(a1, &eps1)?;
        self.trace.detail(format!(
            "div step 3: numerator {} (bound {})",
            format_val(&a1_tilde),
            format_val(&eps1)
        ));

        // Exact rational quotient: no residual context rounding to absorb.
        Ok(a1_tilde / a2_tilde)
    }
}
