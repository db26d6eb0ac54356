//! Multiplication with two-phase error-budget refinement.

use cert_ast::Expr;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::bound::cons;
use crate::error::EvalError;
use crate::evaluator::Evaluator;
use crate::numeric::{pow10, ratio};
use crate::trace::format_val;

impl Evaluator {
    /// a1 * a2 within eps, from the product error bound
    /// |a1*a2 - ã1*ã2| <= |a1|*|a2 - ã2| + |ã2|*|a1 - ã1|.
    ///
    /// Phase 1 bounds |a2| coarsely; phase 2 re-evaluates a1 at
    /// eps1 = cons(eps / (2*(|ã2| + 0.1))); phase 3 re-evaluates a2 at
    /// eps2 = cons(eps / (2*|ã1|)). No a-priori magnitude bounds needed.
    pub(crate) fn mul(&mut self, a1: &Expr, a2: &Expr, eps: &BigRational) -> Result<BigRational, EvalError> {
        self.trace.summary("performing multiplication");

        let tenth = pow10(-1);
        let a2_tilde = self.eval(a2, &tenth)?;
        self.trace.detail(format!(
            "mul step 1: coarse right operand {}",
            format_val(&a2_tilde)
        ));

        let eps1 = cons(&(eps / (ratio(2) * (a2_tilde.abs() + &tenth))))?;
        self.trace
            .detail(format!("mul step 2: left operand bound {}", format_val(&eps1)));
        let a1_tilde = self.eval(a1, &eps1)?;
        self.trace.detail(format!(
            "mul step 3: left operand {}",
            format_val(&a1_tilde)
        ));

        if a1_tilde.is_zero() {
            // |a1| <= eps1 here, so |a1*a2| <= eps1*(|ã2| + 0.1) <= eps/2.
            self.trace
                .detail("mul: left operand vanished within its bound, product is 0");
            return Ok(BigRational::zero());
        }

        let eps2 = cons(&(eps / (ratio(2) * a1_tilde.abs())))?;
        self.trace
            .detail(format!("mul step 4: right operand bound {}", format_val(&eps2)));
        let a2_tilde = self.eval(a2, &eps2)?;
        self.trace.detail(format!(
            "mul step 5: right operand {}",
            format_val(&a2_tilde)
        ));

        Ok(a1_tilde * a2_tilde)
    }
}
