//! General exponentiation a^b via exp and ln.

use cert_ast::{Expr, Func};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::error::EvalError;
use crate::evaluator::Evaluator;
use crate::trace::format_val;

impl Evaluator {
    /// a^b. Both operands are evaluated at eps for case analysis; the
    /// actual power is computed by re-entering the evaluator on a rewrite
    /// over the original sub-expressions, so the rewrite owns the budget.
    pub(crate) fn pow(
        &mut self,
        base: &Expr,
        exponent: &Expr,
        eps: &BigRational,
    ) -> Result<BigRational, EvalError> {
        let a1 = self.eval(base, eps)?;
        let a2 = self.eval(exponent, eps)?;
        self.trace.detail(format!(
            "pow: base ~ {}, exponent ~ {}",
            format_val(&a1),
            format_val(&a2)
        ));

        if a1.is_zero() {
            if a2.is_positive() {
                self.trace.summary("base is 0 and exponent positive: result 0");
                return Ok(BigRational::zero());
            }
            return Err(EvalError::ZeroBasePow(format_val(&a2)));
        }

        if a1.is_positive() {
            self.trace
                .summary("positive base: computing a^b as exp(b * ln(a))");
            let rewritten = exp_mul_ln(exponent, base, false);
            return self.eval(&rewritten, eps);
        }

        // Negative base: only an odd root is real. The exponent estimate is
        // an exact rational n/m in lowest terms; its denominator decides.
        let n = a2.numer();
        let m = a2.denom();
        if m.is_even() {
            return Err(EvalError::EvenRootOfNegative(format_val(&a1)));
        }
        if n.is_even() {
            self.trace
                .summary("negative base, even numerator: a^b = exp(b * ln(-a))");
            let rewritten = exp_mul_ln(exponent, base, true);
            self.eval(&rewritten, eps)
        } else {
            self.trace
                .summary("negative base, odd numerator: a^b = -exp(b * ln(-a))");
            let rewritten = exp_mul_ln(exponent, base, true);
            Ok(-self.eval(&rewritten, eps)?)
        }
    }
}

// e^(exponent * ln(base)), negating the base first when asked.
fn exp_mul_ln(exponent: &Expr, base: &Expr, negate_base: bool) -> std::rc::Rc<Expr> {
    let base = std::rc::Rc::new(base.clone());
    let exponent = std::rc::Rc::new(exponent.clone());
    let ln_arg = if negate_base {
        Expr::neg(base)
    } else {
        base
    };
    Expr::pow(
        Expr::constant(cert_ast::Constant::E),
        Expr::mul(exponent, Expr::func(Func::Ln, ln_arg)),
    )
}
