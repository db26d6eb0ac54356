//! The recursive tree evaluator.
//!
//! One dispatcher type owns the trace log and the factorial memo; every
//! elementary/operator evaluator is an internal method that re-enters
//! [`Evaluator::eval`] to resolve its operands, so the whole engine is a
//! single mutually-recursive computation over the expression tree,
//! parameterized at every call site by a freshly derived error bound.

use std::rc::Rc;

use cert_ast::{Constant, Expr, Func};
use num_rational::BigRational;
use num_traits::{One, Signed};

use crate::constants;
use crate::error::EvalError;
use crate::factorial::Factorials;
use crate::numeric::{euclid_mod, ratio};
use crate::trace::{format_val, TraceEvent, TraceLevel, TraceLog};

/// Evaluation mode of a session.
///
/// `Compute` keeps the trace off for maximum throughput; `Explain` records
/// summary events for the external explanation collaborator. The mode is
/// cosmetic: it never affects the numeric result or the bound guarantees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalMode {
    Compute,
    Explain,
}

impl EvalMode {
    fn trace_level(self) -> TraceLevel {
        match self {
            EvalMode::Compute => TraceLevel::None,
            EvalMode::Explain => TraceLevel::Summary,
        }
    }
}

pub struct Evaluator {
    pub(crate) trace: TraceLog,
    pub(crate) factorials: Factorials,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::with_trace(TraceLevel::None)
    }

    pub fn with_mode(mode: EvalMode) -> Self {
        Self::with_trace(mode.trace_level())
    }

    pub fn with_trace(level: TraceLevel) -> Self {
        Evaluator {
            trace: TraceLog::new(level),
            factorials: Factorials::new(),
        }
    }

    /// The trace of the most recent top-level evaluation.
    pub fn trace_events(&self) -> &[TraceEvent] {
        self.trace.events()
    }

    /// Top-level entry point: |result - exact(expr)| < eps on success.
    pub fn evaluate(&mut self, expr: &Expr, eps: &BigRational) -> Result<BigRational, EvalError> {
        if !eps.is_positive() {
            return Err(EvalError::NonPositiveBound(eps.to_string()));
        }
        self.trace.clear();
        self.eval(expr, eps)
    }

    pub(crate) fn eval(&mut self, expr: &Expr, eps: &BigRational) -> Result<BigRational, EvalError> {
        match expr {
            Expr::Number(n) => Ok(n.clone()),
            Expr::Constant(Constant::Pi) => {
                self.trace.summary("reading constant pi from the cache");
                Ok(constants::pi())
            }
            Expr::Constant(Constant::E) => {
                self.trace.summary("computing constant e as exp(1)");
                self.exp1(&BigRational::one(), eps)
            }
            Expr::Add(l, r) => {
                self.trace.summary("performing addition");
                // Triangle inequality: eps/2 per operand keeps the sum under eps.
                let half = eps / ratio(2);
                Ok(self.eval(l, &half)? + self.eval(r, &half)?)
            }
            Expr::Sub(l, r) => {
                self.trace.summary("performing subtraction");
                let half = eps / ratio(2);
                Ok(self.eval(l, &half)? - self.eval(r, &half)?)
            }
            Expr::Neg(x) => {
                self.trace.summary("performing negation");
                Ok(-self.eval(x, eps)?)
            }
            Expr::Mul(l, r) => self.mul(l, r, eps),
            Expr::Div(l, r) => self.div(l, r, eps),
            Expr::Pow(base, exponent) => {
                if matches!(**base, Expr::Constant(Constant::E)) {
                    self.exp(exponent, eps)
                } else {
                    self.pow(base, exponent, eps)
                }
            }
            Expr::Func(Func::Sin, a) => self.sin(a, eps),
            Expr::Func(Func::Cos, a) => {
                self.trace.summary("computing cos(x) as sin(pi/2 - x)");
                let rewritten = cos_as_sin(a);
                self.sin(&rewritten, eps)
            }
            Expr::Func(Func::Tan, a) => self.tan_family(Func::Tan, a, eps),
            Expr::Func(Func::Cot, a) => self.tan_family(Func::Cot, a, eps),
            Expr::Func(Func::Sec, a) => self.tan_family(Func::Sec, a, eps),
            Expr::Func(Func::Csc, a) => self.tan_family(Func::Csc, a, eps),
            Expr::Func(Func::Arcsin, a) => self.arcsin(a, eps),
            Expr::Func(Func::Arccos, a) => {
                self.check_inverse_domain("arccos", a, eps)?;
                self.trace
                    .summary("computing arccos(x) as pi/2 - arcsin(x)");
                let rewritten = Expr::sub(half_pi(), Expr::func(Func::Arcsin, a.clone()));
                self.eval(&rewritten, eps)
            }
            Expr::Func(Func::Arctan, a) => self.arctan(a, eps),
            Expr::Func(Func::Arccot, a) => {
                self.trace
                    .summary("computing arccot(x) as pi/2 - arctan(x)");
                let rewritten = Expr::sub(half_pi(), Expr::func(Func::Arctan, a.clone()));
                self.eval(&rewritten, eps)
            }
            Expr::Func(Func::Sinh, a) => {
                self.trace
                    .summary("computing sinh(x) as (e^x - e^(-x)) / 2");
                let rewritten = Expr::div(
                    Expr::sub(exp_of(a.clone()), exp_of(Expr::neg(a.clone()))),
                    Expr::num(2),
                );
                self.eval(&rewritten, eps)
            }
            Expr::Func(Func::Cosh, a) => {
                self.trace
                    .summary("computing cosh(x) as (e^x + e^(-x)) / 2");
                let rewritten = Expr::div(
                    Expr::add(exp_of(a.clone()), exp_of(Expr::neg(a.clone()))),
                    Expr::num(2),
                );
                self.eval(&rewritten, eps)
            }
            Expr::Func(Func::Ln, a) => self.ln(a, eps),
            Expr::Log(base, value) => {
                self.trace
                    .summary("computing log(a, b) by change of base: ln(b) / ln(a)");
                let rewritten = Expr::div(
                    Expr::func(Func::Ln, value.clone()),
                    Expr::func(Func::Ln, base.clone()),
                );
                self.eval(&rewritten, eps)
            }
        }
    }

    /// sin/cos ratios with an eager pole check: the argument reduced mod pi
    /// must stay at least eps away from the pole of the requested ratio.
    fn tan_family(&mut self, f: Func, a: &Rc<Expr>, eps: &BigRational) -> Result<BigRational, EvalError> {
        let x_val = self.eval(a, eps)?;
        let pi = constants::pi();
        let half_pi = &pi / ratio(2);
        let mod_val = euclid_mod(&x_val, &pi);

        let near_half_pi = (&mod_val - &half_pi).abs() < *eps;
        let near_zero_or_pi = mod_val < *eps || (&pi - &mod_val) < *eps;
        match f {
            // tan, sec undefined where cos(x) = 0: x = pi/2 + n*pi
            Func::Tan | Func::Sec if near_half_pi => {
                return Err(EvalError::TrigPole {
                    func: f.name(),
                    arg: format_val(&x_val),
                });
            }
            // cot, csc undefined where sin(x) = 0: x = n*pi
            Func::Cot | Func::Csc if near_zero_or_pi => {
                return Err(EvalError::TrigPole {
                    func: f.name(),
                    arg: format_val(&x_val),
                });
            }
            _ => {}
        }

        let cos_rewrite = cos_as_sin(a);
        let (num, den) = match f {
            Func::Tan => {
                self.trace.summary("computing tan(x) as sin(x) / cos(x)");
                (self.sin(a, eps)?, self.sin(&cos_rewrite, eps)?)
            }
            Func::Cot => {
                self.trace.summary("computing cot(x) as cos(x) / sin(x)");
                (self.sin(&cos_rewrite, eps)?, self.sin(a, eps)?)
            }
            Func::Sec => {
                self.trace.summary("computing sec(x) as 1 / cos(x)");
                (BigRational::one(), self.sin(&cos_rewrite, eps)?)
            }
            Func::Csc => {
                self.trace.summary("computing csc(x) as 1 / sin(x)");
                (BigRational::one(), self.sin(a, eps)?)
            }
            _ => unreachable!("tan_family only dispatches trig ratios"),
        };
        let num = Expr::Number(num);
        let den = Expr::Number(den);
        self.div(&num, &den, eps)
    }

    fn check_inverse_domain(
        &mut self,
        func: &'static str,
        a: &Rc<Expr>,
        eps: &BigRational,
    ) -> Result<(), EvalError> {
        let val = self.eval(a, eps)?;
        if val.abs() > BigRational::one() {
            return Err(EvalError::InverseTrigDomain {
                func,
                arg: format_val(&val),
            });
        }
        Ok(())
    }

    fn arcsin(&mut self, a: &Rc<Expr>, eps: &BigRational) -> Result<BigRational, EvalError> {
        self.check_inverse_domain("arcsin", a, eps)?;
        self.trace
            .summary("computing arcsin(x) as 2*arctan(x / (1 + sqrt(1 - x^2)))");
        let one = Expr::num(1);
        let half = Expr::div(Expr::num(1), Expr::num(2));
        let radicand = Expr::sub(one.clone(), Expr::pow(a.clone(), Expr::num(2)));
        let root = Expr::pow(radicand, half);
        let rewritten = Expr::mul(
            Expr::num(2),
            Expr::func(Func::Arctan, Expr::div(a.clone(), Expr::add(one, root))),
        );
        self.eval(&rewritten, eps)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

// cos(x) = sin(pi/2 - x)
fn cos_as_sin(x: &Rc<Expr>) -> Rc<Expr> {
    Expr::sub(half_pi(), x.clone())
}

fn half_pi() -> Rc<Expr> {
    Expr::div(Expr::constant(Constant::Pi), Expr::num(2))
}

fn exp_of(x: Rc<Expr>) -> Rc<Expr> {
    Expr::pow(Expr::constant(Constant::E), x)
}
