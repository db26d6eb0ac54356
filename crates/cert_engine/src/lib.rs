//! Certified arbitrary-precision evaluation of expression trees.
//!
//! Given an expression and a positive error bound eps, [`Evaluator::evaluate`]
//! returns a rational y with |y - exact(expr)| < eps. Every composite
//! operation splits its budget between sub-expressions; every elementary
//! function proves its Taylor term count against its allocated bound before
//! summing.

pub mod arctan;
pub mod bound;
pub mod constants;
pub mod div;
pub mod error;
pub mod evaluator;
pub mod exp;
pub mod factorial;
pub mod ln;
pub mod mul;
pub mod numeric;
pub mod pow;
pub mod sin;
pub mod trace;

pub use bound::{cons, cons_exponent};
pub use constants::{pi, reset_pi};
pub use error::EvalError;
pub use evaluator::{EvalMode, Evaluator};
pub use trace::{TraceEvent, TraceLevel};
