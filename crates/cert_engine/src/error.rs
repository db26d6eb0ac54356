use thiserror::Error;

/// Errors surfaced by the certified evaluator. All of them propagate
/// unmodified through the recursion: no retries, no partial results,
/// no clamping.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("error bound must be positive, got {0}")]
    NonPositiveBound(String),
    #[error("ln({0}) is undefined: argument must be positive")]
    LnDomain(String),
    #[error("{func}({arg}) is undefined: argument outside [-1, 1]")]
    InverseTrigDomain { func: &'static str, arg: String },
    #[error("{func}({arg}) is undefined: argument is at a pole")]
    TrigPole { func: &'static str, arg: String },
    #[error("0^{0} is undefined: exponent must be positive")]
    ZeroBasePow(String),
    #[error("even root of negative base {0}")]
    EvenRootOfNegative(String),
    #[error("cannot satisfy error bound in {context} after {steps} refinement steps")]
    BoundUnsatisfiable { context: &'static str, steps: usize },
}
