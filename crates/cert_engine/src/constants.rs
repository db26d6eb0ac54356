//! The numeric-constants module: a process-wide pi cache.
//!
//! pi is computed once, to fixed precision 10^-1000, via Machin's formula
//! pi = 16*arctan(1/5) - 4*arctan(1/239), by running the tree evaluator on
//! that very formula. The bootstrap terminates because both arctangents
//! take the direct Taylor path (|x| < 1), which never reads the cache.

use std::sync::Mutex;

use cert_ast::{Expr, Func};
use num_rational::BigRational;

use crate::evaluator::Evaluator;
use crate::numeric::pow10;
use crate::trace::TraceLevel;

/// Decimal exponent of the cache precision: pi is correct to 10^-1000.
pub const PI_CACHE_EXPONENT: i64 = -1000;

static PI_CACHE: Mutex<Option<BigRational>> = Mutex::new(None);

/// pi, correct to at least 10^-1000 regardless of any caller's eps.
/// The cache is always more precise than a realistic request; truncation
/// to the caller's precision is the caller's business.
///
/// First call computes and installs the value; later calls are O(1) reads.
/// The computation runs outside the lock, so a concurrent first read at
/// worst duplicates work and the first installed value wins.
pub fn pi() -> BigRational {
    if let Some(cached) = PI_CACHE
        .lock()
        .expect("pi cache lock poisoned")
        .as_ref()
    {
        return cached.clone();
    }
    let computed = compute_pi();
    PI_CACHE
        .lock()
        .expect("pi cache lock poisoned")
        .get_or_insert(computed)
        .clone()
}

/// Drop the cached value so the next read recomputes. Test-only escape
/// hatch; production code never invalidates the cache.
pub fn reset_pi() {
    *PI_CACHE.lock().expect("pi cache lock poisoned") = None;
}

fn compute_pi() -> BigRational {
    tracing::debug!("pi cache empty, computing via Machin's formula");
    let formula = Expr::sub(
        Expr::mul(
            Expr::num(16),
            Expr::func(Func::Arctan, Expr::div(Expr::num(1), Expr::num(5))),
        ),
        Expr::mul(
            Expr::num(4),
            Expr::func(Func::Arctan, Expr::div(Expr::num(1), Expr::num(239))),
        ),
    );
    let mut evaluator = Evaluator::with_trace(TraceLevel::None);
    evaluator
        .evaluate(&formula, &pow10(PI_CACHE_EXPONENT))
        .expect("Machin formula evaluation cannot fail")
}
