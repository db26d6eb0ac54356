pub mod expression;

pub use expression::{Constant, Expr, Func};
