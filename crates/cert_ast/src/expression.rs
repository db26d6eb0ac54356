use std::fmt;
use std::rc::Rc;

use num_bigint::BigInt;
use num_rational::BigRational;

/// Named mathematical constants recognized as leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
        }
    }

    pub fn from_name(name: &str) -> Option<Constant> {
        match name {
            "pi" => Some(Constant::Pi),
            "e" => Some(Constant::E),
            _ => None,
        }
    }
}

/// Unary named functions. `log` is not here: it is binary and has its own
/// `Expr::Log` variant, so every variant carries its arity in its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
    Sinh,
    Cosh,
    Arcsin,
    Arccos,
    Arctan,
    Arccot,
    Ln,
}

impl Func {
    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Cot => "cot",
            Func::Sec => "sec",
            Func::Csc => "csc",
            Func::Sinh => "sinh",
            Func::Cosh => "cosh",
            Func::Arcsin => "arcsin",
            Func::Arccos => "arccos",
            Func::Arctan => "arctan",
            Func::Arccot => "arccot",
            Func::Ln => "ln",
        }
    }

    pub fn from_name(name: &str) -> Option<Func> {
        match name {
            "sin" => Some(Func::Sin),
            "cos" => Some(Func::Cos),
            "tan" => Some(Func::Tan),
            "cot" => Some(Func::Cot),
            "sec" => Some(Func::Sec),
            "csc" => Some(Func::Csc),
            "sinh" => Some(Func::Sinh),
            "cosh" => Some(Func::Cosh),
            "arcsin" => Some(Func::Arcsin),
            "arccos" => Some(Func::Arccos),
            "arctan" => Some(Func::Arctan),
            "arccot" => Some(Func::Arccot),
            "ln" => Some(Func::Ln),
            _ => None,
        }
    }
}

/// An expression tree. Immutable once built, owned by the caller, acyclic.
/// Arity is fixed per variant, so malformed trees are unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(BigRational),
    Constant(Constant),
    Add(Rc<Expr>, Rc<Expr>),
    Sub(Rc<Expr>, Rc<Expr>),
    Mul(Rc<Expr>, Rc<Expr>),
    Div(Rc<Expr>, Rc<Expr>),
    Pow(Rc<Expr>, Rc<Expr>),
    Neg(Rc<Expr>),
    Func(Func, Rc<Expr>),
    /// log(base, value)
    Log(Rc<Expr>, Rc<Expr>),
}

impl Expr {
    // Helper constructors for cleaner code
    pub fn num(n: i64) -> Rc<Self> {
        Rc::new(Expr::Number(BigRational::from_integer(BigInt::from(n))))
    }

    pub fn number(n: BigRational) -> Rc<Self> {
        Rc::new(Expr::Number(n))
    }

    pub fn constant(c: Constant) -> Rc<Self> {
        Rc::new(Expr::Constant(c))
    }

    pub fn add(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Add(lhs, rhs))
    }

    pub fn sub(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Sub(lhs, rhs))
    }

    pub fn mul(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Mul(lhs, rhs))
    }

    pub fn div(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Div(lhs, rhs))
    }

    pub fn pow(base: Rc<Expr>, exp: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Pow(base, exp))
    }

    pub fn neg(expr: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Neg(expr))
    }

    pub fn func(f: Func, arg: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Func(f, arg))
    }

    pub fn log(base: Rc<Expr>, value: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Log(base, value))
    }
}

impl Expr {
    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(_, _) | Expr::Sub(_, _) => 1,
            Expr::Mul(_, _) | Expr::Div(_, _) => 2,
            Expr::Pow(_, _) => 3,
            Expr::Neg(_) => 4,
            Expr::Func(_, _) | Expr::Log(_, _) | Expr::Number(_) | Expr::Constant(_) => 5,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let my_prec = self.precedence();
        let side = |f: &mut fmt::Formatter<'_>, e: &Expr, parens: bool| -> fmt::Result {
            if parens {
                write!(f, "({})", e)
            } else {
                write!(f, "{}", e)
            }
        };
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Constant(c) => write!(f, "{}", c.name()),
            Expr::Add(l, r) => {
                side(f, l, l.precedence() < my_prec)?;
                write!(f, " + ")?;
                side(f, r, r.precedence() < my_prec)
            }
            Expr::Sub(l, r) => {
                side(f, l, l.precedence() < my_prec)?;
                write!(f, " - ")?;
                // Subtraction is left-associative: a - (b - c) needs parens.
                side(f, r, r.precedence() <= my_prec)
            }
            Expr::Mul(l, r) => {
                side(f, l, l.precedence() < my_prec)?;
                write!(f, " * ")?;
                side(f, r, r.precedence() < my_prec)
            }
            Expr::Div(l, r) => {
                side(f, l, l.precedence() < my_prec)?;
                write!(f, " / ")?;
                side(f, r, r.precedence() <= my_prec)
            }
            Expr::Pow(b, e) => {
                side(f, b, b.precedence() < my_prec)?;
                write!(f, "^")?;
                side(f, e, e.precedence() < my_prec)
            }
            Expr::Neg(e) => {
                write!(f, "-")?;
                side(f, e, e.precedence() < my_prec)
            }
            Expr::Func(name, arg) => write!(f, "{}({})", name.name(), arg),
            Expr::Log(base, value) => write!(f, "log({}, {})", base, value),
        }
    }
}
