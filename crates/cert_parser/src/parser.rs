use std::rc::Rc;

use cert_ast::{Constant, Expr, Func};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::multispace0,
    combinator::opt,
    multi::{fold_many0, separated_list0},
    sequence::{delimited, pair, preceded},
    IResult,
};
use num_bigint::BigInt;
use num_rational::BigRational;

use crate::error::ParseError;

// Intermediate AST for parsing: names and calls stay unresolved until
// `lower`, so unknown-function/arity errors come out as ParseError
// instead of a generic nom failure.
#[derive(Debug, Clone)]
enum ParseNode {
    Number(BigRational),
    Name(String),
    Add(Box<ParseNode>, Box<ParseNode>),
    Sub(Box<ParseNode>, Box<ParseNode>),
    Mul(Box<ParseNode>, Box<ParseNode>),
    Div(Box<ParseNode>, Box<ParseNode>),
    Pow(Box<ParseNode>, Box<ParseNode>),
    Neg(Box<ParseNode>),
    Call(String, Vec<ParseNode>),
}

impl ParseNode {
    fn lower(self) -> Result<Rc<Expr>, ParseError> {
        match self {
            ParseNode::Number(n) => Ok(Expr::number(n)),
            ParseNode::Name(name) => match Constant::from_name(&name) {
                Some(c) => Ok(Expr::constant(c)),
                None => Err(ParseError::UnknownName(name)),
            },
            ParseNode::Add(l, r) => Ok(Expr::add(l.lower()?, r.lower()?)),
            ParseNode::Sub(l, r) => Ok(Expr::sub(l.lower()?, r.lower()?)),
            ParseNode::Mul(l, r) => Ok(Expr::mul(l.lower()?, r.lower()?)),
            ParseNode::Div(l, r) => Ok(Expr::div(l.lower()?, r.lower()?)),
            ParseNode::Pow(b, e) => Ok(Expr::pow(b.lower()?, e.lower()?)),
            ParseNode::Neg(e) => Ok(Expr::neg(e.lower()?)),
            ParseNode::Call(name, args) => lower_call(name, args),
        }
    }
}

fn lower_call(name: String, args: Vec<ParseNode>) -> Result<Rc<Expr>, ParseError> {
    if name == "log" {
        if args.len() != 2 {
            return Err(ParseError::WrongArity {
                name,
                expected: 2,
                got: args.len(),
            });
        }
        let mut it = args.into_iter();
        let base = it.next().expect("arity checked").lower()?;
        let value = it.next().expect("arity checked").lower()?;
        return Ok(Expr::log(base, value));
    }
    match Func::from_name(&name) {
        Some(f) => {
            if args.len() != 1 {
                return Err(ParseError::WrongArity {
                    name,
                    expected: 1,
                    got: args.len(),
                });
            }
            let arg = args.into_iter().next().expect("arity checked").lower()?;
            Ok(Expr::func(f, arg))
        }
        None => Err(ParseError::UnknownFunction(name)),
    }
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Convert a decimal string to BigRational.
/// Supports: "8.2" → 41/5, ".5" → 1/2, "8." → 8, "123" → 123
fn decimal_to_rational(integer_part: &str, fractional_part: &str) -> BigRational {
    let k = fractional_part.len();

    let int_val: BigInt = if integer_part.is_empty() {
        BigInt::from(0)
    } else {
        integer_part.parse().unwrap_or_else(|_| BigInt::from(0))
    };

    if k == 0 {
        return BigRational::from_integer(int_val);
    }

    let ten = BigInt::from(10);
    let mut denominator = BigInt::from(1);
    for _ in 0..k {
        denominator *= &ten;
    }

    let frac_val: BigInt = fractional_part.parse().unwrap_or_else(|_| BigInt::from(0));

    // numerator = integer_part * 10^k + fractional_part
    let numerator = int_val * &denominator + frac_val;

    // BigRational::new automatically reduces the fraction (gcd)
    BigRational::new(numerator, denominator)
}

// Numeric literals: 123, 8.2, .5, 8.
fn parse_number(input: &str) -> IResult<&str, ParseNode> {
    fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    let (remaining, (int_part, maybe_frac)) = pair(
        take_while(is_digit),
        opt(pair(tag("."), take_while(is_digit))),
    )(input)?;

    let (int_str, frac_str) = match maybe_frac {
        Some((_, frac)) => (int_part, frac),
        None => (int_part, ""),
    };

    // Must have at least some digits somewhere ("." alone is not a number)
    if int_str.is_empty() && frac_str.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Digit,
        )));
    }

    let rational = decimal_to_rational(int_str, frac_str);
    Ok((remaining, ParseNode::Number(rational)))
}

// Identifier, optionally with a call argument list: `pi`, `sin(x)`, `log(a, b)`
fn parse_name_or_call(input: &str) -> IResult<&str, ParseNode> {
    let (input, name) = take_while1(|c: char| c.is_ascii_alphabetic())(input)?;
    let (input, args) = opt(delimited(
        ws(tag("(")),
        separated_list0(ws(tag(",")), parse_expr_node),
        ws(tag(")")),
    ))(input)?;
    let node = match args {
        Some(args) => ParseNode::Call(name.to_string(), args),
        None => ParseNode::Name(name.to_string()),
    };
    Ok((input, node))
}

fn parse_atom(input: &str) -> IResult<&str, ParseNode> {
    ws(alt((
        parse_number,
        parse_name_or_call,
        delimited(tag("("), parse_expr_node, tag(")")),
    )))(input)
}

// Exponentiation binds tighter than unary minus and is right-associative:
// 2^3^2 = 2^(3^2), -2^2 = -(2^2), 2^-3 = 2^(-3).
fn parse_power(input: &str) -> IResult<&str, ParseNode> {
    let (input, base) = parse_atom(input)?;
    let (input, exp) = opt(preceded(ws(tag("^")), parse_factor))(input)?;
    let node = match exp {
        Some(exp) => ParseNode::Pow(Box::new(base), Box::new(exp)),
        None => base,
    };
    Ok((input, node))
}

fn parse_factor(input: &str) -> IResult<&str, ParseNode> {
    let (input, neg) = opt(ws(tag("-")))(input)?;
    if neg.is_some() {
        let (input, inner) = parse_factor(input)?;
        Ok((input, ParseNode::Neg(Box::new(inner))))
    } else {
        parse_power(input)
    }
}

fn parse_term(input: &str) -> IResult<&str, ParseNode> {
    let (input, init) = parse_factor(input)?;
    fold_many0(
        pair(ws(alt((tag("*"), tag("/")))), parse_factor),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            "*" => ParseNode::Mul(Box::new(acc), Box::new(rhs)),
            _ => ParseNode::Div(Box::new(acc), Box::new(rhs)),
        },
    )(input)
}

fn parse_expr_node(input: &str) -> IResult<&str, ParseNode> {
    let (input, init) = parse_term(input)?;
    fold_many0(
        pair(ws(alt((tag("+"), tag("-")))), parse_term),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            "+" => ParseNode::Add(Box::new(acc), Box::new(rhs)),
            _ => ParseNode::Sub(Box::new(acc), Box::new(rhs)),
        },
    )(input)
}

/// Parse an infix expression into a `cert_ast` tree.
pub fn parse(input: &str) -> Result<Rc<Expr>, ParseError> {
    match parse_expr_node(input) {
        Ok((rest, node)) => {
            let rest = rest.trim();
            if !rest.is_empty() {
                return Err(ParseError::UnconsumedInput(rest.to_string()));
            }
            node.lower()
        }
        Err(e) => Err(ParseError::NomError(e.to_string())),
    }
}
