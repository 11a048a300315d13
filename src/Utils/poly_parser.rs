//! Reads polynomials from whitespace separated integers.
//!
//! A polynomial is written as a term count `n` followed by `n` pairs
//! `coefficient exponent`, e.g. `2  3 2  2 1` for `3x^2 + 2x^1`. Pairs may come
//! in any order; every pair goes through `Polynomial::new_term` in input order.
//! A session is two polynomials followed by the integer evaluation point.
use crate::polynomial::{ArithmeticOp, Polynomial, Term, TermPool};
use log::debug;
use nom::{
    IResult, Parser,
    character::complete::{digit1, i32 as int32, i64 as int64, multispace0},
    combinator::{map, map_res},
    sequence::{pair, preceded},
};
use std::fmt;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, PartialEq)]
pub enum PolyParseError {
    /// a token that is not what was expected at byte offset `position`
    Syntax { position: usize, message: String },
    /// input ended after `found` of `expected` terms
    Truncated { expected: usize, found: usize },
    /// input ended where a value was required
    Missing(&'static str),
    /// non-blank text after a complete session
    TrailingInput(String),
}

impl fmt::Display for PolyParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PolyParseError::Syntax { position, message } => {
                write!(f, "syntax error at byte {}: {}", position, message)
            }
            PolyParseError::Truncated { expected, found } => write!(
                f,
                "input ended after {} of {} terms",
                found, expected
            ),
            PolyParseError::Missing(what) => write!(f, "input ended, {} expected", what),
            PolyParseError::TrailingInput(text) => write!(f, "unexpected trailing input '{}'", text),
        }
    }
}

impl std::error::Error for PolyParseError {}

/// Term count: a non-negative decimal integer.
pub fn parse_term_count(input: &str) -> IResult<&str, usize> {
    map_res(preceded(multispace0, digit1), str::parse::<usize>).parse(input)
}

/// One `coefficient exponent` pair.
pub fn parse_term(input: &str) -> IResult<&str, Term> {
    map(
        pair(preceded(multispace0, int64), preceded(multispace0, int32)),
        |(coefficient, exponent)| Term::new(coefficient, exponent),
    )
    .parse(input)
}

fn parse_point(input: &str) -> IResult<&str, i64> {
    preceded(multispace0, int64).parse(input)
}

fn at_end(input: &str) -> bool {
    input.trim_start().is_empty()
}

fn position(full: &str, rest: &str) -> usize {
    full.len() - rest.len()
}

/// Parses one polynomial at the start of `input` into `pool`, returning the
/// unread remainder.
pub fn parse_polynomial<'a>(
    input: &'a str,
    pool: &TermPool,
) -> Result<(&'a str, Polynomial), PolyParseError> {
    parse_polynomial_at(input, input, pool)
}

fn parse_polynomial_at<'a>(
    full: &str,
    input: &'a str,
    pool: &TermPool,
) -> Result<(&'a str, Polynomial), PolyParseError> {
    if at_end(input) {
        return Err(PolyParseError::Missing("term count"));
    }
    let (mut rest, n) = parse_term_count(input).map_err(|_| PolyParseError::Syntax {
        position: position(full, input.trim_start()),
        message: "expected a non-negative term count".to_string(),
    })?;

    let mut poly = Polynomial::new(pool);
    for found in 0..n {
        if at_end(rest) {
            return Err(PolyParseError::Truncated { expected: n, found });
        }
        match parse_term(rest) {
            Ok((remaining, term)) => {
                poly.new_term(term.coefficient, term.exponent);
                rest = remaining;
            }
            Err(_) => {
                return Err(PolyParseError::Syntax {
                    position: position(full, rest.trim_start()),
                    message: format!("expected coefficient and exponent of term {}", found + 1),
                });
            }
        }
    }
    debug!("parsed polynomial with {} input terms: {}", n, poly);
    Ok((rest, poly))
}

/// Everything the calculator reads: two polynomials and a point.
#[derive(Debug)]
pub struct Session {
    pub p1: Polynomial,
    pub p2: Polynomial,
    pub x: i64,
}

impl Session {
    /// The calculator's output: both operands, their sum, difference and
    /// product, then both polynomials evaluated at `x`.
    pub fn report(&self) -> String {
        let mut lines = vec![format!("P1 = {}", self.p1), format!("P2 = {}", self.p2)];
        for op in ArithmeticOp::iter() {
            lines.push(format!("P1 {} P2 = {}", op, op.apply(&self.p1, &self.p2)));
        }
        let x = self.x as f64;
        lines.push(format!("P1({}) = {}", self.x, self.p1.eval(x)));
        lines.push(format!("P2({}) = {}", self.x, self.p2.eval(x)));
        lines.join("\n")
    }
}

pub fn parse_session(input: &str, pool: &TermPool) -> Result<Session, PolyParseError> {
    let (rest, p1) = parse_polynomial_at(input, input, pool)?;
    let (rest, p2) = parse_polynomial_at(input, rest, pool)?;
    if at_end(rest) {
        return Err(PolyParseError::Missing("evaluation point"));
    }
    let (rest, x) = parse_point(rest).map_err(|_| PolyParseError::Syntax {
        position: position(input, rest.trim_start()),
        message: "expected an integer evaluation point".to_string(),
    })?;
    if !at_end(rest) {
        return Err(PolyParseError::TrailingInput(rest.trim().to_string()));
    }
    Ok(Session { p1, p2, x })
}
