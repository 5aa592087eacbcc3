//! # Arithmetic grammar
//!
//! Grammar data for the calculator: lexer rules, operator precedence, and
//! parse rules over `f64` values.
//!
//! | token      | pattern                              |
//! |------------|--------------------------------------|
//! | *(skip)*   | `\s+`                                |
//! | `number`   | `\.[0-9]+` or `[0-9]+(\.[0-9]+)?`    |
//! | `add`      | `+`                                  |
//! | `subtract` | `-`                                  |
//! | `multiply` | `*`                                  |
//! | `divide`   | `/`                                  |
//! | `pow`      | `^`                                  |
//! | `(` `)`    | parentheses                          |
//!
//! `add`/`subtract` bind weakest, then `multiply`/`divide`; all four are
//! left-associative. `pow` binds tightest and is right-associative.
//!
//! Tokens built by hand may lack a value; reductions over them yield a
//! valueless `expression` rather than failing.

use parsetoy::{GrammarError, LexRule, OpPrecedence, ParseRule, PrecedenceTable, Token};

pub const NUMBER: &str = "number";
pub const EXPRESSION: &str = "expression";
pub const ADD: &str = "add";
pub const SUBTRACT: &str = "subtract";
pub const MULTIPLY: &str = "multiply";
pub const DIVIDE: &str = "divide";
pub const POW: &str = "pow";
pub const LEFT_PAREN: &str = "(";
pub const RIGHT_PAREN: &str = ")";

/// Lexer rules, in match order.
pub fn lex_rules() -> Result<Vec<LexRule<f64>>, GrammarError> {
    Ok(vec![
        LexRule::skip(r"\s+")?,
        LexRule::new(r"(?:\.[0-9]+|[0-9]+(?:\.[0-9]+)?)", |m| {
            Ok(Some(Token::with_value(NUMBER, m.parse::<f64>()?)))
        })?,
        LexRule::token(r"\+", ADD)?,
        LexRule::token(r"-", SUBTRACT)?,
        LexRule::token(r"\*", MULTIPLY)?,
        LexRule::token(r"/", DIVIDE)?,
        LexRule::token(r"\^", POW)?,
        LexRule::token(r"\(", LEFT_PAREN)?,
        LexRule::token(r"\)", RIGHT_PAREN)?,
    ])
}

pub fn precedence() -> PrecedenceTable {
    PrecedenceTable::new(vec![
        OpPrecedence::left([ADD, SUBTRACT]),
        OpPrecedence::left([MULTIPLY, DIVIDE]),
        OpPrecedence::right([POW]),
    ])
}

/// Parse rules, in reduction order.
pub fn parse_rules() -> Result<Vec<ParseRule<f64>>, GrammarError> {
    Ok(vec![
        ParseRule::new([NUMBER], |tokens| {
            // number -> expression
            expression(tokens.first().and_then(|number| number.value))
        })?,
        ParseRule::new([LEFT_PAREN, EXPRESSION, RIGHT_PAREN], |mut tokens| {
            // ( expression ) -> expression; the span is widened to the parentheses
            tokens.swap_remove(1).with_span(None)
        })?,
        binary(ADD, |a, b| a + b)?,
        binary(SUBTRACT, |a, b| a - b)?,
        binary(MULTIPLY, |a, b| a * b)?,
        binary(DIVIDE, |a, b| a / b)?,
        binary(POW, f64::powf)?,
    ])
}

/// `expression <op> expression -> expression`, folding the values with `f`.
fn binary(op: &str, f: fn(f64, f64) -> f64) -> Result<ParseRule<f64>, GrammarError> {
    ParseRule::with_operator(op, [EXPRESSION, op, EXPRESSION], move |tokens| {
        let value = match tokens.as_slice() {
            [lhs, _, rhs] => lhs.value.zip(rhs.value).map(|(a, b)| f(a, b)),
            _ => None,
        };
        expression(value)
    })
}

/// An `expression` token; a missing operand value leaves it valueless.
fn expression(value: Option<f64>) -> Token<f64> {
    match value {
        Some(value) => Token::with_value(EXPRESSION, value),
        None => Token::new(EXPRESSION),
    }
}
