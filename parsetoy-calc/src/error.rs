//! # Calculator Error Type
//!
//! [`CalcError`] is the single error surface of the calculator. It wraps the
//! three failures the pipeline can hit:
//!
//! - **Grammar construction** (a rule could not be built),
//! - **Lexing** (the input contains text no rule accepts),
//! - **Parsing** (the tokens did not reduce to one expression).
//!
//! Conversions are derived with `#[from]`, so `?` works at every call site
//! that returns `Result<T, CalcError>`.
use parsetoy::{GrammarError, LexError, ParseError};
use thiserror::Error;

/// Represents all possible errors that can occur within the calculator.
///
/// # Examples
/// ```rust
/// # use parsetoy_calc::{CalcError, Calculator};
/// let calc = Calculator::new().unwrap();
/// let err = calc.evaluate("1 +").unwrap_err();
/// assert!(matches!(err, CalcError::Parse(_)));
/// assert_eq!(err.to_string(), "parse error: unable to reduce stack [expression:1.0, add]");
/// ```
#[derive(Debug, Error)]
pub enum CalcError {
    /// The built-in grammar failed to compile.
    #[error("grammar error: {0}")]
    Grammar(#[from] GrammarError),

    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    /// The stack holds what was left when the parse got stuck.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError<f64>),
}

impl From<parsetoy::Error<f64>> for CalcError {
    fn from(e: parsetoy::Error<f64>) -> Self {
        match e {
            parsetoy::Error::Lex(e) => CalcError::Lex(e),
            parsetoy::Error::Parse(e) => CalcError::Parse(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parsetoy::{LexRule, Position, Token};

    fn _assert_error_trait_obj(e: &dyn std::error::Error) -> &dyn std::error::Error {
        e
    }

    #[test]
    fn grammar_error_maps_to_calc_error() {
        let err: CalcError = LexRule::<f64>::skip("(").unwrap_err().into();
        assert!(matches!(err, CalcError::Grammar(_)));
        let _ = _assert_error_trait_obj(&err);
        assert!(err.to_string().starts_with("grammar error: invalid lexer pattern"));
    }

    #[test]
    fn combined_error_splits_by_stage() {
        let lex = parsetoy::Error::<f64>::Lex(LexError::NoMatch {
            position: Position::new(0, 2),
            found: '&',
        });
        let err = CalcError::from(lex);
        assert!(matches!(err, CalcError::Lex(_)));
        assert_eq!(err.to_string(), "lex error: no lexer rule matches '&' at 0:2");

        let parse = parsetoy::Error::Parse(ParseError {
            stack: vec![Token::<f64>::new("add")],
        });
        let err = CalcError::from(parse);
        let CalcError::Parse(e) = err else {
            panic!("expected parse error")
        };
        assert_eq!(e.stack().len(), 1);
        assert!(e.stack()[0].is("add"));
    }

    // Compile-time trait bounds sanity check.
    fn _assert_send_sync_static<T: Send + Sync + 'static>() {}
    #[test]
    fn calc_error_is_send_sync_static() {
        _assert_send_sync_static::<CalcError>();
    }
}
