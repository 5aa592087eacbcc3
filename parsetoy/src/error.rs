//! Error types for lexing, parsing, and grammar construction.
//!
//! Lexing and parsing each have exactly one failure type:
//!
//! - [`LexError`]: the lexer could not make progress at some position.
//! - [`ParseError`]: the shift-reduce loop ran out of input with tokens
//!   left unreduced; the stack at that point is attached.
//!
//! [`GrammarError`] is reported while building rules, before any input is
//! seen, and [`Error`] combines the two run-time failures for callers that
//! feed a lazy token stream straight into the parser.

use crate::{Position, Token, token::display_tokens};
use smartstring::alias::String;
use std::fmt;
use thiserror::Error;

/// Error returned by a lexer rule handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Lexing failed at `position`. Terminal for the current `lex` call.
#[derive(Debug, Error)]
pub enum LexError {
    /// No rule matches the remaining input.
    #[error("no lexer rule matches {found:?} at {position}")]
    NoMatch { position: Position, found: char },

    /// The first matching rule consumed nothing, so lexing cannot advance.
    #[error("lexer rule {rule} matched empty text at {position}")]
    EmptyMatch { rule: usize, position: Position },

    /// A rule handler rejected the text its pattern matched.
    #[error("lexer rule {rule} failed at {position}: {source}")]
    Handler {
        rule: usize,
        position: Position,
        #[source]
        source: HandlerError,
    },
}

impl LexError {
    /// Where lexing stopped.
    pub fn position(&self) -> Position {
        match self {
            LexError::NoMatch { position, .. }
            | LexError::EmptyMatch { position, .. }
            | LexError::Handler { position, .. } => *position,
        }
    }
}

/// The parse got stuck: input is exhausted but the stack did not reduce to a
/// single result. `stack` holds every token still on the stack, bottom first.
#[derive(Debug, Error)]
#[error("unable to reduce stack {}", display_tokens(.stack))]
pub struct ParseError<V: fmt::Debug> {
    pub stack: Vec<Token<V>>,
}

impl<V: fmt::Debug> ParseError<V> {
    pub fn stack(&self) -> &[Token<V>] {
        &self.stack
    }

    pub fn into_stack(self) -> Vec<Token<V>> {
        self.stack
    }
}

/// A rule could not be constructed.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("invalid lexer pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: Box<regex_automata::meta::BuildError>,
    },

    #[error("parse rule {operator:?} has no inputs")]
    EmptyInputs { operator: Option<String> },
}

/// Either stage of a lex-then-parse run failed.
#[derive(Debug, Error)]
pub enum Error<V: fmt::Debug> {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError<V>),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_send_sync_static<T: Send + Sync + 'static>() {}

    #[test]
    fn errors_are_send_sync_static() {
        _assert_send_sync_static::<LexError>();
        _assert_send_sync_static::<ParseError<f64>>();
        _assert_send_sync_static::<GrammarError>();
        _assert_send_sync_static::<Error<f64>>();
    }

    #[test]
    fn lex_error_reports_position() {
        let err = LexError::NoMatch {
            position: Position::new(0, 2),
            found: '&',
        };
        assert_eq!(err.position(), Position::new(0, 2));
        assert_eq!(err.to_string(), "no lexer rule matches '&' at 0:2");
    }

    #[test]
    fn handler_error_keeps_source() {
        let source = "x".parse::<f64>().unwrap_err();
        let err = LexError::Handler {
            rule: 3,
            position: Position::new(1, 0),
            source: Box::new(source),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("lexer rule 3 failed at 1:0"));
    }

    #[test]
    fn parse_error_displays_stack() {
        let err = ParseError {
            stack: vec![Token::<f64>::new("add")],
        };
        assert_eq!(err.to_string(), "unable to reduce stack [add]");
        assert_eq!(err.stack().len(), 1);
        assert!(err.into_stack()[0].is("add"));
    }

    #[test]
    fn combined_error_is_transparent() {
        let err: Error<f64> = LexError::EmptyMatch {
            rule: 0,
            position: Position::default(),
        }
        .into();
        assert!(matches!(err, Error::Lex(LexError::EmptyMatch { rule: 0, .. })));
        assert_eq!(err.to_string(), "lexer rule 0 matched empty text at 0:0");
    }
}
