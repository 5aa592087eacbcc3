//! # Tokens
//!
//! [`Token`] is the single value type that flows through the engine. The
//! lexer produces terminal tokens, the parser's reduction handlers produce
//! non-terminal tokens, and the result stack is a sequence of them.
//!
//! Only [`Token::token_type`] takes part in rule matching. The payload in
//! [`Token::value`] and the source [`Token::span`] are carried along for the
//! handlers and for diagnostics.
use crate::Span;
use smartstring::alias::String;
use std::fmt;

/// A typed token with an optional payload.
///
/// # Example
/// ```rust
/// # use parsetoy::Token;
/// let tok = Token::with_value("number", 1.5);
/// assert!(tok.is("number"));
/// assert_eq!(tok.to_string(), "number:1.5");
/// assert_eq!(Token::<f64>::new("add").to_string(), "add");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Token<V> {
    /// The symbol used for matching against parse rule inputs.
    pub token_type: String,
    /// Semantic payload, e.g. a parsed number or a sub-result.
    pub value: Option<V>,
    /// Source range covered by this token, when known.
    pub span: Option<Span>,
}

impl<V> Token<V> {
    /// Creates a token without a payload.
    pub fn new(token_type: impl AsRef<str>) -> Self {
        Self {
            token_type: String::from(token_type.as_ref()),
            value: None,
            span: None,
        }
    }

    /// Creates a token carrying `value`.
    pub fn with_value(token_type: impl AsRef<str>, value: V) -> Self {
        Self {
            token_type: String::from(token_type.as_ref()),
            value: Some(value),
            span: None,
        }
    }

    /// Returns the token with its span replaced.
    pub fn with_span(self, span: Option<Span>) -> Self {
        Self { span, ..self }
    }

    pub fn token_type(&self) -> &str {
        self.token_type.as_str()
    }

    /// Is this token of type `token_type`?
    #[inline]
    pub fn is(&self, token_type: &str) -> bool {
        self.token_type.as_str() == token_type
    }
}

impl<V: fmt::Debug> fmt::Display for Token<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}:{:?}", self.token_type, value),
            None => f.write_str(&self.token_type),
        }
    }
}

/// Renders a token sequence as a bracketed, comma separated list,
/// e.g. `[number:1.0, add, number:2.0]`.
pub fn display_tokens<V: fmt::Debug>(tokens: &[Token<V>]) -> std::string::String {
    let items: Vec<std::string::String> = tokens.iter().map(|t| t.to_string()).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span;

    #[test]
    fn matching_uses_type_only() {
        let a = Token::with_value("number", 1.0);
        let b = Token::with_value("number", 2.0).with_span(span!(0, 0, 0, 1));
        assert!(a.is("number"));
        assert!(b.is("number"));
        assert!(!a.is("expression"));
        assert_eq!(a.token_type(), b.token_type());
    }

    #[test]
    fn display_includes_value_in_debug_form() {
        assert_eq!(Token::with_value("number", 1.0).to_string(), "number:1.0");
        assert_eq!(Token::with_value("number", 0.5).to_string(), "number:0.5");
        assert_eq!(Token::<f64>::new("(").to_string(), "(");
    }

    #[test]
    fn display_tokens_renders_list() {
        let tokens = vec![
            Token::with_value("number", 1.0),
            Token::new("add"),
            Token::with_value("number", 5.0),
        ];
        assert_eq!(display_tokens(&tokens), "[number:1.0, add, number:5.0]");
        assert_eq!(display_tokens::<f64>(&[]), "[]");
    }
}
