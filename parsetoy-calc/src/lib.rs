//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! # parsetoy-calc
//!
//! A four-function calculator with exponentiation and parentheses, built on
//! **parsetoy**. The grammar lives in [`grammar`] as plain rule data; the
//! [`Calculator`] facade owns a compiled [`Lexer`] and [`Parser`] and runs
//! the lex-then-parse pipeline.
//!
//! ## Example
//!
//! ```rust
//! use parsetoy::span;
//! use parsetoy_calc::Calculator;
//!
//! let calc = Calculator::new().unwrap();
//! assert_eq!(calc.evaluate("1 + 2 * 3").unwrap(), Some(7.0));
//!
//! let tokens = calc.lex("2 ^ 3").unwrap();
//! let stack = calc.parse(tokens).unwrap();
//! assert_eq!(stack[0].value, Some(8.0));
//! assert_eq!(stack[0].span, span!(0, 0, 0, 5));
//! ```
//!
//! A [`Calculator`] is immutable after construction and can be shared by
//! reference across threads.
pub mod error;
pub mod grammar;

pub use error::CalcError;

use parsetoy::{
    GrammarError, LexError, Lexer, LexerStats, ParseError, Parser, ParserStats, Token, Tokens,
};

/// Compiled calculator grammar.
#[derive(Debug)]
pub struct Calculator {
    lexer: Lexer<f64>,
    parser: Parser<f64>,
}

impl Calculator {
    /// Compiles the arithmetic grammar.
    pub fn new() -> Result<Self, GrammarError> {
        Ok(Self {
            lexer: Lexer::new(grammar::lex_rules()?),
            parser: Parser::new(grammar::parse_rules()?, grammar::precedence()),
        })
    }

    pub fn lexer(&self) -> &Lexer<f64> {
        &self.lexer
    }

    pub fn parser(&self) -> &Parser<f64> {
        &self.parser
    }

    /// Lazy token stream over `input`.
    pub fn tokens<'a, 'i>(&'a self, input: &'i str) -> Tokens<'a, 'i, f64> {
        self.lexer.lex(input)
    }

    /// Lexes all of `input`, stopping at the first error.
    pub fn lex(&self, input: &str) -> Result<Vec<Token<f64>>, LexError> {
        self.lexer.lex(input).collect()
    }

    /// Like [`Calculator::lex`], also returning the lexer's counters.
    pub fn lex_with_stats(&self, input: &str) -> Result<(Vec<Token<f64>>, LexerStats), LexError> {
        let mut tokens = self.lexer.lex(input);
        let mut out = Vec::new();
        while let Some(token) = tokens.try_next()? {
            out.push(token);
        }
        Ok((out, tokens.stats()))
    }

    pub fn parse(&self, tokens: Vec<Token<f64>>) -> Result<Vec<Token<f64>>, ParseError<f64>> {
        self.parser.parse(tokens)
    }

    pub fn parse_with_stats(
        &self,
        tokens: Vec<Token<f64>>,
    ) -> Result<(Vec<Token<f64>>, ParserStats), ParseError<f64>> {
        self.parser.parse_with_stats(tokens)
    }

    /// Lexes and parses `input` in one pass, returning the value of the last
    /// token on the result stack. Blank input yields `None`.
    pub fn evaluate(&self, input: &str) -> Result<Option<f64>, CalcError> {
        let stack = self.parser.parse_stream(self.lexer.lex(input))?;
        Ok(stack.last().and_then(|token| token.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parsetoy::display_tokens;
    use rstest::rstest;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn calc() -> Calculator {
        init_logger();
        Calculator::new().unwrap()
    }

    #[rstest]
    #[case("1 + 2 * 3", 7.0)]
    #[case("2 ^ 3 ^ 2", 512.0)]
    #[case("(1 + 2) * 3", 9.0)]
    #[case("1 + 5 + 7 - 0.5", 12.5)]
    #[case("10 - 4 - 3", 3.0)]
    #[case("8 / 4 / 2", 1.0)]
    #[case("2 * 3 ^ 2", 18.0)]
    #[case(".5 * 4", 2.0)]
    #[case("((7))", 7.0)]
    #[case("  42\n", 42.0)]
    fn evaluates(#[case] input: &str, #[case] expected: f64) {
        assert_eq!(calc().evaluate(input).unwrap(), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_input_has_no_value(#[case] input: &str) {
        assert_eq!(calc().evaluate(input).unwrap(), None);
    }

    #[test]
    fn mixed_additive_chain_lexes_and_parses() {
        let calc = calc();
        let tokens = calc.lex("1 + 5 + 7 - 0.5").unwrap();
        assert_eq!(
            display_tokens(&tokens),
            "[number:1.0, add, number:5.0, add, number:7.0, subtract, number:0.5]"
        );
        let stack = calc.parse(tokens).unwrap();
        assert_eq!(stack.len(), 1);
        assert!(stack[0].is(grammar::EXPRESSION));
        assert_eq!(stack[0].value, Some(12.5));
    }

    #[test]
    fn unknown_character_is_a_lex_error() {
        let err = calc().evaluate("1 & 2").unwrap_err();
        let CalcError::Lex(LexError::NoMatch { position, found }) = err else {
            panic!("expected lex error")
        };
        assert_eq!(found, '&');
        assert_eq!(position.column, 2);
    }

    #[test]
    fn lone_operator_is_a_parse_error() {
        let calc = calc();
        let tokens = calc.lex("+").unwrap();
        let err = calc.parse(tokens).unwrap_err();
        assert_eq!(err.stack().len(), 1);
        assert!(err.stack()[0].is(grammar::ADD));
        assert_eq!(err.to_string(), "unable to reduce stack [add]");
    }

    #[test]
    fn hand_built_valueless_number_has_no_value() {
        let calc = calc();
        let stack = calc.parse(vec![Token::new(grammar::NUMBER)]).unwrap();
        assert_eq!(display_tokens(&stack), "[expression]");
        assert_eq!(stack[0].value, None);
    }

    #[test]
    fn unbalanced_parenthesis_is_a_parse_error() {
        let err = calc().evaluate("(1 + 2").unwrap_err();
        let CalcError::Parse(e) = err else {
            panic!("expected parse error")
        };
        assert_eq!(display_tokens(e.stack()), "[(, expression:3.0]");
    }

    #[test]
    fn stats_count_the_run() {
        let calc = calc();
        let (tokens, lex_stats) = calc.lex_with_stats("1 + 2").unwrap();
        assert_eq!(lex_stats.matches, 5);
        assert_eq!(lex_stats.skipped, 2);
        assert_eq!(lex_stats.chars, 5);
        let (_, parse_stats) = calc.parse_with_stats(tokens).unwrap();
        assert_eq!(parse_stats.shifts, 3);
        assert_eq!(parse_stats.reductions, 3);
        assert_eq!(parse_stats.deferrals, 0);
    }

    #[test]
    fn right_associative_pow_defers() {
        let calc = calc();
        let tokens = calc.lex("2 ^ 3 ^ 2").unwrap();
        let (stack, stats) = calc.parse_with_stats(tokens).unwrap();
        assert_eq!(stack[0].value, Some(512.0));
        assert_eq!(stats.deferrals, 1);
    }

    #[test]
    fn shared_across_threads() {
        let calc = &calc();
        let inputs = ["1 + 2", "3 * 4", "2 ^ 10", "(5 - 1) / 2"];
        let results: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = inputs
                .iter()
                .map(|&input| s.spawn(move || calc.evaluate(input).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(
            results,
            vec![Some(3.0), Some(12.0), Some(1024.0), Some(2.0)]
        );
    }
}
