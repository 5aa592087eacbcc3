//! # Lexer
//!
//! A grammar is an ordered list of [`LexRule`]s. At every step the rules are
//! tried in declaration order against the text at the cursor; the first rule
//! whose pattern matches wins, even if a later rule would match more text.
//! The winning rule's handler turns the matched text into a token, or into
//! nothing (whitespace, comments), and the cursor moves past the match.
//!
//! Tokens are produced lazily by the [`Tokens`] iterator.
//!
//! ```rust
//! # use parsetoy::{LexRule, Lexer, Token};
//! let lexer = Lexer::new(vec![
//!     LexRule::skip(r"\s+").unwrap(),
//!     LexRule::new(r"[0-9]+", |m| Ok(Some(Token::with_value("number", m.parse::<i64>()?)))).unwrap(),
//!     LexRule::token(r"\+", "add").unwrap(),
//! ]);
//! let tokens: Vec<_> = lexer.lex("1 + 22").collect::<Result<_, _>>().unwrap();
//! assert_eq!(parsetoy::display_tokens(&tokens), "[number:1, add, number:22]");
//! ```

use crate::{GrammarError, HandlerError, LexError, LexerCursor, Token};
use regex_automata::{Anchored, Input, meta::Regex};
use smartstring::alias::String;
use std::fmt;
use std::iter::FusedIterator;

type LexHandler<V> = Box<dyn Fn(&str) -> Result<Option<Token<V>>, HandlerError> + Send + Sync>;

/// A pattern and the handler invoked with the text it matched.
///
/// The handler returns `Ok(None)` to discard the match.
pub struct LexRule<V> {
    pattern: Regex,
    source: String,
    handler: LexHandler<V>,
}

impl<V: 'static> LexRule<V> {
    pub fn new<F>(pattern: &str, handler: F) -> Result<Self, GrammarError>
    where
        F: Fn(&str) -> Result<Option<Token<V>>, HandlerError> + Send + Sync + 'static,
    {
        let regex = Regex::new(pattern).map_err(|source| GrammarError::Pattern {
            pattern: String::from(pattern),
            source: Box::new(source),
        })?;
        Ok(Self {
            pattern: regex,
            source: String::from(pattern),
            handler: Box::new(handler),
        })
    }

    /// A rule that consumes its match and emits nothing.
    pub fn skip(pattern: &str) -> Result<Self, GrammarError> {
        Self::new(pattern, |_| Ok(None))
    }

    /// A rule that emits a valueless token of type `token_type`.
    pub fn token(pattern: &str, token_type: &str) -> Result<Self, GrammarError> {
        let token_type = String::from(token_type);
        Self::new(pattern, move |_| Ok(Some(Token::new(&token_type))))
    }
}

impl<V> LexRule<V> {
    /// The pattern text this rule was built from.
    pub fn pattern(&self) -> &str {
        self.source.as_str()
    }

    /// Length in bytes of this rule's match at the start of `rest`.
    fn match_len(&self, rest: &str) -> Option<usize> {
        self.pattern
            .search(&Input::new(rest).anchored(Anchored::Yes))
            .map(|m| m.end())
    }
}

impl<V> fmt::Debug for LexRule<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexRule")
            .field("pattern", &self.source)
            .finish_non_exhaustive()
    }
}

/// Counters collected while lexing one input.
#[derive(Debug, Clone, Default)]
pub struct LexerStats {
    /// Rule matches, including skipped ones.
    pub matches: usize,
    /// Matches whose handler produced no token.
    pub skipped: usize,
    /// Chars consumed.
    pub chars: usize,
}

/// Owns a grammar and lexes inputs against it.
#[derive(Debug)]
pub struct Lexer<V> {
    rules: Vec<LexRule<V>>,
}

impl<V> Lexer<V> {
    pub fn new(rules: Vec<LexRule<V>>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[LexRule<V>] {
        &self.rules
    }

    /// Starts lexing `input`; tokens are produced as the iterator is pulled.
    pub fn lex<'g, 'i>(&'g self, input: &'i str) -> Tokens<'g, 'i, V> {
        lex(&self.rules, input)
    }
}

/// Lexes `input` with `grammar`.
pub fn lex<'g, 'i, V>(grammar: &'g [LexRule<V>], input: &'i str) -> Tokens<'g, 'i, V> {
    Tokens {
        rules: grammar,
        input,
        cursor: LexerCursor::new(),
        end_flag: false,
        stats: LexerStats::default(),
    }
}

/// Lazy token sequence for one input.
///
/// Yields `Ok(token)` until the input is exhausted, or a single `Err` if
/// lexing gets stuck; either way it yields `None` from then on.
pub struct Tokens<'g, 'i, V> {
    rules: &'g [LexRule<V>],
    input: &'i str,
    cursor: LexerCursor,
    end_flag: bool,
    stats: LexerStats,
}

impl<'g, 'i, V> Tokens<'g, 'i, V> {
    pub fn stats(&self) -> LexerStats {
        self.stats.clone()
    }

    /// The input not consumed yet.
    pub fn remaining(&self) -> &'i str {
        &self.input[self.cursor.pos..]
    }

    /// Pulls the next token, skipping matches whose handler emits nothing.
    pub fn try_next(&mut self) -> Result<Option<Token<V>>, LexError> {
        while self.cursor.pos < self.input.len() {
            let rest = &self.input[self.cursor.pos..];
            let position = self.cursor.position();

            let Some((rule, len)) = self
                .rules
                .iter()
                .enumerate()
                .find_map(|(i, r)| r.match_len(rest).map(|len| (i, len)))
            else {
                let found = rest.chars().next().unwrap_or_default();
                log::trace!("NO MATCH: at {}, found {:?}", position, found);
                return Err(LexError::NoMatch { position, found });
            };
            if len == 0 {
                return Err(LexError::EmptyMatch { rule, position });
            }

            let text = &rest[..len];
            let span = self.cursor.consume(text);
            self.stats.matches += 1;
            self.stats.chars += text.chars().count();
            log::trace!(
                "MATCHED: Rule: {}, Pattern: {:?}, Text: {:?}, {}",
                rule,
                self.rules[rule].pattern(),
                text,
                span.display()
            );

            let token = (self.rules[rule].handler)(text)
                .map_err(|source| LexError::Handler {
                    rule,
                    position,
                    source,
                })?;
            match token {
                Some(mut token) => {
                    if token.span.is_none() {
                        token.span = Some(span);
                    }
                    return Ok(Some(token));
                }
                None => self.stats.skipped += 1,
            }
        }
        Ok(None)
    }
}

impl<'g, 'i, V> Iterator for Tokens<'g, 'i, V> {
    type Item = Result<Token<V>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.end_flag {
            return None;
        }
        match self.try_next() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.end_flag = true;
                log::debug!("lexing finished: {:?}", self.stats);
                None
            }
            Err(e) => {
                self.end_flag = true;
                Some(Err(e))
            }
        }
    }
}

impl<'g, 'i, V> FusedIterator for Tokens<'g, 'i, V> {}
