//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! A small rule-driven lexer and precedence-aware shift-reduce parser.
//!
//! Grammars are plain data: an ordered list of [`LexRule`]s for the lexer,
//! and an ordered list of [`ParseRule`]s plus a [`PrecedenceTable`] for the
//! parser. Rules carry handler closures that build tokens; the first rule
//! that applies always wins.
//!
//! ```rust
//! use parsetoy::{LexRule, Lexer, OpPrecedence, ParseRule, Parser, PrecedenceTable, Token};
//!
//! let lexer = Lexer::new(vec![
//!     LexRule::skip(r"\s+").unwrap(),
//!     LexRule::new(r"[0-9]+", |m| Ok(Some(Token::with_value("number", m.parse::<i64>()?)))).unwrap(),
//!     LexRule::token(r"\+", "add").unwrap(),
//!     LexRule::token(r"\*", "multiply").unwrap(),
//! ]);
//!
//! let binary = |op: &str, f: fn(i64, i64) -> i64| {
//!     ParseRule::with_operator(op, ["expression", op, "expression"], move |t: Vec<Token<i64>>| {
//!         Token::with_value("expression", f(t[0].value.unwrap(), t[2].value.unwrap()))
//!     })
//!     .unwrap()
//! };
//! let parser = Parser::new(
//!     vec![
//!         ParseRule::new(["number"], |t: Vec<Token<i64>>| {
//!             Token::with_value("expression", t[0].value.unwrap())
//!         })
//!         .unwrap(),
//!         binary("add", |a, b| a + b),
//!         binary("multiply", |a, b| a * b),
//!     ],
//!     PrecedenceTable::new(vec![OpPrecedence::left(["add"]), OpPrecedence::left(["multiply"])]),
//! );
//!
//! let stack = parser.parse_stream(lexer.lex("1 + 2 * 3")).unwrap();
//! assert_eq!(stack[0].value, Some(7));
//! ```

mod cursor;
mod error;
mod lexer;
mod parser;
mod precedence;
mod token;

pub use crate::cursor::{LexerCursor, Position, Span, merge_spans};
pub use crate::error::{Error, GrammarError, HandlerError, LexError, ParseError};
pub use crate::lexer::{LexRule, Lexer, LexerStats, Tokens, lex};
pub use crate::parser::{ParseRule, Parser, ParserStats, parse};
pub use crate::precedence::{Assoc, OpPrecedence, ParseAssocError, PrecedenceTable, Rank};
pub use crate::token::{Token, display_tokens};
