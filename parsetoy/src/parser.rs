//! # Shift-reduce parser
//!
//! The parser keeps a stack of tokens and a single lookahead token. Each
//! iteration first tries to reduce: the [`ParseRule`]s are scanned in
//! declaration order and the first rule whose inputs match the top of the
//! stack replaces those tokens with its handler's output. Operator rules
//! consult the [`PrecedenceTable`] against the lookahead and may step aside
//! so that a tighter-binding (or right-associative) operator is shifted
//! first. When nothing reduces, the lookahead is shifted; when there is no
//! lookahead either, the parse ends.
//!
//! A parse succeeds with an empty stack or with a single token produced by
//! a reduction. Anything else left on the stack is reported as a
//! [`ParseError`].

use crate::{
    Error, GrammarError, ParseError, PrecedenceTable, Token, cursor::merge_spans,
    token::display_tokens,
};
use smartstring::alias::String;
use std::fmt::{self, Debug};

type ReduceHandler<V> = Box<dyn Fn(Vec<Token<V>>) -> Token<V> + Send + Sync>;

/// A reduction: when the top of the stack matches `inputs`, the matched
/// tokens are replaced by the handler's output.
///
/// `operator` names the precedence-table entry for this rule; rules without
/// one (e.g. `number -> expression`) always reduce as soon as they match.
pub struct ParseRule<V> {
    operator: Option<String>,
    inputs: Vec<String>,
    handler: ReduceHandler<V>,
}

impl<V: 'static> ParseRule<V> {
    /// A rule that takes no part in precedence decisions.
    pub fn new<I, S, F>(inputs: I, handler: F) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(Vec<Token<V>>) -> Token<V> + Send + Sync + 'static,
    {
        Self::build(None, inputs, handler)
    }

    /// A rule governed by `operator`'s rank in the precedence table.
    pub fn with_operator<I, S, F>(operator: &str, inputs: I, handler: F) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(Vec<Token<V>>) -> Token<V> + Send + Sync + 'static,
    {
        Self::build(Some(String::from(operator)), inputs, handler)
    }

    fn build<I, S, F>(operator: Option<String>, inputs: I, handler: F) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(Vec<Token<V>>) -> Token<V> + Send + Sync + 'static,
    {
        let inputs: Vec<String> = inputs
            .into_iter()
            .map(|s| String::from(s.as_ref()))
            .collect();
        // A rule with no inputs would match every stack and never let the loop shift.
        if inputs.is_empty() {
            return Err(GrammarError::EmptyInputs { operator });
        }
        Ok(Self {
            operator,
            inputs,
            handler: Box::new(handler),
        })
    }
}

impl<V> ParseRule<V> {
    pub fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Do the top `inputs.len()` stack entries have exactly our input types?
    fn matches(&self, stack: &[Slot<V>]) -> bool {
        let n = self.inputs.len();
        stack.len() >= n
            && stack[stack.len() - n..]
                .iter()
                .zip(&self.inputs)
                .all(|(slot, input)| slot.token.token_type == *input)
    }
}

impl<V> fmt::Debug for ParseRule<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseRule")
            .field("operator", &self.operator)
            .field("inputs", &self.inputs)
            .finish_non_exhaustive()
    }
}

/// Counters collected during one parse.
#[derive(Debug, Clone, Default)]
pub struct ParserStats {
    pub shifts: usize,
    pub reductions: usize,
    /// Eligible operator rules skipped because the lookahead binds tighter.
    pub deferrals: usize,
}

/// A stack entry. `reduced` marks tokens produced by a rule handler rather
/// than shifted straight from the input.
struct Slot<V> {
    token: Token<V>,
    reduced: bool,
}

/// Owns parse rules and a precedence table.
#[derive(Debug)]
pub struct Parser<V> {
    rules: Vec<ParseRule<V>>,
    precedence: PrecedenceTable,
}

impl<V: Debug> Parser<V> {
    pub fn new(rules: Vec<ParseRule<V>>, precedence: PrecedenceTable) -> Self {
        Self { rules, precedence }
    }

    pub fn rules(&self) -> &[ParseRule<V>] {
        &self.rules
    }

    pub fn precedence(&self) -> &PrecedenceTable {
        &self.precedence
    }

    /// Reduces `tokens` to the final stack.
    pub fn parse<I>(&self, tokens: I) -> Result<Vec<Token<V>>, ParseError<V>>
    where
        I: IntoIterator<Item = Token<V>>,
    {
        parse(&self.rules, &self.precedence, tokens)
    }

    /// Like [`Parser::parse`], also returning the run's counters.
    pub fn parse_with_stats<I>(
        &self,
        tokens: I,
    ) -> Result<(Vec<Token<V>>, ParserStats), ParseError<V>>
    where
        I: IntoIterator<Item = Token<V>>,
    {
        run(&self.rules, &self.precedence, tokens.into_iter().map(Ok))
    }

    /// Parses a fallible token stream, pulling one token at a time.
    ///
    /// This lets the parser consume [`Tokens`](crate::Tokens) directly; a
    /// lexing failure stops the parse and is returned as [`Error::Lex`].
    pub fn parse_stream<I, E>(&self, tokens: I) -> Result<Vec<Token<V>>, Error<V>>
    where
        I: IntoIterator<Item = Result<Token<V>, E>>,
        E: Into<Error<V>>,
    {
        let tokens = tokens.into_iter().map(|r| r.map_err(Into::into));
        run(&self.rules, &self.precedence, tokens).map(|(stack, _)| stack)
    }
}

/// Reduces `tokens` with `rules`, resolving operator conflicts with `precedence`.
pub fn parse<V, I>(
    rules: &[ParseRule<V>],
    precedence: &PrecedenceTable,
    tokens: I,
) -> Result<Vec<Token<V>>, ParseError<V>>
where
    V: Debug,
    I: IntoIterator<Item = Token<V>>,
{
    run(rules, precedence, tokens.into_iter().map(Ok)).map(|(stack, _)| stack)
}

fn run<V, I, E>(
    rules: &[ParseRule<V>],
    precedence: &PrecedenceTable,
    mut tokens: I,
) -> Result<(Vec<Token<V>>, ParserStats), E>
where
    V: Debug,
    I: Iterator<Item = Result<Token<V>, E>>,
    E: From<ParseError<V>>,
{
    let mut stack: Vec<Slot<V>> = Vec::new();
    let mut stats = ParserStats::default();
    let mut lookahead = tokens.next().transpose()?;

    loop {
        if log::log_enabled!(log::Level::Trace) {
            dump_state(&stack, lookahead.as_ref());
        }

        if let Some(index) = select_rule(rules, precedence, &stack, lookahead.as_ref(), &mut stats)
        {
            log::trace!("Reduce {}: {:?}", index, rules[index]);
            reduce(&rules[index], &mut stack);
            stats.reductions += 1;
            continue;
        }

        match lookahead.take() {
            Some(token) => {
                log::trace!("Shift {}", token);
                stack.push(Slot {
                    token,
                    reduced: false,
                });
                stats.shifts += 1;
                lookahead = tokens.next().transpose()?;
            }
            None => {
                let done = match stack.as_slice() {
                    [] => true,
                    [only] => only.reduced,
                    _ => false,
                };
                let stack: Vec<Token<V>> = stack.into_iter().map(|slot| slot.token).collect();
                if done {
                    log::debug!("parse finished: {:?}", stats);
                    return Ok((stack, stats));
                }
                log::debug!("parse stuck: {}", display_tokens(&stack));
                return Err(ParseError { stack }.into());
            }
        }
    }
}

/// Picks the first matching rule that does not defer to the lookahead.
fn select_rule<V: Debug>(
    rules: &[ParseRule<V>],
    precedence: &PrecedenceTable,
    stack: &[Slot<V>],
    lookahead: Option<&Token<V>>,
    stats: &mut ParserStats,
) -> Option<usize> {
    for (index, rule) in rules.iter().enumerate() {
        if !rule.matches(stack) {
            continue;
        }
        if let (Some(op), Some(next)) = (rule.operator(), lookahead) {
            if precedence.defers(op, next.token_type()) {
                log::trace!("Defer {:?} to lookahead {}", op, next);
                stats.deferrals += 1;
                continue;
            }
        }
        return Some(index);
    }
    None
}

fn reduce<V>(rule: &ParseRule<V>, stack: &mut Vec<Slot<V>>) {
    let at = stack.len() - rule.inputs.len();
    let matched: Vec<Token<V>> = stack.drain(at..).map(|slot| slot.token).collect();
    let span = matched.iter().fold(None, |acc, t| merge_spans(acc, t.span));
    let mut token = (rule.handler)(matched);
    if token.span.is_none() {
        token.span = span;
    }
    stack.push(Slot {
        token,
        reduced: true,
    });
}

fn dump_state<V: Debug>(stack: &[Slot<V>], incoming: Option<&Token<V>>) {
    let mut output = std::string::String::new();
    for slot in stack {
        output.push_str(&format!("{}  ", slot.token));
    }
    match incoming {
        Some(token) => output.push_str(&format!("<-  {}", token)),
        None => output.push_str("<-  <end>"),
    }
    log::trace!("{}", output);
}
