//! Operator precedence and associativity.
//!
//! A [`PrecedenceTable`] is an ordered list of [`OpPrecedence`] groups. The
//! position of a group is its rank: the first group binds weakest and every
//! later group binds tighter. Operators in the same group share a rank and
//! an [`Assoc`].
//!
//! The parser consults the table whenever an operator rule could reduce
//! while a lookahead token is pending (see [`PrecedenceTable::defers`]).
//!
//! # Example
//! ```rust
//! # use parsetoy::{Assoc, OpPrecedence, PrecedenceTable};
//! let table = PrecedenceTable::new(vec![
//!     OpPrecedence::left(["add", "subtract"]),
//!     OpPrecedence::left(["multiply", "divide"]),
//!     OpPrecedence::right(["pow"]),
//! ]);
//! assert_eq!(table.rank_of("divide").map(|r| r.rank), Some(1));
//! assert!(table.defers("add", "multiply"));
//! assert!(table.defers("pow", "pow"));
//! assert!(!table.defers("add", "add"));
//! ```

use indexmap::{IndexMap, IndexSet, map::Entry};
use smartstring::alias::String;
use std::fmt;
use std::str::FromStr;

/// Operator associativity classification.
///
/// | Variant | Description |
/// |----------|--------------|
/// | [`Assoc::Left`]  | Left-associative: equal ranks reduce eagerly. |
/// | [`Assoc::Right`] | Right-associative: equal ranks shift first. |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Assoc {
    /// Left-associative operator.
    Left = 0,
    /// Right-associative operator.
    Right = 1,
}

impl Assoc {
    /// Canonical string representations for each variant.
    pub const STRS: &[&str] = &["left", "right"];
}

impl From<Assoc> for String {
    fn from(a: Assoc) -> Self {
        Assoc::STRS[Into::<usize>::into(a)].into()
    }
}

impl From<Assoc> for usize {
    fn from(a: Assoc) -> Self {
        a as usize
    }
}

impl fmt::Display for Assoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(String::from(*self).as_str())
    }
}

/// Error type returned when parsing an [`Assoc`] from a string fails.
#[derive(Debug, Clone)]
pub struct ParseAssocError(String);

impl fmt::Display for ParseAssocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid associativity: {}", self.0)
    }
}

impl std::error::Error for ParseAssocError {}

impl FromStr for Assoc {
    type Err = ParseAssocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Assoc::Left),
            "right" => Ok(Assoc::Right),
            other => Err(ParseAssocError(String::from(other))),
        }
    }
}

impl TryFrom<&str> for Assoc {
    type Error = ParseAssocError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One associativity group: a set of operators sharing a rank.
#[derive(Debug, Clone)]
pub struct OpPrecedence {
    pub assoc: Assoc,
    pub operators: IndexSet<String>,
}

impl OpPrecedence {
    pub fn new<I, S>(assoc: Assoc, operators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            assoc,
            operators: operators
                .into_iter()
                .map(|op| String::from(op.as_ref()))
                .collect(),
        }
    }

    /// A left-associative group.
    pub fn left<I, S>(operators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Assoc::Left, operators)
    }

    /// A right-associative group.
    pub fn right<I, S>(operators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Assoc::Right, operators)
    }

    pub fn contains(&self, operator: &str) -> bool {
        self.operators.contains(operator)
    }
}

/// The resolved rank and associativity of one operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    /// Index of the group in the table; higher binds tighter.
    pub rank: usize,
    pub assoc: Assoc,
}

/// Ordered operator groups with a lookup index by operator name.
///
/// An operator listed in several groups resolves to the first one.
#[derive(Debug, Clone, Default)]
pub struct PrecedenceTable {
    groups: Vec<OpPrecedence>,
    index: IndexMap<String, Rank>,
}

impl PrecedenceTable {
    pub fn new(groups: Vec<OpPrecedence>) -> Self {
        let mut index = IndexMap::new();
        for (rank, group) in groups.iter().enumerate() {
            for op in &group.operators {
                match index.entry(op.clone()) {
                    Entry::Occupied(o) => {
                        log::debug!(
                            "operator {:?} already ranked {:?}; ignoring group {}",
                            op,
                            o.get(),
                            rank
                        );
                    }
                    Entry::Vacant(v) => {
                        v.insert(Rank {
                            rank,
                            assoc: group.assoc,
                        });
                    }
                }
            }
        }
        Self { groups, index }
    }

    pub fn groups(&self) -> &[OpPrecedence] {
        &self.groups
    }

    /// Number of distinct operators ranked by this table.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the rank of the first group containing `operator`, or `None`
    /// when the operator takes no part in precedence decisions.
    pub fn rank_of(&self, operator: &str) -> Option<Rank> {
        self.index.get(operator).copied()
    }

    /// Should a reduction by `stack_op` wait until `lookahead` is shifted?
    ///
    /// True only when both operators are ranked and the lookahead binds
    /// tighter, or binds equally and `stack_op` is right-associative.
    pub fn defers(&self, stack_op: &str, lookahead: &str) -> bool {
        match (self.rank_of(stack_op), self.rank_of(lookahead)) {
            (Some(current), Some(next)) => {
                next.rank > current.rank
                    || (next.rank == current.rank && current.assoc == Assoc::Right)
            }
            _ => false,
        }
    }
}

impl FromIterator<OpPrecedence> for PrecedenceTable {
    fn from_iter<T: IntoIterator<Item = OpPrecedence>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
