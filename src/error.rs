use thiserror::Error;

use crate::engine::DataType;

/// The primary error type for the `arbor` crate.
///
/// The first error raised on a handle is recorded there and sticks: later
/// calls on the same handle return a copy of it without doing any work.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArborError {
    /// The expression string was empty or contained only whitespace.
    #[error("invalid expression string")]
    InvalidString,
    /// The expression could not be tokenized or assembled into a tree.
    /// `pos` is the byte offset of the offending character.
    #[error("{msg}")]
    Token { msg: &'static str, pos: usize },
    /// `build` was called on a handle that already owns a tree.
    #[error("the expression has already been built")]
    AlreadyBuilt,
    /// An eval entry point was called before any tree was built.
    #[error("no expression has been built")]
    NotBuilt,
    /// The eval entry point does not match the data type the tree was
    /// built with.
    #[error("data type mismatch: the tree was built as {built}, not {requested}")]
    DataType {
        built: DataType,
        requested: DataType,
    },
    /// The value slice does not cover the largest variable index referenced
    /// by the expression.
    #[error("not enough variable values: expected at least {expected}, got {got}")]
    ValuesLen { expected: usize, got: usize },
    /// The distinct-variable set is full.
    #[error("too many variables")]
    TooManyVars,
    /// The evaluator reached a node it cannot interpret. Unreachable on a
    /// well-formed tree.
    #[error("unknown error during evaluation")]
    Eval,
}
