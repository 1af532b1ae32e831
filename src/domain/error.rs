//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the game tree's structure or contract.
/// These are independent of where the lines came from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("game source contains no lines")]
    EmptySource,

    #[error("game source ends early: question on line {line} is missing a branch")]
    Truncated { line: usize },

    #[error("cursor is on an answer, there is nothing left to choose")]
    AtAnswer,

    #[error("cursor is on a question, only answers can be replaced")]
    NotAtAnswer,

    #[error("not a question (must end with '?'): {0:?}")]
    NotAQuestion(String),

    #[error("not an answer (must not end with '?'): {0:?}")]
    NotAnAnswer(String),

    #[error("content must fit on a single line: {0:?}")]
    MultiLine(String),
}
