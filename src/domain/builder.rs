//! Tree builder for the persisted pre-order line format.

use generational_arena::Index;
use tracing::{debug, warn};

use crate::domain::arena::{Branch, GameArena, GameNode};
use crate::domain::error::DomainError;

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

/// Constructs a game tree from lines in pre-order: a line ending in `?` is a
/// question and is followed by its full yes-subtree, then its full no-subtree.
/// Any other line is an answer.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    // Child slots still waiting for a subtree with the 1-based line of their
    // question; top of stack is filled next
    pending: Vec<(Index, Branch, usize)>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from lines. Each line is trimmed before use; blank lines are
    /// kept as (empty) answers. Lines left over once the tree is complete are
    /// ignored.
    pub fn build<I, S>(&mut self, lines: I) -> TreeResult<GameArena>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.pending.clear();

        let mut arena = GameArena::new();
        let mut lines = lines.into_iter().enumerate();

        for (no, line) in lines.by_ref() {
            let content = line.as_ref().trim();
            let node = GameNode::new(content);
            let is_question = !node.is_answer();

            let parent = if arena.root().is_none() {
                None
            } else {
                // Root exists and the tree is not complete, so a slot is pending
                self.pending.pop().map(|(idx, branch, _)| (idx, branch))
            };
            let idx = arena.insert(node, parent);

            if is_question {
                self.pending.push((idx, Branch::No, no + 1));
                self.pending.push((idx, Branch::Yes, no + 1));
            }

            if self.pending.is_empty() {
                break;
            }
        }

        if arena.root().is_none() {
            return Err(DomainError::EmptySource);
        }

        if let Some(&(_, _, line)) = self.pending.last() {
            return Err(DomainError::Truncated { line });
        }

        let surplus = lines.count();
        if surplus > 0 {
            warn!("ignoring {} line(s) after the end of the game tree", surplus);
        }

        debug!("built game tree with {} nodes", arena.node_count());
        Ok(arena)
    }
}
