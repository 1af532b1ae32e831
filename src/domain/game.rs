//! Twenty questions game tree with a play cursor.

use std::fmt;
use std::str::FromStr;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::{is_answer_text, Branch, GameArena, GameNode};
use crate::domain::builder::{TreeBuilder, TreeResult};
use crate::domain::error::DomainError;

/// Indent marker used by the outline, repeated once per level.
pub const OUTLINE_INDENT: &str = "- ";

/// A player's reply to a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    Yes,
    No,
}

impl Choice {
    pub fn branch(self) -> Branch {
        match self {
            Choice::Yes => Branch::Yes,
            Choice::No => Branch::No,
        }
    }
}

impl FromStr for Choice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" => Ok(Choice::Yes),
            "no" | "n" => Ok(Choice::No),
            other => Err(format!("expected yes or no, got {other:?}")),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Yes => write!(f, "yes"),
            Choice::No => write!(f, "no"),
        }
    }
}

/// Decision tree of yes/no questions with answers at the leaves.
///
/// The cursor tracks a game in progress. It always points at a live node and
/// can be sent back to the root at any time without touching the tree.
#[derive(Debug, Clone)]
pub struct GameTree {
    arena: GameArena,
    root: Index,
    current: Index,
    path: Vec<Choice>,
}

impl GameTree {
    /// Build a tree from lines in the persisted pre-order format.
    #[instrument(level = "debug", skip(lines))]
    pub fn from_lines<I, S>(lines: I) -> TreeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let arena = TreeBuilder::new().build(lines)?;
        let root = arena.root().ok_or(DomainError::EmptySource)?;
        Ok(Self {
            arena,
            root,
            current: root,
            path: Vec::new(),
        })
    }

    fn node(&self, idx: Index) -> &GameNode {
        // Nodes are never removed, so every index the tree holds is live
        &self.arena[idx]
    }

    /// Text of the node under the cursor.
    pub fn current_content(&self) -> &str {
        &self.node(self.current).content
    }

    /// True if the cursor is on an answer rather than a question.
    pub fn is_answer(&self) -> bool {
        self.node(self.current).is_answer()
    }

    /// Follow the yes or no branch of the current question.
    ///
    /// Choosing on an answer is a caller error: the cursor stays put and
    /// `DomainError::AtAnswer` is returned.
    #[instrument(level = "trace", skip(self))]
    pub fn choose(&mut self, choice: Choice) -> TreeResult<()> {
        let next = self
            .node(self.current)
            .child(choice.branch())
            .ok_or(DomainError::AtAnswer)?;
        self.current = next;
        self.path.push(choice);
        Ok(())
    }

    /// Send the cursor back to the root to begin a new game.
    pub fn restart(&mut self) {
        self.current = self.root;
        self.path.clear();
    }

    /// Choices taken since the last restart.
    pub fn path(&self) -> &[Choice] {
        &self.path
    }

    /// Replace the wrong answer under the cursor with a new question.
    ///
    /// If the current answer is "chicken", `add("Does it swim?", "goose")`
    /// turns the node into "Does it swim?" with "goose" on yes and "chicken"
    /// on no. The cursor stays on the new question.
    ///
    /// Both texts are trimmed. The question must end with `?` and the answer
    /// must not, neither text may span lines and the cursor must be on an
    /// answer; otherwise the tree is left unchanged and an error is returned.
    #[instrument(level = "debug", skip(self))]
    pub fn add(&mut self, question: &str, answer: &str) -> TreeResult<()> {
        let question = question.trim();
        let answer = answer.trim();

        if !self.is_answer() {
            return Err(DomainError::NotAtAnswer);
        }
        for text in [question, answer] {
            if text.contains(|c: char| c == '\n' || c == '\r') {
                return Err(DomainError::MultiLine(text.to_string()));
            }
        }
        if is_answer_text(question) {
            return Err(DomainError::NotAQuestion(question.to_string()));
        }
        if !is_answer_text(answer) {
            return Err(DomainError::NotAnAnswer(answer.to_string()));
        }

        let current = self.current;
        let old_answer = std::mem::replace(
            &mut self.arena[current].content,
            question.to_string(),
        );
        debug!("replacing answer {:?} with question {:?}", old_answer, question);

        self.arena
            .insert(GameNode::new(answer), Some((current, Branch::Yes)));
        self.arena
            .insert(GameNode::new(old_answer), Some((current, Branch::No)));
        Ok(())
    }

    /// Render the tree for a human: no-subtree first, then the node, then the
    /// yes-subtree, one line per node prefixed by its level of `"- "`.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for (depth, node) in self.arena.iter_outline() {
            out.push_str(&OUTLINE_INDENT.repeat(depth));
            out.push_str(&node.content);
            out.push('\n');
        }
        out
    }

    /// Node contents in pre-order, one per line, ready to be persisted and
    /// loaded again with [`GameTree::from_lines`].
    pub fn persisted_lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.arena.iter().map(|node| node.content.as_str())
    }

    pub fn arena(&self) -> &GameArena {
        &self.arena
    }

    pub fn node_count(&self) -> usize {
        self.arena.node_count()
    }

    pub fn depth(&self) -> usize {
        self.arena.depth()
    }

    pub fn answers(&self) -> Vec<String> {
        self.arena.answers()
    }

    pub fn questions(&self) -> Vec<String> {
        self.arena.questions()
    }
}

impl fmt::Display for GameTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.outline())
    }
}
