use generational_arena::{Arena, Index};
use std::{fmt, ops};
use tracing::instrument;

/// Terminator that marks a node's content as a yes/no question.
pub const QUESTION_MARK: char = '?';

/// Whether `content` is an answer. Questions end with `?`, everything else
/// (including the empty string) is an answer.
pub fn is_answer_text(content: &str) -> bool {
    !content.ends_with(QUESTION_MARK)
}

/// Branch of a question node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Yes,
    No,
}

/// Tree node holding a question or an answer.
#[derive(Debug, Clone)]
pub struct GameNode {
    /// Question text (ends with `?`) or answer text
    pub content: String,
    /// Child followed on "yes", None for answers
    pub yes: Option<Index>,
    /// Child followed on "no", None for answers
    pub no: Option<Index>,
}

impl GameNode {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            yes: None,
            no: None,
        }
    }

    pub fn is_answer(&self) -> bool {
        is_answer_text(&self.content)
    }

    pub fn child(&self, branch: Branch) -> Option<Index> {
        match branch {
            Branch::Yes => self.yes,
            Branch::No => self.no,
        }
    }

    pub fn set_child(&mut self, branch: Branch, idx: Index) {
        match branch {
            Branch::Yes => self.yes = Some(idx),
            Branch::No => self.no = Some(idx),
        }
    }
}

impl fmt::Display for GameNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content)
    }
}

/// Arena-backed binary tree of questions and answers.
///
/// Nodes are never removed, so every `Index` handed out stays valid for the
/// lifetime of the arena. Parents own their children through these handles.
#[derive(Debug, Clone)]
pub struct GameArena {
    arena: Arena<GameNode>,
    root: Option<Index>,
}

impl Default for GameArena {
    fn default() -> Self {
        Self::new()
    }
}

impl GameArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Insert a node. With `parent` None the node becomes the root, otherwise it
    /// is attached to the given branch of the parent.
    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, node: GameNode, parent: Option<(Index, Branch)>) -> Index {
        let idx = self.arena.insert(node);
        match parent {
            Some((parent_idx, branch)) => {
                if let Some(parent) = self.arena.get_mut(parent_idx) {
                    parent.set_child(branch, idx);
                }
            }
            None => self.root = Some(idx),
        }
        idx
    }

    pub fn get(&self, idx: Index) -> Option<&GameNode> {
        self.arena.get(idx)
    }

    pub fn get_mut(&mut self, idx: Index) -> Option<&mut GameNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Number of levels from the root to the deepest answer, 0 for empty trees.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(Index, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((idx, level)) = stack.pop() {
            let Some(node) = self.get(idx) else {
                continue;
            };
            deepest = deepest.max(level);
            for child in [node.yes, node.no].into_iter().flatten() {
                stack.push((child, level + 1));
            }
        }
        deepest
    }

    /// Answer contents in pre-order.
    pub fn answers(&self) -> Vec<String> {
        self.iter()
            .filter(|node| node.is_answer())
            .map(|node| node.content.clone())
            .collect()
    }

    /// Question contents in pre-order.
    pub fn questions(&self) -> Vec<String> {
        self.iter()
            .filter(|node| !node.is_answer())
            .map(|node| node.content.clone())
            .collect()
    }

    /// Pre-order traversal: self, yes-subtree, no-subtree.
    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self)
    }

    /// Reversed pre-order traversal: no-subtree, self, yes-subtree.
    ///
    /// Yields the indent level of each node. A yes-child sits one level deeper
    /// than its parent, a no-child stays on the parent's level.
    pub fn iter_outline(&self) -> OutlineIterator<'_> {
        OutlineIterator::new(self)
    }
}

impl ops::Index<Index> for GameArena {
    type Output = GameNode;

    fn index(&self, idx: Index) -> &GameNode {
        &self.arena[idx]
    }
}

impl ops::IndexMut<Index> for GameArena {
    fn index_mut(&mut self, idx: Index) -> &mut GameNode {
        &mut self.arena[idx]
    }
}

pub struct PreOrderIterator<'a> {
    arena: &'a GameArena,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(arena: &'a GameArena) -> Self {
        Self {
            arena,
            stack: arena.root().into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = &'a GameNode;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = self.arena.get(idx)?;
        // No pushed first so that yes is visited first
        self.stack.extend(node.no);
        self.stack.extend(node.yes);
        Some(node)
    }
}

pub struct OutlineIterator<'a> {
    arena: &'a GameArena,
    // (node, depth, children already scheduled)
    stack: Vec<(Index, usize, bool)>,
}

impl<'a> OutlineIterator<'a> {
    fn new(arena: &'a GameArena) -> Self {
        Self {
            arena,
            stack: arena.root().map(|root| (root, 0, false)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for OutlineIterator<'a> {
    type Item = (usize, &'a GameNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((idx, depth, expanded)) = self.stack.pop() {
            let Some(node) = self.arena.get(idx) else {
                continue;
            };
            if expanded {
                return Some((depth, node));
            }
            if let Some(yes) = node.yes {
                self.stack.push((yes, depth + 1, false));
            }
            self.stack.push((idx, depth, true));
            if let Some(no) = node.no {
                self.stack.push((no, depth, false));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //        Feathers?
    //        /      \
    //   chicken    horse
    fn feathers() -> GameArena {
        let mut arena = GameArena::new();
        let root = arena.insert(GameNode::new("Feathers?"), None);
        arena.insert(GameNode::new("chicken"), Some((root, Branch::Yes)));
        arena.insert(GameNode::new("horse"), Some((root, Branch::No)));
        arena
    }

    #[test]
    fn test_is_answer_text() {
        assert!(is_answer_text("horse"));
        assert!(is_answer_text(""));
        assert!(is_answer_text("Is it? no"));
        assert!(!is_answer_text("Feathers?"));
    }

    #[test]
    fn test_preorder_visits_yes_before_no() {
        let arena = feathers();
        let order: Vec<_> = arena.iter().map(|n| n.content.as_str()).collect();
        assert_eq!(order, vec!["Feathers?", "chicken", "horse"]);
    }

    #[test]
    fn test_outline_visits_no_then_self_then_yes() {
        let arena = feathers();
        let order: Vec<_> = arena
            .iter_outline()
            .map(|(d, n)| (d, n.content.as_str()))
            .collect();
        assert_eq!(order, vec![(0, "horse"), (0, "Feathers?"), (1, "chicken")]);
    }

    #[test]
    fn test_counts_and_depth() {
        let arena = feathers();
        assert_eq!(arena.node_count(), 3);
        assert_eq!(arena.depth(), 2);
        assert_eq!(arena.answers(), vec!["chicken", "horse"]);
        assert_eq!(arena.questions(), vec!["Feathers?"]);
    }

    #[test]
    fn test_empty_arena() {
        let arena = GameArena::new();
        assert_eq!(arena.depth(), 0);
        assert_eq!(arena.iter().count(), 0);
        assert!(arena.root().is_none());
    }
}
