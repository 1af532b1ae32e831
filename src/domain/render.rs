use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::GameArena;
use crate::domain::game::GameTree;

/// Conversion of a game tree into a `termtree` for terminal display.
///
/// Children are labelled with the reply that leads to them, yes first.
pub trait TreeRender {
    fn to_term_tree(&self) -> Tree<String>;
}

impl TreeRender for GameArena {
    #[instrument(level = "debug", skip(self))]
    fn to_term_tree(&self) -> Tree<String> {
        let Some(root_idx) = self.root() else {
            return Tree::new("Empty tree".to_string());
        };

        fn build_tree(arena: &GameArena, node_idx: Index, label: String) -> Tree<String> {
            let mut tree = Tree::new(label);
            if let Some(node) = arena.get(node_idx) {
                for (reply, child) in [("yes", node.yes), ("no", node.no)] {
                    if let Some(child_idx) = child {
                        if let Some(child_node) = arena.get(child_idx) {
                            let label = format!("{}: {}", reply, child_node.content);
                            tree.push(build_tree(arena, child_idx, label));
                        }
                    }
                }
            }
            tree
        }

        let root_label = self
            .get(root_idx)
            .map(|node| node.content.clone())
            .unwrap_or_default();
        build_tree(self, root_idx, root_label)
    }
}

impl TreeRender for GameTree {
    fn to_term_tree(&self) -> Tree<String> {
        self.arena().to_term_tree()
    }
}
