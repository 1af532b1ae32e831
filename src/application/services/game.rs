//! Game persistence service
//!
//! Loads game trees from files, saves them back and applies what was learned
//! from a missed guess.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{Choice, GameTree};
use crate::infrastructure::traits::FileSystem;

/// Size summary of a game tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStats {
    pub nodes: usize,
    pub questions: usize,
    pub answers: usize,
    pub depth: usize,
}

impl GameStats {
    pub fn of(tree: &GameTree) -> Self {
        let answers = tree.answers().len();
        Self {
            nodes: tree.node_count(),
            questions: tree.node_count() - answers,
            answers,
            depth: tree.depth(),
        }
    }
}

/// Service for loading and saving game files.
pub struct GameService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl GameService {
    /// Create a new game service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Load a game tree from a file in the persisted pre-order format.
    ///
    /// A file that cannot be read is reported as `SourceUnavailable`; a file
    /// that does not describe a complete tree is reported as a domain error.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<GameTree> {
        let content = self.fs.read_to_string(path).source_context(path)?;
        let tree = GameTree::from_lines(content.lines())?;
        debug!(
            "load: {} nodes from {}",
            tree.node_count(),
            path.display()
        );
        Ok(tree)
    }

    /// Persisted text of a tree: one node per line in pre-order, newline terminated.
    pub fn serialize(tree: &GameTree) -> String {
        let mut out = String::new();
        for line in tree.persisted_lines() {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Write the tree to `path`, replacing previous content.
    ///
    /// With `atomic_save` the file is swapped in from a temporary sibling so a
    /// failed save leaves the old file intact. Without it the file is
    /// overwritten in place and a failure may leave it truncated.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn save(&self, tree: &GameTree, path: &Path) -> ApplicationResult<()> {
        let content = Self::serialize(tree);
        let written = if self.settings.atomic_save {
            self.fs.write_atomic(path, &content)
        } else {
            self.fs.write(path, &content)
        };
        written.destination_context(path)?;
        debug!("save: {} nodes to {}", tree.node_count(), path.display());
        Ok(())
    }

    /// Start a fresh game and follow `choices` from the root.
    pub fn replay(tree: &mut GameTree, choices: &[Choice]) -> ApplicationResult<()> {
        tree.restart();
        for &choice in choices {
            tree.choose(choice)?;
        }
        Ok(())
    }

    /// Teach the game stored at `path` a new question.
    ///
    /// Follows `choices` to the answer that was guessed wrongly, replaces it
    /// with `question` (yes leads to `answer`, no to the old answer) and saves.
    #[instrument(level = "debug", skip(self))]
    pub fn learn(
        &self,
        path: &Path,
        choices: &[Choice],
        question: &str,
        answer: &str,
    ) -> ApplicationResult<GameTree> {
        let mut tree = self.load(path)?;
        Self::replay(&mut tree, choices)?;
        tree.add(question, answer)?;
        self.save(&tree, path)?;
        tree.restart();
        Ok(tree)
    }
}
