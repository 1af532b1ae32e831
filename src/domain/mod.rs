//! Domain layer: the question tree and its play cursor
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod game;
pub mod render;

pub use arena::{is_answer_text, Branch, GameArena, GameNode, QUESTION_MARK};
pub use builder::{TreeBuilder, TreeResult};
pub use error::DomainError;
pub use game::{Choice, GameTree, OUTLINE_INDENT};
pub use render::TreeRender;
