//! Twenty questions decision tree.
//!
//! Questions sit on the inner nodes of a binary tree and answers on its leaves.
//! A game walks the tree by yes/no replies; when the final guess is wrong the
//! answer is replaced by a new question that tells the two answers apart.
//! Trees are persisted as one node per line in pre-order.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
