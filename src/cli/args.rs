//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::Choice;

/// Twenty questions decision tree: replay games, learn from misses, inspect the tree
#[derive(Parser, Debug)]
#[command(name = "twentyq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more detail (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Game file (default: game_file from config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the whole tree
    Show {
        /// Output layout
        #[arg(long, value_enum, default_value_t = ShowFormat::Outline)]
        format: ShowFormat,
    },

    /// Replay yes/no replies from the root and print where they lead
    Ask {
        /// Replies in order (yes/y/no/n)
        choices: Vec<Choice>,
    },

    /// Replace a wrongly guessed answer with a new question and save
    Learn {
        /// New question (must end with '?')
        #[arg(short, long)]
        question: String,
        /// Answer for "yes" to the new question
        #[arg(short, long)]
        answer: String,
        /// Replies leading to the wrong answer (yes/y/no/n), none if the root is the answer
        choices: Vec<Choice>,
    },

    /// Print the tree in its persisted form
    Dump,

    /// Show tree size
    Stats,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Layouts for `show`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShowFormat {
    /// No-branch first, indented with "- " per level
    Outline,
    /// Box-drawing tree with yes/no labels
    Tree,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show config file locations
    Path,
}
