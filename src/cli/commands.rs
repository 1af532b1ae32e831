//! Command dispatch: turns parsed arguments into service calls

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{GameService, GameStats};
use crate::cli::args::{Cli, Commands, ConfigCommands, ShowFormat};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{Choice, TreeRender};
use crate::infrastructure::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let command = cli
        .command
        .as_ref()
        .ok_or_else(|| CliError::Usage("no command given, see --help".to_string()))?;

    // Completions need neither settings nor a game file
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let cwd = std::env::current_dir().ok();
    let settings = Settings::load(cwd.as_deref())?;
    let container = ServiceContainer::new(settings);
    let game_file = cli
        .file
        .clone()
        .unwrap_or_else(|| container.settings.game_file.clone());
    debug!("game file: {}", game_file.display());

    match command {
        Commands::Show { format } => cmd_show(&container, &game_file, *format),
        Commands::Ask { choices } => cmd_ask(&container, &game_file, choices),
        Commands::Learn {
            question,
            answer,
            choices,
        } => cmd_learn(&container, &game_file, choices, question, answer),
        Commands::Dump => cmd_dump(&container, &game_file),
        Commands::Stats => cmd_stats(&container, &game_file),
        Commands::Config { command } => cmd_config(&container, command, cwd.as_deref()),
        Commands::Completion { .. } => Ok(()),
    }
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, game_file: &Path, format: ShowFormat) -> CliResult<()> {
    let tree = container.game_service().load(game_file)?;
    match format {
        ShowFormat::Outline => output::info(&tree.outline()),
        ShowFormat::Tree => println!("{}", tree.to_term_tree()),
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_ask(container: &ServiceContainer, game_file: &Path, choices: &[Choice]) -> CliResult<()> {
    let mut tree = container.game_service().load(game_file)?;
    GameService::replay(&mut tree, choices)?;
    if tree.is_answer() {
        output::action("Answer", tree.current_content());
    } else {
        output::action("Question", tree.current_content());
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_learn(
    container: &ServiceContainer,
    game_file: &Path,
    choices: &[Choice],
    question: &str,
    answer: &str,
) -> CliResult<()> {
    let tree = container
        .game_service()
        .learn(game_file, choices, question, answer)?;
    output::success(&format!(
        "learned {:?} ({} nodes, saved to {})",
        answer.trim(),
        tree.node_count(),
        game_file.display()
    ));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_dump(container: &ServiceContainer, game_file: &Path) -> CliResult<()> {
    let tree = container.game_service().load(game_file)?;
    output::info(&GameService::serialize(&tree));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_stats(container: &ServiceContainer, game_file: &Path) -> CliResult<()> {
    let tree = container.game_service().load(game_file)?;
    let stats = GameStats::of(&tree);
    output::header(&game_file.display());
    output::action("nodes", &stats.nodes);
    output::action("questions", &stats.questions);
    output::action("answers", &stats.answers);
    output::action("depth", &stats.depth);
    Ok(())
}

fn cmd_config(
    container: &ServiceContainer,
    command: &ConfigCommands,
    cwd: Option<&Path>,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(global) => {
                    output::action("global", &global.display());
                    output::detail(&format!("exists: {}", container.fs.exists(&global)));
                }
                None => output::action("global", "(unavailable)"),
            }
            let local = cwd
                .map(local_config_path)
                .unwrap_or_else(|| PathBuf::from(".twentyq.toml"));
            output::action("local", &local.display());
            output::detail(&format!("exists: {}", container.fs.exists(&local)));
        }
    }
    Ok(())
}
