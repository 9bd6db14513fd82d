use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{CommandFactory, Parser, Subcommand};
use theme_cli::error::ErrorContext;
use theme_cli::{CliError, CliResult, ConfigManager, ExitCode, ThemeOrchestrator, terminal};

const AFTER_HELP: &str = "\
Examples:
  theme-cli dev
  theme-cli push
  theme-cli list

Requirements:
  - shopify.theme.toml in current directory
  - Shopify CLI installed (shopify theme commands)";

#[derive(Parser)]
#[command(name = "theme-cli")]
#[command(about = "Shopify Theme CLI - Safe Development Workflow", long_about = None)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Start development server (syncs content first)
    Dev,

    /// Push theme to store (with safety checks)
    Push,

    /// List all themes in store
    List,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    terminal::configure_colors(true);

    let code = match Cli::try_parse() {
        Ok(Cli {
            command: Some(command),
        }) => report(run(command).await),
        Ok(Cli { command: None }) => {
            print_help();
            ExitCode::Success
        }
        Err(error) => handle_parse_error(error),
    };

    std::process::exit(code as i32);
}

async fn run(command: Commands) -> CliResult<()> {
    log::debug!("Running command: {command:?}");

    let manager = ConfigManager::new();
    log::debug!("Settings file: {}", manager.get_config_path().display());
    let config = manager.load()?;
    terminal::configure_colors(config.color_enabled);

    let project_dir = std::env::current_dir().map_err(|e| {
        CliError::general("Failed to determine the current directory").with_source(Box::new(e))
    })?;

    let orchestrator = ThemeOrchestrator::new(&config, project_dir);
    match command {
        Commands::Dev => orchestrator.dev().await.map(drop),
        Commands::Push => orchestrator.push().await.map(drop),
        Commands::List => orchestrator.list().await.map(drop),
    }
}

/// Print a failure and pick the exit code
fn report(result: CliResult<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::Success,
        Err(error) => {
            let debug = log::log_enabled!(log::Level::Debug);
            eprintln!();
            eprint!("{}", error.format_for_user(debug));
            error.exit_code()
        }
    }
}

fn handle_parse_error(error: clap::Error) -> ExitCode {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let _ = error.print();
            ExitCode::Success
        }
        ErrorKind::InvalidSubcommand => {
            let command = match error.get(ContextKind::InvalidSubcommand) {
                Some(ContextValue::String(command)) => command.clone(),
                _ => String::new(),
            };
            eprintln!();
            eprint!("{}", CliError::unknown_command(&command).format_for_user(false));
            print_help();
            ExitCode::Failure
        }
        _ => {
            let _ = error.print();
            ExitCode::Failure
        }
    }
}

fn print_help() {
    println!();
    let _ = Cli::command().print_help();
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["theme-cli", "push"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Push)));

        let cli = Cli::try_parse_from(["theme-cli"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_unknown_command_kind() {
        let error = Cli::try_parse_from(["theme-cli", "deploy"])
            .err()
            .unwrap();
        assert_eq!(error.kind(), ErrorKind::InvalidSubcommand);
        assert!(matches!(
            error.get(ContextKind::InvalidSubcommand),
            Some(ContextValue::String(command)) if command == "deploy"
        ));
    }

    #[test]
    fn test_no_version_flag() {
        assert!(Cli::try_parse_from(["theme-cli", "--version"]).is_err());
    }
}
