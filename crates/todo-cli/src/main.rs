use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_cli::commands::{OutputContext, add, list, toggle};
use todo_cli::config::Config;
use todo_protocol::HttpTransport;
use todo_view::{SyncError, ViewSynchronizer};

/// Command-line interface for the todo list
#[derive(Parser)]
#[command(name = "todo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, env = "TODO_CONFIG")]
    pub config: Option<String>,

    /// Todo server URL
    #[arg(long, env = "TODO_URL")]
    pub url: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output view items as JSON
    #[arg(long, conflicts_with = "html")]
    pub json: bool,

    /// Output rendered markup
    #[arg(long)]
    pub html: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show all tasks
    List,
    /// Add a task
    Add(add::AddArgs),
    /// Flip the done state of a task
    Toggle(toggle::ToggleArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "todo_cli=debug,todo_view=debug,todo_protocol=debug".into())
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let output = OutputContext {
        json: cli.json,
        html: cli.html,
        verbose: cli.verbose,
    };

    match run(cli, &output).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let validation = err
                .downcast_ref::<SyncError>()
                .is_some_and(|e| e.is_validation());
            if validation {
                output.print_error("Please specify a task");
            } else {
                output.print_error(&format!("{:#}", err));
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, output: &OutputContext) -> Result<()> {
    // Load configuration
    let cfg = Config::load(cli.config.as_deref())?;

    let transport = HttpTransport::with_config(cfg.client_config(cli.url.as_deref()))?;
    let mut sync = ViewSynchronizer::new(transport, cfg.sync_options());

    match cli.command {
        Commands::List => list::execute(&mut sync, output).await,
        Commands::Add(args) => add::execute(&mut sync, args, output).await,
        Commands::Toggle(args) => toggle::execute(&mut sync, args, output).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from(["todo", "--json", "add", "buy milk"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Add(args) => assert_eq!(args.text, "buy milk"),
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_json_and_html_conflict() {
        assert!(Cli::try_parse_from(["todo", "--json", "--html", "list"]).is_err());
    }

    #[test]
    fn test_output_context_defaults_to_table() {
        let output = OutputContext::default();
        assert!(!output.json && !output.html);
    }
}
