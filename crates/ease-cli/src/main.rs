use anyhow::Context;
use clap::{Parser, Subcommand};
use ease_core::EaseConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "ease", version, about = "Ease action-call engine CLI")]
struct Cli {
    /// Path to an ease.yaml configuration file (defaults apply when omitted)
    #[arg(long, global = true, env = "EASE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect the action catalog
    Actions {
        #[command(subcommand)]
        cmd: ActionsCommand,
    },

    /// Print the calls found in a reply, then the cleaned prose
    Extract {
        /// Reply file, or "-" for stdin
        input: String,
    },

    /// Run a reply through the engine and print what the user would see
    Run {
        /// Reply file, or "-" for stdin
        input: String,

        /// Id of the acting user
        #[arg(long, default_value = "local")]
        user: String,

        /// Directory for the JSON-lines record files
        #[arg(long = "data-dir", default_value = ".ease")]
        data_dir: PathBuf,

        /// Print the full result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the capability block for the model's system prompt
    Prompt,
}

#[derive(Subcommand, Debug)]
enum ActionsCommand {
    /// List actions in registration order
    List {
        /// Print tool definitions as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Describe one action by name
    Describe { action_name: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.observability.log_level);

    match cli.cmd {
        Command::Actions { cmd } => match cmd {
            ActionsCommand::List { json } => commands::actions::list(&config, json),
            ActionsCommand::Describe { action_name } => {
                commands::actions::describe(&config, &action_name)
            }
        },
        Command::Extract { input } => commands::extract::run(&config, &input),
        Command::Run {
            input,
            user,
            data_dir,
            json,
        } => commands::run::run(&config, &input, &user, &data_dir, json).await,
        Command::Prompt => commands::actions::prompt(&config),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EaseConfig> {
    match path {
        Some(path) => EaseConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {:?}", path)),
        None => Ok(EaseConfig::default()),
    }
}

/// `RUST_LOG` wins over the configured level. Logs go to stderr so command
/// output stays pipeable.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
