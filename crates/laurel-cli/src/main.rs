use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::run::RunArgs;

#[derive(Parser, Debug)]
#[command(
    name = "laurel",
    version,
    about = "Normalize achievement result labels across a portal roster"
)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk the roster, relabel achievements and write the audit report.
    Run {
        /// Roster snapshot (YAML or JSON) served as the portal
        #[arg(long)]
        snapshot: PathBuf,

        /// Configuration file (default: ./laurel.yaml when present)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Credentials file, overrides `credentials_file`
        #[arg(long)]
        credentials: Option<PathBuf>,

        /// First roster page to visit
        #[arg(long)]
        from: Option<u32>,

        /// Last roster page to visit
        #[arg(long, conflicts_with = "all")]
        to: Option<u32>,

        /// Visit every page the roster reports
        #[arg(long, default_value_t = false)]
        all: bool,

        /// Report file, overrides `report.path`
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// JSON Lines file for manual review items, overrides `review.path`
        #[arg(long)]
        review: Option<PathBuf>,

        /// Save the relabeled roster back to the snapshot file
        #[arg(long, default_value_t = false)]
        write_back: bool,
    },

    /// Classify a single achievement and print the decision.
    Classify {
        /// Achievement name
        #[arg(long)]
        name: String,

        /// Displayed result label
        #[arg(long)]
        result: String,

        /// Rules file replacing the built-in rules
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Print the decision as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Validate configuration, credentials and rules without running.
    Check {
        /// Configuration file (default: ./laurel.yaml when present)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Credentials file, overrides `credentials_file`
        #[arg(long)]
        credentials: Option<PathBuf>,
    },

    /// Summarize an audit report.
    Report {
        /// Report file written by `laurel run`
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::Run {
            snapshot,
            config,
            credentials,
            from,
            to,
            all,
            output,
            review,
            write_back,
        } => {
            commands::run::run(RunArgs {
                snapshot,
                config,
                credentials,
                from,
                to,
                all,
                output,
                review,
                write_back,
            })
            .await?
        }

        Command::Classify {
            name,
            result,
            rules,
            json,
        } => commands::classify::run(&name, &result, rules.as_deref(), json)?,

        Command::Check {
            config,
            credentials,
        } => commands::check::run(config.as_deref(), credentials.as_deref())?,

        Command::Report { file } => commands::report::run(&file)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
