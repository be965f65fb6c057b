//! formgrade CLI: score, store, and inspect form responses.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "formgrade", version, about = "Score form responses")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score answers against a form file without storing anything
    Score {
        /// Path to the form JSON
        #[arg(long)]
        form: PathBuf,

        /// Path to the answers JSON (an array of answer objects)
        #[arg(long)]
        answers: PathBuf,

        /// Show the per-question breakdown
        #[arg(long)]
        explain: bool,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Score a submission against a stored form and save the response
    Submit {
        /// Stored form identifier
        #[arg(long)]
        form_id: String,

        /// Path to the answers JSON
        #[arg(long)]
        answers: PathBuf,

        /// Respondent user id (omit for anonymous)
        #[arg(long)]
        user: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List stored responses for a form
    Responses {
        /// Stored form identifier
        #[arg(long)]
        form_id: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Publish (or unpublish) a stored form
    Publish {
        /// Stored form identifier
        #[arg(long)]
        form_id: String,

        /// Withdraw the form instead of publishing it
        #[arg(long)]
        unpublish: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate form JSON files
    Validate {
        /// Path to a form file or directory
        #[arg(long)]
        form: PathBuf,
    },

    /// Create starter config, example form, and example answers
    Init,
}

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("formgrade=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            form,
            answers,
            explain,
            format,
        } => commands::score::execute(form, answers, explain, format),
        Commands::Submit {
            form_id,
            answers,
            user,
            format,
            config,
        } => commands::submit::execute(form_id, answers, user, format, config).await,
        Commands::Responses {
            form_id,
            format,
            config,
        } => commands::responses::execute(form_id, format, config).await,
        Commands::Publish {
            form_id,
            unpublish,
            config,
        } => commands::publish::execute(form_id, !unpublish, config).await,
        Commands::Validate { form } => commands::validate::execute(form),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
