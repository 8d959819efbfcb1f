use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tally_finance::{CategoryAssigner, HfZeroShot};

mod config;
mod extract;
mod pipeline;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Credit-card statement parser and monthly transaction log")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a statement and merge its transactions into the log
    Import {
        /// Statement to process (.pdf via pdftotext, anything else as text)
        statement: PathBuf,

        /// Transaction log CSV (default: from config)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Statement year; rows only carry month + day (default: from config)
        #[arg(long)]
        year: Option<i32>,

        /// Categorize transactions even if the config leaves it off
        #[arg(long)]
        categorize: bool,

        /// Categorize with keyword rules only, skipping the zero-shot
        /// fallback (implies --categorize)
        #[arg(long)]
        rules_only: bool,
    },

    /// Print per-month totals for the existing log
    Summary {
        /// Transaction log CSV (default: from config)
        #[arg(long)]
        log: Option<PathBuf>,
    },

    /// Config file management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default ~/.tally/config.toml
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;

    match cli.command {
        Command::Import {
            statement,
            log,
            year,
            categorize,
            rules_only,
        } => {
            let log = log.unwrap_or_else(|| PathBuf::from(&cfg.import.log_file));
            let year = year.unwrap_or(cfg.import.year);
            let categorize = categorization_requested(categorize, rules_only, cfg.import.categorize);

            // One classifier handle per run, injected into the assigner.
            let classifier = (categorize && !rules_only).then(|| {
                let token = cfg
                    .classifier
                    .api_token
                    .clone()
                    .or_else(|| std::env::var("HF_API_TOKEN").ok());
                HfZeroShot::new(&cfg.classifier.endpoint, &cfg.classifier.model, token)
            });

            let assigner = if let Some(classifier) = &classifier {
                Some(CategoryAssigner::with_classifier(
                    classifier,
                    cfg.classifier.confidence_threshold,
                ))
            } else if categorize {
                Some(CategoryAssigner::rules_only())
            } else {
                None
            };

            pipeline::run_import(
                &statement,
                &log,
                year,
                &cfg.import.skip_markers,
                assigner.as_ref(),
            )?;
        }

        Command::Summary { log } => {
            let log = log.unwrap_or_else(|| PathBuf::from(&cfg.import.log_file));
            pipeline::run_summary(&log)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
        },
    }

    Ok(())
}

/// Whether the categorization stage runs. --rules-only implies it: asking
/// for rules-only categorization is still asking for categorization.
fn categorization_requested(categorize_flag: bool, rules_only: bool, config_default: bool) -> bool {
    categorize_flag || rules_only || config_default
}
