use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "scribe")]
#[command(about = "Scribe - turn workshop photos into a report and an audio overview", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse photos, write the report and optionally the audio overview
    Run {
        /// Photos of the workshop (non-image files are skipped)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Session title
        #[arg(long)]
        title: Option<String>,

        /// Report destination; a directory gets the default file name
        #[arg(long)]
        report_out: Option<PathBuf>,

        /// Write the audio overview as a WAV file
        #[arg(long)]
        audio_out: Option<PathBuf>,
    },
    /// Show the configured model for each pipeline stage
    Models,
}

#[tokio::main]
async fn main() -> Result<()> {
    scribe_execution::logging::init(None)?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            files,
            title,
            report_out,
            audio_out,
        } => {
            commands::run::execute(commands::run::RunArgs {
                files,
                title,
                report_out,
                audio_out,
            })
            .await?
        }
        Commands::Models => commands::models::show(),
    }

    Ok(())
}
