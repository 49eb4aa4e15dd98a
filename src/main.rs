pub mod app_config;
pub mod cli;
pub mod convert;
pub mod error;
pub mod export;
pub mod input_files;
pub mod matcher;
pub mod timestamp;
pub mod transcriber;
pub mod transcript;
pub mod utils;
pub mod video;

use std::path::PathBuf;
use std::process::ExitCode;

use app_config::{AppConfig, APP_DISPLAY_NAME};
use clap::{Parser, Subcommand};
use cli::{command_list, print_report, run_find, FindRequest};
use convert::command_convert;
use log::{debug, info};
use transcriber::{FileOrAudio, WhisperCommand};

#[derive(Debug, Parser)]
#[command(version = "1.0", about = "στιγμή: timestamped YouTube links for every keyword mention")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find keywords in a video's transcript and export timestamped links
    Find {
        /// YouTube URL, either youtube.com/watch?v=<id> or youtu.be/<id>
        url: String,
        /// Comma separated keywords
        #[arg(short, long)]
        keywords: String,
        /// Audio file or existing transcript (whisper json, YouTube json, srt, sbv)
        #[arg(short, long)]
        source: Option<PathBuf>,
        /// Directory to write the CSV files into
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Transcribe again even if a cached transcript exists
        #[arg(short, long)]
        refresh: bool,
    },

    /// Import an existing transcript file into the cache
    Convert {
        /// Path of the transcript file
        source: PathBuf,
        /// URL of the video the transcript belongs to
        url: String,
    },

    /// List cached transcripts
    List,
}

pub fn parse_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    match cli.command {
        Commands::Find {
            url,
            keywords,
            source,
            output_dir,
            refresh,
        } => {
            if let Some(output_dir) = output_dir {
                config.output_dir = output_dir;
            }
            let transcriber = FileOrAudio {
                fallback: WhisperCommand::new(&config.whisper_command, &config.whisper_model),
            };
            let request = FindRequest {
                url,
                keywords,
                source,
                refresh,
            };
            let report = run_find(&config, &request, &transcriber)?;
            print_report(&report);
        }

        Commands::Convert { source, url } => {
            let video_id = command_convert(&config, &source, &url)?;
            info!("Cached transcript for {video_id}");
        }

        Commands::List => command_list(&config),
    };

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    debug!("{APP_DISPLAY_NAME} starting");

    match parse_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
