use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tubescribe",
    about = "Tubescribe - Fetch YouTube transcripts with punctuation restoration",
    version,
    long_about = "A CLI tool for fetching YouTube video and playlist transcripts. Resolves video metadata through the YouTube Data API, pulls caption tracks, restores punctuation with a pretrained model, and saves the cleaned transcripts as JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch transcripts for a video or playlist and save them as JSON
    Fetch {
        /// ID of a single YouTube video
        #[arg(long, value_name = "VIDEO_ID")]
        video: Option<String>,

        /// ID of a YouTube playlist (first 50 items)
        #[arg(long, value_name = "PLAYLIST_ID")]
        playlist: Option<String>,

        /// Output file path (a non-colliding name is chosen if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// YouTube Data API key
        #[arg(long, env = "YOUTUBE_API_KEY", value_name = "KEY")]
        api_key: Option<String>,
    },

    /// Show or set up the configuration file
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },

    /// List the built-in lexical correction table
    Corrections,
}
