use std::path::PathBuf;

use clap::Parser;

/// Step-by-step onboarding wizard in the terminal.
#[derive(Parser, Debug, Default)]
#[command(name = "wizard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// RON config file; missing fields keep their defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Content root: a base URL or a directory holding content/versions.json
    #[arg(long)]
    pub content: Option<String>,

    /// Page URL the wizard was opened with, e.g. "https://host/wizard?v=v2"
    #[arg(long)]
    pub url: Option<String>,

    /// Behaviour preset: basic, high-water-mark, chat-archive or note-capture
    #[arg(long)]
    pub variant: Option<String>,

    /// Feedback collector endpoint
    #[arg(long)]
    pub submit_endpoint: Option<String>,

    /// Log destination: file, terminal or both
    #[arg(long)]
    pub log: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}
