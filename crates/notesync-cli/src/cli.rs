use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use notesync_merge::SelectionFrom;

#[derive(Parser)]
#[command(name = "notesync", about = "Diff and three-way merge of note snapshots", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Side {
    Primary,
    Secondary,
}

impl From<Side> for SelectionFrom {
    fn from(side: Side) -> Self {
        match side {
            Side::Primary => SelectionFrom::Primary,
            Side::Secondary => SelectionFrom::Secondary,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the sorted diffs that turn one snapshot into another
    Diff(DiffArgs),
    /// Merge two snapshots that descend from a common base
    Merge(MergeArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// Base snapshot (JSON)
    pub base: PathBuf,
    /// Target snapshot (JSON)
    pub target: PathBuf,
}

#[derive(Args)]
pub struct MergeArgs {
    /// Common ancestor snapshot (JSON)
    pub base: PathBuf,
    /// Primary snapshot (JSON)
    pub primary: PathBuf,
    /// Secondary snapshot (JSON)
    pub secondary: PathBuf,
    /// Side that keeps its selection and wins collisions; overrides the config file
    #[arg(long)]
    pub selection_from: Option<Side>,
    /// TOML merge configuration
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Write the merged snapshot here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
