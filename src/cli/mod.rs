//! CLI argument definitions.

use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Item bags CLI - inspect, load and store saved item bags.
///
/// Use --json for machine-parseable output.
#[derive(Parser, Debug)]
#[command(name = "bags", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (text for humans, json for scripts)
    #[arg(
        long,
        short = 'f',
        default_value = "text",
        global = true,
        env = "BAGS_FORMAT"
    )]
    pub format: OutputFormat,

    /// Equivalent to --format=json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only log errors)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output (any non-empty NO_COLOR value other than a
    /// falsey one like `0` or `false` also disables it)
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Bag type config file (.yaml, .yml, .toml or .json)
    #[arg(long, global = true, env = "BAGS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Bag store database
    #[arg(long, global = true, env = "BAGS_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// Pretty JSON
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON.
    pub const fn use_json(&self) -> bool {
        self.json || matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Bag types ===
    /// List the bag types defined in the config
    Types,

    // === Save files ===
    /// Show the bags recorded in a save file without decoding them
    Inspect(InspectArgs),

    /// Decode every bag of a save file and report the ones that fail
    Load(LoadArgs),

    // === Bag store ===
    /// Import the bags of a save file into the store
    Import(ImportArgs),

    /// Export every stored bag to a save file
    Export(ExportArgs),

    /// List stored bags
    List,

    /// Remove a stored bag
    Remove(RemoveArgs),

    /// Show version and build information
    Version,
}

#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// Save file (JSON)
    pub save: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct LoadArgs {
    /// Save file (JSON)
    pub save: PathBuf,

    /// Exit with an error if any bag could not be loaded
    #[arg(long)]
    pub strict: bool,
}

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Save file (JSON)
    pub save: PathBuf,

    /// Decode against the bag type config first and skip bags that fail
    #[arg(long)]
    pub skip_invalid: bool,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Destination save file (JSON)
    pub out: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Instance id of the bag to remove
    pub instance_id: i32,
}
