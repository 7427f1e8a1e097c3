/*!
 * Configuration handling for digestfs
 */

use clap::{Parser, ValueEnum};
use clap_complete::Shell;

use crate::serialize::DownloadFormat;

/// Default per-file size cap: 10 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// How user-supplied glob patterns are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PatternMode {
    /// User globs define the only included files
    Include,
    /// User globs subtract from an include-everything baseline
    Exclude,
}

/// Command-line arguments for digestfs
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "digestfs",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate a single text digest of a directory tree for LLM context",
    long_about = "Walks a directory, filters entries through layered glob rules and size \
limits, and produces one text artifact: a tree listing plus concatenated file contents, \
suitable for pasting into a language-model prompt."
)]
pub struct Args {
    /// Directory to ingest
    #[clap(default_value = ".")]
    pub root: String,

    /// Write the digest to this file instead of stdout
    #[clap(short, long)]
    pub output: Option<String>,

    /// Output format
    #[clap(long, value_enum, default_value_t = DownloadFormat::Txt)]
    pub format: DownloadFormat,

    /// Whether patterns include or exclude files
    #[clap(long, value_enum, default_value_t = PatternMode::Exclude)]
    pub pattern_mode: PatternMode,

    /// Comma-separated list of glob patterns
    #[clap(long, value_delimiter = ',')]
    pub patterns: Vec<String>,

    /// Maximum file size in bytes to include content for
    #[clap(long, default_value_t = DEFAULT_MAX_FILE_SIZE)]
    pub max_file_size: u64,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Immutable per-invocation engine configuration
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Per-file content size cap in bytes
    pub max_file_size_bytes: u64,
    /// How user patterns are interpreted
    pub pattern_mode: PatternMode,
    /// User-supplied glob patterns
    pub patterns: Vec<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE,
            pattern_mode: PatternMode::Exclude,
            patterns: Vec::new(),
        }
    }
}

impl IngestConfig {
    /// Create engine configuration from command-line arguments
    pub fn from_args(args: &Args) -> Self {
        Self {
            max_file_size_bytes: args.max_file_size,
            pattern_mode: args.pattern_mode,
            patterns: args.patterns.clone(),
        }
    }
}
