//! CLI argument definitions.

use clap::Parser;

/// Forcescan - scan sources for market forces shaping an industry.
#[derive(Debug, Parser)]
#[command(name = "forcescan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Industry to research
    #[arg(short, long, default_value = "Banking")]
    pub industry: String,

    /// Geographic or market scope
    #[arg(short, long)]
    pub market: Option<String>,

    /// Time horizon for the analysis
    #[arg(long)]
    pub horizon: Option<String>,

    /// Keywords to scan for (repeatable); defaults to the built-in set
    #[arg(short, long)]
    pub keyword: Vec<String>,

    /// Web source URL to scan (repeatable); defaults to the built-in
    /// catalogue
    #[arg(short, long)]
    pub source: Vec<String>,

    /// Local document path to scan (repeatable)
    #[arg(short, long)]
    pub document: Vec<String>,

    /// User-uploaded file to include (repeatable)
    #[arg(short, long)]
    pub upload: Vec<String>,

    /// Configuration file path (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory the report files are written to
    #[arg(short, long, default_value = "output")]
    pub output_dir: String,

    /// Approve both checkpoints without prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Skip the preliminary-findings review (plan review still runs)
    #[arg(long)]
    pub no_force_review: bool,

    /// Oracle API endpoint
    #[arg(long, env = "FORCESCAN_ORACLE_ENDPOINT")]
    pub oracle_endpoint: Option<String>,

    /// Oracle model name
    #[arg(long, env = "FORCESCAN_ORACLE_MODEL")]
    pub oracle_model: Option<String>,
}
