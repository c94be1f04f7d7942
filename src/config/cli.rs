use crate::core::star::STAR_GUIDE;
use crate::domain::model::TargetDomain;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "sofia")]
#[command(about = "Sofia, your career companion: rewrite CV points from the terminal")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Base URL of the Sofia API
    #[arg(long, env = "SOFIA_API_BASE_URL", global = true)]
    pub api_base_url: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Rewrite one CV point for a target domain
    Translate(TranslateArgs),
    /// Rewrite many CV points, one per line
    Bulk(BulkArgs),
    /// Check a CV point against the STAR framework and rewrite it
    Star(StarArgs),
    /// Send feedback to the Sofia team
    Feedback(FeedbackArgs),
    /// List the available tabs
    Tabs,
}

#[derive(Debug, Clone, Args)]
pub struct TranslateArgs {
    /// The CV point to rewrite
    pub cv_point: String,

    /// marketing, sales, consulting, product-management or finance
    #[arg(short, long)]
    pub domain: TargetDomain,

    #[arg(short, long)]
    pub job_description: Option<String>,

    /// Print only the translated point
    #[arg(long)]
    pub copy: bool,
}

#[derive(Debug, Clone, Args)]
pub struct BulkArgs {
    /// File with one CV point per line; reads stdin when omitted or "-"
    #[arg(short, long)]
    pub input: Option<String>,

    #[arg(short, long)]
    pub domain: TargetDomain,

    #[arg(short, long)]
    pub job_description: Option<String>,

    /// Show details for this row (1-based)
    #[arg(long)]
    pub expand: Option<usize>,

    /// Write translations.csv to the output directory
    #[arg(long)]
    pub export: bool,

    #[arg(long)]
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Args)]
#[command(after_help = STAR_GUIDE)]
pub struct StarArgs {
    /// The CV point to check
    pub cv_point: String,

    #[arg(short, long)]
    pub context: Option<String>,

    /// Print only the rewritten point
    #[arg(long)]
    pub copy: bool,
}

#[derive(Debug, Clone, Args)]
pub struct FeedbackArgs {
    pub text: String,

    #[arg(long)]
    pub feedback_origin: Option<String>,
}
