use clap::{Parser, Subcommand, ValueEnum};

/// Google Analytics traffic dashboard for the terminal
#[derive(Parser, Debug)]
#[command(name = "gadash")]
#[command(about = "Google Analytics traffic dashboard for the terminal")]
#[command(version = "0.1.0")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the dashboard report suite
    Run {
        /// Trailing-day window to report on
        #[arg(short, long, default_value_t = 30)]
        days: u32,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,

        /// GA4 property id (falls back to GA_PROPERTY_ID)
        #[arg(short, long)]
        property: Option<String>,

        /// Use the offline sample client instead of the live API
        #[arg(long)]
        sample: bool,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the configured report sections
    Sections {
        /// Trailing-day window the sections would cover
        #[arg(short, long, default_value_t = 30)]
        days: u32,

        /// Show full query details
        #[arg(long)]
        detailed: bool,
    },
}

/// Output format options
#[derive(ValueEnum, Debug, Clone)]
pub enum OutputFormat {
    /// Formatted table output
    Table,
    /// JSON output
    Json,
    /// CSV output
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
