use azure_checker::application::dto::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Audit an Azure subscription: alert rules, VM backups, patches and Advisor recommendations
#[derive(Parser, Debug)]
#[command(name = "azure-checker")]
#[command(version)]
#[command(about = "Audit an Azure subscription and produce a managed services report", long_about = None)]
pub struct Args {
    /// Subscription ID to audit (prompted for when omitted)
    #[arg(short, long)]
    pub subscription: Option<String>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: markdown, json or html [default: markdown]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Config file path (defaults to ./azure-checker.config.yml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Customer name printed in the report title (defaults to the subscription ID)
    #[arg(long)]
    pub client_name: Option<String>,

    /// Upper bound in seconds for each backup or patch lookup [default: 300]
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub lookup_timeout: Option<u64>,

    /// Maximum number of lookups running at once [default: 8]
    #[arg(long, value_name = "N", value_parser = parse_positive)]
    pub max_concurrency: Option<usize>,

    /// Skip the virtual machine backup check
    #[arg(long)]
    pub skip_backups: bool,

    /// Skip the virtual machine patch assessment
    #[arg(long)]
    pub skip_patches: bool,

    /// Exit with code 1 when any lookup timed out or failed
    #[arg(long)]
    pub strict: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

fn parse_positive(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
