mod cli;
mod config;

use anyhow::Context;
use azure_checker::adapters::outbound::azure::{
    AzCliInventory, BackupVaultLookup, PatchAssessmentLookup,
};
use azure_checker::adapters::outbound::console::StderrProgressReporter;
use azure_checker::adapters::outbound::process::ShellCommandRunner;
use azure_checker::application::dto::{AuditRequest, OutputFormat};
use azure_checker::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use azure_checker::application::read_models::AuditReadModelBuilder;
use azure_checker::application::use_cases::RunAuditUseCase;
use azure_checker::shared::error::{AuditError, ExitCode};
use azure_checker::shared::Result;
use cli::Args;
use config::ConfigFile;
use std::io::{self, BufRead, Write};
use std::process;
use std::sync::Arc;
use std::time::Duration;

/// How long abandoned lookups may delay process exit
const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(2);

fn main() {
    let args = Args::parse_args();

    match run(args) {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Options after merging flags over the config file
struct RunOptions {
    request: AuditRequest,
    format: OutputFormat,
    strict: bool,
}

fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(&args)?.unwrap_or_default();

    let subscription_id = match args.subscription.clone() {
        Some(subscription_id) => subscription_id,
        None => prompt_subscription(io::stdin().lock())?,
    };

    let options = resolve_options(&args, &config, subscription_id)?;

    // Create adapters (Dependency Injection)
    let runner = Arc::new(ShellCommandRunner::new());
    let use_case = RunAuditUseCase::new(
        AzCliInventory::new(Arc::clone(&runner)),
        BackupVaultLookup::new(Arc::clone(&runner)),
        PatchAssessmentLookup::new(Arc::clone(&runner)),
        StderrProgressReporter::new(),
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    let outcome = runtime.block_on(use_case.execute(options.request));
    // Lookups abandoned on timeout may still be running; do not wait for them.
    runtime.shutdown_timeout(SHUTDOWN_GRACE_PERIOD);
    let response = outcome?;

    let read_model = AuditReadModelBuilder::build(
        &response.registry,
        &response.recommendations,
        &response.summaries,
        &response.metadata,
    );

    eprintln!("{}", FormatterFactory::progress_message(options.format));
    let formatter = FormatterFactory::create(options.format);
    let formatted_output = formatter.format(&read_model)?;

    let presenter = PresenterFactory::create(PresenterType::from_output(args.output));
    presenter.present(&formatted_output)?;

    if options.strict && read_model.has_lookup_failures() {
        eprintln!("⚠️  Some lookups timed out or failed (--strict)");
        return Ok(ExitCode::LookupFailures);
    }

    Ok(ExitCode::Success)
}

fn load_config(args: &Args) -> Result<Option<ConfigFile>> {
    match &args.config {
        Some(path) => config::load_config_from_path(path).map(Some),
        None => {
            let cwd = std::env::current_dir().context("Failed to read the working directory")?;
            config::discover_config(&cwd)
        }
    }
}

/// Reads the subscription ID from an interactive prompt
fn prompt_subscription(mut input: impl BufRead) -> Result<String> {
    eprint!("Enter the subscription ID to audit: ");
    io::stderr().flush().ok();

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read the subscription ID from stdin")?;

    let subscription_id = line.trim();
    if subscription_id.is_empty() {
        return Err(AuditError::InvalidSubscription {
            subscription: String::new(),
            reason: "no subscription ID was entered".to_string(),
        }
        .into());
    }

    Ok(subscription_id.to_string())
}

/// CLI flag > config file > built-in default
fn resolve_options(args: &Args, config: &ConfigFile, subscription_id: String) -> Result<RunOptions> {
    let mut builder = AuditRequest::builder()
        .subscription_id(subscription_id)
        .check_backups(!args.skip_backups && config.check_backups.unwrap_or(true))
        .assess_patches(!args.skip_patches && config.assess_patches.unwrap_or(true));

    if let Some(client_name) = args.client_name.as_ref().or(config.client_name.as_ref()) {
        builder = builder.client_name(client_name.clone());
    }
    if let Some(seconds) = args.lookup_timeout.or(config.lookup_timeout_secs) {
        builder = builder.lookup_timeout(Duration::from_secs(seconds));
    }
    if let Some(max_concurrency) = args.max_concurrency.or(config.max_concurrency) {
        builder = builder.max_concurrency(max_concurrency);
    }

    Ok(RunOptions {
        request: builder.build()?,
        format: args
            .format
            .or_else(|| config.output_format())
            .unwrap_or_default(),
        strict: args.strict || config.strict.unwrap_or(false),
    })
}
