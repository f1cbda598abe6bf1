//! wxo-import - connection and tool importer for watsonx Orchestrate
//!
//! This is the main entry point for the wxo-import binary.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

mod audit;
mod cli;
mod config;
mod error;
mod orchestrate;
mod pipeline;
mod plan;

use audit::AuditLogger;
use cli::Args;
use config::Config;
use pipeline::Pipeline;
use plan::ImportPlan;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.debug);

    info!("Starting wxo-import v{}", env!("CARGO_PKG_VERSION"));

    match run(args).await {
        Ok(code) if code != 0 => std::process::exit(code),
        Ok(_) => Ok(()),
        Err(e) => {
            error!("Import failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Load configuration, build the plan, and execute (or print) it
async fn run(args: Args) -> error::Result<i32> {
    let mut config = match Config::load(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Config::default()
        }
    };

    // CLI flags win over file and environment sources
    config.apply_args(&args);
    config.validate()?;

    let plan = ImportPlan::from_config(&config);
    info!(
        "Planned {} steps for app '{}'",
        plan.len(),
        config.connection.app_name
    );

    if args.dry_run {
        print!(
            "{}",
            plan.render(&config.connection.app_name, &config.run.orchestrate_bin)
        );
        return Ok(0);
    }

    let audit = AuditLogger::new(config.audit.clone());
    let mut pipeline = Pipeline::new(config.clone(), audit);
    let summary = pipeline.run(&plan).await?;

    if summary.success() {
        println!("\n✓ Import complete ({} steps)", summary.reports.len());
        Ok(0)
    } else {
        eprintln!(
            "\n⚠️  Import finished with {} failed step(s)",
            summary.failed_count()
        );
        Ok(1)
    }
}

/// Initialize the logging/tracing subsystem
fn init_logging(debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
