//! Conduit connector generator
//!
//! Reads a manifest of interface descriptors and writes one connector module
//! per interface plus a `lib.rs`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use conduit_gen::errors::GeneratorError;
use conduit_gen::manifest::Manifest;
use conduit_gen::output::generate_and_write_all;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Conduit code generator - synthesizes HTTP connectors from interface descriptors
#[derive(Parser, Debug)]
#[command(name = "conduit-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Manifest listing the interfaces to synthesize (.yaml, .yml or .json)
    #[arg(short, long)]
    manifest: PathBuf,

    /// Output directory for generated code
    #[arg(short, long, default_value = "generated/src")]
    output: PathBuf,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            // -v: one line per written file
            1 => "warn,conduit_gen=info".to_string(),
            // -vv: per interface and method
            2 => "info,conduit_gen=debug".to_string(),
            _ => "debug,conduit_gen=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn run(cli: &Cli) -> Result<usize, GeneratorError> {
    let manifest = Manifest::load(&cli.manifest)?;
    tracing::info!(
        manifest = %cli.manifest.display(),
        interfaces = manifest.interfaces.len(),
        "generating connectors"
    );

    let files = generate_and_write_all(
        &manifest.interfaces,
        &manifest.options,
        &cli.output,
        cli.dry_run,
    )?;
    Ok(files.len())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(count) => {
            if !cli.dry_run {
                eprintln!(
                    "{} {} files to {}",
                    "Generated".green().bold(),
                    count,
                    cli.output.display()
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
