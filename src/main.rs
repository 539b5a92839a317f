use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use bibcheck::bib::{report, Bibliography, CrossrefClient, FormatAdvisor, LookupConfig, Validator};

/// CLI app for validating and correcting BibTeX entries against Crossref
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input .bib file
    input: PathBuf,
    /// Corrected .bib output file (default: corrected_<input> next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Proxy URL for API requests (e.g., http://127.0.0.1:8080)
    #[arg(short, long)]
    proxy: Option<String>,
    /// Delay between lookups, in seconds
    #[arg(short, long, default_value_t = 1.0)]
    delay: f64,
    /// Validation report output file
    #[arg(long, default_value = "validation_report.md")]
    report: PathBuf,
    /// API key enabling best-effort format commentary in the report
    #[arg(long, env = "DEEPSEEK_API_KEY")]
    api_key: Option<String>,
    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Configure logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let bibliography = Bibliography::load(&args.input)
        .with_context(|| format!("Failed to load bibliography from {:?}", args.input))?;

    let config = LookupConfig {
        proxy: args.proxy.clone(),
        ..Default::default()
    };
    let client = CrossrefClient::new(&config).context("Failed to build Crossref client")?;

    let mut validator = Validator::new(client, Duration::from_secs_f64(args.delay));
    if let Some(api_key) = &args.api_key {
        info!("Format commentary enabled");
        validator = validator.with_advisor(
            FormatAdvisor::new(api_key, args.proxy.as_deref())
                .context("Failed to build format advisor")?,
        );
    }

    let (corrected, batch) = validator.run(&bibliography);

    let output_path = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input));
    corrected.save(&output_path).with_context(|| {
        format!(
            "Failed to write corrected bibliography to {:?}",
            output_path
        )
    })?;

    report::write_report(&args.report, &batch)
        .with_context(|| format!("Failed to write report to {:?}", args.report))?;

    println!("\n{}", "=".repeat(50));
    println!("Validation complete");
    println!("Total entries: {}", batch.total);
    println!("Valid: {}", batch.valid);
    println!("Corrected: {}", batch.corrected);
    println!("Unresolved: {}", batch.unresolved);
    println!("Corrected file: {}", output_path.display());
    println!("Report file: {}", args.report.display());
    println!("{}", "=".repeat(50));

    Ok(())
}

fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.bib".to_string());
    input.with_file_name(format!("corrected_{}", name))
}
