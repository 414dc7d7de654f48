//! # showmeta CLI
//!
//! Command-line entry point for the metadata extraction pipeline:
//! a smoke-test run, the full evaluation pipeline, and an interactive
//! single-description mode.

mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::Config;
use showmeta::{
    annotations,
    dataset::{self, CatalogItem, DatasetRow},
    evaluation,
    providers::ai::anthropic::{AnthropicProvider, DEFAULT_API_URL},
    Extractor,
};
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about = "Extract structured metadata from movie/show descriptions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Test the extractor on 5 sample descriptions
    Test,
    /// Run the full evaluation pipeline against the dataset and annotations
    Evaluate,
    /// Extract metadata for a single description (interactive)
    Extract,
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    // Log to a file so stdout stays clean for user-facing output.
    let log_file = File::create("showmeta-cli.log")?;
    let subscriber = fmt::Subscriber::builder()
        .with_writer(Arc::new(log_file))
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match config::get_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
    };

    let provider = AnthropicProvider::new(
        DEFAULT_API_URL.to_string(),
        config.api_key.clone(),
        config.model.clone(),
    )?;
    let extractor = Extractor::new(Box::new(provider));

    match cli.command {
        Commands::Test => handle_test(&extractor, &config).await,
        Commands::Evaluate => handle_evaluate(&extractor, &config).await,
        Commands::Extract => handle_extract(&extractor).await,
    }
}

// --- Subcommand Handlers ---

/// Smoke run over the first 5 dataset descriptions.
async fn handle_test(extractor: &Extractor, config: &Config) -> Result<()> {
    let rows = dataset::load_dataset(&config.dataset_path)?;
    println!("Loaded {} rows from dataset.", rows.len());

    let items: Vec<CatalogItem> = rows.iter().take(5).map(DatasetRow::to_item).collect();

    println!("\n--- Testing on {} descriptions ---", items.len());
    let results = extractor.extract_batch(&items).await;

    for result in &results {
        println!("\n{}", "=".repeat(50));
        println!("Title: {}", result.title);
        let preview: String = result.description.chars().take(100).collect();
        println!("Description: {preview}...");
        if let Some(metadata) = &result.extraction.metadata {
            println!("Genres: {:?}", metadata.genres);
            println!("Themes: {:?}", metadata.themes);
            println!("Mood: {}", metadata.mood);
            println!("Audience: {}", metadata.target_audience);
            println!("Warnings: {:?}", metadata.content_warnings);
            println!("Retries: {}", result.extraction.retries);
        } else {
            println!(
                "FAILED: {}",
                result.extraction.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    let successes = results.iter().filter(|r| r.extraction.success).count();
    println!("\n--- Results: {}/{} successful ---", successes, results.len());
    Ok(())
}

/// Full evaluation: annotations plus a 50-row dataset sample.
async fn handle_evaluate(extractor: &Extractor, config: &Config) -> Result<()> {
    let rows = dataset::load_dataset(&config.dataset_path)?;
    println!("Loaded {} rows from dataset.", rows.len());
    let annotations = annotations::ground_truth();

    println!("{}", "=".repeat(60));
    println!("CATALOG METADATA EXTRACTION - EVALUATION REPORT");
    println!("{}", "=".repeat(60));

    let report = evaluation::run_evaluation(
        extractor,
        &rows,
        &annotations,
        50,
        Some(&config.report_path),
    )
    .await?;

    println!("\n{}", "=".repeat(60));
    println!("METRICS SUMMARY");
    println!("{}", "=".repeat(60));

    let metrics = &report.metrics;
    println!(
        "\nSchema Compliance (1st try): {:.1}%",
        metrics.schema_compliance_first_try
    );
    println!(
        "Overall Success Rate:        {:.1}%",
        metrics.overall_success_rate
    );
    println!("Retry Rate:                  {:.1}%", metrics.retry_rate);
    println!(
        "Genre Match (vs dataset):    {:.1}%",
        metrics.genre_accuracy
    );

    println!("\nManual Annotation Accuracy (per field):");
    let manual = &metrics.manual_accuracy;
    println!("  {:20}: {:.1}%", "genres", manual.genres);
    println!("  {:20}: {:.1}%", "themes", manual.themes);
    println!("  {:20}: {:.1}%", "mood", manual.mood);
    println!("  {:20}: {:.1}%", "target_audience", manual.target_audience);
    println!("  {:20}: {:.1}%", "content_warnings", manual.content_warnings);
    println!("  {:20}: {:.1}%", "overall", manual.overall);

    if report.failure_count > 0 {
        println!(
            "\n--- Failure Analysis ({} failures) ---",
            report.failure_count
        );
        for failure in &report.failures {
            println!("  Title: {}", failure.title);
            println!("  Error: {}", failure.error);
            println!();
        }
    }

    println!("\nReport saved to {}", config.report_path.display());
    Ok(())
}

/// Interactive mode: one description per line until a quit keyword.
async fn handle_extract(extractor: &Extractor) -> Result<()> {
    println!("Enter a movie/show description (or 'quit' to exit):");

    loop {
        print!("\n> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let description = line.trim();
        if description.is_empty() {
            continue;
        }
        if matches!(description.to_lowercase().as_str(), "quit" | "exit" | "q") {
            break;
        }

        let extraction = extractor.extract(description).await;
        if let Some(metadata) = &extraction.metadata {
            println!("\nGenres: {:?}", metadata.genres);
            println!("Themes: {:?}", metadata.themes);
            println!("Mood: {}", metadata.mood);
            println!("Audience: {}", metadata.target_audience);
            println!("Warnings: {:?}", metadata.content_warnings);
        } else {
            println!(
                "Error: {}",
                extraction.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}
