//! gridcheck CLI - reference document builder and fidelity checker

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gridcheck::prelude::*;
use gridcheck::{representation, spawn_row_producer};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridcheck")]
#[command(
    author,
    version,
    about = "Build the reference grid document and check reconstructions of it"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the reference document and write it to a file or stdout
    Build {
        /// Output file (.json or .csv, default: JSON on stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave out the row of invalid alignments
        #[arg(long)]
        no_bad_alignments: bool,

        /// Leave out the data validation sheet
        #[arg(long)]
        no_validation_sheet: bool,
    },

    /// Check a document against a capability profile
    Check {
        /// Profile to check with (full, reduced-model, plain-text)
        #[arg(short, long, default_value = "full")]
        profile: ProfileName,

        /// Document to check (default: reconstruct the reference in memory)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Check the sheet as a stream of row events
        #[arg(short, long)]
        stream: bool,
    },

    /// List the built-in profiles
    Profiles {
        /// Print the profiles as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            output,
            no_bad_alignments,
            no_validation_sheet,
        } => build(output.as_deref(), !no_bad_alignments, !no_validation_sheet),
        Commands::Check {
            profile,
            input,
            stream,
        } => check(profile, input.as_deref(), stream),
        Commands::Profiles { json } => list_profiles(json),
    }
}

fn build(output: Option<&Path>, bad_alignments: bool, validation_sheet: bool) -> Result<()> {
    let workbook = DocumentBuilder::new()
        .with_bad_alignments(bad_alignments)
        .with_validation_sheet(validation_sheet)
        .build()
        .context("Failed to build reference document")?;

    match output {
        Some(path) => {
            workbook
                .save(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "reference document written");
        }
        None => println!("{}", workbook.to_json()?),
    }
    Ok(())
}

fn check(name: ProfileName, input: Option<&Path>, stream: bool) -> Result<()> {
    let profile = name.profile();
    let workbook = match input {
        Some(path) => Workbook::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?,
        None => {
            let reference = DocumentBuilder::new()
                .build()
                .context("Failed to build reference document")?;
            representation(name)
                .reconstruct(&reference)
                .with_context(|| format!("Failed to reconstruct through {name}"))?
        }
    };

    if stream {
        check_stream(profile, &workbook)?;
    } else {
        FidelityChecker::new(profile)
            .check(&workbook)
            .with_context(|| format!("Document does not satisfy profile {name}"))?;
    }

    println!("{name}: ok");
    Ok(())
}

fn check_stream(profile: FidelityProfile, workbook: &Workbook) -> Result<()> {
    let Some(sheet) = workbook.worksheet_by_name(&profile.sheet_name) else {
        bail!("Sheet '{}' not found", profile.sheet_name);
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start runtime")?;

    runtime.block_on(async {
        let (tx, rx) = mpsc::channel(16);
        let producer = spawn_row_producer(sheet, tx);
        let result = StreamingFidelityChecker::new(profile).check(rx).await;
        producer.await.context("Row producer panicked")?;
        result.context("Row stream does not satisfy profile")
    })
}

fn list_profiles(json: bool) -> Result<()> {
    if json {
        let profiles: serde_json::Map<String, serde_json::Value> = ProfileName::ALL
            .into_iter()
            .map(|name| -> Result<(String, serde_json::Value)> {
                Ok((name.to_string(), serde_json::to_value(name.profile())?))
            })
            .collect::<Result<_>>()?;
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }

    for name in ProfileName::ALL {
        let profile = name.profile();
        println!(
            "{:<14} sheet={:<7} dates=±{}ms formulas={} merges={} styles={}",
            name.as_str(),
            profile.sheet_name,
            profile.date_tolerance_ms,
            profile.supports_formulas,
            profile.supports_merges,
            profile.supports_styles,
        );
    }
    Ok(())
}
