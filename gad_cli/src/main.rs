//! # Bridge GAD CLI
//!
//! Command-line front end for gad_core.
//!
//! ```text
//! bridge-gad generate [--params FILE] [--out DIR] [--settings FILE]
//! bridge-gad summary [--params FILE]
//! bridge-gad export-params --design FILE --out FILE
//! ```
//!
//! Without `--params` the built-in sample parameters are used. An unreadable
//! parameter file is logged and replaced by defaults rather than aborting.
//! Log verbosity follows `RUST_LOG` (default `info`); logs go to stderr.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gad_core::design::{gad_parameters, load_design};
use gad_core::file_io::write_parameter_table;
use gad_core::summary::emit_summary;
use gad_core::{
    load_parameters_or_empty, write_artifact, write_bundle, BridgeParameters, GadBundle, OutputSettings,
    ParameterSet,
};

#[derive(Debug, Parser)]
#[command(name = "bridge-gad", version, about = "Bridge general arrangement drawing generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write DXF, SVG and summary files for a parameter set
    Generate {
        /// Parameter file (key=value or CSV)
        #[arg(long)]
        params: Option<PathBuf>,
        /// Output directory
        #[arg(long, default_value = "OUTPUT")]
        out: PathBuf,
        /// Output settings JSON
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// Print the parameter summary to stdout
    Summary {
        #[arg(long)]
        params: Option<PathBuf>,
    },
    /// Convert design JSON into a GAD parameter table (CSV)
    ExportParams {
        #[arg(long)]
        design: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Generate { params, out, settings } => generate(params.as_deref(), &out, settings.as_deref()),
        Command::Summary { params } => {
            let resolved = BridgeParameters::resolve(&read_parameters(params.as_deref()));
            print!("{}", emit_summary(&resolved));
            Ok(())
        }
        Command::ExportParams { design, out } => export_params(&design, &out),
    }
}

fn read_parameters(path: Option<&Path>) -> ParameterSet {
    match path {
        Some(path) => {
            info!(path = %path.display(), "reading parameters");
            load_parameters_or_empty(path)
        }
        None => {
            info!("no parameter file given, using built-in sample parameters");
            ParameterSet::sample()
        }
    }
}

fn generate(params: Option<&Path>, out: &Path, settings: Option<&Path>) -> Result<()> {
    let settings = match settings {
        Some(path) => OutputSettings::load(path)
            .with_context(|| format!("loading output settings from {}", path.display()))?,
        None => OutputSettings::default(),
    };

    let params = read_parameters(params);
    info!(count = params.len(), "generating drawings");

    let bundle = GadBundle::generate(&params);
    let manifest = write_bundle(&bundle, out, &settings)
        .with_context(|| format!("writing drawings to {}", out.display()))?;

    println!("═══════════════════════════════════════");
    println!("  BRIDGE GAD GENERATION");
    println!("═══════════════════════════════════════");
    println!();
    println!("Layout:");
    println!("  Span:      {} m", bundle.parameters.span);
    println!("  Width:     {} m", bundle.parameters.width);
    println!("  Piers:     {}", bundle.layout.piers.len());
    println!();
    println!("Artifacts ({}):", out.display());
    for artifact in &manifest.artifacts {
        println!("  {:<8} {} ({} bytes)", artifact.kind, artifact.file, artifact.bytes);
    }
    println!();
    println!("Manifest JSON:");
    println!(
        "{}",
        serde_json::to_string_pretty(&manifest).context("serializing manifest")?
    );

    Ok(())
}

fn export_params(design: &Path, out: &Path) -> Result<()> {
    let design_data = load_design(design).with_context(|| format!("reading design data from {}", design.display()))?;
    let params = gad_parameters(&design_data);
    write_artifact(out, &write_parameter_table(&params))
        .with_context(|| format!("writing parameter table to {}", out.display()))?;
    info!(path = %out.display(), count = params.len(), "parameter table written");
    Ok(())
}
