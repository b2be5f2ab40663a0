//! # Generation Pipeline
//!
//! One run resolves a [`ParameterSet`] once, lays out the bridge, and produces
//! all three documents from that single resolved record:
//!
//! ```text
//! ParameterSet ──resolve──> BridgeParameters ──> Layout ──┬──> DXF
//!                                   │                    └──> SVG
//!                                   └─────────────────────────> summary
//! ```
//!
//! Generation is pure. [`write_bundle`] is the only step that touches the
//! filesystem; concurrent runs must use distinct output directories or
//! file names.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gad_core::generate::{write_bundle, GadBundle, OutputSettings};
//! use gad_core::params::ParameterSet;
//! use std::path::Path;
//!
//! let bundle = GadBundle::generate(&ParameterSet::sample());
//! let manifest = write_bundle(&bundle, Path::new("OUTPUT"), &OutputSettings::default())?;
//! println!("{} artifacts written", manifest.artifacts.len());
//! # Ok::<(), gad_core::errors::GadError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dxf::emit_cad;
use crate::errors::{GadError, GadResult};
use crate::file_io::write_artifact;
use crate::layout::Layout;
use crate::params::{BridgeParameters, ParameterSet};
use crate::summary::emit_summary;
use crate::svg::emit_vector;

/// Output file naming for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub dxf_file: String,
    pub svg_file: String,
    pub summary_file: String,
    pub manifest_file: String,
    /// Write a JSON manifest next to the artifacts
    pub write_manifest: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            dxf_file: "basic_bridge_visualization.dxf".to_string(),
            svg_file: "basic_bridge_visualization.svg".to_string(),
            summary_file: "bridge_parameters_summary.txt".to_string(),
            manifest_file: "integration_summary.json".to_string(),
            write_manifest: true,
        }
    }
}

impl OutputSettings {
    /// Load settings from a JSON file; missing fields keep their defaults.
    pub fn load(path: &Path) -> GadResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            GadError::file_error("read settings", path.display().to_string(), e.to_string())
        })?;
        serde_json::from_str(&contents).map_err(|e| GadError::SerializationError {
            reason: format!("Invalid settings JSON in {}: {}", path.display(), e),
        })
    }

    fn validate(&self) -> GadResult<()> {
        for (field, name) in [
            ("dxf_file", &self.dxf_file),
            ("svg_file", &self.svg_file),
            ("summary_file", &self.summary_file),
            ("manifest_file", &self.manifest_file),
        ] {
            if name.trim().is_empty() {
                return Err(GadError::invalid_input(field, name.as_str(), "File name must not be empty"));
            }
        }
        Ok(())
    }
}

/// Every output of one generation run, held in memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GadBundle {
    pub parameters: BridgeParameters,
    pub layout: Layout,
    pub dxf: String,
    pub svg: String,
    pub summary: String,
}

impl GadBundle {
    /// Resolve, lay out and emit all documents. Never fails.
    pub fn generate(params: &ParameterSet) -> Self {
        Self::from_parameters(BridgeParameters::resolve(params))
    }

    pub fn from_parameters(parameters: BridgeParameters) -> Self {
        let layout = Layout::from_parameters(&parameters);
        let dxf = emit_cad(&layout);
        let svg = emit_vector(&layout, &parameters);
        let summary = emit_summary(&parameters);
        GadBundle {
            parameters,
            layout,
            dxf,
            svg,
            summary,
        }
    }
}

/// One written file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    /// `dxf`, `svg` or `summary`
    pub kind: String,
    pub file: String,
    pub bytes: usize,
}

/// Record of a completed run, written as JSON when enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationManifest {
    pub generator: String,
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub span: f64,
    pub width: f64,
    pub pier_count: usize,
    pub artifacts: Vec<ArtifactRecord>,
}

/// Write a bundle's documents into `dir`, creating it if needed.
///
/// # Errors
///
/// * `GadError::InvalidInput` - a configured file name is empty
/// * `GadError::FileError` - the directory or a file cannot be written
pub fn write_bundle(bundle: &GadBundle, dir: &Path, settings: &OutputSettings) -> GadResult<GenerationManifest> {
    settings.validate()?;

    fs::create_dir_all(dir).map_err(|e| {
        GadError::file_error("create directory", dir.display().to_string(), e.to_string())
    })?;

    let mut artifacts = Vec::new();
    for (kind, file, contents) in [
        ("dxf", &settings.dxf_file, &bundle.dxf),
        ("svg", &settings.svg_file, &bundle.svg),
        ("summary", &settings.summary_file, &bundle.summary),
    ] {
        let path: PathBuf = dir.join(file);
        write_artifact(&path, contents)?;
        info!(kind, path = %path.display(), "artifact written");
        artifacts.push(ArtifactRecord {
            kind: kind.to_string(),
            file: file.clone(),
            bytes: contents.len(),
        });
    }

    let manifest = GenerationManifest {
        generator: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        generated_at: Utc::now(),
        span: bundle.parameters.span,
        width: bundle.parameters.width,
        pier_count: bundle.layout.piers.len(),
        artifacts,
    };

    if settings.write_manifest {
        let json = serde_json::to_string_pretty(&manifest)?;
        write_artifact(&dir.join(&settings.manifest_file), &json)?;
    }

    Ok(manifest)
}
