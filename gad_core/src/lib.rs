//! # gad_core - Bridge General Arrangement Drawing Engine
//!
//! `gad_core` turns a flat set of named bridge parameters (span, carriageway
//! width, pier count and sizes, abutment sizes, levels, drawing scales) into
//! a general arrangement drawing, written three ways: a DXF line drawing, an
//! SVG rendering and a plain-text parameter summary.
//!
//! ## Design Philosophy
//!
//! - **Resolve once**: every generator reads the same [`BridgeParameters`]
//!   record, built from a single defaults table
//! - **Never fail on geometry**: missing, malformed or degenerate inputs still
//!   produce well-formed documents
//! - **Pure generation**: only [`file_io`] and [`generate::write_bundle`]
//!   touch the filesystem
//!
//! ## Quick Start
//!
//! ```rust
//! use gad_core::{GadBundle, ParameterSet};
//!
//! let mut params = ParameterSet::new();
//! params.insert("span1", 24.0);
//! params.insert("piern", 2.0);
//!
//! let bundle = GadBundle::generate(&params);
//! assert_eq!(bundle.layout.piers.len(), 2);
//! assert!(bundle.dxf.ends_with("EOF\n"));
//! assert!(bundle.summary.contains("Span: 24.0 meters"));
//! ```
//!
//! ## Modules
//!
//! - [`params`] - Parameter sets, the defaults table, resolved parameters
//! - [`layout`] - Deck, pier and abutment placement
//! - [`dxf`] - DXF R12 line drawing
//! - [`svg`] - Scaled SVG rendering
//! - [`summary`] - Text parameter report
//! - [`design`] - Design data to GAD parameter table export
//! - [`generate`] - End-to-end pipeline and output manifest
//! - [`file_io`] - Parameter file parsing and atomic artifact writes
//! - [`units`] - Meter/pixel wrappers and number formatting
//! - [`errors`] - Structured error types

pub mod design;
pub mod dxf;
pub mod errors;
pub mod file_io;
pub mod generate;
pub mod layout;
pub mod params;
pub mod summary;
pub mod svg;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{GadError, GadResult};
pub use file_io::{load_parameters, load_parameters_or_empty, parse_parameters, write_artifact};
pub use generate::{write_bundle, GadBundle, GenerationManifest, OutputSettings};
pub use layout::{compute_layout, Layout, Rect};
pub use params::{BridgeParameters, ParamValue, ParameterSet};
