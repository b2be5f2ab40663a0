//! # Design Data Export
//!
//! Turns the output of a bridge design run (span, carriageway width, flood
//! and bed levels, pier and abutment sizes) into a full GAD parameter table
//! that the drawing generators, or an external GAD tool, can consume.
//!
//! Levels are derived from the hydraulic data:
//!
//! | Parameter | Value |
//! |-----------|-------|
//! | `datum` | bed level |
//! | `toprl` | flood level + 2.0 |
//! | `RTL` | flood level + 1.0 |
//! | `Sofl` | flood level - 0.5 |
//! | `capt` / `capb` | flood level + 0.5 / flood level |
//! | `futrl`, `arfl` | bed level - 1.0 |
//!
//! Member sizes in the table are fixed GAD values (`piertw` 1.5, `battr` 12.0,
//! `pierst` 8.0, `piern` 1). The design's own pier and abutment sections are
//! parsed and kept on [`DesignData`] but do not change the table.
//!
//! ## Example
//!
//! ```rust
//! use gad_core::design::{gad_parameters, parse_design};
//!
//! let design = parse_design(r#"{"projectInfo": {"span": 25.0, "width": 8.5,
//!     "floodLevel": 102.5, "bedLevel": 97.0}}"#).unwrap();
//! let params = gad_parameters(&design);
//!
//! assert_eq!(params.number("span1"), Some(25.0));
//! assert_eq!(params.number("toprl"), Some(104.5));
//! assert_eq!(params.number("datum"), Some(97.0));
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{GadError, GadResult};
use crate::params::ParameterSet;

pub const DEFAULT_DESIGN_SPAN: f64 = 20.0;
pub const DEFAULT_DESIGN_WIDTH: f64 = 7.5;
pub const DEFAULT_FLOOD_LEVEL: f64 = 100.0;
pub const DEFAULT_BED_LEVEL: f64 = 95.0;

/// Hydraulic and geometric summary of the project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectInfo {
    pub span: Option<f64>,
    pub width: Option<f64>,
    pub discharge: Option<f64>,
    pub flood_level: Option<f64>,
    pub bed_level: Option<f64>,
    pub flow_depth: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PierDesign {
    pub width: Option<f64>,
    pub length: Option<f64>,
    pub number_of_piers: Option<f64>,
    pub depth: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AbutmentDesign {
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub depth: Option<f64>,
}

/// Design run output. Every field is optional; missing sections use defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignData {
    pub project_info: ProjectInfo,
    pub pier: PierDesign,
    pub abutment: AbutmentDesign,
}

/// Known GAD parameters in table order, with descriptions.
pub const GAD_PARAMETERS: [(&str, &str); 48] = [
    ("scale1", "Plan/elevation scale"),
    ("scale2", "Sections scale"),
    ("skew", "Skew angle in degrees"),
    ("datum", "Datum level"),
    ("toprl", "Top RL"),
    ("left", "Left chainage"),
    ("right", "Right chainage"),
    ("xincr", "X increment"),
    ("yincr", "Y increment"),
    ("noch", "Number of chainages"),
    ("nspan", "Number of spans"),
    ("lbridge", "Bridge length"),
    ("abtl", "Abutment left"),
    ("RTL", "Right top level"),
    ("Sofl", "Scour level"),
    ("kerbw", "Kerb width"),
    ("kerbd", "Kerb depth"),
    ("ccbr", "Carriageway width"),
    ("slbthc", "Slab thickness (center)"),
    ("slbthe", "Slab thickness (ends)"),
    ("slbtht", "Slab thickness (top)"),
    ("capt", "Cap top"),
    ("capb", "Cap bottom"),
    ("capw", "Cap width"),
    ("piertw", "Pier top width"),
    ("battr", "Abutment thickness"),
    ("pierst", "Pier stem thickness"),
    ("piern", "Number of piers"),
    ("span1", "Span 1"),
    ("futrl", "Foundation top RL"),
    ("futd", "Foundation depth"),
    ("futw", "Foundation width"),
    ("futl", "Foundation length"),
    ("dwth", "Wearing coat thickness"),
    ("alcw", "Approach slab width"),
    ("alcd", "Approach slab depth"),
    ("alfb", "Approach slab front breadth"),
    ("alfbl", "Approach slab front bottom level"),
    ("altb", "Approach slab top breadth"),
    ("altbl", "Approach slab top bottom level"),
    ("alfo", "Approach slab front overhang"),
    ("alfd", "Approach slab front depth"),
    ("albb", "Approach slab back breadth"),
    ("albbl", "Approach slab back bottom level"),
    ("alfbr", "Right approach slab front bottom level"),
    ("altbr", "Right approach slab top bottom level"),
    ("albbr", "Right approach slab back bottom level"),
    ("arfl", "Right foundation level"),
];

/// Description of a known GAD parameter
pub fn describe_parameter(name: &str) -> Option<&'static str> {
    GAD_PARAMETERS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, description)| *description)
}

/// Decode design data from JSON.
pub fn parse_design(json: &str) -> GadResult<DesignData> {
    Ok(serde_json::from_str(json)?)
}

/// Read design data from a JSON file.
pub fn load_design(path: &Path) -> GadResult<DesignData> {
    let contents = fs::read_to_string(path).map_err(|e| {
        GadError::file_error("read", path.display().to_string(), e.to_string())
    })?;
    serde_json::from_str(&contents).map_err(|e| GadError::SerializationError {
        reason: format!("Invalid design JSON in {}: {}", path.display(), e),
    })
}

/// Build the full GAD parameter table from design data.
///
/// Parameters appear in [`GAD_PARAMETERS`] order.
pub fn gad_parameters(design: &DesignData) -> ParameterSet {
    let info = &design.project_info;
    let span = info.span.unwrap_or(DEFAULT_DESIGN_SPAN);
    let width = info.width.unwrap_or(DEFAULT_DESIGN_WIDTH);
    let flood = info.flood_level.unwrap_or(DEFAULT_FLOOD_LEVEL);
    let bed = info.bed_level.unwrap_or(DEFAULT_BED_LEVEL);

    let value_of = |key: &str| -> f64 {
        match key {
            "scale1" => 100.0,
            "scale2" => 50.0,
            "skew" => 0.0,
            "datum" => bed,
            "toprl" => flood + 2.0,
            "left" => 0.0,
            "right" => span,
            "xincr" => span / 4.0,
            "yincr" => 1.0,
            "noch" => 5.0,
            "nspan" => 1.0,
            "lbridge" => span,
            "abtl" => 0.0,
            "RTL" => flood + 1.0,
            "Sofl" => flood - 0.5,
            "kerbw" => 0.3,
            "kerbd" => 0.2,
            "ccbr" => width,
            "slbthc" => 0.25,
            "slbthe" => 0.2,
            "slbtht" => 0.15,
            "capt" => flood + 0.5,
            "capb" => flood,
            "capw" => 1.2,
            "piertw" => 1.5,
            "battr" => 12.0,
            "pierst" => 8.0,
            "piern" => 1.0,
            "span1" => span,
            "futrl" => bed - 1.0,
            "futd" => 1.5,
            "futw" => 3.0,
            "futl" => 6.0,
            "dwth" => 0.3,
            "alcw" => 1.2,
            "alcd" => 0.8,
            "alfb" => 10.0,
            "alfbl" => flood - 0.2,
            "altb" => 10.0,
            "altbl" => flood - 0.3,
            "alfo" => 0.5,
            "alfd" => 1.2,
            "albb" => 8.0,
            "albbl" => flood - 0.1,
            "alfbr" => flood - 0.2,
            "altbr" => flood - 0.3,
            "albbr" => flood - 0.1,
            "arfl" => bed - 1.0,
            _ => 0.0,
        }
    };

    GAD_PARAMETERS
        .iter()
        .map(|(key, _)| (*key, value_of(*key)))
        .collect()
}
