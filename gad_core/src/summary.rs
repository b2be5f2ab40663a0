//! # Parameter Summary
//!
//! Plain-text report of the resolved parameters, grouped into four sections.
//! No geometry is involved.
//!
//! ```text
//! BRIDGE GENERAL ARRANGEMENT DATA
//! ===============================
//!
//! BASIC PARAMETERS:
//!   Span: 20.0 meters
//!   ...
//! SCALING:
//!   Plan Scale: 1:100
//! ```

use crate::params::{
    BridgeParameters, ParameterSpec, ABUTMENT_WIDTH, DATUM, DECK_THICKNESS, FLOOD_LEVEL, PIER_COUNT,
    PIER_HEIGHT, PIER_WIDTH, PLAN_SCALE, SECTION_SCALE, SPAN, TOP_RL, WIDTH,
};
use crate::units::{format_ratio, format_real};

pub const SUMMARY_TITLE: &str = "BRIDGE GENERAL ARRANGEMENT DATA";

/// Builder for the sectioned `LABEL: value unit` report format.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    out: String,
}

impl ReportBuilder {
    /// Start a report with an underlined title.
    pub fn new(title: &str) -> Self {
        let mut out = String::new();
        out.push_str(title);
        out.push('\n');
        out.push_str(&"=".repeat(title.chars().count()));
        out.push('\n');
        ReportBuilder { out }
    }

    /// Section header, preceded by a blank line.
    pub fn section(&mut self, name: &str) -> &mut Self {
        self.out.push('\n');
        self.out.push_str(name);
        self.out.push_str(":\n");
        self
    }

    /// One indented `label: value unit` line; the unit is omitted when empty.
    pub fn entry(&mut self, label: &str, value: &str, unit: &str) -> &mut Self {
        self.out.push_str(&format!("  {}: {}", label, value));
        if !unit.is_empty() {
            self.out.push(' ');
            self.out.push_str(unit);
        }
        self.out.push('\n');
        self
    }

    /// Entry labelled and unit-tagged from the parameter table.
    pub fn quantity(&mut self, spec: &ParameterSpec, value: f64) -> &mut Self {
        self.entry(spec.label, &format_real(value), spec.unit)
    }

    /// Closing line after a blank line.
    pub fn footer(&mut self, text: &str) -> &mut Self {
        self.out.push('\n');
        self.out.push_str(text);
        self.out.push('\n');
        self
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Format the resolved parameters as the summary report.
pub fn emit_summary(params: &BridgeParameters) -> String {
    let mut report = ReportBuilder::new(SUMMARY_TITLE);

    report
        .section("BASIC PARAMETERS")
        .quantity(&SPAN, params.span)
        .quantity(&WIDTH, params.width)
        .entry(PIER_COUNT.label, &params.pier_count.to_string(), PIER_COUNT.unit);

    report
        .section("STRUCTURAL ELEMENTS")
        .quantity(&DECK_THICKNESS, params.deck_thickness)
        .quantity(&PIER_WIDTH, params.pier_width)
        .quantity(&PIER_HEIGHT, params.pier_height)
        .quantity(&ABUTMENT_WIDTH, params.abutment_width);

    report
        .section("HYDRAULIC DATA")
        .quantity(&DATUM, params.datum)
        .quantity(&TOP_RL, params.top_rl)
        .quantity(&FLOOD_LEVEL, params.flood_level);

    report
        .section("SCALING")
        .entry(PLAN_SCALE.label, &format!("1:{}", format_ratio(params.plan_scale)), PLAN_SCALE.unit)
        .entry(
            SECTION_SCALE.label,
            &format!("1:{}", format_ratio(params.section_scale)),
            SECTION_SCALE.unit,
        );

    report.footer(&format!("GENERATED: gad_core {}", env!("CARGO_PKG_VERSION")));
    report.finish()
}
