//! # DXF Output
//!
//! Writes a [`Layout`] as a minimal DXF R12 document: fixed `HEADER`,
//! `TABLES` and `BLOCKS` sections, then one `ENTITIES` section holding a
//! `LINE` per rectangle edge, then `EOF`.
//!
//! Entity order is deck, piers by station, left abutment, right abutment.
//! The deck is written as four strokes (bottom, top, left, right); every other
//! rectangle as a closed loop starting at its bottom edge. All entities sit on
//! layer `0`. Coordinates are printed unrounded.
//!
//! ## Example
//!
//! ```rust
//! use gad_core::dxf::emit_cad;
//! use gad_core::layout::compute_layout;
//! use gad_core::params::ParameterSet;
//!
//! let layout = compute_layout(&ParameterSet::sample());
//! let dxf = emit_cad(&layout);
//!
//! assert!(dxf.starts_with("  0\nSECTION\n  2\nHEADER\n"));
//! assert!(dxf.ends_with("  0\nEOF\n"));
//! assert_eq!(dxf.matches("\nLINE\n").count(), 16);
//! ```

use tracing::debug;

use crate::layout::{Edge, Layout, Rect};
use crate::units::format_real;

/// AutoCAD R12 version tag
pub const ACAD_VERSION: &str = "AC1009";

/// Layer for every emitted entity
pub const DEFAULT_LAYER: &str = "0";

/// Builder for DXF group-code/value records.
///
/// Each method appends complete records; [`DxfWriter::finish`] returns the
/// document text.
#[derive(Debug, Default)]
pub struct DxfWriter {
    out: String,
    entities: usize,
}

impl DxfWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// One group code and its value. Codes are right-aligned to three columns.
    pub fn group(&mut self, code: u16, value: &str) -> &mut Self {
        self.out.push_str(&format!("{:>3}\n{}\n", code, value));
        self
    }

    pub fn begin_section(&mut self, name: &str) -> &mut Self {
        self.group(0, "SECTION").group(2, name)
    }

    pub fn end_section(&mut self) -> &mut Self {
        self.group(0, "ENDSEC")
    }

    /// A section with no content
    pub fn empty_section(&mut self, name: &str) -> &mut Self {
        self.begin_section(name).end_section()
    }

    /// `HEADER` section declaring the drawing version.
    pub fn header_section(&mut self, acad_version: &str) -> &mut Self {
        self.begin_section("HEADER")
            .group(9, "$ACADVER")
            .group(1, acad_version)
            .end_section()
    }

    /// A `LINE` entity from `edge.start` to `edge.end`.
    pub fn line(&mut self, layer: &str, edge: &Edge) -> &mut Self {
        self.entities += 1;
        self.group(0, "LINE")
            .group(8, layer)
            .group(10, &format_real(edge.start.0))
            .group(20, &format_real(edge.start.1))
            .group(11, &format_real(edge.end.0))
            .group(21, &format_real(edge.end.1))
    }

    /// Four `LINE` entities tracing a rectangle as a closed loop.
    pub fn rect_loop(&mut self, layer: &str, rect: &Rect) -> &mut Self {
        for edge in rect.edge_loop() {
            self.line(layer, &edge);
        }
        self
    }

    pub fn eof(&mut self) -> &mut Self {
        self.group(0, "EOF")
    }

    /// Number of entities written so far
    pub fn entity_count(&self) -> usize {
        self.entities
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Serialize a layout as a DXF document.
///
/// Always succeeds. The document contains `12 + 4 * piers` `LINE` entities.
pub fn emit_cad(layout: &Layout) -> String {
    let mut dxf = DxfWriter::new();

    dxf.header_section(ACAD_VERSION)
        .empty_section("TABLES")
        .empty_section("BLOCKS")
        .begin_section("ENTITIES");

    for edge in layout.deck.edge_strokes() {
        dxf.line(DEFAULT_LAYER, &edge);
    }
    for pier in &layout.piers {
        dxf.rect_loop(DEFAULT_LAYER, pier);
    }
    dxf.rect_loop(DEFAULT_LAYER, &layout.left_abutment)
        .rect_loop(DEFAULT_LAYER, &layout.right_abutment);

    dxf.end_section().eof();

    debug!(entities = dxf.entity_count(), "emitted DXF document");
    dxf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;
    use crate::params::ParameterSet;

    fn line_count(doc: &str) -> usize {
        doc.matches("  0\nLINE\n").count()
    }

    fn line_record(x1: &str, y1: &str, x2: &str, y2: &str) -> String {
        format!("  0\nLINE\n  8\n0\n 10\n{}\n 20\n{}\n 11\n{}\n 21\n{}\n", x1, y1, x2, y2)
    }

    #[test]
    fn test_group_alignment() {
        let mut w = DxfWriter::new();
        w.group(0, "SECTION").group(10, "1.0").group(999, "x");
        assert_eq!(w.finish(), "  0\nSECTION\n 10\n1.0\n999\nx\n");
    }

    #[test]
    fn test_preamble_is_fixed() {
        let dxf = emit_cad(&compute_layout(&ParameterSet::new()));
        let preamble = "  0\nSECTION\n  2\nHEADER\n  9\n$ACADVER\n  1\nAC1009\n  0\nENDSEC\n\
                        \x20 0\nSECTION\n  2\nTABLES\n  0\nENDSEC\n\
                        \x20 0\nSECTION\n  2\nBLOCKS\n  0\nENDSEC\n\
                        \x20 0\nSECTION\n  2\nENTITIES\n";
        assert!(dxf.starts_with(preamble));
        assert!(dxf.ends_with("  0\nENDSEC\n  0\nEOF\n"));
    }

    #[test]
    fn test_line_count_formula() {
        for n in 0..6 {
            let params: ParameterSet = [("piern", n as f64)].into_iter().collect();
            let dxf = emit_cad(&compute_layout(&params));
            assert_eq!(line_count(&dxf), 4 + 4 * n + 8, "piers = {}", n);
        }
    }

    #[test]
    fn test_extreme_values_stay_readable() {
        let params: ParameterSet = [("span1", 1e16), ("ccbr", f64::NAN), ("piern", 0.0)]
            .into_iter()
            .collect();
        let dxf = emit_cad(&compute_layout(&params));
        assert!(dxf.contains(" 11\n1e+16\n"));
        assert!(!dxf.contains("NaN"));
        assert!(!dxf.contains("inf"));
        assert_eq!(line_count(&dxf), 12);
    }

    #[test]
    fn test_negative_pier_count_emits_structure_only() {
        let params: ParameterSet = [("piern", -3.0)].into_iter().collect();
        assert_eq!(line_count(&emit_cad(&compute_layout(&params))), 12);
    }

    #[test]
    fn test_entities_without_piers_exact() {
        let params: ParameterSet = [("piern", 0.0)].into_iter().collect();
        let dxf = emit_cad(&compute_layout(&params));

        let expected: String = [
            // deck
            line_record("0.0", "0.0", "20.0", "0.0"),
            line_record("0.0", "10.0", "20.0", "10.0"),
            line_record("0.0", "0.0", "0.0", "10.0"),
            line_record("20.0", "0.0", "20.0", "10.0"),
            // left abutment
            line_record("-2.0", "0.0", "0.0", "0.0"),
            line_record("0.0", "0.0", "0.0", "10.0"),
            line_record("0.0", "10.0", "-2.0", "10.0"),
            line_record("-2.0", "10.0", "-2.0", "0.0"),
            // right abutment
            line_record("20.0", "0.0", "22.0", "0.0"),
            line_record("22.0", "0.0", "22.0", "10.0"),
            line_record("22.0", "10.0", "20.0", "10.0"),
            line_record("20.0", "10.0", "20.0", "0.0"),
        ]
        .concat();

        let start = dxf.find("ENTITIES\n").unwrap() + "ENTITIES\n".len();
        let end = dxf.rfind("  0\nENDSEC\n").unwrap();
        assert_eq!(&dxf[start..end], expected);
    }

    #[test]
    fn test_pier_loop_follows_deck() {
        let dxf = emit_cad(&compute_layout(&ParameterSet::sample()));
        let deck_right = line_record("20.0", "0.0", "20.0", "10.0");
        let pier_bottom = line_record("9.5", "0.0", "10.5", "0.0");
        let expected = format!("{}{}", deck_right, pier_bottom);
        assert!(dxf.contains(&expected));
        assert!(dxf.contains(&line_record("10.5", "0.0", "10.5", "10.0")));
        assert!(dxf.contains(&line_record("10.5", "10.0", "9.5", "10.0")));
        assert!(dxf.contains(&line_record("9.5", "10.0", "9.5", "0.0")));
    }

    #[test]
    fn test_values_are_not_rounded() {
        let params: ParameterSet = [("span1", 0.1 + 0.2), ("piern", 0.0)].into_iter().collect();
        let dxf = emit_cad(&compute_layout(&params));
        assert!(dxf.contains(" 11\n0.30000000000000004\n"));
    }

    #[test]
    fn test_zero_span_is_well_formed() {
        let params: ParameterSet = [("span1", 0.0), ("ccbr", 10.0), ("piern", 3.0)]
            .into_iter()
            .collect();
        let dxf = emit_cad(&compute_layout(&params));
        assert_eq!(line_count(&dxf), 24);
        assert!(dxf.contains(&line_record("-0.5", "0.0", "0.5", "0.0")));
    }

    #[test]
    fn test_every_entity_on_layer_zero() {
        let dxf = emit_cad(&compute_layout(&ParameterSet::sample()));
        let layers = dxf.matches("  0\nLINE\n  8\n0\n").count();
        assert_eq!(layers, line_count(&dxf));
    }

    #[test]
    fn test_writer_counts_entities() {
        let mut w = DxfWriter::new();
        w.rect_loop(DEFAULT_LAYER, &Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(w.entity_count(), 4);
    }
}
