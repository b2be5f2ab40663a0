//! # SVG Output
//!
//! Renders a [`Layout`] onto a fixed 800×600 canvas.
//!
//! The canvas scale is a display concern only: pixels per meter chosen so
//! the deck fits, independent of the 1:n drawing scales in the parameters.
//!
//! ```text
//! scale_x = 800 / (span + 10)     (50 if span <= 0)
//! scale_y = 600 / (width + 10)    (50 if width <= 0)
//! scale   = min(scale_x, scale_y, 20)
//! ```
//!
//! Engineering x maps to `50 + x * scale`. The deck is drawn in plan with its
//! top edge at y = 200; piers and abutments hang below it in elevation, using
//! the pier height. Labels print the engineering values, not pixels.
//!
//! ## Example
//!
//! ```rust
//! use gad_core::layout::Layout;
//! use gad_core::params::BridgeParameters;
//! use gad_core::svg::{display_scale, emit_vector};
//!
//! let params = BridgeParameters::default();
//! let svg = emit_vector(&Layout::from_parameters(&params), &params);
//!
//! assert_eq!(display_scale(params.span, params.width).0, 20.0);
//! assert!(svg.contains(r#"<svg width="800" height="600""#));
//! assert!(svg.contains(">Span: 20.0m<"));
//! ```

use tracing::debug;

use crate::layout::{Layout, Rect};
use crate::params::BridgeParameters;
use crate::units::{format_real, DisplayScale, Meters, Pixels};

pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 600;

/// Upper bound on pixels per meter
pub const MAX_DISPLAY_SCALE: f64 = 20.0;
/// Per-axis scale used when the span or width is not positive
pub const FALLBACK_AXIS_SCALE: f64 = 50.0;
/// Meters of padding added to span and width before fitting
pub const FIT_MARGIN: f64 = 10.0;

/// Canvas x of engineering x = 0
pub const DECK_ORIGIN_X: f64 = 50.0;
/// Canvas y of the deck's top edge
pub const DECK_TOP_Y: f64 = 200.0;

pub const DECK_CLASS: &str = "bridge-deck";
pub const PIER_CLASS: &str = "pier";
pub const ABUTMENT_CLASS: &str = "abutment";
pub const TEXT_CLASS: &str = "text";
pub const TITLE_CLASS: &str = "title";

const STYLE_RULES: [(&str, &str); 5] = [
    (DECK_CLASS, "fill: #87CEEB; stroke: #000080; stroke-width: 2;"),
    (PIER_CLASS, "fill: #696969; stroke: #2F4F4F; stroke-width: 2;"),
    (ABUTMENT_CLASS, "fill: #A9A9A9; stroke: #2F4F4F; stroke-width: 2;"),
    (TEXT_CLASS, "font-family: Arial, sans-serif; font-size: 14px; fill: #000000;"),
    (
        TITLE_CLASS,
        "font-family: Arial, sans-serif; font-size: 20px; font-weight: bold; fill: #000080;",
    ),
];

const TITLE: &str = "Bridge General Arrangement";

/// Legend swatches: class, caption
const LEGEND: [(&str, &str); 3] = [
    (DECK_CLASS, "Bridge Deck"),
    (PIER_CLASS, "Pier"),
    (ABUTMENT_CLASS, "Abutment"),
];

// ============================================================================
// Display Transform
// ============================================================================

/// Pixels per meter for a deck of the given span and width.
///
/// Never exceeds [`MAX_DISPLAY_SCALE`].
pub fn display_scale(span: f64, width: f64) -> DisplayScale {
    let scale_x = if span > 0.0 {
        f64::from(CANVAS_WIDTH) / (span + FIT_MARGIN)
    } else {
        FALLBACK_AXIS_SCALE
    };
    let scale_y = if width > 0.0 {
        f64::from(CANVAS_HEIGHT) / (width + FIT_MARGIN)
    } else {
        FALLBACK_AXIS_SCALE
    };
    DisplayScale(scale_x.min(scale_y).min(MAX_DISPLAY_SCALE))
}

/// Maps engineering coordinates to canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayTransform {
    pub scale: DisplayScale,
    pub origin_x: Pixels,
    pub origin_y: Pixels,
}

impl DisplayTransform {
    /// Fit a deck of `span × width` meters onto the canvas.
    pub fn fit(span: f64, width: f64) -> Self {
        DisplayTransform {
            scale: display_scale(span, width),
            origin_x: Pixels(DECK_ORIGIN_X),
            origin_y: Pixels(DECK_TOP_Y),
        }
    }

    /// Canvas x of an engineering x
    pub fn x(&self, x: f64) -> Pixels {
        self.origin_x + self.length(x)
    }

    /// Canvas y of an engineering y measured down from the deck top
    pub fn y(&self, y: f64) -> Pixels {
        self.origin_y + self.length(y)
    }

    pub fn length(&self, length: f64) -> Pixels {
        self.scale.apply(Meters(length))
    }
}

// ============================================================================
// SVG Writer
// ============================================================================

/// Escape text content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn px(value: Pixels) -> String {
    format_real(value.0)
}

fn normalize_extent(start: Pixels, size: Pixels) -> (Pixels, Pixels) {
    if size.0 < 0.0 {
        (start + size, Pixels(-size.0))
    } else {
        (start, size)
    }
}

/// Builder for an SVG document, one method per element kind.
#[derive(Debug)]
pub struct SvgWriter {
    out: String,
    depth: usize,
    shapes: usize,
}

impl SvgWriter {
    /// Start a document with the XML declaration and root element.
    pub fn new(width: u32, height: u32) -> Self {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&format!(
            "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
            width, height
        ));
        SvgWriter { out, depth: 1, shapes: 0 }
    }

    fn line(&mut self, content: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(content);
        self.out.push('\n');
    }

    /// Embedded `<style>` block with one rule per class.
    pub fn style(&mut self, rules: &[(&str, &str)]) -> &mut Self {
        self.line("<style>");
        self.depth += 1;
        for (class, body) in rules {
            self.line(&format!(".{} {{ {} }}", class, body));
        }
        self.depth -= 1;
        self.line("</style>");
        self
    }

    pub fn comment(&mut self, text: &str) -> &mut Self {
        self.line(&format!("<!-- {} -->", text.replace("--", "- -")));
        self
    }

    pub fn rect(&mut self, x: Pixels, y: Pixels, width: Pixels, height: Pixels, class: &str) -> &mut Self {
        // SVG rejects negative sizes; anchor at the min corner instead
        let (x, width) = normalize_extent(x, width);
        let (y, height) = normalize_extent(y, height);
        self.shapes += 1;
        self.line(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" class=\"{}\" />",
            px(x),
            px(y),
            px(width),
            px(height),
            escape_xml(class)
        ));
        self
    }

    /// A text element, optionally anchored (`start`, `middle`, `end`).
    pub fn text(&mut self, x: Pixels, y: Pixels, anchor: Option<&str>, class: &str, content: &str) -> &mut Self {
        let anchor = anchor
            .map(|a| format!(" text-anchor=\"{}\"", escape_xml(a)))
            .unwrap_or_default();
        self.line(&format!(
            "<text x=\"{}\" y=\"{}\"{} class=\"{}\">{}</text>",
            px(x),
            px(y),
            anchor,
            escape_xml(class),
            escape_xml(content)
        ));
        self
    }

    pub fn begin_group(&mut self, id: &str) -> &mut Self {
        self.line(&format!("<g id=\"{}\">", escape_xml(id)));
        self.depth += 1;
        self
    }

    pub fn end_group(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1).max(1);
        self.line("</g>");
        self
    }

    /// Number of `<rect>` elements written so far
    pub fn shape_count(&self) -> usize {
        self.shapes
    }

    /// Close the root element and return the document.
    pub fn finish(mut self) -> String {
        self.out.push_str("</svg>\n");
        self.out
    }
}

// ============================================================================
// Document
// ============================================================================

/// Render a layout onto the fixed canvas.
///
/// Always succeeds. Scale and labels come from `params`; shapes come from
/// `layout`, so both must have been built from the same resolved parameters.
pub fn emit_vector(layout: &Layout, params: &BridgeParameters) -> String {
    let t = DisplayTransform::fit(params.span, params.width);
    let canvas_w = f64::from(CANVAS_WIDTH);

    let deck_bottom = t.y(layout.deck.height());
    let abutment_height = t.length(layout.abutment_height);

    let mut svg = SvgWriter::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    svg.style(&STYLE_RULES);

    svg.comment("Title").text(
        Pixels(canvas_w / 2.0),
        Pixels(30.0),
        Some("middle"),
        TITLE_CLASS,
        TITLE,
    );

    svg.comment("Bridge Deck");
    draw_plan_rect(&mut svg, &t, &layout.deck, DECK_CLASS);

    svg.comment("Piers");
    let pier_height = t.length(layout.pier_height);
    for pier in &layout.piers {
        svg.rect(t.x(pier.x_min), deck_bottom, t.length(pier.width()), pier_height, PIER_CLASS);
    }

    svg.comment("Abutments");
    for abutment in [&layout.left_abutment, &layout.right_abutment] {
        svg.rect(
            t.x(abutment.x_min),
            deck_bottom,
            t.length(abutment.width()),
            abutment_height,
            ABUTMENT_CLASS,
        );
    }

    let mid_span = t.x(params.span / 2.0);
    svg.comment("Labels")
        .text(
            mid_span,
            Pixels(DECK_TOP_Y - 20.0),
            Some("middle"),
            TEXT_CLASS,
            &format!("Span: {}m", format_real(params.span)),
        )
        .text(
            mid_span,
            deck_bottom + Pixels(20.0),
            Some("middle"),
            TEXT_CLASS,
            &format!("Width: {}m", format_real(params.width)),
        )
        .text(
            Pixels(20.0),
            deck_bottom + Pixels(50.0) + abutment_height,
            None,
            TEXT_CLASS,
            &format!("Piers: {}", params.pier_count),
        );

    svg.comment("Legend").begin_group("legend");
    for (i, (class, caption)) in LEGEND.iter().enumerate() {
        let row_y = 100.0 + 30.0 * i as f64;
        svg.rect(Pixels(canvas_w - 150.0), Pixels(row_y), Pixels(20.0), Pixels(20.0), class)
            .text(Pixels(canvas_w - 120.0), Pixels(row_y + 15.0), None, TEXT_CLASS, caption);
    }
    svg.end_group();

    debug!(scale = t.scale.0, shapes = svg.shape_count(), "emitted SVG document");
    svg.finish()
}

fn draw_plan_rect(svg: &mut SvgWriter, t: &DisplayTransform, rect: &Rect, class: &str) {
    svg.rect(
        t.x(rect.x_min),
        t.y(rect.y_min),
        t.length(rect.width()),
        t.length(rect.height()),
        class,
    );
}
