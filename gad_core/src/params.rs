//! # Bridge Parameters
//!
//! A [`ParameterSet`] is the loosely-typed input: whatever names a parameter
//! file happened to contain, each value either a number or the raw text that
//! failed to parse. [`BridgeParameters`] is the fully-defaulted record every
//! generator works from.
//!
//! Resolution happens once, through [`PARAMETER_TABLE`]. Each entry lists the
//! keys to try in order and the default used when none of them holds a number.
//! A text value counts as absent.
//!
//! ## Example
//!
//! ```rust
//! use gad_core::params::{BridgeParameters, ParameterSet};
//!
//! let mut params = ParameterSet::new();
//! params.insert("lbridge", 32.0);
//! params.insert("piern", 2.9);
//! params.insert("ccbr", "n/a");
//!
//! let resolved = BridgeParameters::resolve(&params);
//! assert_eq!(resolved.span, 32.0);   // fallback key
//! assert_eq!(resolved.pier_count, 2); // truncated
//! assert_eq!(resolved.width, 10.0);  // text falls through to the default
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::units::format_real;

// ============================================================================
// Parameter Values
// ============================================================================

/// A single parameter value as read from a source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    /// Raw text kept when numeric parsing failed
    Text(String),
}

impl ParamValue {
    /// Parse a raw field, keeping the trimmed text if it is not a finite number.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => ParamValue::Number(v),
            _ => ParamValue::Text(trimmed.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(v) => Some(*v),
            ParamValue::Text(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(v) => f.write_str(&format_real(*v)),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Number(f64::from(v))
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

// ============================================================================
// Parameter Set
// ============================================================================

/// One named parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterEntry {
    pub name: String,
    pub value: ParamValue,
}

/// Insertion-ordered mapping from parameter name to value.
///
/// Names are case-sensitive (`RTL` and `rtl` are different parameters).
/// Re-inserting a name replaces its value but keeps its original position,
/// so exported tables list parameters in the order they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    entries: Vec<ParameterEntry>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in parameter set used when no input file is available.
    pub fn sample() -> Self {
        [
            ("span1", 20.0),
            ("lbridge", 20.0),
            ("ccbr", 10.0),
            ("width", 10.0),
            ("piern", 1.0),
            ("piertw", 1.0),
            ("pierst", 8.0),
            ("battr", 2.0),
            ("slbthc", 0.25),
            ("datum", 100.0),
            ("toprl", 102.0),
            ("RTL", 101.0),
            ("scale1", 100.0),
            ("scale2", 50.0),
        ]
        .into_iter()
        .collect()
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.value = value,
            None => self.entries.push(ParameterEntry { name, value }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|e| e.name == name).map(|e| &e.value)
    }

    /// Numeric value of a parameter, `None` if absent or text.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ParamValue::as_number)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|e| (e.name.as_str(), &e.value))
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterSet
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

// ============================================================================
// Resolution Table
// ============================================================================

/// How one engineering quantity is looked up in a [`ParameterSet`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSpec {
    /// Field name in [`BridgeParameters`]
    pub name: &'static str,
    /// Keys tried in order
    pub keys: &'static [&'static str],
    pub default: f64,
    pub unit: &'static str,
    /// Human-readable label used in the summary report
    pub label: &'static str,
}

impl ParameterSpec {
    /// First numeric value among `keys`, else the default.
    pub fn resolve(&self, params: &ParameterSet) -> f64 {
        for key in self.keys {
            match params.get(key) {
                Some(ParamValue::Number(v)) => return *v,
                Some(ParamValue::Text(raw)) => {
                    warn!(key = *key, value = %raw, "non-numeric value for {}, ignoring", self.name);
                }
                None => {}
            }
        }
        self.default
    }
}

pub const SPAN: ParameterSpec = ParameterSpec {
    name: "span",
    keys: &["span1", "lbridge"],
    default: 20.0,
    unit: "meters",
    label: "Span",
};

pub const WIDTH: ParameterSpec = ParameterSpec {
    name: "width",
    keys: &["ccbr", "width"],
    default: 10.0,
    unit: "meters",
    label: "Width",
};

pub const PIER_COUNT: ParameterSpec = ParameterSpec {
    name: "pier_count",
    keys: &["piern"],
    default: 1.0,
    unit: "",
    label: "Number of Piers",
};

pub const PIER_WIDTH: ParameterSpec = ParameterSpec {
    name: "pier_width",
    keys: &["piertw"],
    default: 1.0,
    unit: "meters",
    label: "Pier Width",
};

pub const PIER_HEIGHT: ParameterSpec = ParameterSpec {
    name: "pier_height",
    keys: &["pierst"],
    default: 8.0,
    unit: "meters",
    label: "Pier Height",
};

pub const ABUTMENT_WIDTH: ParameterSpec = ParameterSpec {
    name: "abutment_width",
    keys: &["battr"],
    default: 2.0,
    unit: "meters",
    label: "Abutment Width",
};

pub const DECK_THICKNESS: ParameterSpec = ParameterSpec {
    name: "deck_thickness",
    keys: &["slbthc"],
    default: 0.25,
    unit: "meters",
    label: "Deck Thickness",
};

pub const DATUM: ParameterSpec = ParameterSpec {
    name: "datum",
    keys: &["datum"],
    default: 100.0,
    unit: "meters",
    label: "Datum Level",
};

pub const TOP_RL: ParameterSpec = ParameterSpec {
    name: "top_rl",
    keys: &["toprl"],
    default: 102.0,
    unit: "meters",
    label: "Top RL",
};

pub const FLOOD_LEVEL: ParameterSpec = ParameterSpec {
    name: "flood_level",
    keys: &["RTL"],
    default: 101.0,
    unit: "meters",
    label: "Flood Level",
};

pub const PLAN_SCALE: ParameterSpec = ParameterSpec {
    name: "plan_scale",
    keys: &["scale1"],
    default: 100.0,
    unit: "",
    label: "Plan Scale",
};

pub const SECTION_SCALE: ParameterSpec = ParameterSpec {
    name: "section_scale",
    keys: &["scale2"],
    default: 50.0,
    unit: "",
    label: "Section Scale",
};

/// Every quantity the generators read, in report order.
pub const PARAMETER_TABLE: [ParameterSpec; 12] = [
    SPAN,
    WIDTH,
    PIER_COUNT,
    PIER_WIDTH,
    PIER_HEIGHT,
    ABUTMENT_WIDTH,
    DECK_THICKNESS,
    DATUM,
    TOP_RL,
    FLOOD_LEVEL,
    PLAN_SCALE,
    SECTION_SCALE,
];

/// Upper bound on the number of piers laid out and drawn.
///
/// `pier_count` is still reported as given; only the geometry is capped.
pub const MAX_DRAWN_PIERS: usize = 10_000;

// ============================================================================
// Resolved Parameters
// ============================================================================

/// Fully-defaulted bridge parameters.
///
/// Engineering lengths are in meters, levels are reduced levels in meters,
/// scales are the `n` of a 1:n drawing ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BridgeParameters {
    pub span: f64,
    /// Carriageway width
    pub width: f64,
    /// Truncated toward zero; may be zero or negative
    pub pier_count: i64,
    pub pier_width: f64,
    pub pier_height: f64,
    pub abutment_width: f64,
    /// Same as the pier height; there is no separate abutment height key
    pub abutment_height: f64,
    pub deck_thickness: f64,
    pub datum: f64,
    pub top_rl: f64,
    pub flood_level: f64,
    pub plan_scale: f64,
    pub section_scale: f64,
}

impl BridgeParameters {
    /// Resolve every quantity in [`PARAMETER_TABLE`] against a parameter set.
    ///
    /// Never fails: missing and non-numeric values take their defaults.
    pub fn resolve(params: &ParameterSet) -> Self {
        let pier_height = PIER_HEIGHT.resolve(params);
        BridgeParameters {
            span: SPAN.resolve(params),
            width: WIDTH.resolve(params),
            pier_count: truncate_count(PIER_COUNT.resolve(params)),
            pier_width: PIER_WIDTH.resolve(params),
            pier_height,
            abutment_width: ABUTMENT_WIDTH.resolve(params),
            abutment_height: pier_height,
            deck_thickness: DECK_THICKNESS.resolve(params),
            datum: DATUM.resolve(params),
            top_rl: TOP_RL.resolve(params),
            flood_level: FLOOD_LEVEL.resolve(params),
            plan_scale: PLAN_SCALE.resolve(params),
            section_scale: SECTION_SCALE.resolve(params),
        }
    }

    /// Number of piers actually drawn: `max(0, pier_count)`, capped at
    /// [`MAX_DRAWN_PIERS`].
    pub fn drawn_pier_count(&self) -> usize {
        let count = usize::try_from(self.pier_count).unwrap_or(0);
        if count > MAX_DRAWN_PIERS {
            warn!(
                pier_count = self.pier_count,
                max = MAX_DRAWN_PIERS,
                "pier count exceeds drawable limit, drawing {} piers",
                MAX_DRAWN_PIERS
            );
            return MAX_DRAWN_PIERS;
        }
        count
    }
}

impl Default for BridgeParameters {
    fn default() -> Self {
        BridgeParameters::resolve(&ParameterSet::new())
    }
}

/// Truncate a float count toward zero. NaN becomes 0, out-of-range saturates.
fn truncate_count(value: f64) -> i64 {
    value.trunc() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_value_parse() {
        assert_eq!(ParamValue::parse(" 12.5 "), ParamValue::Number(12.5));
        assert_eq!(ParamValue::parse("-3"), ParamValue::Number(-3.0));
        assert_eq!(ParamValue::parse(" RCC slab "), ParamValue::Text("RCC slab".to_string()));
        assert_eq!(ParamValue::parse("NaN"), ParamValue::Text("NaN".to_string()));
        assert_eq!(ParamValue::parse("inf"), ParamValue::Text("inf".to_string()));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut params = ParameterSet::new();
        params.insert("span1", 20.0);
        params.insert("ccbr", 10.0);
        params.insert("span1", 25.0);

        assert_eq!(params.len(), 2);
        let names: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["span1", "ccbr"]);
        assert_eq!(params.number("span1"), Some(25.0));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let params: ParameterSet = [("rtl", 99.0)].into_iter().collect();
        assert!(params.contains("rtl"));
        assert!(!params.contains("RTL"));
        assert_eq!(BridgeParameters::resolve(&params).flood_level, 101.0);
    }

    #[test]
    fn test_empty_set_resolves_to_defaults() {
        let resolved = BridgeParameters::resolve(&ParameterSet::new());
        assert_eq!(resolved.span, 20.0);
        assert_eq!(resolved.width, 10.0);
        assert_eq!(resolved.pier_count, 1);
        assert_eq!(resolved.pier_width, 1.0);
        assert_eq!(resolved.pier_height, 8.0);
        assert_eq!(resolved.abutment_width, 2.0);
        assert_eq!(resolved.abutment_height, 8.0);
        assert_eq!(resolved.deck_thickness, 0.25);
        assert_eq!(resolved.datum, 100.0);
        assert_eq!(resolved.top_rl, 102.0);
        assert_eq!(resolved.flood_level, 101.0);
        assert_eq!(resolved.plan_scale, 100.0);
        assert_eq!(resolved.section_scale, 50.0);
    }

    #[test]
    fn test_sample_matches_defaults() {
        assert_eq!(BridgeParameters::resolve(&ParameterSet::sample()), BridgeParameters::default());
    }

    #[test]
    fn test_primary_key_wins_over_fallback() {
        let params: ParameterSet = [("lbridge", 30.0), ("span1", 24.0), ("width", 7.0)]
            .into_iter()
            .collect();
        let resolved = BridgeParameters::resolve(&params);
        assert_eq!(resolved.span, 24.0);
        assert_eq!(resolved.width, 7.0);
    }

    #[test]
    fn test_text_primary_falls_through_to_fallback_key() {
        let mut params = ParameterSet::new();
        params.insert("span1", "twenty");
        params.insert("lbridge", 18.0);
        assert_eq!(BridgeParameters::resolve(&params).span, 18.0);
    }

    #[test]
    fn test_pier_count_truncation() {
        let cases = [(2.9, 2), (0.5, 0), (-1.7, -1), (-3.0, -3), (f64::NAN, 0)];
        for (raw, expected) in cases {
            let params: ParameterSet = [("piern", raw)].into_iter().collect();
            let resolved = BridgeParameters::resolve(&params);
            assert_eq!(resolved.pier_count, expected, "piern = {}", raw);
        }
    }

    #[test]
    fn test_drawn_pier_count_clamps_negative() {
        let params: ParameterSet = [("piern", -4.0)].into_iter().collect();
        assert_eq!(BridgeParameters::resolve(&params).drawn_pier_count(), 0);
    }

    #[test]
    fn test_drawn_pier_count_capped_for_huge_input() {
        let params: ParameterSet = [("piern", 1e19)].into_iter().collect();
        let resolved = BridgeParameters::resolve(&params);
        assert_eq!(resolved.pier_count, i64::MAX);
        assert_eq!(resolved.drawn_pier_count(), MAX_DRAWN_PIERS);
    }

    #[test]
    fn test_table_names_are_unique() {
        for (i, a) in PARAMETER_TABLE.iter().enumerate() {
            for b in &PARAMETER_TABLE[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_parameter_set_json_shape() {
        let mut params = ParameterSet::new();
        params.insert("span1", 20.0);
        params.insert("remark", "skew");
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"span1","value":20.0},{"name":"remark","value":"skew"}]"#
        );
        let back: ParameterSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
