//! # File I/O Module
//!
//! Reading parameter files and writing generated artifacts.
//!
//! ## Parameter File Formats
//!
//! Two text formats are accepted, told apart by content:
//!
//! - **key=value** - used when the text contains `=` and no `,`. One parameter
//!   per line, whitespace around key and value ignored, `#` lines skipped.
//! - **CSV** - `key,value[,description]` rows. A leading header row
//!   (`Parameter,Value,Description` or any row whose value cell is not a
//!   number) is skipped. Double-quoted fields may contain commas.
//!
//! Values that do not parse as numbers are kept as text.
//!
//! ## Atomic Writes
//!
//! Artifacts are written to a `.tmp` sibling, synced, then renamed over the
//! destination, so a reader never sees a half-written drawing.
//!
//! ## Example
//!
//! ```rust
//! use gad_core::file_io::parse_parameters;
//!
//! let params = parse_parameters("span1 = 25\nccbr = 8.5\nremark = skew crossing", "inline").unwrap();
//! assert_eq!(params.number("span1"), Some(25.0));
//! assert_eq!(params.number("remark"), None);
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::design::describe_parameter;
use crate::errors::{GadError, GadResult};
use crate::params::{ParamValue, ParameterSet};

/// Header cell marking the `Parameter,Value,Description` table layout
pub const PARAMETER_HEADER: &str = "Parameter";

// ============================================================================
// Reading
// ============================================================================

/// Parse parameter text in either supported format.
///
/// `source_name` is only used in error messages.
///
/// # Errors
///
/// * `GadError::ParseError` - a CSV field has an unterminated quote
pub fn parse_parameters(text: &str, source_name: &str) -> GadResult<ParameterSet> {
    let content = text.trim();
    if content.contains('=') && !content.contains(',') {
        Ok(parse_key_value(content))
    } else {
        parse_csv(content, source_name)
    }
}

fn parse_key_value(content: &str) -> ParameterSet {
    let mut params = ParameterSet::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if !key.is_empty() {
                params.insert(key, ParamValue::parse(value));
            }
        }
    }
    params
}

fn parse_csv(content: &str, source_name: &str) -> GadResult<ParameterSet> {
    let mut params = ParameterSet::new();
    let mut header_checked = false;

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = split_csv_row(line)
            .ok_or_else(|| GadError::parse_error(source_name, index + 1, "unterminated quoted field"))?;

        if !header_checked {
            header_checked = true;
            if is_header_row(&row) {
                continue;
            }
        }

        if row.len() < 2 {
            continue;
        }
        let key = row[0].trim();
        if key.is_empty() {
            continue;
        }
        params.insert(key, ParamValue::parse(&row[1]));
    }

    Ok(params)
}

fn is_header_row(row: &[String]) -> bool {
    if row.iter().any(|cell| cell.trim() == PARAMETER_HEADER) {
        return true;
    }
    match row.get(1) {
        Some(value) => ParamValue::parse(value).as_number().is_none(),
        None => true,
    }
}

/// Split one CSV line into fields. `None` if a quote is left open.
fn split_csv_row(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return None;
    }
    fields.push(field);
    Some(fields)
}

/// Read and parse a parameter file.
///
/// # Errors
///
/// * `GadError::FileError` - the file cannot be opened or is not UTF-8
/// * `GadError::ParseError` - the CSV is malformed
pub fn load_parameters(path: &Path) -> GadResult<ParameterSet> {
    let mut file = File::open(path).map_err(|e| {
        GadError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        GadError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let params = parse_parameters(&contents, &path.display().to_string())?;
    debug!(path = %path.display(), count = params.len(), "loaded parameters");
    Ok(params)
}

/// Read a parameter file, falling back to an empty set on failure.
///
/// The generators fill every quantity from defaults, so an unreadable source
/// still produces complete drawings. The failure is logged as a warning.
pub fn load_parameters_or_empty(path: &Path) -> ParameterSet {
    match load_parameters(path) {
        Ok(params) => params,
        Err(e) => {
            warn!(error = %e, code = e.error_code(), "could not read parameters, using defaults");
            ParameterSet::new()
        }
    }
}

// ============================================================================
// Writing
// ============================================================================

/// Temp file used while writing `path`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write an artifact with atomic replace semantics.
///
/// 1. Write to `<name>.tmp` next to the destination
/// 2. Sync to disk
/// 3. Rename over the destination
///
/// # Errors
///
/// * `GadError::FileError` - any step fails; the temp file is removed
pub fn write_artifact(path: &Path, contents: &str) -> GadResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        GadError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents.as_bytes()).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        GadError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        GadError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        GadError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = contents.len(), "wrote artifact");
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render a parameter set as a `Parameter,Value,Description` table.
///
/// Descriptions come from the known GAD parameter list; unknown names get an
/// empty description. The output reads back through [`parse_parameters`].
pub fn write_parameter_table(params: &ParameterSet) -> String {
    let mut out = String::from("Parameter,Value,Description\n");
    for (name, value) in params.iter() {
        out.push_str(&format!(
            "{},{},{}\n",
            csv_field(name),
            csv_field(&value.to_string()),
            csv_field(describe_parameter(name).unwrap_or(""))
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_key_value_format() {
        let text = "# sample\nspan1 = 24.5\n ccbr=9\npiern= 2\n\nnote = box girder\nnot a pair\n";
        let params = parse_parameters(text, "kv").unwrap();
        assert_eq!(params.len(), 4);
        assert_eq!(params.number("span1"), Some(24.5));
        assert_eq!(params.number("ccbr"), Some(9.0));
        assert_eq!(params.number("piern"), Some(2.0));
        assert_eq!(params.get("note"), Some(&ParamValue::Text("box girder".to_string())));
    }

    #[test]
    fn test_key_value_splits_on_first_equals() {
        let params = parse_parameters("formula = a=b", "kv").unwrap();
        assert_eq!(params.get("formula"), Some(&ParamValue::Text("a=b".to_string())));
    }

    #[test]
    fn test_csv_with_parameter_header() {
        let text = "Parameter,Value,Description\nspan1,20,Span 1\nccbr,7.5,\"Carriageway width, m\"\nskew,none,\n";
        let params = parse_parameters(text, "table.csv").unwrap();
        assert_eq!(params.len(), 3);
        assert_eq!(params.number("span1"), Some(20.0));
        assert_eq!(params.number("ccbr"), Some(7.5));
        assert_eq!(params.get("skew"), Some(&ParamValue::Text("none".to_string())));
    }

    #[test]
    fn test_csv_with_generic_header() {
        let params = parse_parameters("key,value\nspan1,30\npiern,2\n", "kv.csv").unwrap();
        assert_eq!(params.len(), 2);
        assert!(!params.contains("key"));
    }

    #[test]
    fn test_csv_without_header_keeps_first_row() {
        let params = parse_parameters("span1,30\npiern,2\n", "bare.csv").unwrap();
        assert_eq!(params.number("span1"), Some(30.0));
        assert_eq!(params.number("piern"), Some(2.0));
    }

    #[test]
    fn test_csv_short_rows_skipped() {
        let params = parse_parameters("Parameter,Value\nlonely\nspan1,12\r\n", "x.csv").unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params.number("span1"), Some(12.0));
    }

    #[test]
    fn test_csv_unterminated_quote_is_error() {
        let err = parse_parameters("Parameter,Value\nspan1,\"20\n", "bad.csv").unwrap_err();
        assert_eq!(err, GadError::parse_error("bad.csv", 2, "unterminated quoted field"));
    }

    #[test]
    fn test_empty_text_gives_empty_set() {
        assert!(parse_parameters("", "empty").unwrap().is_empty());
        assert!(parse_parameters("  \n ", "blank").unwrap().is_empty());
    }

    #[test]
    fn test_split_csv_row_quotes() {
        assert_eq!(
            split_csv_row(r#"a,"b,c","say ""hi""",d"#).unwrap(),
            vec!["a", "b,c", "say \"hi\"", "d"]
        );
        assert_eq!(split_csv_row("a,,").unwrap(), vec!["a", "", ""]);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_empty() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        assert!(matches!(load_parameters(&missing), Err(GadError::FileError { .. })));
        assert!(load_parameters_or_empty(&missing).is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bridge_parameters.txt");
        fs::write(&path, "span1=18\npiern=3\n").unwrap();
        let params = load_parameters(&path).unwrap();
        assert_eq!(params.number("span1"), Some(18.0));
        assert_eq!(params.number("piern"), Some(3.0));
    }

    #[test]
    fn test_write_artifact_is_atomic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("drawing.dxf");
        write_artifact(&path, "first").unwrap();
        write_artifact(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!tmp_path_for(&path).exists());
    }

    #[test]
    fn test_write_artifact_into_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("drawing.svg");
        let err = write_artifact(&path, "x").unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_tmp_path_keeps_extension() {
        assert_eq!(
            tmp_path_for(Path::new("/out/drawing.dxf")),
            Path::new("/out/drawing.dxf.tmp")
        );
    }

    #[test]
    fn test_parameter_table_reads_back() {
        let mut params = ParameterSet::new();
        params.insert("span1", 25.0);
        params.insert("ccbr", 8.5);
        params.insert("remark", "skew, 15 deg");

        let table = write_parameter_table(&params);
        assert!(table.starts_with("Parameter,Value,Description\nspan1,25.0,"));
        assert!(table.contains("remark,\"skew, 15 deg\",\n"));

        let back = parse_parameters(&table, "table").unwrap();
        assert_eq!(back, params);
    }
}
