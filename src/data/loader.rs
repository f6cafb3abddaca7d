use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use super::model::{TimeSurface, TsDataset};

// ---------------------------------------------------------------------------
// Load options & errors
// ---------------------------------------------------------------------------

/// How to interpret a file that carries no `TSDATA` header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOptions {
    /// Surface shape `(rows, cols)`. Ignored when the file has a header.
    pub shape: Option<(usize, usize)>,
    /// Whether the first value of each line is a timestamp.
    pub has_times: bool,
    /// Value separator. `None` means any run of ASCII whitespace.
    pub delimiter: Option<String>,
}

/// Format-level failures. `ShapeRequired` is special: the UI reacts to it by
/// opening the shape dialog instead of reporting an error.
#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    #[error("file has no TSDATA header and no shape was provided")]
    ShapeRequired,
    #[error("malformed TSDATA header: {0:?}")]
    BadHeader(String),
    #[error("line {line}: expected {expected} values, found {found}")]
    RaggedLine {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: {token:?} is not a number")]
    BadNumber { line: usize, token: String },
    #[error("file contains no data lines")]
    Empty,
    #[error("{count} values do not fill a whole number of {rows}x{cols} surfaces")]
    Truncated {
        count: usize,
        rows: usize,
        cols: usize,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a time-surface dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.json` – array of `{"t": ..., "values": [[...], ...]}` records
/// * anything else – the `TSDATA` text format (see [`parse_text`])
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<TsDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;

    match ext.as_str() {
        "json" => load_json(&text),
        _ => Ok(parse_text(&text, options)?),
    }
}

// ---------------------------------------------------------------------------
// Text format
// ---------------------------------------------------------------------------

/// Parsed `TSDATA <rows> <cols> [TIMES]` header line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Header {
    pub rows: usize,
    pub cols: usize,
    pub has_times: bool,
}

/// Parse a `TSDATA` header line. Returns `Ok(None)` when the line is not a
/// header at all (the file then needs external shape information).
pub fn parse_header(line: &str) -> Result<Option<Header>, LoadError> {
    if !line.contains("TSDATA") {
        return Ok(None);
    }
    let bad = || LoadError::BadHeader(line.to_string());

    let mut fields = line.split_whitespace();
    if fields.next() != Some("TSDATA") {
        return Err(bad());
    }
    let rows: usize = fields.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
    let cols: usize = fields.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
    if rows == 0 || cols == 0 {
        return Err(bad());
    }
    let has_times = match fields.next() {
        None => false,
        Some("TIMES") => true,
        Some(_) => return Err(bad()),
    };
    if fields.next().is_some() {
        return Err(bad());
    }
    Ok(Some(Header {
        rows,
        cols,
        has_times,
    }))
}

/// Parse the text format.
///
/// Layout rules:
/// * optional `TSDATA <rows> <cols> [TIMES]` first line; without it the shape
///   comes from `options.shape` (a `(1, n)` shape is normalized to `(n, 1)`)
/// * each line is one flattened surface, optionally led by its timestamp
/// * for 2D surfaces without timestamps, `rows` consecutive lines of `cols`
///   values each are also accepted as one surface
pub fn parse_text(text: &str, options: &LoadOptions) -> Result<TsDataset, LoadError> {
    let mut lines = text.lines().enumerate().peekable();

    let header = match lines.peek() {
        Some((_, first)) => parse_header(first)?,
        None => return Err(LoadError::Empty),
    };

    let (rows, cols, has_times, delimiter) = match header {
        Some(h) => {
            lines.next();
            // Header files are always whitespace-separated.
            (h.rows, h.cols, h.has_times, None)
        }
        None => {
            let (rows, cols) = options.shape.ok_or(LoadError::ShapeRequired)?;
            if rows == 0 || cols == 0 {
                return Err(LoadError::ShapeRequired);
            }
            // A 1×n request really means a 1D surface of n values per line.
            let (rows, cols) = if rows == 1 { (cols, rows) } else { (rows, cols) };
            (rows, cols, options.has_times, options.delimiter.as_deref())
        }
    };

    let surface_len = rows * cols;
    let mut surfaces = Vec::new();
    let mut times: Vec<f64> = Vec::new();
    // Row accumulator for the rows-of-cols 2D layout.
    let mut pending: Vec<f64> = Vec::new();

    for (line_no, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut values = split_values(line, delimiter, line_no + 1)?;

        if has_times {
            if values.len() != surface_len + 1 {
                return Err(LoadError::RaggedLine {
                    line: line_no + 1,
                    expected: surface_len + 1,
                    found: values.len(),
                });
            }
            times.push(values.remove(0));
            surfaces.push(TimeSurface::new(rows, cols, values).expect("length checked"));
        } else if values.len() == surface_len {
            surfaces.push(TimeSurface::new(rows, cols, values).expect("length checked"));
        } else if cols > 1 && values.len() == cols {
            pending.append(&mut values);
            if pending.len() == surface_len {
                let buf = std::mem::take(&mut pending);
                surfaces.push(TimeSurface::new(rows, cols, buf).expect("length checked"));
            }
        } else {
            return Err(LoadError::RaggedLine {
                line: line_no + 1,
                expected: surface_len,
                found: values.len(),
            });
        }
    }

    if !pending.is_empty() {
        return Err(LoadError::Truncated {
            count: surfaces.len() * surface_len + pending.len(),
            rows,
            cols,
        });
    }
    if surfaces.is_empty() {
        return Err(LoadError::Empty);
    }

    let times = has_times.then_some(times);
    Ok(TsDataset::new(surfaces, times))
}

fn split_values(line: &str, delimiter: Option<&str>, line_no: usize) -> Result<Vec<f64>, LoadError> {
    let tokens: Vec<&str> = match delimiter {
        Some(sep) if !sep.is_empty() => line.split(sep).map(str::trim).collect(),
        _ => line.split_whitespace().collect(),
    };
    tokens
        .into_iter()
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<f64>().map_err(|_| LoadError::BadNumber {
                line: line_no,
                token: t.to_string(),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// JSON format
// ---------------------------------------------------------------------------

/// One JSON record: optional timestamp plus the surface as nested rows.
#[derive(Debug, Deserialize)]
struct JsonRecord {
    #[serde(default)]
    t: Option<f64>,
    values: Vec<Vec<f64>>,
}

/// Expected JSON schema:
///
/// ```json
/// [
///   { "t": 0.125, "values": [[0.1, 0.4, 0.1], [0.0, 1.0, 0.2]] },
///   ...
/// ]
/// ```
///
/// All records must share one shape; `t` must be present on all records or
/// on none.
fn load_json(text: &str) -> Result<TsDataset> {
    let records: Vec<JsonRecord> = serde_json::from_str(text).context("parsing JSON")?;
    if records.is_empty() {
        return Err(LoadError::Empty.into());
    }

    let rows = records[0].values.len();
    let cols = records[0].values.first().map(|r| r.len()).unwrap_or(0);
    let timed = records[0].t.is_some();

    let mut surfaces = Vec::with_capacity(records.len());
    let mut times = Vec::new();

    for (i, rec) in records.into_iter().enumerate() {
        anyhow::ensure!(
            rec.t.is_some() == timed,
            "record {i}: timestamps must be present on all records or none"
        );
        if let Some(t) = rec.t {
            times.push(t);
        }

        let flat: Vec<f64> = rec.values.iter().flatten().copied().collect();
        let ok = rec.values.len() == rows && rec.values.iter().all(|r| r.len() == cols);
        let surface = ok.then(|| TimeSurface::new(rows, cols, flat)).flatten();
        surfaces.push(surface.with_context(|| format!("record {i}: expected {rows}x{cols} values"))?);
    }

    Ok(TsDataset::new(surfaces, timed.then_some(times)))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn header_variants() {
        assert_eq!(
            parse_header("TSDATA 5 5").unwrap(),
            Some(Header { rows: 5, cols: 5, has_times: false })
        );
        assert_eq!(
            parse_header("TSDATA 3 7 TIMES").unwrap(),
            Some(Header { rows: 3, cols: 7, has_times: true })
        );
        assert_eq!(parse_header("0.1 0.2 0.3").unwrap(), None);

        assert!(matches!(parse_header("TSDATA 5"), Err(LoadError::BadHeader(_))));
        assert!(matches!(parse_header("TSDATA x 5"), Err(LoadError::BadHeader(_))));
        assert!(matches!(parse_header("TSDATA 0 5"), Err(LoadError::BadHeader(_))));
        assert!(matches!(parse_header("TSDATA 5 5 EXTRA"), Err(LoadError::BadHeader(_))));
    }

    #[test]
    fn one_line_per_surface_with_header() {
        let text = "TSDATA 2 2\n0.1 0.2 0.3 0.4\n0.5 0.6 0.7 0.8\n";
        let ds = parse_text(text, &LoadOptions::default()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.surfaces[0].value(1, 0), 0.3);
        assert!(ds.times.is_none());
        assert!(!ds.is_1d());
    }

    #[test]
    fn header_with_times() {
        let text = "TSDATA 1 3 TIMES\n10.0 0.1 0.2 0.3\n20.0 0.4 0.5 0.6\n";
        let ds = parse_text(text, &LoadOptions::default()).unwrap();
        assert_eq!(ds.times, Some(vec![10.0, 20.0]));
        assert_eq!(ds.surfaces[1].as_slice(), &[0.4, 0.5, 0.6]);
        assert!(ds.is_1d());
    }

    #[test]
    fn headerless_requires_shape() {
        let err = parse_text("0.1 0.2\n", &LoadOptions::default()).unwrap_err();
        assert_eq!(err, LoadError::ShapeRequired);
    }

    #[test]
    fn headerless_with_shape_and_delimiter() {
        let opts = LoadOptions {
            shape: Some((2, 2)),
            has_times: false,
            delimiter: Some(",".into()),
        };
        let ds = parse_text("0.1, 0.2, 0.3, 0.4\n", &opts).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.surfaces[0].value(0, 1), 0.2);
    }

    #[test]
    fn row_vector_shape_is_normalized() {
        // A (1, 4) request means lines of 4 values forming 1D surfaces.
        let opts = LoadOptions {
            shape: Some((1, 4)),
            ..Default::default()
        };
        let ds = parse_text("0.1 0.2 0.3 0.4\n0.5 0.6 0.7 0.8\n", &opts).unwrap();
        assert_eq!(ds.len(), 2);
        assert!(ds.is_1d());
        assert_eq!(ds.surfaces[0].len(), 4);
    }

    #[test]
    fn multi_line_2d_layout() {
        // 2x3 surfaces spread over one line per surface row.
        let opts = LoadOptions {
            shape: Some((2, 3)),
            ..Default::default()
        };
        let text = "0.1 0.2 0.3\n0.4 0.5 0.6\n0.7 0.8 0.9\n1.0 0.9 0.8\n";
        let ds = parse_text(text, &opts).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.surfaces[0].value(1, 2), 0.6);
        assert_eq!(ds.surfaces[1].value(0, 0), 0.7);
    }

    #[test]
    fn incomplete_trailing_surface_is_an_error() {
        let opts = LoadOptions {
            shape: Some((2, 3)),
            ..Default::default()
        };
        let err = parse_text("0.1 0.2 0.3\n", &opts).unwrap_err();
        assert!(matches!(err, LoadError::Truncated { .. }));
    }

    #[test]
    fn ragged_and_non_numeric_lines() {
        let text = "TSDATA 1 3\n0.1 0.2\n";
        assert!(matches!(
            parse_text(text, &LoadOptions::default()),
            Err(LoadError::RaggedLine { line: 2, expected: 3, found: 2 })
        ));

        let text = "TSDATA 1 3\n0.1 abc 0.3\n";
        assert!(matches!(
            parse_text(text, &LoadOptions::default()),
            Err(LoadError::BadNumber { line: 2, .. })
        ));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = "TSDATA 1 2\n\n0.1 0.2\n\n0.3 0.4\n";
        let ds = parse_text(text, &LoadOptions::default()).unwrap();
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn empty_file() {
        assert_eq!(parse_text("", &LoadOptions::default()), Err(LoadError::Empty));
        assert_eq!(
            parse_text("TSDATA 2 2\n", &LoadOptions::default()),
            Err(LoadError::Empty)
        );
    }

    #[test]
    fn load_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let txt_path = dir.path().join("data.tsd");
        let mut f = std::fs::File::create(&txt_path).unwrap();
        writeln!(f, "TSDATA 1 2 TIMES").unwrap();
        writeln!(f, "1.0 0.25 0.75").unwrap();
        let ds = load_file(&txt_path, &LoadOptions::default()).unwrap();
        assert_eq!(ds.times, Some(vec![1.0]));

        let json_path = dir.path().join("data.json");
        let mut f = std::fs::File::create(&json_path).unwrap();
        write!(
            f,
            r#"[{{"t": 0.5, "values": [[0.1, 0.2], [0.3, 0.4]]}},
                {{"t": 1.5, "values": [[0.5, 0.6], [0.7, 0.8]]}}]"#
        )
        .unwrap();
        let ds = load_file(&json_path, &LoadOptions::default()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.times, Some(vec![0.5, 1.5]));
        assert_eq!(ds.surfaces[1].value(1, 0), 0.7);
    }

    #[test]
    fn json_shape_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"[{"values": [[0.1, 0.2]]}, {"values": [[0.1]]}]"#).unwrap();
        assert!(load_file(&path, &LoadOptions::default()).is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file(Path::new("/nonexistent/ts.tsd"), &LoadOptions::default());
        assert!(err.is_err());
    }
}
