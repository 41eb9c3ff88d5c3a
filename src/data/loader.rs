use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use super::model::{Dataset, Row, Value};

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load a dataset from a comma-separated file with a header row.
///
/// Cell types are guessed per value: integer, float, boolean, ISO-8601 date,
/// falling back to string. Empty cells become `Null`.
///
/// The static dashboards call this once at startup; a missing or malformed
/// file is fatal to the process.
pub fn load_csv(path: &Path) -> Result<Dataset> {
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    read_csv(reader).with_context(|| format!("parsing CSV {}", path.display()))
}

/// Parse CSV from any reader (used for the bundled dataset as well).
pub fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Dataset> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        bail!("CSV has no header row");
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let mut row = Row::new();
        for (col_idx, cell) in record.iter().enumerate() {
            let Some(col_name) = headers.get(col_idx) else {
                bail!("CSV row {row_no} has more cells than headers");
            };
            row.insert(col_name.clone(), guess_value_type(cell));
        }
        rows.push(row);
    }

    Ok(Dataset::from_rows(headers, rows))
}

fn guess_value_type(s: &str) -> Value {
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f);
    }
    if s == "true" || s == "false" {
        return Value::Bool(s == "true");
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Value::Date(d);
    }
    Value::String(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_guesses_types() {
        let csv = "name,age,score,joined\nalice,30,91.5,2020-02-01\nbob,25,,2021-07-09\n";
        let ds = read_csv(csv::Reader::from_reader(csv.as_bytes())).unwrap();
        assert_eq!(ds.column_names, vec!["name", "age", "score", "joined"]);
        assert_eq!(ds.cell(0, "age"), &Value::Integer(30));
        assert_eq!(ds.cell(0, "score"), &Value::Float(91.5));
        assert_eq!(ds.cell(1, "score"), &Value::Null);
        assert!(matches!(ds.cell(1, "joined"), Value::Date(_)));
        assert_eq!(ds.cell(1, "name"), &Value::String("bob".into()));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_csv(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.csv"));
    }
}
