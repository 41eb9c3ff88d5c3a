use chrono::NaiveDate;
use thiserror::Error;

use crate::data::model::{Dataset, Row, Value};

// ---------------------------------------------------------------------------
// PriceFrame – raw provider output, before column normalization
// ---------------------------------------------------------------------------

/// A column label as returned by the provider. Grouped downloads label each
/// column with a (field, entity) pair, e.g. `("Open", "AAPL")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnLabel {
    Plain(String),
    Layered(String, String),
}

impl ColumnLabel {
    /// Collapse to a single label: the first component of a layered key.
    pub fn flatten(&self) -> &str {
        match self {
            ColumnLabel::Plain(name) => name,
            ColumnLabel::Layered(name, _) => name,
        }
    }
}

/// Price history as fetched: a trading-date index plus column-major numeric
/// series aligned with `columns`.
#[derive(Debug, Clone, Default)]
pub struct PriceFrame {
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<ColumnLabel>,
    pub series: Vec<Vec<f64>>,
}

impl PriceFrame {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Per-invocation pipeline failures. Both are terminal for one request only;
/// the process keeps serving.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// Provider returned zero rows (unknown ticker, no trading days).
    #[error("no rows returned")]
    EmptyDataset,
    /// A required field is absent after column normalization.
    #[error("missing column '{0}'")]
    MissingColumn(String),
}

/// Date column of the converted dataset.
pub const DATE: &str = "Date";

/// The fields a candlestick needs, in the order they are validated.
pub const REQUIRED_COLUMNS: [&str; 4] = ["Open", "High", "Low", "Close"];

/// Normalize the frame's column shape and validate it, producing a regular
/// [`Dataset`] with a `Date` column plus one column per price field.
///
/// Checks run in this order: emptiness first, then the required-column set
/// against the flattened labels, so a missing field is reported by name.
pub fn to_dataset(frame: &PriceFrame) -> Result<Dataset, PipelineError> {
    if frame.is_empty() {
        return Err(PipelineError::EmptyDataset);
    }

    let names: Vec<&str> = frame.columns.iter().map(ColumnLabel::flatten).collect();
    for required in REQUIRED_COLUMNS {
        if !names.contains(&required) {
            return Err(PipelineError::MissingColumn(required.to_string()));
        }
    }

    let mut column_names = vec![DATE.to_string()];
    column_names.extend(names.iter().map(|n| n.to_string()));

    let rows = frame
        .dates
        .iter()
        .enumerate()
        .map(|(i, date)| {
            let mut row = Row::new();
            row.insert(DATE.to_string(), Value::Date(*date));
            for (name, series) in names.iter().zip(&frame.series) {
                let cell = series.get(i).copied().unwrap_or(f64::NAN);
                row.insert(name.to_string(), Value::Float(cell));
            }
            row
        })
        .collect();

    Ok(Dataset::from_rows(column_names, rows))
}
