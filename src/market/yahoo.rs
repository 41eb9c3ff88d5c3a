use chrono::{DateTime, Days, NaiveDate};
use serde_json::Value as JsonValue;

use super::frame::{ColumnLabel, PriceFrame};
use super::provider::{FetchError, PriceProvider};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Daily-bar fields in the provider's payload, with their column names.
const QUOTE_FIELDS: [(&str, &str); 5] = [
    ("open", "Open"),
    ("high", "High"),
    ("low", "Low"),
    ("close", "Close"),
    ("volume", "Volume"),
];

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Blocking client for the Yahoo Finance chart endpoint.
pub struct YahooClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> Result<Self, FetchError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent("chartdeck/0.1")
            .build()?;
        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl PriceProvider for YahooClient {
    fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceFrame, FetchError> {
        // The endpoint treats period2 as exclusive; push it one day out so
        // the requested end date is included.
        let period1 = unix_midnight(start);
        let period2 = unix_midnight(end.checked_add_days(Days::new(1)).unwrap_or(end));

        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker.trim());
        let response = self
            .http
            .get(url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
            ])
            .send()?;

        let json: JsonValue = response.json()?;
        parse_chart_response(&json, ticker)
    }
}

fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Payload parsing
// ---------------------------------------------------------------------------

/// Parse a chart payload into a [`PriceFrame`] with layered column labels
/// (`(field, TICKER)` pairs, as a grouped download shapes them).
///
/// An unknown ticker or a range without trading days comes back as an empty
/// frame; rows with null cells (halted days) are dropped.
pub(crate) fn parse_chart_response(
    json: &JsonValue,
    ticker: &str,
) -> Result<PriceFrame, FetchError> {
    let chart = json
        .get("chart")
        .ok_or_else(|| FetchError::Parse("missing 'chart' object".to_string()))?;

    if let Some(err) = chart.get("error").filter(|v| !v.is_null()) {
        let description = err
            .get("description")
            .and_then(JsonValue::as_str)
            .unwrap_or("unknown provider error");
        return Err(FetchError::Api(description.to_string()));
    }

    let Some(result) = chart
        .get("result")
        .and_then(JsonValue::as_array)
        .and_then(|r| r.first())
    else {
        return Ok(PriceFrame::default());
    };

    let Some(timestamps) = result.get("timestamp").and_then(JsonValue::as_array) else {
        return Ok(PriceFrame::default());
    };

    let quote = result
        .get("indicators")
        .and_then(|i| i.get("quote"))
        .and_then(JsonValue::as_array)
        .and_then(|q| q.first())
        .and_then(JsonValue::as_object)
        .ok_or_else(|| FetchError::Parse("missing quote indicators".to_string()))?;

    let entity = ticker.trim().to_uppercase();
    let mut columns = Vec::new();
    let mut fields: Vec<&Vec<JsonValue>> = Vec::new();
    for (key, name) in QUOTE_FIELDS {
        if let Some(arr) = quote.get(key).and_then(JsonValue::as_array) {
            columns.push(ColumnLabel::Layered(name.to_string(), entity.clone()));
            fields.push(arr);
        }
    }

    let mut dates = Vec::with_capacity(timestamps.len());
    let mut series: Vec<Vec<f64>> = vec![Vec::with_capacity(timestamps.len()); fields.len()];

    for (i, ts) in timestamps.iter().enumerate() {
        let Some(secs) = ts.as_i64() else { continue };
        let Some(date) = DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive()) else {
            continue;
        };
        let cells: Vec<Option<f64>> = fields
            .iter()
            .map(|arr| arr.get(i).and_then(JsonValue::as_f64))
            .collect();
        if cells.iter().any(Option::is_none) {
            continue;
        }
        dates.push(date);
        for (column, cell) in series.iter_mut().zip(cells) {
            column.push(cell.unwrap_or_default());
        }
    }

    Ok(PriceFrame {
        dates,
        columns,
        series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::frame::to_dataset;

    #[test]
    fn parse_daily_sample() {
        let json: JsonValue = serde_json::from_str(
            r#"{
                "chart": {
                    "result": [{
                        "timestamp": [1709251200, 1709510400],
                        "indicators": {
                            "quote": [{
                                "open":   [100.0, 103.0],
                                "high":   [110.0, 111.5],
                                "low":    [95.0,  101.0],
                                "close":  [105.0, 108.2],
                                "volume": [12345, 9876]
                            }]
                        }
                    }],
                    "error": null
                }
            }"#,
        )
        .unwrap();
        let frame = parse_chart_response(&json, "aapl").unwrap();
        assert_eq!(frame.dates.len(), 2);
        assert_eq!(frame.columns.len(), 5);
        assert_eq!(
            frame.columns[0],
            ColumnLabel::Layered("Open".to_string(), "AAPL".to_string())
        );
        assert_eq!(frame.series[3], vec![105.0, 108.2]);
        assert!(to_dataset(&frame).is_ok());
    }

    #[test]
    fn null_cells_drop_the_row() {
        let json: JsonValue = serde_json::from_str(
            r#"{
                "chart": {
                    "result": [{
                        "timestamp": [1709251200, 1709510400],
                        "indicators": {
                            "quote": [{
                                "open":  [100.0, null],
                                "high":  [110.0, 111.5],
                                "low":   [95.0,  101.0],
                                "close": [105.0, 108.2]
                            }]
                        }
                    }],
                    "error": null
                }
            }"#,
        )
        .unwrap();
        let frame = parse_chart_response(&json, "AAPL").unwrap();
        assert_eq!(frame.dates.len(), 1);
        assert_eq!(frame.series[0], vec![100.0]);
    }

    #[test]
    fn provider_error_is_api_error() {
        let json: JsonValue = serde_json::from_str(
            r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}}"#,
        )
        .unwrap();
        let err = parse_chart_response(&json, "ZZZZZZ").unwrap_err();
        assert!(matches!(err, FetchError::Api(_)));
    }

    #[test]
    fn missing_result_is_an_empty_frame() {
        let json: JsonValue =
            serde_json::from_str(r#"{"chart": {"result": [], "error": null}}"#).unwrap();
        let frame = parse_chart_response(&json, "AAPL").unwrap();
        assert!(frame.is_empty());
    }
}
