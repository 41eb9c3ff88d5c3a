use chrono::NaiveDate;

use super::model::{Dataset, Value};

// ---------------------------------------------------------------------------
// Row selection
// ---------------------------------------------------------------------------

/// Return indices of rows matching every `(column, value)` pair exactly.
///
/// A row passes when, for each pair, its cell for that column equals the
/// requested value. Missing cells never match (except against `Null`).
pub fn filter_eq(dataset: &Dataset, criteria: &[(&str, &Value)]) -> Vec<usize> {
    dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            criteria.iter().all(|(col, wanted)| {
                row.get(*col).unwrap_or(&Value::Null) == *wanted
            })
        })
        .map(|(i, _)| i)
        .collect()
}

/// Return indices of rows whose date cell lies in `[start, end]`, inclusive.
/// Rows without a date in that column are excluded.
pub fn filter_date_range(
    dataset: &Dataset,
    column: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<usize> {
    dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| match row.get(column).and_then(Value::as_date) {
            Some(d) => start <= d && d <= end,
            None => false,
        })
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Sort the given row indices by a numeric column, descending, and keep at
/// most the first `n`. The sort is stable: rows with equal metric values keep
/// their input order, so the result is deterministic. Cells that are missing
/// or non-numeric rank below every number.
pub fn top_n_by(dataset: &Dataset, mut indices: Vec<usize>, metric: &str, n: usize) -> Vec<usize> {
    indices.sort_by(|&a, &b| {
        let va = dataset.cell(a, metric).as_f64().unwrap_or(f64::NEG_INFINITY);
        let vb = dataset.cell(b, metric).as_f64().unwrap_or(f64::NEG_INFINITY);
        vb.total_cmp(&va)
    });
    indices.truncate(n);
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    fn country(name: &str, continent: &str, year: i64, pop: f64) -> Row {
        Row::from([
            ("Country".to_string(), Value::String(name.into())),
            ("Continent".to_string(), Value::String(continent.into())),
            ("Year".to_string(), Value::Integer(year)),
            ("Population".to_string(), Value::Float(pop)),
        ])
    }

    fn sample() -> Dataset {
        Dataset::from_rows(
            vec![
                "Country".into(),
                "Continent".into(),
                "Year".into(),
                "Population".into(),
            ],
            vec![
                country("India", "Asia", 1952, 372_000_000.0),
                country("China", "Asia", 1952, 556_000_000.0),
                country("Norway", "Europe", 1952, 3_300_000.0),
                country("India", "Asia", 1977, 634_000_000.0),
                country("Japan", "Asia", 1952, 86_500_000.0),
            ],
        )
    }

    #[test]
    fn filter_eq_is_a_conjunction() {
        let ds = sample();
        let asia = Value::String("Asia".into());
        let year = Value::Integer(1952);
        let idx = filter_eq(&ds, &[("Continent", &asia), ("Year", &year)]);
        assert_eq!(idx, vec![0, 1, 4]);
    }

    #[test]
    fn filter_eq_unknown_value_is_empty() {
        let ds = sample();
        let v = Value::String("Atlantis".into());
        assert!(filter_eq(&ds, &[("Continent", &v)]).is_empty());
    }

    #[test]
    fn top_n_sorts_descending_and_truncates() {
        let ds = sample();
        let asia = Value::String("Asia".into());
        let year = Value::Integer(1952);
        let idx = filter_eq(&ds, &[("Continent", &asia), ("Year", &year)]);
        let top = top_n_by(&ds, idx, "Population", 2);
        assert_eq!(top, vec![1, 0]); // China, India
    }

    #[test]
    fn top_n_ties_keep_input_order() {
        let ds = Dataset::from_rows(
            vec!["Country".into(), "Population".into()],
            vec![
                country("A", "X", 1, 5.0),
                country("B", "X", 1, 5.0),
                country("C", "X", 1, 9.0),
            ],
        );
        let top = top_n_by(&ds, vec![0, 1, 2], "Population", 3);
        assert_eq!(top, vec![2, 0, 1]);
    }

    #[test]
    fn date_range_is_inclusive() {
        let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        let rows = ["2024-01-02", "2024-01-03", "2024-01-05"]
            .iter()
            .map(|s| Row::from([("Date".to_string(), Value::Date(d(s)))]))
            .collect();
        let ds = Dataset::from_rows(vec!["Date".into()], rows);
        let idx = filter_date_range(&ds, "Date", d("2024-01-02"), d("2024-01-03"));
        assert_eq!(idx, vec![0, 1]);
    }
}
