use anyhow::{Context, Result};
use chrono::Datelike;

use super::loader::read_csv;
use super::model::{Dataset, Value};

/// Column names of the bundled socioeconomic dataset.
pub const COUNTRY: &str = "Country";
pub const CONTINENT: &str = "Continent";
pub const YEAR: &str = "Year";
pub const LIFE_EXPECTANCY: &str = "Life Expectancy";
pub const POPULATION: &str = "Population";
pub const GDP_PER_CAPITA: &str = "GDP per Capita";
pub const ISO_CODE: &str = "ISO Code";
pub const CENTROID_LAT: &str = "Centroid Latitude";
pub const CENTROID_LON: &str = "Centroid Longitude";

/// The metrics offered by the bar-chart and map tabs.
pub const METRICS: [&str; 3] = [POPULATION, GDP_PER_CAPITA, LIFE_EXPECTANCY];

const RAW: &str = include_str!("../../assets/gapminder.csv");

/// Load the bundled dataset (country centroids and ISO alpha-3 codes
/// included). The `Year` column arrives date-typed and is normalized to a
/// plain integer year before anything filters on it.
pub fn load() -> Result<Dataset> {
    let ds = read_csv(csv::Reader::from_reader(RAW.as_bytes()))
        .context("parsing bundled gapminder dataset")?;
    Ok(normalize_year(ds))
}

/// Replace date-typed `Year` cells with their integer year.
fn normalize_year(dataset: Dataset) -> Dataset {
    let columns = dataset.column_names.clone();
    let rows = dataset
        .rows
        .into_iter()
        .map(|mut row| {
            let year = match row.get(YEAR) {
                Some(Value::Date(d)) => Some(i64::from(d.year())),
                _ => None,
            };
            if let Some(y) = year {
                row.insert(YEAR.to_string(), Value::Integer(y));
            }
            row
        })
        .collect();
    Dataset::from_rows(columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_dataset_loads_with_expected_columns() {
        let ds = load().unwrap();
        assert!(!ds.is_empty());
        for col in [
            COUNTRY,
            CONTINENT,
            YEAR,
            LIFE_EXPECTANCY,
            POPULATION,
            GDP_PER_CAPITA,
            ISO_CODE,
            CENTROID_LAT,
            CENTROID_LON,
        ] {
            assert!(ds.unique(col).is_some(), "missing column {col}");
        }
    }

    #[test]
    fn year_is_normalized_to_integers() {
        let ds = load().unwrap();
        let years = ds.unique(YEAR).unwrap();
        assert!(!years.is_empty());
        assert!(years.iter().all(|v| matches!(v, Value::Integer(_))));
        assert!(years.contains(&Value::Integer(1952)));
    }

    #[test]
    fn iso_codes_are_three_letters() {
        let ds = load().unwrap();
        for v in ds.unique(ISO_CODE).unwrap() {
            match v {
                Value::String(code) => assert_eq!(code.len(), 3, "bad ISO code {code}"),
                other => panic!("non-string ISO code {other:?}"),
            }
        }
    }
}
