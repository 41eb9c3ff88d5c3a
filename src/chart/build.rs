use chrono::NaiveDate;

use crate::data::filter::{filter_date_range, filter_eq, top_n_by};
use crate::data::gapminder::{CENTROID_LAT, CENTROID_LON, CONTINENT, COUNTRY, ISO_CODE, YEAR};
use crate::data::model::{Dataset, Value};
use crate::market::frame::{to_dataset, PipelineError, DATE, REQUIRED_COLUMNS};
use crate::market::provider::PriceProvider;

use super::spec::{ChartKind, ChartSpec, ColorScale, Layout, SeriesData, Theme};

/// Rows kept by the ranked bar charts.
pub const TOP_N: usize = 15;

// ---------------------------------------------------------------------------
// Static builders
// ---------------------------------------------------------------------------

/// All columns, all rows, as a display grid. Pagination is the renderer's
/// business; the spec only carries the requested page size.
pub fn table_chart(dataset: &Dataset, page_size: Option<usize>) -> ChartSpec {
    let header = dataset.column_names.clone();
    let cells = dataset
        .rows
        .iter()
        .map(|row| {
            header
                .iter()
                .map(|col| row.get(col).unwrap_or(&Value::Null).to_string())
                .collect()
        })
        .collect();
    ChartSpec {
        kind: ChartKind::Table,
        data: SeriesData::Table { header, cells },
        layout: Layout {
            page_size,
            ..Layout::default()
        },
    }
}

/// Distribution of one user-chosen column. Bucketization is delegated to
/// the renderer; the spec carries the raw values.
pub fn histogram_chart(dataset: &Dataset, feature: &str) -> ChartSpec {
    let values: Vec<f64> = dataset
        .rows
        .iter()
        .filter_map(|row| row.get(feature).and_then(Value::as_f64))
        .collect();
    ChartSpec {
        kind: ChartKind::Histogram,
        data: SeriesData::Histogram { values },
        layout: Layout {
            title: format!("Histogram of {feature}"),
            x_label: Some(feature.to_string()),
            y_label: Some("Frequency".to_string()),
            ..Layout::default()
        },
    }
}

/// Top-15 countries of a continent and year, ranked by `metric` descending,
/// one colored bar per country with its value printed on the bar.
pub fn metric_bar_chart(
    dataset: &Dataset,
    metric: &str,
    continent: &Value,
    year: &Value,
) -> ChartSpec {
    let indices = filter_eq(dataset, &[(CONTINENT, continent), (YEAR, year)]);
    if indices.is_empty() {
        return ChartSpec::empty(
            ChartKind::Bar,
            format!("No rows for {continent} Continent in {year}"),
        );
    }
    let indices = top_n_by(dataset, indices, metric, TOP_N);

    let categories = indices
        .iter()
        .map(|&i| dataset.cell(i, COUNTRY).to_string())
        .collect();
    let values = indices
        .iter()
        .map(|&i| dataset.cell(i, metric).as_f64().unwrap_or(0.0))
        .collect();

    ChartSpec {
        kind: ChartKind::Bar,
        data: SeriesData::Bar { categories, values },
        layout: Layout {
            title: format!("Country {metric} for {continent} Continent in {year}"),
            x_label: Some(COUNTRY.to_string()),
            y_label: Some(metric.to_string()),
            color_scale: Some(ColorScale::Categorical),
            show_values: true,
            ..Layout::default()
        },
    }
}

/// World map of one numeric column for a single year, keyed by ISO alpha-3
/// code, with a diverging color scale and country-name hover data.
pub fn choropleth_chart(dataset: &Dataset, variable: &str, year: &Value) -> ChartSpec {
    let indices = filter_eq(dataset, &[(YEAR, year)]);
    if indices.is_empty() {
        return ChartSpec::empty(ChartKind::Choropleth, format!("No rows for {year}"));
    }

    let mut locations = Vec::with_capacity(indices.len());
    let mut names = Vec::with_capacity(indices.len());
    let mut values = Vec::with_capacity(indices.len());
    let mut centroids = Vec::with_capacity(indices.len());
    for &i in &indices {
        let (Some(value), Some(lat), Some(lon)) = (
            dataset.cell(i, variable).as_f64(),
            dataset.cell(i, CENTROID_LAT).as_f64(),
            dataset.cell(i, CENTROID_LON).as_f64(),
        ) else {
            continue;
        };
        locations.push(dataset.cell(i, ISO_CODE).to_string());
        names.push(dataset.cell(i, COUNTRY).to_string());
        values.push(value);
        centroids.push((lat, lon));
    }

    ChartSpec {
        kind: ChartKind::Choropleth,
        data: SeriesData::Choropleth {
            locations,
            names,
            values,
            centroids,
        },
        layout: Layout {
            title: format!("{variable} Choropleth Map [{year}]"),
            color_scale: Some(ColorScale::Diverging),
            ..Layout::default()
        },
    }
}

// ---------------------------------------------------------------------------
// Candlestick pipeline (live variant)
// ---------------------------------------------------------------------------

fn empty_candlestick(title: String) -> ChartSpec {
    let mut spec = ChartSpec::empty_themed(ChartKind::Candlestick, title, Theme::Dark);
    spec.layout.x_label = Some("Date".to_string());
    spec.layout.y_label = Some("Price (USD)".to_string());
    spec
}

/// OHLC chart of the given rows: range slider off, dark theme.
pub fn candlestick_chart(dataset: &Dataset, indices: &[usize], ticker: &str) -> ChartSpec {
    let mut dates = Vec::with_capacity(indices.len());
    let mut series: [Vec<f64>; 4] = Default::default();
    for &i in indices {
        let Some(date) = dataset.cell(i, DATE).as_date() else {
            continue;
        };
        dates.push(date);
        for (column, name) in series.iter_mut().zip(REQUIRED_COLUMNS) {
            column.push(dataset.cell(i, name).as_f64().unwrap_or(0.0));
        }
    }
    let [open, high, low, close] = series;

    ChartSpec {
        kind: ChartKind::Candlestick,
        data: SeriesData::Candlestick {
            dates,
            open,
            high,
            low,
            close,
        },
        layout: Layout {
            title: format!("Candlestick Chart of {}", ticker.trim().to_uppercase()),
            x_label: Some("Date".to_string()),
            y_label: Some("Price (USD)".to_string()),
            theme: Theme::Dark,
            range_slider: false,
            ..Layout::default()
        },
    }
}

/// Fetch → normalize → validate → build. `Ok` is a rendered chart, `Err` an
/// error chart naming the failure; both are renderable.
pub fn fetch_and_build(
    provider: &dyn PriceProvider,
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<ChartSpec, ChartSpec> {
    let frame = match provider.fetch(ticker, start, end) {
        Ok(frame) => frame,
        Err(e) => {
            log::warn!("price fetch for {ticker} failed: {e}");
            return Err(empty_candlestick(
                "No data returned for this ticker or date range.".to_string(),
            ));
        }
    };
    log::debug!("downloaded {} rows for {ticker}", frame.dates.len());

    let dataset = match to_dataset(&frame) {
        Ok(ds) => ds,
        Err(PipelineError::EmptyDataset) => {
            return Err(empty_candlestick(
                "No data returned for this ticker or date range.".to_string(),
            ));
        }
        Err(PipelineError::MissingColumn(column)) => {
            return Err(empty_candlestick(format!(
                "Missing '{}' data for {}.",
                column,
                ticker.trim().to_uppercase()
            )));
        }
    };

    let indices = filter_date_range(&dataset, DATE, start, end);
    if indices.is_empty() {
        return Err(empty_candlestick(
            "No data returned for this ticker or date range.".to_string(),
        ));
    }

    Ok(candlestick_chart(&dataset, &indices, ticker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    fn gap_row(country: &str, continent: &str, year: i64, pop: f64) -> Row {
        Row::from([
            (COUNTRY.to_string(), Value::String(country.into())),
            (CONTINENT.to_string(), Value::String(continent.into())),
            (YEAR.to_string(), Value::Integer(year)),
            ("Population".to_string(), Value::Float(pop)),
            (ISO_CODE.to_string(), Value::String("XXX".into())),
            (CENTROID_LAT.to_string(), Value::Float(10.0)),
            (CENTROID_LON.to_string(), Value::Float(20.0)),
        ])
    }

    fn gap_dataset() -> Dataset {
        let mut rows = Vec::new();
        // 18 Asian countries in 1952 so the ranking has to truncate.
        for i in 0..18 {
            rows.push(gap_row(&format!("Asia-{i:02}"), "Asia", 1952, 1000.0 * f64::from(i)));
        }
        rows.push(gap_row("Norway", "Europe", 1952, 500.0));
        rows.push(gap_row("Asia-00", "Asia", 1977, 9999.0));
        Dataset::from_rows(
            vec![
                COUNTRY.into(),
                CONTINENT.into(),
                YEAR.into(),
                "Population".into(),
                ISO_CODE.into(),
                CENTROID_LAT.into(),
                CENTROID_LON.into(),
            ],
            rows,
        )
    }

    #[test]
    fn bar_chart_keeps_top_15_sorted_descending() {
        let ds = gap_dataset();
        let asia = Value::String("Asia".into());
        let year = Value::Integer(1952);
        let spec = metric_bar_chart(&ds, "Population", &asia, &year);

        let SeriesData::Bar { categories, values } = &spec.data else {
            panic!("expected bar data");
        };
        assert_eq!(values.len(), TOP_N);
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
        // Every plotted country is from the requested continent and year:
        // the Europe row and the 1977 row never appear.
        assert!(!categories.contains(&"Norway".to_string()));
        assert_eq!(categories[0], "Asia-17");
        assert_eq!(
            spec.layout.title,
            "Country Population for Asia Continent in 1952"
        );
        assert!(spec.layout.show_values);
    }

    #[test]
    fn bar_chart_for_unknown_pair_is_a_titled_empty_chart() {
        let ds = gap_dataset();
        let continent = Value::String("Atlantis".into());
        let year = Value::Integer(1952);
        let spec = metric_bar_chart(&ds, "Population", &continent, &year);
        assert_eq!(spec.kind, ChartKind::Bar);
        assert!(spec.data.is_empty());
        assert!(spec.layout.title.contains("Atlantis"));
    }

    #[test]
    fn choropleth_includes_only_the_requested_year() {
        let ds = gap_dataset();
        let year = Value::Integer(1977);
        let spec = choropleth_chart(&ds, "Population", &year);
        let SeriesData::Choropleth { values, names, .. } = &spec.data else {
            panic!("expected choropleth data");
        };
        assert_eq!(names, &vec!["Asia-00".to_string()]);
        assert_eq!(values, &vec![9999.0]);
        assert_eq!(spec.layout.title, "Population Choropleth Map [1977]");
        assert_eq!(spec.layout.color_scale, Some(ColorScale::Diverging));
    }

    #[test]
    fn builders_are_deterministic() {
        let ds = gap_dataset();
        let asia = Value::String("Asia".into());
        let year = Value::Integer(1952);
        assert_eq!(
            metric_bar_chart(&ds, "Population", &asia, &year),
            metric_bar_chart(&ds, "Population", &asia, &year)
        );
        assert_eq!(
            choropleth_chart(&ds, "Population", &year),
            choropleth_chart(&ds, "Population", &year)
        );
        assert_eq!(
            histogram_chart(&ds, "Population"),
            histogram_chart(&ds, "Population")
        );
        assert_eq!(table_chart(&ds, Some(7)), table_chart(&ds, Some(7)));
    }

    #[test]
    fn histogram_skips_non_numeric_cells() {
        let ds = gap_dataset();
        let spec = histogram_chart(&ds, COUNTRY);
        let SeriesData::Histogram { values } = &spec.data else {
            panic!("expected histogram data");
        };
        assert!(values.is_empty());
    }

    #[test]
    fn table_chart_carries_all_rows_and_page_size() {
        let ds = gap_dataset();
        let spec = table_chart(&ds, Some(7));
        let SeriesData::Table { header, cells } = &spec.data else {
            panic!("expected table data");
        };
        assert_eq!(header[0], COUNTRY);
        assert_eq!(cells.len(), ds.len());
        assert_eq!(spec.layout.page_size, Some(7));
    }
}
