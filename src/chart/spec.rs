use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ChartSpec – declarative chart description, independent of the renderer
// ---------------------------------------------------------------------------

/// The kind of chart a spec describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Table,
    Histogram,
    Bar,
    Candlestick,
    Choropleth,
}

/// Color treatment requested by a spec. The renderer owns the actual ramps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorScale {
    /// One distinct hue per category (bar charts).
    Categorical,
    /// Diverging low→high ramp (choropleth).
    Diverging,
}

/// Visual theme of the surrounding figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// The data series a chart plots. `Empty` is the error-path payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeriesData {
    Table {
        header: Vec<String>,
        /// Row-major cells, already formatted for display.
        cells: Vec<Vec<String>>,
    },
    Histogram {
        values: Vec<f64>,
    },
    Bar {
        categories: Vec<String>,
        values: Vec<f64>,
    },
    Candlestick {
        dates: Vec<NaiveDate>,
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
    },
    Choropleth {
        /// ISO-3166 alpha-3 location codes.
        locations: Vec<String>,
        /// Display names for hover text.
        names: Vec<String>,
        values: Vec<f64>,
        /// (latitude, longitude) centroids, aligned with `locations`.
        centroids: Vec<(f64, f64)>,
    },
    Empty,
}

impl SeriesData {
    pub fn is_empty(&self) -> bool {
        match self {
            SeriesData::Table { cells, .. } => cells.is_empty(),
            SeriesData::Histogram { values } => values.is_empty(),
            SeriesData::Bar { categories, .. } => categories.is_empty(),
            SeriesData::Candlestick { dates, .. } => dates.is_empty(),
            SeriesData::Choropleth { locations, .. } => locations.is_empty(),
            SeriesData::Empty => true,
        }
    }
}

/// Layout metadata shared by all chart kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Layout {
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub theme: Theme,
    pub color_scale: Option<ColorScale>,
    /// Draw the value on top of each bar.
    pub show_values: bool,
    /// Candlestick range slider; off for the stock chart.
    pub range_slider: bool,
    /// Renderer-side pagination for tables.
    pub page_size: Option<usize>,
}

/// A complete chart description: what to draw and how to dress it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub data: SeriesData,
    pub layout: Layout,
}

impl ChartSpec {
    /// Degenerate spec used when a request cannot be satisfied: keeps the
    /// requested kind, carries no series, and says why in the title.
    pub fn empty(kind: ChartKind, title: impl Into<String>) -> Self {
        ChartSpec {
            kind,
            data: SeriesData::Empty,
            layout: Layout {
                title: title.into(),
                ..Layout::default()
            },
        }
    }

    /// Error-chart variant with a theme, for the dark stock figure.
    pub fn empty_themed(kind: ChartKind, title: impl Into<String>, theme: Theme) -> Self {
        let mut spec = Self::empty(kind, title);
        spec.layout.theme = theme;
        spec
    }
}

// ---------------------------------------------------------------------------
// ChartPanel – what a reactive binding produces
// ---------------------------------------------------------------------------

/// A chart spec plus the visibility of its container. Hidden panels exist
/// only before the first submission of the fetch-driven dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPanel {
    pub spec: ChartSpec,
    pub visible: bool,
}

impl ChartPanel {
    pub fn visible(spec: ChartSpec) -> Self {
        ChartPanel { spec, visible: true }
    }

    pub fn hidden(spec: ChartSpec) -> Self {
        ChartPanel { spec, visible: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_spec_keeps_kind_and_title() {
        let spec = ChartSpec::empty(ChartKind::Candlestick, "No data");
        assert_eq!(spec.kind, ChartKind::Candlestick);
        assert!(spec.data.is_empty());
        assert_eq!(spec.layout.title, "No data");
    }

    #[test]
    fn specs_are_value_equal() {
        let a = ChartSpec::empty_themed(ChartKind::Bar, "t", Theme::Dark);
        let b = ChartSpec::empty_themed(ChartKind::Bar, "t", Theme::Dark);
        assert_eq!(a, b);
    }
}
