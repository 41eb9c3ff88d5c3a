use chrono::{Datelike, NaiveDate};
use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Plot, PlotPoint, Points, Text,
};

use crate::chart::spec::{ChartSpec, SeriesData};
use crate::color::{diverging, generate_palette};

// ---------------------------------------------------------------------------
// ChartSpec → egui
// ---------------------------------------------------------------------------

/// Draw a chart spec into the given panel. Tables go through [`table`]
/// because pagination needs a page cursor.
pub fn chart(ui: &mut Ui, spec: &ChartSpec) {
    heading(ui, spec);
    if spec.data.is_empty() {
        return;
    }
    match &spec.data {
        SeriesData::Histogram { values } => histogram(ui, spec, values),
        SeriesData::Bar { categories, values } => bar(ui, spec, categories, values),
        SeriesData::Candlestick {
            dates,
            open,
            high,
            low,
            close,
        } => candlestick(ui, spec, dates, open, high, low, close),
        SeriesData::Choropleth {
            names,
            values,
            centroids,
            ..
        } => choropleth(ui, spec, names, values, centroids),
        SeriesData::Table { .. } | SeriesData::Empty => {}
    }
}

fn heading(ui: &mut Ui, spec: &ChartSpec) {
    if !spec.layout.title.is_empty() {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.heading(&spec.layout.title);
        });
        ui.add_space(4.0);
    }
}

macro_rules! labeled_plot {
    ($id:expr, $spec:expr) => {{
        let mut plot = Plot::new($id)
            .allow_boxed_zoom(true)
            .allow_drag(true)
            .allow_scroll(true)
            .allow_zoom(true);
        if let Some(x) = &$spec.layout.x_label {
            plot = plot.x_axis_label(x.clone());
        }
        if let Some(y) = &$spec.layout.y_label {
            plot = plot.y_axis_label(y.clone());
        }
        plot
    }};
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Bucketization lives here, not in the spec: Sturges' rule over the value
/// range.
fn histogram(ui: &mut Ui, spec: &ChartSpec, values: &[f64]) {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let n_bins = ((values.len() as f64).log2().ceil() as usize + 1).max(1);
    let width = ((max - min) / n_bins as f64).max(f64::EPSILON);

    let mut counts = vec![0usize; n_bins];
    for &v in values {
        let bin = (((v - min) / width) as usize).min(n_bins - 1);
        counts[bin] += 1;
    }

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            Bar::new(min + (i as f64 + 0.5) * width, count as f64)
                .width(width * 0.95)
                .fill(Color32::LIGHT_BLUE)
        })
        .collect();

    labeled_plot!("histogram", spec).show(ui, |plot_ui| {
        plot_ui.bar_chart(BarChart::new(bars));
    });
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

fn bar(ui: &mut Ui, spec: &ChartSpec, categories: &[String], values: &[f64]) {
    let palette = generate_palette(categories.len());
    let bars: Vec<Bar> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            Bar::new(i as f64, v)
                .width(0.7)
                .name(&categories[i])
                .fill(palette[i % palette.len()])
        })
        .collect();

    let labels: Vec<String> = categories.to_vec();
    let formatter = move |mark: GridMark, _range: &std::ops::RangeInclusive<f64>| {
        let i = mark.value.round() as i64;
        if (mark.value - i as f64).abs() > 1e-6 || i < 0 {
            return String::new();
        }
        labels.get(i as usize).cloned().unwrap_or_default()
    };

    let show_values = spec.layout.show_values;
    let value_labels: Vec<(f64, f64, String)> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v, format_value(v)))
        .collect();

    labeled_plot!("bar", spec)
        .x_axis_formatter(formatter)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
            if show_values {
                for (x, y, label) in value_labels {
                    plot_ui.text(
                        Text::new(PlotPoint::new(x, y), RichText::new(label).small())
                            .anchor(Align2::CENTER_BOTTOM),
                    );
                }
            }
        });
}

fn format_value(v: f64) -> String {
    if v >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if v >= 1_000.0 {
        format!("{:.1}k", v / 1_000.0)
    } else if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}

// ---------------------------------------------------------------------------
// Candlestick
// ---------------------------------------------------------------------------

const BULLISH: Color32 = Color32::from_rgb(0, 180, 90);
const BEARISH: Color32 = Color32::from_rgb(220, 60, 60);

fn candlestick(
    ui: &mut Ui,
    spec: &ChartSpec,
    dates: &[NaiveDate],
    open: &[f64],
    high: &[f64],
    low: &[f64],
    close: &[f64],
) {
    let boxes: Vec<BoxElem> = dates
        .iter()
        .enumerate()
        .map(|(i, date)| {
            let (o, h, l, c) = (open[i], high[i], low[i], close[i]);
            let color = if c >= o { BULLISH } else { BEARISH };
            let body_low = o.min(c);
            let body_high = o.max(c);
            BoxElem::new(
                f64::from(date.num_days_from_ce()),
                BoxSpread::new(l, body_low, (o + c) / 2.0, body_high, h),
            )
            .name(date.to_string())
            .fill(color)
            .stroke(Stroke::new(1.0, color))
            .whisker_width(0.0)
            .box_width(0.6)
        })
        .collect();

    let formatter = |mark: GridMark, _range: &std::ops::RangeInclusive<f64>| {
        NaiveDate::from_num_days_from_ce_opt(mark.value as i32)
            .map(|d| d.to_string())
            .unwrap_or_default()
    };

    labeled_plot!("candlestick", spec)
        .x_axis_formatter(formatter)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(boxes));
        });
}

// ---------------------------------------------------------------------------
// Choropleth (centroid markers)
// ---------------------------------------------------------------------------

/// World view drawn as one marker per country centroid, colored on the
/// diverging ramp. Longitude on x, latitude on y.
fn choropleth(
    ui: &mut Ui,
    spec: &ChartSpec,
    names: &[String],
    values: &[f64],
    centroids: &[(f64, f64)],
) {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = (max - min).max(f64::EPSILON);

    labeled_plot!("choropleth", spec)
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-60.0)
        .include_y(80.0)
        .show(ui, |plot_ui| {
            for ((&(lat, lon), &value), name) in centroids.iter().zip(values).zip(names) {
                let t = (value - min) / range;
                plot_ui.points(
                    Points::new(vec![[lon, lat]])
                        .radius(5.0)
                        .color(diverging(t))
                        .name(format!("{name}: {}", format_value(value))),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Render a table spec as a grid. With a page size set, `page` is the
/// zero-based page cursor and prev/next controls are shown.
pub fn table(ui: &mut Ui, spec: &ChartSpec, page: &mut usize) {
    let SeriesData::Table { header, cells } = &spec.data else {
        return;
    };
    heading(ui, spec);

    let page_size = spec.layout.page_size.unwrap_or(cells.len()).max(1);
    let n_pages = cells.len().div_ceil(page_size).max(1);
    *page = (*page).min(n_pages - 1);
    let start = *page * page_size;
    let visible = &cells[start..(start + page_size).min(cells.len())];

    // Paginated tables size to their page; unpaginated ones scroll.
    egui_extras::TableBuilder::new(ui)
        .striped(true)
        .vscroll(spec.layout.page_size.is_none())
        .auto_shrink([false, spec.layout.page_size.is_some()])
        .columns(egui_extras::Column::auto().resizable(true), header.len())
        .header(20.0, |mut row| {
            for name in header {
                row.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for cells_row in visible {
                body.row(18.0, |mut row| {
                    for cell in cells_row {
                        row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            }
        });

    if spec.layout.page_size.is_some() && n_pages > 1 {
        ui.add_space(4.0);
        ui.horizontal(|ui: &mut Ui| {
            if ui.small_button("◀").clicked() && *page > 0 {
                *page -= 1;
            }
            ui.label(format!("page {}/{n_pages}", *page + 1));
            if ui.small_button("▶").clicked() && *page + 1 < n_pages {
                *page += 1;
            }
        });
    }
}
