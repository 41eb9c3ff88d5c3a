use std::sync::Arc;

use eframe::egui;

use crate::binder::Binder;
use crate::chart::build::{histogram_chart, table_chart};
use crate::chart::spec::{ChartPanel, ChartSpec};
use crate::data::model::{Dataset, Value};
use crate::ui::{render, widgets};

const FEATURE: &str = "feature";
const OUTPUT: &str = "histogram";

/// Rows per page of the dataset grid.
const PAGE_SIZE: usize = 7;

/// Tabular/histogram explorer over the housing dataset: the full table up
/// top, one histogram below driven by a feature dropdown.
pub struct HousingApp {
    binder: Binder,
    table: ChartSpec,
    table_page: usize,
    feature: String,
    columns: Vec<String>,
}

impl HousingApp {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let table = table_chart(&dataset, Some(PAGE_SIZE));
        let columns = dataset.column_names.clone();
        let feature = columns.first().cloned().unwrap_or_default();

        let mut binder = Binder::new();
        let ds = dataset.clone();
        binder.bind(OUTPUT, &[FEATURE], &[], move |args| {
            ChartPanel::visible(histogram_chart(&ds, &args[0].to_string()))
        });
        binder.set(FEATURE, Value::String(feature.clone()));
        binder.refresh_all();

        Self {
            binder,
            table,
            table_page: 0,
            feature,
            columns,
        }
    }
}

impl eframe::App for HousingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label("Dashboard");
            ui.add_space(4.0);
            render::table(ui, &self.table, &mut self.table_page);
            ui.separator();

            ui.horizontal(|ui: &mut egui::Ui| {
                ui.label("Select Feature:");
                let options: Vec<&str> = self.columns.iter().map(String::as_str).collect();
                widgets::label_dropdown(ui, FEATURE, &mut self.feature, &options);
            });
            self.binder
                .set(FEATURE, Value::String(self.feature.clone()));
            self.binder.flush();

            if let Some(panel) = self.binder.output(OUTPUT) {
                if panel.visible {
                    render::chart(ui, &panel.spec);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::spec::SeriesData;
    use crate::data::model::Row;

    fn dataset() -> Arc<Dataset> {
        let rows = (0..10)
            .map(|i| {
                Row::from([
                    ("MedInc".to_string(), Value::Float(f64::from(i))),
                    ("HouseAge".to_string(), Value::Float(f64::from(i * 2))),
                ])
            })
            .collect();
        Arc::new(Dataset::from_rows(
            vec!["MedInc".into(), "HouseAge".into()],
            rows,
        ))
    }

    #[test]
    fn default_feature_is_the_first_column() {
        let app = HousingApp::new(dataset());
        assert_eq!(app.feature, "MedInc");
        let panel = app.binder.output(OUTPUT).unwrap();
        assert_eq!(panel.spec.layout.title, "Histogram of MedInc");
        let SeriesData::Histogram { values } = &panel.spec.data else {
            panic!("expected histogram data");
        };
        assert_eq!(values.len(), 10);
    }

    #[test]
    fn changing_the_feature_recomputes_the_histogram() {
        let mut app = HousingApp::new(dataset());
        app.binder
            .set(FEATURE, Value::String("HouseAge".to_string()));
        app.binder.flush();
        let panel = app.binder.output(OUTPUT).unwrap();
        assert_eq!(panel.spec.layout.title, "Histogram of HouseAge");
    }
}
