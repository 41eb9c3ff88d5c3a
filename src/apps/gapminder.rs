use std::sync::Arc;

use eframe::egui;

use crate::binder::Binder;
use crate::chart::build::{choropleth_chart, metric_bar_chart, table_chart};
use crate::chart::spec::{ChartPanel, ChartSpec};
use crate::data::gapminder::{CONTINENT, GDP_PER_CAPITA, LIFE_EXPECTANCY, METRICS, POPULATION, YEAR};
use crate::data::model::{Dataset, Value};
use crate::ui::{render, widgets};

// Widget names, one pair of dropdowns per bar-chart tab plus the map pair.
const CONT_POP: &str = "cont_pop";
const YEAR_POP: &str = "year_pop";
const CONT_GDP: &str = "cont_gdp";
const YEAR_GDP: &str = "year_gdp";
const CONT_LIFE: &str = "cont_life_exp";
const YEAR_LIFE: &str = "year_life_exp";
const VAR_MAP: &str = "var_map";
const YEAR_MAP: &str = "year_map";

const DEFAULT_CONTINENT: &str = "Asia";
const DEFAULT_YEAR: i64 = 1952;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Tab {
    #[default]
    Dataset,
    Population,
    Gdp,
    LifeExpectancy,
    ChoroplethMap,
}

impl Tab {
    const ALL: [Tab; 5] = [
        Tab::Dataset,
        Tab::Population,
        Tab::Gdp,
        Tab::LifeExpectancy,
        Tab::ChoroplethMap,
    ];

    fn label(self) -> &'static str {
        match self {
            Tab::Dataset => "Dataset",
            Tab::Population => "Population",
            Tab::Gdp => "GDP Per Capita",
            Tab::LifeExpectancy => "Life Expectancy",
            Tab::ChoroplethMap => "Choropleth Map",
        }
    }
}

/// Multi-tab socioeconomic explorer over the bundled dataset.
pub struct GapminderApp {
    dataset: Arc<Dataset>,
    binder: Binder,
    tab: Tab,
    /// Static dataset grid, built once at startup.
    table: ChartSpec,
    table_page: usize,
    // Widget state, one slot per dropdown.
    cont_pop: Value,
    year_pop: Value,
    cont_gdp: Value,
    year_gdp: Value,
    cont_life: Value,
    year_life: Value,
    var_map: String,
    year_map: Value,
}

impl GapminderApp {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let table = table_chart(&dataset, None);
        let mut binder = Binder::new();

        // One independent binding per tab output; each bar tab reuses the
        // same ranked-bar builder with its own metric.
        for (output, metric, cont_input, year_input) in [
            ("population", POPULATION, CONT_POP, YEAR_POP),
            ("gdp", GDP_PER_CAPITA, CONT_GDP, YEAR_GDP),
            ("life_expectancy", LIFE_EXPECTANCY, CONT_LIFE, YEAR_LIFE),
        ] {
            let ds = dataset.clone();
            binder.bind(output, &[cont_input, year_input], &[], move |args| {
                ChartPanel::visible(metric_bar_chart(&ds, metric, &args[0], &args[1]))
            });
        }
        let ds = dataset.clone();
        binder.bind("choropleth_map", &[VAR_MAP, YEAR_MAP], &[], move |args| {
            ChartPanel::visible(choropleth_chart(&ds, &args[0].to_string(), &args[1]))
        });

        let continent = Value::String(DEFAULT_CONTINENT.to_string());
        let year = Value::Integer(DEFAULT_YEAR);
        for input in [CONT_POP, CONT_GDP, CONT_LIFE] {
            binder.set(input, continent.clone());
        }
        for input in [YEAR_POP, YEAR_GDP, YEAR_LIFE, YEAR_MAP] {
            binder.set(input, year.clone());
        }
        binder.set(VAR_MAP, Value::String(LIFE_EXPECTANCY.to_string()));
        binder.refresh_all();

        Self {
            dataset,
            binder,
            tab: Tab::default(),
            table,
            table_page: 0,
            cont_pop: continent.clone(),
            year_pop: year.clone(),
            cont_gdp: continent.clone(),
            year_gdp: year.clone(),
            cont_life: continent,
            year_life: year.clone(),
            var_map: LIFE_EXPECTANCY.to_string(),
            year_map: year,
        }
    }

    fn bar_tab(
        ui: &mut egui::Ui,
        binder: &mut Binder,
        dataset: &Dataset,
        output: &str,
        inputs: (&str, &str),
        continent: &mut Value,
        year: &mut Value,
    ) {
        ui.label("Continent");
        if let Some(options) = dataset.unique(CONTINENT) {
            widgets::value_dropdown(ui, inputs.0, continent, options);
        }
        ui.label("Year");
        if let Some(options) = dataset.unique(YEAR) {
            widgets::value_dropdown(ui, inputs.1, year, options);
        }
        binder.set(inputs.0, continent.clone());
        binder.set(inputs.1, year.clone());
        binder.flush();

        ui.separator();
        if let Some(panel) = binder.output(output) {
            if panel.visible {
                render::chart(ui, &panel.spec);
            }
        }
    }
}

impl eframe::App for GapminderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("title").show(ctx, |ui| {
            ui.vertical_centered(|ui: &mut egui::Ui| {
                ui.heading("Gapminder Dataset Analysis");
            });
            ui.add_space(4.0);
            ui.horizontal(|ui: &mut egui::Ui| {
                for tab in Tab::ALL {
                    if ui.selectable_label(self.tab == tab, tab.label()).clicked() {
                        self.tab = tab;
                    }
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::Dataset => {
                render::table(ui, &self.table, &mut self.table_page);
            }
            Tab::Population => Self::bar_tab(
                ui,
                &mut self.binder,
                &self.dataset,
                "population",
                (CONT_POP, YEAR_POP),
                &mut self.cont_pop,
                &mut self.year_pop,
            ),
            Tab::Gdp => Self::bar_tab(
                ui,
                &mut self.binder,
                &self.dataset,
                "gdp",
                (CONT_GDP, YEAR_GDP),
                &mut self.cont_gdp,
                &mut self.year_gdp,
            ),
            Tab::LifeExpectancy => Self::bar_tab(
                ui,
                &mut self.binder,
                &self.dataset,
                "life_expectancy",
                (CONT_LIFE, YEAR_LIFE),
                &mut self.cont_life,
                &mut self.year_life,
            ),
            Tab::ChoroplethMap => {
                ui.label("Variable");
                widgets::label_dropdown(ui, VAR_MAP, &mut self.var_map, &METRICS);
                ui.label("Year");
                if let Some(options) = self.dataset.unique(YEAR) {
                    widgets::value_dropdown(ui, YEAR_MAP, &mut self.year_map, options);
                }
                self.binder
                    .set(VAR_MAP, Value::String(self.var_map.clone()));
                self.binder.set(YEAR_MAP, self.year_map.clone());
                self.binder.flush();

                ui.separator();
                if let Some(panel) = self.binder.output("choropleth_map") {
                    if panel.visible {
                        render::chart(ui, &panel.spec);
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::spec::SeriesData;
    use crate::data::gapminder;

    #[test]
    fn startup_populates_every_tab_output() {
        let dataset = Arc::new(gapminder::load().unwrap());
        let app = GapminderApp::new(dataset);
        for output in ["population", "gdp", "life_expectancy", "choropleth_map"] {
            let panel = app.binder.output(output).expect(output);
            assert!(panel.visible);
        }
        let pop = app.binder.output("population").unwrap();
        assert!(pop
            .spec
            .layout
            .title
            .contains("for Asia Continent in 1952"));
        assert!(matches!(pop.spec.data, SeriesData::Bar { .. }));
    }
}
