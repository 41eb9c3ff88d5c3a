use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use chrono::NaiveDate;
use eframe::egui;
use egui_extras::DatePickerButton;

use crate::binder::Binder;
use crate::chart::build::fetch_and_build;
use crate::chart::spec::{ChartKind, ChartPanel, ChartSpec, Theme};
use crate::data::model::Value;
use crate::market::provider::PriceProvider;
use crate::ui::render;

// Widget names of the reactive binding.
const SUBMIT: &str = "submit";
const TICKER: &str = "ticker";
const START_DATE: &str = "start_date";
const END_DATE: &str = "end_date";
const OUTPUT: &str = "candlestick";

const DEFAULT_TICKER: &str = "AAPL";

fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default()
}

fn default_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Submission state machine
// ---------------------------------------------------------------------------

/// Lifecycle of the fetch-driven chart container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Before the first submission: container hidden, no network call.
    #[default]
    Idle,
    /// A submission is in flight. Transient: entered and resolved within a
    /// single invocation, never observable across frames.
    Loading,
    Rendered,
    Failed,
}

/// Run one submission through fetch → normalize → validate → build.
///
/// With zero submissions the provider is not consulted at all and the panel
/// stays hidden. Any later submission lands in `Rendered` or `Failed`; both
/// set the container visible so the outcome reaches the user.
pub fn run_submission(
    provider: &dyn PriceProvider,
    submissions: i64,
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> (ChartPanel, Phase) {
    if submissions <= 0 {
        let spec = ChartSpec::empty_themed(ChartKind::Candlestick, "", Theme::Dark);
        return (ChartPanel::hidden(spec), Phase::Idle);
    }
    match fetch_and_build(provider, ticker, start, end) {
        Ok(spec) => (ChartPanel::visible(spec), Phase::Rendered),
        Err(error_chart) => (ChartPanel::visible(error_chart), Phase::Failed),
    }
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

/// The candlestick dashboard: ticker + date range in, one chart out,
/// recomputed only when the submit button fires.
pub struct StocksApp {
    binder: Binder,
    phase: Rc<RefCell<Phase>>,
    ticker: String,
    start: NaiveDate,
    end: NaiveDate,
    submissions: i64,
}

impl StocksApp {
    pub fn new(provider: Arc<dyn PriceProvider>) -> Self {
        let phase = Rc::new(RefCell::new(Phase::Idle));
        let mut binder = Binder::new();

        let phase_slot = phase.clone();
        binder.bind(
            OUTPUT,
            &[SUBMIT],
            &[TICKER, START_DATE, END_DATE],
            move |args| {
                let submissions = args[0].as_i64().unwrap_or(0);
                let ticker = args[1].to_string();
                let start = args[2].as_date().unwrap_or_else(default_start);
                let end = args[3].as_date().unwrap_or_else(default_end);

                *phase_slot.borrow_mut() = Phase::Loading;
                let (panel, phase) =
                    run_submission(provider.as_ref(), submissions, &ticker, start, end);
                *phase_slot.borrow_mut() = phase;
                panel
            },
        );

        binder.set(SUBMIT, Value::Integer(0));
        binder.set(TICKER, Value::String(DEFAULT_TICKER.to_string()));
        binder.set(START_DATE, Value::Date(default_start()));
        binder.set(END_DATE, Value::Date(default_end()));
        binder.refresh_all();

        Self {
            binder,
            phase,
            ticker: DEFAULT_TICKER.to_string(),
            start: default_start(),
            end: default_end(),
            submissions: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }
}

impl eframe::App for StocksApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        egui::TopBottomPanel::top("title").show(ctx, |ui| {
            ui.vertical_centered(|ui: &mut egui::Ui| {
                ui.heading("Stock Candlestick Chart Tool");
            });
        });

        // ---- Left control panel ----
        egui::SidePanel::left("controls")
            .default_width(260.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label("Enter Stock Ticker");
                ui.text_edit_singleline(&mut self.ticker);
                ui.add_space(12.0);

                ui.label("Select Start Date");
                ui.add(DatePickerButton::new(&mut self.start).id_salt("start_date"));
                ui.add_space(12.0);

                ui.label("Select End Date");
                ui.add(DatePickerButton::new(&mut self.end).id_salt("end_date"));
                ui.add_space(16.0);

                let submitted = ui.button("Submit").clicked();

                // Text and date edits are state inputs: recorded, not
                // triggering. Only the submit click fires the binding.
                self.binder
                    .set(TICKER, Value::String(self.ticker.clone()));
                self.binder.set(START_DATE, Value::Date(self.start));
                self.binder.set(END_DATE, Value::Date(self.end));
                if submitted {
                    self.submissions += 1;
                    self.binder.set(SUBMIT, Value::Integer(self.submissions));
                }
            });

        self.binder.flush();

        // ---- Chart container ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(panel) = self.binder.output(OUTPUT) {
                if panel.visible {
                    render::chart(ui, &panel.spec);
                }
            }
        });
    }
}
