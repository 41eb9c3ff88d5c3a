use std::collections::BTreeSet;

use eframe::egui::{ComboBox, Ui};

use crate::data::model::Value;

// ---------------------------------------------------------------------------
// Input widgets shared by the dashboards
// ---------------------------------------------------------------------------

/// Dropdown over a column's unique values (continents, years, …).
/// Returns `true` when the selection changed this frame.
pub fn value_dropdown(
    ui: &mut Ui,
    id: &str,
    current: &mut Value,
    options: &BTreeSet<Value>,
) -> bool {
    let mut changed = false;
    ComboBox::from_id_salt(id.to_string())
        .selected_text(current.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                if ui
                    .selectable_label(current == option, option.to_string())
                    .clicked()
                {
                    *current = option.clone();
                    changed = true;
                }
            }
        });
    changed
}

/// Dropdown over a fixed list of labels (metric pickers).
pub fn label_dropdown(ui: &mut Ui, id: &str, current: &mut String, options: &[&str]) -> bool {
    let mut changed = false;
    ComboBox::from_id_salt(id.to_string())
        .selected_text(current.clone())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                if ui.selectable_label(current == option, *option).clicked() {
                    *current = option.to_string();
                    changed = true;
                }
            }
        });
    changed
}
