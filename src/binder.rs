//! The reactive binding table: named widget inputs drive chart outputs.
//!
//! Each binding maps `output name → (builder, trigger inputs, state inputs)`.
//! Whenever a trigger's value changes, the builder runs with the current
//! snapshot of its declared inputs and its result replaces the output.
//! Bindings are independent of each other: no output feeds another binding.

use std::collections::{BTreeMap, BTreeSet};

use crate::chart::spec::ChartPanel;
use crate::data::model::Value;

type BuildFn = Box<dyn Fn(&[Value]) -> ChartPanel>;

struct Binding {
    output: String,
    /// Inputs whose change re-invokes the builder.
    triggers: Vec<String>,
    /// Inputs read at invocation time without triggering (submit-button
    /// semantics: the button fires, the text fields are just read).
    state: Vec<String>,
    build: BuildFn,
}

impl Binding {
    fn watches(&self, input: &str) -> bool {
        self.triggers.iter().any(|t| t == input)
    }
}

/// Registration table plus the current widget snapshot and computed outputs.
/// Everything runs on the UI thread; one `flush` completes before the next
/// starts, so concurrent submissions serialize and the last write wins.
#[derive(Default)]
pub struct Binder {
    bindings: Vec<Binding>,
    values: BTreeMap<String, Value>,
    outputs: BTreeMap<String, ChartPanel>,
    dirty: BTreeSet<String>,
}

impl Binder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding. Dispatch across bindings follows registration
    /// order, but nothing may rely on that.
    pub fn bind(
        &mut self,
        output: &str,
        triggers: &[&str],
        state: &[&str],
        build: impl Fn(&[Value]) -> ChartPanel + 'static,
    ) {
        self.bindings.push(Binding {
            output: output.to_string(),
            triggers: triggers.iter().map(|s| s.to_string()).collect(),
            state: state.iter().map(|s| s.to_string()).collect(),
            build: Box::new(build),
        });
    }

    /// Record a widget value. Setting an input to its current value is not a
    /// change and triggers nothing.
    pub fn set(&mut self, input: &str, value: Value) {
        if self.values.get(input) == Some(&value) {
            return;
        }
        self.values.insert(input.to_string(), value);
        self.dirty.insert(input.to_string());
    }

    /// Current value of an input, if any widget has reported one.
    pub fn value(&self, input: &str) -> Option<&Value> {
        self.values.get(input)
    }

    /// Invoke every binding once with the current (default) values. Called
    /// at startup so each output exists before the first user interaction.
    pub fn refresh_all(&mut self) {
        for i in 0..self.bindings.len() {
            self.invoke(i);
        }
        self.dirty.clear();
    }

    /// Re-invoke every binding watching a changed input, then clear the
    /// change set. Invocation order is registration order.
    pub fn flush(&mut self) {
        if self.dirty.is_empty() {
            return;
        }
        let dirty = std::mem::take(&mut self.dirty);
        for i in 0..self.bindings.len() {
            if dirty.iter().any(|input| self.bindings[i].watches(input)) {
                self.invoke(i);
            }
        }
    }

    /// The latest artifact computed for an output.
    pub fn output(&self, name: &str) -> Option<&ChartPanel> {
        self.outputs.get(name)
    }

    fn invoke(&mut self, index: usize) {
        let binding = &self.bindings[index];
        let args: Vec<Value> = binding
            .triggers
            .iter()
            .chain(&binding.state)
            .map(|name| self.values.get(name).cloned().unwrap_or(Value::Null))
            .collect();
        let panel = (binding.build)(&args);
        let output = binding.output.clone();
        self.outputs.insert(output, panel);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::chart::spec::{ChartKind, ChartPanel, ChartSpec};

    fn panel(title: String) -> ChartPanel {
        ChartPanel::visible(ChartSpec::empty(ChartKind::Bar, title))
    }

    fn counting_binder() -> (Binder, Rc<Cell<usize>>, Rc<Cell<usize>>) {
        let mut binder = Binder::new();
        let a_calls = Rc::new(Cell::new(0));
        let b_calls = Rc::new(Cell::new(0));

        let calls = a_calls.clone();
        binder.bind("chart_a", &["continent", "year"], &[], move |args| {
            calls.set(calls.get() + 1);
            panel(format!("{}/{}", args[0], args[1]))
        });
        let calls = b_calls.clone();
        binder.bind("chart_b", &["year"], &[], move |args| {
            calls.set(calls.get() + 1);
            panel(args[0].to_string())
        });

        binder.set("continent", Value::String("Asia".into()));
        binder.set("year", Value::Integer(1952));
        binder.refresh_all();
        (binder, a_calls, b_calls)
    }

    #[test]
    fn refresh_all_populates_every_output() {
        let (binder, a_calls, b_calls) = counting_binder();
        assert_eq!(a_calls.get(), 1);
        assert_eq!(b_calls.get(), 1);
        assert_eq!(
            binder.output("chart_a").unwrap().spec.layout.title,
            "Asia/1952"
        );
        assert_eq!(binder.output("chart_b").unwrap().spec.layout.title, "1952");
    }

    #[test]
    fn only_bindings_watching_a_changed_input_recompute() {
        let (mut binder, a_calls, b_calls) = counting_binder();
        binder.set("continent", Value::String("Europe".into()));
        binder.flush();
        assert_eq!(a_calls.get(), 2);
        assert_eq!(b_calls.get(), 1);
        assert_eq!(
            binder.output("chart_a").unwrap().spec.layout.title,
            "Europe/1952"
        );
    }

    #[test]
    fn setting_the_same_value_is_not_a_change() {
        let (mut binder, a_calls, _) = counting_binder();
        binder.set("continent", Value::String("Asia".into()));
        binder.flush();
        assert_eq!(a_calls.get(), 1);
    }

    #[test]
    fn last_write_wins_within_one_flush() {
        let (mut binder, a_calls, _) = counting_binder();
        binder.set("continent", Value::String("Africa".into()));
        binder.set("continent", Value::String("Oceania".into()));
        binder.flush();
        assert_eq!(a_calls.get(), 2);
        assert_eq!(
            binder.output("chart_a").unwrap().spec.layout.title,
            "Oceania/1952"
        );
    }

    #[test]
    fn state_inputs_are_read_but_never_trigger() {
        let mut binder = Binder::new();
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        binder.bind("chart", &["submit"], &["ticker"], move |args| {
            c.set(c.get() + 1);
            panel(format!("{}:{}", args[0], args[1]))
        });
        binder.set("submit", Value::Integer(0));
        binder.set("ticker", Value::String("AAPL".into()));
        binder.refresh_all();
        assert_eq!(calls.get(), 1);

        // Editing the ticker alone does not fire the binding.
        binder.set("ticker", Value::String("MSFT".into()));
        binder.flush();
        assert_eq!(calls.get(), 1);

        // The next submission reads the current ticker snapshot.
        binder.set("submit", Value::Integer(1));
        binder.flush();
        assert_eq!(calls.get(), 2);
        assert_eq!(binder.output("chart").unwrap().spec.layout.title, "1:MSFT");
    }

    #[test]
    fn undeclared_inputs_arrive_as_null() {
        let mut binder = Binder::new();
        binder.bind("chart", &["missing"], &[], |args| panel(args[0].to_string()));
        binder.refresh_all();
        assert_eq!(binder.output("chart").unwrap().spec.layout.title, "<null>");
    }
}
