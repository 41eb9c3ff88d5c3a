//! Three interactive data dashboards sharing one reactive core.
//!
//! The shape is the same everywhere: a dataset provider loads or fetches a
//! table, a filter stage selects rows from widget values, a chart builder
//! turns the rows into a declarative [`chart::spec::ChartSpec`], and the
//! [`binder::Binder`] re-runs exactly the bindings whose inputs changed.
//! Failures along the way become titled empty charts, never crashes.

pub mod apps;
pub mod binder;
pub mod chart;
pub mod color;
pub mod data;
pub mod market;
pub mod ui;
