//! The three dashboards. Each one wires default widget values and its
//! reactive bindings in `new()`, then drives the binder from the frame loop.

pub mod gapminder;
pub mod housing;
pub mod stocks;
