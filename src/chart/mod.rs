//! Declarative chart descriptions and the builders that produce them from
//! filtered rows. Nothing here knows how to draw; see `ui::render`.

pub mod build;
pub mod spec;
