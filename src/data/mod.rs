//! Data layer: core types, loading, and filtering.
//!
//! ```text
//!  .csv file / bundled csv / price fetch
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Dataset   │  Vec<Row>, column index, unique values
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  criteria → row indices (+ top-N ranking)
//!   └──────────┘
//! ```

pub mod filter;
pub mod gapminder;
pub mod loader;
pub mod model;
