//! Live price-history provider: fetch, column-shape normalization, and
//! validation of the OHLC field set.

pub mod frame;
pub mod provider;
pub mod yahoo;
