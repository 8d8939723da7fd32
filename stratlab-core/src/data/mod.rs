//! Market data layer: provider trait plus the Yahoo Finance and synthetic
//! implementations.

pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use provider::{bars_for_period, DataError, DataProvider};
pub use synthetic::SyntheticProvider;
pub use yahoo::YahooProvider;
