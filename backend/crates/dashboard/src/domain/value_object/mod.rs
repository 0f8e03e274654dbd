//! Value Object Module

pub mod ticker;

pub use ticker::{Ticker, TickerError};
