//! Core business logic abstractions

pub mod config;
pub mod converter;
pub mod loader;
pub mod log;
pub mod rate;
pub mod status;

// Re-export main types for cleaner imports
pub use converter::{ConversionState, Currency, Direction};
pub use loader::RateLoader;
pub use rate::{ExchangeRate, RateProvider};
pub use status::{LoadError, LoadStatus};
