//! Core business logic abstractions

pub mod config;
pub mod conversion;
pub mod currency;
pub mod error;
pub mod log;
pub mod registry;
pub mod resolver;

// Re-export main types for cleaner imports
pub use currency::{CurrencyRateProvider, PIVOT_CURRENCY, RateObservation};
pub use error::{ErrorKind, ExchangeError};
pub use registry::CurrencyRegistry;
pub use resolver::RateResolver;
