//! Currency rate abstractions

use super::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Every rate is quoted against this currency by the data service.
pub const PIVOT_CURRENCY: &str = "EUR";

/// Units of `currency` per one EUR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateObservation {
    pub currency: String,
    pub rate: f64,
    pub date: Option<NaiveDate>,
}

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    /// Fetches the latest EUR-relative rate for a single currency (one "leg").
    async fn get_eur_rate(&self, currency: &str) -> Result<RateObservation>;
}
