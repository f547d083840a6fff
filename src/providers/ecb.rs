use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::snapshot::SnapshotWriter;
use crate::core::currency::{CurrencyRateProvider, PIVOT_CURRENCY, RateObservation};
use crate::core::error::{ExchangeError, Result};

/// Key of the only series returned for a single-currency query.
const SERIES_KEY: &str = "0:0:0:0:0";
/// Key of the first (and, with `lastNObservations=1`, only) observation.
const OBSERVATION_KEY: &str = "0";

// EcbProvider implementation for CurrencyRateProvider
pub struct EcbProvider {
    base_url: String,
    timeout: Option<Duration>,
    snapshot: Option<SnapshotWriter>,
}

impl EcbProvider {
    pub fn new(base_url: &str) -> Self {
        EcbProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
            snapshot: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_snapshot(mut self, snapshot: Option<SnapshotWriter>) -> Self {
        self.snapshot = snapshot;
        self
    }

    fn url_for(&self, currency: &str) -> String {
        format!(
            "{}/service/data/EXR/D.{}.{}.SP00.A?lastNObservations=1",
            self.base_url, currency, PIVOT_CURRENCY
        )
    }

    fn client(&self) -> reqwest::Result<reqwest::Client> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("exr/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

#[derive(Debug, Deserialize)]
struct EcbDataResponse {
    #[serde(rename = "dataSets", default)]
    data_sets: Vec<EcbDataSet>,
    structure: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct EcbDataSet {
    #[serde(default)]
    series: HashMap<String, EcbSeries>,
}

#[derive(Debug, Deserialize)]
struct EcbSeries {
    #[serde(default)]
    observations: HashMap<String, Vec<serde_json::Value>>,
}

/// Extracts `dataSets[0].series["0:0:0:0:0"].observations["0"][0]` and the
/// matching observation period, if the structure section carries one.
pub fn parse_observation(currency: &str, body: &str) -> Result<RateObservation> {
    let malformed = |reason: &str| ExchangeError::MalformedResponse {
        currency: currency.to_string(),
        reason: reason.to_string(),
    };

    let data: EcbDataResponse =
        serde_json::from_str(body).map_err(|source| ExchangeError::Json {
            currency: currency.to_string(),
            source,
        })?;

    let rate = data
        .data_sets
        .first()
        .ok_or_else(|| malformed("no data set"))?
        .series
        .get(SERIES_KEY)
        .ok_or_else(|| malformed("missing series 0:0:0:0:0"))?
        .observations
        .get(OBSERVATION_KEY)
        .ok_or_else(|| malformed("missing observation 0"))?
        .first()
        .ok_or_else(|| malformed("empty observation"))?
        .as_f64()
        .ok_or_else(|| malformed("observation value is not a number"))?;

    let date = data
        .structure
        .as_ref()
        .and_then(|s| s.pointer("/dimensions/observation/0/values/0/id"))
        .and_then(|id| id.as_str())
        .and_then(|id| NaiveDate::parse_from_str(id, "%Y-%m-%d").ok());

    Ok(RateObservation {
        currency: currency.to_string(),
        rate,
        date,
    })
}

#[async_trait]
impl CurrencyRateProvider for EcbProvider {
    #[instrument(
        name = "EcbRateFetch",
        skip(self),
        fields(currency = %currency)
    )]
    async fn get_eur_rate(&self, currency: &str) -> Result<RateObservation> {
        let currency = currency.to_uppercase();
        let transport = |source| ExchangeError::Transport {
            currency: currency.clone(),
            source,
        };

        let url = self.url_for(&currency);
        debug!("Requesting exchange rate from {}", url);

        let client = self.client().map_err(transport)?;
        let response = client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        debug!("status: {}", status.as_u16());
        if !status.is_success() {
            return Err(ExchangeError::Status {
                currency: currency.clone(),
                status,
            });
        }

        let text = response.text().await.map_err(transport)?;

        if let Some(snapshot) = &self.snapshot
            && let Err(e) = snapshot.write(&currency, &text).await
        {
            warn!(error = %e, "Failed to write response snapshot for {}", currency);
        }

        let observation = parse_observation(&currency, &text)?;
        debug!(rate = observation.rate, date = ?observation.date, "Parsed observation");
        Ok(observation)
    }
}
