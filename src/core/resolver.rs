//! Cross rate computation over EUR-relative legs.

use super::currency::{CurrencyRateProvider, PIVOT_CURRENCY};
use super::error::{ErrorKind, ExchangeError, Result};
use super::registry::CurrencyRegistry;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

pub struct RateResolver<P: CurrencyRateProvider> {
    registry: Arc<CurrencyRegistry>,
    provider: P,
}

impl<P: CurrencyRateProvider> RateResolver<P> {
    pub fn new(registry: Arc<CurrencyRegistry>, provider: P) -> Self {
        RateResolver { registry, provider }
    }

    /// Returns the rate `numerator / denominator`, i.e. how many units of
    /// `numerator` one unit of `denominator` is worth.
    ///
    /// Both codes are validated against the registry before any request is
    /// made. Identity pairs never hit the network, pairs involving EUR need a
    /// single leg and any other pair needs two.
    #[instrument(name = "ExchangeRate", skip(self))]
    pub async fn exchange_rate(&self, numerator: &str, denominator: &str) -> Result<f64> {
        let numerator = numerator.trim().to_uppercase();
        let denominator = denominator.trim().to_uppercase();

        for code in [&numerator, &denominator] {
            if !self.registry.contains(code) {
                return Err(ExchangeError::UnknownCurrency(code.clone()));
            }
        }

        if numerator == denominator {
            debug!("Identity conversion, no request needed");
            return Ok(1.0);
        }

        if denominator == PIVOT_CURRENCY {
            return Ok(self.provider.get_eur_rate(&numerator).await?.rate);
        }

        if numerator == PIVOT_CURRENCY {
            let leg = self.provider.get_eur_rate(&denominator).await?;
            return checked_ratio(1.0, leg.rate, &denominator);
        }

        let (num_leg, den_leg) = futures::try_join!(
            self.provider.get_eur_rate(&numerator),
            self.provider.get_eur_rate(&denominator)
        )?;
        debug!(
            numerator = num_leg.rate,
            denominator = den_leg.rate,
            "Combining legs through {}",
            PIVOT_CURRENCY
        );
        checked_ratio(num_leg.rate, den_leg.rate, &denominator)
    }

    /// Console rendering of [`exchange_rate`](Self::exchange_rate): every
    /// failure collapses to `None` after its message is printed to stderr.
    /// An unknown currency is only reported when `verbose` is set.
    pub async fn exchange_rate_reported(
        &self,
        numerator: &str,
        denominator: &str,
        verbose: bool,
    ) -> Option<f64> {
        match self.exchange_rate(numerator, denominator).await {
            Ok(rate) => Some(rate),
            Err(e) => {
                warn!(error = %e, kind = ?e.kind(), "Conversion not possible");
                if verbose || e.kind() != ErrorKind::InvalidCurrency {
                    eprintln!("{}", e.console_message());
                }
                None
            }
        }
    }
}

fn checked_ratio(numerator: f64, denominator: f64, denominator_code: &str) -> Result<f64> {
    let ratio = numerator / denominator;
    if denominator == 0.0 || !ratio.is_finite() {
        return Err(ExchangeError::DivisionByZero {
            currency: denominator_code.to_string(),
        });
    }
    Ok(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::RateObservation;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const REGISTRY: &str =
        "Euro\tEUR\nUS Dollar\tUSD\nSwiss Franc\tCHF\nYen\tJPY\nZero\tZZZ\nGone\tXXX\n";

    struct MockLegProvider {
        rates: HashMap<&'static str, f64>,
        call_count: AtomicUsize,
    }

    impl MockLegProvider {
        fn new() -> Self {
            Self {
                rates: HashMap::from([
                    ("USD", 1.0823),
                    ("CHF", 0.9612),
                    ("JPY", 170.21),
                    ("ZZZ", 0.0),
                ]),
                call_count: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl<'a> CurrencyRateProvider for &'a MockLegProvider {
        async fn get_eur_rate(&self, currency: &str) -> Result<RateObservation> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            match self.rates.get(currency) {
                Some(rate) => Ok(RateObservation {
                    currency: currency.to_string(),
                    rate: *rate,
                    date: None,
                }),
                None => Err(ExchangeError::MalformedResponse {
                    currency: currency.to_string(),
                    reason: "missing series 0:0:0:0:0".to_string(),
                }),
            }
        }
    }

    fn resolver(provider: &MockLegProvider) -> RateResolver<&MockLegProvider> {
        let registry = Arc::new(CurrencyRegistry::parse(REGISTRY).unwrap());
        RateResolver::new(registry, provider)
    }

    #[tokio::test]
    async fn test_identity_needs_no_request() {
        let provider = MockLegProvider::new();
        let resolver = resolver(&provider);

        for code in ["EUR", "USD", "CHF", "JPY"] {
            assert_eq!(resolver.exchange_rate(code, code).await.unwrap(), 1.0);
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_codes_are_normalized() {
        let provider = MockLegProvider::new();
        let resolver = resolver(&provider);

        assert_eq!(resolver.exchange_rate("usd", "Usd").await.unwrap(), 1.0);
        assert_eq!(resolver.exchange_rate("usd", "eur").await.unwrap(), 1.0823);
    }

    #[tokio::test]
    async fn test_eur_denominator_is_single_leg() {
        let provider = MockLegProvider::new();
        let resolver = resolver(&provider);

        let rate = resolver.exchange_rate("USD", "EUR").await.unwrap();
        assert_eq!(rate, 1.0823);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_eur_numerator_is_reciprocal() {
        let provider = MockLegProvider::new();
        let resolver = resolver(&provider);

        let inverse = resolver.exchange_rate("EUR", "CHF").await.unwrap();
        assert_eq!(provider.calls(), 1);
        assert_eq!(inverse, 1.0 / 0.9612);

        let direct = resolver.exchange_rate("CHF", "EUR").await.unwrap();
        assert!((inverse - 1.0 / direct).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_cross_rate_uses_both_legs() {
        let provider = MockLegProvider::new();
        let resolver = resolver(&provider);

        let rate = resolver.exchange_rate("USD", "CHF").await.unwrap();
        assert_eq!(rate, 1.0823 / 0.9612);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_round_trip_is_one() {
        let provider = MockLegProvider::new();
        let resolver = resolver(&provider);

        let forward = resolver.exchange_rate("USD", "JPY").await.unwrap();
        let backward = resolver.exchange_rate("JPY", "USD").await.unwrap();
        assert!((forward * backward - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unknown_currency_short_circuits() {
        let provider = MockLegProvider::new();
        let resolver = resolver(&provider);

        let err = resolver.exchange_rate("SOL", "GAL").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCurrency);
        assert!(matches!(err, ExchangeError::UnknownCurrency(ref c) if c == "SOL"));

        let err = resolver.exchange_rate("USD", "GAL").await.unwrap_err();
        assert!(matches!(err, ExchangeError::UnknownCurrency(ref c) if c == "GAL"));

        assert_eq!(provider.calls(), 0);
        assert_eq!(resolver.exchange_rate_reported("SOL", "GAL", false).await, None);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_zero_denominator_leg() {
        let provider = MockLegProvider::new();
        let resolver = resolver(&provider);

        let err = resolver.exchange_rate("USD", "ZZZ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Arithmetic);

        let err = resolver.exchange_rate("EUR", "ZZZ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Arithmetic);

        assert_eq!(resolver.exchange_rate_reported("USD", "ZZZ", true).await, None);
    }

    #[tokio::test]
    async fn test_zero_numerator_leg_is_a_valid_rate() {
        let provider = MockLegProvider::new();
        let resolver = resolver(&provider);

        assert_eq!(resolver.exchange_rate("ZZZ", "USD").await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_retrieval_failure_collapses_to_none() {
        let provider = MockLegProvider::new();
        let resolver = resolver(&provider);

        let err = resolver.exchange_rate("XXX", "USD").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(resolver.exchange_rate_reported("XXX", "USD", true).await, None);
    }
}
