use super::ui;
use crate::core::conversion::RESULT_PLACEHOLDER;
use crate::core::{CurrencyRateProvider, RateResolver};

/// Prints the rate `numerator / denominator`.
pub async fn run<P: CurrencyRateProvider>(
    resolver: &RateResolver<P>,
    numerator: &str,
    denominator: &str,
    verbose: bool,
) -> Option<f64> {
    let spinner = ui::new_spinner("Fetching exchange rates");
    let rate = resolver
        .exchange_rate_reported(numerator, denominator, verbose)
        .await;
    spinner.finish_and_clear();

    let label = format!(
        "{}/{}",
        numerator.to_uppercase(),
        denominator.to_uppercase()
    );
    match rate {
        Some(rate) => println!(
            "{} {}",
            ui::style_text(&label, ui::StyleType::Subtle),
            ui::style_text(&rate.to_string(), ui::StyleType::Result)
        ),
        None => println!(
            "{} {}",
            ui::style_text(&label, ui::StyleType::Subtle),
            ui::style_text(RESULT_PLACEHOLDER, ui::StyleType::Error)
        ),
    }
    rate
}
