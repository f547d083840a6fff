use super::ui;
use crate::core::conversion::{self, INVALID_AMOUNT_MESSAGE};
use crate::core::{CurrencyRateProvider, RateResolver};
use tracing::debug;

/// Converts `amount` from one currency into another and prints the rounded
/// result, or a placeholder when the conversion is not possible.
pub async fn run<P: CurrencyRateProvider>(
    resolver: &RateResolver<P>,
    amount: &str,
    from: &str,
    to: &str,
    verbose: bool,
) -> Option<f64> {
    let value = match conversion::parse_amount(amount) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "Rejected amount");
            println!(
                "{}",
                ui::style_text(INVALID_AMOUNT_MESSAGE, ui::StyleType::Error)
            );
            return None;
        }
    };

    let result = convert_amount(resolver, value, from, to, verbose).await;

    let rendered = conversion::format_result(result);
    if result.is_some() {
        println!(
            "{} {} = {} {}",
            value,
            from.to_uppercase(),
            ui::style_text(&rendered, ui::StyleType::Result),
            to.to_uppercase()
        );
    } else {
        println!("{}", ui::style_text(&rendered, ui::StyleType::Error));
    }
    result
}

pub async fn convert_amount<P: CurrencyRateProvider>(
    resolver: &RateResolver<P>,
    amount: f64,
    from: &str,
    to: &str,
    verbose: bool,
) -> Option<f64> {
    let spinner = ui::new_spinner("Fetching exchange rates");
    let rate = resolver.exchange_rate_reported(from, to, verbose).await;
    spinner.finish_and_clear();

    let rate = rate?;
    match conversion::convert(amount, rate, from) {
        Ok(result) => Some(result),
        Err(e) => {
            eprintln!("{}", e.console_message());
            None
        }
    }
}
