pub mod convert;
pub mod currencies;
pub mod rate;
pub mod setup;
pub mod ui;
