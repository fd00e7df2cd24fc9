pub mod amortization_calculator;
pub mod currency_context;
pub mod settlement_calculator;

pub use amortization_calculator::AmortizationCalculator;
pub use currency_context::{CurrencyContext, RoundingMode};
pub use settlement_calculator::{SettlementCalculator, SettlementTolerance};
