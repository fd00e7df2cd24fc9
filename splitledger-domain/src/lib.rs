#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod services;

pub use error::{AmortizationError, CurrencyContextError, SettlementError};
pub use model::{
    Amortization, AmortizationEntry, LoanTerms, MemberBalance, Money, Participant, Percent,
    Settlement, Transaction, YearlySummary,
};
pub use services::{
    AmortizationCalculator, CurrencyContext, RoundingMode, SettlementCalculator,
    SettlementTolerance,
};
