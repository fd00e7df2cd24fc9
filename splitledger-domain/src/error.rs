use crate::model::Money;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// Contributions do not add up to the bill with tip.
    #[error("Contributions total {total_paid} but the bill with tip is {expected_total}")]
    Mismatch {
        total_paid: Money,
        expected_total: Money,
    },
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmortizationError {
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CurrencyContextError {
    #[error("Unsupported scale {scale} (max {max_supported})")]
    UnsupportedScale { scale: u32, max_supported: u32 },
}
