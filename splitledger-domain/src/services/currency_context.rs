//! Display rounding for currency amounts.
//!
//! Engines keep full decimal precision; amounts are only quantized to the
//! currency's minor unit when they are shown to a person.

use crate::{error::CurrencyContextError, model::Money};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

const MAX_CURRENCY_SCALE: u32 = 22;

/// Rounding mode for display quantization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round half away from zero (e.g., 0.005 -> 0.01, -0.005 -> -0.01).
    #[default]
    HalfUp,
    /// Round half to nearest even number (banker's rounding).
    HalfEven,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

impl FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "half-up" | "half_up" | "halfup" => Ok(Self::HalfUp),
            "half-even" | "half_even" | "halfeven" | "bankers" => Ok(Self::HalfEven),
            other => Err(format!("unknown rounding mode '{other}'")),
        }
    }
}

/// Context for currency display.
///
/// # Example
/// ```
/// use splitledger_domain::{Money, services::{CurrencyContext, RoundingMode}};
///
/// let ctx = CurrencyContext::new(2, RoundingMode::HalfUp).unwrap();
/// assert_eq!(ctx.format(Money::new(46005, 3)), "46.01");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrencyContext {
    scale: u32,
    rounding_mode: RoundingMode,
}

impl CurrencyContext {
    pub fn new(scale: u32, rounding_mode: RoundingMode) -> Result<Self, CurrencyContextError> {
        if scale > MAX_CURRENCY_SCALE {
            return Err(CurrencyContextError::UnsupportedScale {
                scale,
                max_supported: MAX_CURRENCY_SCALE,
            });
        }
        Ok(Self {
            scale,
            rounding_mode,
        })
    }

    /// Two decimal places, half-up.
    pub fn cents() -> Self {
        Self {
            scale: 2,
            rounding_mode: RoundingMode::HalfUp,
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn rounding_mode(&self) -> RoundingMode {
        self.rounding_mode
    }

    pub fn round(&self, amount: Money) -> Money {
        let rounded = amount
            .as_decimal()
            .round_dp_with_strategy(self.scale, self.rounding_mode.strategy());
        Money::from_decimal(normalize_zero(rounded))
    }

    /// Rounds and pads to exactly `scale` fraction digits.
    pub fn format(&self, amount: Money) -> String {
        let mut rounded = self.round(amount).as_decimal();
        rounded.rescale(self.scale);
        rounded.to_string()
    }

    /// Like [`format`](Self::format) with an explicit `+` on positive values.
    pub fn format_signed(&self, amount: Money) -> String {
        let formatted = self.format(amount);
        if self.round(amount) > Money::ZERO {
            format!("+{formatted}")
        } else {
            formatted
        }
    }
}

impl Default for CurrencyContext {
    fn default() -> Self {
        Self::cents()
    }
}

// -0.004 rounds to -0.00; show it as 0.00.
fn normalize_zero(value: Decimal) -> Decimal {
    if value.is_zero() {
        Decimal::ZERO
    } else {
        value
    }
}
