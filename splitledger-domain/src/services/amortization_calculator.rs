use crate::{
    error::AmortizationError,
    model::{Amortization, AmortizationEntry, LoanTerms, Money},
};
use rust_decimal::Decimal;

/// Balances below one cent after the final period are rounding drift.
fn terminal_drift() -> Money {
    Money::new(1, 2)
}

/// Fixed-installment (EMI) loan schedule generator
#[derive(Clone, Copy, Debug, Default)]
pub struct AmortizationCalculator;

impl AmortizationCalculator {
    /// Calculate the periodic payment and the full schedule for `terms`.
    ///
    /// The final period's balance is clamped to zero instead of adjusting the
    /// last payment, so totals may drift from `principal + interest` by a
    /// sub-cent amount.
    pub fn calculate(&self, terms: LoanTerms) -> Result<Amortization, AmortizationError> {
        validate_terms(&terms)?;

        let rate = terms.monthly_rate();
        let payment = periodic_payment(terms.principal, rate, terms.term_months)?;

        tracing::debug!(
            principal = %terms.principal,
            annual_rate = %terms.annual_rate,
            term_months = terms.term_months,
            monthly_rate = %rate,
            payment = %payment,
            "Amortization calculation started"
        );

        let drift = terminal_drift();
        let mut schedule = Vec::with_capacity(terms.term_months as usize);
        let mut remaining = terms.principal;
        let mut total_interest = Money::ZERO;

        for period in 1..=terms.term_months {
            let interest_portion = remaining
                .checked_mul(rate)
                .ok_or_else(|| overflow("principal"))?;
            let principal_portion = payment
                .checked_sub(interest_portion)
                .ok_or_else(|| overflow("principal"))?;
            remaining = remaining
                .checked_sub(principal_portion)
                .ok_or_else(|| overflow("principal"))?
                .max(Money::ZERO);
            if period == terms.term_months && remaining < drift {
                remaining = Money::ZERO;
            }
            total_interest = total_interest
                .checked_add(interest_portion)
                .ok_or_else(|| overflow("principal"))?;

            schedule.push(AmortizationEntry {
                period,
                principal_portion,
                interest_portion,
                payment,
                remaining_balance: remaining,
            });
        }

        let total_payment = payment
            .checked_mul(Decimal::from(terms.term_months))
            .ok_or_else(|| overflow("principal"))?;

        tracing::debug!(
            term_months = terms.term_months,
            total_interest = %total_interest,
            total_payment = %total_payment,
            "Amortization calculation finished"
        );

        Ok(Amortization {
            payment,
            total_interest,
            total_payment,
            schedule,
        })
    }
}

fn validate_terms(terms: &LoanTerms) -> Result<(), AmortizationError> {
    if terms.principal <= Money::ZERO {
        return Err(AmortizationError::InvalidInput {
            field: "principal",
            reason: "must be greater than zero",
        });
    }
    if terms.annual_rate.is_negative() {
        return Err(AmortizationError::InvalidInput {
            field: "annual_rate",
            reason: "must not be negative",
        });
    }
    if terms.term_months == 0 {
        return Err(AmortizationError::InvalidInput {
            field: "term_months",
            reason: "must be greater than zero",
        });
    }
    Ok(())
}

/// `principal * r * (1+r)^n / ((1+r)^n - 1)`, or `principal / n` when `r == 0`.
fn periodic_payment(
    principal: Money,
    rate: Decimal,
    periods: u32,
) -> Result<Money, AmortizationError> {
    if rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let growth = compound(Decimal::ONE + rate, periods).ok_or_else(|| overflow("term_months"))?;
    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        return Err(AmortizationError::InvalidInput {
            field: "annual_rate",
            reason: "too small to compound over the term",
        });
    }

    rate.checked_mul(growth)
        .and_then(|factor| factor.checked_div(denominator))
        .and_then(|factor| principal.checked_mul(factor))
        .ok_or_else(|| overflow("principal"))
}

fn overflow(field: &'static str) -> AmortizationError {
    AmortizationError::InvalidInput {
        field,
        reason: "exceeds the supported numeric range",
    }
}

fn compound(base: Decimal, periods: u32) -> Option<Decimal> {
    (0..periods).try_fold(Decimal::ONE, |acc, _| acc.checked_mul(base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Percent;
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;

    #[fixture]
    fn calculator() -> AmortizationCalculator {
        AmortizationCalculator
    }

    fn terms(principal: Decimal, rate: Decimal, months: u32) -> LoanTerms {
        LoanTerms::new(Money::from_decimal(principal), Percent::new(rate), months)
    }

    fn cents(money: Money) -> Decimal {
        money.as_decimal().round_dp(2)
    }

    #[rstest]
    #[case::car_loan(dec!(20000), dec!(8), 60, dec!(405.53))]
    #[case::mortgage(dec!(100000), dec!(6), 360, dec!(599.55))]
    #[case::one_year(dec!(10000), dec!(12), 12, dec!(888.49))]
    #[case::zero_rate(dec!(1200), dec!(0), 12, dec!(100))]
    fn payment_matches_closed_form(
        calculator: AmortizationCalculator,
        #[case] principal: Decimal,
        #[case] rate: Decimal,
        #[case] months: u32,
        #[case] expected: Decimal,
    ) {
        let result = calculator
            .calculate(terms(principal, rate, months))
            .expect("valid terms");

        assert_eq!(cents(result.payment), expected);
    }

    #[rstest]
    fn car_loan_schedule_invariants(calculator: AmortizationCalculator) {
        let result = calculator
            .calculate(terms(dec!(20000), dec!(8), 60))
            .expect("valid terms");

        assert_eq!(result.schedule.len(), 60);
        let last = result.schedule.last().expect("non-empty schedule");
        assert_eq!(last.period, 60);
        assert!(last.remaining_balance.is_zero());

        let principal_paid: Money = result.schedule.iter().map(|e| e.principal_portion).sum();
        assert!((principal_paid - Money::from_i64(20000)).abs() < Money::new(1, 2));

        assert_eq!(cents(result.total_interest), dec!(4331.67));
        assert_eq!(cents(result.total_payment), dec!(24331.67));
        assert_eq!(
            cents(result.schedule[0].interest_portion),
            dec!(133.33),
            "first month interest is 20000 * 8% / 12"
        );

        for (idx, entry) in result.schedule.iter().enumerate() {
            assert_eq!(entry.period as usize, idx + 1);
            let split = entry.principal_portion + entry.interest_portion;
            assert!((split - entry.payment).abs() < Money::new(1, 10));
            assert!(!entry.remaining_balance.is_negative());
        }
    }

    #[rstest]
    fn zero_rate_splits_principal_evenly(calculator: AmortizationCalculator) {
        let result = calculator
            .calculate(terms(dec!(1200), dec!(0), 12))
            .expect("valid terms");

        assert_eq!(result.schedule.len(), 12);
        for (idx, entry) in result.schedule.iter().enumerate() {
            assert!(entry.interest_portion.is_zero());
            assert_eq!(entry.principal_portion, Money::from_i64(100));
            let expected_remaining = 1200 - 100 * (idx as i64 + 1);
            assert_eq!(entry.remaining_balance, Money::from_i64(expected_remaining));
        }
        assert!(result.total_interest.is_zero());
        assert_eq!(result.total_payment, Money::from_i64(1200));
    }

    #[rstest]
    fn zero_rate_uneven_division_clamps_final_balance(calculator: AmortizationCalculator) {
        let result = calculator
            .calculate(terms(dec!(1000), dec!(0), 3))
            .expect("valid terms");

        let last = result.schedule.last().expect("non-empty schedule");
        assert!(last.remaining_balance.is_zero());
    }

    #[rstest]
    fn totals_agree_within_rounding(calculator: AmortizationCalculator) {
        let result = calculator
            .calculate(terms(dec!(10000000), dec!(50), 600))
            .expect("valid terms");

        let principal_plus_interest = Money::from_i64(10_000_000) + result.total_interest;
        assert!((result.total_payment - principal_plus_interest).abs() < Money::new(1, 2));
        assert!(
            result
                .schedule
                .last()
                .expect("non-empty schedule")
                .remaining_balance
                .is_zero()
        );
    }

    #[rstest]
    #[case::zero_principal(dec!(0), dec!(5), 12, "principal")]
    #[case::negative_principal(dec!(-100), dec!(5), 12, "principal")]
    #[case::negative_rate(dec!(100), dec!(-1), 12, "annual_rate")]
    #[case::zero_term(dec!(100), dec!(5), 0, "term_months")]
    #[case::overflowing_growth(dec!(100), dec!(100000), 600, "term_months")]
    #[case::overflowing_schedule(dec!(10000000000000000000000000000), dec!(50), 600, "principal")]
    #[case::overflowing_total_payment(dec!(79228162514264337593543950335), dec!(12), 12, "principal")]
    fn rejects_invalid_terms(
        calculator: AmortizationCalculator,
        #[case] principal: Decimal,
        #[case] rate: Decimal,
        #[case] months: u32,
        #[case] expected_field: &str,
    ) {
        let result = calculator.calculate(terms(principal, rate, months));

        match result {
            Err(AmortizationError::InvalidInput { field, .. }) => {
                assert_eq!(field, expected_field)
            }
            other => panic!("expected invalid input error, got {other:?}"),
        }
    }

    #[rstest]
    fn repeated_calls_are_identical(calculator: AmortizationCalculator) {
        let loan = terms(dec!(20000), dec!(8), 60);
        assert_eq!(calculator.calculate(loan), calculator.calculate(loan));
    }
}
