//! Typed parsing of single form-field values.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag_no_case, take_while_m_n},
    character::complete::{char, digit1, one_of, space0},
    combinator::{map_res, opt, recognize},
    multi::many0,
};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use splitledger_domain::{Money, Percent};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Value is empty")]
    Empty,
    #[error("Negative values are not allowed")]
    Negative,
    #[error("'{0}' is not a number")]
    Malformed(String),
    #[error("Unexpected trailing input '{0}'")]
    Trailing(String),
    #[error("Term must be a whole number of months")]
    FractionalTerm,
    #[error("Term is out of range")]
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermUnit {
    Months,
    Years,
}

/// A loan term as written, before conversion to months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSpec {
    pub value: Decimal,
    pub unit: TermUnit,
}

impl TermSpec {
    /// Converts to whole months; `2.5 years` is 30 months, `2.5 months` is rejected.
    pub fn months(self) -> Result<u32, FieldError> {
        let months = match self.unit {
            TermUnit::Months => self.value,
            TermUnit::Years => self
                .value
                .checked_mul(Decimal::from(12))
                .ok_or(FieldError::OutOfRange)?,
        };
        if !months.fract().is_zero() {
            return Err(FieldError::FractionalTerm);
        }
        months.to_u32().ok_or(FieldError::OutOfRange)
    }
}

/// Parses an amount such as `120`, `$1,250.50` or `¥ 3000`.
pub fn parse_money_field(input: &str) -> Result<Money, FieldError> {
    complete_field(input, money)
}

/// Parses a percentage such as `15`, `15%` or `7.25 %`.
pub fn parse_percent_field(input: &str) -> Result<Percent, FieldError> {
    complete_field(input, percent)
}

/// Parses a loan term such as `60`, `60 months` or `5 years` into months.
pub fn parse_term_field(input: &str) -> Result<u32, FieldError> {
    complete_field(input, term_spec)?.months()
}

fn complete_field<'a, T>(
    input: &'a str,
    parser: fn(&'a str) -> IResult<&'a str, T>,
) -> Result<T, FieldError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Empty);
    }
    if trimmed.starts_with('-') {
        return Err(FieldError::Negative);
    }

    match parser(trimmed) {
        Ok((rest, value)) if rest.trim().is_empty() => Ok(value),
        Ok((rest, _)) => Err(FieldError::Trailing(rest.trim().to_string())),
        Err(_) => Err(FieldError::Malformed(trimmed.to_string())),
    }
}

fn grouped_digits(input: &str) -> IResult<&str, &str> {
    take_while_m_n(3, 3, |c: char| c.is_ascii_digit()).parse(input)
}

// 1,234.56 (thousands separators are optional)
pub(crate) fn number(input: &str) -> IResult<&str, Decimal> {
    map_res(
        recognize((
            digit1,
            many0((char(','), grouped_digits)),
            opt((char('.'), digit1)),
        )),
        |text: &str| Decimal::from_str(&text.replace(',', "")),
    )
    .parse(input)
}

fn currency_symbol(input: &str) -> IResult<&str, char> {
    one_of("$€£¥").parse(input)
}

pub(crate) fn money(input: &str) -> IResult<&str, Money> {
    (opt(currency_symbol), space0, number)
        .map(|(_, _, value)| Money::from_decimal(value))
        .parse(input)
}

pub(crate) fn percent(input: &str) -> IResult<&str, Percent> {
    (number, space0, opt(char('%')))
        .map(|(value, _, _)| Percent::new(value))
        .parse(input)
}

fn term_unit(input: &str) -> IResult<&str, TermUnit> {
    alt((
        alt((
            tag_no_case("months"),
            tag_no_case("month"),
            tag_no_case("mos"),
            tag_no_case("mo"),
            tag_no_case("m"),
        ))
        .map(|_| TermUnit::Months),
        alt((
            tag_no_case("years"),
            tag_no_case("year"),
            tag_no_case("yrs"),
            tag_no_case("yr"),
            tag_no_case("y"),
        ))
        .map(|_| TermUnit::Years),
    ))
    .parse(input)
}

pub(crate) fn term_spec(input: &str) -> IResult<&str, TermSpec> {
    (number, space0, opt(term_unit))
        .map(|(value, _, unit)| TermSpec {
            value,
            unit: unit.unwrap_or(TermUnit::Months),
        })
        .parse(input)
}
