#![warn(clippy::uninlined_format_args)]

mod field;
mod i18n;

pub use field::{
    FieldError, TermSpec, TermUnit, parse_money_field, parse_percent_field, parse_term_field,
};

use field::{money, percent, term_spec};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_till, take_until, take_while1},
    character::complete::{char, multispace1, satisfy},
    combinator::{not, opt, recognize},
    multi::many0,
    sequence::{delimited, terminated},
};
use splitledger_domain::{Money, Percent};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
    /// `bill 120`
    Bill(Money),
    /// `tip 15%`
    Tip(Percent),
    /// `Alex paid 60`
    Contribution { name: &'a str, amount: Money },
    /// `loan 20000`
    Loan(Money),
    /// `rate 8%`
    Rate(Percent),
    /// `term 5 years`, stored in months
    Term(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatementWithLine<'a> {
    pub line: usize,
    pub statement: Statement<'a>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet<'a> {
    pub statements: Vec<StatementWithLine<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Syntax error at line {line}: {detail}")]
    SyntaxError { line: usize, detail: String },
    #[error("Invalid value at line {line}: {source}")]
    InvalidValue {
        line: usize,
        #[source]
        source: FieldError,
    },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::SyntaxError { line, .. } | ParseError::InvalidValue { line, .. } => *line,
        }
    }
}

// Terms are validated after the line parses so the error keeps its reason.
enum Line<'a> {
    Statement(Statement<'a>),
    Term(field::TermSpec),
}

fn sp(input: &str) -> IResult<&str, &str> {
    fn fullwidth_space(input: &str) -> IResult<&str, &str> {
        take_while1(|c: char| c == '\u{3000}')(input)
    }

    fn comment(input: &str) -> IResult<&str, &str> {
        delimited(tag("/*"), take_until("*/"), tag("*/")).parse(input)
    }

    fn line_comment(input: &str) -> IResult<&str, &str> {
        recognize((tag("//"), take_till(|c| c == '\n'))).parse(input)
    }

    recognize(many0(alt((
        multispace1,
        fullwidth_space,
        comment,
        line_comment,
    ))))
    .parse(input)
}

// Optional `:` or `=` between a keyword and its value.
fn separator(input: &str) -> IResult<&str, ()> {
    (sp, opt(alt((char(':'), char('=')))), sp)
        .map(|_| ())
        .parse(input)
}

// Keywords must end at a word boundary so `Billy paid 5` is a contribution.
fn keyword<'a>(
    word: &'static str,
) -> impl Parser<&'a str, Output = &'a str, Error = nom::error::Error<&'a str>> {
    terminated(tag_no_case(word), not(satisfy(|c: char| c.is_alphanumeric())))
}

fn name(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_while1(|c: char| c != '"'), char('"')),
        take_while1(|c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '\'')),
    ))
    .parse(input)
}

fn paid(input: &str) -> IResult<&str, &str> {
    alt((tag_no_case("paid"), tag("払った"), tag("はらった"))).parse(input)
}

fn bill_line(input: &str) -> IResult<&str, Line<'_>> {
    (keyword("bill"), separator, money)
        .map(|(_, _, amount)| Line::Statement(Statement::Bill(amount)))
        .parse(input)
}

fn tip_line(input: &str) -> IResult<&str, Line<'_>> {
    (keyword("tip"), separator, percent)
        .map(|(_, _, tip)| Line::Statement(Statement::Tip(tip)))
        .parse(input)
}

fn loan_line(input: &str) -> IResult<&str, Line<'_>> {
    (
        alt((keyword("loan"), keyword("principal"))),
        separator,
        money,
    )
        .map(|(_, _, amount)| Line::Statement(Statement::Loan(amount)))
        .parse(input)
}

fn rate_line(input: &str) -> IResult<&str, Line<'_>> {
    (
        alt((keyword("rate"), keyword("interest"))),
        separator,
        percent,
    )
        .map(|(_, _, rate)| Line::Statement(Statement::Rate(rate)))
        .parse(input)
}

fn term_line(input: &str) -> IResult<&str, Line<'_>> {
    (keyword("term"), separator, term_spec)
        .map(|(_, _, term)| Line::Term(term))
        .parse(input)
}

// {name} paid {amount}
fn contribution_line(input: &str) -> IResult<&str, Line<'_>> {
    (name, sp, paid, sp, money)
        .map(|(name, _, _, _, amount)| Line::Statement(Statement::Contribution { name, amount }))
        .parse(input)
}

fn line(input: &str) -> IResult<&str, Line<'_>> {
    alt((
        bill_line,
        tip_line,
        loan_line,
        rate_line,
        term_line,
        contribution_line,
    ))
    .parse(input)
}

fn line_with_sp(input: &str) -> IResult<&str, Line<'_>> {
    (sp, line, sp).map(|(_, line, _)| line).parse(input)
}

/// Parse a whole sheet, one statement per line.
pub fn parse_sheet(input: &str) -> Result<Sheet<'_>, ParseError> {
    let mut statements = Vec::new();

    for (idx, text) in input.lines().enumerate() {
        let line_number = idx + 1;
        let (rest, _) = sp(text).map_err(|e| ParseError::SyntaxError {
            line: line_number,
            detail: i18n::syntax_error_detail(e),
        })?;
        if rest.trim().is_empty() {
            continue;
        }

        let (rest, parsed) = line_with_sp(rest).map_err(|e| ParseError::SyntaxError {
            line: line_number,
            detail: i18n::syntax_error_detail(e),
        })?;
        if !rest.trim().is_empty() {
            return Err(ParseError::SyntaxError {
                line: line_number,
                detail: i18n::syntax_error_unparsed_detail(rest.trim()),
            });
        }

        let statement = match parsed {
            Line::Statement(statement) => statement,
            Line::Term(term) => {
                let months = term.months().map_err(|source| ParseError::InvalidValue {
                    line: line_number,
                    source,
                })?;
                Statement::Term(months)
            }
        };

        statements.push(StatementWithLine {
            line: line_number,
            statement,
        });
    }

    Ok(Sheet { statements })
}
