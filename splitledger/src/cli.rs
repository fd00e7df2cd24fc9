use clap::{Parser, Subcommand, ValueEnum};
use splitledger_domain::{Money, Participant, Percent, RoundingMode};
use splitledger_parser::{parse_money_field, parse_percent_field, parse_term_field};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "splitledger",
    version,
    about = "Split shared bills and plan loan repayments"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Also write the report tables as one SVG file.
    #[arg(long, value_name = "svg_file", global = true)]
    pub svg: Option<PathBuf>,

    /// Decimal places used when showing amounts (overrides SPLITLEDGER_SCALE).
    #[arg(long, global = true)]
    pub scale: Option<u32>,

    /// half-up or half-even (overrides SPLITLEDGER_ROUNDING).
    #[arg(long, value_parser = rounding_arg, global = true)]
    pub rounding: Option<RoundingMode>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split a bill with tip and list who pays whom.
    Split {
        /// Bill before tip, e.g. 120 or $1,250.50.
        #[arg(long, value_parser = money_arg)]
        bill: Money,

        /// Tip percentage, e.g. 15 or 15%.
        #[arg(long, value_parser = percent_arg, default_value = "0")]
        tip: Percent,

        /// What one person already paid, as NAME=AMOUNT. Repeat per person.
        #[arg(
            long = "participant",
            value_name = "NAME=AMOUNT",
            value_parser = participant_arg,
            required = true
        )]
        participants: Vec<Participant>,
    },
    /// Fixed monthly installment and repayment schedule for a loan.
    Loan {
        #[arg(long, value_parser = money_arg)]
        principal: Money,

        /// Annual interest rate, e.g. 8 or 8%.
        #[arg(long, value_parser = percent_arg)]
        rate: Percent,

        /// Term in months, or with a unit such as "5 years".
        #[arg(long, value_parser = term_arg)]
        term: u32,

        /// Summarize the schedule per year instead of per month.
        #[arg(long)]
        yearly: bool,
    },
    /// Evaluate a sheet file with bill and/or loan lines.
    Sheet {
        path: PathBuf,

        /// Summarize loan schedules per year.
        #[arg(long)]
        yearly: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn money_arg(value: &str) -> Result<Money, String> {
    parse_money_field(value).map_err(|err| err.to_string())
}

fn percent_arg(value: &str) -> Result<Percent, String> {
    parse_percent_field(value).map_err(|err| err.to_string())
}

fn term_arg(value: &str) -> Result<u32, String> {
    parse_term_field(value).map_err(|err| err.to_string())
}

fn rounding_arg(value: &str) -> Result<RoundingMode, String> {
    value.parse()
}

fn participant_arg(value: &str) -> Result<Participant, String> {
    let Some((name, amount)) = value.rsplit_once('=') else {
        return Err(format!("expected NAME=AMOUNT, got '{value}'"));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing name in '{value}'"));
    }
    let amount = money_arg(amount)?;
    Ok(Participant::new(name, amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("Alex=60", "Alex", Money::from_i64(60))]
    #[case::spaced(" Mary Ann = $30.50 ", "Mary Ann", Money::new(3050, 2))]
    #[case::equals_in_name("a=b=5", "a=b", Money::from_i64(5))]
    fn parses_participant(#[case] input: &str, #[case] name: &str, #[case] amount: Money) {
        assert_eq!(participant_arg(input), Ok(Participant::new(name, amount)));
    }

    #[rstest]
    #[case::no_separator("Alex60")]
    #[case::no_name("=60")]
    #[case::negative("Alex=-60")]
    #[case::no_amount("Alex=")]
    fn rejects_bad_participant(#[case] input: &str) {
        assert!(participant_arg(input).is_err());
    }

    #[test]
    fn parses_split_command() {
        let cli = Cli::try_parse_from([
            "splitledger",
            "split",
            "--bill",
            "120",
            "--tip",
            "15%",
            "--participant",
            "Alex=70",
            "--participant",
            "Sara=68",
            "--format",
            "json",
        ])
        .expect("valid arguments");

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::Split {
                bill,
                tip,
                participants,
            } => {
                assert_eq!(bill, Money::from_i64(120));
                assert_eq!(tip, Percent::from_i64(15));
                assert_eq!(participants.len(), 2);
            }
            other => panic!("expected split, got {other:?}"),
        }
    }

    #[test]
    fn parses_loan_term_in_years() {
        let cli = Cli::try_parse_from([
            "splitledger",
            "--rounding",
            "half-even",
            "loan",
            "--principal",
            "20000",
            "--rate",
            "8",
            "--term",
            "5 years",
            "--yearly",
        ])
        .expect("valid arguments");

        assert_eq!(cli.rounding, Some(RoundingMode::HalfEven));
        match cli.command {
            Command::Loan { term, yearly, .. } => {
                assert_eq!(term, 60);
                assert!(yearly);
            }
            other => panic!("expected loan, got {other:?}"),
        }
    }

    #[rstest]
    #[case::split_without_participants(&["splitledger", "split", "--bill", "10"])]
    #[case::fractional_term(&[
        "splitledger", "loan", "--principal", "10", "--rate", "1", "--term", "2.5",
    ])]
    #[case::unknown_rounding(&["splitledger", "--rounding", "up", "sheet", "a.txt"])]
    fn rejects_invalid_arguments(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }
}
