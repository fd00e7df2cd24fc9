#![warn(clippy::uninlined_format_args)]

pub mod amortization_presenter;
pub mod settlement_presenter;
pub mod table;

pub use amortization_presenter::{AmortizationPresenter, ScheduleDetail};
pub use settlement_presenter::SettlementPresenter;
pub use table::{Alignment, TableBuilder, combine_svgs_vertically};

use splitledger_application::{ProcessingOutcome, SheetReport};
use splitledger_domain::{AmortizationError, CurrencyContext, SettlementError};

/// Rendered output of one or more tables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportView {
    pub text: String,
    pub svgs: Vec<String>,
}

impl ReportView {
    pub fn push_table(&mut self, text: String, svg: String) {
        self.push_block(&text);
        self.svgs.push(svg);
    }

    pub fn push_note(&mut self, note: &str) {
        self.push_block(note);
    }

    pub fn extend(&mut self, other: ReportView) {
        self.push_block(&other.text);
        self.svgs.extend(other.svgs);
    }

    fn push_block(&mut self, block: &str) {
        if block.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(block);
        if !block.ends_with('\n') {
            self.text.push('\n');
        }
    }

    /// All tables stacked into one SVG document.
    pub fn combined_svg(&self) -> Option<String> {
        let svgs: Vec<&str> = self.svgs.iter().map(String::as_str).collect();
        combine_svgs_vertically(&svgs)
    }
}

pub fn render_sheet_report(
    report: &SheetReport,
    currency: &CurrencyContext,
    detail: ScheduleDetail,
) -> ReportView {
    let mut view = ReportView::default();
    if let Some(split) = &report.split {
        view.extend(SettlementPresenter::render(split, currency));
    }
    if let Some(loan) = &report.loan {
        view.extend(AmortizationPresenter::render(loan, currency, detail));
    }
    view
}

pub fn format_settlement_error(error: &SettlementError, currency: &CurrencyContext) -> String {
    match error {
        SettlementError::Mismatch {
            total_paid,
            expected_total,
        } => format!(
            "{}: {}",
            splitledger_i18n::SETTLEMENT_CALCULATION_FAILED,
            splitledger_i18n::payment_mismatch(
                currency.format(*total_paid),
                currency.format(*expected_total)
            )
        ),
        SettlementError::InvalidInput { field, reason } => format!(
            "{}: {}",
            splitledger_i18n::SETTLEMENT_CALCULATION_FAILED,
            splitledger_i18n::invalid_input(field, reason)
        ),
    }
}

pub fn format_amortization_error(error: &AmortizationError) -> String {
    match error {
        AmortizationError::InvalidInput { field, reason } => format!(
            "{}: {}",
            splitledger_i18n::AMORTIZATION_CALCULATION_FAILED,
            splitledger_i18n::invalid_input(field, reason)
        ),
    }
}

/// Message for a failed outcome; `None` for `Success`.
pub fn format_processing_failure(
    outcome: &ProcessingOutcome,
    currency: &CurrencyContext,
) -> Option<String> {
    let message = match outcome {
        ProcessingOutcome::Success(_) => return None,
        ProcessingOutcome::Empty => splitledger_i18n::EMPTY_SHEET.to_string(),
        ProcessingOutcome::SyntaxError { line, detail } => {
            splitledger_i18n::syntax_error(*line, detail.clone()).to_string()
        }
        ProcessingOutcome::InvalidValue { line, detail } => {
            splitledger_i18n::invalid_value(*line, detail.clone()).to_string()
        }
        ProcessingOutcome::MissingStatement { keyword } => {
            splitledger_i18n::missing_statement(keyword)
        }
        ProcessingOutcome::DuplicateStatement { keyword, line } => {
            splitledger_i18n::duplicate_statement(keyword, *line)
        }
        ProcessingOutcome::SettlementFailed(err) => format_settlement_error(err, currency),
        ProcessingOutcome::AmortizationFailed(err) => format_amortization_error(err),
    };
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use splitledger_domain::Money;

    #[rstest]
    #[case::empty(ProcessingOutcome::Empty, "nothing to calculate")]
    #[case::syntax(
        ProcessingOutcome::SyntaxError { line: 3, detail: "Could not parse".to_string() },
        "line 3"
    )]
    #[case::invalid_value(
        ProcessingOutcome::InvalidValue { line: 7, detail: "Term is out of range".to_string() },
        "line 7"
    )]
    #[case::missing(ProcessingOutcome::MissingStatement { keyword: "bill" }, "`bill`")]
    #[case::duplicate(
        ProcessingOutcome::DuplicateStatement { keyword: "rate", line: 4 },
        "line 4"
    )]
    #[case::mismatch(
        ProcessingOutcome::SettlementFailed(SettlementError::Mismatch {
            total_paid: Money::from_i64(120),
            expected_total: Money::from_i64(138),
        }),
        "120.00 does not match the bill with tip 138.00"
    )]
    #[case::amortization(
        ProcessingOutcome::AmortizationFailed(AmortizationError::InvalidInput {
            field: "principal",
            reason: "must be greater than zero",
        }),
        "Invalid principal: must be greater than zero"
    )]
    fn formats_failures(#[case] outcome: ProcessingOutcome, #[case] expected: &str) {
        let message = format_processing_failure(&outcome, &CurrencyContext::cents())
            .expect("failure message");
        assert!(message.contains(expected), "message was {message:?}");
    }

    #[test]
    fn success_has_no_failure_message() {
        let outcome = ProcessingOutcome::Success(SheetReport::default());
        assert!(format_processing_failure(&outcome, &CurrencyContext::cents()).is_none());
    }

    #[test]
    fn report_view_separates_blocks_with_blank_line() {
        let mut view = ReportView::default();
        view.push_table("a\n".to_string(), "<svg width=\"1\" height=\"1\"></svg>".to_string());
        view.push_note("done");

        assert_eq!(view.text, "a\n\ndone\n");
        assert!(view.combined_svg().is_some());
    }
}
