use crate::model::{LoanReport, SheetReport, SplitReport, SplitRequest};
use splitledger_domain::{
    AmortizationCalculator, AmortizationError, LoanTerms, Money, Participant, Percent,
    SettlementCalculator, SettlementError,
};
use splitledger_parser::{ParseError, Sheet, Statement, parse_sheet};

const BILL: &str = "bill";
const TIP: &str = "tip";
const PAID: &str = "paid";
const LOAN: &str = "loan";
const RATE: &str = "rate";
const TERM: &str = "term";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingOutcome {
    Success(SheetReport),
    /// No bill and no loan lines.
    Empty,
    SyntaxError {
        line: usize,
        detail: String,
    },
    InvalidValue {
        line: usize,
        detail: String,
    },
    MissingStatement {
        keyword: &'static str,
    },
    DuplicateStatement {
        keyword: &'static str,
        line: usize,
    },
    SettlementFailed(SettlementError),
    AmortizationFailed(AmortizationError),
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SheetProcessor {
    settlement: SettlementCalculator,
    amortization: AmortizationCalculator,
}

impl SheetProcessor {
    pub fn new(settlement: SettlementCalculator) -> Self {
        Self {
            settlement,
            amortization: AmortizationCalculator,
        }
    }

    pub fn process_text(&self, content: &str) -> ProcessingOutcome {
        match parse_sheet(content) {
            Ok(sheet) => self.process(&sheet),
            Err(err) => map_parse_error(err),
        }
    }

    pub fn process(&self, sheet: &Sheet<'_>) -> ProcessingOutcome {
        let requests = match collect_requests(sheet) {
            Ok(requests) => requests,
            Err(outcome) => return outcome,
        };

        tracing::debug!(
            statement_count = sheet.statements.len(),
            has_split = requests.split.is_some(),
            has_loan = requests.loan.is_some(),
            "Processing sheet"
        );

        if requests.split.is_none() && requests.loan.is_none() {
            return ProcessingOutcome::Empty;
        }

        let split = match requests.split.map(|request| self.split(&request)).transpose() {
            Ok(split) => split,
            Err(err) => return ProcessingOutcome::SettlementFailed(err),
        };
        let loan = match requests.loan.map(|terms| self.loan(terms)).transpose() {
            Ok(loan) => loan,
            Err(err) => return ProcessingOutcome::AmortizationFailed(err),
        };

        ProcessingOutcome::Success(SheetReport { split, loan })
    }

    pub fn split(&self, request: &SplitRequest) -> Result<SplitReport, SettlementError> {
        let settlement =
            self.settlement
                .calculate(request.total_bill, request.tip, &request.participants)?;
        Ok(SplitReport {
            total_bill: request.total_bill,
            tip: request.tip,
            settlement,
        })
    }

    pub fn loan(&self, terms: LoanTerms) -> Result<LoanReport, AmortizationError> {
        let amortization = self.amortization.calculate(terms)?;
        let yearly = amortization.yearly_summary();
        Ok(LoanReport {
            terms,
            amortization,
            yearly,
        })
    }
}

fn map_parse_error(err: ParseError) -> ProcessingOutcome {
    match err {
        ParseError::SyntaxError { line, detail } => ProcessingOutcome::SyntaxError { line, detail },
        ParseError::InvalidValue { line, source } => ProcessingOutcome::InvalidValue {
            line,
            detail: source.to_string(),
        },
    }
}

struct Requests {
    split: Option<SplitRequest>,
    loan: Option<LoanTerms>,
}

#[derive(Default)]
struct Collected {
    bill: Option<(Money, usize)>,
    tip: Option<(Percent, usize)>,
    participants: Vec<Participant>,
    loan: Option<(Money, usize)>,
    rate: Option<(Percent, usize)>,
    term: Option<(u32, usize)>,
}

fn set_once<T>(
    slot: &mut Option<(T, usize)>,
    value: T,
    line: usize,
    keyword: &'static str,
) -> Result<(), ProcessingOutcome> {
    if slot.is_some() {
        return Err(ProcessingOutcome::DuplicateStatement { keyword, line });
    }
    *slot = Some((value, line));
    Ok(())
}

fn required<T>(slot: Option<(T, usize)>, keyword: &'static str) -> Result<T, ProcessingOutcome> {
    slot.map(|(value, _)| value)
        .ok_or(ProcessingOutcome::MissingStatement { keyword })
}

fn collect_requests(sheet: &Sheet<'_>) -> Result<Requests, ProcessingOutcome> {
    let mut collected = Collected::default();

    for stmt in &sheet.statements {
        let line = stmt.line;
        match &stmt.statement {
            Statement::Bill(amount) => set_once(&mut collected.bill, *amount, line, BILL)?,
            Statement::Tip(tip) => set_once(&mut collected.tip, *tip, line, TIP)?,
            Statement::Contribution { name, amount } => {
                collected.participants.push(Participant::new(*name, *amount));
            }
            Statement::Loan(amount) => set_once(&mut collected.loan, *amount, line, LOAN)?,
            Statement::Rate(rate) => set_once(&mut collected.rate, *rate, line, RATE)?,
            Statement::Term(months) => set_once(&mut collected.term, *months, line, TERM)?,
        }
    }

    let Collected {
        bill,
        tip,
        participants,
        loan,
        rate,
        term,
    } = collected;

    let wants_split = bill.is_some() || tip.is_some() || !participants.is_empty();
    let split = if wants_split {
        let total_bill = required(bill, BILL)?;
        if participants.is_empty() {
            return Err(ProcessingOutcome::MissingStatement { keyword: PAID });
        }
        let tip = tip.map(|(tip, _)| tip).unwrap_or(Percent::ZERO);
        Some(SplitRequest::new(total_bill, tip, participants))
    } else {
        None
    };

    let wants_loan = loan.is_some() || rate.is_some() || term.is_some();
    let loan = if wants_loan {
        Some(LoanTerms::new(
            required(loan, LOAN)?,
            required(rate, RATE)?,
            required(term, TERM)?,
        ))
    } else {
        None
    };

    Ok(Requests { split, loan })
}
