use serde::Serialize;
use splitledger_domain::{Amortization, LoanTerms, Money, Participant, Percent, Settlement, YearlySummary};

/// Inputs for one shared bill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitRequest {
    pub total_bill: Money,
    pub tip: Percent,
    pub participants: Vec<Participant>,
}

impl SplitRequest {
    pub fn new(total_bill: Money, tip: Percent, participants: Vec<Participant>) -> Self {
        Self {
            total_bill,
            tip,
            participants,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SplitReport {
    pub total_bill: Money,
    pub tip: Percent,
    pub settlement: Settlement,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoanReport {
    pub terms: LoanTerms,
    pub amortization: Amortization,
    pub yearly: Vec<YearlySummary>,
}

/// Everything a sheet produced. At least one part is present.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize)]
pub struct SheetReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<SplitReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan: Option<LoanReport>,
}
