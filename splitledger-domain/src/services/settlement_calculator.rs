use crate::{
    error::SettlementError,
    model::{MemberBalance, Money, Participant, Percent, Settlement, Transaction},
};
use rust_decimal::Decimal;

/// Thresholds used by the settlement guard and the greedy matcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementTolerance {
    mismatch: Money,
    dust: Money,
}

impl SettlementTolerance {
    /// Returns `None` for a negative mismatch tolerance or a non-positive dust
    /// threshold; the matcher needs dust > 0 to advance past settled parties.
    pub fn new(mismatch: Money, dust: Money) -> Option<Self> {
        if mismatch.is_negative() || dust <= Money::ZERO {
            return None;
        }
        Some(Self { mismatch, dust })
    }
}

impl Default for SettlementTolerance {
    fn default() -> Self {
        Self {
            mismatch: Money::new(1, 2),
            dust: Money::new(1, 2),
        }
    }
}

/// Equal-split bill settlement with greedy debt netting
#[derive(Clone, Copy, Debug, Default)]
pub struct SettlementCalculator {
    tolerance: SettlementTolerance,
}

impl SettlementCalculator {
    pub fn new(tolerance: SettlementTolerance) -> Self {
        Self { tolerance }
    }

    /// Calculate balances and transfers for a shared bill
    ///
    /// # Arguments
    /// * `total_bill` - Bill before tip
    /// * `tip` - Tip percentage applied on top of the bill
    /// * `participants` - Everyone sharing the bill with what they already paid
    ///
    /// # Returns
    /// Balances in input order and the transfers that settle them, or
    /// `SettlementError::Mismatch` when the contributions do not cover the
    /// bill with tip.
    pub fn calculate(
        &self,
        total_bill: Money,
        tip: Percent,
        participants: &[Participant],
    ) -> Result<Settlement, SettlementError> {
        validate_inputs(total_bill, tip, participants)?;

        let bill_with_tip = Decimal::ONE
            .checked_add(tip.as_fraction())
            .and_then(|factor| total_bill.checked_mul(factor))
            .ok_or_else(|| out_of_range("total_bill"))?;
        let total_paid = participants
            .iter()
            .try_fold(Money::ZERO, |total, p| total.checked_add(p.amount_paid))
            .ok_or_else(|| out_of_range("amount_paid"))?;

        tracing::debug!(
            participant_count = participants.len(),
            total_bill = %total_bill,
            tip = %tip,
            bill_with_tip = %bill_with_tip,
            total_paid = %total_paid,
            "Settlement calculation started"
        );

        if (total_paid - bill_with_tip).abs() > self.tolerance.mismatch {
            tracing::warn!(
                reject_reason = "contribution_mismatch",
                participant_count = participants.len(),
                total_paid = %total_paid,
                expected_total = %bill_with_tip,
                tolerance = %self.tolerance.mismatch,
                "Settlement rejected because contributions do not match the bill"
            );
            return Err(SettlementError::Mismatch {
                total_paid,
                expected_total: bill_with_tip,
            });
        }

        if participants.is_empty() {
            return Ok(Settlement {
                bill_with_tip,
                share: Money::ZERO,
                balances: Vec::new(),
                transactions: Vec::new(),
            });
        }

        let share = bill_with_tip / Decimal::from(participants.len());
        let balances: Vec<MemberBalance> = participants
            .iter()
            .map(|participant| MemberBalance {
                name: participant.name.clone(),
                paid: participant.amount_paid,
                share,
                balance: participant.amount_paid - share,
            })
            .collect();

        let transactions = self.match_debtors_to_creditors(&balances);

        tracing::debug!(
            participant_count = participants.len(),
            share = %share,
            transaction_count = transactions.len(),
            "Settlement calculation finished"
        );

        Ok(Settlement {
            bill_with_tip,
            share,
            balances,
            transactions,
        })
    }

    fn match_debtors_to_creditors(&self, balances: &[MemberBalance]) -> Vec<Transaction> {
        let dust = self.tolerance.dust;

        // sort_by is stable: equal balances keep input order.
        let mut debtors: Vec<(&str, Money)> = balances
            .iter()
            .filter(|member| member.balance < Money::ZERO)
            .map(|member| (member.name.as_str(), member.balance))
            .collect();
        debtors.sort_by(|(_, lhs), (_, rhs)| lhs.cmp(rhs));

        let mut creditors: Vec<(&str, Money)> = balances
            .iter()
            .filter(|member| member.balance > Money::ZERO)
            .map(|member| (member.name.as_str(), member.balance))
            .collect();
        creditors.sort_by(|(_, lhs), (_, rhs)| rhs.cmp(lhs));

        let mut transactions = Vec::with_capacity(balances.len().saturating_sub(1));
        let (mut i, mut j) = (0, 0);

        while i < debtors.len() && j < creditors.len() {
            let (debtor, owed) = debtors[i];
            let (creditor, due) = creditors[j];
            let amount = (-owed).min(due);

            if amount > dust {
                transactions.push(Transaction {
                    from: debtor.to_owned(),
                    to: creditor.to_owned(),
                    amount,
                });
            }

            debtors[i].1 += amount;
            creditors[j].1 -= amount;

            if debtors[i].1.abs() < dust {
                i += 1;
            }
            if creditors[j].1.abs() < dust {
                j += 1;
            }
        }

        transactions
    }
}

fn out_of_range(field: &'static str) -> SettlementError {
    SettlementError::InvalidInput {
        field,
        reason: "exceeds the supported numeric range",
    }
}

fn validate_inputs(
    total_bill: Money,
    tip: Percent,
    participants: &[Participant],
) -> Result<(), SettlementError> {
    if total_bill.is_negative() {
        return Err(SettlementError::InvalidInput {
            field: "total_bill",
            reason: "must not be negative",
        });
    }
    if tip.is_negative() {
        return Err(SettlementError::InvalidInput {
            field: "tip",
            reason: "must not be negative",
        });
    }
    if participants.iter().any(|p| p.amount_paid.is_negative()) {
        return Err(SettlementError::InvalidInput {
            field: "amount_paid",
            reason: "must not be negative",
        });
    }
    Ok(())
}
