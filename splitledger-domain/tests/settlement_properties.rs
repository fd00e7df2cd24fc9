use proptest::prelude::*;
use rust_decimal::Decimal;
use splitledger_domain::{Money, Participant, Percent, Settlement, SettlementCalculator};
use std::collections::HashMap;

fn dust() -> Money {
    Money::new(1, 2)
}

/// Builds participants whose balances are whole units: everyone owes `share`
/// and the deltas (last one closing the sum) say who over- or under-paid.
fn whole_unit_participants(share: i64, deltas: &[i64]) -> Vec<Participant> {
    let closing = -deltas.iter().sum::<i64>();
    deltas
        .iter()
        .copied()
        .chain(std::iter::once(closing))
        .enumerate()
        .map(|(idx, delta)| Participant::new(format!("P{idx}"), Money::from_i64(share + delta)))
        .collect()
}

fn bill_before_tip(bill_with_tip: i64, tip: i64) -> Money {
    let multiplier = Decimal::ONE + Decimal::from(tip) / Decimal::ONE_HUNDRED;
    Money::from_decimal(Decimal::from(bill_with_tip) / multiplier)
}

fn apply_transactions(settlement: &Settlement) -> HashMap<&str, Money> {
    let mut balances: HashMap<&str, Money> = settlement
        .balances
        .iter()
        .map(|b| (b.name.as_str(), b.balance))
        .collect();
    for tx in &settlement.transactions {
        *balances.entry(tx.from.as_str()).or_insert(Money::ZERO) += tx.amount;
        *balances.entry(tx.to.as_str()).or_insert(Money::ZERO) -= tx.amount;
    }
    balances
}

proptest! {
    #[test]
    fn transactions_settle_every_balance(
        share in 1_000i64..=2_000,
        deltas in prop::collection::vec(-100i64..=100, 0..=7),
        tip in prop::sample::select(vec![0i64, 25]),
    ) {
        let participants = whole_unit_participants(share, &deltas);
        let bill_with_tip = share * participants.len() as i64;
        let bill = bill_before_tip(bill_with_tip, tip);

        let settlement = SettlementCalculator::default()
            .calculate(bill, Percent::from_i64(tip), &participants)
            .expect("contributions match the bill");

        let total: Money = settlement.balances.iter().map(|b| b.balance).sum();
        prop_assert!(total.abs() <= dust());

        for (name, balance) in apply_transactions(&settlement) {
            prop_assert!(balance.abs() <= dust(), "{name} left with {balance}");
        }

        prop_assert!(settlement.transactions.len() < participants.len());
        for tx in &settlement.transactions {
            prop_assert!(tx.amount > dust());
            prop_assert_ne!(&tx.from, &tx.to);
        }
    }

    #[test]
    fn cent_contributions_respect_bounds(
        paid_cents in prop::collection::vec(0i64..=50_000, 1..=8),
    ) {
        let participants: Vec<Participant> = paid_cents
            .iter()
            .enumerate()
            .map(|(idx, &cents)| Participant::new(format!("P{idx}"), Money::new(cents, 2)))
            .collect();
        let bill: Money = participants.iter().map(|p| p.amount_paid).sum();

        let settlement = SettlementCalculator::default()
            .calculate(bill, Percent::ZERO, &participants)
            .expect("contributions match the bill");

        let total: Money = settlement.balances.iter().map(|b| b.balance).sum();
        prop_assert!(total.abs() <= dust());
        prop_assert!(settlement.transactions.len() < participants.len());
        for tx in &settlement.transactions {
            prop_assert!(tx.amount > dust());
        }
    }

    #[test]
    fn repeated_calculations_are_identical(
        share in 1_000i64..=2_000,
        deltas in prop::collection::vec(-100i64..=100, 0..=5),
    ) {
        let participants = whole_unit_participants(share, &deltas);
        let bill = Money::from_i64(share * participants.len() as i64);
        let calculator = SettlementCalculator::default();

        let first = calculator.calculate(bill, Percent::ZERO, &participants);
        let second = calculator.calculate(bill, Percent::ZERO, &participants);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn mismatch_is_reported_with_both_totals(
        paid in prop::collection::vec(0i64..=1_000, 1..=6),
        shortfall in 1i64..=500,
    ) {
        let participants: Vec<Participant> = paid
            .iter()
            .enumerate()
            .map(|(idx, &amount)| Participant::new(format!("P{idx}"), Money::from_i64(amount)))
            .collect();
        let total_paid: i64 = paid.iter().sum();
        let bill = Money::from_i64(total_paid + shortfall);

        let result = SettlementCalculator::default().calculate(bill, Percent::ZERO, &participants);

        prop_assert_eq!(
            result,
            Err(splitledger_domain::SettlementError::Mismatch {
                total_paid: Money::from_i64(total_paid),
                expected_total: bill,
            })
        );
    }
}
