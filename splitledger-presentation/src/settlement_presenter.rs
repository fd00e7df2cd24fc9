use crate::{
    ReportView,
    table::{Alignment, TableBuilder},
};
use splitledger_application::SplitReport;
use splitledger_domain::{CurrencyContext, MemberBalance, Settlement, Transaction};
use splitledger_i18n as i18n;
use std::borrow::Cow;

pub struct SettlementPresenter;

impl SettlementPresenter {
    pub fn render(report: &SplitReport, currency: &CurrencyContext) -> ReportView {
        let settlement = &report.settlement;
        let summary = Self::summary_table(settlement, currency);
        let balances = Self::balance_table(&settlement.balances, currency);

        let mut view = ReportView::default();
        view.push_table(summary.to_text(), summary.to_svg());
        view.push_table(balances.to_text(), balances.to_svg());

        if settlement.is_settled() {
            view.push_note(i18n::ALL_SETTLED);
        } else {
            let transfers = Self::transfer_table(&settlement.transactions, currency);
            view.push_table(transfers.to_text(), transfers.to_svg());
        }
        view
    }

    fn summary_table<'a>(
        settlement: &Settlement,
        currency: &CurrencyContext,
    ) -> TableBuilder<'a, [Cow<'a, str>; 2]> {
        TableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right])
            .headers(&[Cow::Borrowed(i18n::ITEM), Cow::Borrowed(i18n::VALUE)])
            .row([
                Cow::Borrowed(i18n::BILL_WITH_TIP),
                Cow::Owned(currency.format(settlement.bill_with_tip)),
            ])
            .row([
                Cow::Borrowed(i18n::SHARE_PER_PERSON),
                Cow::Owned(currency.format(settlement.share)),
            ])
    }

    pub fn balance_table<'a>(
        balances: &'a [MemberBalance],
        currency: &CurrencyContext,
    ) -> TableBuilder<'a, [Cow<'a, str>; 4]> {
        TableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&[
                Cow::Borrowed(i18n::MEMBER),
                Cow::Borrowed(i18n::PAID),
                Cow::Borrowed(i18n::SHARE),
                Cow::Borrowed(i18n::BALANCE),
            ])
            .rows(balances.iter().map(|member| {
                [
                    Cow::Borrowed(member.name.as_str()),
                    Cow::Owned(currency.format(member.paid)),
                    Cow::Owned(currency.format(member.share)),
                    Cow::Owned(currency.format_signed(member.balance)),
                ]
            }))
    }

    pub fn transfer_table<'a>(
        transactions: &'a [Transaction],
        currency: &CurrencyContext,
    ) -> TableBuilder<'a, [Cow<'a, str>; 3]> {
        TableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Left, Alignment::Right])
            .headers(&[
                Cow::Borrowed(i18n::FROM),
                Cow::Borrowed(i18n::TO),
                Cow::Borrowed(i18n::AMOUNT),
            ])
            .rows(transactions.iter().map(|transaction| {
                [
                    Cow::Borrowed(transaction.from.as_str()),
                    Cow::Borrowed(transaction.to.as_str()),
                    Cow::Owned(currency.format(transaction.amount)),
                ]
            }))
    }
}
