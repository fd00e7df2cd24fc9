use crate::{
    ReportView,
    table::{Alignment, TableBuilder},
};
use splitledger_application::LoanReport;
use splitledger_domain::{Amortization, AmortizationEntry, CurrencyContext, YearlySummary};
use splitledger_i18n as i18n;
use std::borrow::Cow;

/// Granularity of the schedule table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScheduleDetail {
    #[default]
    Monthly,
    Yearly,
}

pub struct AmortizationPresenter;

impl AmortizationPresenter {
    pub fn render(
        report: &LoanReport,
        currency: &CurrencyContext,
        detail: ScheduleDetail,
    ) -> ReportView {
        let summary = Self::summary_table(&report.amortization, currency);
        let mut view = ReportView::default();
        view.push_table(summary.to_text(), summary.to_svg());

        match detail {
            ScheduleDetail::Monthly => {
                let schedule = Self::schedule_table(&report.amortization.schedule, currency);
                view.push_table(schedule.to_text(), schedule.to_svg());
            }
            ScheduleDetail::Yearly => {
                let yearly = Self::yearly_table(&report.yearly, currency);
                view.push_table(yearly.to_text(), yearly.to_svg());
            }
        }
        view
    }

    fn summary_table<'a>(
        amortization: &Amortization,
        currency: &CurrencyContext,
    ) -> TableBuilder<'a, [Cow<'a, str>; 2]> {
        TableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right])
            .headers(&[Cow::Borrowed(i18n::ITEM), Cow::Borrowed(i18n::VALUE)])
            .row([
                Cow::Borrowed(i18n::MONTHLY_PAYMENT),
                Cow::Owned(currency.format(amortization.payment)),
            ])
            .row([
                Cow::Borrowed(i18n::TOTAL_INTEREST),
                Cow::Owned(currency.format(amortization.total_interest)),
            ])
            .row([
                Cow::Borrowed(i18n::TOTAL_PAYMENT),
                Cow::Owned(currency.format(amortization.total_payment)),
            ])
    }

    pub fn schedule_table<'a>(
        schedule: &[AmortizationEntry],
        currency: &CurrencyContext,
    ) -> TableBuilder<'a, [Cow<'a, str>; 5]> {
        TableBuilder::new()
            .alignments(&[Alignment::Right; 5])
            .headers(&[
                Cow::Borrowed(i18n::PERIOD),
                Cow::Borrowed(i18n::PAYMENT),
                Cow::Borrowed(i18n::PRINCIPAL),
                Cow::Borrowed(i18n::INTEREST),
                Cow::Borrowed(i18n::REMAINING),
            ])
            .rows(schedule.iter().map(|entry| {
                [
                    Cow::Owned(entry.period.to_string()),
                    Cow::Owned(currency.format(entry.payment)),
                    Cow::Owned(currency.format(entry.principal_portion)),
                    Cow::Owned(currency.format(entry.interest_portion)),
                    Cow::Owned(currency.format(entry.remaining_balance)),
                ]
            }))
    }

    pub fn yearly_table<'a>(
        years: &[YearlySummary],
        currency: &CurrencyContext,
    ) -> TableBuilder<'a, [Cow<'a, str>; 4]> {
        TableBuilder::new()
            .alignments(&[Alignment::Right; 4])
            .headers(&[
                Cow::Borrowed(i18n::YEAR),
                Cow::Borrowed(i18n::PRINCIPAL),
                Cow::Borrowed(i18n::INTEREST),
                Cow::Borrowed(i18n::REMAINING),
            ])
            .rows(years.iter().map(|year| {
                [
                    Cow::Owned(year.year.to_string()),
                    Cow::Owned(currency.format(year.principal_paid)),
                    Cow::Owned(currency.format(year.interest_paid)),
                    Cow::Owned(currency.format(year.ending_balance)),
                ]
            }))
    }
}
