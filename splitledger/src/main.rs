#![warn(clippy::uninlined_format_args)]

mod bootstrap;
mod cli;

use bootstrap::AppConfig;
use clap::Parser;
use cli::{Cli, Command, OutputFormat};
use splitledger_application::{ProcessingOutcome, SheetProcessor, SplitRequest};
use splitledger_domain::LoanTerms;
use splitledger_presentation::{
    AmortizationPresenter, ReportView, ScheduleDetail, SettlementPresenter,
    format_amortization_error, format_processing_failure, format_settlement_error,
    render_sheet_report,
};
use std::{borrow::Cow, fs, path::Path, process};

type CliResult<T> = Result<T, Cow<'static, str>>;

struct Rendered {
    view: ReportView,
    json: serde_json::Value,
}

fn main() {
    bootstrap::init_logging();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = AppConfig::from_env()
        .and_then(|config| config.with_overrides(cli.scale, cli.rounding))
        .map_err(|err| err.to_string())?;
    let currency = config.currency;
    let processor = SheetProcessor::default();

    tracing::debug!(
        scale = currency.scale(),
        rounding = ?currency.rounding_mode(),
        format = ?cli.format,
        "Configuration loaded"
    );

    let rendered = match cli.command {
        Command::Split {
            bill,
            tip,
            participants,
        } => {
            let request = SplitRequest::new(bill, tip, participants);
            let report = processor
                .split(&request)
                .map_err(|err| format_settlement_error(&err, &currency))?;
            Rendered {
                view: SettlementPresenter::render(&report, &currency),
                json: to_json(&report)?,
            }
        }
        Command::Loan {
            principal,
            rate,
            term,
            yearly,
        } => {
            let report = processor
                .loan(LoanTerms::new(principal, rate, term))
                .map_err(|err| format_amortization_error(&err))?;
            Rendered {
                view: AmortizationPresenter::render(&report, &currency, schedule_detail(yearly)),
                json: to_json(&report)?,
            }
        }
        Command::Sheet { path, yearly } => {
            let content = fs::read_to_string(&path)
                .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
            let report = match processor.process_text(&content) {
                ProcessingOutcome::Success(report) => report,
                failure => {
                    return Err(format_processing_failure(&failure, &currency)
                        .unwrap_or_default()
                        .into());
                }
            };
            Rendered {
                view: render_sheet_report(&report, &currency, schedule_detail(yearly)),
                json: to_json(&report)?,
            }
        }
    };

    emit(&rendered, cli.format, cli.svg.as_deref())
}

fn schedule_detail(yearly: bool) -> ScheduleDetail {
    if yearly {
        ScheduleDetail::Yearly
    } else {
        ScheduleDetail::Monthly
    }
}

fn to_json(value: &impl serde::Serialize) -> CliResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|err| format!("Failed to serialize report: {err}").into())
}

fn emit(
    rendered: &Rendered,
    format: OutputFormat,
    svg_path: Option<&Path>,
) -> CliResult<()> {
    match format {
        OutputFormat::Text => print!("{}", rendered.view.text),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rendered.json)
                .map_err(|err| format!("Failed to serialize report: {err}"))?;
            println!("{json}");
        }
    }

    if let Some(path) = svg_path {
        let Some(svg) = rendered.view.combined_svg() else {
            return Err("Nothing to draw".into());
        };
        fs::write(path, svg)
            .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
        tracing::info!(path = %path.display(), "SVG report written");
    }

    Ok(())
}
