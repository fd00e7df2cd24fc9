#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod sheet_processor;

pub use model::{LoanReport, SheetReport, SplitReport, SplitRequest};
pub use sheet_processor::{ProcessingOutcome, SheetProcessor};
