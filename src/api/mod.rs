//! Output formatting for locator results and sweep reports

pub mod formatting;

pub use formatting::{CsvFormatter, CsvSink, FormattedEstimate, JsonFormatter, TextFormatter};
