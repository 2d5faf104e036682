//! Output formatting module.

mod formatter;
mod human;
mod json;

pub use formatter::ExtractionSummary;
pub use formatter::OutputFormatter;
pub use formatter::Preview;

use human::HumanFormatter;
use json::JsonFormatter;

/// Creates an output formatter based on CLI flags
pub fn create_formatter(json: bool, verbose: bool, quiet: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(HumanFormatter::new(verbose, quiet))
    }
}

/// Writes a JSON error document for a failed operation to stdout.
pub fn print_json_error(operation: &str, error: &anyhow::Error) {
    json::print_error(operation, error);
}
