//! Output formatters for the console, JSON lines and CSV.

mod csv;
mod json;
mod text;

pub use self::csv::*;
pub use self::json::*;
pub use text::*;
