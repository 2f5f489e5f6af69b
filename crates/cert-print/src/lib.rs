//! PDF output for certificate layouts
//!
//! Reads data records from CSV, resolves each field's text and draws it at
//! the committed layout position with the builtin Helvetica font.

mod pdf;
mod printer;
mod records;
mod types;

pub use pdf::*;
pub use printer::PdfPrinter;
pub use records::load_records_from_csv;
pub use types::*;
