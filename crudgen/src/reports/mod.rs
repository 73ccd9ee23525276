//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod generate;
mod output;
mod tables;

pub use generate::{GenerateReport, GenerationResult, PreviewFile, TableResult};
pub use output::{Report, TerminalOutput};
pub use tables::{ColumnInfo, TableInfo, TablesReport};
