//! Tables command report data structures.

use crudgen_schema::ColumnMetadata;
use serde::Serialize;

use super::output::{Output, Report};

/// Every table in the schema source with its classified columns.
#[derive(Debug, Serialize)]
pub struct TablesReport {
    pub tables: Vec<TableInfo>,
}

#[derive(Debug, Serialize)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ColumnInfo {
    #[serde(flatten)]
    pub column: ColumnMetadata,
    /// Generation role (key, required, optional, skip).
    pub role: &'static str,
}

impl Report for TablesReport {
    fn render(&self, out: &mut dyn Output) {
        if self.tables.is_empty() {
            out.preformatted("No tables found.");
            return;
        }

        for (i, table) in self.tables.iter().enumerate() {
            if i > 0 {
                out.newline();
            }
            out.section(&table.name);
            for info in &table.columns {
                out.key_value_indented(
                    &info.column.name,
                    &format!("{} ({})", info.role, info.column.semantic_type.as_str()),
                );
            }
            for warning in &table.warnings {
                out.warning(&format!("{}: {}", table.name, warning));
            }
        }
    }
}
