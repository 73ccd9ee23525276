//! Tables operation - describe every table and how its columns are used.

use crudgen_codegen::classify;
use crudgen_schema::SchemaInspector;
use eyre::{Context, Result};

use crate::reports::{ColumnInfo, TableInfo, TablesReport};

/// Execute the tables operation.
pub fn tables(inspector: &dyn SchemaInspector) -> Result<TablesReport> {
    let names = inspector
        .list_tables()
        .wrap_err("Failed to list tables")?;

    let mut tables = Vec::with_capacity(names.len());
    for name in names {
        let columns = inspector
            .describe_table(&name)
            .wrap_err_with(|| format!("Failed to describe table '{name}'"))?;
        let classified = classify(&name, &columns);

        tables.push(TableInfo {
            columns: classified
                .columns()
                .iter()
                .map(|c| ColumnInfo {
                    column: c.column.clone(),
                    role: c.role.as_str(),
                })
                .collect(),
            warnings: classified
                .diagnostics()
                .iter()
                .map(ToString::to_string)
                .collect(),
            name,
        });
    }

    Ok(TablesReport { tables })
}
