//! Schema dumps: driver field metadata captured to a TOML or JSON file.
//!
//! ```toml
//! [[tables]]
//! name = "user_account"
//!
//! [[tables.columns]]
//! name = "id"
//! type = "LONG"
//! flags = ["NOT_NULL", "PRI_KEY", "AUTO_INCREMENT"]
//! ```
//!
//! `type` also accepts the numeric type code (and the driver's `columnType`
//! spelling); `flags` also accepts the raw bit mask.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    ColumnMetadata, Error, InspectError, MemoryInspector, Result, SchemaInspector, SourceContext,
    mysql::{self, FieldFlags, FieldPacket},
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDump {
    #[serde(default)]
    tables: Vec<RawTable>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTable {
    name: String,
    #[serde(default)]
    columns: Vec<RawColumn>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawColumn {
    name: String,
    #[serde(rename = "type", alias = "columnType")]
    column_type: RawType,
    #[serde(default)]
    flags: RawFlags,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawType {
    Code(u8),
    Name(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawFlags {
    Mask(u32),
    Names(Vec<String>),
}

impl Default for RawFlags {
    fn default() -> Self {
        Self::Mask(0)
    }
}

/// Dump file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    Toml,
    Json,
}

impl DumpFormat {
    /// Pick the format from a file extension; anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// A parsed schema dump.
#[derive(Debug, Clone)]
pub struct SchemaDump {
    path: PathBuf,
    tables: MemoryInspector,
}

impl SchemaDump {
    /// Open and parse a dump file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let filename = path.display().to_string();
        let tables = parse_str(&content, &filename, DumpFormat::from_path(&path))?;

        tracing::debug!(path = %filename, tables = tables.len(), "loaded schema dump");
        Ok(Self { path, tables })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the tables as an in-memory inspector.
    pub fn tables(&self) -> &MemoryInspector {
        &self.tables
    }

    pub fn into_inspector(self) -> MemoryInspector {
        self.tables
    }
}

impl SchemaInspector for SchemaDump {
    fn list_tables(&self) -> std::result::Result<Vec<String>, InspectError> {
        self.tables.list_tables()
    }

    fn describe_table(&self, table: &str) -> std::result::Result<Vec<ColumnMetadata>, InspectError> {
        self.tables.describe_table(table)
    }
}

/// Parse dump content with a filename for error reporting.
pub fn parse_str(content: &str, filename: &str, format: DumpFormat) -> Result<MemoryInspector> {
    let ctx = SourceContext::new(content, filename);
    let raw: RawDump = match format {
        DumpFormat::Toml => toml::from_str(content).map_err(|e| ctx.toml_error(e))?,
        DumpFormat::Json => serde_json::from_str(content).map_err(|e| ctx.json_error(e))?,
    };

    let mut inspector = MemoryInspector::new();
    for table in raw.tables {
        if table.name.trim().is_empty() {
            return Err(ctx.unlabeled_error("table name must not be empty"));
        }
        if inspector.contains(&table.name) {
            return Err(ctx.validation_error(
                format!("table '{}' is defined more than once", table.name),
                &table.name,
            ));
        }

        let columns = decode_columns(&ctx, &table)?;
        inspector.insert(table.name, columns);
    }
    Ok(inspector)
}

fn decode_columns(ctx: &SourceContext, table: &RawTable) -> Result<Vec<ColumnMetadata>> {
    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(table.columns.len());

    for raw in &table.columns {
        if raw.name.trim().is_empty() {
            return Err(ctx.unlabeled_error(format!(
                "column name in table '{}' must not be empty",
                table.name
            )));
        }
        if !seen.insert(raw.name.as_str()) {
            return Err(ctx.validation_error(
                format!(
                    "column '{}' appears more than once in table '{}'",
                    raw.name, table.name
                ),
                &raw.name,
            ));
        }

        let type_code = match &raw.column_type {
            RawType::Code(code) => *code,
            RawType::Name(name) => mysql::type_code_from_name(name)
                .ok_or_else(|| ctx.unknown_type_error(name, &raw.name))?,
        };
        let flags = match &raw.flags {
            RawFlags::Mask(bits) => FieldFlags::from_bits(*bits),
            RawFlags::Names(names) => {
                let mut flags = FieldFlags::default();
                for name in names {
                    let flag = FieldFlags::from_name(name)
                        .ok_or_else(|| ctx.unknown_flag_error(name, &raw.name))?;
                    flags = flags.with(flag);
                }
                flags
            }
        };

        columns.push(FieldPacket::new(&raw.name, type_code, flags).to_column());
    }

    Ok(columns)
}
