// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod column;
mod config;
mod dump;
mod error;
mod inspector;
pub mod mysql;

pub use column::{ColumnMetadata, SemanticType};
pub use config::{
    CONFIG_FILE_NAME, Config, DEFAULT_CONFIG, GenerateConfig, OutputConfig, SchemaConfig,
};
pub use dump::{DumpFormat, SchemaDump, parse_str};
pub use error::{Error, Result, SourceContext};
pub use inspector::{InspectError, MemoryInspector, SchemaInspector};
