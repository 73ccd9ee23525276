//! Schema-driven CRUD code generation for express + joi + mysql2.
//!
//! The pipeline for one table is: [`classify`] the columns, generate the four
//! operations, build the router, and package everything as an
//! [`ArtifactSet`]. [`run`] drives that pipeline over a
//! [`SchemaInspector`](crudgen_schema::SchemaInspector) and hands the results
//! to an [`Emitter`](crudgen_core::Emitter).

pub mod builder;
pub mod js;

mod artifacts;
mod classify;
mod operation;
mod operations;
mod orchestrator;
mod router;
mod templates;

pub use artifacts::{
    Artifact, ArtifactSet, controller_path, generate_table, router_path, shared_artifacts,
};
pub use classify::{
    ClassifiedColumn, ClassifiedTable, ColumnRole, Diagnostic, InputField, Presence, Severity,
    classify,
};
pub use operation::{GeneratedOperation, GenerationSettings, HttpMethod, OperationKind};
pub use operations::{DEFAULT_FROM_ROW, DEFAULT_LIMIT, TableContext, generate_operation};
pub use orchestrator::{
    GenerationError, RunOptions, RunReport, TableOutcome, TableSelection, run,
};
pub use router::{build_router, controller_binding};
pub use templates::{DB_CONFIG_PATH, PREPARE_HELPER_PATH, RESPONSE_HELPER_PATH};
