//! Per-table artifact assembly.

use crudgen_core::{is_js_identifier, to_upper_camel};
use crudgen_schema::ColumnMetadata;

use crate::{
    Diagnostic, GeneratedOperation, GenerationError, GenerationSettings, OperationKind, classify,
    js::{CodeFile, ModuleExports, RawCode},
    operations::{TableContext, generate_operation},
    router::{build_router, controller_binding},
    templates::{
        CONTROLLER_PREAMBLE, DB_CONFIG, DB_CONFIG_PATH, PREPARE_HELPER, PREPARE_HELPER_PATH,
        RESPONSE_HELPER, RESPONSE_HELPER_PATH,
    },
};

/// A rendered file and its path relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: String,
    pub content: String,
}

impl Artifact {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Everything generated for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    pub table: String,
    /// Operations in generation order (Read, Create, Update, Delete).
    pub operations: Vec<GeneratedOperation>,
    pub controller: Artifact,
    pub router: Artifact,
    pub diagnostics: Vec<Diagnostic>,
}

impl ArtifactSet {
    /// Artifacts in emission order.
    pub fn artifacts(&self) -> [&Artifact; 2] {
        [&self.controller, &self.router]
    }

    /// Find an operation by kind.
    pub fn operation(&self, kind: OperationKind) -> Option<&GeneratedOperation> {
        self.operations.iter().find(|op| op.kind == kind)
    }
}

/// Relative path of a table's controller module.
pub fn controller_path(table: &str) -> String {
    format!("controllers/{table}.js")
}

/// Relative path of a table's router module.
pub fn router_path(table: &str) -> String {
    format!("routes/{table}.js")
}

/// Generate the controller and router for one table, fully in memory.
pub fn generate_table(
    table: &str,
    columns: &[ColumnMetadata],
    settings: GenerationSettings,
) -> Result<ArtifactSet, GenerationError> {
    let table_type = to_upper_camel(table);
    if !is_js_identifier(&table_type) || !is_js_identifier(&controller_binding(table)) {
        return Err(GenerationError::InvalidTableName {
            table: table.to_string(),
        });
    }

    let classified = classify(table, columns);
    let ctx = TableContext {
        classified: &classified,
        table_type: &table_type,
        settings,
    };

    let operations: Vec<GeneratedOperation> = OperationKind::ALL
        .iter()
        .map(|kind| generate_operation(*kind, &ctx))
        .collect();

    let controller = render_controller(&operations);
    let router = build_router(table, &operations);

    Ok(ArtifactSet {
        table: table.to_string(),
        controller: Artifact::new(controller_path(table), controller),
        router: Artifact::new(router_path(table), router),
        diagnostics: classified.diagnostics().to_vec(),
        operations,
    })
}

fn render_controller(operations: &[GeneratedOperation]) -> String {
    let file = CONTROLLER_PREAMBLE
        .iter()
        .cloned()
        .fold(CodeFile::new(), CodeFile::require);

    operations
        .iter()
        .fold(file, |file, op| file.add(RawCode::new(&op.source_text)))
        .exports(ModuleExports::names(
            operations.iter().map(|op| op.symbol_name.as_str()),
        ))
        .render()
}

/// Artifacts written once per run, independent of any table.
pub fn shared_artifacts(generate_middleware: bool) -> Vec<Artifact> {
    let mut artifacts = vec![Artifact::new(DB_CONFIG_PATH, DB_CONFIG.as_str())];
    if generate_middleware {
        artifacts.push(Artifact::new(RESPONSE_HELPER_PATH, RESPONSE_HELPER.as_str()));
        artifacts.push(Artifact::new(PREPARE_HELPER_PATH, PREPARE_HELPER.as_str()));
    }
    artifacts
}
