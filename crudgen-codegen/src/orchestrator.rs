//! Generation runs over one table or every table of a schema source.

use crudgen_core::{EmitError, Emitter};
use crudgen_schema::{InspectError, SchemaInspector};
use thiserror::Error;

use crate::{
    Diagnostic, GenerationSettings,
    artifacts::{Artifact, ArtifactSet, generate_table, shared_artifacts},
};

/// Reason a table (or a whole run) could not be generated.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("could not list tables")]
    TableListUnavailable {
        #[source]
        source: InspectError,
    },

    #[error("schema unavailable for table '{table}'")]
    SchemaUnavailable {
        table: String,
        #[source]
        source: InspectError,
    },

    #[error("schema source lists no tables")]
    EmptySchema,

    #[error("table name '{table}' does not produce valid JavaScript identifiers")]
    InvalidTableName { table: String },

    #[error("failed to emit '{path}'")]
    EmitFailure {
        path: String,
        #[source]
        source: EmitError,
    },
}

/// Which tables a run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSelection {
    One(String),
    All,
}

impl TableSelection {
    /// `"all"` selects every table; anything else names one table. A table
    /// literally named `all` needs an explicit [`TableSelection::One`].
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::One(value.to_string())
        }
    }
}

impl From<&str> for TableSelection {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// Options for a generation run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub selection: TableSelection,
    /// Also emit `utility/response.js` and `utility/prepare.js`.
    pub generate_middleware: bool,
    /// Keep going after a table fails in bulk mode.
    pub continue_on_error: bool,
    pub settings: GenerationSettings,
}

impl RunOptions {
    pub fn new(selection: impl Into<TableSelection>) -> Self {
        Self {
            selection: selection.into(),
            generate_middleware: true,
            continue_on_error: false,
            settings: GenerationSettings::default(),
        }
    }
}

/// Result of generating one table.
#[derive(Debug)]
pub struct TableOutcome {
    pub table: String,
    /// Paths written for this table, including those written before a failure.
    pub written: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub error: Option<GenerationError>,
}

impl TableOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary of a generation run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Shared artifacts written once for the run.
    pub shared: Vec<String>,
    /// One outcome per attempted table, in inspector order.
    pub outcomes: Vec<TableOutcome>,
    /// Tables not attempted because an earlier table failed.
    pub skipped: Vec<String>,
}

impl RunReport {
    /// Whether every selected table was generated.
    pub fn is_success(&self) -> bool {
        self.skipped.is_empty() && self.outcomes.iter().all(TableOutcome::is_success)
    }

    pub fn failed(&self) -> impl Iterator<Item = &TableOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Every path written during the run.
    pub fn written(&self) -> impl Iterator<Item = &str> {
        self.shared
            .iter()
            .chain(self.outcomes.iter().flat_map(|o| o.written.iter()))
            .map(String::as_str)
    }
}

/// Generate the selected tables and hand every artifact to `emitter`.
///
/// Tables are processed one at a time in inspector order, each pipeline
/// completing in memory before anything is emitted. Shared artifacts are
/// emitted once, before the first table's artifacts. An `Err` means the run
/// could not start or the shared artifacts failed; per-table failures are
/// reported in the returned [`RunReport`].
pub fn run(
    inspector: &dyn SchemaInspector,
    emitter: &mut dyn Emitter,
    options: &RunOptions,
) -> Result<RunReport, GenerationError> {
    let tables = match &options.selection {
        TableSelection::One(table) => vec![table.clone()],
        TableSelection::All => {
            let tables = inspector
                .list_tables()
                .map_err(|source| GenerationError::TableListUnavailable { source })?;
            if tables.is_empty() {
                return Err(GenerationError::EmptySchema);
            }
            tables
        }
    };

    let mut report = RunReport::default();
    let mut pending = tables.into_iter();

    while let Some(table) = pending.next() {
        tracing::debug!(table = %table, "generating table");

        let outcome = match build_table(inspector, &table, options.settings) {
            Ok(set) => {
                if report.shared.is_empty() {
                    let shared = shared_artifacts(options.generate_middleware);
                    report.shared = emit_all(emitter, &shared).map_err(|(_, err)| err)?;
                }
                emit_table(emitter, set)
            }
            Err(error) => TableOutcome {
                table: table.clone(),
                written: Vec::new(),
                diagnostics: Vec::new(),
                error: Some(error),
            },
        };

        let failed = !outcome.is_success();
        if let Some(error) = &outcome.error {
            tracing::warn!(table = %table, error = %error, "table generation failed");
        }
        report.outcomes.push(outcome);

        if failed && !options.continue_on_error {
            report.skipped = pending.collect();
            break;
        }
    }

    Ok(report)
}

fn build_table(
    inspector: &dyn SchemaInspector,
    table: &str,
    settings: GenerationSettings,
) -> Result<ArtifactSet, GenerationError> {
    let columns =
        inspector
            .describe_table(table)
            .map_err(|source| GenerationError::SchemaUnavailable {
                table: table.to_string(),
                source,
            })?;
    generate_table(table, &columns, settings)
}

fn emit_table(emitter: &mut dyn Emitter, set: ArtifactSet) -> TableOutcome {
    let ArtifactSet {
        table,
        controller,
        router,
        diagnostics,
        ..
    } = set;

    let (written, error) = match emit_all(emitter, &[controller, router]) {
        Ok(written) => (written, None),
        Err((written, error)) => (written, Some(error)),
    };

    TableOutcome {
        table,
        written,
        diagnostics,
        error,
    }
}

/// Emit `artifacts` in order, stopping at the first failure. On failure the
/// paths already written are returned alongside the error.
fn emit_all(
    emitter: &mut dyn Emitter,
    artifacts: &[Artifact],
) -> Result<Vec<String>, (Vec<String>, GenerationError)> {
    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        if let Err(source) = emitter.write_artifact(&artifact.path, &artifact.content) {
            let error = GenerationError::EmitFailure {
                path: artifact.path.clone(),
                source,
            };
            return Err((written, error));
        }
        written.push(artifact.path.clone());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use crudgen_core::PreviewEmitter;
    use crudgen_schema::{ColumnMetadata, MemoryInspector, SemanticType};

    use super::*;

    fn inspector() -> MemoryInspector {
        MemoryInspector::new()
            .with_table(
                "alpha",
                vec![ColumnMetadata::new("id", SemanticType::Numeric).primary_key()],
            )
            .with_table(
                "bad-name",
                vec![ColumnMetadata::new("id", SemanticType::Numeric).primary_key()],
            )
            .with_table(
                "gamma",
                vec![ColumnMetadata::new("id", SemanticType::Numeric).primary_key()],
            )
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!(TableSelection::parse("all"), TableSelection::All);
        assert_eq!(
            TableSelection::parse("users"),
            TableSelection::One("users".into())
        );
    }

    #[test]
    fn test_table_named_all() {
        let inspector = inspector().with_table(
            "all",
            vec![ColumnMetadata::new("id", SemanticType::Numeric).primary_key()],
        );
        let mut emitter = PreviewEmitter::new();
        let options = RunOptions::new(TableSelection::One("all".into()));
        let report = run(&inspector, &mut emitter, &options).unwrap();

        assert!(report.is_success());
        assert_eq!(report.outcomes.len(), 1);
        assert!(emitter.get("controllers/all.js").is_some());
        assert!(emitter.get("controllers/alpha.js").is_none());
    }

    #[test]
    fn test_bulk_stops_at_first_failure() {
        let mut emitter = PreviewEmitter::new();
        let report = run(&inspector(), &mut emitter, &RunOptions::new("all")).unwrap();

        assert!(!report.is_success());
        assert_eq!(report.outcomes.len(), 2);
        assert!(report.outcomes[0].is_success());
        assert!(matches!(
            report.outcomes[1].error,
            Some(GenerationError::InvalidTableName { .. })
        ));
        assert_eq!(report.skipped, ["gamma"]);
        assert!(emitter.get("controllers/gamma.js").is_none());
    }

    #[test]
    fn test_bulk_continue_on_error() {
        let mut emitter = PreviewEmitter::new();
        let mut options = RunOptions::new("all");
        options.continue_on_error = true;
        let report = run(&inspector(), &mut emitter, &options).unwrap();

        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.failed().count(), 1);
        assert!(report.skipped.is_empty());
        assert!(emitter.get("controllers/gamma.js").is_some());
    }

    #[test]
    fn test_shared_artifacts_written_once_first() {
        let mut emitter = PreviewEmitter::new();
        let mut options = RunOptions::new("all");
        options.continue_on_error = true;
        let report = run(&inspector(), &mut emitter, &options).unwrap();

        let paths: Vec<_> = emitter.files().iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "config/initmysql.js",
                "utility/response.js",
                "utility/prepare.js",
                "controllers/alpha.js",
                "routes/alpha.js",
                "controllers/gamma.js",
                "routes/gamma.js",
            ]
        );
        assert_eq!(report.written().count(), 7);
    }

    #[test]
    fn test_unknown_table() {
        let mut emitter = PreviewEmitter::new();
        let report = run(&inspector(), &mut emitter, &RunOptions::new("missing")).unwrap();

        assert_eq!(report.outcomes.len(), 1);
        assert!(matches!(
            report.outcomes[0].error,
            Some(GenerationError::SchemaUnavailable { ref table, .. }) if table == "missing"
        ));
        assert!(emitter.files().is_empty());
    }

    #[test]
    fn test_empty_schema() {
        let mut emitter = PreviewEmitter::new();
        let err = run(&MemoryInspector::new(), &mut emitter, &RunOptions::new("all")).unwrap_err();
        assert!(matches!(err, GenerationError::EmptySchema));
    }

    /// Rejects every path under `prefix`.
    struct RejectingEmitter {
        prefix: &'static str,
        inner: PreviewEmitter,
    }

    impl Emitter for RejectingEmitter {
        fn write_artifact(&mut self, relative_path: &str, text: &str) -> Result<(), EmitError> {
            if relative_path.starts_with(self.prefix) {
                return Err(EmitError::InvalidPath {
                    path: relative_path.to_string(),
                });
            }
            self.inner.write_artifact(relative_path, text)
        }
    }

    #[test]
    fn test_emit_failure_keeps_written_artifacts() {
        let mut emitter = RejectingEmitter {
            prefix: "routes/",
            inner: PreviewEmitter::new(),
        };
        let report = run(&inspector(), &mut emitter, &RunOptions::new("alpha")).unwrap();

        let outcome = &report.outcomes[0];
        assert_eq!(outcome.written, ["controllers/alpha.js"]);
        assert!(matches!(
            outcome.error,
            Some(GenerationError::EmitFailure { ref path, .. }) if path == "routes/alpha.js"
        ));
        assert!(emitter.inner.get("controllers/alpha.js").is_some());
    }

    #[test]
    fn test_shared_emit_failure_aborts_run() {
        let mut emitter = RejectingEmitter {
            prefix: "config/",
            inner: PreviewEmitter::new(),
        };
        let err = run(&inspector(), &mut emitter, &RunOptions::new("alpha")).unwrap_err();
        assert!(matches!(err, GenerationError::EmitFailure { .. }));
        assert!(emitter.inner.files().is_empty());
    }

    #[test]
    fn test_without_middleware() {
        let mut emitter = PreviewEmitter::new();
        let mut options = RunOptions::new("alpha");
        options.generate_middleware = false;
        let report = run(&inspector(), &mut emitter, &options).unwrap();

        assert!(report.is_success());
        assert_eq!(report.shared, ["config/initmysql.js"]);
        assert!(emitter.get("utility/response.js").is_none());
    }
}
