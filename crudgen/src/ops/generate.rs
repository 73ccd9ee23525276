//! Generate operation - write controllers and routers for selected tables.

use std::path::Path;

use crudgen_codegen::{RunOptions, run};
use crudgen_core::{FsEmitter, PreviewEmitter};
use crudgen_schema::SchemaInspector;
use eyre::{Context, Result};

use super::error_chain;
use crate::reports::{GenerateReport, GenerationResult, PreviewFile, TableResult};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Directory generated files are written under.
    pub output_dir: &'a Path,
    /// Whether to collect files in memory instead of writing them.
    pub dry_run: bool,
    pub run: RunOptions,
}

/// Execute the generate operation.
///
/// Per-table failures end up in the report; only failures that stop the whole
/// run (no tables, shared artifacts not writable) are returned as errors.
pub fn generate(inspector: &dyn SchemaInspector, opts: GenerateOptions) -> Result<GenerateReport> {
    let (run_report, result) = if opts.dry_run {
        let mut emitter = PreviewEmitter::new();
        let report = run(inspector, &mut emitter, &opts.run).wrap_err("Generation failed")?;
        let files = emitter
            .into_files()
            .into_iter()
            .map(|f| PreviewFile {
                path: f.path,
                content: f.content,
            })
            .collect();
        (report, GenerationResult::Preview(files))
    } else {
        let mut emitter = FsEmitter::new(opts.output_dir);
        let report = run(inspector, &mut emitter, &opts.run).wrap_err("Generation failed")?;
        (report, GenerationResult::Written(opts.output_dir.to_path_buf()))
    };

    let tables = run_report
        .outcomes
        .iter()
        .map(|outcome| TableResult {
            table: outcome.table.clone(),
            written: outcome.written.clone(),
            warnings: outcome.diagnostics.iter().map(ToString::to_string).collect(),
            error: outcome.error.as_ref().map(|e| error_chain(e)),
        })
        .collect();

    Ok(GenerateReport {
        shared: run_report.shared,
        tables,
        skipped: run_report.skipped,
        result,
    })
}
