//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Shared artifacts written once for the run.
    pub shared: Vec<String>,
    /// One entry per attempted table, in schema order.
    pub tables: Vec<TableResult>,
    /// Tables not attempted because an earlier table failed.
    pub skipped: Vec<String>,
    pub result: GenerationResult,
}

/// Where the generated files went.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written under this directory.
    Written(PathBuf),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

/// Outcome for one table.
#[derive(Debug)]
pub struct TableResult {
    pub table: String,
    pub written: Vec<String>,
    /// Classifier diagnostics.
    pub warnings: Vec<String>,
    pub error: Option<String>,
}

impl GenerateReport {
    /// Whether every selected table was generated.
    pub fn is_success(&self) -> bool {
        self.skipped.is_empty() && self.tables.iter().all(|t| t.error.is_none())
    }

    /// Number of files written (or previewed).
    pub fn written_count(&self) -> usize {
        self.shared.len() + self.tables.iter().map(|t| t.written.len()).sum::<usize>()
    }

    fn succeeded(&self) -> usize {
        self.tables.iter().filter(|t| t.error.is_none()).count()
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for table in &self.tables {
            for warning in &table.warnings {
                out.warning(&format!("{}: {}", table.table, warning));
            }
        }

        match &self.result {
            GenerationResult::Written(dir) => {
                if self.written_count() > 0 {
                    out.section(&format!("Written to {}", dir.display()));
                    for path in &self.shared {
                        out.added_item(path);
                    }
                    for table in &self.tables {
                        for path in &table.written {
                            out.added_item(path);
                        }
                    }
                    out.newline();
                }
            }
            GenerationResult::Preview(files) => {
                for file in files {
                    out.divider(&file.path);
                    out.preformatted(&file.content);
                }
            }
        }

        for table in &self.tables {
            if let Some(error) = &table.error {
                out.error(&format!("{}: {}", table.table, error));
            }
        }

        if !self.skipped.is_empty() {
            out.section("Skipped after failure");
            for table in &self.skipped {
                out.list_item(table);
            }
        }

        let attempted = self.tables.len() + self.skipped.len();
        out.key_value(
            "Generated",
            &format!("{} of {} table(s)", self.succeeded(), attempted),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::RecordingOutput;

    fn report() -> GenerateReport {
        GenerateReport {
            shared: vec!["config/initmysql.js".into()],
            tables: vec![
                TableResult {
                    table: "users".into(),
                    written: vec!["controllers/users.js".into(), "routes/users.js".into()],
                    warnings: vec![],
                    error: None,
                },
                TableResult {
                    table: "bad-name".into(),
                    written: vec![],
                    warnings: vec![],
                    error: Some("invalid".into()),
                },
            ],
            skipped: vec!["orders".into()],
            result: GenerationResult::Written(PathBuf::from("out")),
        }
    }

    #[test]
    fn test_counts() {
        let report = report();
        assert!(!report.is_success());
        assert_eq!(report.written_count(), 3);
    }

    #[test]
    fn test_render_written() {
        let mut out = RecordingOutput::default();
        report().render(&mut out);

        assert_eq!(
            out.lines,
            [
                "Written to out:",
                "  + config/initmysql.js",
                "  + controllers/users.js",
                "  + routes/users.js",
                "",
                "error: bad-name: invalid",
                "Skipped after failure:",
                "  - orders",
                "Generated: 1 of 3 table(s)",
            ]
        );
    }

    #[test]
    fn test_render_preview() {
        let report = GenerateReport {
            shared: vec!["a.js".into()],
            tables: vec![],
            skipped: vec![],
            result: GenerationResult::Preview(vec![PreviewFile {
                path: "a.js".into(),
                content: "x;\n".into(),
            }]),
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(out.lines[0], "── a.js ──");
        assert_eq!(out.lines[1], "x;\n");
    }
}
