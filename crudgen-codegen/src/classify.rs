//! Column classification into generation roles.

use std::fmt;

use crudgen_schema::{ColumnMetadata, SemanticType};

/// Role of a column in the generated operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    /// Never part of request input (auto-increment or store-managed).
    Skip,
    /// Identifies a row for Update/Delete.
    Key,
    /// Must be supplied on Create.
    RequiredInput,
    /// May be supplied on Create.
    OptionalInput,
}

impl ColumnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Key => "key",
            Self::RequiredInput => "required",
            Self::OptionalInput => "optional",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an input field must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    Required,
    Optional,
}

/// A column together with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedColumn {
    pub column: ColumnMetadata,
    pub role: ColumnRole,
    /// Participation in Create input. Independent of `role` for the key:
    /// a natural primary key is both `Key` and Create input.
    pub create: Option<Presence>,
}

/// One field of a generated request schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    pub name: String,
    pub semantic_type: SemanticType,
    pub presence: Presence,
}

impl InputField {
    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    pub fn is_numeric(&self) -> bool {
        self.semantic_type == SemanticType::Numeric
    }
}

/// Severity of a classification finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A finding reported while classifying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Column the finding refers to, if any.
    pub column: Option<String>,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            column: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
            column: None,
        }
    }

    /// Attach the column this finding refers to.
    pub fn at(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(column) = &self.column {
            write!(f, " (column '{}')", column)?;
        }
        Ok(())
    }
}

/// A table's columns after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedTable {
    table: String,
    columns: Vec<ClassifiedColumn>,
    key: Option<usize>,
    diagnostics: Vec<Diagnostic>,
}

impl ClassifiedTable {
    /// Get the table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Get the classified columns in declaration order.
    pub fn columns(&self) -> &[ClassifiedColumn] {
        &self.columns
    }

    /// Get the key column, if the table has one.
    pub fn key(&self) -> Option<&ColumnMetadata> {
        self.key.map(|i| &self.columns[i].column)
    }

    /// Findings collected during classification.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Fields accepted by Create, in declaration order.
    pub fn create_fields(&self) -> Vec<InputField> {
        self.columns
            .iter()
            .filter_map(|c| {
                c.create.map(|presence| InputField {
                    name: c.column.name.clone(),
                    semantic_type: c.column.semantic_type,
                    presence,
                })
            })
            .collect()
    }

    /// Fields Update may set. All are optional; the key is never among them.
    pub fn update_fields(&self) -> Vec<InputField> {
        self.columns
            .iter()
            .filter(|c| {
                matches!(c.role, ColumnRole::RequiredInput | ColumnRole::OptionalInput)
                    && !c.column.is_on_update_now
            })
            .map(|c| InputField {
                name: c.column.name.clone(),
                semantic_type: c.column.semantic_type,
                presence: Presence::Optional,
            })
            .collect()
    }

    /// The key as a required request field.
    pub fn key_field(&self) -> Option<InputField> {
        self.key().map(|key| InputField {
            name: key.name.clone(),
            semantic_type: key.semantic_type,
            presence: Presence::Required,
        })
    }
}

/// Classify `columns` of `table` into generation roles.
///
/// The first auto-increment or primary-key column becomes the key. Later
/// candidates are classified like ordinary columns and reported, since only
/// single-column keys are supported.
pub fn classify(table: &str, columns: &[ColumnMetadata]) -> ClassifiedTable {
    let mut key = None;
    let mut diagnostics = Vec::new();

    let classified = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let is_key = if column.is_key_candidate() {
                match key {
                    None => {
                        key = Some(i);
                        true
                    }
                    Some(_) => {
                        diagnostics.push(
                            Diagnostic::warning(
                                "additional key column ignored; only single-column keys are supported",
                            )
                            .at(&column.name),
                        );
                        false
                    }
                }
            } else {
                false
            };

            if column.semantic_type == SemanticType::Other {
                diagnostics.push(
                    Diagnostic::info("unrecognized column type, validated as string")
                        .at(&column.name),
                );
            }

            classify_column(column, is_key)
        })
        .collect();

    if key.is_none() && !columns.is_empty() {
        diagnostics.push(Diagnostic::warning(format!(
            "table '{table}' has no primary key or auto-increment column; update and delete will reject requests"
        )));
    }

    for diag in &diagnostics {
        match diag.severity {
            Severity::Warning => tracing::warn!(table, "{diag}"),
            Severity::Info => tracing::debug!(table, "{diag}"),
        }
    }

    ClassifiedTable {
        table: table.to_string(),
        columns: classified,
        key,
        diagnostics,
    }
}

fn classify_column(column: &ColumnMetadata, is_key: bool) -> ClassifiedColumn {
    let create = if column.is_auto_increment || column.is_store_managed() {
        None
    } else if column.is_not_null && column.has_no_default_value {
        Some(Presence::Required)
    } else {
        Some(Presence::Optional)
    };

    let role = if is_key {
        ColumnRole::Key
    } else {
        match create {
            None => ColumnRole::Skip,
            Some(Presence::Required) => ColumnRole::RequiredInput,
            Some(Presence::Optional) => ColumnRole::OptionalInput,
        }
    };

    ClassifiedColumn {
        column: column.clone(),
        role,
        create,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_account() -> Vec<ColumnMetadata> {
        vec![
            ColumnMetadata::new("id", SemanticType::Numeric)
                .primary_key()
                .auto_increment()
                .not_null(),
            ColumnMetadata::new("email", SemanticType::String)
                .not_null()
                .no_default(),
            ColumnMetadata::new("created_at", SemanticType::Temporal).not_null(),
        ]
    }

    fn roles(table: &ClassifiedTable) -> Vec<ColumnRole> {
        table.columns().iter().map(|c| c.role).collect()
    }

    #[test]
    fn test_user_account_roles() {
        let table = classify("user_account", &user_account());
        assert_eq!(
            roles(&table),
            [ColumnRole::Key, ColumnRole::RequiredInput, ColumnRole::Skip]
        );
        assert_eq!(table.key().map(|k| k.name.as_str()), Some("id"));
        assert!(table.diagnostics().is_empty());
    }

    #[test]
    fn test_auto_increment_never_in_create() {
        let columns = vec![
            ColumnMetadata::new("seq", SemanticType::Numeric).auto_increment(),
            ColumnMetadata::new("other_seq", SemanticType::Numeric).auto_increment(),
            ColumnMetadata::new("name", SemanticType::String),
        ];
        let table = classify("t", &columns);
        let names: Vec<_> = table.create_fields().into_iter().map(|f| f.name).collect();
        assert_eq!(names, ["name"]);
    }

    #[test]
    fn test_required_needs_not_null_and_no_default() {
        let columns = vec![
            ColumnMetadata::new("a", SemanticType::String).not_null().no_default(),
            ColumnMetadata::new("b", SemanticType::String).not_null(),
            ColumnMetadata::new("c", SemanticType::String).no_default(),
            ColumnMetadata::new("d", SemanticType::String),
        ];
        let table = classify("t", &columns);
        let presence: Vec<_> = table
            .create_fields()
            .into_iter()
            .map(|f| (f.name, f.presence))
            .collect();
        assert_eq!(
            presence,
            [
                ("a".to_string(), Presence::Required),
                ("b".to_string(), Presence::Optional),
                ("c".to_string(), Presence::Optional),
                ("d".to_string(), Presence::Optional),
            ]
        );
    }

    #[test]
    fn test_first_key_candidate_wins() {
        let columns = vec![
            ColumnMetadata::new("name", SemanticType::String),
            ColumnMetadata::new("code", SemanticType::String)
                .primary_key()
                .not_null()
                .no_default(),
            ColumnMetadata::new("seq", SemanticType::Numeric).auto_increment(),
        ];
        let table = classify("t", &columns);

        assert_eq!(table.key().map(|k| k.name.as_str()), Some("code"));
        assert_eq!(
            roles(&table),
            [ColumnRole::OptionalInput, ColumnRole::Key, ColumnRole::Skip]
        );
        assert_eq!(table.diagnostics().len(), 1);
        assert_eq!(table.diagnostics()[0].column.as_deref(), Some("seq"));
        assert_eq!(table.diagnostics()[0].severity, Severity::Warning);
    }

    #[test]
    fn test_demoted_primary_key_is_ordinary_input() {
        let columns = vec![
            ColumnMetadata::new("a", SemanticType::Numeric)
                .primary_key()
                .not_null()
                .no_default(),
            ColumnMetadata::new("b", SemanticType::Numeric)
                .primary_key()
                .not_null()
                .no_default(),
        ];
        let table = classify("pair", &columns);
        assert_eq!(roles(&table), [ColumnRole::Key, ColumnRole::RequiredInput]);

        let update: Vec<_> = table.update_fields().into_iter().map(|f| f.name).collect();
        assert_eq!(update, ["b"]);
    }

    #[test]
    fn test_natural_key_is_create_input() {
        let columns = vec![
            ColumnMetadata::new("sku", SemanticType::String)
                .primary_key()
                .not_null()
                .no_default(),
            ColumnMetadata::new("label", SemanticType::String),
        ];
        let table = classify("product", &columns);
        let create = table.create_fields();

        assert_eq!(create[0].name, "sku");
        assert!(create[0].is_required());
        assert_eq!(table.columns()[0].role, ColumnRole::Key);

        let update: Vec<_> = table.update_fields().into_iter().map(|f| f.name).collect();
        assert_eq!(update, ["label"]);
    }

    #[test]
    fn test_no_key_candidate() {
        let columns = vec![ColumnMetadata::new("message", SemanticType::String)];
        let table = classify("log", &columns);

        assert!(table.key().is_none());
        assert!(table.key_field().is_none());
        assert_eq!(table.diagnostics().len(), 1);
        assert!(table.diagnostics()[0].message.contains("no primary key"));
    }

    #[test]
    fn test_empty_table() {
        let table = classify("empty", &[]);
        assert!(table.columns().is_empty());
        assert!(table.create_fields().is_empty());
        assert!(table.update_fields().is_empty());
        assert!(table.diagnostics().is_empty());
    }

    #[test]
    fn test_key_only_table_has_empty_create_input() {
        let columns = vec![
            ColumnMetadata::new("id", SemanticType::Numeric)
                .primary_key()
                .auto_increment(),
        ];
        let table = classify("counter", &columns);
        assert!(table.create_fields().is_empty());
        assert!(table.key().is_some());
    }

    #[test]
    fn test_temporal_without_default_is_input() {
        let columns = vec![
            ColumnMetadata::new("due_at", SemanticType::Temporal)
                .not_null()
                .no_default(),
            ColumnMetadata::new("updated_at", SemanticType::Temporal).on_update_now(),
            ColumnMetadata::new("touched_at", SemanticType::Temporal)
                .no_default()
                .on_update_now(),
        ];
        let table = classify("task", &columns);
        assert_eq!(
            roles(&table),
            [
                ColumnRole::RequiredInput,
                ColumnRole::Skip,
                ColumnRole::OptionalInput
            ]
        );

        let update: Vec<_> = table.update_fields().into_iter().map(|f| f.name).collect();
        assert_eq!(update, ["due_at"]);
    }

    #[test]
    fn test_update_fields_all_optional() {
        let table = classify("user_account", &user_account());
        let update = table.update_fields();
        assert_eq!(update.len(), 1);
        assert_eq!(update[0].name, "email");
        assert_eq!(update[0].presence, Presence::Optional);

        let key = table.key_field().unwrap();
        assert_eq!(key.name, "id");
        assert!(key.is_required() && key.is_numeric());
    }

    #[test]
    fn test_other_type_reported_as_info() {
        let columns = vec![
            ColumnMetadata::new("id", SemanticType::Numeric).primary_key(),
            ColumnMetadata::new("shape", SemanticType::Other),
        ];
        let table = classify("geo", &columns);
        assert_eq!(table.diagnostics().len(), 1);
        assert_eq!(table.diagnostics()[0].severity, Severity::Info);
        assert_eq!(table.create_fields()[1].name, "shape");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::warning("ignored").at("seq");
        assert_eq!(diag.to_string(), "warning: ignored (column 'seq')");
    }
}
