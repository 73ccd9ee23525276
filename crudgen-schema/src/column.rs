//! Column metadata as consumed by the generator.

use std::fmt;

use serde::Serialize;

/// Semantic category of a column's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Numeric,
    String,
    Temporal,
    Binary,
    Other,
}

impl SemanticType {
    /// Get the lowercase name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::String => "string",
            Self::Temporal => "temporal",
            Self::Binary => "binary",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive attributes of one table column.
///
/// Produced once at the schema source boundary; all driver flag decoding
/// happens before a value of this type exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMetadata {
    pub name: String,
    pub semantic_type: SemanticType,
    pub is_primary_key: bool,
    pub is_auto_increment: bool,
    pub is_not_null: bool,
    /// No server-side default; the caller must supply a value when required.
    pub has_no_default_value: bool,
    /// Temporal column refreshed by the store on every update.
    pub is_on_update_now: bool,
}

impl ColumnMetadata {
    /// Create a nullable column with a server default and no key flags.
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
            is_primary_key: false,
            is_auto_increment: false,
            is_not_null: false,
            has_no_default_value: false,
            is_on_update_now: false,
        }
    }

    /// Mark as primary key.
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Mark as auto-increment.
    pub fn auto_increment(mut self) -> Self {
        self.is_auto_increment = true;
        self
    }

    /// Mark as not-null.
    pub fn not_null(mut self) -> Self {
        self.is_not_null = true;
        self
    }

    /// Mark as having no server-side default.
    pub fn no_default(mut self) -> Self {
        self.has_no_default_value = true;
        self
    }

    /// Mark as refreshed by the store on update.
    pub fn on_update_now(mut self) -> Self {
        self.is_on_update_now = true;
        self
    }

    /// Whether this column may identify a row (auto-increment or primary key).
    pub fn is_key_candidate(&self) -> bool {
        self.is_auto_increment || self.is_primary_key
    }

    /// Whether the column holds numbers.
    pub fn is_numeric(&self) -> bool {
        self.semantic_type == SemanticType::Numeric
    }

    /// Whether the column is a temporal value the store fills in by default.
    pub fn is_store_managed(&self) -> bool {
        self.semantic_type == SemanticType::Temporal && !self.has_no_default_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_flags() {
        let col = ColumnMetadata::new("id", SemanticType::Numeric)
            .primary_key()
            .auto_increment()
            .not_null();

        assert!(col.is_primary_key);
        assert!(col.is_auto_increment);
        assert!(col.is_not_null);
        assert!(!col.has_no_default_value);
        assert!(col.is_key_candidate());
    }

    #[test]
    fn test_store_managed() {
        let created = ColumnMetadata::new("created_at", SemanticType::Temporal);
        assert!(created.is_store_managed());

        let due = ColumnMetadata::new("due_at", SemanticType::Temporal)
            .not_null()
            .no_default();
        assert!(!due.is_store_managed());

        let name = ColumnMetadata::new("name", SemanticType::String);
        assert!(!name.is_store_managed());
    }
}
