//! Core operations.
//!
//! This module contains the business logic for crudgen commands,
//! separated from CLI argument parsing and output rendering.

pub mod generate;
pub mod tables;

pub use generate::generate;
pub use tables::tables;

/// Render an error and its sources as one line.
pub(crate) fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use crudgen_codegen::GenerationError;
    use crudgen_schema::InspectError;

    use super::*;

    #[test]
    fn test_error_chain_includes_sources() {
        let error = GenerationError::SchemaUnavailable {
            table: "users".into(),
            source: InspectError::UnknownTable {
                table: "users".into(),
            },
        };
        let message = error_chain(&error);
        assert!(message.starts_with("schema unavailable for table 'users': "));
        assert!(message.contains("users"));
    }
}
