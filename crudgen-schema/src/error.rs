use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for crudgen-schema operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Locate the first quoted occurrence of `value` (e.g. `"user_id"`).
    pub fn find_quoted(&self, value: &str) -> Option<SourceSpan> {
        let quoted = format!("\"{}\"", value);
        self.src
            .find(&quoted)
            .map(|pos| SourceSpan::from((pos + 1, value.len())))
    }

    /// Locate `value`, preferring a quoted occurrence over a bare one.
    pub fn find(&self, value: &str) -> Option<SourceSpan> {
        self.find_quoted(value).or_else(|| {
            self.src
                .find(value)
                .map(|pos| SourceSpan::from((pos, value.len())))
        })
    }

    /// Create a parse error from a toml error.
    pub fn toml_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a parse error from a serde_json error.
    pub fn json_error(&self, source: serde_json::Error) -> Box<Error> {
        let span = line_col_offset(&self.src, source.line(), source.column())
            .map(|offset| SourceSpan::from((offset, 0)));
        Box::new(Error::Json {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error, labelled at `value` when it can be found.
    pub fn validation_error(&self, message: impl Into<String>, value: &str) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: self.find(value),
            message: message.into(),
        })
    }

    /// Create a validation error with no source label, for problems that
    /// have no text of their own to point at (such as an empty name).
    pub fn unlabeled_error(&self, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: None,
            message: message.into(),
        })
    }

    /// Create an unknown flag error.
    pub fn unknown_flag_error(&self, flag: &str, column: &str) -> Box<Error> {
        Box::new(Error::UnknownFlag {
            src: self.named_source(),
            span: self.find_quoted(flag),
            flag: flag.to_string(),
            column: column.to_string(),
        })
    }

    /// Create an unknown type name error.
    pub fn unknown_type_error(&self, name: &str, column: &str) -> Box<Error> {
        Box::new(Error::UnknownTypeName {
            src: self.named_source(),
            span: self.find_quoted(name),
            name: name.to_string(),
            column: column.to_string(),
        })
    }
}

/// Byte offset of a 1-based line/column pair.
fn line_col_offset(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    Some((line_start + column.saturating_sub(1)).min(src.len()))
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(crudgen::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", .src.name())]
    #[diagnostic(code(crudgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse {}", .src.name())]
    #[diagnostic(code(crudgen::json_error))]
    Json {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown column flag '{flag}' on column '{column}'")]
    #[diagnostic(
        code(crudgen::unknown_flag),
        help(
            "valid flags are: NOT_NULL, PRI_KEY, UNIQUE_KEY, MULTIPLE_KEY, BLOB, UNSIGNED, ZEROFILL, BINARY, ENUM, AUTO_INCREMENT, TIMESTAMP, SET, NO_DEFAULT_VALUE, ON_UPDATE_NOW, NUM"
        )
    )]
    UnknownFlag {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown flag")]
        span: Option<SourceSpan>,
        flag: String,
        column: String,
    },

    #[error("unknown column type '{name}' on column '{column}'")]
    #[diagnostic(
        code(crudgen::unknown_type),
        help("use a mysql type name such as LONG, VARCHAR or DATETIME, or the numeric type code")
    )]
    UnknownTypeName {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown type")]
        span: Option<SourceSpan>,
        name: String,
        column: String,
    },

    #[error("{message}")]
    #[diagnostic(code(crudgen::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

impl Error {
    /// Create an io error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_offset() {
        let src = "{\n  \"a\": 1,\n  \"b\": x\n}";
        assert_eq!(line_col_offset(src, 1, 1), Some(0));
        assert_eq!(line_col_offset(src, 3, 8), Some(19));
        assert_eq!(line_col_offset(src, 0, 0), None);
    }

    #[test]
    fn test_find_quoted() {
        let ctx = SourceContext::new("name = \"user_id\"", "schema.toml");
        let span = ctx.find_quoted("user_id").unwrap();
        assert_eq!(span.offset(), 8);
        assert_eq!(span.len(), 7);
        assert!(ctx.find_quoted("missing").is_none());
    }

    #[test]
    fn test_find_falls_back_to_bare_text() {
        let ctx = SourceContext::new("validation_status = 99", "crudgen.toml");
        let span = ctx.find("validation_status").unwrap();
        assert_eq!(span.offset(), 0);
        assert!(ctx.find("other").is_none());
    }
}
