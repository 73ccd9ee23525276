//! CodeFile abstraction for structured JavaScript module generation.
//!
//! Organizes a CommonJS module into requires, body, and exports sections.

use super::{ModuleExports, Require};
use crate::builder::{CodeBuilder, CodeFragment, Renderable};

/// A structured representation of a JavaScript module.
///
/// Each section is rendered in order with blank lines between sections and
/// between body elements.
///
/// ```ignore
/// let file = CodeFile::new()
///     .require(Require::new("express").default("express"))
///     .add(handler)
///     .exports(ModuleExports::value("router"))
///     .render();
/// ```
#[derive(Default)]
pub struct CodeFile {
    requires: Vec<Require>,
    body: Vec<Vec<CodeFragment>>,
    exports: Option<ModuleExports>,
}

impl CodeFile {
    /// Create a new empty CodeFile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a require statement.
    pub fn require(mut self, require: Require) -> Self {
        self.requires.push(require);
        self
    }

    /// Add a body element (any Renderable). Elements rendering to nothing
    /// are dropped.
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        let fragments = node.to_fragments();
        if !fragments.is_empty() {
            self.body.push(fragments);
        }
        self
    }

    /// Set the module exports.
    pub fn exports(mut self, exports: ModuleExports) -> Self {
        self.exports = Some(exports);
        self
    }

    /// Render the file.
    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::js();

        for require in &self.requires {
            builder.emit(require);
        }

        if !self.requires.is_empty() && (!self.body.is_empty() || self.exports.is_some()) {
            builder.push_blank();
        }

        for (i, fragments) in self.body.iter().enumerate() {
            if i > 0 {
                builder.push_blank();
            }
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
        }

        if let Some(exports) = &self.exports {
            if !self.body.is_empty() {
                builder.push_blank();
            }
            builder.emit(exports);
        }

        builder.build()
    }
}

/// Pre-rendered code that implements Renderable.
///
/// Used to place already rendered text (such as a generated handler) in a
/// CodeFile body.
#[derive(Debug, Clone)]
pub struct RawCode(String);

impl RawCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}

impl Renderable for RawCode {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.0
            .lines()
            .map(|line| {
                if line.is_empty() {
                    CodeFragment::Blank
                } else {
                    CodeFragment::Line(line.to_string())
                }
            })
            .collect()
    }
}
