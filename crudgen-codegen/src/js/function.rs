//! Arrow function declarations.

use crate::builder::{CodeFragment, Renderable};

/// A `const name = (params) => { ... };` declaration.
#[derive(Debug, Clone)]
pub struct ArrowFunction {
    name: String,
    params: Vec<String>,
    is_async: bool,
    doc: Option<String>,
    body: Vec<CodeFragment>,
}

impl ArrowFunction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            is_async: false,
            doc: None,
            body: Vec::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(name.into());
        self
    }

    pub fn async_(mut self) -> Self {
        self.is_async = true;
        self
    }

    /// Add a single-line JSDoc comment above the declaration.
    pub fn doc(mut self, text: impl Into<String>) -> Self {
        self.doc = Some(text.into());
        self
    }

    /// Append body fragments.
    pub fn body(mut self, fragments: impl IntoIterator<Item = CodeFragment>) -> Self {
        self.body.extend(fragments);
        self
    }
}

impl Renderable for ArrowFunction {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let async_kw = if self.is_async { "async " } else { "" };
        let header = format!(
            "const {} = {}({}) => {{",
            self.name,
            async_kw,
            self.params.join(", ")
        );

        let mut fragments = Vec::with_capacity(2);
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::jsdoc(doc));
        }
        fragments.push(CodeFragment::closed(header, self.body.clone(), "};"));
        fragments
    }
}
