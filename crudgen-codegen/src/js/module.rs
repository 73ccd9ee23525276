//! CommonJS `require` and `module.exports` builders.

use super::literal::js_string;
use crate::builder::{CodeFragment, Renderable};

#[derive(Debug, Clone)]
enum Binding {
    None,
    Default(String),
    Destructured(Vec<String>),
}

/// Builder for `require(...)` statements.
#[derive(Debug, Clone)]
pub struct Require {
    path: String,
    binding: Binding,
    then_call: Option<String>,
}

impl Require {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            binding: Binding::None,
            then_call: None,
        }
    }

    /// Bind the whole module (`const name = require(...)`).
    pub fn default(mut self, name: impl Into<String>) -> Self {
        self.binding = Binding::Default(name.into());
        self
    }

    /// Bind a destructured member (`const { name } = require(...)`).
    pub fn named(mut self, name: impl Into<String>) -> Self {
        match &mut self.binding {
            Binding::Destructured(names) => names.push(name.into()),
            _ => self.binding = Binding::Destructured(vec![name.into()]),
        }
        self
    }

    /// Call a method on the required module (`require(...).config()`).
    pub fn then_call(mut self, method: impl Into<String>) -> Self {
        self.then_call = Some(method.into());
        self
    }

    /// Build the statement as a string (without newline).
    pub fn build(&self) -> String {
        let mut expr = format!("require({})", js_string(&self.path));
        if let Some(method) = &self.then_call {
            expr.push_str(&format!(".{method}()"));
        }

        match &self.binding {
            Binding::None => format!("{expr};"),
            Binding::Default(name) => format!("const {name} = {expr};"),
            Binding::Destructured(names) => {
                format!("const {{ {} }} = {expr};", names.join(", "))
            }
        }
    }
}

impl Renderable for Require {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(self.build())]
    }
}

/// Builder for the `module.exports` assignment.
#[derive(Debug, Clone)]
pub enum ModuleExports {
    /// `module.exports = value;`
    Value(String),
    /// `module.exports = { a, b };`
    Names(Vec<String>),
}

impl ModuleExports {
    pub fn value(value: impl Into<String>) -> Self {
        Self::Value(value.into())
    }

    pub fn names(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::Names(names.into_iter().map(Into::into).collect())
    }
}

impl Renderable for ModuleExports {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self {
            Self::Value(value) => vec![CodeFragment::line(format!("module.exports = {value};"))],
            Self::Names(names) if names.is_empty() => {
                vec![CodeFragment::line("module.exports = {};")]
            }
            Self::Names(names) => vec![CodeFragment::closed(
                "module.exports = {",
                names
                    .iter()
                    .map(|name| CodeFragment::line(format!("{name},")))
                    .collect(),
                "};",
            )],
        }
    }
}
