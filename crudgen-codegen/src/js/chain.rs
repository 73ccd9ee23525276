//! Method chain builder for fluent APIs such as joi schemas.

/// A method call in a chain.
#[derive(Debug, Clone)]
struct Call {
    method: String,
    args: Vec<String>,
}

/// Builder for method chains.
#[derive(Debug, Clone)]
pub struct MethodChain {
    base: String,
    base_args: Vec<String>,
    calls: Vec<Call>,
}

impl MethodChain {
    /// Create a new method chain starting with a function call.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            base_args: Vec::new(),
            calls: Vec::new(),
        }
    }

    /// Add an argument to the base function call.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.base_args.push(arg.into());
        self
    }

    /// Add a method call to the chain.
    pub fn call(mut self, method: impl Into<String>, arg: impl Into<String>) -> Self {
        self.calls.push(Call {
            method: method.into(),
            args: vec![arg.into()],
        });
        self
    }

    /// Add a method call with no arguments.
    pub fn call_empty(mut self, method: impl Into<String>) -> Self {
        self.calls.push(Call {
            method: method.into(),
            args: Vec::new(),
        });
        self
    }

    /// Build the chain as a single-line string.
    pub fn build_inline(&self) -> String {
        let mut result = format!("{}({})", self.base, self.base_args.join(", "));

        for call in &self.calls {
            result.push_str(&format!(".{}({})", call.method, call.args.join(", ")));
        }

        result
    }
}
