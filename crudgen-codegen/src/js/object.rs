//! JavaScript object literal builder.

use super::literal::property_key;
use crate::builder::CodeFragment;

/// The value of an object property.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    /// A raw expression (will not be quoted).
    Raw(String),
    /// A nested object wrapped in `open{ ... }close`, e.g. `joi.object(` / `).required()`.
    Wrapped {
        open: String,
        object: JsObject,
        close: String,
    },
}

/// A property in a JavaScript object literal.
#[derive(Debug, Clone)]
pub struct Property {
    pub key: String,
    pub value: PropertyValue,
}

/// Builder for JavaScript object literals.
#[derive(Debug, Clone, Default)]
pub struct JsObject {
    properties: Vec<Property>,
}

impl JsObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property with a raw expression value.
    pub fn raw(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(Property {
            key: key.into(),
            value: PropertyValue::Raw(value.into()),
        });
        self
    }

    /// Add a nested object property rendered as `key: open{ ... }close`.
    pub fn wrapped(
        mut self,
        key: impl Into<String>,
        open: impl Into<String>,
        object: JsObject,
        close: impl Into<String>,
    ) -> Self {
        self.properties.push(Property {
            key: key.into(),
            value: PropertyValue::Wrapped {
                open: open.into(),
                object,
                close: close.into(),
            },
        });
        self
    }

    /// Render as `head{ ... }tail`, one property per line.
    ///
    /// An empty object stays on one line (`head{}tail`).
    pub fn to_fragment(&self, head: &str, tail: &str) -> CodeFragment {
        if self.properties.is_empty() {
            return CodeFragment::line(format!("{head}{{}}{tail}"));
        }

        let body = self
            .properties
            .iter()
            .map(|prop| {
                let key = property_key(&prop.key);
                match &prop.value {
                    PropertyValue::Raw(value) => CodeFragment::line(format!("{key}: {value},")),
                    PropertyValue::Wrapped {
                        open,
                        object,
                        close,
                    } => object.to_fragment(&format!("{key}: {open}"), &format!("{close},")),
                }
            })
            .collect();

        CodeFragment::closed(format!("{head}{{"), body, format!("}}{tail}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CodeBuilder;

    fn render(fragment: CodeFragment) -> String {
        let mut builder = CodeBuilder::js();
        builder.apply_fragment(fragment);
        builder.build()
    }

    #[test]
    fn test_empty_object_is_inline() {
        let code = render(JsObject::new().to_fragment("const schema = joi.object(", ");"));
        assert_eq!(code, "const schema = joi.object({});\n");
    }

    #[test]
    fn test_raw_properties() {
        let obj = JsObject::new()
            .raw("email", "joi.string().required()")
            .raw("first-name", "joi.string()");
        let code = render(obj.to_fragment("const schema = joi.object(", ");"));
        assert_eq!(
            code,
            "const schema = joi.object({\n  email: joi.string().required(),\n  'first-name': joi.string(),\n});\n"
        );
    }

    #[test]
    fn test_wrapped_nested_object() {
        let fields = JsObject::new().raw("email", "joi.string()");
        let obj = JsObject::new()
            .raw("id", "joi.number().required()")
            .wrapped("fields", "joi.object(", fields, ").required()");
        let code = render(obj.to_fragment("x(", ");"));
        assert_eq!(
            code,
            "x({\n  id: joi.number().required(),\n  fields: joi.object({\n    email: joi.string(),\n  }).required(),\n});\n"
        );
    }
}
