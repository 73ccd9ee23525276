//! JavaScript (CommonJS) syntax builders.

mod chain;
mod code_file;
mod function;
mod literal;
mod module;
mod object;

pub use chain::MethodChain;
pub use code_file::{CodeFile, RawCode};
pub use function::ArrowFunction;
pub use literal::{js_string, member, property_key, quote_ident};
pub use module::{ModuleExports, Require};
pub use object::{JsObject, Property, PropertyValue};
