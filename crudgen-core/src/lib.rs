//! Core utilities and types for the crudgen code generator.
//!
//! This crate provides the naming transforms used to derive generated
//! symbol names and the [`Emitter`] seam through which rendered
//! artifacts reach their destination.

mod emit;
mod naming;

// Artifact emission
pub use emit::{EmitError, Emitter, FsEmitter, PreviewEmitter, PreviewFile};
// String utilities
pub use naming::{is_js_identifier, to_lower_camel, to_upper_camel};
