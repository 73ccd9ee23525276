//! Handler generators for the four CRUD operations.
//!
//! Every handler validates its request with joi, answers validation failures
//! with the configured status and data-access failures with 500. Statements
//! are parameterized: request values travel in a bound value array, never in
//! the SQL text.

mod create;
mod delete;
mod read;
mod update;

pub use read::{DEFAULT_FROM_ROW, DEFAULT_LIMIT};

use crate::{
    ClassifiedTable, GeneratedOperation, GenerationSettings, InputField, OperationKind,
    builder::{CodeBuilder, CodeFragment},
    js::{ArrowFunction, JsObject, MethodChain, js_string, quote_ident},
};

/// Inputs shared by all operation generators for one table.
#[derive(Debug, Clone, Copy)]
pub struct TableContext<'a> {
    pub classified: &'a ClassifiedTable,
    /// UpperCamelCase table name used in symbol names.
    pub table_type: &'a str,
    pub settings: GenerationSettings,
}

impl TableContext<'_> {
    fn table(&self) -> &str {
        self.classified.table()
    }

    fn quoted_table(&self) -> String {
        quote_ident(self.table())
    }
}

/// Generate the handler for `kind`.
pub fn generate_operation(kind: OperationKind, ctx: &TableContext<'_>) -> GeneratedOperation {
    let body = match kind {
        OperationKind::Read => read::body(ctx),
        OperationKind::Create => create::body(ctx),
        OperationKind::Update => update::body(ctx),
        OperationKind::Delete => delete::body(ctx),
    };

    let symbol_name = kind.symbol_name(ctx.table_type);
    let http_method = kind.http_method();
    let handler = ArrowFunction::new(&symbol_name)
        .async_()
        .param("req")
        .param("res")
        .doc(format!("{} {}", http_method, kind.route_path()))
        .body(body);

    let mut builder = CodeBuilder::js();
    builder.emit(&handler);

    tracing::debug!(table = ctx.table(), operation = %kind, "generated operation");

    GeneratedOperation {
        kind,
        symbol_name,
        source_text: builder.build(),
        http_method,
        route_path: kind.route_path().to_string(),
    }
}

/// joi rule for one input field.
fn joi_rule(field: &InputField) -> String {
    let base = if field.is_numeric() {
        "joi.number"
    } else {
        "joi.string"
    };

    let chain = MethodChain::new(base);
    let chain = if field.is_required() {
        chain.call_empty("required")
    } else {
        chain.call_empty("optional").call("allow", "null")
    };
    chain.build_inline()
}

fn schema_for<'a>(fields: impl IntoIterator<Item = &'a InputField>) -> JsObject {
    fields
        .into_iter()
        .fold(JsObject::new(), |obj, field| obj.raw(&field.name, joi_rule(field)))
}

/// Validate `source` against `schema`, leaving the result in `value`.
fn validate_request(schema: &JsObject, source: &str, status: u16) -> Vec<CodeFragment> {
    vec![
        schema.to_fragment("const schema = joi.object(", ");"),
        CodeFragment::line(format!(
            "const {{ error, value }} = schema.validate({source});"
        )),
        CodeFragment::closed(
            "if (error) {",
            vec![CodeFragment::line(format!(
                "return response(res, {status}, error.message);"
            ))],
            "}",
        ),
    ]
}

/// Run `body` inside try/catch, answering store failures with 500.
fn guarded(body: Vec<CodeFragment>) -> CodeFragment {
    CodeFragment::sequence(vec![
        CodeFragment::block("try {", body, None),
        CodeFragment::closed(
            "} catch (err) {",
            vec![CodeFragment::line(format!(
                "return response(res, {}, err.message);",
                GenerationSettings::DATA_ACCESS_STATUS
            ))],
            "}",
        ),
    ])
}

fn success(payload: &str) -> CodeFragment {
    CodeFragment::line(format!(
        "return response(res, {}, '[Success]', {payload});",
        GenerationSettings::SUCCESS_STATUS
    ))
}

/// Body of an Update/Delete handler for a table without a key.
fn reject_without_key(ctx: &TableContext<'_>) -> Vec<CodeFragment> {
    let message = format!("table {} has no key column", ctx.table());
    vec![CodeFragment::line(format!(
        "return response(res, {}, {});",
        GenerationSettings::NO_KEY_STATUS,
        js_string(&message)
    ))]
}
