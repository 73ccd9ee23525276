use super::{TableContext, guarded, success, validate_request};
use crate::{
    builder::CodeFragment,
    js::{JsObject, MethodChain, js_string},
};

/// First row returned when `from_row` is absent.
pub const DEFAULT_FROM_ROW: u32 = 0;

/// Page size when `limit` is absent.
pub const DEFAULT_LIMIT: u32 = 100;

pub(super) fn body(ctx: &TableContext<'_>) -> Vec<CodeFragment> {
    let paging = MethodChain::new("joi.number")
        .call_empty("integer")
        .call("min", "0")
        .call_empty("optional")
        .build_inline();
    let schema = JsObject::new()
        .raw("from_row", &paging)
        .raw("limit", &paging);

    let select = js_string(&format!("SELECT * FROM {} LIMIT ?, ?", ctx.quoted_table()));

    let mut body = validate_request(&schema, "req.query", ctx.settings.validation_status);
    body.push(CodeFragment::blank());
    body.push(CodeFragment::line(format!(
        "const fromRow = value.from_row ?? {DEFAULT_FROM_ROW};"
    )));
    body.push(CodeFragment::line(format!(
        "const limit = value.limit ?? {DEFAULT_LIMIT};"
    )));
    body.push(CodeFragment::line(format!("const query = {select};")));
    body.push(CodeFragment::blank());
    body.push(guarded(vec![
        CodeFragment::line("const [resp, fields] = await dbPool.query(query, [fromRow, limit]);"),
        success("prepareResponse(resp, fields)"),
    ]));
    body
}
