use super::{TableContext, guarded, schema_for, success, validate_request};
use crate::{
    builder::CodeFragment,
    js::{js_string, member, quote_ident},
};

/// Create: required fields always go into the column list; optional ones
/// only when the request carries a non-null value.
pub(super) fn body(ctx: &TableContext<'_>) -> Vec<CodeFragment> {
    let fields = ctx.classified.create_fields();
    let schema = schema_for(&fields);

    let mut body = validate_request(&schema, "req.body", ctx.settings.validation_status);
    body.push(CodeFragment::blank());
    body.push(CodeFragment::line("const columns = [];"));
    body.push(CodeFragment::line("const values = [];"));

    for field in &fields {
        let access = member("value", &field.name);
        let push = vec![
            CodeFragment::line(format!(
                "columns.push({});",
                js_string(&quote_ident(&field.name))
            )),
            CodeFragment::line(format!("values.push({access});")),
        ];

        if field.is_required() {
            body.extend(push);
        } else {
            body.push(CodeFragment::closed(
                format!("if ({access} != null) {{"),
                push,
                "}",
            ));
        }
    }

    let insert = js_string(&format!("INSERT INTO {} (", ctx.quoted_table()));
    body.push(CodeFragment::line("const placeholders = values.map(() => '?');"));
    body.push(CodeFragment::line(format!(
        "const query = {insert} + columns.join(', ') + ') VALUES (' + placeholders.join(', ') + ')';"
    )));
    body.push(CodeFragment::blank());
    body.push(guarded(vec![
        CodeFragment::line("const [resp] = await dbPool.query(query, values);"),
        success("resp"),
    ]));
    body
}
