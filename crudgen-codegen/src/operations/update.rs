use super::{
    TableContext, guarded, joi_rule, reject_without_key, schema_for, success, validate_request,
};
use crate::{
    builder::CodeFragment,
    js::{JsObject, js_string, member, quote_ident},
};

/// Request property holding the new column values.
const FIELDS_WRAPPER: &str = "fields";

/// Wrapper property name that does not collide with the key column.
fn fields_wrapper(key: &str) -> String {
    let mut name = FIELDS_WRAPPER.to_string();
    while name == key {
        name.push('_');
    }
    name
}

pub(super) fn body(ctx: &TableContext<'_>) -> Vec<CodeFragment> {
    let Some(key) = ctx.classified.key_field() else {
        return reject_without_key(ctx);
    };

    let fields = ctx.classified.update_fields();
    let wrapper = fields_wrapper(&key.name);
    let schema = JsObject::new().raw(&key.name, joi_rule(&key)).wrapped(
        &wrapper,
        "joi.object(",
        schema_for(&fields),
        ").required()",
    );

    let status = ctx.settings.validation_status;
    let mut body = validate_request(&schema, "req.body", status);
    body.push(CodeFragment::blank());
    body.push(CodeFragment::line("const assignments = [];"));
    body.push(CodeFragment::line("const values = [];"));

    let fields_object = member("value", &wrapper);
    for field in &fields {
        let access = member(&fields_object, &field.name);
        let assignment = format!("{} = ?", quote_ident(&field.name));
        body.push(CodeFragment::closed(
            format!("if ({access} != null) {{"),
            vec![
                CodeFragment::line(format!("assignments.push({});", js_string(&assignment))),
                CodeFragment::line(format!("values.push({access});")),
            ],
            "}",
        ));
    }

    body.push(CodeFragment::closed(
        "if (assignments.length === 0) {",
        vec![CodeFragment::line(format!(
            "return response(res, {status}, 'no fields to update');"
        ))],
        "}",
    ));

    let head = js_string(&format!("UPDATE {} SET ", ctx.quoted_table()));
    let tail = js_string(&format!(" WHERE {} = ?", quote_ident(&key.name)));
    body.push(CodeFragment::line(format!(
        "values.push({});",
        member("value", &key.name)
    )));
    body.push(CodeFragment::line(format!(
        "const query = {head} + assignments.join(', ') + {tail};"
    )));
    body.push(CodeFragment::blank());
    body.push(guarded(vec![
        CodeFragment::line("const [resp] = await dbPool.query(query, values);"),
        success("resp"),
    ]));
    body
}

#[cfg(test)]
mod tests {
    use crudgen_schema::{ColumnMetadata, SemanticType};

    use super::*;
    use crate::{GenerationSettings, builder::CodeBuilder, classify};

    fn render(table: &str, columns: &[ColumnMetadata]) -> String {
        let classified = classify(table, columns);
        let ctx = TableContext {
            classified: &classified,
            table_type: "T",
            settings: GenerationSettings::default(),
        };
        let mut builder = CodeBuilder::js();
        builder.emit(&body(&ctx));
        builder.build()
    }

    #[test]
    fn test_update_body() {
        let code = render(
            "user_account",
            &[
                ColumnMetadata::new("id", SemanticType::Numeric)
                    .primary_key()
                    .auto_increment(),
                ColumnMetadata::new("email", SemanticType::String)
                    .not_null()
                    .no_default(),
                ColumnMetadata::new("created_at", SemanticType::Temporal),
            ],
        );

        assert!(code.contains(
            "  id: joi.number().required(),\n  fields: joi.object({\n    email: joi.string().optional().allow(null),\n  }).required(),\n"
        ));
        assert!(code.contains("if (value.fields.email != null) {"));
        assert!(code.contains("assignments.push('`email` = ?');"));
        assert!(code.contains("if (assignments.length === 0) {\n  return response(res, 400, 'no fields to update');\n}"));
        assert!(code.contains("values.push(value.id);"));
        assert!(code.contains(
            "const query = 'UPDATE `user_account` SET ' + assignments.join(', ') + ' WHERE `id` = ?';"
        ));
        assert!(!code.contains("created_at"));
    }

    #[test]
    fn test_key_named_like_wrapper() {
        let code = render(
            "tag",
            &[
                ColumnMetadata::new("fields", SemanticType::Numeric)
                    .primary_key()
                    .auto_increment(),
                ColumnMetadata::new("label", SemanticType::String),
            ],
        );

        assert_eq!(code.matches("  fields: ").count(), 1);
        assert!(code.contains(
            "  fields: joi.number().required(),\n  fields_: joi.object({\n    label: joi.string().optional().allow(null),\n  }).required(),\n"
        ));
        assert!(code.contains("if (value.fields_.label != null) {"));
        assert!(code.contains("values.push(value.fields);"));
        assert!(code.contains("' WHERE `fields` = ?'"));
    }

    #[test]
    fn test_fields_wrapper() {
        assert_eq!(fields_wrapper("id"), "fields");
        assert_eq!(fields_wrapper("fields"), "fields_");
    }

    #[test]
    fn test_update_with_no_updatable_fields() {
        let code = render(
            "counter",
            &[ColumnMetadata::new("id", SemanticType::Numeric)
                .primary_key()
                .auto_increment()],
        );

        assert!(code.contains("fields: joi.object({}).required(),"));
        assert!(code.contains("if (assignments.length === 0) {"));
    }

    #[test]
    fn test_update_without_key_rejects() {
        let code = render("log", &[ColumnMetadata::new("message", SemanticType::String)]);
        assert_eq!(
            code,
            "return response(res, 405, 'table log has no key column');\n"
        );
    }
}
