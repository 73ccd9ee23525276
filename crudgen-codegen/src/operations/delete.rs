use super::{TableContext, guarded, joi_rule, reject_without_key, success, validate_request};
use crate::{
    builder::CodeFragment,
    js::{JsObject, js_string, member, quote_ident},
};

pub(super) fn body(ctx: &TableContext<'_>) -> Vec<CodeFragment> {
    let Some(key) = ctx.classified.key_field() else {
        return reject_without_key(ctx);
    };

    let schema = JsObject::new().raw(&key.name, joi_rule(&key));
    let statement = js_string(&format!(
        "DELETE FROM {} WHERE {} = ?",
        ctx.quoted_table(),
        quote_ident(&key.name)
    ));

    let mut body = validate_request(&schema, "req.body", ctx.settings.validation_status);
    body.push(CodeFragment::blank());
    body.push(CodeFragment::line(format!("const query = {statement};")));
    body.push(CodeFragment::blank());
    body.push(guarded(vec![
        CodeFragment::line(format!(
            "const [resp] = await dbPool.query(query, [{}]);",
            member("value", &key.name)
        )),
        success("resp"),
    ]));
    body
}

#[cfg(test)]
mod tests {
    use crudgen_schema::{ColumnMetadata, SemanticType};

    use super::*;
    use crate::{GenerationSettings, builder::CodeBuilder, classify};

    fn render(columns: &[ColumnMetadata]) -> String {
        let classified = classify("product", columns);
        let ctx = TableContext {
            classified: &classified,
            table_type: "Product",
            settings: GenerationSettings::default(),
        };
        let mut builder = CodeBuilder::js();
        builder.emit(&body(&ctx));
        builder.build()
    }

    #[test]
    fn test_delete_by_string_key() {
        let code = render(&[
            ColumnMetadata::new("sku", SemanticType::String)
                .primary_key()
                .not_null()
                .no_default(),
            ColumnMetadata::new("label", SemanticType::String),
        ]);

        assert!(code.starts_with("const schema = joi.object({\n  sku: joi.string().required(),\n});\n"));
        assert!(code.contains("const query = 'DELETE FROM `product` WHERE `sku` = ?';"));
        assert!(code.contains("await dbPool.query(query, [value.sku]);"));
        assert!(!code.contains("label"));
    }

    #[test]
    fn test_delete_without_key_rejects() {
        let code = render(&[ColumnMetadata::new("label", SemanticType::String)]);
        assert!(code.contains("return response(res, 405,"));
        assert!(!code.contains("dbPool"));
    }
}
