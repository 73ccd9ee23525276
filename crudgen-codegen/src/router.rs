//! Express router generation.

use crudgen_core::to_lower_camel;

use crate::{
    GeneratedOperation,
    builder::CodeFragment,
    js::{CodeFile, MethodChain, ModuleExports, Require, js_string, member},
};

/// Name of the variable holding the required controller module.
pub fn controller_binding(table: &str) -> String {
    format!("{}Controller", to_lower_camel(table))
}

/// Render the router module for `table`: one binding per operation, in the
/// order given.
pub fn build_router(table: &str, operations: &[GeneratedOperation]) -> String {
    let controller = controller_binding(table);

    let bindings: Vec<CodeFragment> = operations
        .iter()
        .map(|op| {
            let binding = MethodChain::new(format!("router.{}", op.http_method.router_method()))
                .arg(js_string(&op.route_path))
                .arg(member(&controller, &op.symbol_name))
                .build_inline();
            CodeFragment::line(format!("{binding};"))
        })
        .collect();

    CodeFile::new()
        .require(Require::new("express").default("express"))
        .require(Require::new(format!("../controllers/{table}.js")).default(&controller))
        .add(CodeFragment::line("const router = express.Router();"))
        .add(bindings)
        .exports(ModuleExports::value("router"))
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HttpMethod, OperationKind};

    fn op(kind: OperationKind, symbol: &str) -> GeneratedOperation {
        GeneratedOperation {
            kind,
            symbol_name: symbol.to_string(),
            source_text: String::new(),
            http_method: kind.http_method(),
            route_path: kind.route_path().to_string(),
        }
    }

    #[test]
    fn test_controller_binding() {
        assert_eq!(controller_binding("user_account"), "userAccountController");
        assert_eq!(controller_binding("Orders"), "ordersController");
    }

    #[test]
    fn test_preserves_given_order_and_duplicates() {
        let ops = [
            op(OperationKind::Delete, "deleteT"),
            op(OperationKind::Read, "getT"),
            op(OperationKind::Read, "getT"),
        ];
        let code = build_router("t", &ops);

        let bindings: Vec<_> = code.lines().filter(|l| l.starts_with("router.")).collect();
        assert_eq!(
            bindings,
            [
                "router.delete('/delete', tController.deleteT);",
                "router.get('/', tController.getT);",
                "router.get('/', tController.getT);",
            ]
        );
    }

    #[test]
    fn test_custom_method_and_path_verbatim() {
        let custom = GeneratedOperation {
            kind: OperationKind::Update,
            symbol_name: "patchT".into(),
            source_text: String::new(),
            http_method: HttpMethod::Post,
            route_path: "/it's".into(),
        };
        let code = build_router("t", &[custom]);
        assert!(code.contains("router.post('/it\\'s', tController.patchT);"));
    }

    #[test]
    fn test_empty_operation_list() {
        let code = build_router("t", &[]);
        assert_eq!(
            code,
            "const express = require('express');\nconst tController = require('../controllers/t.js');\n\nconst router = express.Router();\n\nmodule.exports = router;\n"
        );
    }
}
