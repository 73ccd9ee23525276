//! Boilerplate modules shared by every generated table.

use std::sync::LazyLock;

use crate::{
    builder::CodeFragment,
    js::{ArrowFunction, CodeFile, JsObject, ModuleExports, Require},
};

/// Relative path of the connection pool module.
pub const DB_CONFIG_PATH: &str = "config/initmysql.js";

/// Relative path of the response helper.
pub const RESPONSE_HELPER_PATH: &str = "utility/response.js";

/// Relative path of the result shaping helper.
pub const PREPARE_HELPER_PATH: &str = "utility/prepare.js";

/// Connection pool configured from `MYSQL_*` environment variables.
pub static DB_CONFIG: LazyLock<String> = LazyLock::new(|| {
    let config = JsObject::new()
        .raw("user", "process.env.MYSQL_UID")
        .raw("password", "process.env.MYSQL_PWD")
        .raw("host", "process.env.MYSQL_SERVER")
        .raw("database", "process.env.MYSQL_DB")
        .raw("port", "Number(process.env.MYSQL_PORT || 3306)");

    CodeFile::new()
        .require(Require::new("dotenv").then_call("config"))
        .require(Require::new("mysql2/promise").default("mysql"))
        .add(config.to_fragment("const config = ", ";"))
        .add(CodeFragment::line("const dbPool = mysql.createPool(config);"))
        .exports(ModuleExports::names(["dbPool"]))
        .render()
});

/// `response(res, status, message, data)` helper.
pub static RESPONSE_HELPER: LazyLock<String> = LazyLock::new(|| {
    let payload = JsObject::new()
        .raw("status", "status")
        .raw("message", "message")
        .raw("data", "data");
    let helper = ArrowFunction::new("response")
        .param("res")
        .param("status")
        .param("message")
        .param("data = null")
        .body([payload.to_fragment("return res.status(status).json(", ");")]);

    CodeFile::new()
        .add(helper)
        .exports(ModuleExports::names(["response"]))
        .render()
});

/// `prepareResponse(rows, fields)` helper shaping read results.
pub static PREPARE_HELPER: LazyLock<String> = LazyLock::new(|| {
    let shaped = JsObject::new()
        .raw("columns", "fields.map((field) => field.name)")
        .raw("count", "rows.length")
        .raw("rows", "rows");
    let helper = ArrowFunction::new("prepareResponse")
        .param("rows")
        .param("fields = []")
        .body([shaped.to_fragment("return ", ";")]);

    CodeFile::new()
        .add(helper)
        .exports(ModuleExports::names(["prepareResponse"]))
        .render()
});

/// Requires at the top of every controller.
pub static CONTROLLER_PREAMBLE: LazyLock<Vec<Require>> = LazyLock::new(|| {
    vec![
        Require::new("dotenv").then_call("config"),
        Require::new("../utility/response").named("response"),
        Require::new("../config/initmysql").named("dbPool"),
        Require::new("joi").default("joi"),
        Require::new("../utility/prepare").named("prepareResponse"),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_config() {
        insta::assert_snapshot!(DB_CONFIG.as_str(), @r"
        require('dotenv').config();
        const mysql = require('mysql2/promise');

        const config = {
          user: process.env.MYSQL_UID,
          password: process.env.MYSQL_PWD,
          host: process.env.MYSQL_SERVER,
          database: process.env.MYSQL_DB,
          port: Number(process.env.MYSQL_PORT || 3306),
        };

        const dbPool = mysql.createPool(config);

        module.exports = {
          dbPool,
        };
        ");
    }

    #[test]
    fn test_response_helper() {
        insta::assert_snapshot!(RESPONSE_HELPER.as_str(), @r"
        const response = (res, status, message, data = null) => {
          return res.status(status).json({
            status: status,
            message: message,
            data: data,
          });
        };

        module.exports = {
          response,
        };
        ");
    }

    #[test]
    fn test_prepare_helper() {
        let text = PREPARE_HELPER.as_str();
        assert!(text.starts_with("const prepareResponse = (rows, fields = []) => {\n"));
        assert!(text.contains("  return {\n    columns: fields.map((field) => field.name),\n"));
        assert!(text.ends_with("module.exports = {\n  prepareResponse,\n};\n"));
    }

    #[test]
    fn test_controller_preamble() {
        let lines: Vec<_> = CONTROLLER_PREAMBLE.iter().map(Require::build).collect();
        assert_eq!(
            lines,
            [
                "require('dotenv').config();",
                "const { response } = require('../utility/response');",
                "const { dbPool } = require('../config/initmysql');",
                "const joi = require('joi');",
                "const { prepareResponse } = require('../utility/prepare');",
            ]
        );
    }
}
