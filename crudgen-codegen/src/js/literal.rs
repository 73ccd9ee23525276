//! JavaScript and SQL literal quoting.

use crudgen_core::is_js_identifier;

/// Render `value` as a single-quoted JavaScript string literal.
pub fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Quote a SQL identifier with backticks, doubling embedded backticks.
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Render an object property key, quoting it when it is not a bare identifier.
pub fn property_key(name: &str) -> String {
    if is_js_identifier(name) {
        name.to_string()
    } else {
        js_string(name)
    }
}

/// Render a member access on `object`, using bracket syntax when needed.
pub fn member(object: &str, name: &str) -> String {
    if is_js_identifier(name) {
        format!("{object}.{name}")
    } else {
        format!("{object}[{}]", js_string(name))
    }
}
