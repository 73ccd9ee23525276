//! Naming transforms for generated symbols.

/// Words that cannot be used as bare JavaScript identifiers.
const JS_RESERVED: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "import", "in", "instanceof", "let", "new", "null", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Convert an underscore-delimited identifier to UpperCamelCase
/// (e.g., "user_account" -> "UserAccount").
///
/// The whole input is lower-cased first. Every underscore is dropped and the
/// character after it upper-cased, so runs of underscores collapse and a
/// trailing underscore simply disappears.
pub fn to_upper_camel(identifier: &str) -> String {
    let mut result = String::with_capacity(identifier.len());
    let mut upper_next = true;

    for c in identifier.chars().flat_map(char::to_lowercase) {
        if c == '_' {
            upper_next = true;
            continue;
        }
        if upper_next {
            result.extend(c.to_uppercase());
            upper_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert an underscore-delimited identifier to lowerCamelCase
/// (e.g., "user_account" -> "userAccount").
pub fn to_lower_camel(identifier: &str) -> String {
    let upper = to_upper_camel(identifier);
    let mut chars = upper.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// Whether `name` can be written as a bare JavaScript identifier.
pub fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let valid_start = match chars.next() {
        Some(c) => c.is_ascii_alphabetic() || c == '_' || c == '$',
        None => false,
    };

    valid_start
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !JS_RESERVED.contains(&name)
}
