//! Stylesheet literal rendering.
//!
//! Style records are written as JavaScript object literals: keys stay bare
//! when they are valid identifiers, strings are double quoted and every
//! nested object or array opens a new indented block.

use rnflow_core::{format_number, StyleMap, StyleValue};
use rnflow_ir::IrNode;

/// `(name, style)` for every non-blank node, pre-order.
pub fn entries(root: &IrNode) -> Vec<(&str, &StyleMap)> {
    let mut out = Vec::new();
    root.walk(&mut |node| {
        if !node.is_blank() {
            out.push((node.name.as_str(), &node.style));
        }
    });
    out
}

/// The body of the `styles` object, one `name: { ... }` entry per node.
pub fn render(root: &IrNode, space: usize) -> String {
    entries(root)
        .into_iter()
        .map(|(name, style)| format!("{}: {}", quote_key(name), stringify(style, space, 0)))
        .collect::<Vec<_>>()
        .join(",\n")
}

/// Render one style record with `space` columns per level, starting at
/// column `current`.
pub fn stringify(style: &StyleMap, space: usize, current: usize) -> String {
    if style.is_empty() {
        return "{}".to_string();
    }
    let inner = " ".repeat(current + space);
    let entries: Vec<String> = style
        .iter()
        .map(|(key, value)| format!("{inner}{}: {}", quote_key(key), value_literal(value, space, current + space)))
        .collect();
    format!("{{\n{}\n{}}}", entries.join(",\n"), " ".repeat(current))
}

fn value_literal(value: &StyleValue, space: usize, current: usize) -> String {
    match value {
        StyleValue::Number(n) => format_number(*n),
        StyleValue::Str(s) => string_literal(s),
        StyleValue::Object(map) => stringify(map, space, current),
        StyleValue::List(items) if items.is_empty() => "[]".to_string(),
        StyleValue::List(items) => {
            let inner = " ".repeat(current + space);
            let elements: Vec<String> = items
                .iter()
                .map(|item| format!("{inner}{}", value_literal(item, space, current + space)))
                .collect();
            format!("[\n{}\n{}]", elements.join(",\n"), " ".repeat(current))
        }
    }
}

fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

fn quote_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        string_literal(key)
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
