//! Identifier derivation from design-tool names.

use indexmap::IndexMap;
use regex::Regex;

const FALLBACK_NAME: &str = "MyVar";

/// Turns free-form layer names into identifiers usable as JSX tags and
/// stylesheet keys.
#[derive(Debug, Clone)]
pub struct CodeNames {
    leading_slashes: Regex,
    leading_digits: Regex,
    whitespace: Regex,
    invalid: Regex,
}

impl CodeNames {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            leading_slashes: Regex::new(r"^/+")?,
            leading_digits: Regex::new(r"^[0-9]+")?,
            whitespace: Regex::new(r"\s+")?,
            invalid: Regex::new(r"[^\p{L}\p{N}_$]")?,
        })
    }

    /// `"Button / Primary"` becomes `"buttonPrimary"`.
    pub fn code_friendly(&self, raw: &str) -> String {
        let name = self.leading_slashes.replace(raw, "");
        let name = self.leading_digits.replace(&name, "");
        let name = self.whitespace.replace_all(&name, "");
        let joined: String = name.split('/').map(capitalize).collect();
        let mut name = self.invalid.replace_all(&joined, "").into_owned();

        if name.starts_with(|c: char| c.is_ascii_digit()) {
            name.insert(0, '_');
        }
        if name.is_empty() {
            name = FALLBACK_NAME.to_string();
        }
        decapitalize(&name)
    }

    /// Variant properties with keys and values made code friendly.
    pub fn props(&self, properties: Option<&IndexMap<String, String>>) -> IndexMap<String, String> {
        properties
            .into_iter()
            .flatten()
            .map(|(key, value)| (self.code_friendly(key), self.code_friendly(value)))
            .collect()
    }
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
