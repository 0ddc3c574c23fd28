//! Font records, the hosted-font catalog and import rules.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CatalogError;

/// Where a font is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FontKind {
    /// Available from the hosted web-font service.
    Hosted,
    /// Must be bundled with the app.
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FontRecord {
    pub kind: FontKind,
    pub family: String,
    pub style: String,
}

impl FontRecord {
    /// The `@import` rule that loads this font from the hosted service, or
    /// `None` for local fonts.
    pub fn import_rule(&self) -> Option<String> {
        (self.kind == FontKind::Hosted).then(|| hosted_import_rule(&self.family, &self.style))
    }
}

/// Fonts used by a compilation, unique by `(family, style)`.
#[derive(Debug, Clone, Default)]
pub struct FontStore {
    records: IndexMap<(String, String), FontRecord>,
}

impl FontStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a font. Returns `false` when the same family and style were
    /// already recorded.
    pub fn store(&mut self, record: FontRecord) -> bool {
        let key = (record.family.clone(), record.style.clone());
        if self.records.contains_key(&key) {
            return false;
        }
        debug!(family = %record.family, style = %record.style, kind = ?record.kind, "stored font");
        self.records.insert(key, record);
        true
    }

    pub fn records(&self) -> impl Iterator<Item = &FontRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn drain(&mut self) -> Vec<FontRecord> {
        self.records.drain(..).map(|(_, record)| record).collect()
    }
}

/// Families offered by the hosted web-font service.
#[derive(Debug, Clone)]
pub struct HostedFontCatalog {
    families: HashSet<String>,
}

/// Popular hosted families used when no catalog file is supplied.
const BUILTIN_FAMILIES: &[&str] = &[
    "Roboto",
    "Open Sans",
    "Noto Sans",
    "Noto Sans JP",
    "Noto Sans KR",
    "Noto Serif",
    "Montserrat",
    "Lato",
    "Poppins",
    "Inter",
    "Roboto Condensed",
    "Roboto Mono",
    "Roboto Slab",
    "Oswald",
    "Raleway",
    "Nunito",
    "Nunito Sans",
    "Ubuntu",
    "Rubik",
    "Playfair Display",
    "Merriweather",
    "PT Sans",
    "PT Serif",
    "Work Sans",
    "Lora",
    "Mulish",
    "Fira Sans",
    "Quicksand",
    "Barlow",
    "Manrope",
    "DM Sans",
    "Kanit",
    "Heebo",
    "IBM Plex Sans",
    "IBM Plex Mono",
    "Karla",
    "Josefin Sans",
    "Libre Baskerville",
    "Source Code Pro",
    "Space Grotesk",
    "Space Mono",
    "Archivo",
    "Bebas Neue",
    "Outfit",
    "Plus Jakarta Sans",
    "Titillium Web",
    "Cabin",
    "Dosis",
    "Inconsolata",
    "Hind",
    "Arimo",
    "Bitter",
    "Crimson Text",
    "Dancing Script",
    "Pacifico",
    "Lobster",
    "Caveat",
    "Sora",
    "Lexend",
    "Figtree",
];

impl Default for HostedFontCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    items: Vec<CatalogItem>,
}

#[derive(Deserialize)]
struct CatalogItem {
    family: String,
}

impl HostedFontCatalog {
    /// The built-in list of popular hosted families.
    pub fn builtin() -> Self {
        Self::from_families(BUILTIN_FAMILIES.iter().copied())
    }

    pub fn from_families<I, S>(families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            families: families.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a catalog in the web-font API listing shape:
    /// `{ "items": [ { "family": "Roboto", ... } ] }`.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::from_families(file.items.into_iter().map(|item| item.family)))
    }

    pub fn contains(&self, family: &str) -> bool {
        self.families.contains(family)
    }

    pub fn classify(&self, family: &str) -> FontKind {
        if self.contains(family) {
            FontKind::Hosted
        } else {
            FontKind::Local
        }
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

/// Numeric weight implied by a style name such as `"SemiBold Italic"`.
pub fn weight_from_style(style: &str) -> u32 {
    let style = style.to_lowercase().replace([' ', '-'], "");
    // Compound names first so "extrabold" is not read as "bold".
    const WEIGHTS: &[(&str, u32)] = &[
        ("thin", 100),
        ("extralight", 200),
        ("ultralight", 200),
        ("light", 300),
        ("medium", 500),
        ("semibold", 600),
        ("demibold", 600),
        ("extrabold", 800),
        ("ultrabold", 800),
        ("bold", 700),
        ("black", 900),
        ("heavy", 900),
    ];
    WEIGHTS
        .iter()
        .find(|(name, _)| style.contains(name))
        .map_or(400, |(_, weight)| *weight)
}

/// `@import` rule for a hosted family and style.
pub fn hosted_import_rule(family: &str, style: &str) -> String {
    let weight = weight_from_style(style);
    let axes = if style.to_lowercase().contains("italic") {
        format!("ital,wght@1,{weight}")
    } else {
        format!("wght@{weight}")
    };
    format!(
        "@import url('https://fonts.googleapis.com/css2?family={}:{axes}&display=swap');",
        encode_family(family)
    )
}

/// URI-component encoding with `+` for spaces.
fn encode_family(family: &str) -> String {
    let mut out = String::with_capacity(family.len());
    for byte in family.bytes() {
        match byte {
            b' ' => out.push('+'),
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => out.push(byte as char),
            b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
