//! Asset collection for rnflow compilations.
//!
//! The resolver records every font and image it touches. [`AssetStores`]
//! bundles the accumulators and gives them an explicit lifecycle: `begin`
//! before a compilation, `drain` after it.

pub mod errors;
pub mod fonts;
pub mod media;

use serde::Serialize;

pub use errors::{CatalogError, MediaError};
pub use fonts::{hosted_import_rule, weight_from_style, FontKind, FontRecord, FontStore, HostedFontCatalog};
pub use media::{MediaKind, MediaRecord, MediaStore};

/// Everything a compilation collected.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectedAssets {
    pub fonts: Vec<FontRecord>,
    pub media: Vec<MediaRecord>,
}

impl CollectedAssets {
    /// `@import` rules for the hosted fonts, in first-use order.
    pub fn hosted_import_rules(&self) -> Vec<String> {
        self.fonts.iter().filter_map(FontRecord::import_rule).collect()
    }

    pub fn local_fonts(&self) -> impl Iterator<Item = &FontRecord> {
        self.fonts.iter().filter(|font| font.kind == FontKind::Local)
    }
}

/// Font and media accumulators for one compilation at a time.
#[derive(Debug, Clone, Default)]
pub struct AssetStores {
    pub fonts: FontStore,
    pub media: MediaStore,
    catalog: HostedFontCatalog,
}

impl AssetStores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: HostedFontCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Start a fresh collection.
    pub fn begin(&mut self) {
        self.clear();
    }

    /// Record a font, classifying it against the hosted catalog.
    pub fn register_font(&mut self, family: &str, style: &str) {
        let kind = self.catalog.classify(family);
        self.fonts.store(FontRecord {
            kind,
            family: family.to_string(),
            style: style.to_string(),
        });
    }

    /// Take everything collected since `begin`, leaving the stores empty.
    pub fn drain(&mut self) -> CollectedAssets {
        CollectedAssets {
            fonts: self.fonts.drain(),
            media: self.media.drain(),
        }
    }

    pub fn clear(&mut self) {
        self.fonts.clear();
        self.media.clear();
    }
}
