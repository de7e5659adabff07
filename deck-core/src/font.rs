//! Font descriptors and fallback resolution.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::host::RenderHost;

/// Family used when a requested font cannot be loaded.
pub const FALLBACK_FAMILY: &str = "Inter";

/// Style used when a requested font cannot be loaded.
pub const FALLBACK_STYLE: &str = "Regular";

/// A font family plus style, e.g. `Inter` / `SemiBold`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Family name.
    pub family: String,
    /// Style name.
    pub style: String,
}

impl FontDescriptor {
    /// Create a descriptor.
    #[must_use]
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }

    /// The fallback descriptor (`Inter Regular`).
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(FALLBACK_FAMILY, FALLBACK_STYLE)
    }

    /// Whether this is a monospace family.
    #[must_use]
    pub fn is_monospace(&self) -> bool {
        let family = self.family.to_ascii_lowercase();
        family.contains("mono") || family.contains("courier") || family.contains("code")
    }

    /// Whether this is a serif family.
    #[must_use]
    pub fn is_serif(&self) -> bool {
        let family = self.family.to_ascii_lowercase();
        ["georgia", "playfair", "serif", "times", "garamond", "merriweather"]
            .iter()
            .any(|name| family.contains(name))
            && !family.contains("sans")
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.style)
    }
}

/// Catalogue of fonts a host can load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontBook {
    families: BTreeMap<String, BTreeSet<String>>,
}

impl FontBook {
    /// An empty catalogue.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The families used by the built-in tones.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty()
            .with_family("Inter", &["Light", "Regular", "Medium", "SemiBold", "Bold"])
            .with_family("Playfair Display", &["Regular", "Bold"])
            .with_family("Georgia", &["Regular", "Bold"])
            .with_family("JetBrains Mono", &["Light", "Regular", "Medium", "Bold"])
    }

    /// Add a family with the given styles.
    #[must_use]
    pub fn with_family(mut self, family: &str, styles: &[&str]) -> Self {
        self.add_family(family, styles);
        self
    }

    /// Add a family with the given styles in place.
    pub fn add_family(&mut self, family: &str, styles: &[&str]) {
        self.families
            .entry(family.to_string())
            .or_default()
            .extend(styles.iter().map(|s| (*s).to_string()));
    }

    /// Whether the font can be loaded.
    #[must_use]
    pub fn contains(&self, font: &FontDescriptor) -> bool {
        self.families
            .get(&font.family)
            .is_some_and(|styles| styles.contains(&font.style))
    }

    /// Number of (family, style) pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.families.values().map(BTreeSet::len).sum()
    }

    /// Whether the catalogue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Load `desired` on the host, substituting the fallback font on failure.
///
/// Returns the descriptor that should be used for the text node. This never
/// fails: if even the fallback cannot be loaded the fallback descriptor is
/// still returned and the host is left to cope.
pub async fn resolve_font<H>(host: &mut H, desired: &FontDescriptor) -> FontDescriptor
where
    H: RenderHost + ?Sized,
{
    match host.load_font(desired).await {
        Ok(()) => desired.clone(),
        Err(e) => {
            let fallback = FontDescriptor::fallback();
            tracing::warn!("Font {desired} unavailable ({e}), using {fallback}");
            if let Err(e) = host.load_font(&fallback).await {
                tracing::warn!("Fallback font {fallback} also failed to load: {e}");
            }
            fallback
        }
    }
}
