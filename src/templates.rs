//! Template Catalog - built-in template identifiers
//!
//! Built exactly once at start-up, read-only afterwards. The catalog only
//! feeds help output; option validation never consults it.

use log::debug;
use serde::Serialize;
use std::path::Path;

use crate::assets::{AssetSource, EmbeddedAssets, IMAGE_EXTENSION, IMAGE_PATH};

pub type TemplateId = String;

/// Derive sorted template identifiers from an asset enumeration.
///
/// Keeps assets under [`IMAGE_PATH`], takes the base name and strips
/// [`IMAGE_EXTENSION`]. The result is in ascending byte order.
pub fn build_catalog<I, S>(asset_names: I) -> Vec<TemplateId>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ids: Vec<TemplateId> = asset_names
        .into_iter()
        .filter(|asset| asset.as_ref().starts_with(IMAGE_PATH))
        .map(|asset| template_id(asset.as_ref()))
        .collect();

    ids.sort();
    ids
}

fn template_id(asset: &str) -> TemplateId {
    let base = Path::new(asset)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    base.strip_suffix(IMAGE_EXTENSION)
        .map(str::to_string)
        .unwrap_or(base)
}

/// Sorted, immutable list of built-in templates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateCatalog {
    ids: Vec<TemplateId>,
}

impl TemplateCatalog {
    pub fn from_source<S: AssetSource + ?Sized>(source: &S) -> Self {
        Self::from_names(source.asset_names())
    }

    pub fn from_names<I, S>(asset_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = build_catalog(asset_names);
        debug!("template catalog built with {} templates", ids.len());
        Self { ids }
    }

    /// Catalog of the templates compiled into the binary
    pub fn builtin() -> Self {
        Self::from_source(&EmbeddedAssets)
    }

    pub fn ids(&self) -> &[TemplateId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.binary_search_by(|probe| probe.as_str().cmp(id)).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_strips_and_sorts() {
        let ids = build_catalog([
            "data/images/y-u-no.png",
            "data/fonts/impact.ttf",
            "data/images/brace-yourselves.png",
            "other/images/kirk-khan.png",
            "data/images/ancient-aliens.png",
        ]);
        assert_eq!(ids, vec!["ancient-aliens", "brace-yourselves", "y-u-no"]);
    }

    #[test]
    fn test_empty_assets_yield_empty_catalog() {
        let ids = build_catalog(Vec::<String>::new());
        assert!(ids.is_empty());

        let catalog = TemplateCatalog::from_names(Vec::<String>::new());
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn test_byte_order_sorting() {
        // Uppercase sorts before lowercase in byte order
        let ids = build_catalog(["data/images/b.png", "data/images/B.png", "data/images/a.png"]);
        assert_eq!(ids, vec!["B", "a", "b"]);
    }

    #[test]
    fn test_only_image_extension_is_stripped() {
        let ids = build_catalog(["data/images/scroll.of.truth.png", "data/images/raw.jpg"]);
        assert_eq!(ids, vec!["raw.jpg", "scroll.of.truth"]);
    }

    #[test]
    fn test_nested_image_assets_use_base_name() {
        let ids = build_catalog(["data/images/extra/success-kid.png"]);
        assert_eq!(ids, vec!["success-kid"]);
    }

    #[test]
    fn test_builtin_catalog_is_sorted() {
        let catalog = TemplateCatalog::builtin();
        assert!(catalog.contains("kirk-khan"));
        assert!(catalog.contains("brace-yourselves"));
        assert!(!catalog.contains("kirk"));
        assert!(catalog.ids().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_deterministic() {
        let names = vec![
            "data/images/b.png".to_string(),
            "data/images/a.png".to_string(),
        ];
        assert_eq!(
            TemplateCatalog::from_source(&names),
            TemplateCatalog::from_source(&names)
        );
    }
}
