//! Asset availability as seen by the renderer
//!
//! Loading itself happens elsewhere; the registry only records whether each
//! asset is ready and what to print in its place when it is not.

use std::collections::HashMap;

use crate::sim::AssetId;

/// Load state of one asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetInfo {
    pub loaded: bool,
    /// Label drawn when the asset is not loaded
    pub alt_text: String,
}

#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    assets: HashMap<AssetId, AssetInfo>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset that is still loading
    pub fn register(&mut self, id: AssetId, alt_text: &str) {
        self.assets.insert(
            id,
            AssetInfo {
                loaded: false,
                alt_text: alt_text.to_string(),
            },
        );
    }

    /// Mark an asset ready. Unregistered assets are added with their name as label.
    pub fn mark_loaded(&mut self, id: &AssetId) {
        match self.assets.get_mut(id) {
            Some(info) => info.loaded = true,
            None => {
                self.assets.insert(
                    id.clone(),
                    AssetInfo {
                        loaded: true,
                        alt_text: id.to_string(),
                    },
                );
            }
        }
    }

    pub fn is_loaded(&self, id: &AssetId) -> bool {
        self.assets.get(id).is_some_and(|info| info.loaded)
    }

    /// Fallback label; the asset name when nothing better was registered
    pub fn label<'a>(&'a self, id: &'a AssetId) -> &'a str {
        self.assets
            .get(id)
            .map_or(id.as_str(), |info| info.alt_text.as_str())
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
