//! Widget style documents: the minimal placeholder shown while the widget
//! boots, and the session raster style that replaces it.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const STYLE_VERSION: u8 = 8;
pub const RASTER_SOURCE_ID: &str = "session-raster-tiles";
pub const RASTER_LAYER_ID: &str = "session-raster-layer";
pub const BACKGROUND_LAYER_ID: &str = "background";
pub const PLACEHOLDER_BACKGROUND: &str = "#f0f0f0";
pub const TILE_SIZE: u32 = 256;
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 22;

/// A named tile source in a style document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceSpec {
    Raster {
        tiles: Vec<String>,
        #[serde(rename = "tileSize")]
        tile_size: u32,
    },
}

/// A rendered layer. The kind-specific fields are flattened next to `id`
/// so the serialized form matches what map widgets expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub id: String,
    #[serde(flatten)]
    pub kind: LayerKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayerKind {
    Background { paint: BackgroundPaint },
    Raster { source: String, minzoom: u8, maxzoom: u8 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundPaint {
    #[serde(rename = "background-color")]
    pub color: String,
}

/// A complete widget style: version, named sources, ordered layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDocument {
    pub version: u8,
    pub sources: BTreeMap<String, SourceSpec>,
    pub layers: Vec<LayerSpec>,
}

impl StyleDocument {
    /// Minimal placeholder style: a single background layer, no tile
    /// source. Used while the widget boots.
    pub fn placeholder() -> Self {
        Self {
            version: STYLE_VERSION,
            sources: BTreeMap::new(),
            layers: vec![LayerSpec {
                id: BACKGROUND_LAYER_ID.to_string(),
                kind: LayerKind::Background {
                    paint: BackgroundPaint {
                        color: PLACEHOLDER_BACKGROUND.to_string(),
                    },
                },
            }],
        }
    }

    /// Session raster style: exactly one raster source bound to exactly one
    /// raster layer covering zoom levels 0 through 22.
    pub fn raster(tile_url: &str) -> Self {
        let mut sources = BTreeMap::new();
        sources.insert(
            RASTER_SOURCE_ID.to_string(),
            SourceSpec::Raster {
                tiles: vec![tile_url.to_string()],
                tile_size: TILE_SIZE,
            },
        );

        Self {
            version: STYLE_VERSION,
            sources,
            layers: vec![LayerSpec {
                id: RASTER_LAYER_ID.to_string(),
                kind: LayerKind::Raster {
                    source: RASTER_SOURCE_ID.to_string(),
                    minzoom: MIN_ZOOM,
                    maxzoom: MAX_ZOOM,
                },
            }],
        }
    }

    pub fn raster_source_count(&self) -> usize {
        self.sources
            .values()
            .filter(|s| matches!(s, SourceSpec::Raster { .. }))
            .count()
    }

    /// URLs of all raster sources, in source-name order.
    pub fn tile_urls(&self) -> Vec<&str> {
        self.sources
            .values()
            .flat_map(|s| match s {
                SourceSpec::Raster { tiles, .. } => tiles.iter().map(String::as_str),
            })
            .collect()
    }

    /// Pretty-printed JSON for the results sidebar and clipboard copy.
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}
