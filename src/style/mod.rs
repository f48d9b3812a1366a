//! Widget style documents and the branded logo overlay.

pub mod document;
pub mod logo;

pub use document::{StyleDocument, RASTER_LAYER_ID, RASTER_SOURCE_ID};
pub use logo::LogoAsset;
