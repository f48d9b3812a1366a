//! Branded logo overlay asset selection.

use crate::session::StyleSelection;

/// Which logo image variant the widget should overlay. The light-background
/// variant sits on bright map imagery; the dark-background variant on
/// everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoAsset {
    LightBackground,
    DarkBackground,
}

impl LogoAsset {
    /// Asset choice per style. Roadmap is the only selection that gets the
    /// light-background variant; light, dark, and satellite all pair with
    /// the dark-background one.
    pub fn for_style(style: StyleSelection) -> Self {
        match style {
            StyleSelection::Roadmap => LogoAsset::LightBackground,
            StyleSelection::Light
            | StyleSelection::Dark
            | StyleSelection::SatelliteNoLabels => LogoAsset::DarkBackground,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            LogoAsset::LightBackground => "google_on_white.png",
            LogoAsset::DarkBackground => "google_on_non_white.png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_mapping() {
        assert_eq!(
            LogoAsset::for_style(StyleSelection::Roadmap),
            LogoAsset::LightBackground
        );
        assert_eq!(
            LogoAsset::for_style(StyleSelection::SatelliteNoLabels),
            LogoAsset::DarkBackground
        );
        assert_eq!(
            LogoAsset::for_style(StyleSelection::Dark),
            LogoAsset::DarkBackground
        );
        assert_eq!(
            LogoAsset::for_style(StyleSelection::Light),
            LogoAsset::DarkBackground
        );
    }

    #[test]
    fn test_file_names() {
        assert_eq!(LogoAsset::LightBackground.file_name(), "google_on_white.png");
        assert_eq!(
            LogoAsset::DarkBackground.file_name(),
            "google_on_non_white.png"
        );
    }
}
