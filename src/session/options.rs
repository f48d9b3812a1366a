//! Fixed style and localization option tables.

use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// User-facing map style choice. Roadmap, light, and dark all render the
/// provider's roadmap tiles (light and dark add style-override rules);
/// satellite renders unlabeled imagery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleSelection {
    Roadmap,
    Light,
    Dark,
    #[serde(rename = "satellite_nolabels")]
    SatelliteNoLabels,
}

impl StyleSelection {
    pub const ALL: [StyleSelection; 4] = [
        StyleSelection::Roadmap,
        StyleSelection::Light,
        StyleSelection::Dark,
        StyleSelection::SatelliteNoLabels,
    ];

    /// The provider `mapType` this selection maps to.
    pub fn map_type(&self) -> &'static str {
        match self {
            StyleSelection::Roadmap | StyleSelection::Light | StyleSelection::Dark => "roadmap",
            StyleSelection::SatelliteNoLabels => "satellite",
        }
    }

    /// Whether this selection attaches a style-override ruleset.
    pub fn has_style_overrides(&self) -> bool {
        matches!(self, StyleSelection::Light | StyleSelection::Dark)
    }

    /// The option string users pick this selection by.
    pub fn as_option_str(&self) -> &'static str {
        match self {
            StyleSelection::Roadmap => "roadmap",
            StyleSelection::Light => "light",
            StyleSelection::Dark => "dark",
            StyleSelection::SatelliteNoLabels => "satellite_nolabels",
        }
    }

    /// Human-readable label for the results sidebar.
    pub fn label(&self) -> &'static str {
        match self {
            StyleSelection::Roadmap => "Roadmap",
            StyleSelection::Light => "Light (styled roadmap)",
            StyleSelection::Dark => "Dark (styled roadmap)",
            StyleSelection::SatelliteNoLabels => "Satellite (no labels)",
        }
    }
}

impl FromStr for StyleSelection {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "roadmap" => Ok(StyleSelection::Roadmap),
            "light" => Ok(StyleSelection::Light),
            "dark" => Ok(StyleSelection::Dark),
            "satellite_nolabels" => Ok(StyleSelection::SatelliteNoLabels),
            other => Err(MapError::Validation(format!(
                "invalid style option: {}",
                other
            ))),
        }
    }
}

/// User-facing localization choice, mapping to a `(language, region)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalizationSelection {
    Us,
    Cn,
    Es,
    Fr,
    De,
    Jp,
}

impl LocalizationSelection {
    pub const ALL: [LocalizationSelection; 6] = [
        LocalizationSelection::Us,
        LocalizationSelection::Cn,
        LocalizationSelection::Es,
        LocalizationSelection::Fr,
        LocalizationSelection::De,
        LocalizationSelection::Jp,
    ];

    pub fn language(&self) -> &'static str {
        match self {
            LocalizationSelection::Us => "en-US",
            LocalizationSelection::Cn => "zh-CN",
            LocalizationSelection::Es => "es-ES",
            LocalizationSelection::Fr => "fr-FR",
            LocalizationSelection::De => "de-DE",
            LocalizationSelection::Jp => "ja-JP",
        }
    }

    pub fn region(&self) -> &'static str {
        match self {
            LocalizationSelection::Us => "US",
            LocalizationSelection::Cn => "CN",
            LocalizationSelection::Es => "ES",
            LocalizationSelection::Fr => "FR",
            LocalizationSelection::De => "DE",
            LocalizationSelection::Jp => "JP",
        }
    }

    pub fn as_option_str(&self) -> &'static str {
        match self {
            LocalizationSelection::Us => "us",
            LocalizationSelection::Cn => "cn",
            LocalizationSelection::Es => "es",
            LocalizationSelection::Fr => "fr",
            LocalizationSelection::De => "de",
            LocalizationSelection::Jp => "jp",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LocalizationSelection::Us => "English (United States)",
            LocalizationSelection::Cn => "Chinese (China)",
            LocalizationSelection::Es => "Spanish (Spain)",
            LocalizationSelection::Fr => "French (France)",
            LocalizationSelection::De => "German (Germany)",
            LocalizationSelection::Jp => "Japanese (Japan)",
        }
    }
}

impl FromStr for LocalizationSelection {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "us" => Ok(LocalizationSelection::Us),
            "cn" => Ok(LocalizationSelection::Cn),
            "es" => Ok(LocalizationSelection::Es),
            "fr" => Ok(LocalizationSelection::Fr),
            "de" => Ok(LocalizationSelection::De),
            "jp" => Ok(LocalizationSelection::Jp),
            other => Err(MapError::Validation(format!(
                "invalid localization option: {}",
                other
            ))),
        }
    }
}
