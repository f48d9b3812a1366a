//! Request-body construction for the session-creation endpoint.

use super::options::{LocalizationSelection, StyleSelection};
use serde::Serialize;
use serde_json::{json, Value};

/// One style-override rule attached to the session request for the light
/// and dark themes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleRule {
    #[serde(rename = "featureType")]
    pub feature_type: String,
    pub stylers: Vec<Value>,
}

/// Body of the session-creation request. `styles` is present only when the
/// selected style carries override rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateSessionRequest {
    #[serde(rename = "mapType")]
    pub map_type: &'static str,
    pub language: &'static str,
    pub region: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vec<StyleRule>>,
}

/// Fixed ruleset for the light theme: desaturated, brightened roadmap.
pub fn light_style_rules() -> Vec<StyleRule> {
    vec![StyleRule {
        feature_type: "all".to_string(),
        stylers: vec![json!({ "saturation": -80 }), json!({ "lightness": 30 })],
    }]
}

/// Fixed ruleset for the dark theme: inverted lightness with reduced
/// saturation and gamma.
pub fn dark_style_rules() -> Vec<StyleRule> {
    vec![StyleRule {
        feature_type: "all".to_string(),
        stylers: vec![
            json!({ "invert_lightness": true }),
            json!({ "saturation": -50 }),
            json!({ "lightness": -20 }),
            json!({ "gamma": 0.8 }),
        ],
    }]
}

/// Builds the request body from the fixed option-to-parameter mapping.
pub fn build_session_request(
    style: StyleSelection,
    localization: LocalizationSelection,
) -> CreateSessionRequest {
    let styles = match style {
        StyleSelection::Light => Some(light_style_rules()),
        StyleSelection::Dark => Some(dark_style_rules()),
        _ => None,
    };

    CreateSessionRequest {
        map_type: style.map_type(),
        language: localization.language(),
        region: localization.region(),
        styles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_mapping_grid() {
        for style in StyleSelection::ALL {
            for localization in LocalizationSelection::ALL {
                let body = build_session_request(style, localization);
                assert_eq!(body.map_type, style.map_type());
                assert_eq!(body.language, localization.language());
                assert_eq!(body.region, localization.region());
                assert_eq!(body.styles.is_some(), style.has_style_overrides());
            }
        }
    }

    #[test]
    fn test_serialized_field_names() {
        let body = build_session_request(StyleSelection::Roadmap, LocalizationSelection::Fr);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({ "mapType": "roadmap", "language": "fr-FR", "region": "FR" })
        );
    }

    #[test]
    fn test_light_ruleset() {
        let body = build_session_request(StyleSelection::Light, LocalizationSelection::Us);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value["styles"],
            json!([{ "featureType": "all", "stylers": [{ "saturation": -80 }, { "lightness": 30 }] }])
        );
    }

    #[test]
    fn test_dark_ruleset() {
        let body = build_session_request(StyleSelection::Dark, LocalizationSelection::Jp);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value["styles"],
            json!([{
                "featureType": "all",
                "stylers": [
                    { "invert_lightness": true },
                    { "saturation": -50 },
                    { "lightness": -20 },
                    { "gamma": 0.8 }
                ]
            }])
        );
    }
}
