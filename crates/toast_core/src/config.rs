//! Toaster-wide configuration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    salvage::{self, Salvage},
    MarkupPolicy, OptionsError, ThemeType,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
/// Settings shared by every toast a [`crate::ToastManager`] renders.
pub struct ToasterConfig {
    /// Policy for `svg` icon content.
    pub svg_icons: MarkupPolicy,
    /// Theme used when a toast's options carry no theme type.
    pub default_theme: ThemeType,
}

impl ToasterConfig {
    /// Parses a configuration record; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Json`] when the input is not a valid configuration record.
    pub fn from_json(raw: &str) -> Result<Self, OptionsError> {
        serde_json::from_str(raw).map_err(|err| OptionsError::Json(err.to_string()))
    }

    /// Returns a copy that escapes `svg` icon content.
    pub fn hardened(self) -> Self {
        Self {
            svg_icons: MarkupPolicy::Escaped,
            ..self
        }
    }
}

impl Salvage for ToasterConfig {
    fn salvage(value: &Value) -> (Self, Vec<OptionsError>) {
        let mut problems = Vec::new();
        let Some(entries) = salvage::record("config", value, &mut problems) else {
            return (Self::default(), problems);
        };
        let defaults = Self::default();
        let config = Self {
            svg_icons: salvage::field(entries, "svgIcons", "svgIcons", &mut problems, |raw| {
                MarkupPolicy::deserialize(raw)
            })
            .unwrap_or(defaults.svg_icons),
            default_theme: salvage::field(
                entries,
                "defaultTheme",
                "defaultTheme",
                &mut problems,
                |raw| ThemeType::deserialize(raw),
            )
            .unwrap_or(defaults.default_theme),
        };
        (config, problems)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn salvage_keeps_the_valid_half_of_a_config() {
        let (config, problems) = ToasterConfig::salvage(&serde_json::json!({
            "svgIcons": "escaped",
            "defaultTheme": "neon"
        }));

        assert_eq!(config, ToasterConfig::default().hardened());
        assert_eq!(problems.len(), 1);
        assert!(problems[0].to_string().starts_with("invalid `defaultTheme`"));
    }

    #[test]
    fn empty_json_keeps_defaults() {
        let config = ToasterConfig::from_json("{}").expect("parse");
        assert_eq!(config, ToasterConfig::default());
        assert_eq!(config.svg_icons, MarkupPolicy::Trusted);
        assert_eq!(config.default_theme, ThemeType::Light);
    }

    #[test]
    fn camel_case_fields_parse() {
        let config = ToasterConfig::from_json(r#"{"svgIcons": "escaped", "defaultTheme": "dark"}"#)
            .expect("parse");
        assert_eq!(
            config,
            ToasterConfig {
                svg_icons: MarkupPolicy::Escaped,
                default_theme: ThemeType::Dark,
            }
        );
    }

    #[test]
    fn unknown_theme_is_an_error() {
        assert!(ToasterConfig::from_json(r#"{"defaultTheme": "neon"}"#).is_err());
    }
}
