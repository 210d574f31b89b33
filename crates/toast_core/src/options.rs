//! Toast option records and the single normalization step that fills in defaults.
//!
//! Raw [`ToastOptions`] mirror the loose shape callers hand in (every group optional, empty
//! string tags meaning "unset"). [`ToastOptions::resolve`] turns them into [`ResolvedOptions`]
//! once, so rendering code never re-checks optional fields.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::salvage::{self, Salvage};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors raised while decoding caller-supplied option records.
pub enum OptionsError {
    /// A type tag did not name a known variant.
    #[error("unknown {kind} `{tag}`")]
    UnknownTag {
        /// Which tag family was being parsed.
        kind: &'static str,
        /// The rejected tag text.
        tag: String,
    },
    /// A duration was negative, non-finite, or not a number.
    #[error("invalid duration `{0}`")]
    InvalidDuration(String),
    /// The input was not valid JSON for the expected record.
    #[error("invalid options json: {0}")]
    Json(String),
    /// One field of a salvaged record could not be decoded and kept its default.
    #[error("invalid `{field}`: {reason}")]
    InvalidField {
        /// Dotted path of the field.
        field: &'static str,
        /// Why decoding failed.
        reason: String,
    },
}

macro_rules! tag_enum {
    (
        $(#[$meta:meta])* $name:ident, $kind:literal,
        { $($(#[$vmeta:meta])* $variant:ident => $tag:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Returns the lowercase tag written into node attributes.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $tag),+
                }
            }
        }

        impl FromStr for $name {
            type Err = OptionsError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                match raw {
                    $($tag => Ok(Self::$variant),)+
                    other => Err(OptionsError::UnknownTag {
                        kind: $kind,
                        tag: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

tag_enum!(
    /// Semantic category of a toast; drives its default icon and styling.
    ToastType, "toast type", {
        /// Plain toast without a status icon.
        Blank => "blank",
        /// Completed operation.
        Success => "success",
        /// Operation in progress.
        Loading => "loading",
        /// Failed operation.
        Error => "error",
        /// Caller-styled toast.
        Custom => "custom",
    }
);

tag_enum!(
    /// Icon rendered at the leading edge of a toast.
    IconType, "icon type", {
        /// No icon.
        Blank => "blank",
        /// Check mark.
        Success => "success",
        /// Spinner.
        Loading => "loading",
        /// Cross mark.
        Error => "error",
        /// Caller text (usually an emoji) passed through the `icon` attribute.
        Custom => "custom",
        /// Caller markup injected into the icon node.
        Svg => "svg",
    }
);

tag_enum!(
    /// Color scheme of a toast.
    ThemeType, "theme type", {
        /// Light background.
        Light => "light",
        /// Dark background.
        Dark => "dark",
        /// Caller-provided colors from [`ThemeStyle`].
        Custom => "custom",
    }
);

impl Default for ToastType {
    fn default() -> Self {
        Self::Blank
    }
}

impl Default for ThemeType {
    fn default() -> Self {
        Self::Light
    }
}

impl From<ToastType> for IconType {
    fn from(value: ToastType) -> Self {
        match value {
            ToastType::Blank => Self::Blank,
            ToastType::Success => Self::Success,
            ToastType::Loading => Self::Loading,
            ToastType::Error => Self::Error,
            ToastType::Custom => Self::Custom,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// Icon override for a toast.
pub struct IconOptions {
    /// Explicit icon type; the toast's own type is used when unset.
    #[serde(
        rename = "type",
        deserialize_with = "optional_tag::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub icon_type: Option<IconType>,
    /// Icon text for [`IconType::Custom`] or markup for [`IconType::Svg`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// Color overrides applied when the theme type is [`ThemeType::Custom`].
pub struct ThemeStyle {
    /// Background color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Border/stroke color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Text color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ThemeStyle {
    /// Builds a style with all three colors set.
    pub fn new(
        background: impl Into<String>,
        stroke: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            background: Some(background.into()),
            stroke: Some(stroke.into()),
            color: Some(color.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// Theme selection for a toast.
pub struct ThemeOptions {
    /// Theme type; the toaster default (light) is used when unset.
    #[serde(
        rename = "type",
        deserialize_with = "optional_tag::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub theme_type: Option<ThemeType>,
    /// Colors used only when `theme_type` is [`ThemeType::Custom`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ThemeStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// Caller-facing toast configuration. Every field is optional.
pub struct ToastOptions {
    /// Icon override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconOptions>,
    /// Auto-dismiss delay, interpreted by the external animation layer.
    #[serde(with = "duration_ms", skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,
    /// Whether a close button is rendered. Decoded with JavaScript truthiness, so `null` is
    /// `false`; omitted from the serialized record unless set.
    #[serde(deserialize_with = "truthy::deserialize", skip_serializing_if = "is_false")]
    pub closeable: bool,
    /// Theme selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeOptions>,
}

impl ToastOptions {
    /// Parses options from the JSON shape used by the JavaScript API.
    ///
    /// Strict: one bad field rejects the record. Use [`Salvage::salvage`] to keep the fields that
    /// do decode.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError`] when the JSON is malformed or carries unknown tags.
    pub fn from_json(raw: &str) -> Result<Self, OptionsError> {
        serde_json::from_str(raw).map_err(|err| OptionsError::Json(err.to_string()))
    }

    /// Sets the auto-dismiss duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Renders a close button on the toast.
    pub fn closeable(mut self) -> Self {
        self.closeable = true;
        self
    }

    /// Overrides the icon type and content.
    pub fn with_icon(mut self, icon_type: IconType, content: impl Into<String>) -> Self {
        self.icon = Some(IconOptions {
            icon_type: Some(icon_type),
            content: Some(content.into()),
        });
        self
    }

    /// Selects a built-in theme.
    pub fn with_theme(mut self, theme_type: ThemeType) -> Self {
        self.theme = Some(ThemeOptions {
            theme_type: Some(theme_type),
            style: None,
        });
        self
    }

    /// Selects the custom theme with explicit colors.
    pub fn with_custom_theme(mut self, style: ThemeStyle) -> Self {
        self.theme = Some(ThemeOptions {
            theme_type: Some(ThemeType::Custom),
            style: Some(style),
        });
        self
    }

    /// Returns a copy without an auto-dismiss duration.
    pub fn without_duration(&self) -> Self {
        Self {
            duration: None,
            ..self.clone()
        }
    }

    /// Fills in every default, using `default_theme` when no theme type is given.
    pub fn resolve(&self, default_theme: ThemeType) -> ResolvedOptions {
        let icon = self.icon.as_ref();
        let theme_type = self
            .theme
            .as_ref()
            .and_then(|theme| theme.theme_type)
            .unwrap_or(default_theme);
        let style = match theme_type {
            ThemeType::Custom => self.theme.as_ref().and_then(|theme| theme.style.clone()),
            ThemeType::Light | ThemeType::Dark => None,
        };

        ResolvedOptions {
            icon_type: icon.and_then(|icon| icon.icon_type),
            icon_content: icon
                .and_then(|icon| icon.content.clone())
                .unwrap_or_default(),
            duration: self.duration.filter(|duration| !duration.is_zero()),
            closeable: self.closeable,
            theme: theme_type,
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Fully defaulted options consumed by the renderer.
pub struct ResolvedOptions {
    /// Explicit icon type, if any.
    pub icon_type: Option<IconType>,
    /// Icon content, empty when unset.
    pub icon_content: String,
    /// Non-zero auto-dismiss duration.
    pub duration: Option<Duration>,
    /// Whether a close button is rendered.
    pub closeable: bool,
    /// Effective theme.
    pub theme: ThemeType,
    /// Custom colors; present only for [`ThemeType::Custom`].
    pub style: Option<ThemeStyle>,
}

impl ResolvedOptions {
    /// Effective icon type for a toast of `toast_type`.
    pub fn icon_type_for(&self, toast_type: ToastType) -> IconType {
        self.icon_type.unwrap_or_else(|| toast_type.into())
    }

    /// Value of the item node's `duration` attribute: whole milliseconds, or empty when unset.
    pub fn duration_attribute(&self) -> String {
        self.duration
            .map(|duration| duration.as_millis().to_string())
            .unwrap_or_default()
    }

    /// Value of the icon node's `icon` attribute: the content only for custom icons.
    pub fn icon_attribute(&self) -> &str {
        match self.icon_type {
            Some(IconType::Custom) => &self.icon_content,
            _ => "",
        }
    }
}

impl Salvage for ToastOptions {
    fn salvage(value: &Value) -> (Self, Vec<OptionsError>) {
        let mut problems = Vec::new();
        let Some(entries) = salvage::record("options", value, &mut problems) else {
            return (Self::default(), problems);
        };

        let icon = entries
            .get("icon")
            .and_then(|icon| salvage_icon(icon, &mut problems));
        let duration = salvage::field(entries, "duration", "duration", &mut problems, |raw| {
            duration_ms::deserialize(raw)
        })
        .flatten();
        let closeable = entries.get("closeable").is_some_and(salvage::is_truthy);
        let theme = entries
            .get("theme")
            .and_then(|theme| salvage_theme(theme, &mut problems));

        let options = Self {
            icon,
            duration,
            closeable,
            theme,
        };
        (options, problems)
    }
}

fn salvage_icon(value: &Value, problems: &mut Vec<OptionsError>) -> Option<IconOptions> {
    let entries = salvage::record("icon", value, problems)?;
    Some(IconOptions {
        icon_type: salvage::field(entries, "type", "icon.type", problems, |raw| {
            optional_tag::deserialize::<_, IconType>(raw)
        })
        .flatten(),
        content: salvage_text(entries, "content", "icon.content", problems),
    })
}

fn salvage_theme(value: &Value, problems: &mut Vec<OptionsError>) -> Option<ThemeOptions> {
    let entries = salvage::record("theme", value, problems)?;
    let theme_type = salvage::field(entries, "type", "theme.type", problems, |raw| {
        optional_tag::deserialize::<_, ThemeType>(raw)
    })
    .flatten();
    let style = entries
        .get("style")
        .and_then(|style| salvage::record("theme.style", style, problems))
        .map(|style| ThemeStyle {
            background: salvage_text(style, "background", "theme.style.background", problems),
            stroke: salvage_text(style, "stroke", "theme.style.stroke", problems),
            color: salvage_text(style, "color", "theme.style.color", problems),
        });
    Some(ThemeOptions { theme_type, style })
}

fn salvage_text(
    entries: &serde_json::Map<String, Value>,
    key: &str,
    field: &'static str,
    problems: &mut Vec<OptionsError>,
) -> Option<String> {
    salvage::field(entries, key, field, problems, |raw| {
        Option::<String>::deserialize(raw)
    })
    .flatten()
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

mod truthy {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use crate::salvage::is_truthy;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Value::deserialize(deserializer).map(|value| is_truthy(&value))
    }
}

mod optional_tag {
    use std::str::FromStr;

    use serde::{de, Deserialize, Deserializer};

    use super::OptionsError;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr<Err = OptionsError>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(tag) => tag.parse().map(Some).map_err(de::Error::custom),
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::OptionsError;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDuration {
        Millis(u64),
        Fractional(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => serializer.serialize_u64(duration.as_millis() as u64),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let invalid =
            |raw: String| -> D::Error { de::Error::custom(OptionsError::InvalidDuration(raw)) };
        match Option::<RawDuration>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawDuration::Millis(ms)) => Ok(Some(Duration::from_millis(ms))),
            Some(RawDuration::Fractional(ms)) if ms.is_finite() && ms >= 0.0 => {
                Ok(Some(Duration::from_millis(ms as u64)))
            }
            Some(RawDuration::Fractional(ms)) => Err(invalid(ms.to_string())),
            Some(RawDuration::Text(text)) if text.trim().is_empty() => Ok(None),
            Some(RawDuration::Text(text)) => text
                .trim()
                .parse::<u64>()
                .map(|ms| Some(Duration::from_millis(ms)))
                .map_err(|_| invalid(text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_resolve_to_light_blank_without_duration() {
        let resolved = ToastOptions::default().resolve(ThemeType::Light);

        assert_eq!(
            resolved,
            ResolvedOptions {
                icon_type: None,
                icon_content: String::new(),
                duration: None,
                closeable: false,
                theme: ThemeType::Light,
                style: None,
            }
        );
        assert_eq!(resolved.duration_attribute(), "");
        assert_eq!(resolved.icon_type_for(ToastType::Error), IconType::Error);
    }

    #[test]
    fn javascript_default_shape_parses_as_unset() {
        let options = ToastOptions::from_json(
            r#"{
                "icon": { "type": "", "content": "" },
                "duration": "",
                "closeable": false,
                "theme": { "type": "light", "style": { "background": "", "color": "", "stroke": "" } }
            }"#,
        )
        .expect("parse default shape");

        let icon = options.icon.as_ref().expect("icon group");
        assert_eq!(icon.icon_type, None);
        assert_eq!(options.duration, None);
        assert_eq!(
            options.theme.as_ref().and_then(|theme| theme.theme_type),
            Some(ThemeType::Light)
        );
        assert_eq!(options.resolve(ThemeType::Dark).style, None);
    }

    #[test]
    fn durations_accept_numbers_and_numeric_strings() {
        let whole = ToastOptions::from_json(r#"{"duration": 3000}"#).expect("integer");
        let fractional = ToastOptions::from_json(r#"{"duration": 1500.0}"#).expect("float");
        let text = ToastOptions::from_json(r#"{"duration": "2500"}"#).expect("text");

        assert_eq!(whole.duration, Some(Duration::from_millis(3000)));
        assert_eq!(fractional.duration, Some(Duration::from_millis(1500)));
        assert_eq!(text.duration, Some(Duration::from_millis(2500)));
        assert_eq!(whole.resolve(ThemeType::Light).duration_attribute(), "3000");
    }

    #[test]
    fn negative_or_garbage_durations_are_rejected() {
        assert!(ToastOptions::from_json(r#"{"duration": -1}"#).is_err());
        assert!(ToastOptions::from_json(r#"{"duration": "soon"}"#).is_err());
    }

    #[test]
    fn zero_duration_renders_as_empty_sentinel() {
        let resolved = ToastOptions::default()
            .with_duration(Duration::ZERO)
            .resolve(ThemeType::Light);
        assert_eq!(resolved.duration, None);
        assert_eq!(resolved.duration_attribute(), "");
    }

    #[test]
    fn unknown_tags_are_reported() {
        let err = ToastOptions::from_json(r#"{"icon": {"type": "sparkle"}}"#)
            .expect_err("unknown icon type");
        assert!(err.to_string().contains("unknown icon type `sparkle`"));
    }

    #[test]
    fn icon_attribute_only_carries_custom_content() {
        let custom = ToastOptions::default()
            .with_icon(IconType::Custom, "🍞")
            .resolve(ThemeType::Light);
        let svg = ToastOptions::default()
            .with_icon(IconType::Svg, "<svg/>")
            .resolve(ThemeType::Light);

        assert_eq!(custom.icon_attribute(), "🍞");
        assert_eq!(svg.icon_attribute(), "");
        assert_eq!(svg.icon_type_for(ToastType::Success), IconType::Svg);
    }

    #[test]
    fn style_is_dropped_unless_theme_is_custom() {
        let options = ToastOptions {
            theme: Some(ThemeOptions {
                theme_type: Some(ThemeType::Dark),
                style: Some(ThemeStyle::new("#000", "#111", "#fff")),
            }),
            ..ToastOptions::default()
        };
        assert_eq!(options.resolve(ThemeType::Light).style, None);

        let custom =
            ToastOptions::default().with_custom_theme(ThemeStyle::new("#000", "#111", "#fff"));
        assert_eq!(
            custom.resolve(ThemeType::Light).style,
            Some(ThemeStyle::new("#000", "#111", "#fff"))
        );
    }

    #[test]
    fn null_closeable_is_falsy_and_keeps_other_fields() {
        let options =
            ToastOptions::from_json(r#"{"closeable": null, "duration": 3000}"#).expect("parse");

        assert!(!options.closeable);
        assert_eq!(options.duration, Some(Duration::from_millis(3000)));
        assert!(ToastOptions::from_json(r#"{"closeable": "yes"}"#).expect("truthy").closeable);
    }

    #[test]
    fn salvage_keeps_fields_around_an_unknown_icon_type() {
        let (options, problems) = ToastOptions::salvage(&serde_json::json!({
            "icon": { "type": "sparkle", "content": "🍞" },
            "duration": 3000,
            "closeable": 1,
            "theme": { "type": "dark" }
        }));

        assert_eq!(
            options,
            ToastOptions {
                icon: Some(IconOptions {
                    icon_type: None,
                    content: Some("🍞".to_string()),
                }),
                duration: Some(Duration::from_millis(3000)),
                closeable: true,
                theme: Some(ThemeOptions {
                    theme_type: Some(ThemeType::Dark),
                    style: None,
                }),
            }
        );
        assert_eq!(problems.len(), 1);
        assert!(problems[0]
            .to_string()
            .starts_with("invalid `icon.type`: unknown icon type `sparkle`"));
    }

    #[test]
    fn salvage_drops_only_the_fields_that_fail() {
        let (options, problems) = ToastOptions::salvage(&serde_json::json!({
            "duration": -5,
            "icon": "bread",
            "theme": {
                "type": "custom",
                "style": { "background": "#000", "stroke": 7, "color": "#fff" }
            }
        }));

        assert_eq!(options.duration, None);
        assert_eq!(options.icon, None);
        assert_eq!(
            options.theme,
            Some(ThemeOptions {
                theme_type: Some(ThemeType::Custom),
                style: Some(ThemeStyle {
                    background: Some("#000".to_string()),
                    stroke: None,
                    color: Some("#fff".to_string()),
                }),
            })
        );
        let fields: Vec<&str> = problems
            .iter()
            .map(|problem| match problem {
                OptionsError::InvalidField { field, .. } => *field,
                _ => "unexpected",
            })
            .collect();
        assert_eq!(fields, vec!["icon", "duration", "theme.style.stroke"]);
    }

    #[test]
    fn salvage_of_null_or_non_objects_falls_back_to_defaults() {
        let (from_null, null_problems) = ToastOptions::salvage(&serde_json::Value::Null);
        let (from_text, text_problems) = ToastOptions::salvage(&serde_json::json!("fast"));

        assert_eq!(from_null, ToastOptions::default());
        assert!(null_problems.is_empty());
        assert_eq!(from_text, ToastOptions::default());
        assert_eq!(text_problems.len(), 1);
    }

    #[test]
    fn unset_closeable_is_not_echoed() {
        let options = ToastOptions::default().with_duration(Duration::from_millis(1000));

        assert_eq!(
            serde_json::to_value(&options).expect("serialize"),
            serde_json::json!({ "duration": 1000 })
        );
    }

    #[test]
    fn options_serialize_back_to_javascript_shape() {
        let options = ToastOptions::default()
            .with_duration(Duration::from_millis(4000))
            .with_icon(IconType::Custom, "👏")
            .closeable();

        assert_eq!(
            serde_json::to_value(&options).expect("serialize"),
            serde_json::json!({
                "icon": { "type": "custom", "content": "👏" },
                "duration": 4000,
                "closeable": true
            })
        );
    }
}
