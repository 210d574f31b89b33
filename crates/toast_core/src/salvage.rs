//! Field-by-field decoding of loosely typed records.
//!
//! JavaScript callers hand in objects where any one field may carry the wrong type. A
//! [`Salvage`] record keeps every field that decodes and reports the others, where the strict
//! `Deserialize` impl would reject the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::OptionsError;

/// A record that can be rebuilt from partially valid input.
pub trait Salvage: Default + Sized {
    /// Decodes every usable field of `value`.
    ///
    /// Fields that fail to decode keep their defaults and are returned as problems. `null` gives
    /// the default record and no problems.
    fn salvage(value: &Value) -> (Self, Vec<OptionsError>);

    /// Runs [`Salvage::salvage`] over any self-describing input.
    ///
    /// # Errors
    ///
    /// Returns the deserializer's error only when the input cannot be read as data at all.
    fn salvage_from<'de, D>(input: D) -> Result<(Self, Vec<OptionsError>), D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(input)?;
        Ok(Self::salvage(&value))
    }
}

/// Returns the entries of an object; `null` gives `None` and anything else is reported.
pub(crate) fn record<'a>(
    field: &'static str,
    value: &'a Value,
    problems: &mut Vec<OptionsError>,
) -> Option<&'a Map<String, Value>> {
    match value {
        Value::Null => None,
        Value::Object(entries) => Some(entries),
        other => {
            problems.push(OptionsError::InvalidField {
                field,
                reason: format!("expected an object, found `{other}`"),
            });
            None
        }
    }
}

/// Decodes `entries[key]`. A missing key gives `None`; a failing one is reported as `field`.
pub(crate) fn field<'a, T>(
    entries: &'a Map<String, Value>,
    key: &str,
    field: &'static str,
    problems: &mut Vec<OptionsError>,
    decode: impl FnOnce(&'a Value) -> Result<T, serde_json::Error>,
) -> Option<T> {
    let value = entries.get(key)?;
    match decode(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            problems.push(OptionsError::InvalidField {
                field,
                reason: err.to_string(),
            });
            None
        }
    }
}

/// JavaScript truthiness.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn truthiness_follows_javascript() {
        let falsy = [json!(null), json!(false), json!(0), json!(0.0), json!("")];
        let truthy = [json!(true), json!(1), json!(-2.5), json!("no"), json!([]), json!({})];

        assert!(falsy.iter().all(|value| !is_truthy(value)));
        assert!(truthy.iter().all(is_truthy));
    }

    #[test]
    fn non_object_records_are_reported() {
        let mut problems = Vec::new();

        assert_eq!(record("icon", &json!(null), &mut problems), None);
        assert!(problems.is_empty());
        assert_eq!(record("icon", &json!("bread"), &mut problems), None);
        assert_eq!(
            problems,
            vec![OptionsError::InvalidField {
                field: "icon",
                reason: "expected an object, found `\"bread\"`".to_string(),
            }]
        );
    }
}
