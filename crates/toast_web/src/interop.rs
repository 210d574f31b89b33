//! Decoding and settling rules behind the JavaScript surface, kept free of `JsValue` so they run
//! on every target.

use leptos::logging;
use serde::Deserializer;
use toast_core::{Salvage, SceneError, Settled};

/// Decodes a loosely typed record, keeping every field that decodes.
///
/// `null`/`undefined` give the defaults silently. Fields that fail are logged and keep their
/// defaults; input that is not data at all gives the defaults with a warning.
pub(crate) fn salvage_or_default<'de, T, D>(what: &str, input: D) -> T
where
    T: Salvage,
    D: Deserializer<'de>,
{
    match T::salvage_from(input) {
        Ok((record, problems)) => {
            for problem in problems {
                logging::warn!("toast {what}: {problem}");
            }
            record
        }
        Err(err) => {
            logging::warn!("ignoring malformed toast {what}: {err}");
            T::default()
        }
    }
}

/// Maps a finished promise sequence to the value the JavaScript promise resolves with.
///
/// A rejected operation still resolves, with its rejection reason. Only a scene failure is
/// passed on as an error.
pub(crate) fn settle<V>(
    outcome: Result<Settled<V, V>, SceneError>,
    describe: impl FnOnce(&V) -> String,
) -> Result<V, SceneError> {
    match outcome {
        Ok(settled) => {
            if let Settled::Rejected(reason) = &settled {
                logging::log!("toast promise rejected: {}", describe(reason));
            }
            Ok(settled.into_inner())
        }
        Err(err) => {
            logging::warn!("toast promise could not render: {err}");
            Err(err)
        }
    }
}
