//! Loading → success/error sequencing around an asynchronous operation.

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    salvage::{self, Salvage},
    OptionsError, Scene, SceneError, ToastManager, ToastOptions,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Messages shown by [`ToastManager::promise`]. Missing messages are empty strings.
pub struct PromiseMessages {
    /// Shown while the operation is pending.
    pub loading: String,
    /// Shown after the operation succeeds.
    pub success: String,
    /// Shown after the operation fails.
    pub error: String,
}

impl PromiseMessages {
    /// Builds a message set.
    pub fn new(
        loading: impl Into<String>,
        success: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            loading: loading.into(),
            success: success.into(),
            error: error.into(),
        }
    }
}

impl Salvage for PromiseMessages {
    fn salvage(value: &Value) -> (Self, Vec<OptionsError>) {
        let mut problems = Vec::new();
        let Some(entries) = salvage::record("messages", value, &mut problems) else {
            return (Self::default(), problems);
        };
        let mut message = |key: &str, field: &'static str| {
            salvage::field(entries, key, field, &mut problems, |raw| {
                Option::<String>::deserialize(raw)
            })
            .flatten()
            .unwrap_or_default()
        };
        let messages = Self {
            loading: message("loading", "messages.loading"),
            success: message("success", "messages.success"),
            error: message("error", "messages.error"),
        };
        (messages, problems)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How the awaited operation settled.
pub enum Settled<T, E> {
    /// The operation produced a value.
    Resolved(T),
    /// The operation failed; the failure was shown as an error toast.
    Rejected(E),
}

impl<T, E> Settled<T, E> {
    /// Returns whether the operation succeeded.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Converts into a standard [`Result`].
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Resolved(value) => Ok(value),
            Self::Rejected(err) => Err(err),
        }
    }
}

impl<T> Settled<T, T> {
    /// Returns whichever value the operation settled with, discarding which branch it took.
    pub fn into_inner(self) -> T {
        match self {
            Self::Resolved(value) | Self::Rejected(value) => value,
        }
    }
}

impl<T, E> From<Result<T, E>> for Settled<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Resolved(value),
            Err(err) => Self::Rejected(err),
        }
    }
}

impl<S: Scene> ToastManager<S> {
    /// Shows a loading toast while `operation` runs, then swaps it for a success or error toast.
    ///
    /// The loading toast never carries a duration; the success and error toasts use `options`
    /// unchanged. The loading toast is always dismissed before the follow-up toast is shown. A
    /// failing operation does not fail this call: it resolves with [`Settled::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns [`SceneError`] only when a toast cannot be rendered.
    pub async fn promise<F, T, E>(
        &self,
        operation: F,
        messages: &PromiseMessages,
        options: &ToastOptions,
    ) -> Result<Settled<T, E>, SceneError>
    where
        F: Future<Output = Result<T, E>>,
    {
        let loading_id = self.loading(&messages.loading, &options.without_duration())?;

        let settled = Settled::from(operation.await);
        self.dismiss(&loading_id)?;
        match &settled {
            Settled::Resolved(_) => self.success(&messages.success, options)?,
            Settled::Rejected(_) => self.error(&messages.error, options)?,
        };
        Ok(settled)
    }
}
