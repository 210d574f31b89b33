use leptos::{logging, *};
use toast_core::ToasterConfig;

#[component]
/// Renders the `wc-toast` container that every toast is appended to.
///
/// Mount exactly one per document; with zero or several containers toast creation fails. When
/// `config` is given it is applied to the page toaster before any toast is shown.
pub fn Toaster(
    /// Configuration for the page toaster.
    #[prop(optional)]
    config: Option<ToasterConfig>,
    /// Extra class for the container.
    #[prop(optional)]
    layout_class: Option<&'static str>,
) -> impl IntoView {
    if let Some(config) = config {
        if let Err(err) = crate::install(config) {
            logging::warn!("toaster config not applied: {err}");
        }
    }

    view! {
        <wc-toast class=layout_class data-ui-kind="toaster"></wc-toast>
    }
}
