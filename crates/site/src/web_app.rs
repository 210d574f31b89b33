use std::time::Duration;

use futures::channel::oneshot;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use toast_core::{
    IconType, PromiseMessages, SceneError, ThemeStyle, ThemeType, ToastId, ToastOptions,
    ToasterConfig,
};
use toast_web::Toaster;

const CHECKMARK_SVG: &str = r#"<svg viewBox="0 0 24 24" width="20" height="20"><path d="M4 12l5 5L20 6" fill="none" stroke="currentColor" stroke-width="2"/></svg>"#;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Toast notifications" />
        <Meta name="description" content="Transient toast notifications rendered as custom elements." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DemoPage />
                </Routes>
            </main>
        </Router>
    }
}

/// `?theme=dark` on the page URL switches the default theme.
fn config_from_location() -> ToasterConfig {
    let search = window().location().search().unwrap_or_default();
    let default_theme = search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.strip_prefix("theme="))
        .find_map(|value| value.parse::<ThemeType>().ok())
        .unwrap_or_default();
    ToasterConfig {
        default_theme,
        ..ToasterConfig::default()
    }
}

fn report(result: Result<ToastId, SceneError>, last_id: WriteSignal<Option<ToastId>>) {
    match result {
        Ok(id) => last_id.set(Some(id)),
        Err(err) => logging::warn!("toast not shown: {err}"),
    }
}

async fn sleep(duration: Duration) {
    let (done, wait) = oneshot::channel::<()>();
    set_timeout(
        move || {
            let _ = done.send(());
        },
        duration,
    );
    let _ = wait.await;
}

#[component]
pub fn DemoPage() -> impl IntoView {
    let (last_id, set_last_id) = create_signal(None::<ToastId>);

    let show_blank = move |_| {
        report(
            toast_web::toast("Hello there", &ToastOptions::default()),
            set_last_id,
        )
    };
    let show_loading = move |_| {
        report(
            toast_web::loading("Working on it", &ToastOptions::default()),
            set_last_id,
        )
    };
    let show_success = move |_| {
        report(
            toast_web::success("Saved", &ToastOptions::default()),
            set_last_id,
        )
    };
    let show_error = move |_| {
        report(
            toast_web::error("Could not save", &ToastOptions::default()),
            set_last_id,
        )
    };
    let show_emoji = move |_| {
        let options = ToastOptions::default().with_icon(IconType::Custom, "🍞");
        report(toast_web::custom("Fresh toast", &options), set_last_id)
    };
    let show_svg = move |_| {
        let options = ToastOptions::default().with_icon(IconType::Svg, CHECKMARK_SVG);
        report(toast_web::custom("Drawn with svg", &options), set_last_id)
    };
    let show_closeable = move |_| {
        let options = ToastOptions::default()
            .closeable()
            .with_duration(Duration::from_secs(10));
        report(toast_web::toast("Close me", &options), set_last_id)
    };
    let show_dark = move |_| {
        let options = ToastOptions::default().with_theme(ThemeType::Dark);
        report(toast_web::toast("Dark theme", &options), set_last_id)
    };
    let show_custom_theme = move |_| {
        let options = ToastOptions::default()
            .with_custom_theme(ThemeStyle::new("#1e293b", "#f59e0b", "#f8fafc"));
        report(toast_web::toast("Custom colors", &options), set_last_id)
    };
    let dismiss_last = move |_| {
        if let Some(id) = last_id.get_untracked() {
            if let Err(err) = toast_web::dismiss(&id) {
                logging::warn!("dismiss failed: {err}");
            }
        }
    };
    let run_promise = move |fail: bool| {
        spawn_local(async move {
            let operation = async move {
                sleep(Duration::from_millis(1500)).await;
                if fail {
                    Err("upload refused")
                } else {
                    Ok("upload finished")
                }
            };
            let messages = PromiseMessages::new("Uploading", "Uploaded", "Upload failed");
            match toast_web::promise(operation, &messages, &ToastOptions::default()).await {
                Ok(settled) => logging::log!("promise settled: {}", settled.into_inner()),
                Err(err) => logging::warn!("promise toasts not shown: {err}"),
            }
        })
    };

    view! {
        <Toaster config=config_from_location() />
        <section class="toast-demo">
            <h1>"Toasts"</h1>
            <div class="toast-demo-actions">
                <button on:click=show_blank>"Blank"</button>
                <button on:click=show_loading>"Loading"</button>
                <button on:click=show_success>"Success"</button>
                <button on:click=show_error>"Error"</button>
                <button on:click=show_emoji>"Emoji icon"</button>
                <button on:click=show_svg>"SVG icon"</button>
                <button on:click=show_closeable>"Closeable"</button>
                <button on:click=show_dark>"Dark"</button>
                <button on:click=show_custom_theme>"Custom theme"</button>
                <button on:click=move |_| run_promise(false)>"Promise (resolves)"</button>
                <button on:click=move |_| run_promise(true)>"Promise (rejects)"</button>
                <button on:click=dismiss_last disabled=move || last_id.get().is_none()>
                    "Dismiss last"
                </button>
            </div>
            <p class="toast-demo-last">
                {move || match last_id.get() {
                    Some(id) => format!("Last toast: {id}"),
                    None => "No toast yet".to_string(),
                }}
            </p>
        </section>
    }
}
