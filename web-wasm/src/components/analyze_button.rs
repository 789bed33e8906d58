//! 解析開始ボタン

use leptos::prelude::*;

#[component]
pub fn AnalyzeButton<FA>(
    visible: Signal<bool>,
    is_loading: Signal<bool>,
    on_analyze: FA,
) -> impl IntoView
where
    FA: Fn(()) + 'static + Clone + Send + Sync,
{
    move || {
        visible.get().then(|| {
            let on_analyze = on_analyze.clone();
            view! {
                <button
                    class="btn btn-primary"
                    disabled=move || is_loading.get()
                    aria-label=move || if is_loading.get() { "Analyzing image" } else { "Start analysis" }
                    on:click=move |_| on_analyze(())
                >
                    {move || if is_loading.get() { "Analyzing..." } else { "Start Analysis" }}
                </button>
            }
        })
    }
}
