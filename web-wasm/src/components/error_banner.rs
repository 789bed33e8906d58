//! エラー表示コンポーネント
//!
//! 検証エラーは閉じられる。解析失敗は次の操作まで表示したまま

use leptos::prelude::*;

#[component]
pub fn ErrorBanner<F>(
    message: Signal<Option<String>>,
    dismissable: Signal<bool>,
    on_dismiss: F,
) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    move || {
        message.get().map(|text| {
            let on_dismiss = on_dismiss.clone();
            view! {
                <div class="error-banner" role="alert">
                    <span>{text}</span>
                    <button
                        class="btn-dismiss"
                        class:hidden=move || !dismissable.get()
                        aria-label="Dismiss message"
                        on:click=move |_| on_dismiss(())
                    >
                        "×"
                    </button>
                </div>
            }
        })
    }
}
