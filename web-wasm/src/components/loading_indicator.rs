//! 解析中インジケーター

use leptos::prelude::*;

#[component]
pub fn LoadingIndicator() -> impl IntoView {
    view! {
        <div class="loading">
            <div class="spinner" />
            <p class="loading-text">"Processing facial features..."</p>
        </div>
    }
}
