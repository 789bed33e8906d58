//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>
                "Facial Analysis"
                <span class="subtitle">"Upload a photo for comprehensive analysis"</span>
            </h1>
        </header>
    }
}
