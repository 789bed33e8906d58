//! アップロードエリアコンポーネント
//!
//! 非表示のfile inputをボタンから開く。選択されたFileは親に渡すだけで、
//! 検証と読み込みはコントローラ側で行う

use leptos::html::Input;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement};

#[component]
pub fn UploadArea<F>(
    preview: Signal<Option<String>>,
    on_file_chosen: F,
) -> impl IntoView
where
    F: Fn(File) + 'static + Clone + Send + Sync,
{
    let input_ref = NodeRef::<Input>::new();
    let has_preview = move || preview.get().is_some();

    let on_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            on_file_chosen(file);
        }
        // 同じファイルを選び直しても change が発火するように
        input.set_value("");
    };

    let on_click = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    view! {
        <div class="upload-area">
            {move || preview.get().map(|src| view! {
                <div class="preview">
                    <img src=src alt="Upload preview" aria-label="Uploaded image preview" />
                </div>
            })}

            <input
                node_ref=input_ref
                type="file"
                accept="image/*"
                class="hidden"
                aria-label="Select image file"
                on:change=on_change
            />
            <button
                class="btn btn-secondary"
                aria-label=move || if has_preview() { "Change photo" } else { "Select photo" }
                on:click=on_click
            >
                {move || if has_preview() { "Change Photo" } else { "Select Photo" }}
            </button>
            <p class="text-muted">"JPEG, PNG and other image formats up to 4MB"</p>
        </div>
    }
}
