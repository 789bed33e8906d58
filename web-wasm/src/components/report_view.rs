//! 解析レポートコンポーネント
//!
//! 表示内容は `Report::build` がすべて決める。ここは描画のみ

use face_report_common::{FeatureRow, Report};
use leptos::prelude::*;

#[component]
pub fn ReportView(report: Report) -> impl IntoView {
    let Report {
        overall,
        rows,
        summary,
        image_url,
    } = report;

    view! {
        <section class="report">
            <div class="overall">
                <h2>"Overall Score"</h2>
                <div class="overall-score">{overall}</div>
                <p class="overall-caption">"Comprehensive Facial Assessment"</p>
                {image_url.map(|url| view! {
                    <a class="image-link" href=url target="_blank" rel="noopener noreferrer">
                        "View analyzed image"
                    </a>
                })}
            </div>

            <div class="features">
                {rows
                    .into_iter()
                    .map(|row| view! { <FeatureRowView row=row /> })
                    .collect_view()}
            </div>

            <div class="summary">
                <h3>"AI Analysis Summary"</h3>
                // 改行はそのまま表示する
                <p class="summary-text">{summary}</p>
            </div>
        </section>
    }
}

/// 特徴1行（名前をクリックすると説明を開閉）
#[component]
fn FeatureRowView(row: FeatureRow) -> impl IntoView {
    let (is_open, set_is_open) = signal(false);
    let description = row.description;
    let bar_class = format!("bar-fill {}", row.bar_class());
    let bar_style = row.width_style();

    view! {
        <div class="feature-row">
            <div class="feature-head">
                <div class="popover">
                    <button
                        class="feature-label"
                        aria-expanded=move || is_open.get().to_string()
                        on:click=move |_| set_is_open.update(|open| *open = !*open)
                    >
                        {row.label}
                    </button>
                    <Show when=move || is_open.get()>
                        <div class="popover-panel">{description}</div>
                    </Show>
                </div>
                <span class="feature-score">{row.score_text}</span>
            </div>
            <div class="bar-track">
                <div class=bar_class style=bar_style />
            </div>
        </div>
    }
}
