//! 接続設定の解決
//!
//! 優先順位: `<meta name="api-base-url">` > ビルド時の `FACE_REPORT_API_URL` > 既定値。
//! 起動時に一度だけ解決して `App` に渡す。

use std::time::Duration;

use face_report_common::config::DEFAULT_BASE_URL;
use face_report_common::ClientConfig;
use wasm_bindgen::JsValue;

const BASE_URL_META: &str = "api-base-url";
const TIMEOUT_META: &str = "api-timeout-seconds";
const BUILD_BASE_URL: Option<&str> = option_env!("FACE_REPORT_API_URL");

pub fn resolve_base_url(meta: Option<String>, build: Option<&str>) -> String {
    meta.filter(|v| !v.trim().is_empty())
        .or_else(|| build.map(str::to_string).filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

pub fn parse_timeout(meta: Option<String>) -> Option<Duration> {
    meta.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

pub fn load_client_config() -> ClientConfig {
    let base_url = resolve_base_url(read_meta(BASE_URL_META), BUILD_BASE_URL);

    let config = match ClientConfig::new(&base_url) {
        Ok(config) => config,
        Err(err) => {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "{}; falling back to {}",
                err, DEFAULT_BASE_URL
            )));
            ClientConfig::default()
        }
    };

    match parse_timeout(read_meta(TIMEOUT_META)) {
        Some(timeout) => config.with_timeout(timeout),
        None => config,
    }
}

fn read_meta(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    document
        .query_selector(&format!("meta[name=\"{}\"]", name))
        .ok()??
        .get_attribute("content")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_base_url_precedence() {
        assert_eq!(
            resolve_base_url(Some("https://meta.test".into()), Some("https://build.test")),
            "https://meta.test"
        );
        assert_eq!(resolve_base_url(Some(" ".into()), Some("https://build.test")), "https://build.test");
        assert_eq!(resolve_base_url(None, None), "http://localhost:5000");
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout(Some("30".into())), Some(Duration::from_secs(30)));
        assert_eq!(parse_timeout(Some("0".into())), None);
        assert_eq!(parse_timeout(Some("soon".into())), None);
        assert_eq!(parse_timeout(None), None);
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn add_meta(name: &str, content: &str) {
        let document = web_sys::window().and_then(|w| w.document()).expect("documentなし");
        let meta = document.create_element("meta").expect("meta作成失敗");
        meta.set_attribute("name", name).expect("属性設定失敗");
        meta.set_attribute("content", content).expect("属性設定失敗");
        document
            .body()
            .expect("bodyなし")
            .append_child(&meta)
            .expect("追加失敗");
    }

    #[wasm_bindgen_test]
    fn wasm_config_read_from_meta_tags() {
        add_meta(BASE_URL_META, "https://faces.test/");
        add_meta(TIMEOUT_META, "15");

        assert_eq!(read_meta(BASE_URL_META).as_deref(), Some("https://faces.test/"));

        let config = load_client_config();
        assert_eq!(config.base_url(), "https://faces.test");
        assert_eq!(config.timeout, Duration::from_secs(15));
    }
}
