//! fetch APIによる送受信
//!
//! - upload: FormData (multipart) で `file` フィールドを送る
//! - generate-summary: JSON本文
//!
//! タイムアウトはタイマーとの競争で判定する。fetch自体は中断しない。

use std::future::Future;
use std::time::Duration;

use face_report_common::{AnalysisTransport, HttpReply, SelectedFile, TransportError, UPLOAD_FIELD};
use futures::future::{select, Either};
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

pub struct FetchTransport {
    timeout_ms: u32,
}

impl FetchTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout_ms: timeout_millis(timeout),
        }
    }

    async fn send(&self, request: Request) -> Result<HttpReply, TransportError> {
        race_timeout(fetch_reply(request), self.timeout_ms).await
    }
}

/// 応答とタイマーを競争させ、タイマーが先なら Timeout
pub async fn race_timeout<F>(reply: F, timeout_ms: u32) -> Result<HttpReply, TransportError>
where
    F: Future<Output = Result<HttpReply, TransportError>>,
{
    let reply = Box::pin(reply);
    let timer = Box::pin(TimeoutFuture::new(timeout_ms));

    match select(reply, timer).await {
        Either::Left((reply, _)) => reply,
        Either::Right(_) => Err(TransportError::Timeout),
    }
}

/// アップロード用のFormData（`file` フィールドにファイル名とMIMEタイプ付きで入れる）
pub fn upload_form(file: &SelectedFile) -> Result<FormData, TransportError> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(&file.media_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;

    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, &file.name)
        .map_err(js_error)?;
    Ok(form)
}

impl AnalysisTransport for FetchTransport {
    async fn post_file(&self, url: &str, file: &SelectedFile) -> Result<HttpReply, TransportError> {
        let form = upload_form(file)?;

        // Content-Typeはブラウザがboundary付きで付ける
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&form);

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
        self.send(request).await
    }

    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpReply, TransportError> {
        let body = serde_json::to_string(body).map_err(|e| TransportError::Network(e.to_string()))?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;
        self.send(request).await
    }
}

async fn fetch_reply(request: Request) -> Result<HttpReply, TransportError> {
    let window = web_sys::window()
        .ok_or_else(|| TransportError::Network("window is unavailable".to_string()))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;
    let status = resp.status();

    let text = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;

    Ok(HttpReply::new(status, text.as_string().unwrap_or_default()))
}

fn js_error(value: JsValue) -> TransportError {
    TransportError::Network(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

/// タイマー用のミリ秒（u32に収まらない分は切り詰め）
pub fn timeout_millis(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_millis() {
        assert_eq!(timeout_millis(Duration::from_secs(60)), 60_000);
        assert_eq!(timeout_millis(Duration::from_millis(250)), 250);
        assert_eq!(timeout_millis(Duration::from_secs(u64::MAX / 1000)), u32::MAX);
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_upload_form_has_file_field() {
        let file = SelectedFile::new("face.png", "image/png", vec![0x89, b'P', b'N', b'G']);
        let form = upload_form(&file).expect("FormData作成失敗");

        let entry: web_sys::File = form.get(UPLOAD_FIELD).dyn_into().expect("fileフィールドなし");
        assert_eq!(entry.name(), "face.png");
        assert_eq!(entry.type_(), "image/png");
        assert_eq!(entry.size(), 4.0);
    }

    #[wasm_bindgen_test]
    async fn wasm_timer_wins_against_pending_reply() {
        let pending = futures::future::pending::<Result<HttpReply, TransportError>>();
        let result = race_timeout(pending, 10).await;
        assert_eq!(result.unwrap_err(), TransportError::Timeout);
    }

    #[wasm_bindgen_test]
    async fn wasm_ready_reply_beats_timer() {
        let ready = futures::future::ready(Ok(HttpReply::new(200, "{}")));
        let reply = race_timeout(ready, 1_000).await.expect("応答なし");
        assert_eq!(reply.status, 200);
    }

    #[wasm_bindgen_test]
    async fn wasm_unreachable_host_is_network_error() {
        let transport = FetchTransport::new(Duration::from_secs(5));
        let err = transport
            .post_json("http://127.0.0.1:9/api/generate-summary", &serde_json::json!({"scores": {}}))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }
}
