//! reqwestによる解析サービスとの送受信

use crate::error::{FaceReportError, Result};
use face_report_common::{AnalysisTransport, ClientConfig, HttpReply, SelectedFile, TransportError, UPLOAD_FIELD};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// タイムアウトは1リクエスト単位。リトライはしない
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FaceReportError::HttpClient(e.to_string()))?;
        Ok(Self { client })
    }
}

impl AnalysisTransport for HttpTransport {
    async fn post_file(&self, url: &str, file: &SelectedFile) -> std::result::Result<HttpReply, TransportError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)
            .map_err(map_error)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_error)?;
        into_reply(response).await
    }

    async fn post_json(&self, url: &str, body: &serde_json::Value) -> std::result::Result<HttpReply, TransportError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_error)?;
        into_reply(response).await
    }
}

async fn into_reply(response: Response) -> std::result::Result<HttpReply, TransportError> {
    let status = response.status().as_u16();
    let body = response.text().await.map_err(map_error)?;
    Ok(HttpReply::new(status, body))
}

fn map_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(err.to_string())
    }
}
