use crate::error::UploadError;
use crate::upload::types::{SelectedFile, UploadResponse};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use url::Url;

/// The server side of one upload exchange.
#[async_trait]
pub trait UploadEndpoint: Send + Sync {
    async fn upload(&self, file: SelectedFile) -> Result<UploadResponse, UploadError>;
}

#[derive(Clone)]
pub struct HttpUploadEndpoint {
    client: reqwest::Client,
    upload_url: Url,
    shutdown_url: Url,
}

impl HttpUploadEndpoint {
    pub fn new(base_url: &Url) -> Result<Self, UploadError> {
        Ok(Self {
            client: reqwest::Client::new(),
            upload_url: base_url.join("/upload")?,
            shutdown_url: base_url.join("/shutdown")?,
        })
    }

    /// Asks the formatter server to exit and returns its reply text.
    pub async fn shutdown(&self) -> Result<String, UploadError> {
        tracing::info!(url = %self.shutdown_url, "Requesting server shutdown");
        let response = self.client.post(self.shutdown_url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%status, "Shutdown reply received");
        Ok(body)
    }
}

#[async_trait]
impl UploadEndpoint for HttpUploadEndpoint {
    async fn upload(&self, file: SelectedFile) -> Result<UploadResponse, UploadError> {
        let content = file.read().await?;
        tracing::debug!(file = %file.name, bytes = content.len(), url = %self.upload_url, "Sending file");

        let form = Form::new().part("file", Part::bytes(content).file_name(file.name.clone()));

        let response = self
            .client
            .post(self.upload_url.clone())
            .multipart(form)
            .send()
            .await?;

        // Status is not checked: any body that parses as JSON is the server's verdict.
        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!(%status, bytes = body.len(), "Upload response received");

        UploadResponse::from_body(&body)
    }
}
