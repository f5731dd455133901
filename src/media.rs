use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::config::MediaConfig;

/// Client for the cloud media store. Every uploaded file comes back as a
/// public URL; only the URL is persisted.
#[derive(Clone)]
pub struct MediaClient {
    http: reqwest::Client,
    config: MediaConfig,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl MediaClient {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Upload one file into the given folder and return its public URL.
    pub async fn upload(
        &self,
        folder: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, reqwest::Error> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new()
            .text("folder", folder.to_string())
            .part("file", part);

        let response = self
            .http
            .post(format!("{}/upload", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json::<UploadResponse>()
            .await?;

        Ok(response.secure_url)
    }
}
