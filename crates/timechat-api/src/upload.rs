use anyhow::{anyhow, Result};
use async_trait::async_trait;
use colored::Colorize;
use serde::Deserialize;

use timechat_models::ImageAttachment;

/// Default endpoint of the file-to-URL upload collaborator.
pub const UPLOAD_API_URL: &str = "https://upload.deolsugam.workers.dev/";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    url: String,
}

/// File-to-public-URL upload collaborator.
///
/// Only used when a generated image should reference a user-supplied image.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Upload an attachment and return its public URL.
    async fn upload(&self, attachment: &ImageAttachment) -> Result<String>;
}

/// HTTP implementation posting a multipart form with a single `file` field.
pub struct HttpImageUploader {
    upload_url: String,
    client: reqwest::Client,
}

impl HttpImageUploader {
    pub fn new(upload_url: impl Into<String>) -> Self {
        Self {
            upload_url: upload_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ImageUploader for HttpImageUploader {
    async fn upload(&self, attachment: &ImageAttachment) -> Result<String> {
        let part = reqwest::multipart::Part::bytes(attachment.bytes.clone())
            .file_name(attachment.file_name.clone());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("upload failed with status {}: {}", status, body));
        }

        let result: UploadResponse = response.json().await?;
        if !result.success || result.url.is_empty() {
            return Err(anyhow!("upload failed: invalid response from server"));
        }

        Ok(result.url)
    }
}

/// Upload a set of attachments concurrently and collect their public URLs.
///
/// Any individual failure is logged and collapses the whole result to an
/// empty list, so callers degrade gracefully instead of aborting the turn.
pub async fn convert_attachments_to_urls(
    uploader: &dyn ImageUploader,
    attachments: &[ImageAttachment],
) -> Vec<String> {
    if attachments.is_empty() {
        return Vec::new();
    }

    let uploads = attachments.iter().map(|attachment| uploader.upload(attachment));
    let results = futures::future::join_all(uploads).await;

    let mut urls = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(url) => urls.push(url),
            Err(e) => {
                eprintln!(
                    "{} Failed to upload reference image, generating without reference: {}",
                    "warning:".yellow(),
                    e
                );
                return Vec::new();
            }
        }
    }
    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedUploader {
        fail: bool,
    }

    #[async_trait]
    impl ImageUploader for FixedUploader {
        async fn upload(&self, attachment: &ImageAttachment) -> Result<String> {
            if self.fail {
                Err(anyhow!("boom"))
            } else {
                Ok(format!("https://cdn.example.com/{}", attachment.file_name))
            }
        }
    }

    #[tokio::test]
    async fn collects_urls_for_all_attachments() {
        let uploader = FixedUploader { fail: false };
        let attachments = vec![
            ImageAttachment::new("a.png", vec![1]),
            ImageAttachment::new("b.png", vec![2]),
        ];
        let urls = convert_attachments_to_urls(&uploader, &attachments).await;
        assert_eq!(
            urls,
            vec![
                "https://cdn.example.com/a.png".to_string(),
                "https://cdn.example.com/b.png".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn any_failure_yields_empty_list() {
        let uploader = FixedUploader { fail: true };
        let attachments = vec![ImageAttachment::new("a.png", vec![1])];
        assert!(convert_attachments_to_urls(&uploader, &attachments)
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn no_attachments_no_uploads() {
        let uploader = FixedUploader { fail: true };
        assert!(convert_attachments_to_urls(&uploader, &[]).await.is_empty());
    }
}
