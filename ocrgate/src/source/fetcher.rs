use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::{OcrGateError, Result};
use crate::ocr::{decode_bytes, DecodedImage, ImageSignature};

use super::UNSUPPORTED_IMAGE_MESSAGE;

/// Downloads images for the `url` source type.
///
/// One GET per call with the client's default redirect policy. No retry and
/// no timeout. Bodies larger than `max_bytes` are refused.
#[derive(Clone, Debug)]
pub struct RemoteFetcher {
    client: Client,
    max_bytes: usize,
}

impl RemoteFetcher {
    pub fn new(max_bytes: usize) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ocrgate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| OcrGateError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, max_bytes })
    }

    /// Fetch `url` and decode the body.
    ///
    /// Network failures and non-2xx statuses are engine-side errors. A body
    /// that does not start with a JPEG or PNG signature, or that exceeds the
    /// size cap, is a validation error.
    pub async fn fetch(&self, url: &Url) -> Result<DecodedImage> {
        let response = self.client.get(url.clone()).send().await?;
        let mut response = response.error_for_status()?;

        if let Some(len) = response.content_length() {
            if len > self.max_bytes as u64 {
                return Err(self.too_large());
            }
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if bytes.len() + chunk.len() > self.max_bytes {
                return Err(self.too_large());
            }
            bytes.extend_from_slice(&chunk);
        }

        debug!(url = %url, len = bytes.len(), "Fetched remote image");

        if ImageSignature::sniff(&bytes).is_none() {
            return Err(OcrGateError::Validation(UNSUPPORTED_IMAGE_MESSAGE.to_string()));
        }

        decode_bytes(&bytes)
    }

    fn too_large(&self) -> OcrGateError {
        OcrGateError::Validation(format!("图片大小超过限制: {} 字节", self.max_bytes))
    }
}
