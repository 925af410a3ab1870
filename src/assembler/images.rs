//! Resolution of remote image references into self-contained encodings.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::api::StudentApi;

/// A fetched image transcoded to base64, ready for offline embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    pub mime: String,
    pub base64: String,
}

impl EncodedImage {
    pub fn from_bytes(bytes: &[u8], mime: impl Into<String>) -> Self {
        Self {
            mime: mime.into(),
            base64: STANDARD.encode(bytes),
        }
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64)
    }

    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.base64)
    }

    /// File extension used when the image is written next to the Typst
    /// source for compilation.
    pub fn file_extension(&self) -> &'static str {
        match self.mime.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/gif" => "gif",
            "image/svg+xml" => "svg",
            _ => "png",
        }
    }
}

/// Fetch one image and encode it. Best-effort: any failure is logged and
/// degrades to `None` so a missing logo or photo never aborts the assembly.
pub async fn resolve(api: &dyn StudentApi, url: &str) -> Option<EncodedImage> {
    if url.is_empty() {
        return None;
    }

    match api.fetch_bytes(url).await {
        Ok((bytes, content_type)) => {
            let mime = content_type
                .as_deref()
                .and_then(|value| value.split(';').next())
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| {
                    mime_guess::from_path(url)
                        .first_or_octet_stream()
                        .essence_str()
                        .to_string()
                });
            Some(EncodedImage::from_bytes(&bytes, mime))
        }
        Err(err) => {
            log::warn!("failed to resolve image {url}: {err}");
            None
        }
    }
}
