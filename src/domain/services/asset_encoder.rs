#[cfg(test)]
#[path = "asset_encoder_test.rs"]
mod tests;

use std::path::Path;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use base64::engine::general_purpose::STANDARD as b64;
use base64::Engine;
use tokio::fs;

use crate::domain::models::EncodedAsset;
use crate::domain::models::MediaType;
use crate::domain::models::Payload;
use crate::domain::models::Preview;

pub struct AssetEncoder {}

impl AssetEncoder {
    /// Derives the preview and the transmittable payload. Bytes are not
    /// inspected, any content encodes.
    pub fn encode(bytes: Vec<u8>, media_type: MediaType) -> EncodedAsset {
        let payload = AssetEncoder::payload(&bytes, media_type);
        let preview = AssetEncoder::preview(&bytes, media_type);

        return EncodedAsset {
            bytes,
            preview,
            payload,
        };
    }

    pub fn payload(bytes: &[u8], media_type: MediaType) -> Payload {
        return Payload {
            media_type,
            data: b64.encode(bytes),
        };
    }

    pub fn preview(bytes: &[u8], media_type: MediaType) -> Preview {
        return Preview {
            media_type,
            byte_len: bytes.len(),
            data_uri: format!("data:{media_type};base64,{}", b64.encode(bytes)),
        };
    }

    /// File intake. Restricts input to the accepted image extensions, then
    /// reads and encodes.
    pub async fn read_file(path: &Path) -> Result<EncodedAsset> {
        let media_type = match MediaType::from_path(path) {
            Some(media_type) => media_type,
            None => bail!(format!(
                "{} is not a supported image. Use a png, jpg, or jpeg file.",
                path.display()
            )),
        };

        let bytes = fs::read(path)
            .await
            .with_context(|| return format!("Failed to read image at {}", path.display()))?;

        tracing::debug!(
            path = path.display().to_string(),
            media_type = media_type.to_string(),
            bytes = bytes.len(),
            "Read image"
        );

        return Ok(AssetEncoder::encode(bytes, media_type));
    }
}
