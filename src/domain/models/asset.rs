#[cfg(test)]
#[path = "asset_test.rs"]
mod tests;

use std::path::Path;

use strum::EnumIter;
use strum::IntoEnumIterator;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, strum::Display)]
pub enum MediaType {
    #[strum(to_string = "image/png")]
    Png,
    #[strum(to_string = "image/jpeg")]
    Jpeg,
}

impl MediaType {
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            MediaType::Png => return &["png"],
            MediaType::Jpeg => return &["jpg", "jpeg"],
        }
    }

    /// Resolves the media type from a file extension, case insensitive. Only
    /// the image types the intake accepts resolve.
    pub fn from_path(path: &Path) -> Option<MediaType> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        return MediaType::iter().find(|e| return e.extensions().contains(&ext.as_str()));
    }
}

/// Base64 body plus media type, as embedded in a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payload {
    pub media_type: MediaType,
    pub data: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preview {
    pub media_type: MediaType,
    pub byte_len: usize,
    pub data_uri: String,
}

impl Preview {
    /// Data URI cut down to at most `max_width` characters for terminal
    /// display. Widths too narrow for the ellipsis get a bare prefix.
    pub fn short_uri(&self, max_width: usize) -> String {
        if self.data_uri.len() <= max_width {
            return self.data_uri.to_string();
        }
        if max_width <= 3 {
            return self.data_uri[..max_width].to_string();
        }

        return format!("{}...", &self.data_uri[..max_width - 3]);
    }
}

/// Raw bytes of an uploaded image together with both derived forms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedAsset {
    pub bytes: Vec<u8>,
    pub preview: Preview,
    pub payload: Payload,
}
