//! Content types accepted for upload.

/// Blob content type, used to pick the file extension.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum ContentType {
    /// PNG image
    #[display("image/png")]
    Png,
    /// JPEG image
    #[display("image/jpeg")]
    Jpeg,
    /// WebP image
    #[display("image/webp")]
    Webp,
    /// Anything else
    #[display("application/octet-stream")]
    Binary,
}

impl ContentType {
    /// Parse a MIME string; unknown types map to [`ContentType::Binary`].
    pub fn from_mime(mime: &str) -> Self {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => ContentType::Png,
            "image/jpeg" | "image/jpg" => ContentType::Jpeg,
            "image/webp" => ContentType::Webp,
            _ => ContentType::Binary,
        }
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ContentType::Png => "png",
            ContentType::Jpeg => "jpg",
            ContentType::Webp => "webp",
            ContentType::Binary => "bin",
        }
    }
}
