//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ItemId`] - Session-scoped identity of a draggable item
//! - [`HexColor`] - Validated `#rrggbb` row color
//! - [`RowName`] - Row label, at most [`MAX_ROW_NAME_CHARS`] characters
//! - [`ImageSource`] - Image reference (data URI, URL, or legacy string)
//! - [`MediaType`] - Image formats accepted in data URIs
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use tierlist::core::types::{HexColor, RowName};
//!
//! let color = HexColor::new("#FF7F7F").unwrap();
//! assert_eq!(color.as_str(), "#ff7f7f");
//!
//! assert!(HexColor::new("red").is_err());
//! assert!(RowName::new("S").is_ok());
//! ```

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Maximum length of a row name, in characters.
pub const MAX_ROW_NAME_CHARS: usize = 200;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("row name is {0} characters, maximum is {MAX_ROW_NAME_CHARS}")]
    RowNameTooLong(usize),

    #[error("unsupported image type: {0}")]
    UnsupportedImage(String),
}

/// Session-scoped identity of an item.
///
/// Ids are never written to the wire format; a freshly loaded document
/// gets fresh ids. They let the drag engine find the grabbed item again
/// at drop time instead of trusting a stale index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Allocate a new random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // First block is plenty for log lines.
        let full = self.0.to_string();
        write!(f, "{}", &full[..8])
    }
}

/// A validated row color: `#` followed by exactly six hex digits.
///
/// Colors are normalized to lowercase.
///
/// # Example
///
/// ```
/// use tierlist::core::types::HexColor;
///
/// let color = HexColor::new("#7FBFFF").unwrap();
/// assert_eq!(color.to_string(), "#7fbfff");
///
/// assert!(HexColor::new("#fff").is_err());
/// assert!(HexColor::new("7fbfff").is_err());
/// assert!(HexColor::new("#7fbfgg").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Create a new validated color.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidColor` unless the value is `#rrggbb`.
    pub fn new(value: impl Into<String>) -> Result<Self, TypeError> {
        let value = value.into().trim().to_ascii_lowercase();
        Self::validate(&value)?;
        Ok(Self(value))
    }

    fn validate(value: &str) -> Result<(), TypeError> {
        let Some(digits) = value.strip_prefix('#') else {
            return Err(TypeError::InvalidColor(format!(
                "'{value}' must start with '#'"
            )));
        };
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidColor(format!(
                "'{value}' must have exactly six hex digits"
            )));
        }
        Ok(())
    }

    /// Get the color as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HexColor {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A row label.
///
/// Empty names are allowed (a freshly added row may not be named yet).
///
/// # Example
///
/// ```
/// use tierlist::core::types::{RowName, MAX_ROW_NAME_CHARS};
///
/// assert!(RowName::new("x".repeat(MAX_ROW_NAME_CHARS)).is_ok());
/// assert!(RowName::new("x".repeat(MAX_ROW_NAME_CHARS + 1)).is_err());
///
/// let clamped = RowName::clamped("y".repeat(300));
/// assert_eq!(clamped.as_str().chars().count(), MAX_ROW_NAME_CHARS);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RowName(String);

impl RowName {
    /// Create a new validated row name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::RowNameTooLong` when the name exceeds the limit.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        let count = name.chars().count();
        if count > MAX_ROW_NAME_CHARS {
            return Err(TypeError::RowNameTooLong(count));
        }
        Ok(Self(name))
    }

    /// Create a row name, truncating anything past the limit.
    pub fn clamped(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.chars().count() <= MAX_ROW_NAME_CHARS {
            return Self(name);
        }
        Self(name.chars().take(MAX_ROW_NAME_CHARS).collect())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RowName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RowName> for String {
    fn from(name: RowName) -> Self {
        name.0
    }
}

impl std::fmt::Display for RowName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Image formats that may appear in a `data:image/...;base64,` URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Webp,
    Png,
    Jpeg,
    Gif,
}

impl MediaType {
    /// The MIME type, e.g. `image/png`.
    pub fn mime(self) -> &'static str {
        match self {
            MediaType::Webp => "image/webp",
            MediaType::Png => "image/png",
            MediaType::Jpeg => "image/jpeg",
            MediaType::Gif => "image/gif",
        }
    }

    /// Parse a MIME type, ignoring parameters (`image/png; charset=...`).
    ///
    /// # Example
    ///
    /// ```
    /// use tierlist::core::types::MediaType;
    ///
    /// assert_eq!(MediaType::from_mime("image/JPEG"), Some(MediaType::Jpeg));
    /// assert_eq!(MediaType::from_mime("image/jpg"), Some(MediaType::Jpeg));
    /// assert_eq!(MediaType::from_mime("text/html"), None);
    /// ```
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/webp" => Some(MediaType::Webp),
            "image/png" => Some(MediaType::Png),
            "image/jpeg" | "image/jpg" => Some(MediaType::Jpeg),
            "image/gif" => Some(MediaType::Gif),
            _ => None,
        }
    }

    /// Detect the format from leading magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]) {
            Some(MediaType::Png)
        } else if bytes.starts_with(&[0xff, 0xd8, 0xff]) {
            Some(MediaType::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(MediaType::Gif)
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(MediaType::Webp)
        } else {
            None
        }
    }

    /// Guess the format from a file extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "webp" => Some(MediaType::Webp),
            "png" => Some(MediaType::Png),
            "jpg" | "jpeg" => Some(MediaType::Jpeg),
            "gif" => Some(MediaType::Gif),
            _ => None,
        }
    }
}

/// Where an item's image comes from.
///
/// Normally a `data:image/<type>;base64,<payload>` URI. Legacy files and
/// hand-edited ones may hold plain URLs; those are carried through
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageSource(String);

impl ImageSource {
    /// Wrap an existing URI without validation.
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Encode raw image bytes as a base64 data URI.
    ///
    /// # Example
    ///
    /// ```
    /// use tierlist::core::types::{ImageSource, MediaType};
    ///
    /// let src = ImageSource::from_bytes(MediaType::Gif, b"GIF89a");
    /// assert_eq!(src.as_str(), "data:image/gif;base64,R0lGODlh");
    /// assert_eq!(src.media_type(), Some(MediaType::Gif));
    /// ```
    pub fn from_bytes(media_type: MediaType, bytes: &[u8]) -> Self {
        Self(format!(
            "data:{};base64,{}",
            media_type.mime(),
            STANDARD.encode(bytes)
        ))
    }

    /// Build a data URI from image bytes, detecting the format.
    ///
    /// Magic bytes win over the declared MIME type; `declared` is only a
    /// fallback for payloads we cannot sniff.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::UnsupportedImage` when neither identifies one of
    /// the supported formats. Images are never transcoded.
    pub fn from_image_bytes(bytes: &[u8], declared: Option<&str>) -> Result<Self, TypeError> {
        let media_type = MediaType::sniff(bytes)
            .or_else(|| declared.and_then(MediaType::from_mime))
            .ok_or_else(|| {
                TypeError::UnsupportedImage(declared.unwrap_or("unknown").to_string())
            })?;
        Ok(Self::from_bytes(media_type, bytes))
    }

    /// Read an image file and encode it as a data URI.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let bytes = std::fs::read(path)?;
        let media_type = MediaType::sniff(&bytes)
            .or_else(|| MediaType::from_extension(path))
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    TypeError::UnsupportedImage(path.display().to_string()),
                )
            })?;
        Ok(Self::from_bytes(media_type, &bytes))
    }

    /// Whether this is a `data:` URI.
    pub fn is_data_uri(&self) -> bool {
        self.0.starts_with("data:")
    }

    /// The media type declared by a data URI, if recognized.
    pub fn media_type(&self) -> Option<MediaType> {
        let header = self.0.strip_prefix("data:")?.split(',').next()?;
        MediaType::from_mime(header.split(';').next()?)
    }

    /// Get the source as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const PREVIEW: usize = 40;
        if self.0.len() <= PREVIEW {
            return write!(f, "{}", self.0);
        }
        let cut = (0..=PREVIEW)
            .rev()
            .find(|&i| self.0.is_char_boundary(i))
            .unwrap_or(0);
        write!(f, "{}...", &self.0[..cut])
    }
}
