use std::fmt;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

/// Default minimum image width offered by the scrape form.
pub const DEFAULT_MIN_WIDTH: u32 = 450;
/// Default minimum image height offered by the scrape form.
pub const DEFAULT_MIN_HEIGHT: u32 = 500;

/// Text substituted for any absent record field in exports and labels.
pub const NOT_AVAILABLE: &str = "N/A";
/// Image reference substituted on visual cards when a record has no image.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x300?text=No+Preview";

pub const PRIVATE_BOARD_MESSAGE: &str = "Private boards are not supported in the web app. \
Use the desktop script for password-protected content.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// Login for a private board. Collected but never transmitted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Raw values from the scrape form. The board URL is already parsed by the
/// input surface, so syntax is not re-checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub board_url: Url,
    pub keyword: Option<String>,
    pub min_width: u32,
    pub min_height: u32,
    pub credentials: Option<Credentials>,
}

impl FormInput {
    pub fn new(board_url: Url) -> Self {
        Self {
            board_url,
            keyword: None,
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
            credentials: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{}", PRIVATE_BOARD_MESSAGE)]
    PrivateBoard,
}

/// Immutable request value built from the form at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    board_url: Url,
    keyword: Option<String>,
    min_width: u32,
    min_height: u32,
    visibility: Visibility,
    credentials: Option<Credentials>,
}

impl ScrapeRequest {
    /// Validates the form against the current board visibility.
    ///
    /// Private boards are rejected here, before anything can reach the
    /// network. A blank keyword is treated as no keyword.
    pub fn from_form(form: FormInput, visibility: Visibility) -> Result<Self, ValidationError> {
        if visibility == Visibility::Private {
            return Err(ValidationError::PrivateBoard);
        }

        let keyword = form
            .keyword
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(Self {
            board_url: form.board_url,
            keyword,
            min_width: form.min_width,
            min_height: form.min_height,
            visibility,
            credentials: form.credentials,
        })
    }

    pub fn board_url(&self) -> &Url {
        &self.board_url
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn min_width(&self) -> u32 {
        self.min_width
    }

    pub fn min_height(&self) -> u32 {
        self.min_height
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }
}

/// One scraped pin as returned by the service. Every field may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub url: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub image: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub keyword: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_dimension")]
    pub width: Option<u32>,
    #[serde(deserialize_with = "deserialize_dimension")]
    pub height: Option<u32>,
}

impl ResultRecord {
    /// Stable key for display: the record id, or its position when absent.
    pub fn display_key(&self, index: usize) -> String {
        match present(&self.id) {
            Some(id) => id.to_string(),
            None => index.to_string(),
        }
    }

    pub fn title_or_na(&self) -> &str {
        present(&self.title).unwrap_or(NOT_AVAILABLE)
    }

    pub fn url_or_na(&self) -> &str {
        present(&self.url).unwrap_or(NOT_AVAILABLE)
    }

    pub fn image_or_na(&self) -> &str {
        present(&self.image).unwrap_or(NOT_AVAILABLE)
    }

    pub fn keyword_or_na(&self) -> &str {
        present(&self.keyword).unwrap_or(NOT_AVAILABLE)
    }

    pub fn description_or_na(&self) -> &str {
        present(&self.description).unwrap_or(NOT_AVAILABLE)
    }

    pub fn image_or_placeholder(&self) -> &str {
        present(&self.image).unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Link target; `None` when the record has no usable URL.
    pub fn link_target(&self) -> Option<&str> {
        present(&self.url)
    }

    /// Image URL for copying, empty when absent.
    pub fn image_for_copy(&self) -> &str {
        present(&self.image).unwrap_or("")
    }
}

// Empty strings count as absent.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

// Field decoders never fail: a value of the wrong type reads as absent.

fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
        Float(f64),
        Other(IgnoredAny),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.and_then(|raw| match raw {
        RawId::Text(text) => Some(text),
        RawId::Integer(n) => Some(n.to_string()),
        RawId::Float(n) => Some(n.to_string()),
        RawId::Other(_) => None,
    }))
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawText {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(Option::<RawText>::deserialize(deserializer)?.and_then(|raw| match raw {
        RawText::Text(text) => Some(text),
        RawText::Other(_) => None,
    }))
}

fn deserialize_dimension<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDimension {
        Pixels(u32),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(Option::<RawDimension>::deserialize(deserializer)?.and_then(|raw| match raw {
        RawDimension::Pixels(n) => Some(n),
        RawDimension::Text(text) => text.trim().parse().ok(),
        RawDimension::Other(_) => None,
    }))
}
