use crate::error::StitchError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Credentials written by the external login flow.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl Session {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token: Some(refresh_token.into()),
        }
    }

    pub fn bearer(&self) -> Result<String, StitchError> {
        match self.access_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(format!("Bearer {token}")),
            _ => Err(StitchError::MissingSession),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.access_token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty())
    }
}

/// The playlist being composed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stitch {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
}

impl Stitch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArtistRef {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl AlbumRef {
    /// Catalog images come largest first.
    pub fn cover_url(&self) -> Option<&str> {
        self.images.first().map(|image| image.url.as_str())
    }

    /// Smallest image at least `min_px` wide, falling back to the largest.
    pub fn thumbnail_url(&self, min_px: u32) -> Option<&str> {
        self.images
            .iter()
            .rev()
            .find(|image| image.width.unwrap_or(0) >= min_px)
            .or_else(|| self.images.first())
            .map(|image| image.url.as_str())
    }
}

/// A catalog track as returned by `/v1/search`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Track {
    #[serde(default, deserialize_with = "opaque_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub album: AlbumRef,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub uri: String,
}

impl Track {
    pub fn artist_line(&self) -> String {
        self.artists
            .iter()
            .map(|artist| artist.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn duration_label(&self) -> String {
        let total_secs = self.duration_ms / 1000;
        format!("{}:{:02}", total_secs / 60, total_secs % 60)
    }
}

/// A track's association with one stitch, with the display fields copied in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MembershipRecord {
    #[serde(default, alias = "_id", deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(default, rename = "stitchId", alias = "stitch_id", deserialize_with = "opaque_id")]
    pub stitch_id: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub album: AlbumRef,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub popularity: u32,
}

impl MembershipRecord {
    /// Display copy; the record id stands in for the track id.
    pub fn to_track(&self) -> Track {
        Track {
            id: self.id.clone(),
            name: self.name.clone(),
            artists: self.artists.clone(),
            album: self.album.clone(),
            duration_ms: self.duration_ms,
            preview_url: self.preview_url.clone(),
            popularity: self.popularity,
            uri: self.uri.clone(),
        }
    }
}

/// Body of `POST /song/add`.
#[derive(Debug, Serialize)]
pub struct NewMembership<'a> {
    #[serde(rename = "stitchId")]
    pub stitch_id: &'a str,
    pub uri: &'a str,
    pub name: &'a str,
    pub artists: &'a [ArtistRef],
    pub album: &'a AlbumRef,
    pub duration_ms: u64,
    pub preview_url: Option<&'a str>,
    pub popularity: u32,
}

impl<'a> NewMembership<'a> {
    pub fn from_track(stitch_id: &'a str, track: &'a Track) -> Self {
        Self {
            stitch_id,
            uri: &track.uri,
            name: &track.name,
            artists: &track.artists,
            album: &track.album,
            duration_ms: track.duration_ms,
            preview_url: track.preview_url.as_deref(),
            popularity: track.popularity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImageUpdate<'a> {
    #[serde(rename = "stitchId")]
    pub stitch_id: &'a str,
    #[serde(rename = "imageUrl")]
    pub image_url: &'a str,
}

#[derive(Debug, Serialize)]
pub struct NameUpdate<'a> {
    #[serde(rename = "stitchId")]
    pub stitch_id: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LogoutRequest<'a> {
    pub token: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<TrackPage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackPage {
    #[serde(default)]
    pub items: Vec<Track>,
}

/// Backend ids may arrive as JSON strings or numbers.
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!("unsupported id value: {other}"))),
    }
}
