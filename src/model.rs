//! Domain entities produced by response normalization.
//!
//! All of these are immutable value objects: constructed from one response
//! payload, then handed upward. Nothing in this crate retains or mutates
//! them across calls.

use serde::{Deserialize, Serialize};

/// One image variant; listings carry these smallest to largest.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// Artist reference as it appears in a subtitle run.
///
/// Not every artist carries a browse id; absence is valid and expected.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: Option<String>,
    pub name: String,
}

/// Album reference from the third flex column.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AlbumRef {
    pub id: Option<String>,
    pub name: String,
}

/// Tri-state rating attached to a track's like button.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LikeStatus {
    Like,
    Dislike,
    #[default]
    Indifferent,
}

impl LikeStatus {
    /// Maps the upstream string, defaulting to `Indifferent` for anything
    /// unrecognized.
    #[must_use]
    pub fn from_upstream(value: &str) -> Self {
        match value {
            "LIKE" => Self::Like,
            "DISLIKE" => Self::Dislike,
            _ => Self::Indifferent,
        }
    }
}

/// Playlist visibility as the edit header reports it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrivacyStatus {
    #[default]
    Public,
    Private,
    Unlisted,
}

impl PrivacyStatus {
    /// Maps the upstream string, defaulting to `Public`, the only value a
    /// foreign playlist can have.
    #[must_use]
    pub fn from_upstream(value: &str) -> Self {
        match value {
            "PRIVATE" => Self::Private,
            "UNLISTED" => Self::Unlisted,
            _ => Self::Public,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Private => "PRIVATE",
            Self::Unlisted => "UNLISTED",
        }
    }
}

/// Opaque token pair that toggles a track's library/liked membership.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FeedbackTokens {
    pub add: Option<String>,
    pub remove: Option<String>,
}

/// One track row from a playlist shelf.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub video_id: String,
    pub title: String,
    pub artists: Vec<ArtistRef>,
    pub album: Option<AlbumRef>,
    pub like_status: LikeStatus,
    /// Smallest to largest.
    pub thumbnails: Vec<Thumbnail>,
    pub is_available: bool,
    pub is_licensed: bool,
    pub is_explicit: bool,
    pub video_type: Option<String>,
    /// Display string, "H:MM:SS" or "M:SS".
    pub duration: String,
    pub duration_seconds: u64,
    pub feedback_tokens: Option<FeedbackTokens>,
    /// Identifies this track's membership row in one specific playlist;
    /// required for removal and reordering, distinct from `video_id`.
    pub set_video_id: Option<String>,
}

/// Lightweight entry in a library listing.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub playlist_id: String,
    pub title: String,
    pub thumbnails: Vec<Thumbnail>,
    pub count: Option<u64>,
}

/// Full playlist: header fields plus the tracks collected across pages.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlaylistDetail {
    pub id: String,
    pub title: String,
    pub privacy: PrivacyStatus,
    pub description: String,
    pub thumbnails: Vec<Thumbnail>,
    /// Fixed at parse time; governs which header subtree was read.
    pub is_own_playlist: bool,
    pub author: Option<ArtistRef>,
    /// Empty when the subtitle variant omits it.
    pub year: String,
    pub track_count: u64,
    /// Display string like "1.2M views"; only the public header variant
    /// carries it.
    pub views: Option<String>,
    /// Total duration display string from the header.
    pub duration: String,
    /// Cursor for the next unfetched page of tracks, if any remain.
    pub continuation: Option<String>,
    pub tracks: Vec<Track>,
}

/// Account identity from `account/account_menu`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub name: String,
    pub channel_handle: Option<String>,
    pub thumbnails: Vec<Thumbnail>,
}
