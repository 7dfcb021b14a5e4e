//! Request body for the `player` endpoint.

use serde::Serialize;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PlayerRequest {
    #[serde(rename = "playbackContext")]
    pub playback_context: PlaybackContext,

    // The endpoint wants this one key in snake case.
    #[serde(rename = "video_id")]
    pub video_id: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackContext {
    pub content_playback_context: ContentPlaybackContext,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPlaybackContext {
    pub signature_timestamp: u64,
}

impl PlayerRequest {
    #[must_use]
    pub fn new(video_id: &str, signature_timestamp: u64) -> Self {
        Self {
            playback_context: PlaybackContext {
                content_playback_context: ContentPlaybackContext {
                    signature_timestamp,
                },
            },
            video_id: video_id.to_string(),
        }
    }
}
