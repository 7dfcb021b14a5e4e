//! Request bodies for `playlist/create` and `browse/edit_playlist`.

use serde::Serialize;

use crate::model::PrivacyStatus;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistRequest {
    pub title: String,
    pub description: String,
    pub privacy_status: PrivacyStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub video_ids: Vec<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditPlaylistRequest {
    pub playlist_id: String,
    pub actions: Vec<EditAction>,
}

/// One membership edit inside an `edit_playlist` request.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "action")]
pub enum EditAction {
    /// Adds a single video.
    ///
    /// `added_video_id` of `None` serializes as an explicit `null`: the
    /// endpoint only returns the map from video ids to their new set-video
    /// ids when at least one `ACTION_ADD_VIDEO` is present, so a null one
    /// is appended when a whole playlist is added on its own.
    #[serde(rename = "ACTION_ADD_VIDEO")]
    #[serde(rename_all = "camelCase")]
    AddVideo {
        added_video_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        dedupe_option: Option<DedupeOption>,
    },

    /// Adds every track of another playlist.
    #[serde(rename = "ACTION_ADD_PLAYLIST")]
    #[serde(rename_all = "camelCase")]
    AddPlaylist { added_full_list_id: String },
}

/// De-duplication modifier for [`EditAction::AddVideo`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum DedupeOption {
    #[serde(rename = "DEDUPE_OPTION_SKIP")]
    Skip,
}

impl EditAction {
    #[must_use]
    pub fn add_video(video_id: &str, dedupe: bool) -> Self {
        Self::AddVideo {
            added_video_id: Some(video_id.to_string()),
            dedupe_option: dedupe.then_some(DedupeOption::Skip),
        }
    }

    #[must_use]
    pub fn add_playlist(playlist_id: &str) -> Self {
        Self::AddPlaylist {
            added_full_list_id: playlist_id.to_string(),
        }
    }

    /// The sentinel action that makes the endpoint report set-video ids.
    #[must_use]
    pub fn null_video() -> Self {
        Self::AddVideo {
            added_video_id: None,
            dedupe_option: None,
        }
    }
}
