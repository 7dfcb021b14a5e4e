//! Request bodies for the `browse` endpoint.
//!
//! One endpoint serves playlist detail, the library listing and all
//! continuation pages; the body shape disambiguates.

use serde::Serialize;

/// Browse id of the user's playlist library.
const LIBRARY_BROWSE_ID: &str = "FEmusic_liked_playlists";

/// Page type hint the endpoint needs to resolve a playlist browse id.
const PLAYLIST_PAGE_TYPE: &str = "MUSIC_PAGE_TYPE_PLAYLIST";

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browse_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub browse_endpoint_context_supported_configs: Option<SupportedConfigs>,

    /// Continuation cursor, passed back verbatim for follow-up pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedConfigs {
    pub browse_endpoint_context_music_config: MusicConfig,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicConfig {
    pub page_type: String,
}

impl BrowseRequest {
    /// Playlist detail request; `browse_id` must already carry the `VL`
    /// prefix marker.
    #[must_use]
    pub fn playlist(browse_id: &str) -> Self {
        Self {
            browse_id: Some(browse_id.to_string()),
            browse_endpoint_context_supported_configs: Some(SupportedConfigs {
                browse_endpoint_context_music_config: MusicConfig {
                    page_type: PLAYLIST_PAGE_TYPE.to_string(),
                },
            }),
            continuation: None,
        }
    }

    /// Library playlist listing request.
    #[must_use]
    pub fn library() -> Self {
        Self {
            browse_id: Some(LIBRARY_BROWSE_ID.to_string()),
            browse_endpoint_context_supported_configs: None,
            continuation: None,
        }
    }

    /// Continuation page for the library grid; the cursor is the entire
    /// body.
    #[must_use]
    pub fn grid_continuation(token: &str) -> Self {
        Self {
            browse_id: None,
            browse_endpoint_context_supported_configs: None,
            continuation: Some(token.to_string()),
        }
    }

    /// Attaches a continuation cursor to this request.
    #[must_use]
    pub fn with_continuation(mut self, token: &str) -> Self {
        self.continuation = Some(token.to_string());
        self
    }
}

/// Query-parameter suffix for continuation requests.
///
/// The cursor is carried twice (`ctoken` and `continuation`) with a
/// `type=next` marker, matching what the web client sends.
#[must_use]
pub fn continuation_params(token: &str) -> String {
    format!("&ctoken={token}&continuation={token}&type=next")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn playlist_body_carries_page_type() {
        let body = BrowseRequest::playlist("VLPL123");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "browseId": "VLPL123",
                "browseEndpointContextSupportedConfigs": {
                    "browseEndpointContextMusicConfig": {
                        "pageType": "MUSIC_PAGE_TYPE_PLAYLIST",
                    },
                },
            })
        );
    }

    #[test]
    fn grid_continuation_body_is_cursor_only() {
        let body = BrowseRequest::grid_continuation("tok123");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "continuation": "tok123" })
        );
    }

    #[test]
    fn continuation_cursor_appears_twice_in_query() {
        assert_eq!(
            continuation_params("abc"),
            "&ctoken=abc&continuation=abc&type=next"
        );
    }
}
