//! Continuation-driven page collection.
//!
//! The InnerTube `browse` endpoint returns results one page at a time,
//! each page carrying an opaque continuation cursor; absence of a cursor
//! means no further pages. Page *n+1*'s request depends on page *n*'s
//! cursor, so fetches are strictly sequential and each collection run owns
//! its accumulator; no state is shared across runs.
//!
//! The accumulation step itself is a pure fold ([`PageState::absorb`]) so
//! termination and ordering are testable without a transport. The async
//! drivers add two defenses the web client lacks: a cursor that fails to
//! advance aborts with [`Error::StalledContinuation`] instead of looping
//! forever, and a cancellation token is checked between page fetches.

use tokio_util::sync::CancellationToken;

use crate::{
    client::Transport,
    error::{Error, Result},
    model::{PlaylistDetail, PlaylistSummary, Track},
    parse,
    protocol::browse::{continuation_params, BrowseRequest},
};

/// Two-character marker selecting playlist semantics on the browse
/// endpoint.
const PLAYLIST_BROWSE_PREFIX: &str = "VL";

/// Prefixes a playlist id with the browse marker unless it already
/// carries one.
///
/// Ids returned from listing and creation endpoints come without the
/// marker and must be normalized before reuse against `browse`.
#[must_use]
pub fn normalize_browse_id(id: &str) -> String {
    // Byte-boundary safe: ids are not trusted to be ASCII.
    let has_prefix = id
        .get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(PLAYLIST_BROWSE_PREFIX));
    if has_prefix {
        id.to_string()
    } else {
        format!("{PLAYLIST_BROWSE_PREFIX}{id}")
    }
}

/// One parsed page of playlist tracks.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TrackPage {
    pub tracks: Vec<Track>,
    pub continuation: Option<String>,
}

/// One parsed page of library playlist tiles.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SummaryPage {
    pub playlists: Vec<PlaylistSummary>,
    pub continuation: Option<String>,
}

/// Accumulator for one track collection run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PageState {
    tracks: Vec<Track>,
    cursor: Option<String>,
    pages: usize,
}

impl PageState {
    /// Pure fold step: appends the page's tracks in order (never
    /// reordered or deduplicated) and replaces the cursor with the
    /// page's own.
    #[must_use]
    pub fn absorb(mut self, page: TrackPage) -> Self {
        self.tracks.extend(page.tracks);
        self.cursor = page.continuation;
        self.pages += 1;
        self
    }

    /// The loop invariant: continue while a cursor remains and the limit
    /// is not reached. A zero or absent limit means unbounded.
    #[must_use]
    pub fn is_done(&self, limit: Option<usize>) -> bool {
        self.cursor.is_none()
            || limit
                .filter(|&limit| limit > 0)
                .is_some_and(|limit| self.tracks.len() >= limit)
    }

    #[must_use]
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    #[must_use]
    pub fn pages(&self) -> usize {
        self.pages
    }

    #[must_use]
    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }
}

/// Collects a playlist's header and up to `limit` of its tracks,
/// following continuation cursors across pages.
///
/// The returned detail's `continuation` holds the cursor for the first
/// unfetched page when the limit cut collection short, `None` when the
/// playlist was exhausted.
///
/// # Errors
///
/// Transport errors propagate unmodified and abort the loop; tracks
/// already accumulated are dropped with the error; callers wanting
/// partial results drive [`PageState`] themselves.
pub async fn collect_playlist<T>(
    transport: &T,
    playlist_id: &str,
    limit: Option<usize>,
    cancel: &CancellationToken,
) -> Result<PlaylistDetail>
where
    T: Transport + ?Sized,
{
    let browse_id = normalize_browse_id(playlist_id);
    let body = serde_json::to_value(BrowseRequest::playlist(&browse_id))?;
    let root = transport.send("browse", body, "").await?;

    let mut detail = parse::parse_playlist_header(&browse_id, &root);
    let state = PageState::default().absorb(parse::parse_track_page(&root));
    debug!(
        "playlist {browse_id}: {} tracks on first page, continuation {}",
        state.tracks.len(),
        if state.cursor.is_some() { "present" } else { "absent" },
    );

    let state = collect_track_pages(transport, &browse_id, state, limit, cancel).await?;
    detail.continuation = state.cursor.clone();
    detail.tracks = state.into_tracks();

    Ok(detail)
}

/// Drives the continuation loop from an existing state until the loop
/// invariant fails.
pub async fn collect_track_pages<T>(
    transport: &T,
    browse_id: &str,
    mut state: PageState,
    limit: Option<usize>,
    cancel: &CancellationToken,
) -> Result<PageState>
where
    T: Transport + ?Sized,
{
    while !state.is_done(limit) {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let cursor = state
            .cursor
            .clone()
            .ok_or_else(|| Error::Assertion("cursor vanished mid-loop".to_string()))?;

        let body = serde_json::to_value(
            BrowseRequest::playlist(browse_id).with_continuation(&cursor),
        )?;
        let root = transport
            .send("browse", body, &continuation_params(&cursor))
            .await?;

        let page = parse::parse_track_continuation(&root);
        if page.continuation.as_deref() == Some(cursor.as_str()) {
            return Err(Error::StalledContinuation);
        }

        state = state.absorb(page);
    }

    trace!("collected {} tracks over {} pages", state.tracks.len(), state.pages);
    Ok(state)
}

/// Collects library playlist tiles until the grid runs out of pages or
/// at least `limit` tiles are accumulated.
pub async fn collect_library<T>(
    transport: &T,
    limit: Option<usize>,
    cancel: &CancellationToken,
) -> Result<Vec<PlaylistSummary>>
where
    T: Transport + ?Sized,
{
    let body = serde_json::to_value(BrowseRequest::library())?;
    let root = transport.send("browse", body, "").await?;

    let page = parse::parse_library_page(&root);
    let mut playlists = page.playlists;
    let mut cursor = page.continuation;

    let limit = limit.filter(|&limit| limit > 0);
    while let Some(token) = cursor {
        if limit.is_some_and(|limit| playlists.len() >= limit) {
            break;
        }
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let body = serde_json::to_value(BrowseRequest::grid_continuation(&token))?;
        let root = transport
            .send("browse", body, &continuation_params(&token))
            .await?;

        let page = parse::parse_library_continuation(&root);
        if page.continuation.as_deref() == Some(token.as_str()) {
            return Err(Error::StalledContinuation);
        }

        playlists.extend(page.playlists);
        cursor = page.continuation;
    }

    Ok(playlists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::model::LikeStatus;

    #[test]
    fn browse_id_normalization() {
        assert_eq!(normalize_browse_id("PL123"), "VLPL123");
        assert_eq!(normalize_browse_id("VLPL123"), "VLPL123");
        // Case-insensitive detection keeps the original casing.
        assert_eq!(normalize_browse_id("vlPL123"), "vlPL123");
        assert_eq!(normalize_browse_id("LM"), "VLLM");
        assert_eq!(normalize_browse_id("X"), "VLX");
    }

    #[test]
    fn browse_id_normalization_is_boundary_safe() {
        // Byte index 2 falls inside the first character here.
        assert_eq!(normalize_browse_id("€x"), "VL€x");
        assert_eq!(normalize_browse_id("é"), "VLé");
        assert_eq!(normalize_browse_id(""), "VL");
    }

    #[test]
    fn absorb_preserves_cross_page_order() {
        let page = |titles: &[&str], cursor: Option<&str>| TrackPage {
            tracks: titles
                .iter()
                .map(|title| Track { title: (*title).to_string(), ..Track::default() })
                .collect(),
            continuation: cursor.map(str::to_string),
        };

        let state = PageState::default()
            .absorb(page(&["a", "b"], Some("p2")))
            .absorb(page(&["c", "d"], Some("p3")))
            .absorb(page(&["e"], None));

        assert_eq!(state.pages(), 3);
        assert_eq!(state.cursor(), None);
        let titles: Vec<_> = state.into_tracks().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn loop_invariant() {
        let state = PageState::default().absorb(TrackPage {
            tracks: vec![Track::default(); 2],
            continuation: Some("p2".to_string()),
        });

        assert!(!state.is_done(None));
        assert!(!state.is_done(Some(0)), "zero limit means unbounded");
        assert!(!state.is_done(Some(3)));
        assert!(state.is_done(Some(2)));
        assert!(state.is_done(Some(1)));

        let exhausted = PageState::default().absorb(TrackPage {
            tracks: vec![Track::default(); 2],
            continuation: None,
        });
        assert!(exhausted.is_done(None));
    }

    /// Scripted transport: pops one canned response per request and
    /// records what was asked of it.
    struct ScriptedTransport {
        responses: Mutex<Vec<Value>>,
        requests: Mutex<Vec<(String, Value, String)>>,
    }

    impl ScriptedTransport {
        fn new(mut responses: Vec<Value>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, endpoint: &str, body: Value, extra_params: &str) -> Result<Value> {
            self.requests.lock().unwrap().push((
                endpoint.to_string(),
                body.clone(),
                extra_params.to_string(),
            ));
            self.responses
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| Error::Assertion("script exhausted".to_string()))
        }
    }

    fn track_item(video_id: &str) -> Value {
        json!({
            "musicResponsiveListItemRenderer": {
                "flexColumns": [
                    {
                        "musicResponsiveListItemFlexColumnRenderer": {
                            "text": { "runs": [ { "text": video_id } ] },
                        },
                    },
                ],
                "overlay": {
                    "musicItemThumbnailOverlayRenderer": {
                        "content": {
                            "musicPlayButtonRenderer": {
                                "playNavigationEndpoint": {
                                    "watchEndpoint": { "videoId": video_id },
                                },
                            },
                        },
                    },
                },
            },
        })
    }

    fn first_page(ids: &[&str], cursor: Option<&str>) -> Value {
        let shelf = json!({
            "contents": ids.iter().map(|id| track_item(id)).collect::<Vec<_>>(),
            "continuations": cursor.map(|token| vec![json!({
                "nextContinuationData": { "continuation": token },
            })]).unwrap_or_default(),
        });
        json!({
            "header": { "musicDetailHeaderRenderer": {
                "title": { "runs": [ { "text": "Fixture" } ] },
            } },
            "contents": {
                "singleColumnBrowseResultsRenderer": {
                    "tabs": [ { "tabRenderer": { "content": {
                        "sectionListRenderer": { "contents": [ {
                            "musicPlaylistShelfRenderer": shelf,
                        } ] },
                    } } } ],
                },
            },
        })
    }

    fn next_page(ids: &[&str], cursor: Option<&str>) -> Value {
        json!({
            "continuationContents": {
                "musicPlaylistShelfContinuation": {
                    "contents": ids.iter().map(|id| track_item(id)).collect::<Vec<_>>(),
                    "continuations": cursor.map(|token| vec![json!({
                        "nextContinuationData": { "continuation": token },
                    })]).unwrap_or_default(),
                },
            },
        })
    }

    #[tokio::test]
    async fn unbounded_collection_fetches_every_page_in_order() {
        let transport = ScriptedTransport::new(vec![
            first_page(&["t1", "t2"], Some("p2")),
            next_page(&["t3", "t4"], Some("p3")),
            next_page(&["t5"], None),
        ]);

        let detail = collect_playlist(&transport, "PL1", None, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(transport.request_count(), 3);
        assert_eq!(detail.continuation, None);
        let ids: Vec<_> = detail.tracks.iter().map(|t| t.video_id.clone()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3", "t4", "t5"]);

        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests[0].0, "browse");
        assert_eq!(requests[0].1["browseId"], "VLPL1");
        assert_eq!(requests[0].2, "");
        // Continuation requests carry the cursor in query and body alike.
        assert_eq!(requests[1].1["continuation"], "p2");
        assert_eq!(requests[1].2, "&ctoken=p2&continuation=p2&type=next");
        assert_eq!(requests[2].1["continuation"], "p3");
    }

    #[tokio::test]
    async fn limit_stops_without_fetching_further_pages() {
        let transport = ScriptedTransport::new(vec![
            first_page(&["t1", "t2"], Some("p2")),
            next_page(&["t3", "t4"], Some("p3")),
            next_page(&["t5"], None),
        ]);

        let detail = collect_playlist(&transport, "PL1", Some(3), &CancellationToken::new())
            .await
            .unwrap();

        // The second page already reaches the limit; the third is never
        // requested and its cursor is reported back.
        assert_eq!(transport.request_count(), 2);
        assert_eq!(detail.tracks.len(), 4);
        assert_eq!(detail.continuation.as_deref(), Some("p3"));
    }

    #[tokio::test]
    async fn empty_page_with_cursor_still_advances() {
        let transport = ScriptedTransport::new(vec![
            first_page(&["t1"], Some("p2")),
            next_page(&[], Some("p3")),
            next_page(&["t2"], None),
        ]);

        let detail = collect_playlist(&transport, "PL1", None, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(transport.request_count(), 3);
        assert_eq!(detail.tracks.len(), 2);
    }

    #[tokio::test]
    async fn repeated_cursor_aborts_instead_of_spinning() {
        let transport = ScriptedTransport::new(vec![
            first_page(&["t1"], Some("p2")),
            next_page(&["t2"], Some("p2")),
        ]);

        let result = collect_playlist(&transport, "PL1", None, &CancellationToken::new()).await;
        assert!(matches!(result, Err(Error::StalledContinuation)));
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn cancellation_is_checked_between_pages() {
        let transport = ScriptedTransport::new(vec![first_page(&["t1"], Some("p2"))]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = collect_playlist(&transport, "PL1", None, &cancel).await;
        assert!(matches!(result, Err(Error::Cancelled)));
        // The initial page had been fetched before the check fired.
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn transport_errors_propagate_unmodified() {
        let transport = ScriptedTransport::new(vec![first_page(&["t1"], Some("p2"))]);

        let result = collect_playlist(&transport, "PL1", None, &CancellationToken::new()).await;
        assert!(matches!(result, Err(Error::Assertion(_))));
    }

    fn library_page(ids: &[&str], cursor: Option<&str>, initial: bool) -> Value {
        let mut items: Vec<Value> = Vec::new();
        if initial {
            items.push(json!({ "musicTwoRowItemRenderer": {
                "title": { "runs": [ { "text": "New playlist" } ] },
            } }));
        }
        items.extend(ids.iter().map(|id| {
            json!({ "musicTwoRowItemRenderer": {
                "navigationEndpoint": { "browseEndpoint": { "browseId": id } },
                "title": { "runs": [ { "text": id } ] },
            } })
        }));
        let grid = json!({
            "items": items,
            "continuations": cursor.map(|token| vec![json!({
                "nextContinuationData": { "continuation": token },
            })]).unwrap_or_default(),
        });
        if initial {
            json!({ "contents": { "singleColumnBrowseResultsRenderer": {
                "tabs": [ { "tabRenderer": { "content": {
                    "sectionListRenderer": { "contents": [ { "gridRenderer": grid } ] },
                } } } ],
            } } })
        } else {
            json!({ "continuationContents": { "gridContinuation": grid } })
        }
    }

    #[tokio::test]
    async fn library_collection_concatenates_grid_pages() {
        let transport = ScriptedTransport::new(vec![
            library_page(&["PL1", "PL2"], Some("g2"), true),
            library_page(&["PL3"], None, false),
        ]);

        let playlists = collect_library(&transport, None, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(transport.request_count(), 2);
        let ids: Vec<_> = playlists.iter().map(|p| p.playlist_id.clone()).collect();
        assert_eq!(ids, vec!["PL1", "PL2", "PL3"]);

        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests[0].1["browseId"], "FEmusic_liked_playlists");
        assert_eq!(requests[1].1, json!({ "continuation": "g2" }));
        assert_eq!(requests[1].2, "&ctoken=g2&continuation=g2&type=next");
    }

    #[tokio::test]
    async fn library_limit_stops_fetching() {
        let transport = ScriptedTransport::new(vec![
            library_page(&["PL1", "PL2"], Some("g2"), true),
            library_page(&["PL3"], None, false),
        ]);

        let playlists = collect_library(&transport, Some(2), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(transport.request_count(), 1);
        assert_eq!(playlists.len(), 2);
    }

    #[test]
    fn absorbed_tracks_keep_parsed_fields() {
        let page = parse::parse_track_page(&first_page(&["abc"], None));
        assert_eq!(page.tracks[0].video_id, "abc");
        assert_eq!(page.tracks[0].like_status, LikeStatus::Indifferent);
    }
}
