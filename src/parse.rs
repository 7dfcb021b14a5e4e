//! Normalization of InnerTube response trees into domain entities.
//!
//! Every field access goes through [`crate::nav`]: when the upstream
//! schema shifts, a field degrades to its default instead of aborting the
//! rest of the entity. A missing track shelf parses as an empty page: an
//! empty playlist and a renamed shelf are indistinguishable from here, and
//! "no tracks" is the safe reading for both.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde_json::Value;

use crate::{
    model::{
        AccountInfo, AlbumRef, ArtistRef, FeedbackTokens, LikeStatus, PlaylistDetail,
        PlaylistSummary, PrivacyStatus, Thumbnail, Track,
    },
    nav::{nav, nav_array, nav_str, nav_string},
    pagination::{SummaryPage, TrackPage},
};

/// Header subtree present only on playlists the viewer owns.
const EDITABLE_HEADER: &str = "header.musicEditablePlaylistDetailHeaderRenderer";

/// Header subtree of a public or foreign playlist.
const DETAIL_HEADER: &str = "header.musicDetailHeaderRenderer";

const EDIT_PRIVACY: &str = "header.musicEditablePlaylistDetailHeaderRenderer.\
     editHeader.musicPlaylistEditHeaderRenderer.privacy";

/// Shelf holding a playlist's track renderers on the initial page.
const TRACK_SHELF: &str = "contents.singleColumnBrowseResultsRenderer.tabs.0.tabRenderer.\
     content.sectionListRenderer.contents.0.musicPlaylistShelfRenderer";

/// Shelf holding a playlist's track renderers on continuation pages.
const TRACK_SHELF_CONTINUATION: &str = "continuationContents.musicPlaylistShelfContinuation";

/// Grid holding the library's playlist tiles on the initial page.
const LIBRARY_GRID: &str = "contents.singleColumnBrowseResultsRenderer.tabs.0.tabRenderer.\
     content.sectionListRenderer.contents.0.gridRenderer";

/// Grid continuation counterpart of [`LIBRARY_GRID`].
const LIBRARY_GRID_CONTINUATION: &str = "continuationContents.gridContinuation";

/// Relative path from a shelf or grid to its next-page cursor.
const NEXT_CONTINUATION: &str = "continuations.0.nextContinuationData.continuation";

/// Display-policy sentinel marking a track as unavailable.
const GREYED_OUT: &str = "MUSIC_ITEM_RENDERER_DISPLAY_POLICY_GREY_OUT";

/// Labels like "137 songs" at the start of a subtitle run.
static COUNT_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\d,]+)\s+\w+").expect("invalid count label pattern"));

/// Strips everything but digits from a display string.
static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\D").expect("invalid digit pattern"));

/// Converts a colon-separated duration display string to seconds.
///
/// Supports "S", "M:SS" and "H:MM:SS" uniformly; an empty or malformed
/// string counts as zero and oversized values saturate.
#[must_use]
pub fn parse_duration(duration: &str) -> u64 {
    const MULTIPLIERS: [u64; 3] = [1, 60, 3600];

    duration
        .split(':')
        .rev()
        .zip(MULTIPLIERS)
        .fold(0, |total, (part, multiplier)| {
            let value = part.trim().parse::<u64>().unwrap_or(0);
            total.saturating_add(value.saturating_mul(multiplier))
        })
}

fn digits(text: &str) -> u64 {
    NON_DIGITS.replace_all(text, "").parse().unwrap_or(0)
}

fn thumbnails_at(root: &Value, path: &str) -> Vec<Thumbnail> {
    nav(root, path)
        .and_then(|value| serde_json::from_value(value.clone()).ok())
        .unwrap_or_default()
}

/// Which slots of the header's `subtitle.runs` hold which field.
///
/// The run *count* is the dispatch key: text slots alternate with
/// separator slots, so a five-run subtitle carries both an author and a
/// year at fixed positions while shorter ones omit the year (or both).
/// This coupling to an undocumented schema is fragile on purpose: new
/// variants get added here, not at the extraction sites.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum SubtitleShape {
    AuthorAndYear,
    Author,
    Bare,
}

impl SubtitleShape {
    fn classify(run_count: usize) -> Self {
        match run_count {
            5 => Self::AuthorAndYear,
            2.. => Self::Author,
            _ => Self::Bare,
        }
    }

    fn author_slot(self) -> Option<usize> {
        match self {
            Self::AuthorAndYear | Self::Author => Some(2),
            Self::Bare => None,
        }
    }

    fn year_slot(self) -> Option<usize> {
        matches!(self, Self::AuthorAndYear).then_some(4)
    }
}

/// Slot layout of `secondSubtitle.runs`: a five-run variant leads with a
/// view count, the short variant starts straight at the track count.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum SecondSubtitleShape {
    WithViews,
    Short,
}

impl SecondSubtitleShape {
    fn classify(run_count: usize) -> Self {
        if run_count >= 5 {
            Self::WithViews
        } else {
            Self::Short
        }
    }

    fn views_slot(self) -> Option<usize> {
        matches!(self, Self::WithViews).then_some(0)
    }

    fn track_count_slot(self) -> usize {
        match self {
            Self::WithViews => 2,
            Self::Short => 0,
        }
    }

    fn duration_slot(self) -> usize {
        match self {
            Self::WithViews => 4,
            Self::Short => 2,
        }
    }
}

/// Parses a playlist browse response's header into a [`PlaylistDetail`]
/// without tracks.
///
/// The editable-header probe decides the variant once, for the whole
/// response: own playlists read their privacy from the edit header,
/// foreign ones are public by definition.
#[must_use]
pub fn parse_playlist_header(id: &str, root: &Value) -> PlaylistDetail {
    let is_own_playlist = nav(root, EDITABLE_HEADER).is_some();

    let (header, privacy) = if is_own_playlist {
        (
            nav(root, &format!("{EDITABLE_HEADER}.header.musicDetailHeaderRenderer")),
            PrivacyStatus::from_upstream(nav_str(root, EDIT_PRIVACY).unwrap_or_default()),
        )
    } else {
        (nav(root, DETAIL_HEADER), PrivacyStatus::Public)
    };
    let header = header.unwrap_or(&Value::Null);

    let subtitle = SubtitleShape::classify(nav_array(header, "subtitle.runs").map_or(0, Vec::len));
    let author = subtitle.author_slot().map(|slot| ArtistRef {
        id: nav_str(
            header,
            &format!("subtitle.runs.{slot}.navigationEndpoint.browseEndpoint.browseId"),
        )
        .map(str::to_string),
        name: nav_string(header, &format!("subtitle.runs.{slot}.text")),
    });
    let year = subtitle
        .year_slot()
        .map(|slot| nav_string(header, &format!("subtitle.runs.{slot}.text")))
        .unwrap_or_default();

    let second =
        SecondSubtitleShape::classify(nav_array(header, "secondSubtitle.runs").map_or(0, Vec::len));
    let views = second
        .views_slot()
        .map(|slot| nav_string(header, &format!("secondSubtitle.runs.{slot}.text")));
    let track_count = digits(&nav_string(
        header,
        &format!("secondSubtitle.runs.{}.text", second.track_count_slot()),
    ));
    let duration = nav_string(
        header,
        &format!("secondSubtitle.runs.{}.text", second.duration_slot()),
    );

    PlaylistDetail {
        id: id.to_string(),
        title: nav_string(header, "title.runs.0.text"),
        privacy,
        description: nav_string(header, "description.runs.0.text"),
        thumbnails: thumbnails_at(
            header,
            "thumbnail.croppedSquareThumbnailRenderer.thumbnail.thumbnails",
        ),
        is_own_playlist,
        author,
        year,
        track_count,
        views,
        duration,
        continuation: shelf_continuation(root),
        tracks: Vec::new(),
    }
}

fn shelf_continuation(root: &Value) -> Option<String> {
    nav_str(root, &format!("{TRACK_SHELF}.{NEXT_CONTINUATION}")).map(str::to_string)
}

/// Extracts the first page of tracks from a playlist browse response.
#[must_use]
pub fn parse_track_page(root: &Value) -> TrackPage {
    TrackPage {
        tracks: nav_array(root, &format!("{TRACK_SHELF}.contents"))
            .map(|items| parse_track_list(items))
            .unwrap_or_default(),
        continuation: shelf_continuation(root),
    }
}

/// Extracts one continuation page of tracks.
#[must_use]
pub fn parse_track_continuation(root: &Value) -> TrackPage {
    TrackPage {
        tracks: nav_array(root, &format!("{TRACK_SHELF_CONTINUATION}.contents"))
            .map(|items| parse_track_list(items))
            .unwrap_or_default(),
        continuation: nav_str(root, &format!("{TRACK_SHELF_CONTINUATION}.{NEXT_CONTINUATION}"))
            .map(str::to_string),
    }
}

/// Maps a renderer array to tracks, in order.
///
/// Entries without the track-renderer wrapper are interstitial tiles
/// (ads, "new playlist" buttons) and are skipped silently.
#[must_use]
pub fn parse_track_list(items: &[Value]) -> Vec<Track> {
    items
        .iter()
        .filter_map(|item| nav(item, "musicResponsiveListItemRenderer"))
        .map(parse_track)
        .collect()
}

fn parse_track(renderer: &Value) -> Track {
    let menu = nav(renderer, "menu.menuRenderer");

    let mut video_id = String::new();
    let mut set_video_id = None;
    let mut feedback_tokens = None;

    // The menu's edit actions carry the id even for unavailable videos,
    // and they are the only source of the per-playlist set-video id.
    if let Some(items) = menu.and_then(|m| nav_array(m, "items")) {
        for entry in items {
            if let Some(id) = nav_str(
                entry,
                "menuServiceItemRenderer.serviceEndpoint.playlistEditEndpoint.actions.0.removedVideoId",
            ) {
                video_id = id.to_string();
            }
            if let Some(id) = nav_str(
                entry,
                "menuServiceItemRenderer.serviceEndpoint.playlistEditEndpoint.actions.0.setVideoId",
            ) {
                set_video_id = Some(id.to_string());
            }
            if let Some(toggle) = nav(entry, "toggleMenuServiceItemRenderer") {
                feedback_tokens = Some(parse_feedback_tokens(toggle));
            }
        }
    }

    // The play overlay reflects the currently playable target; when
    // present it wins over the menu-derived id.
    if let Some(id) = nav_str(
        renderer,
        "overlay.musicItemThumbnailOverlayRenderer.content.musicPlayButtonRenderer.\
         playNavigationEndpoint.watchEndpoint.videoId",
    ) {
        video_id = id.to_string();
    }

    let title = nav_string(
        renderer,
        "flexColumns.0.musicResponsiveListItemFlexColumnRenderer.text.runs.0.text",
    );

    let mut artists = Vec::new();
    if let Some(runs) = nav_array(
        renderer,
        "flexColumns.1.musicResponsiveListItemFlexColumnRenderer.text.runs",
    ) {
        for run in runs {
            artists.push(ArtistRef {
                id: nav_str(run, "navigationEndpoint.browseEndpoint.browseId")
                    .map(|id| id.trim().to_string()),
                name: nav_string(run, "text").trim().to_string(),
            });
        }
    }

    let album = nav(
        renderer,
        "flexColumns.2.musicResponsiveListItemFlexColumnRenderer.text.runs.0",
    )
    .map(|run| AlbumRef {
        id: nav_str(run, "navigationEndpoint.browseEndpoint.browseId")
            .map(|id| id.trim().to_string()),
        name: nav_string(run, "text").trim().to_string(),
    });

    let mut duration = String::from("0");
    if let Some(text) = nav(
        renderer,
        "fixedColumns.0.musicResponsiveListItemFixedColumnRenderer.text",
    ) {
        if let Some(simple) = nav_str(text, "simpleText") {
            duration = simple.to_string();
        } else if let Some(run) = nav_str(text, "runs.0.text") {
            duration = run.to_string();
        }
    }

    // Absent policy means available; only the grey-out sentinel does not.
    let is_available = nav_str(renderer, "musicItemRendererDisplayPolicy") != Some(GREYED_OUT);
    let is_licensed = menu.is_some();
    let is_explicit = nav(
        renderer,
        "badges.0.musicInlineBadgeRenderer.accessibilityData.accessibilityData.label",
    )
    .is_some();

    let mut like_status = LikeStatus::Indifferent;
    if is_available {
        if let Some(buttons) = menu.filter(|m| nav(m, "topLevelButtons").is_some()) {
            like_status = LikeStatus::from_upstream(
                nav_str(buttons, "topLevelButtons.0.likeButtonRenderer.likeStatus")
                    .unwrap_or_default(),
            );
        }
    }

    let video_type = menu
        .and_then(|m| {
            nav_str(
                m,
                "items.0.menuNavigationItemRenderer.navigationEndpoint.watchEndpoint.\
                 watchEndpointMusicSupportedConfigs.watchEndpointMusicConfig.musicVideoType",
            )
        })
        .map(str::to_string);

    let duration_seconds = parse_duration(&duration);

    Track {
        video_id,
        title,
        artists,
        album,
        like_status,
        thumbnails: thumbnails_at(renderer, "thumbnail.musicThumbnailRenderer.thumbnail.thumbnails"),
        is_available,
        is_licensed,
        is_explicit,
        video_type,
        duration,
        duration_seconds,
        feedback_tokens,
        set_video_id,
    }
}

fn parse_feedback_tokens(toggle: &Value) -> FeedbackTokens {
    let add = nav_str(toggle, "defaultServiceEndpoint.feedbackEndpoint.feedbackTokens")
        .map(str::to_string);
    let remove = nav_str(toggle, "toggledServiceEndpoint.feedbackEndpoint.feedbackTokens")
        .map(str::to_string);

    // When the default action is "remove from library" the pair arrives
    // swapped relative to our add/remove orientation.
    if nav_str(toggle, "defaultIcon.iconType") == Some("LIBRARY_REMOVE") {
        FeedbackTokens { add: remove, remove: add }
    } else {
        FeedbackTokens { add, remove }
    }
}

/// Extracts the first page of library playlists from a browse response.
///
/// The grid's leading tile is the "new playlist" button, not a playlist.
#[must_use]
pub fn parse_library_page(root: &Value) -> SummaryPage {
    nav(root, LIBRARY_GRID).map_or_else(SummaryPage::default, |grid| grid_page(grid, true))
}

/// Extracts one continuation page of library playlists.
#[must_use]
pub fn parse_library_continuation(root: &Value) -> SummaryPage {
    nav(root, LIBRARY_GRID_CONTINUATION)
        .map_or_else(SummaryPage::default, |grid| grid_page(grid, false))
}

fn grid_page(grid: &Value, skip_leading_tile: bool) -> SummaryPage {
    let playlists = nav_array(grid, "items")
        .map(|items| {
            items
                .iter()
                .skip(usize::from(skip_leading_tile))
                .filter_map(parse_playlist_summary)
                .collect()
        })
        .unwrap_or_default();

    SummaryPage {
        playlists,
        continuation: nav_str(grid, NEXT_CONTINUATION).map(str::to_string),
    }
}

fn parse_playlist_summary(item: &Value) -> Option<PlaylistSummary> {
    let renderer = nav(item, "musicTwoRowItemRenderer")?;

    Some(PlaylistSummary {
        playlist_id: nav_string(renderer, "navigationEndpoint.browseEndpoint.browseId"),
        title: nav_string(renderer, "title.runs.0.text"),
        thumbnails: thumbnails_at(
            renderer,
            "thumbnailRenderer.musicThumbnailRenderer.thumbnail.thumbnails",
        ),
        count: summary_count(renderer),
    })
}

/// The track count hides in a subtitle run shaped like "137 songs".
fn summary_count(renderer: &Value) -> Option<u64> {
    let runs = nav_array(renderer, "subtitle.runs")?;

    runs.iter()
        .filter_map(|run| nav_str(run, "text"))
        .find_map(|text| {
            let captures = COUNT_LABEL.captures(text.trim())?;
            captures.get(1)?.as_str().replace(',', "").parse().ok()
        })
}

/// Parses the `account/account_menu` response.
#[must_use]
pub fn parse_account_info(root: &Value) -> AccountInfo {
    const ACCOUNT_HEADER: &str = "actions.0.openPopupAction.popup.multiPageMenuRenderer.\
         header.activeAccountHeaderRenderer";

    let header = nav(root, ACCOUNT_HEADER).unwrap_or(&Value::Null);

    AccountInfo {
        name: nav_string(header, "accountName.runs.0.text"),
        channel_handle: nav_str(header, "channelHandle.runs.0.text").map(str::to_string),
        thumbnails: thumbnails_at(header, "accountPhoto.thumbnails"),
    }
}
