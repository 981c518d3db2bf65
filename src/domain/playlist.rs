//! Playlist entries and the persisted playlist document.
//!
//! The document is the only hand-off between the fetch and apply stages.
//! Its JSON shape is fixed: `{"playlistId": "...", "items": [...]}` with
//! `href`/`id` serialized as `null` when absent.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Host used for both the listing page and the canonical watch URLs.
const VIDEO_HOST: &str = "https://www.youtube.com";

/// One entry scraped from the playlist listing, in listing order.
///
/// Listing order is semantically meaningful: position N corresponds to
/// lesson N in the apply stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// Visible title text (trimmed; empty if no title element was found)
    pub title: String,

    /// Raw href of the item's link element, if any
    pub href: Option<String>,

    /// 11-character video identifier parsed from `href`, if present
    pub id: Option<String>,
}

impl PlaylistItem {
    /// An entry is usable only when it carries a video identifier
    pub fn has_id(&self) -> bool {
        self.id.is_some()
    }
}

/// The persisted document produced by a fetch run.
///
/// Items are stored exactly as extracted, without filtering out null-id
/// entries. Consumers must skip entries without an id. Each fetch run
/// replaces the document wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDocument {
    /// Identifier of the source listing
    #[serde(rename = "playlistId")]
    pub playlist_id: String,

    /// Scraped entries in listing order
    pub items: Vec<PlaylistItem>,
}

impl PlaylistDocument {
    /// Create a document from a fetch run's extracted entries
    pub fn new(playlist_id: impl Into<String>, items: Vec<PlaylistItem>) -> Self {
        Self {
            playlist_id: playlist_id.into(),
            items,
        }
    }

    /// Entry for a 1-based lesson index, if the document has one
    pub fn item_for_lesson(&self, lesson: usize) -> Option<&PlaylistItem> {
        self.items.get(lesson.checked_sub(1)?)
    }
}

/// Extract the 11-character video id from a watch href.
///
/// Hrefs look like `/watch?v=VIDEO_ID&list=...`; the id is the value of the
/// `v` query parameter. Returns `None` if the parameter is absent or shorter
/// than 11 valid characters.
pub fn video_id_from_href(href: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"[?&]v=([A-Za-z0-9_-]{11})").unwrap());

    re.captures(href).map(|caps| caps[1].to_string())
}

/// Listing page URL for a playlist id
pub fn playlist_url(playlist_id: &str) -> String {
    format!("{VIDEO_HOST}/playlist?list={playlist_id}")
}

/// Canonical watch URL for a video id
pub fn watch_url(video_id: &str) -> String {
    format!("{VIDEO_HOST}/watch?v={video_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_id_from_watch_href() {
        let id = video_id_from_href("/watch?v=dQw4w9WgXcQ&list=PL123&index=2");
        assert_eq!(id.as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn test_video_id_from_secondary_parameter() {
        let id = video_id_from_href("/watch?list=PL123&v=abc-DEF_123");
        assert_eq!(id.as_deref(), Some("abc-DEF_123"));
    }

    #[test]
    fn test_video_id_missing_or_short() {
        assert_eq!(video_id_from_href("/playlist?list=PL123"), None);
        assert_eq!(video_id_from_href("/watch?v=short"), None);
    }

    #[test]
    fn test_video_id_takes_first_eleven_characters() {
        // Same behavior as the scrape pattern: a longer value still yields
        // an 11-character id.
        let id = video_id_from_href("/watch?v=abcdefghijkl");
        assert_eq!(id.as_deref(), Some("abcdefghijk"));
    }

    #[test]
    fn test_urls() {
        assert_eq!(
            playlist_url("PL123"),
            "https://www.youtube.com/playlist?list=PL123"
        );
        assert_eq!(
            watch_url("dQw4w9WgXcQ"),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_document_json_shape() {
        let doc = PlaylistDocument::new(
            "PL123",
            vec![
                PlaylistItem {
                    title: "Lecture 1".to_string(),
                    href: Some("/watch?v=dQw4w9WgXcQ".to_string()),
                    id: Some("dQw4w9WgXcQ".to_string()),
                },
                PlaylistItem {
                    title: String::new(),
                    href: None,
                    id: None,
                },
            ],
        );

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["playlistId"], "PL123");
        assert_eq!(json["items"][0]["id"], "dQw4w9WgXcQ");
        // Absent link and id serialize as null, not as missing keys
        assert!(json["items"][1]["href"].is_null());
        assert!(json["items"][1]["id"].is_null());

        let back: PlaylistDocument = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_item_for_lesson() {
        let doc = PlaylistDocument::new(
            "PL123",
            vec![PlaylistItem {
                title: "Lecture 1".to_string(),
                href: None,
                id: Some("dQw4w9WgXcQ".to_string()),
            }],
        );

        assert!(doc.item_for_lesson(1).is_some());
        assert!(doc.item_for_lesson(2).is_none());
        assert!(doc.item_for_lesson(0).is_none());
    }
}
