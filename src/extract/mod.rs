//! Playlist extraction and normalization.
//!
//! The extractor drives a [`PageRenderer`] over the listing page and maps
//! each rendered item node into a [`PlaylistItem`]. It deliberately keeps
//! everything it sees: filtering and truncation happen in [`normalize`].

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::domain::{playlist_url, video_id_from_href, PlaylistItem};
use crate::renderer::{NodeHandle, PageRenderer};

/// Repeated marker for one playlist entry on the listing page
const ITEM_SELECTOR: &str = "ytd-playlist-video-renderer";

/// Preferred link element inside an item node
const PRIMARY_LINK_SELECTOR: &str = "a.yt-simple-endpoint";

/// Fallback link element when the primary is absent
const FALLBACK_LINK_SELECTOR: &str = "a#video-title";

/// Title element inside an item node
const TITLE_SELECTOR: &str = "#video-title";

/// How long to wait for item markers before scraping whatever is present
const ITEM_WAIT_TIMEOUT: Duration = Duration::from_secs(15);

/// Validated input for a fetch run
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Identifier of the listing to scrape
    pub playlist_id: String,

    /// Number of valid entries reported by the fetch summary
    pub limit: usize,
}

impl FetchConfig {
    pub fn new(playlist_id: impl Into<String>, limit: usize) -> Self {
        Self {
            playlist_id: playlist_id.into(),
            limit,
        }
    }

    /// Validate before the extractor runs
    pub fn validate(&self) -> Result<()> {
        if self.playlist_id.trim().is_empty() {
            anyhow::bail!("Playlist id must not be empty");
        }
        if self.limit == 0 {
            anyhow::bail!("Limit must be at least 1");
        }
        Ok(())
    }
}

/// Scrape the listing page for a playlist and map every rendered item node.
///
/// A wait timeout is degraded but not fatal: whatever is rendered at that
/// point gets extracted, which may be nothing. Navigation failures
/// propagate.
pub async fn extract_items<R>(renderer: &R, playlist_id: &str) -> Result<Vec<PlaylistItem>>
where
    R: PageRenderer + ?Sized,
{
    let url = playlist_url(playlist_id);
    renderer
        .navigate(&url)
        .await
        .with_context(|| format!("Failed to load listing page {url}"))?;

    if !renderer.wait_for(ITEM_SELECTOR, ITEM_WAIT_TIMEOUT).await? {
        warn!(
            "Playlist items did not render within {:?}; extracting whatever is present",
            ITEM_WAIT_TIMEOUT
        );
    }

    let nodes = renderer.query_all(ITEM_SELECTOR).await?;
    let mut items = Vec::with_capacity(nodes.len());
    for node in &nodes {
        items.push(map_item_node(node.as_ref()).await?);
    }

    debug!("Extracted {} rendered playlist entries", items.len());
    Ok(items)
}

/// Map one rendered item node into a playlist entry.
///
/// The link element is looked up by the primary selector first, then the
/// fallback. The title comes from the title element, falling back to the
/// link's own text, then to the empty string.
async fn map_item_node(node: &dyn NodeHandle) -> Result<PlaylistItem> {
    let link = match node.query_selector(PRIMARY_LINK_SELECTOR).await? {
        Some(link) => Some(link),
        None => node.query_selector(FALLBACK_LINK_SELECTOR).await?,
    };

    let title = match node.query_selector(TITLE_SELECTOR).await? {
        Some(title) => title.text().await?.trim().to_string(),
        None => match &link {
            Some(link) => link.text().await?.trim().to_string(),
            None => String::new(),
        },
    };

    let href = match &link {
        Some(link) => link.attribute("href").await?,
        None => None,
    };

    let id = href.as_deref().and_then(video_id_from_href);

    Ok(PlaylistItem { title, href, id })
}

/// Normalize an extracted sequence: keep entries with an id, in order,
/// up to `limit`.
///
/// Fewer than `limit` valid entries just yields a shorter result.
pub fn normalize(items: &[PlaylistItem], limit: usize) -> Vec<PlaylistItem> {
    items
        .iter()
        .filter(|item| item.has_id())
        .take(limit)
        .cloned()
        .collect()
}
