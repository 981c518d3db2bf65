//! Command-line interface for lessonlink.
//!
//! Provides the two pipeline stages as subcommands (`fetch`, `apply`) plus
//! a configuration debug command.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::config;
use crate::domain::PlaylistDocument;
use crate::extract::{extract_items, normalize, FetchConfig};
use crate::link::{self, LessonOutcome};
use crate::renderer::ChromeRenderer;
use crate::store;

/// lessonlink - playlist-to-lesson-notes link pipeline
#[derive(Parser, Debug)]
#[command(name = "lessonlink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrape a playlist listing into the local playlist document
    Fetch {
        /// Playlist identifier (the `list=` parameter of the listing URL)
        playlist_id: String,

        /// Number of entries reported in the fetch summary
        #[arg(default_value_t = 10)]
        limit: usize,
    },

    /// Apply fetched watch links to the lesson note files
    Apply,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Fetch { playlist_id, limit } => {
                fetch_playlist(FetchConfig::new(playlist_id, limit)).await
            }
            Commands::Apply => apply_links().await,
            Commands::Config => show_config(),
        }
    }
}

/// Run the fetch stage: extract, normalize for the summary, persist
async fn fetch_playlist(fetch: FetchConfig) -> Result<()> {
    fetch.validate()?;

    info!(
        "Fetching playlist {} (limit {})",
        fetch.playlist_id, fetch.limit
    );

    // The renderer session is scoped to this run: closed on success and
    // failure alike, before the extraction result is inspected.
    let renderer = ChromeRenderer::launch()
        .await
        .context("Failed to start renderer session")?;
    let extracted = extract_items(&renderer, &fetch.playlist_id).await;
    if let Err(e) = renderer.close().await {
        warn!("Renderer session teardown failed: {e:#}");
    }
    let items = extracted?;

    let picked = normalize(&items, fetch.limit);
    info!(
        "Extracted {} entries, {} usable",
        items.len(),
        picked.len()
    );

    let document = PlaylistDocument::new(&fetch.playlist_id, items);
    let path = store::document_path()?;
    store::save(&document, &path).await?;

    for (index, item) in picked.iter().enumerate() {
        // normalize() only keeps entries with an id
        let id = item.id.as_deref().unwrap_or("-");
        println!("{:>2}. [{}] {}", index + 1, id, item.title);
    }
    println!("Wrote {}", path.display());

    Ok(())
}

/// Run the apply stage: read the document, patch the lesson files
async fn apply_links() -> Result<()> {
    let path = store::document_path()?;
    let document = store::load(&path).await?;

    let notes_dir = config::config()?.notes_dir.clone();
    let outcomes = link::apply_links(&document, &notes_dir).await?;

    let applied = outcomes.iter().filter(|o| o.is_applied()).count();
    let unmatched = outcomes
        .iter()
        .filter(|o| matches!(o, LessonOutcome::NoMatch { .. }))
        .count();

    println!(
        "Applied {applied} of {} lesson links ({unmatched} need manual checking).",
        outcomes.len()
    );
    println!("Done applying links.");

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("lessonlink configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Data (document):  {}", cfg.data_dir.display());
    println!("  Notes (lessons):  {}", cfg.notes_dir.display());
    println!("  Document file:    {}", store::document_path()?.display());

    Ok(())
}
