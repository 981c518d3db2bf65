//! Lesson file linking.
//!
//! Walks the fixed set of lesson note files and rewrites each one's
//! playlist anchor to the canonical watch URL of the corresponding
//! document entry. Every lesson is attempted independently: a missing
//! file, a missing entry, or an unmatched anchor is a warning, never an
//! error for the run.

pub mod rules;

use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{info, warn};

use crate::domain::{watch_url, PlaylistDocument};

// Re-export the rewrite entry points
pub use rules::{rewrite_watch_link, MatchedRule};

/// Number of lesson files maintained by the apply stage
pub const LESSON_COUNT: usize = 10;

/// Per-lesson result of an apply run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonOutcome {
    /// File rewritten with the canonical watch URL
    Applied { lesson: usize, url: String },

    /// Target file does not exist
    MissingFile { lesson: usize },

    /// Document has no entry with an id for this lesson
    MissingItem { lesson: usize },

    /// Neither rewrite rule matched; file left untouched
    NoMatch { lesson: usize },
}

impl LessonOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// File name of a lesson note, 1-based
pub fn lesson_file_name(lesson: usize) -> String {
    format!("lesson{lesson}.html")
}

/// Apply watch links from `document` to the lesson files under `notes_dir`.
///
/// Lesson N takes its video from `items[N-1]`; entries without an id are
/// skipped defensively. Target-file I/O failures (other than the file being
/// absent) abort the run.
pub async fn apply_links(
    document: &PlaylistDocument,
    notes_dir: &Path,
) -> Result<Vec<LessonOutcome>> {
    let mut outcomes = Vec::with_capacity(LESSON_COUNT);

    for lesson in 1..=LESSON_COUNT {
        let path = notes_dir.join(lesson_file_name(lesson));

        if !path.exists() {
            warn!("{} not found, skipping", path.display());
            outcomes.push(LessonOutcome::MissingFile { lesson });
            continue;
        }

        let id = document
            .item_for_lesson(lesson)
            .and_then(|item| item.id.as_deref());
        let id = match id {
            Some(id) => id,
            None => {
                warn!("No corresponding video data for lesson {lesson}, skipping");
                outcomes.push(LessonOutcome::MissingItem { lesson });
                continue;
            }
        };

        let url = watch_url(id);
        let html = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        match rules::rewrite_watch_link(&html, &url) {
            Some((rewritten, _)) => {
                fs::write(&path, rewritten)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Updated {} -> {}", path.display(), url);
                outcomes.push(LessonOutcome::Applied { lesson, url });
            }
            None => {
                warn!(
                    "No replaceable playlist link found in {}, manual check required",
                    path.display()
                );
                outcomes.push(LessonOutcome::NoMatch { lesson });
            }
        }
    }

    Ok(outcomes)
}
