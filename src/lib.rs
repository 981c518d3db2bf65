//! lessonlink - Playlist-to-lesson-notes link pipeline
//!
//! A two-stage pipeline that keeps a set of lesson note files pointing at
//! the right playlist videos:
//! - The fetch stage drives a headless browser over a playlist listing page
//!   and persists the scraped entries to a JSON document
//! - The apply stage reads that document and rewrites the watch link inside
//!   each lesson note file
//!
//! # Architecture
//!
//! The stages share nothing but the persisted document:
//! - Fetch: Extractor -> Normalizer -> Persister (one run)
//! - Apply: Linker (separate run, reads the document)
//!
//! # Modules
//!
//! - `renderer`: Page renderer abstraction and the Chrome-backed implementation
//! - `extract`: Playlist extraction and normalization
//! - `store`: Persisted playlist document handling
//! - `link`: Lesson file link rewriting
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Scrape a playlist into data/playlist.json
//! lessonlink fetch PLoROMvodv4rNRRGdS0rBbXOUGA0wjdh1X 10
//!
//! # Apply the scraped links to notes/lesson1.html .. notes/lesson10.html
//! lessonlink apply
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod extract;
pub mod link;
pub mod renderer;
pub mod store;

// Re-export main types at crate root for convenience
pub use domain::{PlaylistDocument, PlaylistItem};
pub use extract::{extract_items, normalize, FetchConfig};
pub use link::{apply_links, LessonOutcome};
pub use renderer::{ChromeRenderer, NodeHandle, PageRenderer};
