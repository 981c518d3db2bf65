//! Page renderer abstraction.
//!
//! The fetch stage only needs three capabilities from a browser: navigate,
//! wait for a selector, and query matching nodes. Keeping them behind a
//! trait lets the extractor run against a scripted renderer in tests.

pub mod chrome;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

// Re-export the Chrome renderer
pub use chrome::ChromeRenderer;

/// A handle to one rendered DOM node
#[async_trait]
pub trait NodeHandle: Send + Sync {
    /// Value of an attribute, or `None` if the attribute is absent
    async fn attribute(&self, name: &str) -> Result<Option<String>>;

    /// Visible text content of the node
    async fn text(&self) -> Result<String>;

    /// First descendant matching the selector, or `None`
    async fn query_selector(&self, selector: &str) -> Result<Option<Box<dyn NodeHandle>>>;
}

/// A renderer session holding one loaded page
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Navigate to a URL and wait for the page load to settle.
    /// Navigation failures are fatal for the run; they are not retried.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Wait up to `timeout` for a selector to be present.
    /// Returns `false` on timeout; that is a degraded result, not an error.
    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<bool>;

    /// All nodes currently matching the selector, in document order
    async fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn NodeHandle>>>;
}
