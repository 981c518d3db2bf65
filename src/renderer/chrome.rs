//! Chrome-backed page renderer.
//!
//! Drives a headless Chrome instance over the DevTools protocol. The
//! session owns the browser process, its event handler task, and a single
//! page; `close` tears all of it down.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::{NodeHandle, PageRenderer};

/// Polling interval for selector waits
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Renderer session backed by a headless Chrome process
pub struct ChromeRenderer {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromeRenderer {
    /// Launch a headless browser and open an empty page.
    ///
    /// The CDP event handler runs on a background task for the lifetime of
    /// the session.
    pub async fn launch() -> Result<Self> {
        let config = BrowserConfig::builder()
            .window_size(1200, 800)
            .build()
            .map_err(|e| anyhow!("Failed to build browser config: {e}"))?;

        let (browser, mut events) = Browser::launch(config)
            .await
            .context("Failed to launch headless browser")?;

        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(e).context("Failed to open browser page");
            }
        };

        Ok(Self {
            browser,
            page,
            handler,
        })
    }

    /// Shut the session down, consuming it.
    ///
    /// Closes the browser and stops the event handler task. Callers must
    /// invoke this on every exit path; a close failure is reported but the
    /// browser process is killed regardless.
    pub async fn close(mut self) -> Result<()> {
        if let Err(e) = self.browser.close().await {
            let _ = self.browser.kill().await;
            self.handler.abort();
            return Err(e).context("Failed to close browser session");
        }
        let _ = self.browser.wait().await;
        self.handler.abort();
        Ok(())
    }
}

#[async_trait]
impl PageRenderer for ChromeRenderer {
    async fn navigate(&self, url: &str) -> Result<()> {
        let page = self
            .page
            .goto(url)
            .await
            .with_context(|| format!("Navigation to {url} failed"))?;

        page.wait_for_navigation()
            .await
            .with_context(|| format!("Page load for {url} did not settle"))?;

        Ok(())
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;

        loop {
            // find_element errors while the node is absent; treat any
            // failure as not-yet-rendered and keep polling.
            if self.page.find_element(selector).await.is_ok() {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn NodeHandle>>> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .with_context(|| format!("Query for '{selector}' failed"))?;

        Ok(elements
            .into_iter()
            .map(|element| Box::new(ChromeNode { element }) as Box<dyn NodeHandle>)
            .collect())
    }
}

/// Node handle wrapping a CDP element
struct ChromeNode {
    element: Element,
}

#[async_trait]
impl NodeHandle for ChromeNode {
    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.element
            .attribute(name)
            .await
            .with_context(|| format!("Failed to read attribute '{name}'"))
    }

    async fn text(&self) -> Result<String> {
        let text = self
            .element
            .inner_text()
            .await
            .context("Failed to read node text")?;
        Ok(text.unwrap_or_default())
    }

    async fn query_selector(&self, selector: &str) -> Result<Option<Box<dyn NodeHandle>>> {
        // chromiumoxide surfaces "no match" as an error; map it to None
        match self.element.find_element(selector).await {
            Ok(element) => Ok(Some(Box::new(ChromeNode { element }))),
            Err(_) => Ok(None),
        }
    }
}
