//! Rendering invoker: one browser session per conversion request.
//!
//! The invoker launches a headless Chrome session, loads the validated
//! content into a fresh page, prints it to PDF, and releases the session on
//! every exit path. Timeouts bound each suspension point; a failed
//! invocation is terminal for the request (no retries).

use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::error::CdpError;
use chromiumoxide::handler::viewport::Viewport as PageViewport;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::options::RenderOptions;
use crate::profile::{DeploymentProfile, WaitStrategy};
use crate::request::RenderSource;
use crate::{ConvertError, Result};

const READY_STATE_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Settle window after the load event for late subresource fetches.
const NETWORK_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Converts validated content into PDF bytes using headless Chrome.
#[derive(Debug, Clone)]
pub struct Renderer {
    profile: DeploymentProfile,
}

impl Renderer {
    pub fn new(profile: DeploymentProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &DeploymentProfile {
        &self.profile
    }

    /// Renders the source to PDF bytes.
    ///
    /// The browser session is closed before the result is surfaced,
    /// regardless of which step failed.
    pub async fn render_pdf(
        &self,
        source: &RenderSource,
        options: &RenderOptions,
    ) -> Result<Vec<u8>> {
        let params = options.to_pdf_params().map_err(ConvertError::Render)?;
        let config = self.browser_config()?;

        debug!(profile = self.profile.name, "launching browser session");
        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|err| ConvertError::Session(format!("Failed to launch browser: {err}")))?;

        // The handler stream must be driven for the session to make progress.
        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let result = self.render_on(&browser, source, params).await;

        if let Err(err) = browser.close().await {
            warn!(error = %err, "failed to close browser session");
        }
        let _ = browser.wait().await;
        events.abort();

        result
    }

    async fn render_on(
        &self,
        browser: &Browser,
        source: &RenderSource,
        params: PrintToPdfParams,
    ) -> Result<Vec<u8>> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(session_error)?;

        self.load(&page, source).await?;

        let render_timeout = self.profile.render_timeout;
        timeout(render_timeout, page.pdf(params))
            .await
            .map_err(|_| {
                ConvertError::Render(format!(
                    "PDF generation exceeded {} ms",
                    render_timeout.as_millis()
                ))
            })?
            .map_err(render_error)
    }

    /// Loads the content into the page under the profile's navigation timeout.
    async fn load(&self, page: &Page, source: &RenderSource) -> Result<()> {
        let nav_timeout = self.profile.navigation_timeout;
        match source {
            RenderSource::Html(html) => timeout(nav_timeout, self.load_html(page, html))
                .await
                .map_err(|_| {
                    navigation_timeout("Timed out while loading HTML content", nav_timeout)
                })?,
            RenderSource::Url(url) => timeout(nav_timeout, self.load_url(page, url.as_str()))
                .await
                .map_err(|_| {
                    navigation_timeout(&format!("Timed out navigating to {url}"), nav_timeout)
                })?,
        }
    }

    async fn load_html(&self, page: &Page, html: &str) -> Result<()> {
        page.set_content(html).await.map_err(navigation_error)?;
        self.await_load(page).await
    }

    async fn load_url(&self, page: &Page, url: &str) -> Result<()> {
        page.goto(url).await.map_err(navigation_error)?;
        page.wait_for_navigation().await.map_err(navigation_error)?;
        self.await_load(page).await
    }

    async fn await_load(&self, page: &Page) -> Result<()> {
        match self.profile.wait_strategy {
            WaitStrategy::DomContentLoaded => self.poll_ready_state(page, false).await,
            WaitStrategy::NetworkIdle => {
                self.poll_ready_state(page, true).await?;
                tokio::time::sleep(NETWORK_SETTLE_DELAY).await;
                Ok(())
            }
        }
    }

    /// Polls `document.readyState` until the wanted state is reached. The
    /// caller bounds this with the navigation timeout.
    async fn poll_ready_state(&self, page: &Page, require_complete: bool) -> Result<()> {
        loop {
            let state: String = page
                .evaluate("document.readyState")
                .await
                .map_err(navigation_error)?
                .into_value()
                .map_err(|err| {
                    ConvertError::Navigation(format!("Unexpected readyState result: {err}"))
                })?;

            let done = if require_complete {
                state == "complete"
            } else {
                state != "loading"
            };
            if done {
                return Ok(());
            }
            tokio::time::sleep(READY_STATE_POLL_INTERVAL).await;
        }
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .viewport(PageViewport {
                width: self.profile.viewport.width,
                height: self.profile.viewport.height,
                ..Default::default()
            })
            .request_timeout(self.profile.render_timeout);
        for arg in &self.profile.launch_args {
            builder = builder.arg(arg.as_str());
        }
        builder.build().map_err(ConvertError::Session)
    }
}

fn navigation_timeout(message: &str, elapsed: Duration) -> ConvertError {
    ConvertError::NavigationTimeout(format!("{message} (after {} ms)", elapsed.as_millis()))
}

fn session_error(err: CdpError) -> ConvertError {
    ConvertError::Session(err.to_string())
}

fn navigation_error(err: CdpError) -> ConvertError {
    classify_navigation(&err.to_string())
}

fn render_error(err: CdpError) -> ConvertError {
    classify_render(&err.to_string())
}

/// Classifies a load failure by its diagnostic message.
fn classify_navigation(message: &str) -> ConvertError {
    let lower = message.to_ascii_lowercase();
    if lower.contains("timeout") || lower.contains("timed out") {
        ConvertError::NavigationTimeout(message.to_string())
    } else if is_session_loss(&lower) {
        ConvertError::Session(message.to_string())
    } else {
        ConvertError::Navigation(message.to_string())
    }
}

/// Classifies a print failure by its diagnostic message.
fn classify_render(message: &str) -> ConvertError {
    let lower = message.to_ascii_lowercase();
    if is_session_loss(&lower) {
        ConvertError::Session(message.to_string())
    } else {
        ConvertError::Render(message.to_string())
    }
}

/// Messages Chrome emits when the process or target goes away mid-request,
/// e.g. after an out-of-memory kill.
fn is_session_loss(lower: &str) -> bool {
    lower.contains("target closed")
        || lower.contains("session closed")
        || lower.contains("browser closed")
        || lower.contains("connection closed")
        || lower.contains("websocket")
        || lower.contains("channel closed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileKind;

    #[test]
    fn browser_config_builds_for_both_profiles() {
        for kind in [ProfileKind::Local, ProfileKind::Constrained] {
            let renderer = Renderer::new(kind.profile());
            assert!(renderer.browser_config().is_ok());
        }
    }

    #[test]
    fn bad_paper_format_is_a_render_error_before_launch() {
        let options = RenderOptions {
            format: "nonsense".to_string(),
            ..RenderOptions::default()
        };
        let err = options.to_pdf_params().map_err(ConvertError::Render);
        assert!(matches!(err, Err(ConvertError::Render(_))));
    }

    #[test]
    fn timeouts_classify_as_navigation_timeout() {
        let err = classify_navigation("Timeout while resolving navigation");
        assert!(matches!(err, ConvertError::NavigationTimeout(_)));
        assert_eq!(err.category(), "NavigationTimeout");

        let err = classify_navigation("request timed out");
        assert!(matches!(err, ConvertError::NavigationTimeout(_)));
    }

    #[test]
    fn network_failures_classify_as_navigation_error() {
        let err = classify_navigation("net::ERR_NAME_NOT_RESOLVED at https://nowhere.invalid");
        assert!(matches!(err, ConvertError::Navigation(_)));
        assert_eq!(err.category(), "NavigationError");
    }

    #[test]
    fn lost_sessions_classify_as_session_error() {
        for message in [
            "Target closed before navigation finished",
            "websocket connection reset",
            "browser closed unexpectedly",
        ] {
            let err = classify_navigation(message);
            assert!(matches!(err, ConvertError::Session(_)), "for {message:?}");
        }

        let err = classify_render("Session closed while printing");
        assert!(matches!(err, ConvertError::Session(_)));
    }

    #[test]
    fn print_failures_classify_as_render_error() {
        let err = classify_render("Printing failed: invalid scale parameter");
        assert!(matches!(err, ConvertError::Render(_)));
        assert_eq!(err.category(), "RenderError");
    }

    #[test]
    fn navigation_timeout_message_includes_budget() {
        let err = navigation_timeout("Timed out navigating to https://example.com", Duration::from_secs(15));
        let body = err.to_body();
        let details = body.details.unwrap_or_default();
        assert!(details.contains("15000 ms"), "got: {details}");
    }
}
