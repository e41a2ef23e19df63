//! Request parsing and validation for conversion requests.
//!
//! A conversion request carries exactly one of `html` or `url`. Both-present
//! and both-absent are rejected before any browser work happens.

use serde::Deserialize;
use url::Url;

use crate::options::RenderOptions;
use crate::{ConvertError, Result};

/// Body of `POST /convert`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConvertRequest {
    pub html: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub options: RenderOptions,
}

/// Validated input mode: inline HTML or a navigable absolute URL.
#[derive(Debug, Clone)]
pub enum RenderSource {
    Html(String),
    Url(Url),
}

impl RenderSource {
    pub fn mode(&self) -> &'static str {
        match self {
            RenderSource::Html(_) => "html",
            RenderSource::Url(_) => "url",
        }
    }

    /// Suggested download filename for the content-disposition header.
    pub fn filename(&self) -> &'static str {
        match self {
            RenderSource::Html(_) => "converted.pdf",
            RenderSource::Url(_) => "webpage.pdf",
        }
    }
}

impl ConvertRequest {
    /// Decides which input mode applies, or fails with a validation error.
    ///
    /// Empty and whitespace-only strings count as absent, matching the
    /// permissive handling of the form UI that posts blank fields.
    pub fn source(&self) -> Result<RenderSource> {
        let html = self.html.as_deref().filter(|s| !s.trim().is_empty());
        let url = self.url.as_deref().filter(|s| !s.trim().is_empty());

        match (html, url) {
            (None, None) => Err(ConvertError::validation(
                "Either HTML content or URL is required",
            )),
            (Some(_), Some(_)) => Err(ConvertError::validation(
                "Ambiguous input: provide either HTML content or URL, not both",
            )),
            (Some(html), None) => Ok(RenderSource::Html(html.to_string())),
            (None, Some(url)) => Ok(RenderSource::Url(Url::parse(url)?)),
        }
    }
}
