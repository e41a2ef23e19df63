//! Pagepress Library
//!
//! A web service library for converting HTML content or URLs into PDF
//! documents via headless Chrome (driven over the DevTools protocol with
//! `chromiumoxide`).
//!
//! # Module Overview
//!
//! - [`request`] - Request parsing and input-mode validation
//! - [`options`] - Render options and translation to DevTools print params
//! - [`profile`] - Deployment profiles (timeouts, launch args, wait strategy)
//! - [`renderer`] - Browser session management and PDF generation
//! - [`response`] - Binary response shaping
//! - [`app`] - Axum router and handlers
//! - [`error`] - Failure taxonomy and HTTP error mapping
//!
//! # Example
//!
//! ```no_run
//! use pagepress_lib::{DeploymentProfile, RenderOptions, Renderer, RenderSource};
//!
//! # async fn example() -> pagepress_lib::Result<()> {
//! let renderer = Renderer::new(DeploymentProfile::local());
//! let source = RenderSource::Html("<h1>Hello</h1>".to_string());
//! let pdf = renderer.render_pdf(&source, &RenderOptions::default()).await?;
//! println!("{} bytes", pdf.len());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod error;
pub mod options;
pub mod profile;
pub mod renderer;
pub mod request;
pub mod response;

pub use app::{create_app, AppState};
pub use error::{ConvertError, ErrorBody, Result};
pub use options::RenderOptions;
pub use profile::{DeploymentProfile, ProfileKind, Viewport, WaitStrategy};
pub use renderer::Renderer;
pub use request::{ConvertRequest, RenderSource};
pub use response::pdf_response;
