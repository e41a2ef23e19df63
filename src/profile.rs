//! Deployment profiles for the rendering invoker.
//!
//! A profile bundles the timeout, launch-argument, and wait-strategy defaults
//! for one hosting environment. The service picks a profile once at startup;
//! requests never change it.

use std::time::Duration;

use clap::ValueEnum;

/// How long to let page content settle before printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStrategy {
    /// Fast path: proceed once the DOM is parsed.
    DomContentLoaded,
    /// Thorough path: wait for the load event plus a short network-settle window.
    NetworkIdle,
}

/// Page viewport used for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
        }
    }
}

/// Named bundle of browser-session defaults for a hosting environment.
#[derive(Debug, Clone)]
pub struct DeploymentProfile {
    pub name: &'static str,
    pub navigation_timeout: Duration,
    pub render_timeout: Duration,
    pub wait_strategy: WaitStrategy,
    pub launch_args: Vec<String>,
    pub viewport: Viewport,
}

/// Profile selector exposed on the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileKind {
    /// Full-featured profile for dedicated hosts.
    Local,
    /// Reduced timeouts and arg list for memory/time constrained hosts.
    Constrained,
}

impl ProfileKind {
    pub fn profile(self) -> DeploymentProfile {
        match self {
            ProfileKind::Local => DeploymentProfile::local(),
            ProfileKind::Constrained => DeploymentProfile::constrained(),
        }
    }
}

impl DeploymentProfile {
    /// Full-featured profile: generous timeouts, network-quiescent loads,
    /// and the complete Chrome hardening arg list.
    pub fn local() -> Self {
        Self {
            name: "local",
            navigation_timeout: Duration::from_secs(30),
            render_timeout: Duration::from_secs(30),
            wait_strategy: WaitStrategy::NetworkIdle,
            launch_args: args(&[
                "--no-sandbox",
                "--disable-setuid-sandbox",
                "--disable-dev-shm-usage",
                "--disable-accelerated-2d-canvas",
                "--no-first-run",
                "--no-zygote",
                "--disable-gpu",
                "--disable-extensions",
                "--disable-plugins",
            ]),
            viewport: Viewport::default(),
        }
    }

    /// Constrained-host profile: shorter navigation timeout, DOM-parsed wait
    /// strategy, minimal arg list.
    pub fn constrained() -> Self {
        Self {
            name: "constrained",
            navigation_timeout: Duration::from_secs(15),
            render_timeout: Duration::from_secs(30),
            wait_strategy: WaitStrategy::DomContentLoaded,
            launch_args: args(&[
                "--no-sandbox",
                "--disable-setuid-sandbox",
                "--disable-dev-shm-usage",
            ]),
            viewport: Viewport::default(),
        }
    }
}

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
