//! calcsites Core Library
//!
//! Turns a list of keywords into calculator landing page bundles and
//! publishes them with the Netlify CLI. Shared by all calcsites binaries.

pub mod constants;
pub mod context;
pub mod deploy;
pub mod error;
pub mod keywords;
pub mod pipeline;
pub mod render;
pub mod search;
pub mod site;
pub mod slug;

// Re-export commonly used items
pub use context::Context;
pub use deploy::{DeployOutcome, Deployer};
pub use error::{CalcSitesError, Result};
pub use pipeline::{BatchSummary, Pipeline};
pub use site::{SiteBundle, SiteMaterializer};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for a binary; `RUST_LOG` overrides the default `info` level
pub fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
