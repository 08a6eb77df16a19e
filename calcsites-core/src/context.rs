use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::*;
use crate::render::PageLayout;

/// Credential that never shows up in `Debug` output or serialized context dumps
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Secret(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "\"\"")
        } else {
            write!(f, "\"***\"")
        }
    }
}

/// Run configuration packed in a structure.
///
/// Built from defaults, then an optional YAML file (`CALCSITES_CONFIG_YAML`),
/// then environment variables; binaries apply their command line flags last.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    // From CALCSITES_KEYWORDS_FILE, default "kw.txt"
    pub keywords_file: PathBuf,

    // From CALCSITES_MAX_KEYWORDS, number of keywords taken per batch, default 10
    pub max_keywords: usize,

    // From CALCSITES_OUTPUT_DIR, root of all generated bundles, default "output"
    pub output_dir: PathBuf,

    // From CALCSITES_TEMPLATES_DIR, static pages copied into every bundle, default "templates"
    pub templates_dir: PathBuf,

    // From CALCSITES_SITE_DOMAIN, canonical domain used by sitemap/robots/canonical links
    pub site_domain: String,

    // From CALCSITES_LAYOUT, "index" (index.html + style.css) or "slug" (<slug>.html + calculator-style.css)
    pub layout: PageLayout,

    // From CALCSITES_SEARCH_DELAY, seconds slept per synthesized search, default 2
    pub search_delay_secs: u64,

    // From CALCSITES_DEPLOY_DELAY, seconds slept after every deploy attempt, default 2
    pub deploy_delay_secs: u64,

    // From CALCSITES_DEPLOY_CMD, deployment CLI binary, default "netlify"
    pub deploy_command: String,

    // From CALCSITES_TOKEN_ENV, name of the variable carrying the token, default "NETLIFY_AUTH_TOKEN"
    pub auth_token_env: String,

    // From the variable named by auth_token_env
    #[serde(skip_serializing)]
    pub auth_token: Secret,

    // From CALCSITES_NO_MESSAGE (inverted), pass --message to the deploy command, default true
    pub deploy_message: bool,

    // From CALCSITES_NO_INSTALL (inverted), install the CLI when missing, default true
    pub auto_install: bool,

    // From CALCSITES_INSTALL_CMD, default "npm install -g netlify-cli"
    pub install_command: String,

    // From CALCSITES_DRY_RUN, log deploy commands instead of running them
    pub dry_run: bool,

    // From CALCSITES_DEBUG Debug level: 0-no, 1-info, 2-verbose, default 0
    pub debug: i32,

    // From CALCSITES_CTXOUT output all context data (this struct), default false
    pub ctx_out: bool,
}

impl Default for Context {
    fn default() -> Self {
        Context {
            keywords_file: PathBuf::from(DEFAULT_KEYWORDS_FILE),
            max_keywords: DEFAULT_MAX_KEYWORDS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            site_domain: DEFAULT_SITE_DOMAIN.to_string(),
            layout: PageLayout::Index,
            search_delay_secs: DEFAULT_SEARCH_DELAY,
            deploy_delay_secs: DEFAULT_DEPLOY_DELAY,
            deploy_command: DEFAULT_DEPLOY_COMMAND.to_string(),
            auth_token_env: DEFAULT_TOKEN_ENV.to_string(),
            auth_token: Secret::default(),
            deploy_message: true,
            auto_install: true,
            install_command: DEFAULT_INSTALL_COMMAND.to_string(),
            dry_run: false,
            debug: 0,
            ctx_out: false,
        }
    }
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the full context: defaults, optional YAML file, then environment variables
    pub fn load() -> anyhow::Result<Self> {
        let mut ctx = match std::env::var(ENV_CONFIG_YAML) {
            Ok(path) if !path.is_empty() => Self::from_yaml_file(&path)?,
            _ => Self::default(),
        };
        ctx.apply_env(|key| std::env::var(key).ok())?;
        Ok(ctx)
    }

    /// Load context from environment variables only
    pub fn from_env() -> anyhow::Result<Self> {
        let mut ctx = Self::default();
        ctx.apply_env(|key| std::env::var(key).ok())?;
        Ok(ctx)
    }

    /// Load context from a YAML file; missing keys keep their defaults
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file '{}'", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("parsing config file '{}'", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let mut ctx: Self = serde_yaml::from_str(content)?;
        ctx.site_domain = ctx.site_domain.trim_end_matches('/').to_string();
        Ok(ctx)
    }

    /// Override fields from variables returned by `lookup`.
    ///
    /// Boolean switches follow the "set means on" convention; the `NO_*`
    /// variables switch their feature off.
    pub fn apply_env<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(file) = lookup(ENV_KEYWORDS_FILE) {
            self.keywords_file = PathBuf::from(file);
        }

        if let Some(max) = lookup(ENV_MAX_KEYWORDS) {
            self.max_keywords = max
                .trim()
                .parse::<usize>()
                .with_context(|| format!("invalid {}: '{}'", ENV_MAX_KEYWORDS, max))?;
        }

        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(dir);
        }

        if let Some(dir) = lookup(ENV_TEMPLATES_DIR) {
            self.templates_dir = PathBuf::from(dir);
        }

        if let Some(domain) = lookup(ENV_SITE_DOMAIN) {
            self.site_domain = domain.trim_end_matches('/').to_string();
        }

        if let Some(layout) = lookup(ENV_LAYOUT) {
            self.layout = layout
                .parse::<PageLayout>()
                .map_err(|err: String| anyhow::anyhow!(err))
                .with_context(|| format!("invalid {}", ENV_LAYOUT))?;
        }

        if let Some(delay) = lookup(ENV_SEARCH_DELAY) {
            self.search_delay_secs = delay
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid {}: '{}'", ENV_SEARCH_DELAY, delay))?;
        }

        if let Some(delay) = lookup(ENV_DEPLOY_DELAY) {
            self.deploy_delay_secs = delay
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid {}: '{}'", ENV_DEPLOY_DELAY, delay))?;
        }

        if let Some(cmd) = lookup(ENV_DEPLOY_CMD) {
            self.deploy_command = cmd;
        }

        if let Some(name) = lookup(ENV_TOKEN_ENV) {
            self.auth_token_env = name;
        }

        if let Some(token) = lookup(&self.auth_token_env) {
            self.auth_token = Secret::new(token);
        }

        if let Some(cmd) = lookup(ENV_INSTALL_CMD) {
            self.install_command = cmd;
        }

        if let Some(debug) = lookup(ENV_DEBUG) {
            self.debug = debug.trim().parse().unwrap_or(0);
        }

        // Boolean flags from environment
        if lookup(ENV_NO_MESSAGE).is_some() {
            self.deploy_message = false; // Inverted logic
        }
        if lookup(ENV_NO_INSTALL).is_some() {
            self.auto_install = false; // Inverted logic
        }
        if lookup(ENV_DRY_RUN).is_some() {
            self.dry_run = true;
        }
        if lookup(ENV_CTXOUT).is_some() {
            self.ctx_out = true;
        }

        Ok(())
    }

    pub fn search_delay(&self) -> Duration {
        Duration::from_secs(self.search_delay_secs)
    }

    pub fn deploy_delay(&self) -> Duration {
        Duration::from_secs(self.deploy_delay_secs)
    }
}
