//! Publishing bundles with the Netlify CLI.
//!
//! The CLI runs as a child process whose working directory is the bundle;
//! the parent's working directory is never touched. Success is the exit
//! status, the live URL is scraped from stdout.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::constants::{DEPLOY_MESSAGE_PREFIX, URL_MARKER};
use crate::context::{Context, Secret};
use crate::error::{CalcSitesError, Result};

/// Result of one deployment attempt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployOutcome {
    pub success: bool,
    pub url: Option<String>,
}

impl DeployOutcome {
    pub fn failed() -> Self {
        DeployOutcome::default()
    }

    /// Interpret the tool's exit status and stdout
    pub fn from_output(exit_ok: bool, stdout: &str) -> Self {
        if !exit_ok {
            return DeployOutcome::failed();
        }
        DeployOutcome {
            success: true,
            url: extract_live_url(stdout),
        }
    }
}

/// Text after `URL:` on the first stdout line that has it, trimmed.
///
/// Returns `None` when no line carries the marker or nothing follows it.
pub fn extract_live_url(stdout: &str) -> Option<String> {
    let line = stdout.lines().find(|line| line.contains(URL_MARKER))?;
    let (_, rest) = line.split_once(URL_MARKER)?;
    let url = rest.trim();
    if url.is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct Deployer {
    command: String,
    token_env: String,
    token: Secret,
    message: bool,
    delay: Duration,
    dry_run: bool,
    auto_install: bool,
    install_command: String,
}

impl Deployer {
    pub fn new(command: impl Into<String>, token_env: impl Into<String>, token: Secret) -> Self {
        Deployer {
            command: command.into(),
            token_env: token_env.into(),
            token,
            message: true,
            delay: Duration::ZERO,
            dry_run: false,
            auto_install: false,
            install_command: String::new(),
        }
    }

    pub fn from_context(ctx: &Context) -> Self {
        Deployer {
            command: ctx.deploy_command.clone(),
            token_env: ctx.auth_token_env.clone(),
            token: ctx.auth_token.clone(),
            message: ctx.deploy_message,
            delay: ctx.deploy_delay(),
            dry_run: ctx.dry_run,
            auto_install: ctx.auto_install,
            install_command: ctx.install_command.clone(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_message(mut self, message: bool) -> Self {
        self.message = message;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_install(mut self, install_command: impl Into<String>) -> Self {
        self.auto_install = true;
        self.install_command = install_command.into();
        self
    }

    /// Arguments passed to the deployment tool for one site
    pub fn deploy_args(&self, display_name: &str) -> Vec<String> {
        let mut args: Vec<String> = ["deploy", "--prod", "--dir", "."]
            .iter()
            .map(|a| a.to_string())
            .collect();
        if self.message {
            args.push("--message".to_string());
            args.push(format!("{}{}", DEPLOY_MESSAGE_PREFIX, display_name));
        }
        args
    }

    /// Check the CLI is available, installing it when allowed. Returns its version line.
    pub async fn ensure_cli(&self) -> Result<String> {
        if self.token.is_empty() {
            warn!("{} is not set, '{}' will rely on its own login", self.token_env, self.command);
        }
        match self.version().await {
            Ok(version) => {
                info!("✓ {} CLI available: {}", self.command, version);
                Ok(version)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                if !self.auto_install || self.install_command.trim().is_empty() {
                    return Err(CalcSitesError::Deploy(format!(
                        "'{}' is not installed",
                        self.command
                    )));
                }
                warn!("✗ {} CLI not found, installing with: {}", self.command, self.install_command);
                self.install().await?;
                let version = self.version().await.map_err(|err| {
                    CalcSitesError::Deploy(format!("'{}' still unavailable after install: {}", self.command, err))
                })?;
                info!("✓ {} CLI installed: {}", self.command, version);
                Ok(version)
            }
            Err(err) => Err(CalcSitesError::Deploy(format!(
                "failed to run '{} --version': {}",
                self.command, err
            ))),
        }
    }

    async fn version(&self) -> std::io::Result<String> {
        let output = Command::new(&self.command)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .await?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn install(&self) -> Result<()> {
        let mut parts = self.install_command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| CalcSitesError::Deploy("empty install command".to_string()))?;
        let status = Command::new(program)
            .args(parts)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|err| CalcSitesError::Deploy(format!("failed to run '{}': {}", self.install_command, err)))?;
        if !status.success() {
            return Err(CalcSitesError::Deploy(format!(
                "'{}' exited with {}",
                self.install_command, status
            )));
        }
        Ok(())
    }

    /// Deploy the bundle in `site_dir`.
    ///
    /// Spawn failures are errors; a non-zero exit is a failed outcome. The
    /// pacing delay follows every attempt, successful or not.
    pub async fn deploy(&self, site_dir: &Path, display_name: &str) -> Result<DeployOutcome> {
        info!("Deploying site: {} ({})", display_name, site_dir.display());
        let result = self.run(site_dir, display_name).await;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        result
    }

    async fn run(&self, site_dir: &Path, display_name: &str) -> Result<DeployOutcome> {
        let args = self.deploy_args(display_name);

        if self.dry_run {
            info!("Would execute: {} {} (in {})", self.command, args.join(" "), site_dir.display());
            return Ok(DeployOutcome { success: true, url: None });
        }

        let mut cmd = Command::new(&self.command);
        cmd.args(&args)
            .current_dir(site_dir)
            .stdin(Stdio::null());
        if !self.token.is_empty() {
            cmd.env(&self.token_env, self.token.expose());
        }

        let output = cmd.output().await.map_err(|err| {
            CalcSitesError::Deploy(format!("failed to execute '{}': {}", self.command, err))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!("{} output for {}:\n{}", self.command, display_name, stdout);

        let outcome = DeployOutcome::from_output(output.status.success(), &stdout);
        if outcome.success {
            match &outcome.url {
                Some(url) => info!("✓ Deployed {}: {}", display_name, url),
                None => info!("✓ Deployed {}", display_name),
            }
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("✗ Deploy failed for {} ({}): {}", display_name, output.status, stderr.trim());
        }
        Ok(outcome)
    }
}
