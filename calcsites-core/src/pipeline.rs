//! Batch orchestration over keywords or existing bundle directories.
//!
//! Items are processed strictly one after another. A failing item is logged
//! and counted; it never stops the batch.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::context::Context;
use crate::deploy::Deployer;
use crate::error::Result;
use crate::keywords::load_keywords;
use crate::search::{analyze, ContentSynthesizer};
use crate::site::{SiteBundle, SiteMaterializer};

/// Counters and URLs gathered over one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub attempted: usize,
    pub generated: usize,
    pub deployed: usize,
    pub urls: Vec<String>,
    pub failed: Vec<String>,
    /// Slugs written more than once in this batch
    pub collisions: Vec<String>,
}

impl BatchSummary {
    pub fn log(&self, output_dir: &Path) {
        info!("==============================================");
        info!("Batch completed");
        info!("  Attempted: {}", self.attempted);
        info!("  Generated: {}", self.generated);
        info!("  Deployed:  {}", self.deployed);
        info!("  Output directory: {}", output_dir.display());
        for url in &self.urls {
            info!("  🌐 {}", url);
        }
        if !self.collisions.is_empty() {
            warn!("  Overwritten bundles: {:?}", self.collisions);
        }
        if !self.failed.is_empty() {
            error!("  Failed: {} item(s): {:?}", self.failed.len(), self.failed);
        }
        info!("==============================================");
    }
}

pub struct Pipeline {
    keywords_file: PathBuf,
    max_keywords: usize,
    synthesizer: ContentSynthesizer,
    materializer: SiteMaterializer,
    deployer: Deployer,
    date: NaiveDate,
}

impl Pipeline {
    pub fn new(
        keywords_file: impl Into<PathBuf>,
        max_keywords: usize,
        synthesizer: ContentSynthesizer,
        materializer: SiteMaterializer,
        deployer: Deployer,
    ) -> Self {
        Pipeline {
            keywords_file: keywords_file.into(),
            max_keywords,
            synthesizer,
            materializer,
            deployer,
            date: chrono::Local::now().date_naive(),
        }
    }

    pub fn from_context(ctx: &Context) -> Self {
        Self::new(
            &ctx.keywords_file,
            ctx.max_keywords,
            ContentSynthesizer::new(ctx.search_delay()),
            SiteMaterializer::from_context(ctx),
            Deployer::from_context(ctx),
        )
    }

    /// Fix the date stamped into sitemaps and footers
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn deployer(&self) -> &Deployer {
        &self.deployer
    }

    pub fn output_dir(&self) -> &Path {
        self.materializer.output_dir()
    }

    /// Generate a bundle for every keyword without deploying
    pub async fn generate_all(&self) -> BatchSummary {
        let mut summary = BatchSummary::default();
        let keywords = load_keywords(&self.keywords_file, self.max_keywords).await;
        if keywords.is_empty() {
            warn!("No keywords found in {}", self.keywords_file.display());
            return summary;
        }

        let mut seen = HashMap::new();
        let total = keywords.len();
        for (i, keyword) in keywords.iter().enumerate() {
            info!("[{}/{}] Processing keyword: {}", i + 1, total, keyword);
            summary.attempted += 1;
            self.generate_one(keyword, &mut seen, &mut summary).await;
        }
        summary
    }

    /// Generate and immediately deploy a bundle for every keyword
    pub async fn run(&self) -> BatchSummary {
        let mut summary = BatchSummary::default();
        let keywords = load_keywords(&self.keywords_file, self.max_keywords).await;
        if keywords.is_empty() {
            warn!("No keywords found in {}", self.keywords_file.display());
            return summary;
        }

        let mut seen = HashMap::new();
        let total = keywords.len();
        for (i, keyword) in keywords.iter().enumerate() {
            info!("[{}/{}] Processing keyword: {}", i + 1, total, keyword);
            summary.attempted += 1;
            if let Some(bundle) = self.generate_one(keyword, &mut seen, &mut summary).await {
                self.deploy_one(&bundle.dir, bundle.name(), &mut summary).await;
            }
        }
        summary
    }

    /// Deploy every bundle directory already present under the output root
    pub async fn deploy_existing(&self) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();
        let sites = list_site_dirs(self.output_dir()).await?;
        if sites.is_empty() {
            warn!("No sites to deploy under {}", self.output_dir().display());
            return Ok(summary);
        }

        info!("Found {} site(s) to deploy", sites.len());
        let total = sites.len();
        for (i, (name, dir)) in sites.iter().enumerate() {
            info!("[{}/{}] Deploying: {}", i + 1, total, name);
            summary.attempted += 1;
            self.deploy_one(dir, name, &mut summary).await;
        }
        Ok(summary)
    }

    async fn generate_one(
        &self,
        keyword: &str,
        seen: &mut HashMap<String, String>,
        summary: &mut BatchSummary,
    ) -> Option<SiteBundle> {
        let results = self.synthesizer.search(keyword).await;
        let analysis = analyze(&results);
        debug!("Analysis for '{}': {} ({})", keyword, analysis.purpose, analysis.content_type.as_str());

        match self.materializer.materialize(keyword, self.date).await {
            Ok(bundle) => {
                if let Some(previous) = seen.insert(bundle.slug.clone(), keyword.to_string()) {
                    warn!(
                        "Keyword '{}' overwrote the bundle of '{}' (slug '{}')",
                        keyword, previous, bundle.slug
                    );
                    summary.collisions.push(bundle.slug.clone());
                }
                summary.generated += 1;
                Some(bundle)
            }
            Err(err) => {
                error!("✗ Failed to generate site for '{}': {}", keyword, err);
                summary.failed.push(keyword.to_string());
                None
            }
        }
    }

    async fn deploy_one(&self, dir: &Path, name: &str, summary: &mut BatchSummary) {
        match self.deployer.deploy(dir, name).await {
            Ok(outcome) if outcome.success => {
                summary.deployed += 1;
                if let Some(url) = outcome.url {
                    summary.urls.push(url);
                }
            }
            Ok(_) => summary.failed.push(name.to_string()),
            Err(err) => {
                error!("✗ Deploy error for '{}': {}", name, err);
                summary.failed.push(name.to_string());
            }
        }
    }
}

/// Subdirectories of `root`, sorted by name. A missing root has none.
pub async fn list_site_dirs(root: &Path) -> Result<Vec<(String, PathBuf)>> {
    if !tokio::fs::try_exists(root).await? {
        warn!("Site directory does not exist: {}", root.display());
        return Ok(Vec::new());
    }

    let mut sites = Vec::new();
    let mut entries = tokio::fs::read_dir(root).await?;
    while let Some(entry) = entries.next_entry().await? {
        // Follows symlinks; dangling links are skipped
        let is_dir = matches!(tokio::fs::metadata(entry.path()).await, Ok(meta) if meta.is_dir());
        if is_dir {
            let name = entry.file_name().to_string_lossy().into_owned();
            sites.push((name, entry.path()));
        }
    }
    sites.sort();
    Ok(sites)
}
