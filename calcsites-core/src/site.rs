//! Site materializer: writes a rendered site into `<output>/<slug>/`

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants::STATIC_PAGES;
use crate::context::Context;
use crate::error::{CalcSitesError, Result};
use crate::render::{render_site, RenderOptions};

/// A materialized site directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteBundle {
    pub keyword: String,
    pub slug: String,
    pub dir: PathBuf,
    /// Names of the files written, in write order
    pub files: Vec<String>,
}

impl SiteBundle {
    /// Directory name, used as the display name when deploying
    pub fn name(&self) -> &str {
        &self.slug
    }
}

#[derive(Debug, Clone)]
pub struct SiteMaterializer {
    output_dir: PathBuf,
    templates_dir: PathBuf,
    options: RenderOptions,
}

impl SiteMaterializer {
    pub fn new(output_dir: impl Into<PathBuf>, templates_dir: impl Into<PathBuf>, options: RenderOptions) -> Self {
        SiteMaterializer {
            output_dir: output_dir.into(),
            templates_dir: templates_dir.into(),
            options,
        }
    }

    pub fn from_context(ctx: &Context) -> Self {
        Self::new(
            &ctx.output_dir,
            &ctx.templates_dir,
            RenderOptions {
                site_domain: ctx.site_domain.clone(),
                layout: ctx.layout,
            },
        )
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render `keyword` and write its bundle.
    ///
    /// Existing files are overwritten. A failure part way through leaves the
    /// files already written in place.
    pub async fn materialize(&self, keyword: &str, date: NaiveDate) -> Result<SiteBundle> {
        let site = render_site(keyword, date, &self.options)?;
        if site.slug.is_empty() {
            return Err(CalcSitesError::Site(format!(
                "keyword '{}' has no usable characters for a directory name",
                keyword
            )));
        }

        let dir = self.output_dir.join(&site.slug);
        tokio::fs::create_dir_all(&dir).await?;
        debug!("Writing bundle into {}", dir.display());

        let mut files = Vec::with_capacity(site.files.len() + STATIC_PAGES.len());
        for file in &site.files {
            tokio::fs::write(dir.join(&file.name), &file.contents).await?;
            files.push(file.name.clone());
        }

        for page in self.copy_static_pages(&dir).await? {
            files.push(page);
        }

        info!("✓ Site generated: {} ({} files)", dir.display(), files.len());
        Ok(SiteBundle {
            keyword: keyword.to_string(),
            slug: site.slug,
            dir,
            files,
        })
    }

    /// Copy the shared static pages that exist in the templates directory
    async fn copy_static_pages(&self, dir: &Path) -> Result<Vec<String>> {
        let mut copied = Vec::new();
        for page in STATIC_PAGES {
            let src = self.templates_dir.join(page);
            if !tokio::fs::try_exists(&src).await.unwrap_or(false) {
                continue;
            }
            tokio::fs::copy(&src, dir.join(page)).await?;
            copied.push(page.to_string());
        }
        Ok(copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PageLayout;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[tokio::test]
    async fn writes_every_rendered_file() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("output");
        let materializer = SiteMaterializer::new(&out, root.path().join("templates"), RenderOptions::default());

        let bundle = materializer.materialize("bmi calculator", date()).await.unwrap();
        assert_eq!(bundle.slug, "bmi-calculator");
        assert_eq!(bundle.dir, out.join("bmi-calculator"));
        for name in ["index.html", "style.css", "sitemap.xml", "robots.txt", "netlify.toml"] {
            assert!(bundle.dir.join(name).is_file(), "missing {}", name);
        }
        let html = std::fs::read_to_string(bundle.dir.join("index.html")).unwrap();
        assert!(html.contains("Bmi Calculator"));
    }

    #[tokio::test]
    async fn copies_only_existing_static_pages() {
        let root = tempfile::tempdir().unwrap();
        let templates = root.path().join("templates");
        std::fs::create_dir_all(&templates).unwrap();
        std::fs::write(templates.join("privacy.html"), "<p>privacy</p>").unwrap();
        std::fs::write(templates.join("about.html"), "<p>about</p>").unwrap();
        std::fs::write(templates.join("unrelated.html"), "<p>no</p>").unwrap();

        let materializer = SiteMaterializer::new(root.path().join("out"), &templates, RenderOptions::default());
        let bundle = materializer.materialize("tip calculator", date()).await.unwrap();

        assert_eq!(std::fs::read_to_string(bundle.dir.join("privacy.html")).unwrap(), "<p>privacy</p>");
        assert!(bundle.dir.join("about.html").is_file());
        assert!(!bundle.dir.join("terms.html").exists());
        assert!(!bundle.dir.join("unrelated.html").exists());
        assert_eq!(&bundle.files[5..], &["privacy.html".to_string(), "about.html".to_string()]);
    }

    #[tokio::test]
    async fn slug_layout_names_files_after_the_slug() {
        let root = tempfile::tempdir().unwrap();
        let options = RenderOptions { layout: PageLayout::Slug, ..RenderOptions::default() };
        let materializer = SiteMaterializer::new(root.path(), root.path().join("none"), options);

        let bundle = materializer.materialize("Loan Payoff", date()).await.unwrap();
        assert!(bundle.dir.join("loan-payoff.html").is_file());
        assert!(bundle.dir.join("calculator-style.css").is_file());
        assert!(!bundle.dir.join("index.html").exists());
    }

    #[tokio::test]
    async fn rerun_overwrites_in_place() {
        let root = tempfile::tempdir().unwrap();
        let materializer = SiteMaterializer::new(root.path(), root.path().join("none"), RenderOptions::default());
        let bundle = materializer.materialize("tip", date()).await.unwrap();
        std::fs::write(bundle.dir.join("index.html"), "stale").unwrap();

        let again = materializer.materialize("tip", date()).await.unwrap();
        assert_eq!(again.dir, bundle.dir);
        assert_ne!(std::fs::read_to_string(again.dir.join("index.html")).unwrap(), "stale");
    }

    #[tokio::test]
    async fn keyword_without_slug_characters_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("out");
        let materializer = SiteMaterializer::new(&out, root.path().join("none"), RenderOptions::default());

        let err = materializer.materialize("!!!", date()).await.unwrap_err();
        assert!(matches!(err, CalcSitesError::Site(_)));
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn unwritable_output_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();
        let materializer = SiteMaterializer::new(&blocker, root.path().join("none"), RenderOptions::default());

        let err = materializer.materialize("tip", date()).await.unwrap_err();
        assert!(matches!(err, CalcSitesError::Io(_)));
    }
}
