//! Page builder: turns a keyword into the text of every bundle file.
//!
//! Rendering is pure. The same keyword, date and options always produce
//! byte-identical output; writing it to disk is the materializer's job.

mod page;
mod seo;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::*;
use crate::error::Result;
use crate::slug::{slugify, title_case};

pub use page::{escape_html, render_page, PageVars};
pub use seo::{render_netlify_toml, render_robots, render_sitemap};

/// Shared stylesheet, identical for every site
pub const STYLESHEET: &str = include_str!("style.css");

/// File naming scheme of a bundle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLayout {
    /// `index.html` + `style.css`, canonical URL is the site root
    #[default]
    Index,
    /// `<slug>.html` + `calculator-style.css`, canonical URL is the page itself
    Slug,
}

impl PageLayout {
    pub fn entry_file(&self, slug: &str) -> String {
        match self {
            PageLayout::Index => INDEX_HTML.to_string(),
            PageLayout::Slug => format!("{}.html", slug),
        }
    }

    pub fn stylesheet_file(&self) -> &'static str {
        match self {
            PageLayout::Index => STYLE_CSS,
            PageLayout::Slug => CALCULATOR_STYLE_CSS,
        }
    }

    pub fn canonical_url(&self, domain: &str, slug: &str) -> String {
        match self {
            PageLayout::Index => format!("{}/", domain),
            PageLayout::Slug => format!("{}/{}.html", domain, slug),
        }
    }
}

impl fmt::Display for PageLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageLayout::Index => write!(f, "index"),
            PageLayout::Slug => write!(f, "slug"),
        }
    }
}

impl FromStr for PageLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "index" => Ok(PageLayout::Index),
            "slug" => Ok(PageLayout::Slug),
            other => Err(format!("unknown page layout '{}' (expected 'index' or 'slug')", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Canonical domain without trailing slash
    pub site_domain: String,
    pub layout: PageLayout,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            site_domain: DEFAULT_SITE_DOMAIN.to_string(),
            layout: PageLayout::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub name: String,
    pub contents: String,
}

/// Every generated file of one site, entry page first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSite {
    pub keyword: String,
    pub slug: String,
    pub title: String,
    pub files: Vec<RenderedFile>,
}

impl RenderedSite {
    pub fn file(&self, name: &str) -> Option<&RenderedFile> {
        self.files.iter().find(|f| f.name == name)
    }

    pub fn entry_page(&self) -> &RenderedFile {
        &self.files[0]
    }
}

pub fn render_site(keyword: &str, date: NaiveDate, options: &RenderOptions) -> Result<RenderedSite> {
    let slug = slugify(keyword);
    let title = title_case(keyword);
    let layout = options.layout;
    let entry_file = layout.entry_file(&slug);
    let canonical_url = layout.canonical_url(&options.site_domain, &slug);

    let html = render_page(&PageVars {
        keyword,
        title: &title,
        canonical_url: &canonical_url,
        stylesheet: layout.stylesheet_file(),
        year: date.year(),
    })?;

    let files = vec![
        RenderedFile { name: entry_file.clone(), contents: html },
        RenderedFile { name: layout.stylesheet_file().to_string(), contents: STYLESHEET.to_string() },
        RenderedFile { name: SITEMAP_XML.to_string(), contents: render_sitemap(&options.site_domain, date) },
        RenderedFile { name: ROBOTS_TXT.to_string(), contents: render_robots(&options.site_domain) },
        RenderedFile { name: NETLIFY_TOML.to_string(), contents: render_netlify_toml(&entry_file) },
    ];

    Ok(RenderedSite {
        keyword: keyword.to_string(),
        slug,
        title,
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn index_layout_file_set() {
        let site = render_site("bmi calculator", date(), &RenderOptions::default()).unwrap();
        let names: Vec<&str> = site.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["index.html", "style.css", "sitemap.xml", "robots.txt", "netlify.toml"]);
        assert_eq!(site.slug, "bmi-calculator");
        assert_eq!(site.title, "Bmi Calculator");
        assert!(site.entry_page().contents.contains("Bmi Calculator"));
        assert!(site.file("netlify.toml").unwrap().contents.contains("to = \"/index.html\""));
    }

    #[test]
    fn slug_layout_file_set() {
        let options = RenderOptions {
            site_domain: "https://calc.test".to_string(),
            layout: PageLayout::Slug,
        };
        let site = render_site("BMI Calculator", date(), &options).unwrap();
        assert_eq!(site.entry_page().name, "bmi-calculator.html");
        assert!(site.file("calculator-style.css").is_some());
        assert!(site.file("style.css").is_none());
        let html = &site.entry_page().contents;
        assert!(html.contains(r#"href="https://calc.test/bmi-calculator.html""#));
        assert!(html.contains(r#"href="calculator-style.css""#));
    }

    #[test]
    fn rendering_is_deterministic() {
        let options = RenderOptions::default();
        let a = render_site("mortgage <calc> & more", date(), &options).unwrap();
        let b = render_site("mortgage <calc> & more", date(), &options).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn stylesheet_is_keyword_independent() {
        let options = RenderOptions::default();
        let a = render_site("tip", date(), &options).unwrap();
        let b = render_site("loan", date(), &options).unwrap();
        assert_eq!(a.file("style.css"), b.file("style.css"));
        assert!(STYLESHEET.contains(".calculator-box"));
    }

    #[test]
    fn layout_parses_from_text() {
        assert_eq!("index".parse::<PageLayout>(), Ok(PageLayout::Index));
        assert_eq!(" SLUG ".parse::<PageLayout>(), Ok(PageLayout::Slug));
        assert!("other".parse::<PageLayout>().is_err());
        assert_eq!(PageLayout::Slug.to_string(), "slug");
    }
}
