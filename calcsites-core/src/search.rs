//! Locally synthesized "search" data for a keyword.
//!
//! Nothing here talks to a search engine: the records are derived from the
//! keyword text alone. The pacing delay only keeps the batch rhythm of a
//! real lookup.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::constants::CALCULATOR;
use crate::slug::title_case;

/// One fabricated top-ranking page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSummary {
    pub title: String,
    pub url: String,
    pub description: String,
}

/// Synthesized search results for a keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub keyword: String,
    pub top_sites: Vec<SiteSummary>,
}

/// Kind of page generated for a keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Calculator,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Calculator => CALCULATOR,
        }
    }
}

/// What the generated page is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub keyword: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub purpose: String,
    pub features: Vec<String>,
}

/// Build the three placeholder results for `keyword`
pub fn synthesize_results(keyword: &str) -> SearchResults {
    let title = title_case(keyword);
    let path = keyword.replace(' ', "-");

    let top_sites = vec![
        SiteSummary {
            title: format!("{} - Calculator Tool", title),
            url: format!("https://example1.com/{}", path),
            description: format!("Free online {} tool", keyword),
        },
        SiteSummary {
            title: format!("Best {} Online", title),
            url: format!("https://example2.com/{}", path),
            description: format!("Calculate your {} quickly", keyword),
        },
        SiteSummary {
            title: format!("{} Guide", title),
            url: format!("https://example3.com/{}", path),
            description: format!("Complete guide for {}", keyword),
        },
    ];

    SearchResults {
        keyword: keyword.to_string(),
        top_sites,
    }
}

/// Derive the page analysis; every keyword becomes a calculator
pub fn analyze(results: &SearchResults) -> ContentAnalysis {
    ContentAnalysis {
        keyword: results.keyword.clone(),
        content_type: ContentType::Calculator,
        purpose: format!("Calculate {}", results.keyword),
        features: [
            "Easy to use interface",
            "Instant results",
            "Mobile friendly",
            "Free to use",
        ]
        .iter()
        .map(|f| f.to_string())
        .collect(),
    }
}

/// Paced producer of synthesized search results
#[derive(Debug, Clone)]
pub struct ContentSynthesizer {
    delay: Duration,
}

impl ContentSynthesizer {
    pub fn new(delay: Duration) -> Self {
        ContentSynthesizer { delay }
    }

    pub async fn search(&self, keyword: &str) -> SearchResults {
        info!("Searching keyword: {}", keyword);
        let results = synthesize_results(keyword);
        debug!("Synthesized {} result(s) for '{}'", results.top_sites.len(), keyword);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        results
    }
}
