//! Crawler and hosting files shipped with every bundle

use chrono::NaiveDate;
use std::fmt::Write as _;

use super::page::escape_html;
use crate::constants::SITEMAP_XML;

/// Pages listed in the sitemap, with their priority
const SITEMAP_PAGES: [(&str, &str); 5] = [
    ("", "1.0"),
    ("about.html", "0.8"),
    ("privacy.html", "0.5"),
    ("terms.html", "0.5"),
    ("contact.html", "0.7"),
];

pub fn render_sitemap(domain: &str, date: NaiveDate) -> String {
    let lastmod = date.format("%Y-%m-%d").to_string();
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for (page, priority) in SITEMAP_PAGES {
        let loc = escape_html(&format!("{}/{}", domain, page));
        // Writing into a String cannot fail
        let _ = write!(
            xml,
            "    <url>\n        <loc>{}</loc>\n        <lastmod>{}</lastmod>\n        <priority>{}</priority>\n    </url>\n",
            loc, lastmod, priority
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

pub fn render_robots(domain: &str) -> String {
    format!("User-agent: *\nAllow: /\nSitemap: {}/{}\n", domain, SITEMAP_XML)
}

/// Netlify config: publish the bundle root, serve the entry page for every path
pub fn render_netlify_toml(entry_file: &str) -> String {
    format!(
        "[build]\n  publish = \".\"\n\n[[redirects]]\n  from = \"/*\"\n  to = \"/{}\"\n  status = 200\n",
        entry_file
    )
}
