use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::registry::LocationRegistry;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Files listed by the sitemap index, in order
pub const SITEMAP_FILES: [&str; 2] = ["sitemap-core.xml", "sitemap-cities.xml"];

const BASELINE_PRIORITY: f64 = 0.7;
const MAX_PRIORITY: f64 = 0.95;
const DEFAULT_CITY_PRIORITY: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    /// Site-relative path
    pub path: String,
    pub priority: f64,
    pub changefreq: ChangeFreq,
}

impl SitemapEntry {
    pub fn new(path: impl Into<String>, priority: f64, changefreq: ChangeFreq) -> Self {
        Self {
            path: path.into(),
            priority,
            changefreq,
        }
    }
}

const CORE_PAGES: [(&str, f64, ChangeFreq); 11] = [
    ("/", 1.0, ChangeFreq::Weekly),
    ("/premarital-counseling", 0.9, ChangeFreq::Daily),
    ("/blog", 0.8, ChangeFreq::Daily),
    ("/pricing", 0.7, ChangeFreq::Monthly),
    ("/features", 0.7, ChangeFreq::Monthly),
    ("/about", 0.6, ChangeFreq::Monthly),
    ("/contact", 0.6, ChangeFreq::Monthly),
    ("/support", 0.6, ChangeFreq::Monthly),
    ("/guidelines", 0.5, ChangeFreq::Monthly),
    ("/professional/signup", 0.8, ChangeFreq::Monthly),
    ("/professional/login", 0.6, ChangeFreq::Monthly),
];

pub fn core_pages() -> Vec<SitemapEntry> {
    CORE_PAGES
        .iter()
        .map(|(path, priority, freq)| SitemapEntry::new(*path, *priority, *freq))
        .collect()
}

/// Priority scaled from 0.7 (no profiles) to 0.95 (the busiest anchor city)
#[inline]
pub fn city_priority(count: usize, max_count: usize) -> f64 {
    if max_count == 0 {
        return DEFAULT_CITY_PRIORITY;
    }
    let scaled = BASELINE_PRIORITY + (MAX_PRIORITY - BASELINE_PRIORITY) * (count as f64 / max_count as f64);
    scaled.min(MAX_PRIORITY)
}

/// Anchor state pages followed by anchor city pages
///
/// `counts` maps `(state_slug, city_slug)` to listed profiles. With counts the
/// cities are ordered busiest first; without them every city gets the default
/// priority in registry order.
pub fn anchor_city_entries(
    registry: &LocationRegistry,
    counts: Option<&HashMap<(String, String), usize>>,
) -> Vec<SitemapEntry> {
    let mut cities: Vec<(&str, &str, usize)> = registry
        .anchor_cities()
        .map(|c| {
            let count = counts
                .and_then(|m| m.get(&(c.state_slug.clone(), c.slug.clone())))
                .copied()
                .unwrap_or(0);
            (c.state_slug.as_str(), c.slug.as_str(), count)
        })
        .collect();

    if counts.is_some() {
        cities.sort_by(|a, b| b.2.cmp(&a.2));
    }
    let max_count = cities.iter().map(|c| c.2).max().unwrap_or(0).max(1);

    let mut entries = Vec::new();
    let mut seen_states: Vec<&str> = Vec::new();
    for (state, _, _) in &cities {
        if !seen_states.contains(state) {
            seen_states.push(state);
            entries.push(SitemapEntry::new(
                format!("/premarital-counseling/{}", state),
                DEFAULT_CITY_PRIORITY,
                ChangeFreq::Weekly,
            ));
        }
    }

    for (state, city, count) in cities {
        let priority = match counts {
            Some(_) => city_priority(count, max_count),
            None => DEFAULT_CITY_PRIORITY,
        };
        entries.push(SitemapEntry::new(
            format!("/premarital-counseling/{}/{}", state, city),
            priority,
            ChangeFreq::Daily,
        ));
    }

    entries
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Render a `<urlset>` document
pub fn render_urlset(site_url: &str, entries: &[SitemapEntry], lastmod: NaiveDate) -> String {
    let base = site_url.trim_end_matches('/');
    let lastmod = lastmod.format("%Y-%m-%d");

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_NS));
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}{}</loc>\n", escape_xml(base), escape_xml(&entry.path)));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.changefreq.as_str()));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>");
    xml
}

/// Render a `<sitemapindex>` pointing at the given sitemap files
pub fn render_index(site_url: &str, files: &[&str], lastmod: NaiveDate) -> String {
    let base = escape_xml(site_url.trim_end_matches('/'));
    let lastmod = lastmod.format("%Y-%m-%d");

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<sitemapindex xmlns=\"{}\">\n", SITEMAP_NS));
    for file in files {
        xml.push_str("  <sitemap>\n");
        xml.push_str(&format!("    <loc>{}/{}</loc>\n", base, escape_xml(file)));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
        xml.push_str("  </sitemap>\n");
    }
    xml.push_str("</sitemapindex>");
    xml
}
