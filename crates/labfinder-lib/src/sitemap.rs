//! sitemaps.org XML for the marketing site's public routes.

use std::fmt::{self, Write as _};

use chrono::NaiveDate;
use serde::Serialize;

/// How often a page is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
        })
    }
}

/// One route in the sitemap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SitemapEntry {
    pub path: &'static str,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

const fn entry(path: &'static str, change_frequency: ChangeFrequency, priority: f32) -> SitemapEntry {
    SitemapEntry {
        path,
        change_frequency,
        priority,
    }
}

/// Public routes in the order they are listed.
pub const SITE_ROUTES: &[SitemapEntry] = &[
    entry("/", ChangeFrequency::Weekly, 1.0),
    entry("/services", ChangeFrequency::Monthly, 0.9),
    entry("/lab-directory", ChangeFrequency::Daily, 0.9),
    entry("/case-studies", ChangeFrequency::Monthly, 0.7),
    entry("/sustainability", ChangeFrequency::Monthly, 0.6),
    entry("/faq", ChangeFrequency::Monthly, 0.6),
    entry("/contact", ChangeFrequency::Yearly, 0.8),
    entry("/sample-report", ChangeFrequency::Yearly, 0.8),
];

/// Render a `urlset` document for `entries` under `base_url`.
pub fn render_sitemap(base_url: &str, entries: &[SitemapEntry], lastmod: NaiveDate) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let lastmod = lastmod.format("%Y-%m-%d").to_string();

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for entry in entries {
        let location = if entry.path == "/" {
            format!("{base}/")
        } else {
            format!("{base}{}", entry.path)
        };

        // Writing into a String cannot fail.
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{lastmod}</lastmod>\n    \
             <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape_xml(&location),
            entry.change_frequency,
            entry.priority
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
