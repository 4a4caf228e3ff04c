//! Sitemap generation.
//!
//! Builds the XML served at the sitemap endpoints:
//!
//! - `sitemap.xml` - static pages plus every available vehicle
//! - `sitemap-index.xml` - index pointing at the two split sitemaps
//! - `sitemap-static.xml` - the main landing pages
//! - `sitemap-inventory.xml` - available vehicles, most recently updated first

use chrono::NaiveDate;

use crate::shared::SitemapVehicle;

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Pages listed in the combined sitemap, in order
const COMBINED_PAGES: [&str; 7] = [
    "",
    "/inventory",
    "/pre-approval",
    "/sell-your-car",
    "/about",
    "/contact",
    "/privacy-policy",
];

/// `(path, changefreq, priority)` for the static sitemap
const STATIC_PAGES: [(&str, ChangeFreq, &str); 5] = [
    ("/", ChangeFreq::Daily, "1.0"),
    ("/inventory", ChangeFreq::Daily, "0.9"),
    ("/pre-approval", ChangeFreq::Monthly, "0.8"),
    ("/about", ChangeFreq::Monthly, "0.7"),
    ("/contact", ChangeFreq::Monthly, "0.7"),
];

// ============================================================================
// Sitemap Implementation
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFreq {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// Single URL entry in a `<urlset>`
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    /// Full URL location
    pub loc: String,
    /// Last modification date
    pub lastmod: Option<NaiveDate>,
    pub changefreq: ChangeFreq,
    pub priority: &'static str,
}

/// A `<urlset>` document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sitemap {
    pub urls: Vec<UrlEntry>,
}

impl Sitemap {
    /// Static pages followed by one entry per available vehicle
    pub fn combined(site_url: &str, vehicles: &[SitemapVehicle]) -> Self {
        let pages = COMBINED_PAGES.iter().map(|page| UrlEntry {
            loc: format!("{site_url}{page}"),
            lastmod: None,
            changefreq: if *page == "/inventory" { ChangeFreq::Daily } else { ChangeFreq::Monthly },
            priority: if page.is_empty() { "1.0" } else { "0.8" },
        });
        let vehicles = vehicles.iter().map(|vehicle| UrlEntry {
            loc: vehicle_url(site_url, vehicle),
            lastmod: Some(vehicle.updated_at.date_naive()),
            changefreq: ChangeFreq::Daily,
            priority: "0.9",
        });
        Self { urls: pages.chain(vehicles).collect() }
    }

    pub fn static_pages(site_url: &str, today: NaiveDate) -> Self {
        let urls = STATIC_PAGES
            .iter()
            .map(|(path, changefreq, priority)| UrlEntry {
                loc: format!("{site_url}{path}"),
                lastmod: Some(today),
                changefreq: *changefreq,
                priority: *priority,
            })
            .collect();
        Self { urls }
    }

    /// Vehicles in the order given; callers pass them most recently updated first
    pub fn inventory(site_url: &str, vehicles: &[SitemapVehicle]) -> Self {
        let urls = vehicles
            .iter()
            .map(|vehicle| UrlEntry {
                loc: vehicle_url(site_url, vehicle),
                lastmod: Some(vehicle.updated_at.date_naive()),
                changefreq: ChangeFreq::Weekly,
                priority: "0.8",
            })
            .collect();
        Self { urls }
    }

    /// Generate sitemap XML string.
    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(256 + self.urls.len() * 160);

        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = entry.lastmod {
                xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod.format("%Y-%m-%d")));
            }
            xml.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.changefreq.as_str()));
            xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// `<sitemapindex>` pointing at the split sitemaps
pub fn index_xml(site_url: &str, today: NaiveDate) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!(r#"<sitemapindex xmlns="{SITEMAP_NS}">"#));
    xml.push('\n');
    for name in ["sitemap-static.xml", "sitemap-inventory.xml"] {
        xml.push_str("  <sitemap>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&format!("{site_url}/{name}"))));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", today.format("%Y-%m-%d")));
        xml.push_str("  </sitemap>\n");
    }
    xml.push_str("</sitemapindex>\n");
    xml
}

// ============================================================================
// Helper Functions
// ============================================================================

fn vehicle_url(site_url: &str, vehicle: &SitemapVehicle) -> String {
    format!("{site_url}/vehicle/{}", vehicle.id)
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// Tests
// ============================================================================
