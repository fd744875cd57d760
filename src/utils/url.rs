// src/utils/url.rs

//! URL helpers for category and pagination links.

use url::Url;

/// Extract the numeric catalog id from a category URL like
/// `https://www.lcsc.com/category/874.html`.
pub fn parse_category_id(url: &str) -> Option<u32> {
    let pattern = regex::Regex::new(r"/category/(\d+)\.html").ok()?;
    let caps = pattern.captures(url)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Build the URL for one listing page.
///
/// Page 1 is the bare category URL; later pages carry a `page=n` query
/// parameter, replacing any existing one.
pub fn build_page_url(base: &str, page: u32) -> String {
    if page <= 1 {
        return base.to_string();
    }

    let mut parsed = match Url::parse(base) {
        Ok(parsed) => parsed,
        Err(_) => return base.to_string(),
    };

    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    {
        let mut pairs = parsed.query_pairs_mut();
        pairs.clear();
        for (key, value) in &kept {
            pairs.append_pair(key, value);
        }
        pairs.append_pair("page", &page.to_string());
    }

    parsed.to_string()
}

/// Resolve a potentially relative href against a base URL.
pub fn resolve(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    Url::parse(base)
        .and_then(|parsed| parsed.join(href))
        .map(|resolved| resolved.to_string())
        .unwrap_or_else(|_| href.to_string())
}
