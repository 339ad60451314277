//! HTML cleaning and link extraction.
//!
//! Regex based. Nothing here panics on malformed markup, and links that
//! cannot be resolved are dropped.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"));

static BLOCK_ELEMENTS: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["head", "style", "script", "noscript", "svg"]
        .iter()
        .map(|name| {
            Regex::new(&format!(r"(?is)<{name}\b[^>]*?>.*?</{name}\s*>")).expect("valid regex")
        })
        .collect()
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));

static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]*);").expect("valid regex"));

static ANCHOR_HREF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*?\bhref\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
});

/// Remove comments, non-content blocks and tags, then decode entities
///
/// Block elements (`head`, `style`, `script`, `noscript`, `svg`) are
/// removed together with their content. Tags are replaced by a space so
/// that words on either side of a tag do not run together.
pub fn strip_html(html: &str) -> String {
    let mut text = COMMENT.replace_all(html, " ").into_owned();

    for block in BLOCK_ELEMENTS.iter() {
        text = block.replace_all(&text, " ").into_owned();
    }

    let text = TAG.replace_all(&text, " ");
    strip_entities(&text)
}

/// Decode common named and numeric entities; unknown entities become a space
pub fn strip_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let entity = &caps[1];
            decode_entity(entity).map_or_else(|| " ".to_string(), |c| c.to_string())
        })
        .into_owned()
}

fn decode_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(dec) = entity.strip_prefix('#') {
        return dec.parse::<u32>().ok().and_then(char::from_u32);
    }

    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => None,
    }
}

/// Remove the fragment and re-encode the query of a URL
///
/// Parsing through `Url` already percent-encodes characters that are not
/// allowed in the query, so re-serializing is all the encoding needed.
pub fn clean_url(url: &Url) -> Url {
    let mut cleaned = url.clone();
    cleaned.set_fragment(None);
    if let Some(query) = url.query() {
        cleaned.set_query(Some(query));
    }
    cleaned
}

/// Parse and clean a URL string
pub fn normalize(url: &str) -> Option<Url> {
    Url::parse(url.trim()).ok().map(|u| clean_url(&u))
}

/// List all http(s) anchor links in the page, resolved against `base`
///
/// Links are returned cleaned and in the order they appear. Relative links
/// are made absolute; links with any other scheme (`mailto:`,
/// `javascript:`) and links that fail to resolve are dropped.
pub fn list_links(base: &Url, html: &str) -> Vec<Url> {
    let mut links = Vec::new();

    for caps in ANCHOR_HREF.captures_iter(html) {
        let Some(href) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };
        let href = strip_entities(href.as_str().trim());

        match base.join(&href) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                links.push(clean_url(&url));
            }
            Ok(url) => {
                tracing::debug!("Ignoring non-http link {} on {}", url, base);
            }
            Err(e) => {
                tracing::debug!("Dropping malformed link '{}' on {}: {}", href, base, e);
            }
        }
    }

    links
}
