//! Permissive RSS item scanner.
//!
//! The upstream feed is not reliably spec-compliant, so items are located
//! with block-delimiter patterns instead of a validating XML parser. A block
//! missing a required field is dropped on its own; it never fails the fetch.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Headline;

static ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<item(?:\s[^>]*)?>(.*?)</item>").expect("item pattern"));
static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<title(?:\s[^>]*)?>(.*?)</title>").expect("title pattern"));
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<link(?:\s[^>]*)?>(.*?)</link>").expect("link pattern"));
static PUB_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<pubDate(?:\s[^>]*)?>(.*?)</pubDate>").expect("pubDate pattern"));

/// Scan a feed body and return up to `max_items` headlines in feed order.
pub fn parse_feed(body: &str, source: &str, max_items: usize) -> Vec<Headline> {
    ITEM_RE
        .captures_iter(body)
        .take(max_items)
        .filter_map(|caps| parse_item(caps.get(1).map_or("", |m| m.as_str()), source))
        .collect()
}

fn parse_item(block: &str, source: &str) -> Option<Headline> {
    let title = extract_field(&TITLE_RE, block)?;
    let link = extract_field(&LINK_RE, block)?;
    let published_at = match PUB_DATE_RE.captures(block) {
        Some(caps) => parse_pub_date(caps.get(1).map_or("", |m| m.as_str())),
        None => Utc::now().to_rfc3339(),
    };

    Some(Headline {
        title,
        link,
        published_at,
        source: source.to_string(),
    })
}

/// Extract, unwrap CDATA and decode a field; None when missing or empty.
fn extract_field(pattern: &Regex, block: &str) -> Option<String> {
    let raw = pattern.captures(block)?.get(1)?.as_str();
    let value = decode_entities(strip_cdata(raw));
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn strip_cdata(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix("<![CDATA[")
        .and_then(|rest| rest.strip_suffix("]]>"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

fn decode_entities(raw: &str) -> String {
    // &amp; goes last so decoded ampersands are not re-expanded.
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// RSS dates are RFC 2822; everything is re-rendered as RFC 3339.
/// Unparseable dates fall back to the parse-time clock.
fn parse_pub_date(raw: &str) -> String {
    DateTime::parse_from_rfc2822(raw.trim())
        .map(|dt| dt.with_timezone(&Utc).to_rfc3339())
        .unwrap_or_else(|_| Utc::now().to_rfc3339())
}
