use std::sync::LazyLock;

use regex::{Captures, Regex};
use url::Url;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").expect("title regex"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(link|meta)\b([^>]*)>").expect("tag regex"));
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .expect("attribute regex")
});
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("entity regex"));
static DIMENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2,4})x(\d{2,4})").expect("dimension regex"));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconCandidate {
    pub url: Url,
    pub width: Option<u32>,
}

/// Text of the first `<title>`, entity-decoded with whitespace collapsed.
pub fn extract_title(html: &str) -> Option<String> {
    let raw = TITLE_RE.captures(html)?.get(1)?.as_str();
    let text = decode_entities(raw)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    (!text.is_empty()).then_some(text)
}

/// Icon declarations in document order, then `/favicon.ico`. HTTP(S) only, deduplicated.
pub fn icon_candidates(html: &str, page_url: &Url) -> Vec<IconCandidate> {
    let mut out: Vec<IconCandidate> = Vec::new();
    let mut push = |href: &str, sizes: Option<&str>| {
        let Ok(url) = page_url.join(decode_entities(href.trim()).as_str()) else {
            return;
        };
        if !matches!(url.scheme(), "http" | "https") || out.iter().any(|c| c.url == url) {
            return;
        }
        let width = sizes
            .and_then(parse_sizes)
            .or_else(|| size_from_url(url.as_str()));
        out.push(IconCandidate { url, width });
    };

    for tag in TAG_RE.captures_iter(html) {
        let attrs = parse_attrs(&tag[2]);
        let get = |name: &str| {
            attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };
        if tag[1].eq_ignore_ascii_case("link") {
            let (Some(rel), Some(href)) = (get("rel"), get("href")) else {
                continue;
            };
            if is_icon_rel(rel) {
                push(href, get("sizes"));
            }
        } else {
            let key = get("name").or_else(|| get("property")).unwrap_or("");
            let wanted = key.eq_ignore_ascii_case("msapplication-tileimage")
                || key.eq_ignore_ascii_case("og:image");
            if let (true, Some(content)) = (wanted, get("content")) {
                push(content, None);
            }
        }
    }
    push("/favicon.ico", None);
    out
}

/// Largest declared width wins; unknown width counts as 0; ties keep the first seen.
pub fn pick_largest(candidates: &[IconCandidate]) -> Option<&IconCandidate> {
    let mut best: Option<&IconCandidate> = None;
    for c in candidates {
        match best {
            Some(b) if c.width.unwrap_or(0) <= b.width.unwrap_or(0) => {}
            _ => best = Some(c),
        }
    }
    best
}

fn is_icon_rel(rel: &str) -> bool {
    rel.split_whitespace().any(|token| {
        let token = token.to_ascii_lowercase();
        token == "icon" || token.starts_with("apple-touch-icon")
    })
}

fn parse_attrs(raw: &str) -> Vec<(String, String)> {
    ATTR_RE
        .captures_iter(raw)
        .map(|c| {
            let value = c
                .get(2)
                .or_else(|| c.get(3))
                .or_else(|| c.get(4))
                .map(|m| m.as_str())
                .unwrap_or("");
            (c[1].to_ascii_lowercase(), value.to_string())
        })
        .collect()
}

// "16x16 32x32" -> 32, "any" -> None
fn parse_sizes(sizes: &str) -> Option<u32> {
    sizes
        .split_whitespace()
        .filter_map(|s| {
            let lower = s.to_ascii_lowercase();
            let (w, _) = lower.split_once('x')?;
            w.parse::<u32>().ok()
        })
        .max()
}

fn size_from_url(url: &str) -> Option<u32> {
    DIMENSION_RE
        .captures(url)
        .and_then(|c| c[1].parse::<u32>().ok())
}

fn decode_entities(s: &str) -> String {
    ENTITY_RE
        .replace_all(s, |c: &Captures| {
            let name = &c[1];
            let hex = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X"));
            let decoded = if let Some(hex) = hex {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match name {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some(' '),
                    _ => None,
                }
            };
            decoded.map_or_else(|| c[0].to_string(), String::from)
        })
        .into_owned()
}
