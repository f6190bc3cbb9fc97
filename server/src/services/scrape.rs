//! LeetCode problem metadata lookup.
//!
//! The page is fetched once and scanned with a handful of regexes. Any
//! failure (network, bot challenge, unrecognizable markup) falls back to the
//! URL slug, so a problem can be added as long as its URL names it.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use wire::Difficulty;
use wire::validate::MIN_TITLE_LEN;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const CHALLENGE_MARKERS: [&str; 2] = ["Just a moment", "Checking your browser"];
const TITLE_SUFFIXES: [&str; 2] = [" - LeetCode", " | LeetCode"];

static TITLE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("title regex"));
static OG_TITLE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?is)<meta\s[^>]*property\s*=\s*["']og:title["'][^>]*>"#).expect("og regex"));
static CONTENT_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?is)content\s*=\s*["']([^"']*)["']"#).expect("content regex"));
static H1_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").expect("h1 regex"));
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]+>").expect("tag regex"));
static DATA_DIFFICULTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)data-difficulty\s*=\s*["']\s*(easy|medium|hard)\s*["']"#).expect("data-difficulty regex")
});
static DIFFICULTY_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)class\s*=\s*["'][^"']*\b(?:text-)?difficulty-(easy|medium|hard)\b"#).expect("class regex")
});
static DIFFICULTY_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:Difficulty|Level)\s*:?\s*(Easy|Medium|Hard)\b").expect("text regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemMetadata {
    pub title: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("fetch failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("page is behind a bot challenge")]
    Challenge,
    #[error("no usable title on page")]
    NoTitle,
    #[error("Failed to scrape problem details. Please check the URL.")]
    NoSlug,
}

fn decode_entities(raw: &str) -> String {
    raw.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// Strip markup and LeetCode suffixes, collapse whitespace.
fn clean_title(raw: &str) -> String {
    let text = decode_entities(&ANY_TAG.replace_all(raw, ""));
    let mut title = text.split_whitespace().collect::<Vec<_>>().join(" ");
    for suffix in TITLE_SUFFIXES {
        if let Some(idx) = title.find(suffix) {
            title.truncate(idx);
            break;
        }
    }
    title.trim().to_owned()
}

fn usable(title: String) -> Option<String> {
    (title.chars().count() >= MIN_TITLE_LEN).then_some(title)
}

/// Title-case the slug after `/problems/` (`two-sum` -> `Two Sum`).
#[must_use]
pub fn slug_title(url: &str) -> Option<String> {
    let rest = url.split_once("://").map_or(url, |(_, r)| r);
    let path = rest.split(['?', '#']).next().unwrap_or_default();
    let mut segments = path.split('/').skip(1).filter(|s| !s.is_empty());
    segments.find(|s| *s == "problems")?;
    let slug = segments.next()?;

    let title = slug
        .split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ");
    (!title.is_empty()).then_some(title)
}

fn title_from_page(html: &str) -> Option<String> {
    if let Some(t) = TITLE_TAG.captures(html).and_then(|c| usable(clean_title(&c[1]))) {
        return Some(t);
    }
    if let Some(t) = OG_TITLE_TAG
        .find(html)
        .and_then(|tag| CONTENT_ATTR.captures(tag.as_str()))
        .and_then(|c| usable(clean_title(&c[1])))
    {
        return Some(t);
    }
    H1_TAG.captures(html).and_then(|c| usable(clean_title(&c[1])))
}

/// Read difficulty from markup, defaulting to medium.
#[must_use]
pub fn difficulty_from_page(html: &str) -> Difficulty {
    let text = ANY_TAG.replace_all(html, " ");
    [
        DATA_DIFFICULTY.captures(html),
        DIFFICULTY_CLASS.captures(html),
        DIFFICULTY_TEXT.captures(&text),
    ]
    .into_iter()
    .flatten()
    .find_map(|c| c[1].parse().ok())
    .unwrap_or_default()
}

/// Extract metadata from a fetched page. The slug stands in for a missing title.
///
/// # Errors
///
/// Returns [`ScrapeError::Challenge`] for bot-check interstitials and
/// [`ScrapeError::NoTitle`] when neither page nor slug yields a title.
pub fn parse_problem_page(html: &str, url: &str) -> Result<ProblemMetadata, ScrapeError> {
    if CHALLENGE_MARKERS.iter().any(|m| html.contains(m)) {
        return Err(ScrapeError::Challenge);
    }
    let title = title_from_page(html)
        .or_else(|| slug_title(url).and_then(usable))
        .ok_or(ScrapeError::NoTitle)?;
    Ok(ProblemMetadata { title, difficulty: difficulty_from_page(html) })
}

async fn fetch_page(http: &reqwest::Client, url: &str, timeout: Duration) -> Result<String, ScrapeError> {
    let resp = http
        .get(url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .timeout(timeout)
        .send()
        .await?
        .error_for_status()?;
    Ok(resp.text().await?)
}

/// Fetch and parse a problem page, falling back to the URL slug.
///
/// # Errors
///
/// Returns [`ScrapeError::NoSlug`] only when the page was unusable and the
/// URL has no `/problems/{slug}` segment.
pub async fn problem_metadata(
    http: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<ProblemMetadata, ScrapeError> {
    let parsed = match fetch_page(http, url, timeout).await {
        Ok(html) => parse_problem_page(&html, url),
        Err(e) => Err(e),
    };
    match parsed {
        Ok(meta) => Ok(meta),
        Err(e) => {
            tracing::warn!(%url, error = %e, "problem scrape failed; using URL slug");
            let title = slug_title(url).and_then(usable).ok_or(ScrapeError::NoSlug)?;
            Ok(ProblemMetadata { title, difficulty: Difficulty::default() })
        }
    }
}

#[cfg(test)]
#[path = "scrape_test.rs"]
mod tests;
