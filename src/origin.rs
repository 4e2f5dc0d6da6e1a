//! Origin matching: which known host family a source URL belongs to.

use crate::config::SourcesConfig;

/// Outcome of matching a source URL against the configured origins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginMatch<'a> {
    /// The URL contains this CDN origin (first match in declared order).
    Cdn(&'a str),
    /// The URL contains the stock-photo origin.
    Stock(&'a str),
    Unmatched,
}

/// Match `src` against the CDN origins, then the stock-photo origin.
///
/// Matching is by substring, and CDN origins are tried in declared order, so
/// overlapping origins still resolve to exactly one: the earliest listed.
pub fn match_origin<'a>(src: &str, config: &'a SourcesConfig) -> OriginMatch<'a> {
    if let Some(origin) = config
        .cdn
        .origins
        .iter()
        .find(|origin| !origin.is_empty() && src.contains(origin.as_str()))
    {
        return OriginMatch::Cdn(origin.as_str());
    }
    let stock = config.stock.origin.as_str();
    if !stock.is_empty() && src.contains(stock) {
        return OriginMatch::Stock(stock);
    }
    OriginMatch::Unmatched
}

/// The part of `src` following the first occurrence of `origin`, minus one
/// leading `/`.
///
/// `("https://a.com/img/x.png", "https://a.com")` → `Some("img/x.png")`
pub fn file_path_after_origin<'s>(src: &'s str, origin: &str) -> Option<&'s str> {
    let (_, rest) = src.split_once(origin)?;
    Some(rest.strip_prefix('/').unwrap_or(rest))
}
