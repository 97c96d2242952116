//! URL normalisation for merging results from different backends.
//!
//! Two backends often return the same article with cosmetic differences
//! (host case, trailing slash, campaign parameters). Normalised forms of such
//! URLs compare equal.

use url::Url;

/// Query parameters dropped during normalisation.
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "ref",
    "n_cid",
];

/// Normalise a URL for duplicate detection.
///
/// Lowercases scheme and host, drops default ports, the fragment, tracking
/// parameters and a trailing slash, and sorts the remaining query pairs.
/// Unparseable input is returned unchanged.
///
/// ```
/// use sales_search::ranking::url_normalize::normalize_url;
///
/// let a = normalize_url("https://WWW.Nikkei.com/article/1/?b=2&a=1#top");
/// let b = normalize_url("https://www.nikkei.com/article/1?a=1&b=2");
/// assert_eq!(a, b);
/// ```
pub fn normalize_url(raw: &str) -> String {
    let Ok(mut parsed) = Url::parse(raw.trim()) else {
        return raw.to_string();
    };

    parsed.set_fragment(None);
    if matches!(
        (parsed.scheme(), parsed.port()),
        ("http", Some(80)) | ("https", Some(443))
    ) {
        let _ = parsed.set_port(None);
    }

    let mut params: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !TRACKING_PARAMS.contains(&key.to_lowercase().as_str()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    params.sort();

    if params.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().clear().extend_pairs(params);
    }

    let path = parsed.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        parsed.set_path(path.trim_end_matches('/'));
    }

    // Url::parse already lowercases scheme and host.
    parsed.to_string()
}
