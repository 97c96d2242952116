//! Domain extraction and trusted-domain matching.

use url::Url;

/// Returns the lowercased host of `raw`, if it is a URL with a host.
pub fn host_of(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw.trim()).ok()?;
    parsed
        .host_str()
        .map(|h| h.trim_end_matches('.').to_ascii_lowercase())
}

/// Key used to group results by site: the host without a leading `www.`.
///
/// Only `www.` is folded. Other subdomains are separate sites for the
/// diversity cap, so `business.nikkei.com` and `www.nikkei.com` get
/// different keys even though [`is_trusted`] accepts both under a
/// `www.nikkei.com` entry.
///
/// Results without a parseable host each get their own key, so they never
/// count against another result's diversity cap.
pub fn domain_key(raw: &str) -> String {
    match host_of(raw) {
        Some(host) => strip_www(&host).to_string(),
        None => raw.to_string(),
    }
}

/// Returns `true` if the URL's host equals a trusted domain or is a subdomain of one.
///
/// A leading `www.` is ignored on both sides. Substring matches do not count:
/// `www.nikkei.com.evil.tld` is not trusted by `www.nikkei.com`.
pub fn is_trusted(raw_url: &str, trusted_domains: &[String]) -> bool {
    let Some(host) = host_of(raw_url) else {
        return false;
    };
    let host = strip_www(&host);
    trusted_domains.iter().any(|entry| {
        let entry = entry.trim().trim_end_matches('.').to_ascii_lowercase();
        let entry = strip_www(&entry);
        !entry.is_empty()
            && (host == entry
                || host
                    .strip_suffix(entry)
                    .is_some_and(|prefix| prefix.ends_with('.')))
    })
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}
