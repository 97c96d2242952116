//! Result deduplication by normalised URL.
//!
//! Used when the hybrid provider merges news and custom-search results.
//! The first occurrence of each URL keeps its position; a later duplicate
//! only contributes its publish date when the first one had none.

use std::collections::HashMap;

use crate::types::SearchResult;

use super::url_normalize::normalize_url;

/// Deduplicate results by normalised URL, preserving first-occurrence order.
pub fn deduplicate(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<SearchResult> = Vec::with_capacity(results.len());

    for result in results {
        let key = normalize_url(&result.url);
        match positions.get(&key) {
            Some(&idx) => {
                let kept = &mut unique[idx];
                if kept.published_at.is_none() {
                    kept.published_at = result.published_at;
                }
            }
            None => {
                positions.insert(key, unique.len());
                unique.push(result);
            }
        }
    }

    unique
}
