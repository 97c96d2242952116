//! Per-domain diversity cap.

use std::collections::HashMap;

use crate::types::RankedResult;

use super::domain::domain_key;

/// Maximum results per domain when selecting `num` from sites holding
/// `per_domain` candidates each.
///
/// The smallest cap that can still fill `min(num, total candidates)`: one per
/// domain while there are at least `num` domains, otherwise high enough that
/// a single prolific domain makes up for sites with few candidates. Never
/// exceeds `ceil(num / distinct domains)` when every domain can supply that
/// many.
pub fn domain_cap(num: usize, per_domain: &[usize]) -> usize {
    let wanted = num.min(per_domain.iter().sum());
    let largest = per_domain.iter().copied().max().unwrap_or(0);
    (1..=largest)
        .find(|&cap| per_domain.iter().map(|&n| n.min(cap)).sum::<usize>() >= wanted)
        .unwrap_or(1)
}

/// Greedily take up to `num` results from a score-sorted list, skipping any
/// whose domain already holds [`domain_cap`] selections.
pub fn select_diverse(sorted: Vec<RankedResult>, num: usize) -> Vec<RankedResult> {
    let keys: Vec<String> = sorted.iter().map(|r| domain_key(&r.result.url)).collect();
    let mut available: HashMap<&str, usize> = HashMap::new();
    for key in &keys {
        *available.entry(key.as_str()).or_insert(0) += 1;
    }
    let counts: Vec<usize> = available.into_values().collect();
    let cap = domain_cap(num, &counts);

    let mut per_domain: HashMap<String, usize> = HashMap::new();
    let mut selected = Vec::with_capacity(num.min(sorted.len()));

    for (result, key) in sorted.into_iter().zip(keys) {
        if selected.len() == num {
            break;
        }
        let taken = per_domain.entry(key).or_insert(0);
        if *taken >= cap {
            tracing::trace!(url = %result.result.url, "skipping result over domain cap");
            continue;
        }
        *taken += 1;
        selected.push(result);
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ResultSource, SearchResult};

    fn ranked(url: &str, score: f64) -> RankedResult {
        let mut r = RankedResult::unscored(SearchResult::new(
            Some("t".into()),
            url,
            None,
            ResultSource::Cse,
            None,
        ));
        r.score = score;
        r
    }

    #[test]
    fn cap_is_one_when_enough_domains() {
        assert_eq!(domain_cap(2, &[2, 1]), 1);
        assert_eq!(domain_cap(3, &[1, 1, 1, 1, 1]), 1);
    }

    #[test]
    fn cap_spreads_when_few_domains() {
        assert_eq!(domain_cap(5, &[5, 5]), 3);
        assert_eq!(domain_cap(4, &[3, 3]), 2);
        assert_eq!(domain_cap(3, &[4]), 3);
    }

    #[test]
    fn cap_grows_to_cover_thin_domains() {
        // 8 + 1 + 1 candidates, num 5: a cap of 3 is needed to reach 5.
        assert_eq!(domain_cap(5, &[8, 1, 1]), 3);
        // Fewer candidates than requested: take everything.
        assert_eq!(domain_cap(6, &[3, 1]), 3);
    }

    #[test]
    fn cap_of_empty_input() {
        assert_eq!(domain_cap(3, &[]), 1);
    }

    #[test]
    fn lower_ranked_domain_beats_duplicate() {
        let sorted = vec![
            ranked("https://x.com/new", 0.9),
            ranked("https://x.com/old", 0.8),
            ranked("https://y.com/a", 0.5),
        ];
        let selected = select_diverse(sorted, 2);
        let urls: Vec<_> = selected.iter().map(|r| r.result.url.as_str()).collect();
        assert_eq!(urls, vec!["https://x.com/new", "https://y.com/a"]);
    }

    #[test]
    fn single_domain_fills_up_to_num() {
        let sorted = vec![
            ranked("https://x.com/1", 0.9),
            ranked("https://www.x.com/2", 0.8),
            ranked("https://x.com/3", 0.7),
        ];
        assert_eq!(select_diverse(sorted, 3).len(), 3);
    }

    #[test]
    fn prolific_domain_fills_remaining_slots() {
        let mut sorted: Vec<RankedResult> = (0..8)
            .map(|i| ranked(&format!("https://www.nikkei.com/{i}"), 0.9 - f64::from(i) * 0.01))
            .collect();
        sorted.push(ranked("https://a.example.com/1", 0.5));
        sorted.push(ranked("https://b.example.com/1", 0.4));

        let selected = select_diverse(sorted, 5);
        let urls: Vec<_> = selected.iter().map(|r| r.result.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.nikkei.com/0",
                "https://www.nikkei.com/1",
                "https://www.nikkei.com/2",
                "https://a.example.com/1",
                "https://b.example.com/1",
            ]
        );
    }

    #[test]
    fn cap_still_binds_with_enough_alternatives() {
        let sorted = vec![
            ranked("https://x.com/1", 0.9),
            ranked("https://x.com/2", 0.8),
            ranked("https://x.com/3", 0.7),
            ranked("https://y.com/1", 0.2),
            ranked("https://y.com/2", 0.1),
        ];
        // Two domains, num 4: two per domain, the third x result is skipped.
        let selected = select_diverse(sorted, 4);
        let urls: Vec<_> = selected.iter().map(|r| r.result.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://x.com/1", "https://x.com/2", "https://y.com/1", "https://y.com/2"]
        );
    }

    #[test]
    fn stops_at_num() {
        let sorted = (0..10)
            .map(|i| ranked(&format!("https://site{i}.com"), 1.0 - f64::from(i) * 0.05))
            .collect();
        assert_eq!(select_diverse(sorted, 4).len(), 4);
    }

    #[test]
    fn empty_input() {
        assert!(select_diverse(vec![], 3).is_empty());
    }
}
