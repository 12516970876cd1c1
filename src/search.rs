// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Fuzzy name search for the catalog view.
//!
//! Matches are tiered: an exact name match always outranks a prefix match,
//! which outranks a substring match, and so on down to a small edit
//! distance, so partial or slightly misspelled queries still surface the
//! right cards. Ties keep the deck's current order.

/// Ranks the given display names against a query and returns the matching
/// positions, best first. A blank query returns every position in order.
pub fn rank_names(names: &[&str], query: &str) -> Vec<usize> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return (0..names.len()).collect();
    }
    let mut scored: Vec<(u32, usize)> = names
        .iter()
        .enumerate()
        .filter_map(|(position, name)| {
            match_score(&name.to_lowercase(), &query).map(|score| (score, position))
        })
        .collect();
    scored.sort_by_key(|&(score, position)| (score, position));
    scored.into_iter().map(|(_, position)| position).collect()
}

/// Score a single lowercased name against a lowercased query. Lower is
/// better; `None` means no match at all.
fn match_score(name: &str, query: &str) -> Option<u32> {
    if name == query {
        return Some(0);
    }
    if name.starts_with(query) {
        return Some(1);
    }
    if name.contains(query) {
        return Some(2);
    }
    if name.split_whitespace().any(|token| token.starts_with(query)) {
        return Some(3);
    }
    if is_subsequence(query, name) {
        return Some(4);
    }
    let tolerance = edit_tolerance(query);
    let whole = levenshtein(name, query);
    let best = name
        .split_whitespace()
        .map(|token| levenshtein(token, query))
        .fold(whole, u32::min);
    if best <= tolerance {
        return Some(5 + best);
    }
    None
}

/// How many edits a query of this length may be off by.
fn edit_tolerance(query: &str) -> u32 {
    match query.chars().count() {
        0..=3 => 1,
        4..=7 => 2,
        _ => 3,
    }
}

/// Whether every character of `needle` appears in `haystack`, in order.
fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut chars = haystack.chars();
    needle.chars().all(|n| chars.any(|h| h == n))
}

/// Plain two-row Levenshtein distance over characters.
fn levenshtein(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len() as u32;
    }
    if b.is_empty() {
        return a.len() as u32;
    }
    let mut prev: Vec<u32> = (0..=b.len() as u32).collect();
    let mut curr: Vec<u32> = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i as u32 + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + u32::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
