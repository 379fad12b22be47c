//! Search-as-you-type suggestions and result filtering over the trek list.
//!
//! Suggestions are grouped in a fixed order: trek names first, then regions,
//! then difficulty levels. Regions and difficulties are derived from the trek
//! list itself, so they always agree with what the search page can show.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use crate::net::types::Trek;

pub const MIN_TERM_LEN: usize = 2;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuggestionKind {
    Trek,
    Region,
    Difficulty,
}

impl SuggestionKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Trek => "trek",
            Self::Region => "region",
            Self::Difficulty => "difficulty",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suggestion {
    pub id: String,
    pub text: String,
    pub kind: SuggestionKind,
    pub subtitle: String,
    pub url: String,
}

/// Suggestions for `term`, at most `limit` of them.
///
/// Terms shorter than two characters (after trimming) yield nothing.
pub fn suggestions(treks: &[Trek], term: &str, limit: usize) -> Vec<Suggestion> {
    let needle = term.trim().to_lowercase();
    if needle.chars().count() < MIN_TERM_LEN {
        return Vec::new();
    }
    let matches = |s: &str| s.to_lowercase().contains(&needle);

    let trek_hits = treks.iter().filter(|t| matches(&t.name)).map(|t| Suggestion {
        id: format!("trek-{}", t.id.map_or_else(|| t.slug.clone(), |id| id.to_string())),
        text: t.name.clone(),
        kind: SuggestionKind::Trek,
        subtitle: trek_subtitle(t),
        url: format!("/trek/{}", t.slug),
    });

    let region_hits = regions(treks).into_iter().filter(|(name, _)| matches(name)).map(|(name, count)| {
        let slug = slugify(&name);
        Suggestion {
            id: format!("region-{slug}"),
            text: name,
            kind: SuggestionKind::Region,
            subtitle: format!("{count} treks available"),
            url: format!("/region/{slug}"),
        }
    });

    let difficulty_hits = difficulties(treks).into_iter().filter(|d| matches(d)).map(|d| {
        let lowered = d.to_lowercase();
        let count = treks
            .iter()
            .filter(|t| t.difficulty.as_deref().is_some_and(|td| td.to_lowercase().contains(&lowered)))
            .count();
        Suggestion {
            id: format!("difficulty-{d}"),
            subtitle: format!("{count} treks"),
            url: format!("/search?difficulty={}", urlencoding::encode(&lowered)),
            text: d,
            kind: SuggestionKind::Difficulty,
        }
    });

    trek_hits.chain(region_hits).chain(difficulty_hits).take(limit).collect()
}

/// Treks matching a free-text query and an optional difficulty filter.
pub fn filter_treks<'a>(treks: &'a [Trek], query: &str, difficulty: Option<&str>) -> Vec<&'a Trek> {
    let needle = query.trim().to_lowercase();
    let wanted = difficulty.map(str::trim).filter(|d| !d.is_empty()).map(str::to_lowercase);
    treks
        .iter()
        .filter(|t| {
            needle.is_empty()
                || [Some(t.name.as_str()), t.region.as_deref(), t.difficulty.as_deref()]
                    .into_iter()
                    .flatten()
                    .any(|field| field.to_lowercase().contains(&needle))
        })
        .filter(|t| {
            wanted.as_ref().map_or(true, |w| t.difficulty.as_deref().is_some_and(|d| d.to_lowercase().contains(w)))
        })
        .collect()
}

/// Treks whose region slugifies to `slug`.
pub fn treks_in_region<'a>(treks: &'a [Trek], slug: &str) -> Vec<&'a Trek> {
    treks.iter().filter(|t| t.region.as_deref().is_some_and(|r| slugify(r) == slug)).collect()
}

/// `12 days • Everest • $1450`
pub fn trek_subtitle(trek: &Trek) -> String {
    let mut parts = Vec::with_capacity(3);
    if let Some(days) = trek.duration {
        parts.push(format!("{} days", plain_number(days)));
    }
    if let Some(region) = trek.region.as_deref().filter(|r| !r.is_empty()) {
        parts.push(region.to_owned());
    }
    if let Some(price) = trek.price {
        parts.push(format!("${}", plain_number(price)));
    }
    parts.join(" • ")
}

/// Distinct regions in first-seen order, with trek counts.
fn regions(treks: &[Trek]) -> Vec<(String, usize)> {
    let mut out: Vec<(String, usize)> = Vec::new();
    for region in treks.iter().filter_map(|t| t.region.as_deref()).filter(|r| !r.is_empty()) {
        match out.iter_mut().find(|(name, _)| name == region) {
            Some((_, count)) => *count += 1,
            None => out.push((region.to_owned(), 1)),
        }
    }
    out
}

fn difficulties(treks: &[Trek]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for d in treks.iter().filter_map(|t| t.difficulty.as_deref()).filter(|d| !d.is_empty()) {
        if !out.iter().any(|seen| seen.eq_ignore_ascii_case(d)) {
            out.push(d.to_owned());
        }
    }
    out
}

pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()).map(str::to_lowercase).collect::<Vec<_>>().join("-")
}

fn plain_number(n: f64) -> String {
    if n.fract().abs() < f64::EPSILON { format!("{n:.0}") } else { n.to_string() }
}
