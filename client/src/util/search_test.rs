use super::*;

fn trek(id: i64, slug: &str, name: &str, region: &str, difficulty: &str, days: f64, price: f64) -> Trek {
    Trek {
        id: Some(id),
        slug: slug.to_owned(),
        name: name.to_owned(),
        region: Some(region.to_owned()),
        duration: Some(days),
        difficulty: Some(difficulty.to_owned()),
        price: Some(price),
    }
}

fn catalog() -> Vec<Trek> {
    vec![
        trek(1, "everest-base-camp-trek", "Everest Base Camp Trek", "Everest", "Strenuous", 14.0, 1450.0),
        trek(2, "gokyo-lakes", "Gokyo Lakes", "Everest", "Moderate", 12.0, 1290.5),
        trek(3, "annapurna-circuit", "Annapurna Circuit", "Annapurna", "Strenuous", 16.0, 1350.0),
        trek(4, "poon-hill", "Poon Hill", "Annapurna", "Easy", 5.0, 590.0),
    ]
}

#[test]
fn short_terms_yield_nothing() {
    assert!(suggestions(&catalog(), "e", DEFAULT_SUGGESTION_LIMIT).is_empty());
    assert!(suggestions(&catalog(), "  e ", DEFAULT_SUGGESTION_LIMIT).is_empty());
}

#[test]
fn treks_come_before_regions() {
    let found = suggestions(&catalog(), "EVER", DEFAULT_SUGGESTION_LIMIT);
    let kinds: Vec<SuggestionKind> = found.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![SuggestionKind::Trek, SuggestionKind::Region]);
    assert_eq!(found[0].url, "/trek/everest-base-camp-trek");
    assert_eq!(found[0].subtitle, "14 days • Everest • $1450");
    assert_eq!(found[0].id, "trek-1");
    assert_eq!(found[1].subtitle, "2 treks available");
    assert_eq!(found[1].url, "/region/everest");
}

#[test]
fn difficulty_suggestions_count_treks() {
    let found = suggestions(&catalog(), "stren", DEFAULT_SUGGESTION_LIMIT);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, SuggestionKind::Difficulty);
    assert_eq!(found[0].text, "Strenuous");
    assert_eq!(found[0].subtitle, "2 treks");
    assert_eq!(found[0].url, "/search?difficulty=strenuous");
}

#[test]
fn limit_truncates_in_group_order() {
    let found = suggestions(&catalog(), "es", 2);
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|s| s.kind == SuggestionKind::Trek));
}

#[test]
fn fractional_prices_are_kept() {
    assert_eq!(trek_subtitle(&catalog()[1]), "12 days • Everest • $1290.5");
}

#[test]
fn subtitle_skips_missing_fields() {
    let bare = Trek { slug: "x".into(), name: "X".into(), ..Trek::default() };
    assert_eq!(trek_subtitle(&bare), "");
}

#[test]
fn filter_by_query_and_difficulty() {
    let treks = catalog();
    let names = |found: Vec<&Trek>| found.into_iter().map(|t| t.slug.clone()).collect::<Vec<_>>();
    assert_eq!(names(filter_treks(&treks, "annapurna", None)), vec!["annapurna-circuit", "poon-hill"]);
    assert_eq!(names(filter_treks(&treks, "", Some("strenuous"))), vec!["everest-base-camp-trek", "annapurna-circuit"]);
    assert_eq!(names(filter_treks(&treks, "everest", Some("moderate"))), vec!["gokyo-lakes"]);
    assert_eq!(filter_treks(&treks, "  ", None).len(), 4);
}

#[test]
fn multi_word_regions_slugify() {
    let treks = vec![trek(9, "mardi", "Mardi Himal", "Annapurna Region", "Moderate", 7.0, 700.0)];
    let found = suggestions(&treks, "region", DEFAULT_SUGGESTION_LIMIT);
    assert_eq!(found[0].url, "/region/annapurna-region");
}

#[test]
fn region_listing_matches_slug() {
    let treks = catalog();
    let everest: Vec<&str> = treks_in_region(&treks, "everest").into_iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(everest, vec!["everest-base-camp-trek", "gokyo-lakes"]);
    assert!(treks_in_region(&treks, "mustang").is_empty());
    assert_eq!(slugify("Annapurna  Region!"), "annapurna-region");
}
