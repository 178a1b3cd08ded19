//! Integration tests for nickname resolution over the household directory.
//!
//! Covers the documented lookup scenarios plus the ordering and threshold
//! properties callers rely on.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;

use zephyr::contacts::{
    Contact, ContactDirectory, ContactField, NicknameResolver, Resolution, ResolveError,
};
use zephyr_match::{Scorer, extract_one};

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn household() -> Arc<ContactDirectory> {
    Arc::new(
        ContactDirectory::new(vec![
            Contact::new("001", "lal", "lal@example.com", "Aurelie Nys"),
            Contact::new("002", "basile", "basile@example.com", "Basile Vinchon-Nys"),
            Contact::new("003", "seb", "seb@example.com", "Sebastien Vinchon"),
            Contact::new("004", "gigi", "gigi@example.com", "Guillaume Vinchon"),
        ])
        .unwrap(),
    )
}

fn resolver() -> NicknameResolver {
    NicknameResolver::new(household())
}

fn found_id(resolution: &Resolution) -> Option<&str> {
    resolution.contact().map(|c| c.id.as_str())
}

fn found_score(resolution: &Resolution) -> f64 {
    match resolution {
        Resolution::Found { score, .. } => *score,
        Resolution::NotFound => panic!("expected a match"),
    }
}

fn best_score(query: &str, contact: &Contact, field: ContactField) -> f64 {
    extract_one(
        query,
        field.extract(contact).split_whitespace(),
        Scorer::WeightedRatio,
    )
    .map(|m| m.score)
    .unwrap_or(0.0)
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn exact_nickname_with_different_case() {
    let res = resolver().resolve_nickname("Lal").unwrap();
    assert_eq!(found_id(&res), Some("001"));
    assert_eq!(found_score(&res), 100.0);
}

#[test]
fn every_exact_nickname_resolves_to_its_contact() {
    let r = resolver();
    for contact in r.directory().iter() {
        for query in [
            contact.nickname.clone(),
            contact.nickname.to_uppercase(),
        ] {
            let res = r.resolve_nickname(&query).unwrap();
            assert_eq!(found_id(&res), Some(contact.id.as_str()), "{query}");
            assert_eq!(found_score(&res), 100.0, "{query}");
        }
    }
}

#[test]
fn mistranscription_below_threshold_is_not_found() {
    let r = resolver();
    assert_eq!(r.resolve_nickname("baseel").unwrap(), Resolution::NotFound);

    let basile = r.directory().get("002").unwrap();
    let score = best_score("baseel", basile, ContactField::Nickname);
    assert!((score - 50.0).abs() < 1e-9, "pinned score drifted: {score}");
}

#[test]
fn unrelated_nickname_is_not_found() {
    assert!(!resolver().resolve_nickname("xyz123").unwrap().is_found());
}

#[test]
fn id_lookup() {
    let res = resolver().resolve_id("004").unwrap();
    assert_eq!(found_id(&res), Some("004"));
}

#[test]
fn empty_nickname_is_invalid_input() {
    assert_eq!(
        resolver().resolve_nickname(""),
        Err(ResolveError::InvalidInput("nickname".to_owned()))
    );
}

#[test]
fn duplicate_nicknames_always_return_the_first() {
    let dir = Arc::new(
        ContactDirectory::new(vec![
            Contact::new("100", "sam", "sam.one@example.com", "Sam One"),
            Contact::new("101", "sam", "sam.two@example.com", "Sam Two"),
        ])
        .unwrap(),
    );
    let r = NicknameResolver::new(dir);
    for _ in 0..10 {
        let res = r.resolve_nickname("sam").unwrap();
        assert_eq!(found_id(&res), Some("100"));
    }
    assert_eq!(r.list_known_nicknames(), vec!["sam", "sam"]);
}

#[test]
fn near_misses_that_clear_the_threshold() {
    let r = resolver();

    let basil = r.resolve_nickname("basil").unwrap();
    assert_eq!(found_id(&basil), Some("002"));
    assert!((found_score(&basil) - 83.333_333).abs() < 1e-3);

    let sebastien = r.resolve_nickname("sebastien").unwrap();
    assert_eq!(found_id(&sebastien), Some("003"));
    assert!((found_score(&sebastien) - 90.0).abs() < 1e-9);
}

#[test]
fn ids_do_not_cross_match() {
    let r = resolver();
    let first = r.directory().get("001").unwrap();
    let score = best_score("004", first, ContactField::Id);
    assert!((score - 66.666_667).abs() < 1e-3);
    assert!(score < 80.0);
}

#[test]
fn threshold_out_of_range_is_rejected() {
    let r = resolver();
    for bad in [101.0, -0.5, f64::INFINITY] {
        assert!(matches!(
            r.resolve_by_field(ContactField::Nickname, "seb", Some(bad)),
            Err(ResolveError::InvalidThreshold(_))
        ));
    }
}

#[test]
fn list_known_nicknames_in_directory_order() {
    assert_eq!(
        resolver().list_known_nicknames(),
        vec!["lal", "basile", "seb", "gigi"]
    );
}

// ─── Properties ──────────────────────────────────────────────────────────────

const QUERIES: [&str; 10] = [
    "Lal", "baseel", "basil", "sebastien", "gigy", "gg", "xyz123", "seb", "BASILE", "la",
];

#[test]
fn returned_contact_is_first_at_or_above_threshold() {
    let r = resolver();
    for threshold in [0.0, 40.0, 60.0, 75.0, 80.0, 95.0, 100.0] {
        for query in QUERIES {
            let res = r
                .resolve_by_field(ContactField::Nickname, query, Some(threshold))
                .unwrap();
            let scores: Vec<f64> = r
                .directory()
                .iter()
                .map(|c| best_score(query, c, ContactField::Nickname))
                .collect();
            let expected = scores.iter().position(|s| *s >= threshold);

            match (&res, expected) {
                (Resolution::Found { contact, score, .. }, Some(idx)) => {
                    let want = r.directory().iter().nth(idx).unwrap();
                    assert_eq!(contact.id, want.id, "{query} @ {threshold}");
                    assert!(*score >= threshold);
                }
                (Resolution::NotFound, None) => {}
                (got, want) => panic!("{query} @ {threshold}: got {got:?}, want index {want:?}"),
            }
        }
    }
}

#[test]
fn lowering_the_threshold_never_loses_a_match() {
    let r = resolver();
    let thresholds = [100.0, 90.0, 80.0, 70.0, 50.0, 30.0, 0.0];
    for query in QUERIES {
        let mut seen_match = false;
        for t in thresholds {
            let found = r
                .resolve_by_field(ContactField::Nickname, query, Some(t))
                .unwrap()
                .is_found();
            assert!(found || !seen_match, "{query} lost its match at {t}");
            seen_match |= found;
        }
    }
}

#[test]
fn zero_threshold_matches_first_contact_with_any_token() {
    let res = resolver()
        .resolve_by_field(ContactField::Nickname, "xyz123", Some(0.0))
        .unwrap();
    assert_eq!(found_id(&res), Some("001"));
}

#[test]
fn resolver_is_shareable_across_threads() {
    let r = resolver();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let r = r.clone();
            std::thread::spawn(move || r.resolve_nickname("gigi").unwrap())
        })
        .collect();
    for h in handles {
        assert_eq!(found_id(&h.join().unwrap()), Some("004"));
    }
}
