//! Integration tests for the note store library API.
//!
//! These mix library writes with CLI reads to show both sides see the same
//! store, and walk through multi-step scenarios end to end.

mod common;

use common::harness::{TestEnv, TestNote};
use kasten::KastenError;
use kasten::domain::{SeekPositions, TagQuery};
use pretty_assertions::assert_eq;

fn names(env: &TestEnv, query: &str, max: usize) -> Vec<String> {
    env.kasten()
        .filter(&TagQuery::parse(query), &SeekPositions::new(), max)
        .unwrap()
        .names()
        .to_vec()
}

#[test]
fn test_rewrite_moves_note_between_tags() {
    let env = TestEnv::new();
    env.add_note(&TestNote::new("n1").tag("a").tag("b"));
    env.add_note(&TestNote::new("n2").tag("b").tag("c"));
    env.add_note(&TestNote::new("n3").tag("a").tag("c"));

    assert_eq!(names(&env, "a & b", 100), vec!["n1"]);
    assert_eq!(names(&env, "a & c | b & c", 100), vec!["n2", "n3"]);

    env.add_note(&TestNote::new("n1").tag("c"));

    assert!(names(&env, "a & b", 100).is_empty());
    assert_eq!(names(&env, "c", 100), vec!["n1", "n2", "n3"]);

    let stats = env.kasten().tags_stats(None, 10).unwrap();
    let counts: Vec<(String, u64)> = stats
        .stats()
        .iter()
        .map(|t| (t.tag().to_string(), t.count()))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("a".to_string(), 1),
            ("b".to_string(), 1),
            ("c".to_string(), 3)
        ]
    );
    assert!(env.kasten().check().unwrap().is_empty());
}

#[test]
fn test_library_write_visible_to_cli() {
    let env = TestEnv::new();
    let note = TestNote::new("shared").tag("both").body("seen by all\n");
    env.add_note(&note);

    let output = env.cmd().read("shared").output_success();
    assert_eq!(output, note.content());
}

#[test]
fn test_cli_write_visible_to_library() {
    let env = TestEnv::new();
    let note = TestNote::new("from-cli").tag("cli");
    env.cmd().put(note.name(), &note.content()).assert().success();

    let kasten = env.kasten();
    assert_eq!(kasten.read_note("from-cli").unwrap(), note.content());
    assert_eq!(names(&env, "cli", 10), vec!["from-cli"]);
}

#[test]
fn test_filter_paging_until_exhausted_covers_every_match() {
    let env = TestEnv::new();
    for i in 0..12 {
        let mut note = TestNote::new(format!("note-{:02}", i)).tag("all");
        if i % 3 == 0 {
            note = note.tag("third");
        }
        env.add_note(&note);
    }

    let mut kasten = env.kasten();
    let query = TagQuery::parse("all & third | third");
    let mut seek = SeekPositions::new();
    let mut collected: Vec<String> = Vec::new();

    loop {
        let page = kasten.filter(&query, &seek, 2).unwrap();
        for name in page.names() {
            if !collected.contains(name) {
                collected.push(name.clone());
            }
        }
        if page.is_exhausted() {
            break;
        }
        seek = page.next_seek().clone();
    }

    assert_eq!(
        collected,
        vec!["note-00", "note-03", "note-06", "note-09"]
    );
}

#[test]
fn test_failed_put_leaves_store_consistent() {
    let env = TestEnv::new();
    env.add_note(&TestNote::new("keep").tag("x"));

    let err = env
        .kasten()
        .put_note("keep", "---\ntags: [unterminated\n")
        .unwrap_err();
    assert!(matches!(err, KastenError::ExtractionFailed { .. }));

    assert_eq!(names(&env, "x", 10), vec!["keep"]);
    assert!(env.kasten().check().unwrap().is_empty());
}
