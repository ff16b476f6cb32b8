use super::models::{Region, SessionStore};
use crate::schemas::Chunk;

fn chunk(text: &str) -> Chunk {
    Chunk {
        id: None,
        text: text.to_string(),
        source: "wiki".to_string(),
        embedding_similarity_score: Some(0.9),
        reranking_score: None,
        trigram_similarity_score: None,
    }
}

#[test]
fn batches_accumulate_in_arrival_order() {
    let mut store = SessionStore::new();
    let id = store.begin(Region::List, "cats");

    store.append(Some(id), vec![chunk("first"), chunk("second")]);
    store.append(Some(id), vec![chunk("third")]);

    let session = store.session(Region::List).unwrap();
    let texts: Vec<&str> = session.chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, ["first", "second", "third"]);
}

#[test]
fn untagged_batches_route_to_the_active_session() {
    let mut store = SessionStore::new();
    store.begin(Region::Column(2), "revenue");

    let region = store.append(None, vec![chunk("acme")]);

    assert_eq!(region, Some(Region::Column(2)));
    assert_eq!(store.session(Region::Column(2)).unwrap().chunks.len(), 1);
}

#[test]
fn new_query_resets_the_region_before_any_batch() {
    let mut store = SessionStore::new();
    let first = store.begin(Region::List, "cats");
    store.append(Some(first), vec![chunk("old")]);

    store.begin(Region::List, "dogs");

    let session = store.session(Region::List).unwrap();
    assert_eq!(session.query, "dogs");
    assert!(session.chunks.is_empty());
}

#[test]
fn stale_batches_are_dropped() {
    let mut store = SessionStore::new();
    let first = store.begin(Region::Column(0), "apples");
    store.begin(Region::Column(1), "bananas");

    // Results for the superseded column-0 query arrive late.
    let region = store.append(Some(first), vec![chunk("late")]);

    assert_eq!(region, None);
    assert!(store.session(Region::Column(0)).unwrap().chunks.is_empty());
}

#[test]
fn a_later_query_does_not_clear_other_columns() {
    let mut store = SessionStore::new();
    let first = store.begin(Region::Column(0), "apples");
    store.append(Some(first), vec![chunk("fruit")]);

    store.begin(Region::Column(3), "sprockets");

    assert_eq!(store.session(Region::Column(0)).unwrap().chunks.len(), 1);
    assert!(store.session(Region::Column(3)).unwrap().chunks.is_empty());
}

#[test]
fn complete_sets_summary_and_finishes_the_session() {
    let mut store = SessionStore::new();
    let id = store.begin(Region::List, "cats");

    let region = store.complete(id, "cats are mammals".to_string(), vec![chunk("a")]);

    assert_eq!(region, Some(Region::List));
    let session = store.session(Region::List).unwrap();
    assert_eq!(session.summary.as_deref(), Some("cats are mammals"));
    assert_eq!(store.active_region(), None);

    // Anything arriving after completion is stale.
    assert_eq!(store.append(Some(id), vec![chunk("late")]), None);
}

#[test]
fn fail_clears_the_list_but_preserves_grid_columns() {
    let mut store = SessionStore::new();
    let id = store.begin(Region::List, "cats");
    store.append(Some(id), vec![chunk("a")]);
    assert_eq!(store.fail(), Some(Region::List));
    assert!(store.session(Region::List).unwrap().chunks.is_empty());

    let id = store.begin(Region::Column(4), "cats");
    store.append(Some(id), vec![chunk("a")]);
    assert_eq!(store.fail(), Some(Region::Column(4)));
    assert_eq!(store.session(Region::Column(4)).unwrap().chunks.len(), 1);
    assert_eq!(store.active_region(), None);
}

#[test]
fn abandon_active_keeps_rendered_results() {
    let mut store = SessionStore::new();
    let id = store.begin(Region::List, "cats");
    store.append(Some(id), vec![chunk("a")]);

    store.abandon_active();

    assert_eq!(store.active_region(), None);
    assert_eq!(store.session(Region::List).unwrap().chunks.len(), 1);
    assert_eq!(store.append(Some(id), vec![chunk("late")]), None);
}

#[test]
fn append_without_any_session_is_ignored() {
    let mut store = SessionStore::new();
    assert_eq!(store.append(None, vec![chunk("orphan")]), None);
    assert_eq!(store.append(Some(99), vec![chunk("orphan")]), None);
}
