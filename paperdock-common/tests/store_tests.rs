//! Paper store integration tests against an in-memory database

use paperdock_common::db::{init_memory_database, PaperStore};
use paperdock_common::models::PaperRecord;
use paperdock_common::Error;

async fn store() -> PaperStore {
    let pool = init_memory_database()
        .await
        .expect("in-memory database should initialize");
    PaperStore::new(pool)
}

/// Records get distinct second-resolution timestamps so listing order
/// is deterministic: higher `seq` sorts first.
fn record(id: &str, title: &str, tag: &str, seq: u32) -> PaperRecord {
    PaperRecord {
        id: id.to_string(),
        title: title.to_string(),
        abstract_text: format!("Abstract of {}", title),
        authors: vec!["Ada Lovelace".to_string()],
        categories: vec!["cs.LG".to_string()],
        tag: tag.to_string(),
        pdf_url: Some(format!("https://arxiv.org/pdf/{}", id)),
        source_url: Some(format!("https://arxiv.org/e-print/{}", id)),
        github_url: None,
        local_pdf_path: None,
        local_source_path: None,
        local_github_path: None,
        bibtex: Some(format!("@misc{{{}}}", id)),
        date_added: format!("2024-03-01T10:{:02}:{:02}Z", seq / 60, seq % 60),
    }
}

#[tokio::test]
async fn upsert_then_get_round_trips() {
    let store = store().await;
    let mut original = record("2101.12345", "Deep Nets", "ml", 1);
    // Names containing the old join delimiter must survive the codec
    original.authors = vec!["Smith, Jr., John".to_string(), "Doe, Jane".to_string()];
    original.categories = vec!["cs.LG".to_string(), "stat.ML".to_string()];

    store.upsert(&original).await.unwrap();
    let fetched = store.get_by_id("2101.12345").await.unwrap().unwrap();

    assert_eq!(fetched, original);
}

#[tokio::test]
async fn get_missing_id_is_none() {
    let store = store().await;
    assert!(store.get_by_id("2199.00000").await.unwrap().is_none());
}

#[tokio::test]
async fn upsert_same_id_replaces_entirely() {
    let store = store().await;
    let first = record("2101.12345", "Deep Nets", "ml", 1);
    store.upsert(&first).await.unwrap();

    let mut second = record("2101.12345", "Deeper Nets", "nlp", 2);
    second.github_url = Some("https://github.com/example/deeper".to_string());
    store.upsert(&second).await.unwrap();

    assert_eq!(store.count().await.unwrap(), 1);
    let fetched = store.get_by_id("2101.12345").await.unwrap().unwrap();
    assert_eq!(fetched, second);
}

#[tokio::test]
async fn list_page_orders_newest_first() {
    let store = store().await;
    for i in 0..3 {
        store
            .upsert(&record(&format!("2101.0000{}", i), "Paper", "default", i))
            .await
            .unwrap();
    }

    let page = store.list_page(1, 10).await.unwrap();
    assert_eq!(page.total, 3);
    let ids: Vec<&str> = page.items.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["2101.00002", "2101.00001", "2101.00000"]);
}

#[tokio::test]
async fn list_page_slices_25_records() {
    let store = store().await;
    for i in 0..25 {
        store
            .upsert(&record(&format!("2101.{:05}", i), "Paper", "default", i))
            .await
            .unwrap();
    }

    let page3 = store.list_page(3, 10).await.unwrap();
    assert_eq!(page3.items.len(), 5);
    assert_eq!(page3.total, 25);

    // Out-of-range page: empty items, correct total
    let page4 = store.list_page(4, 10).await.unwrap();
    assert!(page4.items.is_empty());
    assert_eq!(page4.total, 25);
}

#[tokio::test]
async fn malformed_page_inputs_clamp() {
    let store = store().await;
    store
        .upsert(&record("2101.00001", "Paper", "default", 1))
        .await
        .unwrap();

    let page = store.list_page(0, -5).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn list_by_tag_is_exact_and_case_sensitive() {
    let store = store().await;
    store
        .upsert(&record("2101.00001", "A", "ml", 1))
        .await
        .unwrap();
    store
        .upsert(&record("2101.00002", "B", "ML", 2))
        .await
        .unwrap();

    let page = store.list_by_tag("ml", 1, 10).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, "2101.00001");
}

#[tokio::test]
async fn search_matches_case_insensitively_with_filtered_total() {
    let store = store().await;
    for i in 0..12 {
        let mut r = record(&format!("2101.{:05}", i), "Quantum Widgets", "default", i);
        r.abstract_text = "A study of QUANTUM effects.".to_string();
        store.upsert(&r).await.unwrap();
    }
    store
        .upsert(&record("2102.00001", "Classical Widgets", "default", 99))
        .await
        .unwrap();

    let page = store
        .search(&["quantum".to_string()], None, 1, 10)
        .await
        .unwrap();
    assert_eq!(page.total, 12);
    assert_eq!(page.items.len(), 10);
    for item in &page.items {
        let haystack = format!(
            "{} {} {} {}",
            item.title,
            item.authors.join(" "),
            item.abstract_text,
            item.id
        )
        .to_lowercase();
        assert!(haystack.contains("quantum"));
    }
}

#[tokio::test]
async fn search_keywords_and_together_across_fields() {
    let store = store().await;
    let mut a = record("2101.00001", "Deep Nets", "ml", 1);
    a.authors = vec!["Grace Hopper".to_string()];
    store.upsert(&a).await.unwrap();

    let mut b = record("2101.00002", "Shallow Nets", "ml", 2);
    b.authors = vec!["Grace Hopper".to_string()];
    store.upsert(&b).await.unwrap();

    // "deep" hits the title, "hopper" hits the authors: both must hold
    let page = store
        .search(&["deep".to_string(), "hopper".to_string()], None, 1, 10)
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, "2101.00001");
}

#[tokio::test]
async fn search_by_id_substring() {
    let store = store().await;
    store
        .upsert(&record("2101.12345", "Untitled", "default", 1))
        .await
        .unwrap();

    let page = store
        .search(&["2101.123".to_string()], None, 1, 10)
        .await
        .unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn search_with_tag_scenario() {
    let store = store().await;
    store
        .upsert(&record("A", "Deep Nets", "ml", 1))
        .await
        .unwrap();
    store
        .upsert(&record("B", "Shallow Nets", "ml", 2))
        .await
        .unwrap();
    store
        .upsert(&record("C", "Deep Parsing", "nlp", 3))
        .await
        .unwrap();

    let page = store
        .search(&["deep".to_string()], Some("ml"), 1, 10)
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, "A");
}

#[tokio::test]
async fn empty_keywords_degenerate_to_listing() {
    let store = store().await;
    store
        .upsert(&record("2101.00001", "Paper", "default", 1))
        .await
        .unwrap();

    let page = store
        .search(&["".to_string(), "   ".to_string()], None, 1, 10)
        .await
        .unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn like_wildcards_in_keywords_match_literally() {
    let store = store().await;
    store
        .upsert(&record("2101.00001", "Scaling to 100x", "default", 1))
        .await
        .unwrap();
    store
        .upsert(&record("2101.00002", "Scaling to 100% accuracy", "default", 2))
        .await
        .unwrap();

    let page = store
        .search(&["100%".to_string()], None, 1, 10)
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, "2101.00002");
}

#[tokio::test]
async fn delete_by_id_is_idempotent() {
    let store = store().await;
    store
        .upsert(&record("2101.00001", "Paper", "default", 1))
        .await
        .unwrap();

    store.delete_by_id("2101.00001").await.unwrap();
    assert_eq!(store.count().await.unwrap(), 0);

    // Deleting again is not an error
    store.delete_by_id("2101.00001").await.unwrap();
}

#[tokio::test]
async fn delete_by_ids_removes_each() {
    let store = store().await;
    for i in 0..3 {
        store
            .upsert(&record(&format!("2101.0000{}", i), "Paper", "default", i))
            .await
            .unwrap();
    }

    store
        .delete_by_ids(&[
            "2101.00000".to_string(),
            "2101.00002".to_string(),
            "2199.99999".to_string(),
        ])
        .await
        .unwrap();

    let page = store.list_page(1, 10).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, "2101.00001");
}

#[tokio::test]
async fn delete_by_absent_tag_is_a_noop() {
    let store = store().await;
    store
        .upsert(&record("2101.00001", "Paper", "ml", 1))
        .await
        .unwrap();

    store.delete_by_tag("x").await.unwrap();
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn delete_by_tag_removes_exact_matches() {
    let store = store().await;
    store
        .upsert(&record("2101.00001", "A", "ml", 1))
        .await
        .unwrap();
    store
        .upsert(&record("2101.00002", "B", "ml", 2))
        .await
        .unwrap();
    store
        .upsert(&record("2101.00003", "C", "nlp", 3))
        .await
        .unwrap();

    store.delete_by_tag("ml").await.unwrap();
    let page = store.list_page(1, 10).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].tag, "nlp");
}

#[tokio::test]
async fn set_tag_rewrites_in_place() {
    let store = store().await;
    store
        .upsert(&record("2101.00001", "Paper", "default", 1))
        .await
        .unwrap();

    let updated = store.set_tag("2101.00001", "ml").await.unwrap();
    assert_eq!(updated.tag, "ml");
    assert_eq!(updated.title, "Paper");
}

#[tokio::test]
async fn set_tag_unknown_id_is_not_found() {
    let store = store().await;
    let err = store.set_tag("2199.00000", "ml").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn set_github_preserves_unset_fields() {
    let store = store().await;
    store
        .upsert(&record("2101.00001", "Paper", "default", 1))
        .await
        .unwrap();

    let updated = store
        .set_github("2101.00001", Some("https://github.com/example/nets"), None)
        .await
        .unwrap();
    assert_eq!(
        updated.github_url.as_deref(),
        Some("https://github.com/example/nets")
    );
    assert!(updated.local_github_path.is_none());

    let updated = store
        .set_github("2101.00001", None, Some("/data/ml/Paper/github"))
        .await
        .unwrap();
    // The earlier URL survives the path-only update
    assert_eq!(
        updated.github_url.as_deref(),
        Some("https://github.com/example/nets")
    );
    assert_eq!(
        updated.local_github_path.as_deref(),
        Some("/data/ml/Paper/github")
    );
}

#[tokio::test]
async fn clear_wipes_the_store() {
    let store = store().await;
    for i in 0..4 {
        store
            .upsert(&record(&format!("2101.0000{}", i), "Paper", "default", i))
            .await
            .unwrap();
    }

    store.clear().await.unwrap();
    assert_eq!(store.count().await.unwrap(), 0);
}
