//! Header cache repository CRUD behavior against in-memory `SQLite`.

use std::sync::Arc;

use tweetpress::models::header::HeaderCacheEntry;
use tweetpress::models::profile::ProfileSnapshot;
use tweetpress::persistence::{db, header_repo::HeaderRepo};

fn snapshot(user_id: &str, fingerprint: &str) -> ProfileSnapshot {
    ProfileSnapshot {
        user_id: user_id.to_owned(),
        display_name: "Ann Example".to_owned(),
        handle: "ann".to_owned(),
        photo_fingerprint: fingerprint.to_owned(),
    }
}

#[tokio::test]
async fn get_returns_none_for_unknown_user() {
    let db = db::connect_memory().await.expect("db");
    let repo = HeaderRepo::new(Arc::new(db));

    let result = repo.get("nobody").await.expect("query");
    assert!(result.is_none());
}

#[tokio::test]
async fn upsert_then_get_roundtrips_all_fields() {
    let db = db::connect_memory().await.expect("db");
    let repo = HeaderRepo::new(Arc::new(db));

    let entry = HeaderCacheEntry::new(snapshot("u1", "p1"), vec![1, 2, 3, 4]);
    repo.upsert(&entry).await.expect("upsert");

    let fetched = repo.get("u1").await.expect("query").expect("exists");
    assert_eq!(fetched.snapshot, entry.snapshot);
    assert_eq!(fetched.image_png, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn upsert_replaces_existing_entry() {
    let db = db::connect_memory().await.expect("db");
    let repo = HeaderRepo::new(Arc::new(db));

    repo.upsert(&HeaderCacheEntry::new(snapshot("u1", "p1"), vec![1]))
        .await
        .expect("first upsert");
    repo.upsert(&HeaderCacheEntry::new(snapshot("u1", "p2"), vec![2]))
        .await
        .expect("second upsert");

    let fetched = repo.get("u1").await.expect("query").expect("exists");
    assert_eq!(fetched.snapshot.photo_fingerprint, "p2");
    assert_eq!(fetched.image_png, vec![2]);
}

#[tokio::test]
async fn entries_are_scoped_per_user() {
    let db = db::connect_memory().await.expect("db");
    let repo = HeaderRepo::new(Arc::new(db));

    repo.upsert(&HeaderCacheEntry::new(snapshot("u1", "p1"), vec![1]))
        .await
        .expect("upsert u1");
    repo.upsert(&HeaderCacheEntry::new(snapshot("u2", "p9"), vec![9]))
        .await
        .expect("upsert u2");

    let u1 = repo.get("u1").await.expect("query").expect("exists");
    let u2 = repo.get("u2").await.expect("query").expect("exists");
    assert_eq!(u1.image_png, vec![1]);
    assert_eq!(u2.image_png, vec![9]);
}
