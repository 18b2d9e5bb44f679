use domain::{assemble, Error, Role, SortMode};
use std::time::Duration;
use storage::Db;

async fn fresh_db() -> Db {
    let db = Db::new("sqlite::memory:").await.expect("in-memory db");
    db.upsert_post("post-1", "Hello World", "hello-world")
        .await
        .expect("seed post");
    db
}

// Timestamps come from the wall clock; a short pause keeps ordering
// assertions deterministic.
async fn tick() {
    tokio::time::sleep(Duration::from_millis(5)).await;
}

#[tokio::test]
async fn scenario_a_reply_chain_stops_at_max_depth() {
    let db = fresh_db().await;

    let c1 = db
        .create_comment("post-1", "alice", "root", None)
        .await
        .unwrap();
    assert_eq!(c1.depth, 0);
    assert!(c1.path.is_empty());
    assert_eq!(c1.parent_id, None);

    let c2 = db
        .create_comment("post-1", "bob", "first reply", Some(&c1.id))
        .await
        .unwrap();
    assert_eq!(c2.depth, 1);
    assert_eq!(c2.path, vec![c1.id.clone()]);

    let c3 = db
        .create_comment("post-1", "carol", "second reply", Some(&c2.id))
        .await
        .unwrap();
    assert_eq!(c3.depth, 2);
    assert_eq!(c3.path, vec![c1.id.clone(), c2.id.clone()]);
    assert!(!c3.can_reply());

    let err = db
        .create_comment("post-1", "dave", "too deep", Some(&c3.id))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DepthExceeded));
}

#[tokio::test]
async fn depth_always_matches_path_length() {
    let db = fresh_db().await;
    let c1 = db.create_comment("post-1", "a", "r", None).await.unwrap();
    let c2 = db
        .create_comment("post-1", "b", "x", Some(&c1.id))
        .await
        .unwrap();
    let c3 = db
        .create_comment("post-1", "c", "y", Some(&c2.id))
        .await
        .unwrap();

    for c in [&c1, &c2, &c3] {
        let stored = db.get_comment(&c.id).await.unwrap().unwrap();
        assert_eq!(stored.depth, stored.path.len() as i64);
        assert!(stored.depth >= 0 && stored.depth <= 2);
    }
}

#[tokio::test]
async fn create_rejects_bad_content_and_missing_references() {
    let db = fresh_db().await;

    assert!(matches!(
        db.create_comment("post-1", "alice", "   ", None).await,
        Err(Error::Validation(_))
    ));
    assert!(matches!(
        db.create_comment("post-1", "alice", &"x".repeat(1001), None)
            .await,
        Err(Error::Validation(_))
    ));
    // 1000 code points, even multi-byte ones, are fine.
    db.create_comment("post-1", "alice", &"é".repeat(1000), None)
        .await
        .unwrap();

    assert!(matches!(
        db.create_comment("nope", "alice", "hi", None).await,
        Err(Error::NotFound("post"))
    ));
    assert!(matches!(
        db.create_comment("post-1", "alice", "hi", Some("missing"))
            .await,
        Err(Error::NotFound("parent comment"))
    ));

    db.upsert_post("post-2", "Other", "other").await.unwrap();
    let foreign = db.create_comment("post-2", "bob", "hi", None).await.unwrap();
    assert!(matches!(
        db.create_comment("post-1", "alice", "hi", Some(&foreign.id))
            .await,
        Err(Error::Validation(_))
    ));
}

#[tokio::test]
async fn edit_is_owner_only_and_rejects_tombstones() {
    let db = fresh_db().await;
    let c = db
        .create_comment("post-1", "alice", "original", None)
        .await
        .unwrap();

    assert!(matches!(
        db.edit_comment(&c.id, "bob", "hijacked").await,
        Err(Error::Forbidden)
    ));
    // Moderators delete, they do not rewrite other people's words.
    assert!(matches!(
        db.edit_comment(&c.id, "mod", "rewritten").await,
        Err(Error::Forbidden)
    ));

    tick().await;
    let edited = db.edit_comment(&c.id, "alice", "fixed typo").await.unwrap();
    assert!(edited.is_edited);
    assert_eq!(edited.content, "fixed typo");
    assert!(edited.edited_at.unwrap() >= edited.created_at);

    db.soft_delete_comment(&c.id, "alice", Role::User)
        .await
        .unwrap();
    assert!(matches!(
        db.edit_comment(&c.id, "alice", "too late").await,
        Err(Error::NotFound("comment"))
    ));
}

#[tokio::test]
async fn soft_delete_tombstones_content_but_preserves_descendants() {
    let db = fresh_db().await;
    let root = db
        .create_comment("post-1", "alice", "root", None)
        .await
        .unwrap();
    let child = db
        .create_comment("post-1", "bob", "child", Some(&root.id))
        .await
        .unwrap();
    let grandchild = db
        .create_comment("post-1", "carol", "grandchild", Some(&child.id))
        .await
        .unwrap();

    assert!(matches!(
        db.soft_delete_comment(&root.id, "mallory", Role::User).await,
        Err(Error::Forbidden)
    ));

    db.soft_delete_comment(&root.id, "moderator-1", Role::Moderator)
        .await
        .unwrap();

    let deleted = db.get_comment(&root.id).await.unwrap().unwrap();
    assert!(deleted.is_deleted);
    assert_eq!(deleted.content, domain::TOMBSTONE);
    assert!(deleted.deleted_at.is_some());

    let descendants = db.get_descendants(&root.id).await.unwrap();
    assert_eq!(descendants.len(), 2);
    for d in &descendants {
        assert!(!d.is_deleted);
    }
    let stored_child = db.get_comment(&child.id).await.unwrap().unwrap();
    assert_eq!(stored_child.path, vec![root.id.clone()]);
    assert_eq!(stored_child.parent_id, Some(root.id.clone()));
    let stored_grandchild = db.get_comment(&grandchild.id).await.unwrap().unwrap();
    assert_eq!(stored_grandchild.depth, 2);
}

#[tokio::test]
async fn root_listing_honors_sort_modes() {
    let db = fresh_db().await;
    let oldest = db.create_comment("post-1", "a", "one", None).await.unwrap();
    tick().await;
    let middle = db.create_comment("post-1", "b", "two", None).await.unwrap();
    tick().await;
    let newest = db.create_comment("post-1", "c", "three", None).await.unwrap();

    // Popular: 5 likes on the oldest, 2 on the other two.
    for _ in 0..5 {
        db.increment_likes(&oldest.id).await.unwrap();
    }
    for _ in 0..2 {
        db.increment_likes(&middle.id).await.unwrap();
        db.increment_likes(&newest.id).await.unwrap();
    }

    let page = db
        .list_root_comments("post-1", 1, 10, SortMode::Newest)
        .await
        .unwrap();
    let ids: Vec<&str> = page.items.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec![newest.id.as_str(), middle.id.as_str(), oldest.id.as_str()]);

    let page = db
        .list_root_comments("post-1", 1, 10, SortMode::Oldest)
        .await
        .unwrap();
    let ids: Vec<&str> = page.items.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec![oldest.id.as_str(), middle.id.as_str(), newest.id.as_str()]);

    // Likes descending, tie between middle/newest broken by created_at desc.
    let page = db
        .list_root_comments("post-1", 1, 10, SortMode::Popular)
        .await
        .unwrap();
    let ids: Vec<&str> = page.items.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec![oldest.id.as_str(), newest.id.as_str(), middle.id.as_str()]);
}

#[tokio::test]
async fn root_listing_paginates_and_skips_replies() {
    let db = fresh_db().await;
    let mut roots = Vec::new();
    for i in 0..5 {
        let c = db
            .create_comment("post-1", "alice", &format!("root {}", i), None)
            .await
            .unwrap();
        roots.push(c);
    }
    // A reply must never show up in the root listing.
    db.create_comment("post-1", "bob", "reply", Some(&roots[0].id))
        .await
        .unwrap();

    let page1 = db
        .list_root_comments("post-1", 1, 2, SortMode::Oldest)
        .await
        .unwrap();
    assert_eq!(page1.items.len(), 2);
    assert_eq!(page1.meta.total, 5);
    assert_eq!(page1.meta.total_pages, 3);
    assert!(page1.meta.has_next);
    assert!(!page1.meta.has_prev);

    let page3 = db
        .list_root_comments("post-1", 3, 2, SortMode::Oldest)
        .await
        .unwrap();
    assert_eq!(page3.items.len(), 1);
    assert!(!page3.meta.has_next);
    assert!(page3.meta.has_prev);
}

#[tokio::test]
async fn batch_descendants_feed_the_assembler() {
    let db = fresh_db().await;
    let r1 = db.create_comment("post-1", "a", "r1", None).await.unwrap();
    let r2 = db.create_comment("post-1", "b", "r2", None).await.unwrap();
    let r1c = db
        .create_comment("post-1", "c", "r1 child", Some(&r1.id))
        .await
        .unwrap();
    let r1cc = db
        .create_comment("post-1", "d", "r1 grandchild", Some(&r1c.id))
        .await
        .unwrap();
    db.create_comment("post-1", "e", "r2 child", Some(&r2.id))
        .await
        .unwrap();

    let batch = db
        .list_descendants_of_roots("post-1", &[r1.id.clone()])
        .await
        .unwrap();
    assert_eq!(batch.len(), 2, "only r1's subtree");

    let tree = assemble(vec![r1.clone()], batch, None);
    assert_eq!(tree.len(), 1);
    assert!(tree[0].has_replies);
    assert_eq!(tree[0].replies[0].comment.id, r1c.id);
    assert_eq!(tree[0].replies[0].replies[0].comment.id, r1cc.id);
}

#[tokio::test]
async fn like_counters_are_clamped_and_checked() {
    let db = fresh_db().await;
    let c = db.create_comment("post-1", "a", "hi", None).await.unwrap();

    db.increment_likes(&c.id).await.unwrap();
    db.increment_likes(&c.id).await.unwrap();
    db.decrement_likes(&c.id).await.unwrap();
    db.decrement_likes(&c.id).await.unwrap();
    // Underflow attempt: stays at zero.
    db.decrement_likes(&c.id).await.unwrap();

    let stored = db.get_comment(&c.id).await.unwrap().unwrap();
    assert_eq!(stored.likes_count, 0);

    assert!(matches!(
        db.increment_likes("missing").await,
        Err(Error::NotFound("comment"))
    ));
    assert!(matches!(
        db.decrement_likes("missing").await,
        Err(Error::NotFound("comment"))
    ));
}
