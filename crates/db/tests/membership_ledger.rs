//! Integration tests for the membership ledger and video catalog:
//! append positions, unique-index enforcement, the sentinel swap, gap
//! compaction, and orphan cascade behavior.

use academy_core::sequencing::is_contiguous;
use academy_db::models::course::CreateCourse;
use academy_db::models::user::CreateUser;
use academy_db::models::video::CreateVideo;
use academy_db::repositories::{CourseRepo, MembershipRepo, UserRepo, VideoRepo};
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        image_url: None,
    }
}

fn new_video(external_id: &str) -> CreateVideo {
    CreateVideo {
        external_id: external_id.to_string(),
        title: format!("Video {external_id}"),
        description: None,
        channel_id: "UC29ju8bIPH5as8OGnQzwJyA".to_string(),
        channel_title: Some("Test Channel".to_string()),
        thumbnail_url: None,
    }
}

async fn seed_course(pool: &SqlitePool, username: &str, title: &str) -> i64 {
    let user = UserRepo::create(pool, &new_user(username)).await.unwrap();
    let course = CourseRepo::create(
        pool,
        &CreateCourse {
            creator_id: user.id,
            title: title.to_string(),
            description: None,
        },
    )
    .await
    .unwrap();
    course.id
}

/// Resolve the video and append it, committing immediately.
/// Returns (video id, membership id).
async fn add_video(pool: &SqlitePool, course_id: i64, external_id: &str) -> (i64, i64) {
    let mut tx = pool.begin().await.unwrap();
    let video = VideoRepo::find_or_create(&mut tx, &new_video(external_id))
        .await
        .unwrap();
    let membership = MembershipRepo::append(&mut tx, course_id, video.id)
        .await
        .unwrap();
    tx.commit().await.unwrap();
    (video.id, membership.id)
}

async fn positions(pool: &SqlitePool, course_id: i64) -> Vec<i64> {
    MembershipRepo::list_for_course(pool, course_id)
        .await
        .unwrap()
        .iter()
        .map(|m| m.position)
        .collect()
}

// ---------------------------------------------------------------------------
// Append
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_append_assigns_sequential_positions(pool: SqlitePool) {
    let course_id = seed_course(&pool, "allison", "Sequencing 101").await;

    for external_id in ["a1", "b2", "c3"] {
        add_video(&pool, course_id, external_id).await;
    }

    assert_eq!(positions(&pool, course_id).await, vec![1, 2, 3]);

    let mut tx = pool.begin().await.unwrap();
    assert_eq!(
        MembershipRepo::count_for_course(&mut tx, course_id).await.unwrap(),
        3
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_membership_hits_unique_index(pool: SqlitePool) {
    let course_id = seed_course(&pool, "allison", "Sequencing 101").await;
    let (video_id, _) = add_video(&pool, course_id, "a1").await;

    let mut tx = pool.begin().await.unwrap();
    let err = MembershipRepo::append(&mut tx, course_id, video_id)
        .await
        .unwrap_err();
    drop(tx);

    match err {
        sqlx::Error::Database(db_err) => assert!(db_err.is_unique_violation()),
        other => panic!("expected a unique violation, got {other}"),
    }

    // The failed transaction left the ledger untouched.
    assert_eq!(positions(&pool, course_id).await, vec![1]);
}

// ---------------------------------------------------------------------------
// Video catalog dedup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_or_create_reuses_existing_row(pool: SqlitePool) {
    let mut tx = pool.begin().await.unwrap();
    let first = VideoRepo::find_or_create(&mut tx, &new_video("a1"))
        .await
        .unwrap();

    // Second resolution with different metadata: first writer wins.
    let mut altered = new_video("a1");
    altered.title = "Renamed upstream".to_string();
    let second = VideoRepo::find_or_create(&mut tx, &altered).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.title, "Video a1");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM videos")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

// ---------------------------------------------------------------------------
// Swap
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_swap_exchanges_exactly_two_rows(pool: SqlitePool) {
    let course_id = seed_course(&pool, "allison", "Sequencing 101").await;
    let (v1, _) = add_video(&pool, course_id, "a1").await;
    let (v2, _) = add_video(&pool, course_id, "b2").await;
    let (v3, _) = add_video(&pool, course_id, "c3").await;

    let mut tx = pool.begin().await.unwrap();
    let target = MembershipRepo::find_by_course_and_position(&mut tx, course_id, 1)
        .await
        .unwrap()
        .unwrap();
    let neighbor = MembershipRepo::find_by_course_and_position(&mut tx, course_id, 2)
        .await
        .unwrap()
        .unwrap();
    MembershipRepo::swap_positions(&mut tx, &target, &neighbor)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let memberships = MembershipRepo::list_for_course(&pool, course_id)
        .await
        .unwrap();
    let by_position: Vec<(i64, i64)> = memberships.iter().map(|m| (m.position, m.video_id)).collect();
    assert_eq!(by_position, vec![(1, v2), (2, v1), (3, v3)]);
    assert!(is_contiguous(&positions(&pool, course_id).await));
}

// ---------------------------------------------------------------------------
// Compaction
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_compaction_closes_the_gap_in_order(pool: SqlitePool) {
    let course_id = seed_course(&pool, "allison", "Sequencing 101").await;
    let mut video_ids = Vec::new();
    for external_id in ["a1", "b2", "c3", "d4"] {
        video_ids.push(add_video(&pool, course_id, external_id).await.0);
    }

    let mut tx = pool.begin().await.unwrap();
    let removed = MembershipRepo::find_by_course_and_position(&mut tx, course_id, 2)
        .await
        .unwrap()
        .unwrap();
    MembershipRepo::delete_by_id(&mut tx, removed.id).await.unwrap();
    let shifted = MembershipRepo::compact_after_removal(&mut tx, course_id, removed.position)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    assert_eq!(shifted, 2);

    let memberships = MembershipRepo::list_for_course(&pool, course_id)
        .await
        .unwrap();
    let order: Vec<(i64, i64)> = memberships.iter().map(|m| (m.position, m.video_id)).collect();
    assert_eq!(
        order,
        vec![(1, video_ids[0]), (2, video_ids[2]), (3, video_ids[3])]
    );
}

// ---------------------------------------------------------------------------
// Orphan rule
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_if_orphaned_takes_both_branches(pool: SqlitePool) {
    let course_a = seed_course(&pool, "allison", "Course A").await;
    let course_b = seed_course(&pool, "jackson", "Course B").await;
    let (video_id, membership_a) = add_video(&pool, course_a, "shared").await;
    let (_, membership_b) = add_video(&pool, course_b, "shared").await;

    // Two references: only the membership goes.
    let mut tx = pool.begin().await.unwrap();
    let deleted = VideoRepo::delete_if_orphaned(&mut tx, video_id, membership_a)
        .await
        .unwrap();
    tx.commit().await.unwrap();
    assert!(!deleted);
    assert!(positions(&pool, course_a).await.is_empty());
    assert_eq!(positions(&pool, course_b).await, vec![1]);
    assert!(VideoRepo::find_by_id(&pool, video_id).await.unwrap().is_some());

    // Last reference: the video row goes, the membership cascades.
    let mut tx = pool.begin().await.unwrap();
    let deleted = VideoRepo::delete_if_orphaned(&mut tx, video_id, membership_b)
        .await
        .unwrap();
    tx.commit().await.unwrap();
    assert!(deleted);
    assert!(positions(&pool, course_b).await.is_empty());
    assert!(VideoRepo::find_by_id(&pool, video_id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Cascade behavior
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_video_delete_cascades_memberships(pool: SqlitePool) {
    let course_a = seed_course(&pool, "allison", "Course A").await;
    let course_b = seed_course(&pool, "jackson", "Course B").await;
    let (shared, _) = add_video(&pool, course_a, "a1").await;

    let mut tx = pool.begin().await.unwrap();
    let video = VideoRepo::find_or_create(&mut tx, &new_video("a1"))
        .await
        .unwrap();
    assert_eq!(video.id, shared);
    MembershipRepo::append(&mut tx, course_b, shared).await.unwrap();
    assert_eq!(
        MembershipRepo::count_for_video(&mut tx, shared).await.unwrap(),
        2
    );
    tx.commit().await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    assert!(VideoRepo::delete(&mut tx, shared).await.unwrap());
    tx.commit().await.unwrap();

    assert!(positions(&pool, course_a).await.is_empty());
    assert!(positions(&pool, course_b).await.is_empty());
}
