//! Shared fixtures for the service integration tests.

#![allow(dead_code)]

use academy_core::identity::Actor;
use academy_core::types::DbId;
use academy_core::video_search::VideoCandidate;
use academy_db::models::membership::CourseVideo;
use academy_service::inputs::{NewCourse, NewUser};
use academy_service::CurriculumService;

/// Install a test subscriber once so `RUST_LOG` surfaces service logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

pub fn candidate(external_id: &str, title: &str) -> VideoCandidate {
    VideoCandidate {
        external_id: external_id.to_string(),
        title: title.to_string(),
        description: Some(format!("Description of {title}")),
        channel_id: "UC29ju8bIPH5as8OGnQzwJyA".to_string(),
        channel_title: Some("Test Channel".to_string()),
        thumbnail_url: None,
    }
}

pub async fn seed_user(service: &CurriculumService, username: &str) -> DbId {
    service
        .create_user(&NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            image_url: None,
        })
        .await
        .unwrap()
        .id
}

pub async fn seed_course(service: &CurriculumService, actor: Actor, title: &str) -> DbId {
    service
        .create_course(
            actor,
            &NewCourse {
                title: title.to_string(),
                description: None,
            },
        )
        .await
        .unwrap()
        .id
}

pub async fn listing(service: &CurriculumService, course_id: DbId) -> Vec<CourseVideo> {
    service.list_course_videos(course_id).await.unwrap()
}

pub fn positions(entries: &[CourseVideo]) -> Vec<i64> {
    entries.iter().map(|e| e.position).collect()
}

pub fn external_ids(entries: &[CourseVideo]) -> Vec<String> {
    entries.iter().map(|e| e.external_id.clone()).collect()
}

pub async fn video_count(service: &CurriculumService) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM videos")
        .fetch_one(service.pool())
        .await
        .unwrap()
}

pub async fn membership_count(service: &CurriculumService) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM memberships")
        .fetch_one(service.pool())
        .await
        .unwrap()
}
