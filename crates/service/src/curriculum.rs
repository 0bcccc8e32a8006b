//! The curriculum service: sequenced course/video operations.
//!
//! Invariant maintained across every operation: a course's membership
//! positions are exactly `1..=N`. Each mutation runs under the course's
//! lock and inside one transaction, so a failure at any step rolls back
//! to the previous valid state and concurrent editors of the same course
//! never interleave.

use academy_core::error::CoreError;
use academy_core::identity::Actor;
use academy_core::sequencing::{neighbor_position, MoveDirection};
use academy_core::types::DbId;
use academy_core::video_search::VideoCandidate;
use academy_db::models::course::{Course, CreateCourse};
use academy_db::models::membership::{CourseVideo, Membership};
use academy_db::models::user::{CreateUser, User};
use academy_db::models::video::CreateVideo;
use academy_db::repositories::{CourseRepo, MembershipRepo, UserRepo, VideoRepo};
use sqlx::SqlitePool;

use crate::auth::require_creator;
use crate::config::Settings;
use crate::error::{unique_violation, ServiceError, ServiceResult};
use crate::inputs::{check, NewCourse, NewUser};
use crate::locks::CourseLocks;

/// The operations surface consumed by a request-handling frontend.
pub struct CurriculumService {
    pool: SqlitePool,
    locks: CourseLocks,
}

impl CurriculumService {
    /// Wrap an existing pool (tests, embedding applications).
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            locks: CourseLocks::default(),
        }
    }

    /// Open the configured database, apply migrations, and verify
    /// connectivity.
    pub async fn connect(settings: &Settings) -> ServiceResult<Self> {
        let pool = academy_db::create_pool(&settings.database_url).await?;
        academy_db::run_migrations(&pool).await?;
        academy_db::health_check(&pool).await?;
        tracing::info!(database_url = %settings.database_url, "curriculum service connected");
        Ok(Self::new(pool))
    }

    /// The underlying pool, for read-only auxiliary queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ── Users ────────────────────────────────────────────────────────

    /// Create a user. Credentials are not handled here; the auth
    /// collaborator owns those.
    pub async fn create_user(&self, input: &NewUser) -> ServiceResult<User> {
        check(input)?;

        let create = CreateUser {
            username: input.username.clone(),
            email: input.email.clone(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            image_url: input.image_url.clone(),
        };

        match UserRepo::create(&self.pool, &create).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, username = %user.username, "user created");
                Ok(user)
            }
            Err(err) => match unique_violation(&err) {
                Some(_) => {
                    Err(CoreError::Conflict("username or e-mail already in use".into()).into())
                }
                None => Err(err.into()),
            },
        }
    }

    // ── Course registry ──────────────────────────────────────────────

    /// Create a course owned by the acting user.
    ///
    /// Fails with `DuplicateTitle` when the creator already has a course
    /// with this exact title; the unique index makes the check atomic
    /// with the insert, so concurrent submissions cannot both win.
    pub async fn create_course(&self, actor: Actor, input: &NewCourse) -> ServiceResult<Course> {
        let creator_id = actor.user_id().ok_or_else(|| {
            CoreError::Unauthorized("authentication required to create a course".into())
        })?;
        check(input)?;

        UserRepo::find_by_id(&self.pool, creator_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "User",
                id: creator_id,
            })?;

        let create = CreateCourse {
            creator_id,
            title: input.title.clone(),
            description: input.description.clone(),
        };

        match CourseRepo::create(&self.pool, &create).await {
            Ok(course) => {
                tracing::info!(course_id = course.id, creator_id, title = %course.title, "course created");
                Ok(course)
            }
            Err(err) => match unique_violation(&err) {
                Some(_) => Err(CoreError::DuplicateTitle {
                    creator_id,
                    title: input.title.clone(),
                }
                .into()),
                None => Err(err.into()),
            },
        }
    }

    /// A creator's courses, title ascending.
    pub async fn courses_by_creator(&self, creator_id: DbId) -> ServiceResult<Vec<Course>> {
        Ok(CourseRepo::list_by_creator(&self.pool, creator_id).await?)
    }

    /// Case-insensitive substring search on course titles. An empty
    /// phrase returns all courses.
    pub async fn search_courses(&self, phrase: &str) -> ServiceResult<Vec<Course>> {
        Ok(CourseRepo::search(&self.pool, phrase).await?)
    }

    // ── Sequencing engine ────────────────────────────────────────────

    /// Add a video to the end of a course's sequence.
    ///
    /// The video is resolved through the deduplicating catalog: the first
    /// course to reference an external id creates the row, later ones
    /// reuse it. Adding a video the course already contains fails with
    /// `AlreadyMember` and changes nothing.
    pub async fn add_video_to_course(
        &self,
        course_id: DbId,
        actor: Actor,
        candidate: VideoCandidate,
    ) -> ServiceResult<Membership> {
        let course = self.get_course(course_id).await?;
        require_creator(&course, actor)?;

        let _guard = self.locks.acquire(course_id).await;
        let mut tx = self.pool.begin().await?;

        let video = VideoRepo::find_or_create(&mut tx, &CreateVideo::from(candidate)).await?;

        if MembershipRepo::find_by_course_and_video(&mut tx, course_id, video.id)
            .await?
            .is_some()
        {
            return Err(CoreError::AlreadyMember {
                course_id,
                video_id: video.id,
            }
            .into());
        }

        let membership = match MembershipRepo::append(&mut tx, course_id, video.id).await {
            Ok(membership) => membership,
            Err(err) => {
                return Err(match unique_violation(&err) {
                    // A concurrent add slipped in between check and insert.
                    Some(msg) if msg.contains("video_id") => CoreError::AlreadyMember {
                        course_id,
                        video_id: video.id,
                    }
                    .into(),
                    Some(msg) => CoreError::Conflict(msg).into(),
                    None => ServiceError::Database(err),
                });
            }
        };

        CourseRepo::touch(&mut tx, course_id).await?;
        tx.commit().await?;

        tracing::info!(
            course_id,
            video_id = video.id,
            position = membership.position,
            "video appended to course"
        );
        Ok(membership)
    }

    /// Swap a membership with its neighbor one position up or down.
    ///
    /// Moving the first entry up or the last entry down fails with
    /// `InvalidMove`; the sequence is untouched either way.
    pub async fn move_video(
        &self,
        course_id: DbId,
        actor: Actor,
        membership_id: DbId,
        direction: MoveDirection,
    ) -> ServiceResult<()> {
        let course = self.get_course(course_id).await?;
        require_creator(&course, actor)?;

        let _guard = self.locks.acquire(course_id).await;
        let mut tx = self.pool.begin().await?;

        let target = MembershipRepo::find_by_id(&mut tx, membership_id)
            .await?
            .filter(|m| m.course_id == course_id)
            .ok_or(CoreError::NotFound {
                entity: "Membership",
                id: membership_id,
            })?;

        let neighbor = MembershipRepo::find_by_course_and_position(
            &mut tx,
            course_id,
            neighbor_position(target.position, direction),
        )
        .await?
        .ok_or(CoreError::InvalidMove {
            membership_id,
            direction,
        })?;

        MembershipRepo::swap_positions(&mut tx, &target, &neighbor).await?;
        CourseRepo::touch(&mut tx, course_id).await?;
        tx.commit().await?;

        tracing::info!(
            course_id,
            membership_id,
            %direction,
            from = target.position,
            to = neighbor.position,
            "membership moved"
        );
        Ok(())
    }

    /// Remove a video from a course and close the gap in the sequence.
    ///
    /// A video referenced only by this course leaves the catalog
    /// entirely; one shared with other courses keeps its row and its
    /// other placements.
    pub async fn remove_video(
        &self,
        course_id: DbId,
        actor: Actor,
        video_id: DbId,
    ) -> ServiceResult<()> {
        let course = self.get_course(course_id).await?;
        require_creator(&course, actor)?;

        let _guard = self.locks.acquire(course_id).await;
        let mut tx = self.pool.begin().await?;

        let membership = MembershipRepo::find_by_course_and_video(&mut tx, course_id, video_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Video",
                id: video_id,
            })?;

        let orphaned = VideoRepo::delete_if_orphaned(&mut tx, video_id, membership.id).await?;
        MembershipRepo::compact_after_removal(&mut tx, course_id, membership.position).await?;
        CourseRepo::touch(&mut tx, course_id).await?;
        tx.commit().await?;

        tracing::info!(course_id, video_id, orphaned, "video removed from course");
        Ok(())
    }

    /// A course's videos in sequence order: the canonical read for
    /// rendering and editing.
    pub async fn list_course_videos(&self, course_id: DbId) -> ServiceResult<Vec<CourseVideo>> {
        self.get_course(course_id).await?;
        Ok(MembershipRepo::list_course_videos(&self.pool, course_id).await?)
    }

    async fn get_course(&self, course_id: DbId) -> ServiceResult<Course> {
        CourseRepo::find_by_id(&self.pool, course_id)
            .await?
            .ok_or_else(|| {
                ServiceError::Domain(CoreError::NotFound {
                    entity: "Course",
                    id: course_id,
                })
            })
    }
}
