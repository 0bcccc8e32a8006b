//! Repository for the `courses` table.

use academy_core::types::DbId;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::models::course::{Course, CreateCourse};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, creator_id, title, description, created_at, updated_at";

/// Provides CRUD operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course, returning the created row.
    ///
    /// The `uq_courses_creator_title` index makes the title-collision
    /// check atomic with the insert; callers translate that violation.
    pub async fn create(pool: &SqlitePool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (creator_id, title, description)
             VALUES (?1, ?2, ?3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(input.creator_id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a course by its internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = ?1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a creator's courses, title ascending.
    pub async fn list_by_creator(
        pool: &SqlitePool,
        creator_id: DbId,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses
             WHERE creator_id = ?1
             ORDER BY title ASC"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(creator_id)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search on title, title ascending.
    ///
    /// An empty phrase matches every course.
    pub async fn search(pool: &SqlitePool, phrase: &str) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses
             WHERE title LIKE '%' || ?1 || '%'
             ORDER BY title ASC"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(phrase)
            .fetch_all(pool)
            .await
    }

    /// Bump `updated_at`, recording that the course's curriculum changed.
    pub async fn touch(tx: &mut Transaction<'_, Sqlite>, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE courses SET updated_at = CURRENT_TIMESTAMP WHERE id = ?1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
