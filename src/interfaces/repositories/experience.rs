use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::experience::{Experience, ExperienceInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxSeekerRepo,
};

const EXPERIENCE_COLUMNS: &str = "id, profile_id, title, employer, country, responsibilities, \
    start_date, end_date, is_current_role, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    async fn create_experience(&self, experience: &ExperienceInsert) -> Result<Experience, AppError>;

    /// Looks up an entry only if it belongs to `profile_id`
    async fn get_experience_for_profile(&self, id: &Uuid, profile_id: &Uuid) -> Result<Option<Experience>, AppError>;

    /// Deletes an entry owned by `profile_id`. Returns `false` when nothing matched.
    async fn delete_experience(&self, id: &Uuid, profile_id: &Uuid) -> Result<bool, AppError>;

    /// All entries of a profile, most recent start date first
    async fn list_experiences_for_profile(&self, profile_id: &Uuid) -> Result<Vec<Experience>, AppError>;
}

#[async_trait]
impl ExperienceRepository for SqlxSeekerRepo {
    async fn create_experience(&self, experience: &ExperienceInsert) -> Result<Experience, AppError> {
        let created = sqlx::query_as::<_, Experience>(&format!(
            r#"
            INSERT INTO experiences (
                profile_id, title, employer, country, responsibilities,
                start_date, end_date, is_current_role, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {EXPERIENCE_COLUMNS}
            "#
        ))
        .bind(experience.profile_id)
        .bind(&experience.title)
        .bind(&experience.employer)
        .bind(&experience.country)
        .bind(&experience.responsibilities)
        .bind(experience.start_date)
        .bind(experience.end_date)
        .bind(experience.is_current_role)
        .bind(experience.created_at)
        .bind(experience.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_experience_for_profile(&self, id: &Uuid, profile_id: &Uuid) -> Result<Option<Experience>, AppError> {
        sqlx::query_as::<_, Experience>(&format!(
            "SELECT {EXPERIENCE_COLUMNS} FROM experiences WHERE id = $1 AND profile_id = $2"
        ))
        .bind(id)
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn delete_experience(&self, id: &Uuid, profile_id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM experiences WHERE id = $1 AND profile_id = $2")
            .bind(id)
            .bind(profile_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_experiences_for_profile(&self, profile_id: &Uuid) -> Result<Vec<Experience>, AppError> {
        sqlx::query_as::<_, Experience>(&format!(
            r#"
            SELECT {EXPERIENCE_COLUMNS}
            FROM experiences
            WHERE profile_id = $1
            ORDER BY start_date DESC, created_at DESC
            "#
        ))
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }
}
