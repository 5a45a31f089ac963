use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::education::{Education, EducationInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxSeekerRepo,
};

const EDUCATION_COLUMNS: &str = "id, profile_id, degree, field_of_study, institution, \
    start_date, end_date, is_studying, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EducationRepository: Send + Sync {
    async fn create_education(&self, education: &EducationInsert) -> Result<Education, AppError>;

    /// Looks up an entry only if it belongs to `profile_id`
    async fn get_education_for_profile(&self, id: &Uuid, profile_id: &Uuid) -> Result<Option<Education>, AppError>;

    /// Deletes an entry owned by `profile_id`. Returns `false` when nothing matched.
    async fn delete_education(&self, id: &Uuid, profile_id: &Uuid) -> Result<bool, AppError>;

    /// All entries of a profile, most recent start date first
    async fn list_educations_for_profile(&self, profile_id: &Uuid) -> Result<Vec<Education>, AppError>;
}

#[async_trait]
impl EducationRepository for SqlxSeekerRepo {
    async fn create_education(&self, education: &EducationInsert) -> Result<Education, AppError> {
        let created = sqlx::query_as::<_, Education>(&format!(
            r#"
            INSERT INTO educations (
                profile_id, degree, field_of_study, institution,
                start_date, end_date, is_studying, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {EDUCATION_COLUMNS}
            "#
        ))
        .bind(education.profile_id)
        .bind(&education.degree)
        .bind(&education.field_of_study)
        .bind(&education.institution)
        .bind(education.start_date)
        .bind(education.end_date)
        .bind(education.is_studying)
        .bind(education.created_at)
        .bind(education.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_education_for_profile(&self, id: &Uuid, profile_id: &Uuid) -> Result<Option<Education>, AppError> {
        sqlx::query_as::<_, Education>(&format!(
            "SELECT {EDUCATION_COLUMNS} FROM educations WHERE id = $1 AND profile_id = $2"
        ))
        .bind(id)
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn delete_education(&self, id: &Uuid, profile_id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM educations WHERE id = $1 AND profile_id = $2")
            .bind(id)
            .bind(profile_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_educations_for_profile(&self, profile_id: &Uuid) -> Result<Vec<Education>, AppError> {
        sqlx::query_as::<_, Education>(&format!(
            r#"
            SELECT {EDUCATION_COLUMNS}
            FROM educations
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
