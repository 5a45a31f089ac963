use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::profile::Profile,
    errors::AppError,
    repositories::sqlx_repo::SqlxSeekerRepo,
};

const PROFILE_COLUMNS: &str =
    "id, first_name, last_name, headline, phone, country, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Round-trips a trivial query to confirm the store is reachable
    async fn check_connection(&self) -> Result<(), AppError>;

    async fn get_profile_by_id(&self, id: &Uuid) -> Result<Option<Profile>, AppError>;

    /// Persists every mutable field of an already loaded profile
    async fn update_profile(&self, profile: &Profile) -> Result<Profile, AppError>;

    /// Removes the profile; owned entries go with it through the foreign key cascade.
    /// Returns `false` when no row matched.
    async fn delete_profile(&self, id: &Uuid) -> Result<bool, AppError>;
}

#[async_trait]
impl ProfileRepository for SqlxSeekerRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn get_profile_by_id(&self, id: &Uuid) -> Result<Option<Profile>, AppError> {
        sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn update_profile(&self, profile: &Profile) -> Result<Profile, AppError> {
        let updated = sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles SET
                first_name = $1,
                last_name = $2,
                headline = $3,
                phone = $4,
                country = $5,
                updated_at = NOW()
            WHERE id = $6
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.headline)
        .bind(&profile.phone)
        .bind(&profile.country)
        .bind(profile.id)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| AppError::NotFound("Seeker not found".into()))
    }

    async fn delete_profile(&self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
