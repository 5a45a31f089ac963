use uuid::Uuid;
use validator::Validate;

use crate::{
    cv::{render_cv, DocumentSink},
    entities::{
        education::{EducationCreatedResponse, NewEducation},
        experience::{ExperienceCreatedResponse, NewExperience},
        profile::{Profile, SeekerProfile, UpdateProfileRequest},
        response::StatusMessage,
    },
    errors::AppError,
    pdf::document::PdfDocument,
    repositories::{
        education::EducationRepository,
        experience::ExperienceRepository,
        profile::ProfileRepository,
    },
};

fn seeker_not_found() -> AppError {
    AppError::NotFound("Seeker not found".to_string())
}

pub struct SeekerHandler<P, E, X>
where
    P: ProfileRepository,
    E: EducationRepository,
    X: ExperienceRepository,
{
    pub profile_repo: P,
    pub education_repo: E,
    pub experience_repo: X,
}

impl<P, E, X> SeekerHandler<P, E, X>
where
    P: ProfileRepository,
    E: EducationRepository,
    X: ExperienceRepository,
{
    pub fn new(profile_repo: P, education_repo: E, experience_repo: X) -> Self {
        SeekerHandler {
            profile_repo,
            education_repo,
            experience_repo,
        }
    }

    /// Adds an education entry owned by `profile_id`
    pub async fn add_education(
        &self,
        profile_id: &Uuid,
        request: NewEducation,
    ) -> Result<EducationCreatedResponse, AppError> {
        let request = request.normalized();
        request.validate()?;

        let insert = request.prepare_for_insert(*profile_id);
        let new_seeker_education = self.education_repo.create_education(&insert).await?;

        tracing::info!(
            profile_id = %profile_id,
            education_id = %new_seeker_education.id,
            "Education added"
        );
        Ok(EducationCreatedResponse { new_seeker_education })
    }

    /// Adds an experience entry owned by `profile_id`
    pub async fn add_experience(
        &self,
        profile_id: &Uuid,
        request: NewExperience,
    ) -> Result<ExperienceCreatedResponse, AppError> {
        let request = request.normalized();
        request.validate()?;

        let insert = request.prepare_for_insert(*profile_id);
        let new_seeker_experience = self.experience_repo.create_experience(&insert).await?;

        tracing::info!(
            profile_id = %profile_id,
            experience_id = %new_seeker_experience.id,
            "Experience added"
        );
        Ok(ExperienceCreatedResponse { new_seeker_experience })
    }

    /// Loads the profile, overlays the fields present in `request`, and saves it.
    /// A payload with no fields returns the stored profile without writing.
    pub async fn update_profile(
        &self,
        profile_id: &Uuid,
        request: UpdateProfileRequest,
    ) -> Result<Profile, AppError> {
        let request = request.normalized();
        request.validate()?;

        let mut profile = self.profile_repo
            .get_profile_by_id(profile_id)
            .await?
            .ok_or_else(seeker_not_found)?;

        if request.is_empty() {
            return Ok(profile);
        }

        request.apply_to(&mut profile);

        let updated = self.profile_repo.update_profile(&profile).await?;
        tracing::info!(profile_id = %profile_id, "Seeker profile updated");
        Ok(updated)
    }

    /// Deletes an education entry, only if the caller's profile owns it
    pub async fn delete_education(
        &self,
        profile_id: &Uuid,
        education_id: &Uuid,
    ) -> Result<StatusMessage, AppError> {
        let not_found = || AppError::NotFound("Education not found".to_string());

        let education = self.education_repo
            .get_education_for_profile(education_id, profile_id)
            .await?
            .ok_or_else(not_found)?;

        if !self.education_repo.delete_education(&education.id, profile_id).await? {
            return Err(not_found());
        }

        tracing::info!(profile_id = %profile_id, education_id = %education_id, "Education deleted");
        Ok(StatusMessage::success("Education deleted successfully"))
    }

    /// Deletes an experience entry, only if the caller's profile owns it
    pub async fn delete_experience(
        &self,
        profile_id: &Uuid,
        experience_id: &Uuid,
    ) -> Result<StatusMessage, AppError> {
        let not_found = || AppError::NotFound("Experience not found".to_string());

        let experience = self.experience_repo
            .get_experience_for_profile(experience_id, profile_id)
            .await?
            .ok_or_else(not_found)?;

        if !self.experience_repo.delete_experience(&experience.id, profile_id).await? {
            return Err(not_found());
        }

        tracing::info!(profile_id = %profile_id, experience_id = %experience_id, "Experience deleted");
        Ok(StatusMessage::success("Experience deleted successfully"))
    }

    pub async fn get_seeker(&self, profile_id: &Uuid) -> Result<Profile, AppError> {
        self.profile_repo
            .get_profile_by_id(profile_id)
            .await?
            .ok_or_else(seeker_not_found)
    }

    /// Loads the profile together with its experiences and educations
    pub async fn get_seeker_profile(&self, profile_id: &Uuid) -> Result<SeekerProfile, AppError> {
        let profile = self.get_seeker(profile_id).await?;

        let (experiences, educations) = futures::try_join!(
            self.experience_repo.list_experiences_for_profile(profile_id),
            self.education_repo.list_educations_for_profile(profile_id),
        )?;

        Ok(SeekerProfile {
            profile,
            experiences,
            educations,
        })
    }

    /// Administrative removal of any seeker
    pub async fn delete_profile(&self, profile_id: &Uuid) -> Result<StatusMessage, AppError> {
        if !self.profile_repo.delete_profile(profile_id).await? {
            return Err(seeker_not_found());
        }

        tracing::info!(profile_id = %profile_id, "Seeker deleted by admin");
        Ok(StatusMessage::success("Seeker deleted successfully"))
    }

    /// Removal of the authenticated seeker's own profile
    pub async fn delete_self(&self, profile_id: &Uuid) -> Result<StatusMessage, AppError> {
        if !self.profile_repo.delete_profile(profile_id).await? {
            return Err(seeker_not_found());
        }

        tracing::info!(profile_id = %profile_id, "Seeker deleted own profile");
        Ok(StatusMessage::success("Seeker deleted successfully"))
    }

    /// Renders the seeker's CV as a PDF document
    pub async fn generate_cv(&self, profile_id: &Uuid) -> Result<Vec<u8>, AppError> {
        self.generate_cv_with(profile_id, PdfDocument::new()).await
    }

    /// Renders the seeker's CV into an arbitrary document sink
    pub async fn generate_cv_with<S: DocumentSink>(
        &self,
        profile_id: &Uuid,
        sink: S,
    ) -> Result<S::Output, AppError> {
        let seeker = self.get_seeker_profile(profile_id).await?;
        render_cv(&seeker, sink)
    }
}
