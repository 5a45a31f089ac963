use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::entities::validation::{
    validate_period, validate_start_date, MAX_NAME_LENGTH, MAX_RESPONSIBILITIES_LENGTH, MAX_TEXT_LENGTH,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Experience {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub title: String,
    pub employer: String,
    pub country: String,
    pub responsibilities: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_current_role: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>
}

impl Experience {
    /// End date as displayed: absent for the current role, whatever is stored.
    pub fn effective_end_date(&self) -> Option<NaiveDate> {
        if self.is_current_role { None } else { self.end_date }
    }
}

#[derive(Debug, Clone)]
pub struct ExperienceInsert {
    pub profile_id: Uuid,
    pub title: String,
    pub employer: String,
    pub country: String,
    pub responsibilities: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_current_role: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_experience_period"))]
pub struct NewExperience {
    #[validate(length(min = 1, max = MAX_TEXT_LENGTH, message = "Title cannot be empty"))]
    pub title: String,

    #[validate(length(min = 1, max = MAX_TEXT_LENGTH, message = "Employer cannot be empty"))]
    pub employer: String,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Country cannot be empty"))]
    pub country: String,

    #[validate(length(min = 1, max = MAX_RESPONSIBILITIES_LENGTH, message = "Responsibilities must be 1-5000 characters"))]
    pub responsibilities: String,

    #[validate(custom(function = "validate_start_date"))]
    pub start_date: NaiveDate,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub is_current_role: bool,
}

fn validate_experience_period(experience: &NewExperience) -> Result<(), ValidationError> {
    validate_period(experience.start_date, experience.end_date, experience.is_current_role)
}

impl NewExperience {
    /// Trims free-text fields so length rules apply to what gets stored.
    pub fn normalized(self) -> Self {
        NewExperience {
            title: self.title.trim().to_string(),
            employer: self.employer.trim().to_string(),
            country: self.country.trim().to_string(),
            responsibilities: self.responsibilities.trim().to_string(),
            ..self
        }
    }

    pub fn prepare_for_insert(&self, profile_id: Uuid) -> ExperienceInsert {
        let now = Utc::now();
        ExperienceInsert {
            profile_id,
            title: self.title.clone(),
            employer: self.employer.clone(),
            country: self.country.clone(),
            responsibilities: self.responsibilities.clone(),
            start_date: self.start_date,
            end_date: if self.is_current_role { None } else { self.end_date },
            is_current_role: self.is_current_role,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExperienceCreatedResponse {
    pub new_seeker_experience: Experience,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_date_before_start_is_rejected() {
        let experience = NewExperience {
            title: "Backend Engineer".into(),
            employer: "Paystack".into(),
            country: "Nigeria".into(),
            responsibilities: "Payments APIs".into(),
            start_date: NaiveDate::from_ymd_opt(2022, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2021, 5, 1),
            is_current_role: false,
        };

        assert!(experience.validate().is_err());
    }

    #[test]
    fn current_role_is_stored_without_end_date() {
        let experience: NewExperience = serde_json::from_str(
            r#"{
                "title": "Platform Engineer",
                "employer": "Flutterwave",
                "country": "Kenya",
                "responsibilities": "Kubernetes",
                "start_date": "2023-02-01",
                "end_date": "2024-01-01",
                "is_current_role": true
            }"#,
        )
        .unwrap();

        assert!(experience.validate().is_ok());
        assert_eq!(experience.prepare_for_insert(Uuid::new_v4()).end_date, None);
    }

    #[test]
    fn blank_title_fails_once_trimmed() {
        let experience = NewExperience {
            title: "    ".into(),
            employer: " Paystack ".into(),
            country: "Nigeria".into(),
            responsibilities: "Payments APIs\n".into(),
            start_date: NaiveDate::from_ymd_opt(2022, 5, 1).unwrap(),
            end_date: None,
            is_current_role: true,
        };
        assert!(experience.validate().is_ok());

        let normalized = experience.normalized();
        assert_eq!(normalized.employer, "Paystack");
        assert_eq!(normalized.responsibilities, "Payments APIs");

        let errors = normalized.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }
}
