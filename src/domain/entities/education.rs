use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::entities::validation::{validate_period, validate_start_date, MAX_TEXT_LENGTH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Education {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub degree: String,
    pub field_of_study: String,
    pub institution: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_studying: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>
}

impl Education {
    /// End date as displayed: absent while still studying, whatever is stored.
    pub fn effective_end_date(&self) -> Option<NaiveDate> {
        if self.is_studying { None } else { self.end_date }
    }
}

#[derive(Debug, Clone)]
pub struct EducationInsert {
    pub profile_id: Uuid,
    pub degree: String,
    pub field_of_study: String,
    pub institution: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_studying: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_education_period"))]
pub struct NewEducation {
    #[validate(length(min = 1, max = MAX_TEXT_LENGTH, message = "Degree cannot be empty"))]
    pub degree: String,

    #[validate(length(min = 1, max = MAX_TEXT_LENGTH, message = "Field of study cannot be empty"))]
    pub field_of_study: String,

    #[validate(length(min = 1, max = MAX_TEXT_LENGTH, message = "Institution cannot be empty"))]
    pub institution: String,

    #[validate(custom(function = "validate_start_date"))]
    pub start_date: NaiveDate,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub is_studying: bool,
}

fn validate_education_period(education: &NewEducation) -> Result<(), ValidationError> {
    validate_period(education.start_date, education.end_date, education.is_studying)
}

impl NewEducation {
    /// Trims free-text fields so length rules apply to what gets stored.
    pub fn normalized(self) -> Self {
        NewEducation {
            degree: self.degree.trim().to_string(),
            field_of_study: self.field_of_study.trim().to_string(),
            institution: self.institution.trim().to_string(),
            ..self
        }
    }

    pub fn prepare_for_insert(&self, profile_id: Uuid) -> EducationInsert {
        let now = Utc::now();
        EducationInsert {
            profile_id,
            degree: self.degree.clone(),
            field_of_study: self.field_of_study.clone(),
            institution: self.institution.clone(),
            start_date: self.start_date,
            end_date: if self.is_studying { None } else { self.end_date },
            is_studying: self.is_studying,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EducationCreatedResponse {
    pub new_seeker_education: Education,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_education(is_studying: bool, end_date: Option<NaiveDate>) -> NewEducation {
        NewEducation {
            degree: " BSc ".into(),
            field_of_study: "Computer Science".into(),
            institution: "University of Lagos".into(),
            start_date: NaiveDate::from_ymd_opt(2016, 9, 1).unwrap(),
            end_date,
            is_studying,
        }
    }

    #[test]
    fn studying_drops_stored_end_date() {
        let end = NaiveDate::from_ymd_opt(2020, 7, 1);
        let insert = new_education(true, end)
            .normalized()
            .prepare_for_insert(Uuid::new_v4());

        assert_eq!(insert.end_date, None);
        assert_eq!(insert.degree, "BSc");
    }

    #[test]
    fn whitespace_only_fields_are_empty_after_normalizing() {
        let education = NewEducation {
            degree: "   ".into(),
            institution: "\t".into(),
            ..new_education(true, None)
        }
        .normalized();

        let errors = education.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("degree"));
        assert!(fields.contains_key("institution"));
        assert!(!fields.contains_key("field_of_study"));
    }

    #[test]
    fn finished_education_requires_end_date() {
        let errors = new_education(false, None).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("__all__"));

        assert!(new_education(false, NaiveDate::from_ymd_opt(2020, 7, 1)).validate().is_ok());
        assert!(new_education(true, None).validate().is_ok());
    }

    #[test]
    fn effective_end_date_ignores_stored_value_while_studying() {
        let now = Utc::now();
        let education = Education {
            id: Uuid::new_v4(),
            profile_id: Uuid::new_v4(),
            degree: "MSc".into(),
            field_of_study: "Data Science".into(),
            institution: "Covenant University".into(),
            start_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2022, 1, 1),
            is_studying: true,
            created_at: now,
            updated_at: now,
        };

        assert_eq!(education.effective_end_date(), None);
    }
}
