use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::{
    education::Education,
    experience::Experience,
    option_fields::PatchString,
    validation::{validate_optional_phone, MAX_NAME_LENGTH, MAX_TEXT_LENGTH},
};

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub headline: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A profile hydrated with its experience and education collections,
/// each ordered by start date, most recent first.
#[derive(Debug, Clone, Serialize)]
pub struct SeekerProfile {
    #[serde(flatten)]
    pub profile: Profile,
    pub experiences: Vec<Experience>,
    pub educations: Vec<Education>,
}

// ───── Input & Validation ───────────────────────────────────────────

/// Partial profile update. Absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "First name must be 1-100 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Last name must be 1-100 characters"))]
    pub last_name: Option<String>,

    #[validate(length(max = MAX_TEXT_LENGTH, message = "Headline is too long"))]
    pub headline: PatchString,

    #[validate(custom(function = "validate_optional_phone"))]
    pub phone: PatchString,

    #[validate(length(max = MAX_NAME_LENGTH, message = "Country is too long"))]
    pub country: PatchString,
}

impl UpdateProfileRequest {
    /// Trims every present value. Optional text left blank becomes an explicit null.
    pub fn normalized(self) -> Self {
        UpdateProfileRequest {
            first_name: self.first_name.map(|name| name.trim().to_string()),
            last_name: self.last_name.map(|name| name.trim().to_string()),
            headline: self.headline.trimmed(),
            phone: self.phone.trimmed(),
            country: self.country.trimmed(),
        }
    }

    /// Overlays the present fields onto a loaded record.
    pub fn apply_to(self, profile: &mut Profile) {
        if let Some(first_name) = self.first_name {
            profile.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            profile.last_name = last_name;
        }
        self.headline.apply_to(&mut profile.headline);
        self.phone.apply_to(&mut profile.phone);
        self.country.apply_to(&mut profile.country);
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.headline.is_unchanged()
            && self.phone.is_unchanged()
            && self.country.is_unchanged()
    }
}
