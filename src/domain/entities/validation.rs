use std::borrow::Cow;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

use crate::entities::option_fields::OptionField;

pub const MAX_NAME_LENGTH: u64 = 100;
pub const MAX_TEXT_LENGTH: u64 = 200;
pub const MAX_RESPONSIBILITIES_LENGTH: u64 = 5000;

pub static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 ()\-]{5,22}$").expect("phone regex is valid"));

pub fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

fn earliest_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

pub fn validate_start_date(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date < earliest_start() {
        return Err(new_validation_error("start_date_too_early", "Start date must be after January 1, 1900"));
    }
    Ok(())
}

/// Checks the end bound of a dated period. Ongoing periods ignore the end date.
pub fn validate_period(
    start: NaiveDate,
    end: Option<NaiveDate>,
    ongoing: bool,
) -> Result<(), ValidationError> {
    if ongoing {
        return Ok(());
    }

    match end {
        None => Err(new_validation_error("end_date_required", "End date is required unless the period is ongoing")),
        Some(end) if end < start => Err(new_validation_error("end_before_start", "End date cannot be before start date")),
        Some(_) => Ok(()),
    }
}

pub fn validate_optional_phone(value: &OptionField<String>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(phone) if !PHONE_REGEX.is_match(phone) => {
            Err(new_validation_error("invalid_phone", "Phone number format is invalid"))
        }
        _ => Ok(()),
    }
}
