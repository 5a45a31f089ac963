pub mod education;
pub mod experience;
pub mod option_fields;
pub mod profile;
pub mod response;
pub mod token;
pub mod validation;
