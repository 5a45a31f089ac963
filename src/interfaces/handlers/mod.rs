pub mod admin;
pub mod home;
pub mod seekers;
pub mod system;
