pub mod auth;
pub mod db;
pub mod pdf;
