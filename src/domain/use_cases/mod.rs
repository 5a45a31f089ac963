pub mod extractors;
pub mod seeker;
