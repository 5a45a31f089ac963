mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{cv, entities, use_cases};
pub use interfaces::{handlers, middlewares, repositories, routes};
pub use infrastructure::{auth, db, pdf};

use auth::jwt::JwtService;
use repositories::sqlx_repo::SqlxSeekerRepo;
use use_cases::seeker::SeekerHandler;

pub struct AppState {
    pub seeker_handler: AppSeekerHandler,
    pub jwt_service: JwtService,
}

pub type AppSeekerHandler = SeekerHandler<SqlxSeekerRepo, SqlxSeekerRepo, SqlxSeekerRepo>;

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let repo = SqlxSeekerRepo::new(pool);
        let seeker_handler = SeekerHandler::new(repo.clone(), repo.clone(), repo);

        AppState {
            seeker_handler,
            jwt_service: JwtService::new(config),
        }
    }
}
