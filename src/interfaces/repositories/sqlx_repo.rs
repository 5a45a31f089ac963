use sqlx::PgPool;

/// PostgreSQL-backed gateway for profiles and their education and experience entries.
#[derive(Clone)]
pub struct SqlxSeekerRepo {
    pub pool: PgPool,
}

impl SqlxSeekerRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxSeekerRepo { pool }
    }
}
