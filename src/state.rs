use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::email::SystemMailer;
use crate::rate_limit::LoginRateLimiter;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub mailer: Option<Arc<SystemMailer>>,
    pub login_limiter: LoginRateLimiter,
}
