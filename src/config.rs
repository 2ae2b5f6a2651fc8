use serde::Deserialize;

/// Session cookie parameters. `duration_secs` is the absolute lifetime of a
/// session; `active_secs` is the idle window slid forward on each gated
/// request, never past the absolute deadline.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub duration_secs: i64,
    pub active_secs: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let session = SessionConfig {
            secret: std::env::var("SESSION_SECRET")?,
            duration_secs: std::env::var("SESSION_DURATION_SECS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(2 * 60),
            active_secs: std::env::var("SESSION_ACTIVE_SECS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };
        Ok(Self {
            database_url,
            session,
        })
    }
}
