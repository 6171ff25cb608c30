/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`
    /// env var. The single value `*` allows any origin for
    /// `GET`/`HEAD`/`POST`, which is how a publicly embeddable claim
    /// button is deployed.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Cooldown window in seconds during which an identity that has
    /// claimed may not claim again (default: `3600`, one hour).
    pub claim_window_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default  |
    /// |------------------------|----------|
    /// | `HOST`                 | `0.0.0.0`|
    /// | `PORT`                 | `3000`   |
    /// | `CORS_ORIGINS`         | `*`      |
    /// | `REQUEST_TIMEOUT_SECS` | `30`     |
    /// | `CLAIM_WINDOW_SECS`    | `3600`   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let claim_window_secs: u64 = std::env::var("CLAIM_WINDOW_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("CLAIM_WINDOW_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            claim_window_secs,
        }
    }

    /// Cooldown window as a chrono duration.
    pub fn claim_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.claim_window_secs as i64)
    }
}
