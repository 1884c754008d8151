use std::env;

use guess_persistence::connection::DEFAULT_DATABASE_URL;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Base URL of the remote puzzle feed, without a trailing slash.
    pub puzzle_feed_url: Option<String>,
    /// Serve the built-in puzzle when neither the cache nor the feed has one.
    pub use_fallback: bool,
    pub leaderboard_size: u64,
    /// User ids or usernames allowed to call the admin endpoints.
    pub admin_users: Vec<String>,
    pub auth_dev_mode: bool,
    /// HS256 key for session tokens. Required unless `auth_dev_mode` is set.
    pub session_secret: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any variable source, falling back to defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            host: var("HOST", "127.0.0.1"),
            port: var("PORT", "8080").parse().expect("Invalid PORT"),
            database_url: var("DATABASE_URL", DEFAULT_DATABASE_URL),
            puzzle_feed_url: lookup("PUZZLE_FEED_URL")
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            use_fallback: !matches!(
                var("PUZZLE_FALLBACK", "true").to_lowercase().as_str(),
                "false" | "0" | "off" | "no"
            ),
            leaderboard_size: var("LEADERBOARD_SIZE", "20")
                .parse()
                .expect("Invalid LEADERBOARD_SIZE"),
            admin_users: var("ADMIN_USERS", "")
                .split(',')
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
            auth_dev_mode: var("AUTH_DEV_MODE", "false") == "true",
            session_secret: lookup("SESSION_SECRET").filter(|secret| !secret.trim().is_empty()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
