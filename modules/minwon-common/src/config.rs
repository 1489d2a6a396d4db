use std::env;

/// Application configuration loaded from environment variables.
///
/// The geocoding key and the spreadsheet bridge credentials are never
/// embedded in source; a missing bridge URL means the session runs
/// without durable persistence.
#[derive(Debug, Clone)]
pub struct Config {
    // Kakao Local geocoding
    pub kakao_api_key: String,

    // Spreadsheet bridge (optional: absent = session-only mode)
    pub sheets_bridge_url: Option<String>,
    pub sheets_bridge_token: Option<String>,

    // Web server
    pub api_host: String,
    pub api_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            kakao_api_key: required_env("KAKAO_API_KEY"),
            sheets_bridge_url: env::var("SHEETS_BRIDGE_URL").ok(),
            sheets_bridge_token: env::var("SHEETS_BRIDGE_TOKEN").ok(),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("API_PORT must be a number"),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
