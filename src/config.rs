use std::env;

use dotenvy::dotenv;

/// Runtime configuration for the HR API client, loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            api_base_url: env::var("HR_API_BASE_URL").expect("HR_API_BASE_URL must be set"),
            request_timeout_secs: env::var("HR_API_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
        }
    }
}
