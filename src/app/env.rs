use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 5000;
pub const REPLIT_PORT: u16 = 8080;
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";

#[derive(Debug, Clone, Deserialize)]
pub struct Envy {
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub port: Option<u16>,
    pub repl_id: Option<String>,

    pub gemini_api_key: String,
    pub gemini_api_url: Option<String>,
    pub gemini_model: Option<String>,

    pub rate_limit_per_day: Option<u32>,
    pub rate_limit_per_hour: Option<u32>,
    pub rate_limit_per_minute: Option<u32>,
    pub generate_rate_limit_per_minute: Option<u32>,
}

fn default_app_env() -> String {
    "development".to_string()
}

impl Envy {
    /// Replit only routes traffic to 8080, whatever `PORT` says.
    pub fn port(&self) -> u16 {
        if self.repl_id.is_some() {
            return REPLIT_PORT;
        }

        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn gemini_api_url(&self) -> &str {
        self.gemini_api_url
            .as_deref()
            .unwrap_or(DEFAULT_GEMINI_API_URL)
    }

    pub fn gemini_model(&self) -> &str {
        self.gemini_model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL)
    }
}

#[cfg(test)]
pub fn test_envy() -> Envy {
    Envy {
        app_env: "test".to_string(),
        port: None,
        repl_id: None,
        gemini_api_key: "test-key".to_string(),
        gemini_api_url: None,
        gemini_model: None,
        rate_limit_per_day: None,
        rate_limit_per_hour: None,
        rate_limit_per_minute: None,
        generate_rate_limit_per_minute: None,
    }
}
