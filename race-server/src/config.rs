use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub text_api_url: String,
    pub text_word_count: u32,
    pub text_word_length: u32,
    pub set_text_delay_ms: u64,
    pub connection_timeout_seconds: u64,
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("Invalid PORT"),
            text_api_url: env::var("TEXT_API_URL")
                .unwrap_or_else(|_| "https://random-word-api.vercel.app/api".to_string()),
            text_word_count: env::var("TEXT_WORD_COUNT")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .expect("Invalid TEXT_WORD_COUNT"),
            text_word_length: env::var("TEXT_WORD_LENGTH")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("Invalid TEXT_WORD_LENGTH"),
            set_text_delay_ms: env::var("SET_TEXT_DELAY_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .expect("Invalid SET_TEXT_DELAY_MS"),
            connection_timeout_seconds: env::var("CONNECTION_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .expect("Invalid CONNECTION_TIMEOUT_SECONDS"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
