use reqwest::Client;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TextError {
    #[error("word service request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("word service returned an empty word list")]
    EmptyWordList,
}

/// Adapter for the external word-list service that supplies race texts.
pub struct TextProvider {
    client: Client,
    api_url: String,
    word_count: u32,
    word_length: u32,
}

impl TextProvider {
    pub fn new(api_url: String, word_count: u32, word_length: u32) -> Self {
        Self {
            client: Client::new(),
            api_url,
            word_count,
            word_length,
        }
    }

    /// Fetches one race text: `word_count` words of `word_length` letters,
    /// joined by single spaces and exploded into characters so clients can
    /// track per-character progress.
    pub async fn fetch_race_text(&self) -> Result<Vec<char>, TextError> {
        let words: Vec<String> = self
            .client
            .get(&self.api_url)
            .query(&[("words", self.word_count), ("length", self.word_length)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if words.is_empty() {
            return Err(TextError::EmptyWordList);
        }

        debug!("Fetched race text of {} words", words.len());
        Ok(words.join(" ").chars().collect())
    }
}
