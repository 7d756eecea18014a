use std::sync::Arc;

use reqwest::StatusCode;
use tracing::{debug, warn};

use super::{
    core::Word,
    source::{Dictionary, LookupError},
    WordsList,
};

pub const DEFAULT_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en/";

/// Looks words up against a dictionary web service.
///
/// A word exists if `GET {base_url}{word}` succeeds and doesn't if it
/// comes back `404`. Anything else is a [`LookupError`].
#[derive(Debug, Clone)]
pub struct DictionaryApi {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl DictionaryApi {
    /// Words are appended to `base_url` as a final path segment, whether or
    /// not it ends in `/`.
    pub fn new(mut base_url: reqwest::Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    fn url(&self, word: &Word) -> Result<reqwest::Url, url::ParseError> {
        self.base_url.join(&word.to_string().to_lowercase())
    }
}

impl Default for DictionaryApi {
    fn default() -> Self {
        #[allow(clippy::unwrap_used)]
        Self::new(reqwest::Url::parse(DEFAULT_URL).unwrap())
    }
}

impl Dictionary for DictionaryApi {
    #[tracing::instrument(skip_all, fields(%word))]
    async fn exists(&self, word: &Word) -> Result<bool, LookupError> {
        let url = self.url(word)?;

        let response = self.client.get(url).send().await.map_err(|err| {
            warn!(%err, "dictionary request failed");
            LookupError::from(err)
        })?;

        let status = response.status();
        debug!(%status);

        match status {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => {
                warn!(%status, "unexpected response from dictionary");
                Err(LookupError::Status(status))
            }
        }
    }
}

/// Whichever dictionary the configuration asked for.
#[derive(Debug, Clone)]
pub enum ConfiguredDictionary {
    Local(Arc<WordsList>),
    Remote(DictionaryApi),
}

impl Dictionary for ConfiguredDictionary {
    async fn exists(&self, word: &Word) -> Result<bool, LookupError> {
        match self {
            Self::Local(list) => list.exists(word).await,
            Self::Remote(api) => api.exists(word).await,
        }
    }
}
