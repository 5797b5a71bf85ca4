//! Fetching raw dictionary data for a direction. Sources resolve
//! `<base>/<direction>-trie.xml`, over HTTP or from a local directory, and
//! collapse every attempt to one of three outcomes.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use ordbok_config::source::SourceConfig;

#[derive(Debug)]
pub enum FetchOutcome {
    Loaded(String),
    NotFound,
    Failed(String),
}

#[async_trait]
pub trait DictionarySource: Send + Sync {
    async fn fetch(&self, direction: &str) -> FetchOutcome;
}

pub fn from_config(config: &SourceConfig) -> Arc<dyn DictionarySource> {
    if config.is_remote() {
        Arc::new(HttpSource::new(config.base.clone()))
    } else {
        Arc::new(DirSource::new(PathBuf::from(&config.base)))
    }
}

pub struct HttpSource {
    base: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base: String) -> Self {
        Self {
            base,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, direction: &str) -> String {
        format!("{}/{direction}-trie.xml", self.base.trim_end_matches('/'))
    }
}

#[async_trait]
impl DictionarySource for HttpSource {
    async fn fetch(&self, direction: &str) -> FetchOutcome {
        let url = self.url(direction);
        tracing::debug!("fetching dictionary from {url}");
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return FetchOutcome::Failed(e.to_string()),
        };
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return FetchOutcome::NotFound;
        }
        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => return FetchOutcome::Failed(e.to_string()),
        };
        match response.text().await {
            Ok(body) => FetchOutcome::Loaded(body),
            Err(e) => FetchOutcome::Failed(e.to_string()),
        }
    }
}

pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl DictionarySource for DirSource {
    async fn fetch(&self, direction: &str) -> FetchOutcome {
        let path = self.root.join(format!("{direction}-trie.xml"));
        tracing::debug!("reading dictionary from {}", path.display());
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => FetchOutcome::Loaded(body),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FetchOutcome::NotFound,
            Err(e) => FetchOutcome::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_source_builds_the_fetch_url() {
        let source = HttpSource::new("http://example.org/dics/".to_string());
        assert_eq!(source.url("me-sv-lr"), "http://example.org/dics/me-sv-lr-trie.xml");
    }

    #[test]
    fn config_selects_source_kind() {
        let remote = SourceConfig {
            base: "https://example.org/dics".to_string(),
        };
        assert!(remote.is_remote());
        let local = SourceConfig {
            base: "dics".to_string(),
        };
        assert!(!local.is_remote());
    }

    #[tokio::test]
    async fn missing_file_maps_to_not_found() {
        let source = DirSource::new(PathBuf::from("/nonexistent-ordbok-dics"));
        assert!(matches!(
            source.fetch("me-sv-lr").await,
            FetchOutcome::NotFound
        ));
    }

    #[tokio::test]
    async fn present_file_loads() {
        let dir = std::env::temp_dir().join("ordbok-fetch-test");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join("me-sv-lr-trie.xml"), "<root></root>")
            .await
            .unwrap();
        let source = DirSource::new(dir);
        let FetchOutcome::Loaded(body) = source.fetch("me-sv-lr").await else {
            panic!("expected a loaded body");
        };
        assert_eq!(body, "<root></root>");
    }
}
