use crate::error::DataLoadError;
use crate::types::Club;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, info};

/// Where the club collection comes from. Fetched once per session.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Human-readable location, for logs
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Vec<Club>, DataLoadError>;
}

/// JSON array on the local filesystem
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<Club>, DataLoadError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|source| DataLoadError::Io {
            path: self.describe(),
            source,
        })?;
        debug!("Read {} bytes from {}", bytes.len(), self.describe());
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// JSON array served over HTTP. No timeout and no retry.
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), url: url.into() }
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<Club>, DataLoadError> {
        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DataLoadError::Status { url: self.url.clone(), status: status.as_u16() });
        }
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Pick a source from a configured location: URLs go over HTTP, anything
/// else is a file path.
pub fn source_for(location: &str) -> Box<dyn DataSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        info!("Using HTTP data source {}", location);
        Box::new(HttpSource::new(location))
    } else {
        info!("Using file data source {}", location);
        Box::new(FileSource::new(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_file_source_reads_array() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"1","name":"Chess Club","school":"XYZ U","city":"Beijing","province":"北京市","latitude":39.9,"longitude":116.4,"tags":["chess"]}}]"#
        )
        .unwrap();

        let clubs = FileSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(clubs.len(), 1);
        assert_eq!(clubs[0].province.as_deref(), Some("北京市"));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path().join("nope.json")).fetch().await.unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"not": "an array"}}"#).unwrap();
        let err = FileSource::new(file.path()).fetch().await.unwrap_err();
        assert!(matches!(err, DataLoadError::Parse(_)));
    }

    #[tokio::test]
    async fn test_http_source_parses_body_and_checks_status() {
        use axum::{http::StatusCode, routing::get, Router};

        let app = Router::new()
            .route("/clubs.json", get(|| async { r#"[{"id": 7, "name": "Go Club", "tags": null}]"# }))
            .route("/gone.json", get(|| async { (StatusCode::NOT_FOUND, "gone") }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        let clubs = HttpSource::new(format!("http://{}/clubs.json", addr)).fetch().await.unwrap();
        assert_eq!(clubs[0].id, "7");
        assert!(clubs[0].tags.is_empty());

        let err = HttpSource::new(format!("http://{}/gone.json", addr)).fetch().await.unwrap_err();
        assert!(matches!(err, DataLoadError::Status { status: 404, .. }));
    }

    #[test]
    fn test_source_selection() {
        assert_eq!(source_for("https://example.org/clubs.json").describe(), "https://example.org/clubs.json");
        assert_eq!(source_for("data/clubs.json").describe(), "data/clubs.json");
    }
}
