//! Photo lookup for `ShowPhoto` actions.
//!
//! [`PhotoFetcher`] resolves a query to a displayable image URL.
//! [`HttpPhotoFetcher`] asks the configured photo source over HTTP and
//! follows its redirect to the concrete image.  [`resolve_photo`] never
//! fails: any error becomes a placeholder tile.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::DisplayConfig;

// ---------------------------------------------------------------------------
// PhotoError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum PhotoError {
    /// The configured source URL could not be parsed.
    #[error("invalid photo source URL: {0}")]
    Url(String),

    /// Transport or connection error, including timeouts.
    #[error("photo request failed: {0}")]
    Request(String),

    /// The source answered with a non-success status.
    #[error("photo source returned HTTP {0}")]
    Status(u16),

    /// The source answered, but not with an image.
    #[error("photo source returned {0}, not an image")]
    NotAnImage(String),
}

impl From<reqwest::Error> for PhotoError {
    fn from(e: reqwest::Error) -> Self {
        PhotoError::Request(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// PhotoTile
// ---------------------------------------------------------------------------

/// One cell of the photo grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tile", rename_all = "snake_case")]
pub enum PhotoTile {
    Image { url: String, alt: String },
    Placeholder { message: String },
}

impl PhotoTile {
    /// Tile shown when no image could be found for `query`.
    pub fn not_found(query: &str) -> Self {
        PhotoTile::Placeholder {
            message: format!("Geen afbeelding gevonden voor \"{query}\""),
        }
    }
}

// ---------------------------------------------------------------------------
// PhotoFetcher trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait PhotoFetcher: Send + Sync {
    /// Return the URL of an image matching `query`.
    async fn fetch(&self, query: &str) -> Result<String, PhotoError>;
}

/// Fetch a photo for `query`, falling back to a placeholder tile.
pub async fn resolve_photo(fetcher: &dyn PhotoFetcher, query: &str) -> PhotoTile {
    if query.trim().is_empty() {
        return PhotoTile::not_found(query);
    }
    match fetcher.fetch(query).await {
        Ok(url) => PhotoTile::Image {
            url,
            alt: format!("Foto van {query}"),
        },
        Err(e) => {
            log::warn!("display: no photo for {query:?}: {e}");
            PhotoTile::not_found(query)
        }
    }
}

// ---------------------------------------------------------------------------
// HttpPhotoFetcher
// ---------------------------------------------------------------------------

/// Queries a featured-photo endpoint such as
/// `https://source.unsplash.com/featured/800x600/?katten`.
pub struct HttpPhotoFetcher {
    client: reqwest::Client,
    source_url: String,
}

impl HttpPhotoFetcher {
    /// Build from display config.  A default client is used if the builder
    /// with the configured timeout fails.
    pub fn from_config(config: &DisplayConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.photo_timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            source_url: config.photo_source_url.clone(),
        }
    }

    /// Request URL for `query`: the source URL with the query as its only,
    /// key-only query parameter.
    pub fn request_url(&self, query: &str) -> Result<reqwest::Url, PhotoError> {
        let mut url = reqwest::Url::parse(&self.source_url)
            .map_err(|e| PhotoError::Url(format!("{}: {e}", self.source_url)))?;
        url.query_pairs_mut().clear().append_key_only(query);
        Ok(url)
    }
}

#[async_trait]
impl PhotoFetcher for HttpPhotoFetcher {
    async fn fetch(&self, query: &str) -> Result<String, PhotoError> {
        let url = self.request_url(query)?;
        log::debug!("display: fetching photo {url}");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PhotoError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.starts_with("image/") {
            return Err(PhotoError::NotAnImage(content_type));
        }

        Ok(response.url().to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPhoto(&'static str);

    #[async_trait]
    impl PhotoFetcher for FixedPhoto {
        async fn fetch(&self, _query: &str) -> Result<String, PhotoError> {
            Ok(self.0.to_string())
        }
    }

    struct NoPhoto;

    #[async_trait]
    impl PhotoFetcher for NoPhoto {
        async fn fetch(&self, _query: &str) -> Result<String, PhotoError> {
            Err(PhotoError::Status(404))
        }
    }

    fn fetcher_for(url: &str) -> HttpPhotoFetcher {
        HttpPhotoFetcher::from_config(&DisplayConfig {
            photo_source_url: url.into(),
            ..DisplayConfig::default()
        })
    }

    #[test]
    fn request_url_appends_encoded_query() {
        let url = fetcher_for("https://source.unsplash.com/featured/800x600/")
            .request_url("rode katten")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://source.unsplash.com/featured/800x600/?rode+katten"
        );
    }

    #[test]
    fn request_url_replaces_existing_query() {
        let url = fetcher_for("http://localhost/photo?old=1")
            .request_url("honden")
            .unwrap();
        assert_eq!(url.query(), Some("honden"));
    }

    #[test]
    fn invalid_source_url_is_an_error() {
        let err = fetcher_for("not a url").request_url("katten").unwrap_err();
        assert!(matches!(err, PhotoError::Url(_)));
    }

    #[tokio::test]
    async fn resolve_success_yields_image_tile() {
        let tile = resolve_photo(&FixedPhoto("https://img.example/1.jpg"), "katten").await;
        assert_eq!(
            tile,
            PhotoTile::Image {
                url: "https://img.example/1.jpg".into(),
                alt: "Foto van katten".into(),
            }
        );
    }

    #[tokio::test]
    async fn resolve_failure_yields_placeholder() {
        let tile = resolve_photo(&NoPhoto, "katten").await;
        assert_eq!(
            tile,
            PhotoTile::Placeholder {
                message: "Geen afbeelding gevonden voor \"katten\"".into()
            }
        );
    }

    #[tokio::test]
    async fn resolve_empty_query_skips_fetch() {
        let tile = resolve_photo(&FixedPhoto("https://img.example/1.jpg"), "  ").await;
        assert!(matches!(tile, PhotoTile::Placeholder { .. }));
    }

    // -----------------------------------------------------------------------
    // HttpPhotoFetcher against a local server
    // -----------------------------------------------------------------------

    /// Serve `responses` in order, one connection each, and return the
    /// address to point a fetcher at.
    async fn serve(responses: Vec<String>) -> std::net::SocketAddr {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            for response in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
        });
        addr
    }

    fn http_response(status: &str, headers: &[(&str, &str)], body: &str) -> String {
        let mut out = format!("HTTP/1.1 {status}\r\n");
        for (name, value) in headers {
            out.push_str(&format!("{name}: {value}\r\n"));
        }
        out.push_str(&format!(
            "content-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        ));
        out
    }

    #[tokio::test]
    async fn fetch_rejects_error_status() {
        let addr = serve(vec![http_response("404 Not Found", &[], "")]).await;
        let err = fetcher_for(&format!("http://{addr}/photo/"))
            .fetch("katten")
            .await
            .unwrap_err();
        assert!(matches!(err, PhotoError::Status(404)), "{err:?}");
    }

    #[tokio::test]
    async fn fetch_rejects_non_image_content() {
        let addr = serve(vec![http_response(
            "200 OK",
            &[("content-type", "text/html")],
            "<p>hallo</p>",
        )])
        .await;
        let err = fetcher_for(&format!("http://{addr}/photo/"))
            .fetch("katten")
            .await
            .unwrap_err();
        match err {
            PhotoError::NotAnImage(content_type) => assert_eq!(content_type, "text/html"),
            other => panic!("expected NotAnImage, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_without_content_type_is_not_an_image() {
        let addr = serve(vec![http_response("200 OK", &[], "x")]).await;
        let err = fetcher_for(&format!("http://{addr}/photo/"))
            .fetch("katten")
            .await
            .unwrap_err();
        assert!(matches!(err, PhotoError::NotAnImage(ref t) if t.is_empty()), "{err:?}");
    }

    #[tokio::test]
    async fn fetch_follows_redirect_to_image() {
        let addr = serve(vec![
            http_response("302 Found", &[("location", "/images/kat.jpg")], ""),
            http_response("200 OK", &[("content-type", "image/jpeg")], "jpeg"),
        ])
        .await;
        let url = fetcher_for(&format!("http://{addr}/photo/"))
            .fetch("katten")
            .await
            .unwrap();
        assert_eq!(url, format!("http://{addr}/images/kat.jpg"));
    }

    #[tokio::test]
    async fn fetch_unreachable_source_is_request_error() {
        let addr = {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let err = fetcher_for(&format!("http://{addr}/photo/"))
            .fetch("katten")
            .await
            .unwrap_err();
        assert!(matches!(err, PhotoError::Request(_)), "{err:?}");
    }

    #[test]
    fn tile_serialises_with_tag() {
        let json = serde_json::to_value(PhotoTile::not_found("x")).unwrap();
        assert_eq!(json["tile"], "placeholder");
    }
}
