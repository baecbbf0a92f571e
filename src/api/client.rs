use bytes::Bytes;
use futures::{stream::BoxStream, StreamExt, TryStreamExt};
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::domain::DownloadError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("HTTP Status Code is not 200 ({0})")]
    UnexpectedStatus(u16),
}

pub type Result<T> = std::result::Result<T, ApiError>;

pub type ByteStream = BoxStream<'static, Result<Bytes>>;

impl From<ApiError> for DownloadError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::RequestError(e) => DownloadError::Http(e.to_string()),
            ApiError::UnexpectedStatus(code) => DownloadError::UnexpectedStatus { code },
        }
    }
}

/// Thin wrapper over a shared `reqwest::Client`. Cloning is cheap and every
/// clone shares the same connection pool.
#[derive(Clone)]
pub struct DownloadClient {
    http: Client,
}

impl DownloadClient {
    pub fn new() -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http })
    }

    /// Send a GET and hand back the body as a stream.
    /// Anything but 200 OK is an error and no body is read.
    pub async fn open_stream(&self, url: &str) -> Result<ByteStream> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::UnexpectedStatus(status.as_u16()));
        }

        Ok(response
            .bytes_stream()
            .map_err(ApiError::RequestError)
            .boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_stream_yields_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/file.png")
            .with_status(200)
            .with_body("png-bytes")
            .create_async()
            .await;

        let client = DownloadClient::new().unwrap();
        let stream = client
            .open_stream(&format!("{}/file.png", server.url()))
            .await
            .unwrap();

        let chunks: Vec<Bytes> = stream.try_collect().await.unwrap();
        let body: Vec<u8> = chunks.concat();

        assert_eq!(body, b"png-bytes");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_open_stream_rejects_non_ok_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/gone")
            .with_status(404)
            .create_async()
            .await;

        let client = DownloadClient::new().unwrap();
        let err = client
            .open_stream(&format!("{}/gone", server.url()))
            .await
            .err()
            .unwrap();

        assert!(matches!(err, ApiError::UnexpectedStatus(404)));
        assert_eq!(
            DownloadError::from(err),
            DownloadError::UnexpectedStatus { code: 404 }
        );
    }

    #[tokio::test]
    async fn test_open_stream_treats_other_success_codes_as_unexpected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/empty")
            .with_status(204)
            .create_async()
            .await;

        let client = DownloadClient::new().unwrap();
        let err = client
            .open_stream(&format!("{}/empty", server.url()))
            .await
            .err()
            .unwrap();

        assert!(matches!(err, ApiError::UnexpectedStatus(204)));
    }
}
