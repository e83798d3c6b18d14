//! Multipart upload to the submission endpoint

use super::error::SubmitError;
use crate::state::FileRef;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::{json, Value};

/// Multipart field carrying the JSON payload
pub const PAYLOAD_FIELD: &str = "payload";

/// Everything one POST needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Serialized payload
    pub payload_json: String,
    /// Files in selection order, sent as `file1`..`fileN`
    pub files: Vec<FileRef>,
}

/// Acknowledgement used when a 2xx response body is not JSON
pub fn default_acknowledgement() -> Value {
    json!({ "success": true })
}

/// Multipart field name of the file at `index` (0-based)
pub fn file_field_name(index: usize) -> String {
    format!("file{}", index + 1)
}

/// Sends one submission; no retries
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Uploader: Send + Sync {
    /// POST the request, returning the parsed (or default) response body
    async fn upload(&self, request: UploadRequest) -> Result<Value, SubmitError>;
}

/// reqwest-backed uploader
#[derive(Clone, Debug)]
pub struct HttpUploader {
    client: Client,
    endpoint: String,
}

impl HttpUploader {
    /// Timeouts are left to reqwest's defaults.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SubmitError> {
        let client = Client::builder()
            .user_agent(concat!("formgate/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    async fn build_form(request: UploadRequest) -> Result<Form, SubmitError> {
        let mut form = Form::new().text(PAYLOAD_FIELD, request.payload_json);
        for (index, file) in request.files.into_iter().enumerate() {
            let bytes = tokio::fs::read(&file.path)
                .await
                .map_err(|source| SubmitError::ReadFile {
                    name: file.name.clone(),
                    source,
                })?;
            form = form.part(file_field_name(index), Part::bytes(bytes).file_name(file.name));
        }
        Ok(form)
    }
}

#[async_trait]
impl Uploader for HttpUploader {
    async fn upload(&self, request: UploadRequest) -> Result<Value, SubmitError> {
        let file_count = request.files.len();
        let form = Self::build_form(request).await?;

        tracing::info!(endpoint = %self.endpoint, files = file_count, "Posting submission");
        let response = self.client.post(&self.endpoint).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|err| {
                tracing::debug!("Could not read error body: {err}");
                String::new()
            });
            tracing::warn!(%status, "Submission rejected by endpoint");
            return Err(SubmitError::Status { status, body });
        }

        // A 2xx status wins over whatever the body contains.
        let body = match response.text().await {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|_| default_acknowledgement()),
            Err(err) => {
                tracing::debug!("Could not read response body: {err}");
                default_acknowledgement()
            }
        };
        tracing::info!(%status, "Submission accepted");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn request(files: Vec<FileRef>) -> UploadRequest {
        UploadRequest {
            payload_json: r#"{"organizationName":"Acme"}"#.to_string(),
            files,
        }
    }

    fn temp_file(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> FileRef {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content).unwrap();
        FileRef::new(name, content.len() as u64, path)
    }

    fn body_text(request: &Request) -> String {
        String::from_utf8_lossy(&request.body).into_owned()
    }

    #[test]
    fn test_file_field_names_are_one_based() {
        assert_eq!(file_field_name(0), "file1");
        assert_eq!(file_field_name(4), "file5");
    }

    #[tokio::test]
    async fn test_success_with_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 42 })))
            .expect(1)
            .mount(&server)
            .await;

        let uploader = HttpUploader::new(format!("{}/submit", server.uri())).unwrap();
        let body = uploader.upload(request(vec![])).await.unwrap();
        assert_eq!(body, json!({ "id": 42 }));
    }

    #[tokio::test]
    async fn test_success_with_non_json_body_uses_default() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_string("thanks!"))
            .mount(&server)
            .await;

        let uploader = HttpUploader::new(server.uri()).unwrap();
        let body = uploader.upload(request(vec![])).await.unwrap();
        assert_eq!(body, default_acknowledgement());
    }

    #[tokio::test]
    async fn test_server_error_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let uploader = HttpUploader::new(server.uri()).unwrap();
        let err = uploader.upload(request(vec![])).await.unwrap_err();
        match err {
            SubmitError::Status { status, body } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_multipart_contains_payload_and_numbered_files() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            temp_file(&dir, "first.txt", b"alpha-content"),
            temp_file(&dir, "second.txt", b"beta-content"),
        ];

        let uploader = HttpUploader::new(server.uri()).unwrap();
        uploader.upload(request(files)).await.unwrap();

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        let content_type = received[0]
            .headers
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("multipart/form-data"));

        let body = body_text(&received[0]);
        assert!(body.contains("name=\"payload\""));
        assert!(body.contains(r#"{"organizationName":"Acme"}"#));
        assert!(body.contains("name=\"file1\"; filename=\"first.txt\""));
        assert!(body.contains("name=\"file2\"; filename=\"second.txt\""));
        assert!(body.contains("alpha-content"));
        assert!(body.contains("beta-content"));
        assert!(body.find("alpha-content") < body.find("beta-content"));
    }

    #[tokio::test]
    async fn test_unreadable_file_fails_before_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let missing = FileRef::new("gone.pdf", 10, dir.path().join("gone.pdf"));

        let uploader = HttpUploader::new(server.uri()).unwrap();
        let err = uploader.upload(request(vec![missing])).await.unwrap_err();
        assert!(matches!(err, SubmitError::ReadFile { ref name, .. } if name == "gone.pdf"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind and drop to get a port with nothing listening.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let uploader = HttpUploader::new(format!("http://127.0.0.1:{port}/submit")).unwrap();
        let err = uploader.upload(request(vec![])).await.unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)));
    }
}
