//! Model metadata lookup against the OpenRouter API

use crate::error::BabajiError;
use crate::models::ApiKey;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Default API base URL
pub const OPENROUTER_API: &str = "https://openrouter.ai/api/v1";

/// Source of per-model metadata, keyed by `provider/model`
#[async_trait]
pub trait ModelCatalog {
    async fn model_parameters(&self, model_id: &str) -> Result<serde_json::Value>;
}

/// OpenRouter REST client
pub struct OpenRouterClient {
    client: Client,
    api_key: ApiKey,
    base_url: String,
}

impl OpenRouterClient {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: OPENROUTER_API.to_string(),
        }
    }

    /// Use a different API base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model_url(&self, model_id: &str) -> String {
        format!("{}/models/{}", self.base_url, model_id)
    }
}

#[async_trait]
impl ModelCatalog for OpenRouterClient {
    async fn model_parameters(&self, model_id: &str) -> Result<serde_json::Value> {
        let url = self.model_url(model_id);
        tracing::debug!(%url, "looking up model parameters");

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.api_key.expose())
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BabajiError::LookupFailed {
                model: model_id.to_string(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse model parameters for {}", model_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and hand back the raw request
    async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        });

        (format!("http://{}", addr), handle)
    }

    #[test]
    fn test_model_url() {
        let client = OpenRouterClient::new(ApiKey::new("k")).with_base_url("https://example.test/api/v1/");
        assert_eq!(
            client.model_url("openai/gpt-4"),
            "https://example.test/api/v1/models/openai/gpt-4"
        );
    }

    #[tokio::test]
    async fn test_lookup_sends_bearer_and_parses_body() {
        let (base, server) = serve_once("200 OK", r#"{"id":"openai/gpt-4","context_length":8192}"#).await;
        let client = OpenRouterClient::new(ApiKey::new("sk-test")).with_base_url(base);

        let params = client.model_parameters("openai/gpt-4").await.unwrap();
        assert_eq!(params["context_length"], 8192);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /models/openai/gpt-4 "));
        assert!(request.to_lowercase().contains("authorization: bearer sk-test"));
    }

    #[tokio::test]
    async fn test_lookup_error_status() {
        let (base, server) = serve_once("401 Unauthorized", r#"{"error":"bad key"}"#).await;
        let client = OpenRouterClient::new(ApiKey::new("nope")).with_base_url(base);

        let err = client.model_parameters("openai/gpt-4").await.unwrap_err();
        match err.downcast_ref::<BabajiError>() {
            Some(BabajiError::LookupFailed { model, status, body }) => {
                assert_eq!(model, "openai/gpt-4");
                assert_eq!(*status, 401);
                assert!(body.contains("bad key"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        server.await.unwrap();
    }
}
