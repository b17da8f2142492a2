//! API client for communicating with the Cost Optimizer API

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// API client for the Cost Optimizer API
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid API URL")?;

        Ok(Self { client, base_url })
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }

        response.json().await.context("Failed to parse response")
    }

    /// Make a POST request without a body
    pub async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .post(url)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }

        response.json().await.context("Failed to parse response")
    }
}

// API response types

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub resource_id: String,
    pub resource_type: String,
    pub message: String,
    pub estimated_savings: f64,
    pub severity: String,
    pub priority: u8,
    pub action: String,
    #[serde(default)]
    pub details: HashMap<String, String>,
    pub doc_link: String,
    pub timestamp: String,
}

/// A resource snapshot; variant-specific attributes stay dynamic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub kind: String,
    pub id: String,
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Resource {
    pub fn owner(&self) -> String {
        self.attributes
            .get("owner")
            .and_then(|v| v.as_str())
            .unwrap_or("-")
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub sink: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_parses_suggestions() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/suggestions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{
                    "resource_id": "vm-1",
                    "resource_type": "VM",
                    "message": "Underutilized VM (CPU < 10%)",
                    "estimated_savings": 30.0,
                    "severity": "critical",
                    "priority": 1,
                    "action": "downsize-instance",
                    "details": {"owner": "Finance Team"},
                    "doc_link": "https://example.com",
                    "timestamp": "2024-06-01T12:00:00Z"
                }]"#,
            )
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let suggestions: Vec<Suggestion> = client.get("suggestions").await.unwrap();

        mock.assert_async().await;
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].resource_id, "vm-1");
        assert_eq!(suggestions[0].severity, "critical");
    }

    #[tokio::test]
    async fn test_get_surfaces_api_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/suggestions")
            .with_status(500)
            .with_body(r#"{"error": "store unavailable"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let result: Result<Vec<Suggestion>> = client.get("suggestions").await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("500"));
    }
}
