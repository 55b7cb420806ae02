//! Typed HTTP client for the `/api/highlights` endpoints.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::model::{CreateHighlight, ErrorResponse, Highlight, ReorderHighlights, UpdateHighlight};

#[derive(Debug, Clone)]
pub struct HighlightsApi {
    client: Client,
    base_url: String,
}

impl HighlightsApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/highlights", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/highlights/{}", self.base_url, urlencoding::encode(id))
    }

    pub async fn list(&self) -> Result<Vec<Highlight>, ClientError> {
        let resp = self.client.get(self.collection_url()).send().await?;
        parse_json(resp).await
    }

    pub async fn add(&self, text: &str) -> Result<Highlight, ClientError> {
        let resp = self
            .client
            .post(self.collection_url())
            .json(&CreateHighlight {
                text: text.to_string(),
            })
            .send()
            .await?;
        parse_json(resp).await
    }

    pub async fn update(&self, id: &str, text: &str) -> Result<Highlight, ClientError> {
        let resp = self
            .client
            .put(self.item_url(id))
            .json(&UpdateHighlight {
                text: text.to_string(),
            })
            .send()
            .await?;
        parse_json(resp).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let resp = self.client.delete(self.item_url(id)).send().await?;
        check_status(resp).await?;
        Ok(())
    }

    pub async fn reorder(&self, highlights: Vec<Highlight>) -> Result<Vec<Highlight>, ClientError> {
        let resp = self
            .client
            .post(format!("{}/reorder", self.collection_url()))
            .json(&ReorderHighlights {
                reordered_highlights: highlights,
            })
            .send()
            .await?;
        parse_json(resp).await
    }
}

async fn check_status(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    // Body is best effort; fall back to the status reason.
    let message = match resp.json::<ErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string(),
    };
    Err(ClientError::Status { status, message })
}

async fn parse_json<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let resp = check_status(resp).await?;
    Ok(resp.json::<T>().await?)
}
