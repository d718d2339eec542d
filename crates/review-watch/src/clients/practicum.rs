use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;

use super::{http_client, ClientError};
use crate::config::{PracticumConfig, Secret};
use crate::review::{FetchError, ReviewApi};

/// Client for the homework status endpoint.
pub struct PracticumClient {
    http: reqwest::Client,
    endpoint: String,
    token: Secret,
}

impl PracticumClient {
    pub fn new(config: &PracticumConfig) -> Result<Self, ClientError> {
        Ok(Self {
            http: http_client()?,
            endpoint: config.endpoint.clone(),
            token: config.token.clone(),
        })
    }

    fn transport(&self, err: reqwest::Error) -> FetchError {
        FetchError::Transport {
            endpoint: self.endpoint.clone(),
            reason: err.to_string(),
        }
    }
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ReviewApi for PracticumClient {
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, FetchError> {
        let response = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token.expose()))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|err| self.transport(err))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|err| FetchError::Decode {
            endpoint: self.endpoint.clone(),
            reason: err.to_string(),
        })
    }
}
