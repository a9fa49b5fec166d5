//! HTTP client for jomun-service

use serde::Deserialize;

pub struct ServiceClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub hint: String,
}

#[derive(Debug)]
pub enum ClientError {
    Connection(String),
    Service(ErrorEnvelope),
    Parse(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(msg) => {
                write!(f, "connection error: {} (is jomun-service running?)", msg)
            }
            Self::Service(env) => write!(f, "[{}] {} — {}", env.code, env.message, env.hint),
            Self::Parse(msg) => write!(f, "unexpected response from service: {}", msg),
        }
    }
}

impl ServiceClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn get(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<serde_json::Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .query(params)
            .send()
            .map_err(|e| ClientError::Connection(e.to_string()))?;
        Self::decode(resp)
    }

    pub fn post(&self, path: &str) -> Result<serde_json::Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .post(&url)
            .send()
            .map_err(|e| ClientError::Connection(e.to_string()))?;
        Self::decode(resp)
    }

    fn decode(resp: reqwest::blocking::Response) -> Result<serde_json::Value, ClientError> {
        if !resp.status().is_success() {
            return match resp.json::<ErrorEnvelope>() {
                Ok(envelope) => Err(ClientError::Service(envelope)),
                Err(e) => Err(ClientError::Parse(e.to_string())),
            };
        }
        resp.json().map_err(|e| ClientError::Parse(e.to_string()))
    }
}
