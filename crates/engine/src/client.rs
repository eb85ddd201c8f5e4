//! Generic JSON request client used by the controller.

use std::future::Future;

use reqwest::{Method, Url};
use serde_json::Value;

use crate::error::ClientError;

/// The request surface the controller needs from an HTTP client.
///
/// Paths are relative to the backend root (`/transactions`, `/members`...).
/// Successful responses yield the decoded JSON body, or `Value::Null` when
/// the body is empty.
pub trait Transport {
    fn get(&self, path: &str) -> impl Future<Output = Result<Value, ClientError>> + Send;

    fn post(
        &self,
        path: &str,
        body: Value,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send;

    fn put(
        &self,
        path: &str,
        body: Value,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send;

    fn delete(&self, path: &str) -> impl Future<Output = Result<Value, ClientError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ClientError::InvalidUrl(format!("{base_url}: {err}")))?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|err| ClientError::InvalidUrl(format!("{joined}: {err}")))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let endpoint = self.url(path)?;
        tracing::debug!("{method} {endpoint}");

        let mut req = self.http.request(method, endpoint);
        if let Some(body) = body {
            req = req.json(&body);
        }

        let res = req.send().await?;
        let status = res.status();
        let bytes = res.bytes().await?;

        if status.is_success() {
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let message = serde_json::from_slice::<Value>(&bytes)
            .ok()
            .and_then(|body| {
                body.get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            });
        Err(ClientError::Server { status, message })
    }
}

impl Transport for HttpClient {
    async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.send(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        self.send(Method::PUT, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        self.send(Method::DELETE, path, None).await
    }
}
