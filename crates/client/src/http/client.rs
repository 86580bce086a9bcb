use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tigris_domain::TigrisError;
use tracing::debug;

use crate::errors::ClientError;

/// HTTP client wrapper with timeout support and redirects disabled.
///
/// Redirects are never followed: the portal signals session failures through
/// redirect targets, so every 3xx must be visible to the caller. Requests are
/// never retried either; retry policy belongs to the embedding application.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, TigrisError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder. A single attempt, no retries.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, TigrisError> {
        let request = builder.build().map_err(|err| {
            let client_err: ClientError = err.into();
            TigrisError::from(client_err)
        })?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                debug!(%method, %url, %status, "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                let client_err: ClientError = err.into();
                Err(TigrisError::from(client_err))
            }
        }
    }
}

/// Read and decode a JSON response body. `what` names the call for the
/// error message; the URL is deliberately left out of it.
pub(crate) async fn decode_json<T>(response: Response, what: &str) -> Result<T, TigrisError>
where
    T: serde::de::DeserializeOwned,
{
    let body = response.text().await.map_err(|err| {
        let client_err: ClientError = err.into();
        TigrisError::from(client_err)
    })?;
    serde_json::from_str(&body)
        .map_err(|err| TigrisError::Parse(format!("{what} response did not match: {err}")))
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(30), user_agent: None }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, TigrisError> {
        let mut builder =
            ReqwestClient::builder().timeout(self.timeout).redirect(Policy::none()).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| {
            let client_err: ClientError = err.into();
            TigrisError::from(client_err)
        })?;

        Ok(HttpClient { client })
    }
}
