use reqwest::header::USER_AGENT;
use url::Url;

use crate::endpoint::Endpoint;
use crate::errors::ApiError;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "Api-Key";

const CLIENT_USER_AGENT: &str = concat!("kyc-aml-client-rs/", env!("CARGO_PKG_VERSION"));

/// Sends one [`Endpoint`] request and decodes its reply.
///
/// Cloning is cheap: the underlying `reqwest::Client` shares its connection
/// pool between clones.
#[derive(Clone)]
pub struct ApiTransport {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl ApiTransport {
    pub fn new(client: reqwest::Client, base_url: Url, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Executes a single request.
    ///
    /// Required fields are checked before anything is sent. A non-success
    /// status becomes [`ApiError::Http`] with the raw response text; nothing
    /// is retried.
    pub async fn execute<E: Endpoint>(&self, endpoint: &E) -> Result<E::Output, ApiError> {
        let body = endpoint.json_body()?;
        let url = endpoint.request_url(&self.base_url)?;
        let method = endpoint.method();

        tracing::info!(method = %method, path = url.path(), "Sending Dataleon API request");
        tracing::debug!("Dataleon API URL: {}", url);

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .header(USER_AGENT, CLIENT_USER_AGENT);

        for (name, value) in endpoint.bags().headers() {
            request = request.header(name.as_str(), value.as_str());
        }

        if let Some(ref json) = body {
            request = request.json(json);
        }

        let response = request.send().await.map_err(|e| {
            ApiError::Transport(format!("{} {} failed: {}", method, url.path(), e))
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            ApiError::Transport(format!("Failed to read response body: {}", e))
        })?;

        if !status.is_success() {
            tracing::warn!(
                method = %method,
                path = url.path(),
                status = status.as_u16(),
                "Dataleon API returned error status"
            );
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let output = E::decode(&text)?;
        tracing::info!(
            method = %method,
            path = url.path(),
            status = status.as_u16(),
            "Dataleon API request succeeded"
        );
        Ok(output)
    }
}

impl std::fmt::Debug for ApiTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiTransport")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
