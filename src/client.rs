use std::sync::OnceLock;

use url::Url;

use crate::config::Config;
use crate::errors::ApiError;
use crate::services::{CompanyService, DocumentService, IndividualService};
use crate::transport::ApiTransport;

/// Entry point to the Dataleon KYC/AML API.
///
/// Services are built on first use and reused for the lifetime of the client.
///
/// ```no_run
/// use kyc_aml_client::{KycClient, ListCompaniesParams};
///
/// # async fn run() -> Result<(), kyc_aml_client::ApiError> {
/// let client = KycClient::from_env()?;
/// let params = ListCompaniesParams::new().with_workspace_id("wk_123").with_limit(10);
/// let companies = client.companies().list(&params).await?;
/// println!("{} companies", companies.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct KycClient {
    transport: ApiTransport,
    companies: OnceLock<CompanyService>,
    individuals: OnceLock<IndividualService>,
    documents: OnceLock<DocumentService>,
}

impl KycClient {
    /// Creates a client with a default `reqwest::Client`.
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build().map_err(|e| {
            ApiError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;
        Self::with_http_client(config, http)
    }

    /// Creates a client over a caller-configured `reqwest::Client`
    /// (timeouts, proxies, TLS settings).
    pub fn with_http_client(config: Config, http: reqwest::Client) -> Result<Self, ApiError> {
        if config.api_key.trim().is_empty() {
            return Err(ApiError::Configuration("API key cannot be empty".to_string()));
        }

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ApiError::Configuration(format!("Invalid base URL {}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Configuration(format!(
                "Base URL cannot carry a path: {}",
                config.base_url
            )));
        }

        Ok(Self {
            transport: ApiTransport::new(http, base_url, config.api_key),
            companies: OnceLock::new(),
            individuals: OnceLock::new(),
            documents: OnceLock::new(),
        })
    }

    /// Creates a client from `DATALEONLABS_API_KEY` / `DATALEONLABS_BASE_URL`.
    pub fn from_env() -> Result<Self, ApiError> {
        let config =
            Config::from_env().map_err(|e| ApiError::Configuration(format!("{:#}", e)))?;
        Self::new(config)
    }

    pub fn base_url(&self) -> &Url {
        self.transport.base_url()
    }

    /// Shared transport, for issuing any [`Endpoint`](crate::endpoint::Endpoint) directly.
    pub fn transport(&self) -> &ApiTransport {
        &self.transport
    }

    pub fn companies(&self) -> &CompanyService {
        self.companies
            .get_or_init(|| CompanyService::new(self.transport.clone()))
    }

    pub fn individuals(&self) -> &IndividualService {
        self.individuals
            .get_or_init(|| IndividualService::new(self.transport.clone()))
    }

    pub fn documents(&self) -> &DocumentService {
        self.documents
            .get_or_init(|| DocumentService::new(self.transport.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = KycClient::new(Config::new("token"));
        assert!(client.is_ok());
        assert_eq!(
            client.unwrap().base_url().as_str(),
            "https://inference.eu-west-1.dataleon.ai/"
        );
    }

    #[test]
    fn test_empty_api_key_is_configuration_error() {
        let err = KycClient::new(Config::new("  ")).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let err = KycClient::new(Config::new("token").with_base_url("not a url")).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));

        let err = KycClient::new(Config::new("token").with_base_url("mailto:ops@example.com"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn test_services_are_cached() {
        let client = KycClient::new(Config::new("token")).unwrap();
        assert!(std::ptr::eq(client.companies(), client.companies()));
        assert!(std::ptr::eq(client.individuals(), client.individuals()));
        assert!(std::ptr::eq(client.documents(), client.documents()));
    }
}
