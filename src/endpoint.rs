//! The seam between request parameter objects and the transport.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::errors::ApiError;
use crate::params::ParamBags;

/// One REST operation: where it goes, what it carries, how to read the reply.
pub trait Endpoint {
    type Output;

    fn method(&self) -> Method;

    /// Path segments below the base URL, unencoded.
    fn path_segments(&self) -> Result<Vec<String>, ApiError>;

    fn bags(&self) -> &ParamBags;

    /// Reads every required field so that a missing one fails before sending.
    fn check_required(&self) -> Result<(), ApiError> {
        Ok(())
    }

    /// Whether the body bag is sent as JSON.
    fn sends_body(&self) -> bool {
        false
    }

    fn decode(body: &str) -> Result<Self::Output, ApiError>;

    /// Base URL + percent-encoded path + populated query entries.
    fn request_url(&self, base_url: &Url) -> Result<Url, ApiError> {
        let mut url = base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ApiError::Configuration(format!("base URL cannot carry a path: {}", base_url))
            })?;
            segments.pop_if_empty();
            for segment in self.path_segments()? {
                segments.push(&segment);
            }
        }

        let pairs = self.bags().query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        Ok(url)
    }

    fn json_body(&self) -> Result<Option<Value>, ApiError> {
        self.check_required()?;
        if !self.sends_body() {
            return Ok(None);
        }
        Ok(Some(self.bags().body().clone().into_value()))
    }
}

fn parse_present(body: &str, what: &str) -> Result<Value, ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::NullResult(format!("empty response body for {}", what)));
    }
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::Deserialization(format!("{} response: {}", what, e)))?;
    if value.is_null() {
        return Err(ApiError::NullResult(format!("null response body for {}", what)));
    }
    Ok(value)
}

/// Decodes a single resource.
pub fn decode_one<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, ApiError> {
    let value = parse_present(body, what)?;
    T::deserialize(&value)
        .map_err(|e| ApiError::Deserialization(format!("{} response: {}", what, e)))
}

/// Decodes a list response.
///
/// Accepts either a bare JSON array or an envelope object holding the array
/// under `collection_key` (e.g. `{"companies": [...], "total_company": 2}`).
pub fn decode_list<T: DeserializeOwned>(
    body: &str,
    collection_key: &str,
) -> Result<Vec<T>, ApiError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListPayload {
        Bare(Vec<Value>),
        Envelope(serde_json::Map<String, Value>),
    }

    let value = parse_present(body, collection_key)?;
    let items = match ListPayload::deserialize(&value) {
        Ok(ListPayload::Bare(items)) => items,
        Ok(ListPayload::Envelope(mut envelope)) => match envelope.remove(collection_key) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => {
                return Err(ApiError::NullResult(format!(
                    "list response has no `{}`",
                    collection_key
                )))
            }
            Some(_) => {
                return Err(ApiError::Deserialization(format!(
                    "list response `{}` is not an array",
                    collection_key
                )))
            }
        },
        Err(_) => {
            return Err(ApiError::Deserialization(format!(
                "{} response is neither an array nor an object",
                collection_key
            )))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            T::deserialize(item).map_err(|e| {
                ApiError::Deserialization(format!("{}[{}]: {}", collection_key, idx, e))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Company;

    #[test]
    fn test_decode_one_rejects_empty_and_null() {
        assert!(matches!(
            decode_one::<Company>("", "company"),
            Err(ApiError::NullResult(_))
        ));
        assert!(matches!(
            decode_one::<Company>("null", "company"),
            Err(ApiError::NullResult(_))
        ));
        assert!(matches!(
            decode_one::<Company>("{not json", "company"),
            Err(ApiError::Deserialization(_))
        ));
    }

    #[test]
    fn test_decode_list_accepts_envelope_and_bare_array() {
        let envelope = r#"{"companies":[{"source_id":"a"},{"source_id":"b"}],"total_company":2}"#;
        let companies: Vec<Company> = decode_list(envelope, "companies").unwrap();
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[1].source_id().unwrap().as_deref(), Some("b"));

        let bare: Vec<Company> = decode_list(r#"[{"source_id":"a"}]"#, "companies").unwrap();
        assert_eq!(bare.len(), 1);
    }

    #[test]
    fn test_decode_list_missing_collection_is_null_result() {
        let result: Result<Vec<Company>, _> = decode_list(r#"{"total_company":0}"#, "companies");
        assert!(matches!(result, Err(ApiError::NullResult(_))));

        let empty: Vec<Company> = decode_list(r#"{"companies":[]}"#, "companies").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_decode_list_rejects_scalars() {
        let result: Result<Vec<Company>, _> = decode_list("42", "companies");
        assert!(matches!(result, Err(ApiError::Deserialization(_))));
    }
}
