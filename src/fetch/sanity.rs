//! Sanity HTTP API: GROQ queries and create mutations.

use super::{FetchError, send_json};
use crate::config::{self, CmsConfig};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

#[derive(Deserialize)]
struct QueryResponse<T> {
    result: T,
}

#[derive(Deserialize)]
struct MutateResponse {
    #[serde(default)]
    results: Vec<MutateResult>,
}

#[derive(Deserialize)]
struct MutateResult {
    id: String,
}

pub struct SanityClient<'a> {
    http: &'a Client,
    config: &'a CmsConfig,
    token: Option<String>,
}

impl<'a> SanityClient<'a> {
    /// Client with the token from `cms.token_env`, if set.
    pub fn new(http: &'a Client, config: &'a CmsConfig) -> Self {
        Self::with_token(http, config, config::secret(&config.token_env))
    }

    pub fn with_token(http: &'a Client, config: &'a CmsConfig, token: Option<String>) -> Self {
        Self {
            http,
            config,
            token,
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/v{}/data/{}/{}",
            self.config.base_url(self.token.is_some()),
            self.config.api_version,
            action,
            self.config.dataset
        )
    }

    /// Run a GROQ query and decode `result` as `T`.
    pub fn query<T: DeserializeOwned>(&self, groq: &str) -> Result<T, FetchError> {
        let mut request = self.http.get(self.endpoint("query")).query(&[("query", groq)]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response: QueryResponse<T> = send_json(request)?;
        Ok(response.result)
    }

    /// Run a GROQ query returning an array, decoding each element on its own.
    ///
    /// Documents that fail to decode (a required field left empty in the
    /// studio, say) are logged and dropped instead of failing the whole list.
    pub fn query_documents<T: DeserializeOwned>(&self, groq: &str) -> Result<Vec<T>, FetchError> {
        let raw: Option<Vec<Value>> = self.query(groq)?;
        Ok(raw
            .unwrap_or_default()
            .into_iter()
            .filter_map(|doc| {
                let id = doc
                    .get("_id")
                    .and_then(Value::as_str)
                    .unwrap_or("<no id>")
                    .to_string();
                match serde_json::from_value(doc) {
                    Ok(parsed) => Some(parsed),
                    Err(e) => {
                        log::warn!("skipping CMS document {id}: {e}");
                        None
                    }
                }
            })
            .collect())
    }

    /// Create one document and return its id. Requires a token.
    pub fn create(&self, document: &Value) -> Result<String, FetchError> {
        let token = self
            .token
            .as_ref()
            .ok_or_else(|| FetchError::MissingCredential(self.config.token_env.clone()))?;
        let body = json!({ "mutations": [{ "create": document }] });
        let request = self
            .http
            .post(self.endpoint("mutate"))
            .query(&[("returnIds", "true")])
            .bearer_auth(token)
            .json(&body);
        let response: MutateResponse = send_json(request)?;
        response
            .results
            .into_iter()
            .next()
            .map(|r| r.id)
            .ok_or_else(|| FetchError::Api("mutation returned no document id".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_include_version_and_dataset() {
        let http = Client::new();
        let config = CmsConfig {
            project_id: "p1".to_string(),
            ..CmsConfig::default()
        };
        let anon = SanityClient::with_token(&http, &config, None);
        assert_eq!(
            anon.endpoint("query"),
            "https://p1.apicdn.sanity.io/v2024-01-01/data/query/production"
        );
        let authed = SanityClient::with_token(&http, &config, Some("t".into()));
        assert_eq!(
            authed.endpoint("mutate"),
            "https://p1.api.sanity.io/v2024-01-01/data/mutate/production"
        );
    }

    #[test]
    fn create_without_token_fails_before_any_request() {
        let http = Client::new();
        let config = CmsConfig::default();
        let client = SanityClient::with_token(&http, &config, None);
        let err = client.create(&json!({"_type": "event"})).unwrap_err();
        assert!(matches!(err, FetchError::MissingCredential(ref name) if name == "SANITY_TOKEN"));
    }
}
