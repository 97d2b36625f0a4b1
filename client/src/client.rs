// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

//! Client for the `/recurring-rules` endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use atelier_core::{Rule, RuleBackend, RuleDraft};
use reqwest::Method;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::HttpClient;

const RULES_PATH: &str = "/recurring-rules";

/// Envelope keys some deployments wrap payloads in.
const ENVELOPE_KEYS: [&str; 2] = ["data", "rules"];

/// Client for the rule persistence service.
///
/// # Example
///
/// ```ignore
/// use atelier_client::{ApiConfig, AuthMethod, RuleClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ApiConfig {
///     base_url: "https://api.example.com".to_string(),
///     auth: AuthMethod::Bearer { token: "secret".to_string() },
///     ..Default::default()
/// };
///
/// let client = RuleClient::new(config)?;
/// let rules = client.list_rules(Some("workshop-1")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RuleClient {
    http: Arc<HttpClient>,
}

impl RuleClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or HTTP client initialization fails.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = HttpClient::new(config)?;
        Ok(Self {
            http: Arc::new(http),
        })
    }

    /// Lists rules, optionally restricted to one workshop.
    ///
    /// Records that cannot be decoded are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a rule list.
    #[tracing::instrument(skip(self))]
    pub async fn list_rules(&self, workshop_id: Option<&str>) -> Result<Vec<Rule>, ApiError> {
        let mut req = self
            .http
            .build_request(Method::GET, &self.http.url(RULES_PATH));
        if let Some(id) = workshop_id {
            req = req.query(&[("workshopId", id)]);
        }

        let body = self.http.execute(req).await?.text().await?;
        let items = match unwrap_envelope(serde_json::from_str(&body)?) {
            Value::Array(items) => items,
            other => {
                return Err(ApiError::InvalidResponse(format!(
                    "expected a rule list, got {}",
                    kind(&other)
                )));
            }
        };

        let rules: Vec<Rule> = items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Rule>(item) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    tracing::warn!("skipping undecodable rule: {e}");
                    None
                }
            })
            .collect();
        tracing::debug!(count = rules.len(), "fetched rules");
        Ok(rules)
    }

    /// Creates a rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a rule.
    #[tracing::instrument(skip_all, fields(workshop_id = %draft.workshop_id))]
    pub async fn create_rule(&self, draft: &RuleDraft) -> Result<Rule, ApiError> {
        let url = self.http.url(RULES_PATH);
        self.send_draft(Method::POST, &url, draft).await
    }

    /// Replaces the rule with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no such rule exists.
    #[tracing::instrument(skip(self, draft))]
    pub async fn update_rule(&self, id: &str, draft: &RuleDraft) -> Result<Rule, ApiError> {
        let url = self.rule_url(id)?;
        self.send_draft(Method::PUT, &url, draft).await
    }

    /// Deletes the rule with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no such rule exists.
    #[tracing::instrument(skip(self))]
    pub async fn delete_rule(&self, id: &str) -> Result<(), ApiError> {
        let url = self.rule_url(id)?;
        self.http
            .execute(self.http.build_request(Method::DELETE, &url))
            .await?;
        Ok(())
    }

    async fn send_draft(
        &self,
        method: Method,
        url: &str,
        draft: &RuleDraft,
    ) -> Result<Rule, ApiError> {
        let body = serde_json::to_vec(draft)?;
        let resp = self
            .http
            .execute(
                self.http
                    .build_request(method, url)
                    .header("Content-Type", "application/json")
                    .body(body),
            )
            .await?;

        let text = resp.text().await?;
        let value = unwrap_envelope(serde_json::from_str(&text)?);
        if !value.is_object() {
            return Err(ApiError::InvalidResponse(format!(
                "expected a rule, got {}",
                kind(&value)
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    fn rule_url(&self, id: &str) -> Result<String, ApiError> {
        let id = id.trim();
        if id.is_empty() || id.contains('/') {
            return Err(ApiError::Config(format!("invalid rule id: {id:?}")));
        }
        Ok(self.http.url(&format!("{RULES_PATH}/{id}")))
    }
}

#[async_trait]
impl RuleBackend for RuleClient {
    type Error = ApiError;

    async fn list(&self, workshop_id: Option<&str>) -> Result<Vec<Rule>, Self::Error> {
        self.list_rules(workshop_id).await
    }

    async fn create(&self, draft: &RuleDraft) -> Result<Rule, Self::Error> {
        self.create_rule(draft).await
    }

    async fn update(&self, id: &str, draft: &RuleDraft) -> Result<Rule, Self::Error> {
        self.update_rule(id, draft).await
    }

    async fn delete(&self, id: &str) -> Result<(), Self::Error> {
        self.delete_rule(id).await
    }
}

/// Strips a `{ "data": ... }` or `{ "rules": ... }` wrapper. Objects carrying an id are
/// records, not envelopes.
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if !map.contains_key("id") && !map.contains_key("_id") => {
            match ENVELOPE_KEYS.iter().find_map(|k| map.remove(*k)) {
                Some(inner) => inner,
                None => Value::Object(map),
            }
        }
        other => other,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
