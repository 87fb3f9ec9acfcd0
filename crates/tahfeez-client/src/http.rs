use std::sync::Arc;
use std::time::Instant;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use tahfeez_core::{extract_error_message, Language};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::AuthClient;
use crate::config::ClientConfig;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Versioned API root that endpoint templates are joined onto.
#[derive(Debug, Clone)]
pub struct ApiBase {
    root: String,
}

impl ApiBase {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_root())
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.root, path.trim_start_matches('/'))
    }

    pub fn url_with_query(&self, path: &str, params: Vec<(String, String)>) -> String {
        let mut url = self.url(path);
        append_params(&mut url, params);
        url
    }
}

pub fn append_params(url: &mut String, params: Vec<(String, String)>) {
    if params.is_empty() {
        return;
    }
    let query = params
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
        .collect::<Vec<String>>()
        .join("&");
    url.push(if url.contains('?') { '&' } else { '?' });
    url.push_str(&query);
}

fn carries_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

/// Adds `language` to a JSON object body. A missing body becomes
/// `{"language": ..}`; a body that is not a JSON object is returned as is.
pub fn try_merge_language(body: Option<&str>, language: Language) -> String {
    let Some(body) = body else {
        return serde_json::json!({ "language": language }).to_string();
    };
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(mut map)) => {
            map.insert(
                "language".to_string(),
                serde_json::Value::String(language.as_str().to_string()),
            );
            serde_json::Value::Object(map).to_string()
        }
        _ => body.to_string(),
    }
}

/// Best-effort error text for a non-success response.
pub async fn failure_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| extract_error_message(&value))
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}

/// Sends a request with the session's bearer token and, on a 401, refreshes
/// once and retries once.
#[derive(Clone)]
pub struct AuthenticatedRequest {
    http: reqwest::Client,
    auth: Arc<AuthClient>,
}

impl AuthenticatedRequest {
    pub fn new(http: reqwest::Client, auth: Arc<AuthClient>) -> Self {
        Self { http, auth }
    }

    pub async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
        language: Option<Language>,
    ) -> Result<Response, reqwest::Error> {
        let body = match language {
            Some(language) if carries_body(&method) => {
                Some(try_merge_language(body.as_deref(), language))
            }
            _ => body,
        };

        let sent_with = self.auth.tokens().access_token();
        let response = self
            .send_once(&method, url, body.as_deref(), sent_with.as_deref(), language)
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        info!(
            method = %method,
            url = %url,
            "http request unauthorized; attempting token refresh"
        );
        let refreshed = self.auth.refresh_after_rejection(sent_with.as_deref()).await;
        if !refreshed.success {
            warn!(
                method = %method,
                url = %url,
                error = refreshed.error.as_deref().unwrap_or_default(),
                "token refresh failed; returning original response"
            );
            return Ok(response);
        }

        let token = self.auth.tokens().access_token();
        self.send_once(&method, url, body.as_deref(), token.as_deref(), language)
            .await
    }

    async fn send_once(
        &self,
        method: &Method,
        url: &str,
        body: Option<&str>,
        token: Option<&str>,
        language: Option<Language>,
    ) -> Result<Response, reqwest::Error> {
        let request_id = Uuid::now_v7();
        let mut builder = self
            .http
            .request(method.clone(), url)
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, request_id.to_string());
        if let Some(language) = language {
            builder = builder.header(ACCEPT_LANGUAGE, language.as_str());
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        debug!(method = %method, url = %url, request_id = %request_id, "http request");
        let start = Instant::now();
        let response = builder.send().await?;
        debug!(
            method = %method,
            url = %url,
            request_id = %request_id,
            status = %response.status(),
            elapsed_ms = start.elapsed().as_millis(),
            "http response"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn merge_adds_language_to_object_body() {
        let merged = try_merge_language(Some(r#"{"rating": 5}"#), Language::Ar);
        let value: Value = serde_json::from_str(&merged).expect("json");
        assert_eq!(value, json!({"rating": 5, "language": "ar"}));
    }

    #[test]
    fn merge_creates_body_when_missing() {
        let merged = try_merge_language(None, Language::En);
        assert_eq!(merged, r#"{"language":"en"}"#);
    }

    #[test]
    fn merge_leaves_non_object_bodies_alone() {
        assert_eq!(try_merge_language(Some("not json"), Language::Ar), "not json");
        assert_eq!(try_merge_language(Some("[1,2]"), Language::Ar), "[1,2]");
    }

    #[test]
    fn urls_join_root_and_query() {
        let base = ApiBase::new("http://localhost:8000/api/v1/");
        assert_eq!(base.url("/goals/"), "http://localhost:8000/api/v1/goals/");
        let url = base.url_with_query(
            "/messages/",
            vec![
                ("search".to_string(), "keep going".to_string()),
                ("page".to_string(), "2".to_string()),
            ],
        );
        assert_eq!(
            url,
            "http://localhost:8000/api/v1/messages/?search=keep%20going&page=2"
        );
        assert_eq!(base.url_with_query("/goals/", Vec::new()), base.url("/goals/"));
    }
}
