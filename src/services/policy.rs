use crate::domain::constants::USER_AGENT;
use crate::domain::models::{
    CreationRequest, Decision, DecisionLogEntry, DecisionQueryRequest, DecisionRequest, Policy,
    UpdateRequest,
};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(thiserror::Error, Debug)]
pub enum PolicyError {
    #[error("invalid policy base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unexpected status-code: {status} - {message}")]
    Status { status: u16, message: String },
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("update request must set at least one of content, active, context, or name")]
    EmptyUpdate,
}

/// Owner-scoped policy api. Every call is a single request; nothing retries.
pub trait PolicyApi {
    fn list_policies(
        &self,
        owner_id: &str,
        active: Option<bool>,
    ) -> Result<Vec<Policy>, PolicyError>;

    fn create_policy(
        &self,
        owner_id: &str,
        request: CreationRequest,
    ) -> Result<Policy, PolicyError>;

    fn get_policy(&self, owner_id: &str, policy_id: &str) -> Result<Policy, PolicyError>;

    fn delete_policy(&self, owner_id: &str, policy_id: &str) -> Result<(), PolicyError>;

    fn update_policy(
        &self,
        owner_id: &str,
        policy_id: &str,
        request: UpdateRequest,
    ) -> Result<Policy, PolicyError>;

    /// Returns a single page. An empty page means there is nothing past `request.offset`.
    fn get_decision_logs(
        &self,
        owner_id: &str,
        request: &DecisionQueryRequest,
    ) -> Result<Vec<DecisionLogEntry>, PolicyError>;

    fn make_decision(
        &self,
        owner_id: &str,
        request: DecisionRequest,
    ) -> Result<Decision, PolicyError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// The base url is parsed when each request is built, not at construction.
pub struct PolicyClient {
    base_url: String,
    token: Option<String>,
    http: Client,
}

fn parse_base_url(raw: &str) -> Result<Url, PolicyError> {
    let invalid = |reason: String| PolicyError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let parsed = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if parsed.cannot_be_a_base() {
        return Err(invalid("url cannot be used as a base".to_string()));
    }
    Ok(parsed)
}

impl PolicyClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, PolicyError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            base_url: base_url.to_string(),
            token: token.filter(|t| !t.is_empty()).map(str::to_string),
            http,
        })
    }

    fn owner_url(&self, owner_id: &str, tail: &[&str]) -> Result<Url, PolicyError> {
        let mut url = parse_base_url(&self.base_url)?;
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "v1", "owner", owner_id])
                .extend(tail);
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, %url, "policy api request");
        let rb = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.token {
            Some(token) => rb.header(reqwest::header::AUTHORIZATION, token),
            None => rb,
        }
    }

    fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, PolicyError> {
        let body = check_status(resp)?.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn check_status(resp: Response) -> Result<Response, PolicyError> {
    let status = resp.status();
    tracing::debug!(status = status.as_u16(), "policy api response");
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().map_err(|e| e.to_string());
    Err(status_error(status, body))
}

fn status_error(status: StatusCode, body: Result<String, String>) -> PolicyError {
    let message = match body {
        Ok(body) => serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.error)
            .unwrap_or_else(|_| body.trim().to_string()),
        Err(e) => format!("failed to read response body: {}", e),
    };
    if status == StatusCode::NOT_FOUND {
        let message = if message.is_empty() {
            "policy not found".to_string()
        } else {
            message
        };
        return PolicyError::NotFound(message);
    }
    PolicyError::Status {
        status: status.as_u16(),
        message,
    }
}

impl PolicyApi for PolicyClient {
    fn list_policies(
        &self,
        owner_id: &str,
        active: Option<bool>,
    ) -> Result<Vec<Policy>, PolicyError> {
        let mut url = self.owner_url(owner_id, &["policy"])?;
        if let Some(active) = active {
            url.query_pairs_mut()
                .append_pair("active", &active.to_string());
        }
        let resp = self.request(Method::GET, url).send()?;
        Self::decode(resp)
    }

    fn create_policy(
        &self,
        owner_id: &str,
        request: CreationRequest,
    ) -> Result<Policy, PolicyError> {
        let url = self.owner_url(owner_id, &["policy"])?;
        let resp = self.request(Method::POST, url).json(&request).send()?;
        Self::decode(resp)
    }

    fn get_policy(&self, owner_id: &str, policy_id: &str) -> Result<Policy, PolicyError> {
        let url = self.owner_url(owner_id, &["policy", policy_id])?;
        let resp = self.request(Method::GET, url).send()?;
        Self::decode(resp)
    }

    fn delete_policy(&self, owner_id: &str, policy_id: &str) -> Result<(), PolicyError> {
        let url = self.owner_url(owner_id, &["policy", policy_id])?;
        let resp = self.request(Method::DELETE, url).send()?;
        check_status(resp)?;
        Ok(())
    }

    fn update_policy(
        &self,
        owner_id: &str,
        policy_id: &str,
        request: UpdateRequest,
    ) -> Result<Policy, PolicyError> {
        if request.is_empty() {
            return Err(PolicyError::EmptyUpdate);
        }
        let url = self.owner_url(owner_id, &["policy", policy_id])?;
        let resp = self.request(Method::PATCH, url).json(&request).send()?;
        Self::decode(resp)
    }

    fn get_decision_logs(
        &self,
        owner_id: &str,
        request: &DecisionQueryRequest,
    ) -> Result<Vec<DecisionLogEntry>, PolicyError> {
        let mut url = self.owner_url(owner_id, &["decision"])?;
        let pairs = request.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        let resp = self.request(Method::GET, url).send()?;
        Self::decode(resp)
    }

    fn make_decision(
        &self,
        owner_id: &str,
        request: DecisionRequest,
    ) -> Result<Decision, PolicyError> {
        let url = self.owner_url(owner_id, &["decision"])?;
        let resp = self.request(Method::POST, url).json(&request).send()?;
        Self::decode(resp)
    }
}
