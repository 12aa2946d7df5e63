use crate::domain::constants::USER_AGENT;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum GraphqlError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status-code: {status} - {body}")]
    Status { status: u16, body: String },
    #[error("{0}")]
    Remote(String),
    #[error("failed to decode graphql response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("graphql response contained no data")]
    MissingData,
}

/// Error entry as returned both at the top level and inside mutation payloads.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RemoteMessage {
    pub message: String,
}

pub fn join_messages(errors: &[RemoteMessage]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct Request<'a> {
    query: &'a str,
    variables: &'a serde_json::Value,
}

#[derive(Deserialize)]
struct Response<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<RemoteMessage>,
}

pub struct GraphqlClient {
    url: String,
    token: Option<String>,
    http: Client,
}

impl GraphqlClient {
    pub fn new(url: impl Into<String>, token: Option<&str>) -> Result<Self, GraphqlError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            url: url.into(),
            token: token.map(str::to_string),
            http,
        })
    }

    pub fn run<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, GraphqlError> {
        tracing::debug!(url = %self.url, %query, %variables, "graphql request");
        let mut rb = self
            .http
            .post(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&Request {
                query,
                variables: &variables,
            });
        if let Some(token) = &self.token {
            rb = rb.header(reqwest::header::AUTHORIZATION, token);
        }
        let resp = rb.send()?;
        let status = resp.status();
        let body = resp.text()?;
        tracing::debug!(status = status.as_u16(), %body, "graphql response");
        if !status.is_success() {
            return Err(GraphqlError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: Response<T> = serde_json::from_str(&body)?;
        if !parsed.errors.is_empty() {
            return Err(GraphqlError::Remote(join_messages(&parsed.errors)));
        }
        parsed.data.ok_or(GraphqlError::MissingData)
    }
}
