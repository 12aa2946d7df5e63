use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::constants::DEFAULT_CONTEXT;

fn default_context() -> String {
    DEFAULT_CONTEXT.to_string()
}

/// One decision log entry, rendered verbatim.
pub type DecisionLogEntry = serde_json::Value;

/// Evaluation outcome returned by the decide endpoint.
pub type Decision = serde_json::Value;

/// Policy resource as the server returned it. Fields the server adds or omits
/// pass through to the output unchanged.
pub type Policy = serde_json::Value;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CreationRequest {
    pub name: String,
    #[serde(default = "default_context")]
    pub context: String,
    pub content: String,
}

/// Partial update. A `None` field is left untouched on the server.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct UpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UpdateRequest {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.active.is_none() && self.context.is_none() && self.name.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecisionQueryRequest {
    pub after: Option<DateTime<Utc>>,
    pub before: Option<DateTime<Utc>>,
    pub branch: Option<String>,
    pub project_id: Option<String>,
    /// Pagination cursor, advanced by the paginator only.
    pub offset: usize,
}

impl DecisionQueryRequest {
    /// Query string pairs for the decision log endpoint. Unset filters are omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(after) = self.after {
            pairs.push(("after", after.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if let Some(before) = self.before {
            pairs.push(("before", before.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if let Some(branch) = self.branch.as_deref().filter(|b| !b.is_empty()) {
            pairs.push(("branch", branch.to_string()));
        }
        if let Some(project_id) = self.project_id.as_deref().filter(|p| !p.is_empty()) {
            pairs.push(("project_id", project_id.to_string()));
        }
        if self.offset > 0 {
            pairs.push(("offset", self.offset.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DecisionRequest {
    pub context: String,
    pub input: String,
}

/// On-disk connection settings (`~/.config/regent/config.toml`).
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}
