//! Registry namespace operations and creation-mode resolution.

use crate::services::graphql::{join_messages, GraphqlClient, RemoteMessage};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

/// Remote namespace mutations.
pub trait NamespaceApi {
    fn create_namespace_with_owner_id(&self, name: &str, org_id: &Uuid) -> anyhow::Result<()>;
    /// `vcs_type` is sent as given; callers upper-case it.
    fn create_namespace(&self, name: &str, org_name: &str, vcs_type: &str) -> anyhow::Result<()>;
    fn rename_namespace(&self, old_name: &str, new_name: &str) -> anyhow::Result<()>;
    fn delete_namespace_alias(&self, name: &str) -> anyhow::Result<()>;
}

/// How `namespace create` was asked to identify the owning organization.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateMode {
    ByOrgId { org_id: Uuid },
    ByVcsOrgName { vcs_type: String, org_name: String },
    ShowHelp,
}

impl CreateMode {
    /// A usable org id wins. An org id that is not a UUID is ignored, and the
    /// vcs-type/org-name pair is used when both were given.
    pub fn resolve(org_id: Option<&str>, vcs_type: Option<&str>, org_name: Option<&str>) -> Self {
        if let Some(org_id) = org_id.map(str::trim).filter(|s| !s.is_empty()) {
            match Uuid::parse_str(org_id) {
                Ok(org_id) => return CreateMode::ByOrgId { org_id },
                Err(e) => tracing::debug!(%org_id, error = %e, "ignoring org id that is not a uuid"),
            }
        }
        match (vcs_type, org_name) {
            (Some(vcs_type), Some(org_name)) => CreateMode::ByVcsOrgName {
                vcs_type: vcs_type.to_string(),
                org_name: org_name.to_string(),
            },
            _ => CreateMode::ShowHelp,
        }
    }
}

const CREATE_NAMESPACE: &str = r#"mutation($name: String!, $organizationId: UUID!) {
  createNamespace(name: $name, organizationId: $organizationId) {
    namespace { id }
    errors { message type }
  }
}"#;

const ORGANIZATION_ID: &str = r#"query($orgName: String!, $vcsType: VCSType!) {
  organization(name: $orgName, vcsType: $vcsType) { id }
}"#;

const NAMESPACE_ID: &str = r#"query($name: String!) {
  registryNamespace(name: $name) { id }
}"#;

const RENAME_NAMESPACE: &str = r#"mutation($namespaceId: UUID!, $newName: String!) {
  renameNamespace(namespaceId: $namespaceId, newName: $newName) {
    namespace { id }
    errors { message type }
  }
}"#;

const DELETE_NAMESPACE_ALIAS: &str = r#"mutation($name: String!) {
  deleteNamespaceAlias(name: $name) {
    deleted
    errors { message type }
  }
}"#;

#[derive(Deserialize)]
struct Node {
    id: String,
}

#[derive(Deserialize)]
struct NamespacePayload {
    #[serde(default)]
    errors: Vec<RemoteMessage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateNamespaceData {
    create_namespace: NamespacePayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenameNamespaceData {
    rename_namespace: NamespacePayload,
}

#[derive(Deserialize)]
struct OrganizationData {
    organization: Option<Node>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NamespaceIdData {
    registry_namespace: Option<Node>,
}

#[derive(Deserialize)]
struct DeleteAliasPayload {
    #[serde(default)]
    deleted: bool,
    #[serde(default)]
    errors: Vec<RemoteMessage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteAliasData {
    delete_namespace_alias: DeleteAliasPayload,
}

fn payload_errors(errors: &[RemoteMessage]) -> anyhow::Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("{}", join_messages(errors))
    }
}

/// Namespace operations against the registry's GraphQL api.
pub struct RegistryClient {
    gql: GraphqlClient,
}

impl RegistryClient {
    pub fn new(gql: GraphqlClient) -> Self {
        Self { gql }
    }

    fn organization_id(&self, org_name: &str, vcs_type: &str) -> anyhow::Result<String> {
        let data: OrganizationData = self.gql.run(
            ORGANIZATION_ID,
            json!({"orgName": org_name, "vcsType": vcs_type}),
        )?;
        data.organization.map(|o| o.id).ok_or_else(|| {
            anyhow::anyhow!(
                "organization {} not found for vcs type {}",
                org_name,
                vcs_type.to_ascii_lowercase()
            )
        })
    }

    fn namespace_id(&self, name: &str) -> anyhow::Result<String> {
        let data: NamespaceIdData = self.gql.run(NAMESPACE_ID, json!({"name": name}))?;
        data.registry_namespace
            .map(|n| n.id)
            .ok_or_else(|| anyhow::anyhow!("namespace {} not found", name))
    }

    fn create_with_id(&self, name: &str, org_id: &str) -> anyhow::Result<()> {
        let data: CreateNamespaceData = self.gql.run(
            CREATE_NAMESPACE,
            json!({"name": name, "organizationId": org_id}),
        )?;
        payload_errors(&data.create_namespace.errors)
    }
}

impl NamespaceApi for RegistryClient {
    fn create_namespace_with_owner_id(&self, name: &str, org_id: &Uuid) -> anyhow::Result<()> {
        self.create_with_id(name, &org_id.to_string())
    }

    fn create_namespace(&self, name: &str, org_name: &str, vcs_type: &str) -> anyhow::Result<()> {
        let org_id = self.organization_id(org_name, vcs_type)?;
        self.create_with_id(name, &org_id)
    }

    fn rename_namespace(&self, old_name: &str, new_name: &str) -> anyhow::Result<()> {
        let namespace_id = self.namespace_id(old_name)?;
        let data: RenameNamespaceData = self.gql.run(
            RENAME_NAMESPACE,
            json!({"namespaceId": namespace_id, "newName": new_name}),
        )?;
        payload_errors(&data.rename_namespace.errors)
    }

    fn delete_namespace_alias(&self, name: &str) -> anyhow::Result<()> {
        let data: DeleteAliasData = self
            .gql
            .run(DELETE_NAMESPACE_ALIAS, json!({"name": name}))?;
        let payload = data.delete_namespace_alias;
        payload_errors(&payload.errors)?;
        if !payload.deleted {
            anyhow::bail!("namespace alias {} was not deleted", name);
        }
        Ok(())
    }
}
