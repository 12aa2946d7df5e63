mod common;

use common::{TestEnv, TOKEN};
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{any, body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORG_ID: &str = "bb604b45-b6b0-4b81-ad80-796f15eddf87";

async fn refuse_everything(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn create_with_org_id_in_test_mode() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql-unstable"))
        .and(header("authorization", TOKEN))
        .and(body_string_contains("createNamespace"))
        .and(body_partial_json(
            json!({"variables": {"name": "foo-ns", "organizationId": ORG_ID}}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"createNamespace": {"namespace": {"id": "ns-1"}, "errors": []}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new();
    env.namespace(
        &server.uri(),
        &["create", "foo-ns", "--org-id", ORG_ID, "--integration-testing"],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains(format!(
        "This is the only namespace permitted for your organization with id {}.",
        ORG_ID
    )))
    .stdout(predicate::str::contains(
        "Are you sure you wish to create the namespace: `foo-ns`",
    ))
    .stdout(predicate::str::contains("Namespace `foo-ns` created."));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_with_vcs_and_org_name_looks_up_the_org() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("organization("))
        .and(body_partial_json(
            json!({"variables": {"orgName": "acme", "vcsType": "GITHUB"}}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"organization": {"id": ORG_ID}}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("createNamespace"))
        .and(body_partial_json(
            json!({"variables": {"name": "foo-ns", "organizationId": ORG_ID}}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"createNamespace": {"namespace": {"id": "ns-1"}, "errors": []}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new();
    env.namespace(
        &server.uri(),
        &["create", "foo-ns", "github", "acme", "--no-prompt", "--integration-testing"],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("You are creating a namespace").not())
    .stdout(predicate::str::contains("Namespace `foo-ns` created."));
}

#[tokio::test(flavor = "multi_thread")]
async fn declining_the_prompt_sends_nothing() {
    let server = MockServer::start().await;
    refuse_everything(&server).await;

    let env = TestEnv::new();
    env.namespace(&server.uri(), &["create", "foo-ns", "--org-id", ORG_ID])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("created").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_with_only_a_name_shows_help() {
    let server = MockServer::start().await;
    refuse_everything(&server).await;

    let env = TestEnv::new();
    env.namespace(&server.uri(), &["create", "foo-ns"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: regent namespace create"));
}

#[tokio::test(flavor = "multi_thread")]
async fn remote_errors_fail_the_command() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"createNamespace": {
                "namespace": null,
                "errors": [{"message": "namespace already exists", "type": "CONFLICT"}]
            }}
        })))
        .mount(&server)
        .await;

    let env = TestEnv::new();
    env.namespace(
        &server.uri(),
        &["create", "foo-ns", "--org-id", ORG_ID, "--no-prompt", "--integration-testing"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to create namespace"))
    .stderr(predicate::str::contains("namespace already exists"));
}

#[tokio::test(flavor = "multi_thread")]
async fn rename_resolves_namespace_id_first() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("registryNamespace"))
        .and(body_partial_json(json!({"variables": {"name": "old-ns"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"registryNamespace": {"id": "ns-1"}}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("renameNamespace"))
        .and(body_partial_json(
            json!({"variables": {"namespaceId": "ns-1", "newName": "new-ns"}}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"renameNamespace": {"namespace": {"id": "ns-1"}, "errors": []}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new();
    env.namespace(
        &server.uri(),
        &["rename", "old-ns", "new-ns", "--integration-testing"],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains(
        "Namespace `old-ns` renamed to `new-ns`. `old-ns` is an alias for `new-ns`",
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_alias_reports_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("deleteNamespaceAlias"))
        .and(body_partial_json(json!({"variables": {"name": "old-ns"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"deleteNamespaceAlias": {"deleted": true, "errors": []}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new();
    env.namespace(&server.uri(), &["delete-alias", "old-ns", "--integration-testing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Namespace alias `old-ns` deleted."));
}

#[test]
fn missing_token_is_reported() {
    let env = TestEnv::new();
    env.cmd()
        .args(["--host", "http://127.0.0.1:9", "namespace", "delete-alias", "x"])
        .args(["--integration-testing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("an api token is required"));
}

#[test]
fn token_is_read_from_the_config_file() {
    let env = TestEnv::new();
    let dir = env.home.join(".config/regent");
    std::fs::create_dir_all(&dir).expect("create config dir");
    std::fs::write(
        dir.join("config.toml"),
        "host = \"http://127.0.0.1:9\"\ntoken = \"from-file\"\n",
    )
    .expect("write config");

    // the token check passes, so the failure comes from the unreachable host
    env.cmd()
        .args(["namespace", "delete-alias", "x", "--integration-testing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("an api token is required").not())
        .stderr(predicate::str::contains("failed to delete namespace alias"));
}
