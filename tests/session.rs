mod common;

use common::{GATEWAY, SESSION_ENDPOINT, client, session_response, success};
use intacct::api::SessionState;
use intacct::{ErrorKind, InspectTarget};

#[tokio::test]
async fn test_session_replaces_login_and_endpoint() {
    let mut client = client(vec![
        session_response("sess-123", SESSION_ENDPOINT),
        success("inspect", "<data><Type Name=\"USERINFO\"/></data>"),
    ]);

    client.get_api_session().await.unwrap();
    assert_eq!(
        client.session().state(),
        &SessionState::SessionActive {
            endpoint: SESSION_ENDPOINT.to_string()
        }
    );
    assert!(client.envelope().has_session());

    client
        .inspect(InspectTarget::Name("User".to_string()), false)
        .await
        .unwrap();

    let sent = client.transport().sent();
    assert_eq!(sent.len(), 2);

    let login_request = sent[0].element();
    assert_eq!(sent[0].url, GATEWAY);
    assert_eq!(
        login_request.find_text("operation/authentication/login/userid"),
        Some("jdoe")
    );
    assert!(login_request.find("operation/content/function/getAPISession").is_some());

    let session_request = sent[1].element();
    assert_eq!(sent[1].url, SESSION_ENDPOINT);
    assert_eq!(
        session_request.find_text("operation/authentication/sessionid"),
        Some("sess-123")
    );
    assert!(session_request.find("operation/authentication/login").is_none());
    assert!(!sent[1].body.contains("secret"));
}

#[tokio::test]
async fn test_missing_endpoint_leaves_login_in_place() {
    let incomplete = success(
        "getAPISession",
        "<data><api><sessionid>sess-123</sessionid></api></data>",
    );
    let mut client = client(vec![
        incomplete.clone(),
        success("inspect", "<data/>"),
    ]);

    let err = client.get_api_session().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert!(err.to_string().contains("sess-123"));
    assert_eq!(client.session().state(), &SessionState::Unauthenticated);
    assert!(!client.envelope().has_session());

    client
        .inspect(InspectTarget::Object("*".to_string()), false)
        .await
        .unwrap();
    let sent = client.transport().sent();
    assert_eq!(sent[1].url, GATEWAY);
    assert_eq!(
        sent[1].element().find_text("operation/authentication/login/companyid"),
        Some("acme")
    );
}

#[tokio::test]
async fn test_each_call_carries_only_its_own_payload() {
    let mut client = client(vec![
        success("delete", ""),
        success("inspect", "<data/>"),
    ]);

    client
        .delete("VENDOR", &["V1".to_string(), "V2".to_string()])
        .await
        .unwrap();
    client
        .inspect(InspectTarget::Object("VENDOR".to_string()), true)
        .await
        .unwrap();

    let sent = client.transport().sent();
    let delete = sent[0].element();
    assert_eq!(
        delete.find_text("operation/content/function/delete/keys"),
        Some("V1,V2")
    );

    let inspect = sent[1].element();
    let function = inspect.find("operation/content/function").unwrap();
    assert_eq!(function.children.len(), 1);
    assert_eq!(function.children[0].name, "inspect");
    assert_eq!(function.children[0].attribute("detail"), Some("1"));
    assert_eq!(function.attribute("controlid"), Some("foobar"));
}
