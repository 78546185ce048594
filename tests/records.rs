mod common;

use common::{client, failure, success};
use intacct::xml::XmlElement;
use intacct::{ErrorKind, MetadataCache, SchemaRegistry, Value};
use std::path::PathBuf;

fn field(name: &str, extra: &str) -> String {
    format!(
        "<Field><Name>{}</Name><GroupName>General</GroupName>\
         <externalDataName>string</externalDataName>{}</Field>",
        name, extra
    )
}

fn userinfo_inspect() -> String {
    let fields = [
        field("LOGINID", "<isRequired>true</isRequired><maxLength>20</maxLength>"),
        field("DESCRIPTION", ""),
        field("CONTACTINFO.EMAIL1", ""),
        field("CONTACTINFO.MAILADDRESS.CITY", ""),
    ]
    .concat();
    success(
        "inspect",
        &format!("<data><Type Name=\"USERINFO\"><Fields>{}</Fields></Type></data>", fields),
    )
}

fn temp_cache() -> PathBuf {
    std::env::temp_dir()
        .join(format!("intacct-records-{}", uuid::Uuid::new_v4()))
        .join(".intacct.cache")
}

#[tokio::test]
async fn test_cache_init_then_create_user() {
    let path = temp_cache();
    let mut client = client(vec![
        userinfo_inspect(),
        failure("inspect", "Object definition USERROLE not found"),
        success("create", "<data listtype=\"objkey\" count=\"1\"><userinfo><RECORDNO>77</RECORDNO></userinfo></data>"),
    ]);

    let mut cache = MetadataCache::new(&path);
    cache
        .initialize(&mut client, &["User".to_string(), "User Role".to_string()])
        .await
        .unwrap();
    assert_eq!(cache.len(), 1);
    assert!(cache.get("User Role").is_none());

    let inspect = client.transport().sent()[0].element();
    let inspect_call = inspect.find("operation/content/function/inspect").unwrap();
    assert_eq!(inspect_call.attribute("detail"), Some("1"));
    assert_eq!(inspect_call.find_text("name"), Some("User"));

    let reloaded = MetadataCache::load(&path).unwrap();
    assert!(reloaded.cached_at().is_some());
    let registry = SchemaRegistry::from_cache(&reloaded);

    let mut user = registry
        .record("User", vec![("LOGINID", Value::from("jdoe"))])
        .unwrap();
    assert_eq!(user.type_name(), "USERINFO");
    user.set_path("CONTACTINFO.MAILADDRESS.CITY", "Oslo").unwrap();
    user.set("SSO_ENABLED", false).unwrap();

    let err = user.set("FAVORITE_COLOR", "red").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let err = user.set("LOGINID", "x".repeat(21)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    client.create(vec![user]).await.unwrap();

    let request = client.transport().sent()[2].element();
    let created = request
        .find("operation/content/function/create/USERINFO")
        .unwrap();
    let expected = XmlElement::new("USERINFO")
        .child(
            XmlElement::new("CONTACTINFO").child(
                XmlElement::new("MAILADDRESS").child(XmlElement::with_text("CITY", "Oslo")),
            ),
        )
        .child(XmlElement::with_text("LOGINID", "jdoe"))
        .child(XmlElement::with_text("SSO_ENABLED", "false"));
    assert_eq!(created, &expected);

    std::fs::remove_dir_all(path.parent().unwrap()).ok();
}

#[tokio::test]
async fn test_remote_create_failure_carries_payload() {
    let mut registry = SchemaRegistry::new();
    registry.register(SchemaRegistry::parse(&intacct::schema::RawObjectMetadata {
        object_name: "VENDOR".to_string(),
        fields: vec![intacct::schema::RawField::new("NAME", &[])],
    }));
    let vendor = registry
        .record("VENDOR", vec![("NAME", Value::from("Acme"))])
        .unwrap();

    let mut client = client(vec![failure("create", "Duplicate vendor name")]);
    let err = client.create(vec![vendor]).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RemoteOperation);
    assert!(err.to_string().contains("Duplicate vendor name"));
    assert!(err.to_string().contains("BL01001973"));
}

#[tokio::test]
async fn test_http_failure_is_transport_error() {
    let transport = common::MockTransport::with_responses(vec![(502, "Bad Gateway".to_string())]);
    let mut client = common::client_with(transport);

    let err = client
        .delete("VENDOR", &["V1".to_string()])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_invalid_arguments_send_nothing() {
    let mut client = client(vec![]);

    let err = client.delete("VENDOR", &[]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let err = client.create(vec![]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(client.transport().sent().is_empty());
}

#[tokio::test]
async fn test_delete_many_sends_one_delete_per_object() {
    let mut client = client(vec![success("delete", ""), success("delete", "")]);
    let targets = vec![
        ("VENDOR".to_string(), vec!["V1".to_string(), "V2".to_string()]),
        ("CUSTOMER".to_string(), vec!["C1".to_string()]),
    ];

    let responses = client.delete_many(&targets).await.unwrap();
    assert_eq!(responses.len(), 2);

    let sent = client.transport().sent();
    assert_eq!(sent.len(), 2);
    let first = sent[0].element();
    let function = first.find("operation/content/function").unwrap();
    assert_eq!(function.children.len(), 1);
    assert_eq!(first.find_text("operation/content/function/delete/object"), Some("VENDOR"));
    assert_eq!(first.find_text("operation/content/function/delete/keys"), Some("V1,V2"));
    let second = sent[1].element();
    assert_eq!(second.find_text("operation/content/function/delete/object"), Some("CUSTOMER"));
    assert_eq!(second.find_text("operation/content/function/delete/keys"), Some("C1"));
}

#[tokio::test]
async fn test_delete_many_validates_every_target_first() {
    let mut client = client(vec![]);

    let err = client.delete_many(&[]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let targets = vec![
        ("VENDOR".to_string(), vec!["V1".to_string()]),
        ("CUSTOMER".to_string(), vec![]),
    ];
    let err = client.delete_many(&targets).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(client.transport().sent().is_empty());
}

#[tokio::test]
async fn test_delete_many_stops_at_first_remote_failure() {
    let mut client = client(vec![failure("delete", "Vendor V1 is in use")]);
    let targets = vec![
        ("VENDOR".to_string(), vec!["V1".to_string()]),
        ("CUSTOMER".to_string(), vec!["C1".to_string()]),
    ];

    let err = client.delete_many(&targets).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RemoteOperation);
    assert_eq!(client.transport().sent().len(), 1);
}
