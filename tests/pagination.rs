mod common;

use common::{client, failure, vendor_page};
use intacct::{ErrorKind, ReadByQuery};

#[tokio::test]
async fn test_read_more_until_nothing_remains() {
    let mut client = client(vec![
        vendor_page(0..100, 150),
        vendor_page(100..200, 50),
        vendor_page(200..250, 0),
    ]);

    let result = client
        .read_by_query(ReadByQuery::new("VENDOR").query("STATUS = 'active'").page_size(100))
        .await
        .unwrap();

    assert_eq!(result.len(), 250);
    assert_eq!(result.pages, 3);
    assert_eq!(result.first().and_then(|r| r.find_text("RECORDNO")), Some("0"));
    assert_eq!(
        result.records.last().and_then(|r| r.find_text("RECORDNO")),
        Some("249")
    );

    let sent = client.transport().sent();
    assert_eq!(sent.len(), 3);

    let first = sent[0].element();
    let query = first
        .find("operation/content/function/readByQuery")
        .unwrap();
    assert_eq!(query.find_text("object"), Some("VENDOR"));
    assert_eq!(query.find_text("query"), Some("STATUS = 'active'"));
    assert_eq!(query.find_text("pagesize"), Some("100"));

    for request in &sent[1..] {
        let element = request.element();
        assert_eq!(
            element.find_text("operation/content/function/readMore/object"),
            Some("VENDOR")
        );
    }
}

#[tokio::test]
async fn test_oversized_page_request_uses_default() {
    let mut client = client(vec![vendor_page(0..2, 0)]);

    client
        .read_by_query(ReadByQuery::new("VENDOR").page_size(500_000))
        .await
        .unwrap();

    let sent = client.transport().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0]
            .element()
            .find_text("operation/content/function/readByQuery/pagesize"),
        Some("1000")
    );
}

#[tokio::test]
async fn test_configured_page_sizes_apply() {
    let mut client = client(vec![vendor_page(0..2, 0)]).with_page_sizes(50, 200);

    client
        .read_by_query(ReadByQuery::new("VENDOR").page_size(300))
        .await
        .unwrap();

    assert_eq!(
        client.transport().sent()[0]
            .element()
            .find_text("operation/content/function/readByQuery/pagesize"),
        Some("50")
    );
}

#[tokio::test]
async fn test_failed_read_more_aborts_query() {
    let mut client = client(vec![
        vendor_page(0..10, 5),
        failure("readMore", "Query cursor expired"),
    ]);

    let err = client
        .read_by_query(ReadByQuery::new("VENDOR"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RemoteOperation);
    assert!(err.to_string().contains("Query cursor expired"));
    assert_eq!(client.transport().sent().len(), 2);
}

#[tokio::test]
async fn test_empty_object_is_rejected_before_sending() {
    let mut client = client(vec![]);
    let err = client
        .read_by_query(ReadByQuery::new("  "))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(client.transport().sent().is_empty());
}

#[tokio::test]
async fn test_record_values_are_returned_as_sent() {
    let page = common::success(
        "readByQuery",
        "<data listtype=\"VENDOR\" numremaining=\"0\">\n  \
         <VENDOR>\n    <RECORDNO>1</RECORDNO>\n    <DESCRIPTION> Acme </DESCRIPTION>\n  </VENDOR>\n\
         </data>",
    );
    let mut client = client(vec![page]);

    let result = client
        .read_by_query(ReadByQuery::new("VENDOR"))
        .await
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result.field_values("DESCRIPTION"), vec![Some(" Acme ")]);
    assert_eq!(result.first().and_then(|r| r.text()), None);
}
