//! Scripted in-memory transport shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use intacct::api::{ControlCredentials, LoginCredentials, Transport, TransportResponse};
use intacct::xml::XmlElement;
use intacct::{IntacctClient, Result};
use std::collections::VecDeque;
use std::sync::Mutex;

pub const GATEWAY: &str = "https://gateway.test/xmlgw.phtml";
pub const SESSION_ENDPOINT: &str = "https://session.test/xmlgw.phtml";

#[derive(Debug, Clone)]
pub struct SentRequest {
    pub url: String,
    pub body: String,
}

impl SentRequest {
    pub fn element(&self) -> XmlElement {
        XmlElement::parse(&self.body).expect("request body is not XML")
    }
}

/// Replays canned responses in order and records every request
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<TransportResponse>>,
    sent: Mutex<Vec<SentRequest>>,
}

impl MockTransport {
    pub fn new(bodies: Vec<String>) -> Self {
        Self::with_responses(bodies.into_iter().map(|body| (200, body)).collect())
    }

    pub fn with_responses(responses: Vec<(u16, String)>) -> Self {
        Self {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|(status, body)| TransportResponse { status, body })
                    .collect(),
            ),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse> {
        self.sent.lock().unwrap().push(SentRequest {
            url: url.to_string(),
            body: String::from_utf8(body).expect("request body is not UTF-8"),
        });
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted response left");
        Ok(response)
    }
}

pub fn client(bodies: Vec<String>) -> IntacctClient<MockTransport> {
    client_with(MockTransport::new(bodies))
}

pub fn client_with(transport: MockTransport) -> IntacctClient<MockTransport> {
    IntacctClient::new(
        transport,
        &ControlCredentials::new("sender", "sender-pass"),
        &LoginCredentials::new("acme", "jdoe", "secret"),
    )
    .unwrap()
    .with_gateway_url(GATEWAY)
}

pub fn success(function: &str, data: &str) -> String {
    format!(
        "<response><control><status>success</status></control>\
         <operation><authentication><status>success</status></authentication>\
         <result><status>success</status><function>{}</function>\
         <controlid>foobar</controlid>{}</result></operation></response>",
        function, data
    )
}

pub fn failure(function: &str, description: &str) -> String {
    format!(
        "<response><control><status>success</status></control>\
         <operation><result><status>failure</status><function>{}</function>\
         <errormessage><error><errorno>BL01001973</errorno>\
         <description2>{}</description2></error></errormessage>\
         </result></operation></response>",
        function, description
    )
}

pub fn session_response(session_id: &str, endpoint: &str) -> String {
    success(
        "getAPISession",
        &format!(
            "<data><api><sessionid>{}</sessionid><endpoint>{}</endpoint></api></data>",
            session_id, endpoint
        ),
    )
}

/// A readByQuery/readMore page of VENDOR records `ids`, with `remaining` left
pub fn vendor_page(ids: std::ops::Range<u32>, remaining: u64) -> String {
    let records: String = ids
        .map(|i| format!("<VENDOR><RECORDNO>{}</RECORDNO><NAME>Vendor {}</NAME></VENDOR>", i, i))
        .collect();
    success(
        "readByQuery",
        &format!(
            "<data listtype=\"VENDOR\" numremaining=\"{}\">{}</data>",
            remaining, records
        ),
    )
}
