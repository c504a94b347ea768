//! WireMock-based soundbar mocking
//!
//! Serves `UIC` XML replies so the client can be exercised over real HTTP.

#![allow(dead_code)]

use samsung_soundbar::SoundbarConfig;
use std::time::Duration;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// Reply used by most status tests
pub const CANNED_STATUS: &str =
    "<UIC><response><power>on</power><volume>37</volume><mute>off</mute></response></UIC>";

/// Mock soundbar
pub struct MockSoundbar {
    pub server: MockServer,
}

impl MockSoundbar {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Config pointing at this mock with a short timeout
    pub fn config(&self) -> SoundbarConfig {
        let address = self.server.address();
        SoundbarConfig::new(address.ip().to_string())
            .with_port(address.port())
            .with_timeout(Duration::from_millis(300))
    }

    /// Answer every `/UIC` request with `body`
    pub async fn respond_to_all(&self, body: &str) {
        Mock::given(method("GET"))
            .and(path("/UIC"))
            .respond_with(xml(body))
            .mount(&self.server)
            .await;
    }

    /// Answer one specific command with `body`
    pub async fn respond_to_command(&self, command: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path("/UIC"))
            .and(query_param("cmd", command))
            .respond_with(xml(body))
            .mount(&self.server)
            .await;
    }

    /// Answer one specific command, expecting exactly one call
    pub async fn expect_command_once(&self, command: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path("/UIC"))
            .and(query_param("cmd", command))
            .respond_with(xml(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Answer every `/UIC` request with a status code and no body
    pub async fn respond_with_status(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/UIC"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Answer every `/UIC` request after `delay`
    pub async fn respond_slowly(&self, body: &str, delay: Duration) {
        Mock::given(method("GET"))
            .and(path("/UIC"))
            .respond_with(xml(body).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    /// Decoded `cmd` parameters of every request received so far
    pub async fn received_commands(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| {
                request
                    .url
                    .query_pairs()
                    .find(|(key, _)| key == "cmd")
                    .map(|(_, value)| value.into_owned())
            })
            .collect()
    }

    /// Raw (still encoded) query strings of every request received so far
    pub async fn received_queries(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| request.url.query().unwrap_or_default().to_string())
            .collect()
    }
}

/// Single-field reply, as the device sends for get/set commands
pub fn field_response(key: &str, value: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><UIC><method>{key}</method><version>1.0</version><response result="ok"><{key}>{value}</{key}></response></UIC>"#
    )
}

fn xml(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/xml")
}
