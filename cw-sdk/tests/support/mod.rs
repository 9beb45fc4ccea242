#![allow(dead_code)]

use cw_sdk::Client;
use cw_sdk::clock::{Clock, ManualClock};
use serde_json::{Value, json};
use std::sync::Arc;
use time::OffsetDateTime;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "T1";

/// 启动mock server并挂上换取token的接口，整个测试只允许换取一次
pub async fn start_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": TOKEN,
            "token_type": "Bearer",
            "expires_in": 3600,
        })))
        .expect(1)
        .mount(&server)
        .await;
    server
}

pub fn new_client(server: &MockServer) -> (Client, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(OffsetDateTime::UNIX_EPOCH));
    let client = Client::builder()
        .email("a@b.com".to_owned())
        .api_key("key123".to_owned())
        .base_url(server.uri())
        .clock(clock.clone() as Arc<dyn Clock>)
        .build()
        .unwrap();
    (client, clock)
}

pub fn operation(id: &str, completed: bool, estimate: &str, status: &str) -> Value {
    json!({
        "operation": {
            "id": id,
            "type": "restart_server",
            "server_id": "12",
            "estimated_time_remaining": estimate,
            "frontend_step_number": "1",
            "status": status,
            "is_completed": if completed { "1" } else { "0" },
            "message": "",
            "app_id": null,
        }
    })
}

/// 按顺序挂载operation状态，每个状态只返回一次
pub async fn mount_operation_sequence(server: &MockServer, id: &str, snapshots: Vec<Value>) {
    for snapshot in snapshots {
        Mock::given(method("GET"))
            .and(path(format!("/operation/{}", id)))
            .and(header("Authorization", format!("Bearer {}", TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(snapshot))
            .up_to_n_times(1)
            .expect(1)
            .mount(server)
            .await;
    }
}
