#[path = "../support/mod.rs"]
mod support;

use cw_sdk::Error;
use serde_json::json;
use support::{TOKEN, mount_operation_sequence, new_client, operation, start_server};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bearer() -> String {
    format!("Bearer {}", TOKEN)
}

async fn mount(server: &MockServer, m: &str, p: &str, body: serde_json::Value) {
    Mock::given(method(m))
        .and(path(p))
        .and(header("Authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[cfg(feature = "server")]
mod server {
    use super::*;

    #[tokio::test]
    async fn list_servers_renames_fields() {
        let server = start_server().await;
        mount(
            &server,
            "GET",
            "/server",
            json!({
                "status": true,
                "servers": [{
                    "id": "12",
                    "label": "prod",
                    "status": "running",
                    "cloud": "do",
                    "region": "nyc3",
                    "instance_type": "2GB",
                    "server_fqdn": "prod.cloudwaysapps.com",
                    "public_ip": "10.0.0.1",
                    "is_terminated": "0",
                    "created_at": "2024-01-01 00:00:00",
                    "apps": [{
                        "id": 301,
                        "label": "blog",
                        "application": "wordpress",
                        "app_version": "6.4",
                        "app_fqdn": "blog.cloudwaysapps.com",
                        "project_id": "0"
                    }]
                }]
            }),
        )
        .await;

        let (client, _) = new_client(&server);
        let servers = client.list_servers().build().send().await.unwrap();

        assert_eq!(servers.len(), 1);
        let s = &servers[0];
        assert_eq!(s.provider, "do");
        assert_eq!(s.fqdn, "prod.cloudwaysapps.com");
        assert!(!s.is_terminated);
        assert_eq!(s.apps[0].id, "301");
        assert_eq!(s.apps[0].fqdn, "blog.cloudwaysapps.com");
    }

    #[tokio::test]
    async fn list_servers_tolerates_null_fields() {
        let server = start_server().await;
        mount(
            &server,
            "GET",
            "/server",
            json!({
                "servers": [
                    {"id": "12", "label": "prod", "public_ip": null, "created_at": null, "apps": null},
                    {"id": 13, "label": null, "cloud": null, "server_fqdn": null, "apps": [
                        {"id": "7", "label": null, "app_fqdn": null, "project_id": null}
                    ]}
                ]
            }),
        )
        .await;

        let (client, _) = new_client(&server);
        let servers = client.list_servers().build().send().await.unwrap();

        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].label, "prod");
        assert_eq!(servers[0].public_ip, "");
        assert_eq!(servers[0].created_at, "");
        assert!(servers[0].apps.is_empty());
        assert_eq!(servers[1].id, "13");
        assert_eq!(servers[1].provider, "");
        assert_eq!(servers[1].apps[0].label, "");
        assert_eq!(servers[1].apps[0].project_id, None);
    }

    #[tokio::test]
    async fn create_server_waits_for_operation() {
        let server = start_server().await;
        Mock::given(method("POST"))
            .and(path("/server"))
            .and(body_json(json!({
                "cloud": "do",
                "region": "nyc3",
                "instance_type": "2GB",
                "application": "wordpress",
                "app_version": "6.4",
                "server_label": "prod",
                "app_label": "blog",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "server": {"id": "12", "label": "prod", "status": "pending", "cloud": "do"},
                "operation_id": 4001,
            })))
            .expect(1)
            .mount(&server)
            .await;
        mount_operation_sequence(
            &server,
            "4001",
            vec![
                operation("4001", false, "1", "Creating"),
                operation("4001", true, "0", "Done"),
            ],
        )
        .await;

        let (client, clock) = new_client(&server);
        let created = client
            .create_server()
            .provider("do")
            .region("nyc3")
            .instance_type("2GB")
            .application("wordpress")
            .app_version("6.4")
            .label("prod")
            .app_label("blog")
            .build()
            .send()
            .await
            .unwrap();

        assert_eq!(created.server.id, "12");
        assert!(created.operation.is_completed);
        assert_eq!(clock.sleeps(), vec![std::time::Duration::from_secs(60)]);
    }

    #[tokio::test]
    async fn restart_server_posts_server_id() {
        let server = start_server().await;
        Mock::given(method("POST"))
            .and(path("/server/restart"))
            .and(body_json(json!({"server_id": "12"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"operation_id": "55"})))
            .expect(1)
            .mount(&server)
            .await;
        mount_operation_sequence(&server, "55", vec![operation("55", true, "0", "Done")]).await;

        let (client, _) = new_client(&server);
        let op = client
            .restart_server()
            .server_id("12")
            .build()
            .send()
            .await
            .unwrap();
        assert_eq!(op.id, "55");
    }

    #[tokio::test]
    async fn backup_and_delete_server() {
        let server = start_server().await;
        mount(&server, "POST", "/server/manage/backup", json!({"operation_id": 1})).await;
        mount(&server, "DELETE", "/server/12", json!({"operation_id": 2})).await;
        mount_operation_sequence(&server, "1", vec![operation("1", true, "0", "Done")]).await;
        mount_operation_sequence(&server, "2", vec![operation("2", true, "0", "Done")]).await;

        let (client, _) = new_client(&server);
        client
            .backup_server()
            .server_id("12")
            .build()
            .send()
            .await
            .unwrap();
        client
            .delete_server()
            .server_id("12")
            .build()
            .send()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn missing_operation_id_is_api_call_error() {
        let server = start_server().await;
        mount(&server, "POST", "/server/stop", json!({"status": true})).await;

        let (client, _) = new_client(&server);
        let err = client
            .stop_server()
            .server_id("12")
            .build()
            .send()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ApiCall { .. }));
    }

    #[tokio::test]
    async fn empty_label_rejected_locally() {
        let server = MockServer::start().await;
        let (client, _) = new_client(&server);
        let err = client
            .update_server_label()
            .server_id("12")
            .label("")
            .build()
            .send()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Common(_)));
    }
}

#[cfg(feature = "app")]
mod app {
    use super::*;

    #[tokio::test]
    async fn create_app_returns_final_status() {
        let server = start_server().await;
        Mock::given(method("POST"))
            .and(path("/app"))
            .and(body_json(json!({
                "server_id": "12",
                "application": "wordpress",
                "app_label": "shop",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"operation_id": 700})))
            .expect(1)
            .mount(&server)
            .await;
        let mut done = operation("700", true, "0", "Done");
        done["operation"]["app_id"] = json!(901);
        mount_operation_sequence(&server, "700", vec![done]).await;

        let (client, _) = new_client(&server);
        let op = client
            .create_app()
            .server_id("12")
            .application("wordpress")
            .label("shop")
            .build()
            .send()
            .await
            .unwrap();
        assert_eq!(op.app_id.as_deref(), Some("901"));
    }

    #[tokio::test]
    async fn update_app_label_sends_server_id() {
        let server = start_server().await;
        Mock::given(method("PUT"))
            .and(path("/app/301"))
            .and(body_json(json!({"server_id": "12", "label": "shop-2"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = new_client(&server);
        client
            .update_app_label()
            .server_id("12")
            .app_id("301")
            .label("shop-2")
            .build()
            .send()
            .await
            .unwrap();
    }
}

#[cfg(feature = "ssh_key")]
mod ssh_key {
    use super::*;

    #[tokio::test]
    async fn create_ssh_key_renames_fields() {
        let server = start_server().await;
        Mock::given(method("POST"))
            .and(path("/ssh_key"))
            .and(body_json(json!({
                "server_id": "12",
                "ssh_key_name": "laptop",
                "ssh_key": "ssh-ed25519 AAAA",
                "app_creds_id": "88",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5})))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = new_client(&server);
        let key = client
            .create_ssh_key()
            .server_id("12")
            .name("laptop")
            .public_key("ssh-ed25519 AAAA")
            .app_creds_id("88")
            .build()
            .send()
            .await
            .unwrap();
        assert_eq!(key.id, "5");
    }
}

#[cfg(feature = "team")]
mod team {
    use super::*;

    #[tokio::test]
    async fn list_and_delete_members() {
        let server = start_server().await;
        mount(
            &server,
            "GET",
            "/member",
            json!({"members": [
                {"id": 3, "name": "Sam", "email": "sam@b.com", "role": "admin", "status": "1"},
                {"id": 4, "name": null, "email": "kim@b.com", "role": null, "status": null}
            ]}),
        )
        .await;
        Mock::given(method("DELETE"))
            .and(path("/member/3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = new_client(&server);
        let members = client.list_team_members().build().send().await.unwrap();
        assert_eq!(members[0].id, "3");
        assert!(members[0].status);
        assert_eq!(members[1].name, "");
        assert_eq!(members[1].role, "");
        assert!(!members[1].status);

        client
            .delete_team_member()
            .member_id("3")
            .build()
            .send()
            .await
            .unwrap();
    }
}

#[cfg(feature = "project")]
mod project {
    use super::*;

    #[tokio::test]
    async fn create_project_joins_app_ids() {
        let server = start_server().await;
        Mock::given(method("POST"))
            .and(path("/project"))
            .and(body_json(json!({"name": "clients", "app_ids": "301,302"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "project": {"id": "40", "name": "clients", "is_default": "0", "created_at": null}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = new_client(&server);
        let project = client
            .create_project()
            .app_id("301")
            .app_id("302")
            .name("clients")
            .build()
            .send()
            .await
            .unwrap();
        assert_eq!(project.id, "40");
        assert!(!project.is_default);
        assert_eq!(project.created_at, "");
    }
}
