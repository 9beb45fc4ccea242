//! 服务器管理
//!
//! 创建、删除、重启、启动、停止、备份在服务端都是异步操作，`send`会等待operation完成后返回。

mod types_rs;
pub use types_rs::*;

use crate::utils::{require_non_empty, to_body};
use crate::{Client, Error, OperationStatus};
use bon::Builder;
use reqwest::Method;
use serde::Serialize;

impl Client {
    pub fn list_servers(&self) -> ListServersBuilder<'_> {
        ListServers::builder(self)
    }

    pub fn create_server(&self) -> CreateServerBuilder<'_> {
        CreateServer::builder(self)
    }

    pub fn delete_server(&self) -> DeleteServerBuilder<'_> {
        DeleteServer::builder(self)
    }

    pub fn restart_server(&self) -> ServerActionBuilder<'_> {
        ServerAction::builder(self, ServerActionKind::Restart)
    }

    pub fn start_server(&self) -> ServerActionBuilder<'_> {
        ServerAction::builder(self, ServerActionKind::Start)
    }

    pub fn stop_server(&self) -> ServerActionBuilder<'_> {
        ServerAction::builder(self, ServerActionKind::Stop)
    }

    pub fn backup_server(&self) -> ServerActionBuilder<'_> {
        ServerAction::builder(self, ServerActionKind::Backup)
    }

    pub fn update_server_label(&self) -> UpdateServerLabelBuilder<'_> {
        UpdateServerLabel::builder(self)
    }
}

//region list_servers
#[derive(Builder)]
pub struct ListServers<'a> {
    #[builder(start_fn)]
    client: &'a Client,
}

impl ListServers<'_> {
    pub async fn send(&self) -> Result<Vec<Server>, Error> {
        let resp: ListServersResponse = self.client.call_json("/server", Method::GET, None).await?;
        Ok(resp.servers)
    }
}
//endregion

//region create_server
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize)]
pub struct CreateServer<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    /// 云服务商，例如`do`、`vultr`、`linode`、`amazon`、`gce`
    #[serde(rename = "cloud")]
    provider: &'a str,
    region: &'a str,
    instance_type: &'a str,
    /// 应用类型，例如`wordpress`、`phplaravel`
    application: &'a str,
    app_version: &'a str,
    #[serde(rename = "server_label")]
    label: &'a str,
    app_label: &'a str,
    project_name: Option<&'a str>,
    db_version: Option<&'a str>,
}

impl CreateServer<'_> {
    pub async fn send(&self) -> Result<CreatedServer, Error> {
        require_non_empty("label", self.label)?;
        require_non_empty("app_label", self.app_label)?;

        let body = to_body(self)?;
        let (value, operation) = self
            .client
            .call_and_wait("/server", Method::POST, Some(&body))
            .await?;

        let resp: CreateServerResponse = serde_json::from_value(value).map_err(|e| {
            Error::api_call(
                &Method::POST,
                "/server",
                cw_sdk_common::Error::UnexpectedResponse(e.to_string()),
            )
        })?;

        Ok(CreatedServer {
            server: resp.server,
            operation,
        })
    }
}
//endregion

//region delete_server
#[derive(Builder)]
pub struct DeleteServer<'a> {
    #[builder(start_fn)]
    client: &'a Client,
    server_id: &'a str,
}

impl DeleteServer<'_> {
    pub async fn send(&self) -> Result<OperationStatus, Error> {
        require_non_empty("server_id", self.server_id)?;

        let path = format!("/server/{}", self.server_id);
        let (_, operation) = self
            .client
            .call_and_wait(&path, Method::DELETE, None)
            .await?;
        Ok(operation)
    }
}
//endregion

//region restart / start / stop / backup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerActionKind {
    Restart,
    Start,
    Stop,
    Backup,
}

impl ServerActionKind {
    fn path(self) -> &'static str {
        match self {
            ServerActionKind::Restart => "/server/restart",
            ServerActionKind::Start => "/server/start",
            ServerActionKind::Stop => "/server/stop",
            ServerActionKind::Backup => "/server/manage/backup",
        }
    }
}

#[derive(Builder, Serialize)]
pub struct ServerAction<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    kind: ServerActionKind,
    server_id: &'a str,
}

impl ServerAction<'_> {
    pub async fn send(&self) -> Result<OperationStatus, Error> {
        require_non_empty("server_id", self.server_id)?;

        let body = to_body(self)?;
        let (_, operation) = self
            .client
            .call_and_wait(self.kind.path(), Method::POST, Some(&body))
            .await?;
        Ok(operation)
    }
}
//endregion

//region update_server_label
#[derive(Builder, Serialize)]
pub struct UpdateServerLabel<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    #[serde(skip_serializing)]
    server_id: &'a str,
    label: &'a str,
}

impl UpdateServerLabel<'_> {
    pub async fn send(&self) -> Result<(), Error> {
        require_non_empty("server_id", self.server_id)?;
        require_non_empty("label", self.label)?;

        let body = to_body(self)?;
        let path = format!("/server/{}", self.server_id);
        self.client.call(&path, Method::PUT, Some(&body)).await?;
        Ok(())
    }
}
//endregion
