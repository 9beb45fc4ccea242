//! 应用管理

use crate::utils::{require_non_empty, to_body};
use crate::{Client, Error, OperationStatus};
use bon::Builder;
use reqwest::Method;
use serde::Serialize;

impl Client {
    pub fn create_app(&self) -> CreateAppBuilder<'_> {
        CreateApp::builder(self)
    }

    pub fn delete_app(&self) -> DeleteAppBuilder<'_> {
        DeleteApp::builder(self)
    }

    pub fn clone_app(&self) -> CloneAppBuilder<'_> {
        CloneApp::builder(self)
    }

    pub fn update_app_label(&self) -> UpdateAppLabelBuilder<'_> {
        UpdateAppLabel::builder(self)
    }
}

//region create_app
/// 在已有的服务器上添加应用，完成后`OperationStatus::app_id`是新应用的id
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize)]
pub struct CreateApp<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    server_id: &'a str,
    application: &'a str,
    app_version: Option<&'a str>,
    #[serde(rename = "app_label")]
    label: &'a str,
    project_name: Option<&'a str>,
}

impl CreateApp<'_> {
    pub async fn send(&self) -> Result<OperationStatus, Error> {
        require_non_empty("server_id", self.server_id)?;
        require_non_empty("label", self.label)?;

        let body = to_body(self)?;
        let (_, operation) = self
            .client
            .call_and_wait("/app", Method::POST, Some(&body))
            .await?;
        Ok(operation)
    }
}
//endregion

//region delete_app
#[derive(Builder, Serialize)]
pub struct DeleteApp<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    server_id: &'a str,
    #[serde(skip_serializing)]
    app_id: &'a str,
}

impl DeleteApp<'_> {
    pub async fn send(&self) -> Result<OperationStatus, Error> {
        require_non_empty("server_id", self.server_id)?;
        require_non_empty("app_id", self.app_id)?;

        let body = to_body(self)?;
        let path = format!("/app/{}", self.app_id);
        let (_, operation) = self
            .client
            .call_and_wait(&path, Method::DELETE, Some(&body))
            .await?;
        Ok(operation)
    }
}
//endregion

//region clone_app
#[derive(Builder, Serialize)]
pub struct CloneApp<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    server_id: &'a str,
    app_id: &'a str,
    /// 新应用的名称
    #[serde(rename = "app_label")]
    label: &'a str,
}

impl CloneApp<'_> {
    pub async fn send(&self) -> Result<OperationStatus, Error> {
        require_non_empty("server_id", self.server_id)?;
        require_non_empty("app_id", self.app_id)?;
        require_non_empty("label", self.label)?;

        let body = to_body(self)?;
        let (_, operation) = self
            .client
            .call_and_wait("/app/clone", Method::POST, Some(&body))
            .await?;
        Ok(operation)
    }
}
//endregion

//region update_app_label
#[derive(Builder, Serialize)]
pub struct UpdateAppLabel<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    server_id: &'a str,
    #[serde(skip_serializing)]
    app_id: &'a str,
    label: &'a str,
}

impl UpdateAppLabel<'_> {
    pub async fn send(&self) -> Result<(), Error> {
        require_non_empty("server_id", self.server_id)?;
        require_non_empty("app_id", self.app_id)?;
        require_non_empty("label", self.label)?;

        let body = to_body(self)?;
        let path = format!("/app/{}", self.app_id);
        self.client.call(&path, Method::PUT, Some(&body)).await?;
        Ok(())
    }
}
//endregion
