//! SSH公钥管理，公钥绑定在某个服务器的应用凭证（app_creds）上

use crate::utils::{lenient_string, require_non_empty, to_body};
use crate::{Client, Error};
use bon::Builder;
use reqwest::Method;
use serde::{Deserialize, Serialize};

impl Client {
    pub fn create_ssh_key(&self) -> CreateSshKeyBuilder<'_> {
        CreateSshKey::builder(self)
    }

    pub fn update_ssh_key(&self) -> UpdateSshKeyBuilder<'_> {
        UpdateSshKey::builder(self)
    }

    pub fn delete_ssh_key(&self) -> DeleteSshKeyBuilder<'_> {
        DeleteSshKey::builder(self)
    }
}

#[derive(Deserialize, Debug)]
pub struct CreateSshKeyResult {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
}

//region create_ssh_key
#[derive(Builder, Serialize)]
pub struct CreateSshKey<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    server_id: &'a str,
    #[serde(rename = "ssh_key_name")]
    name: &'a str,
    /// 公钥内容，例如`ssh-ed25519 AAAA...`
    #[serde(rename = "ssh_key")]
    public_key: &'a str,
    app_creds_id: &'a str,
}

impl CreateSshKey<'_> {
    pub async fn send(&self) -> Result<CreateSshKeyResult, Error> {
        require_non_empty("server_id", self.server_id)?;
        require_non_empty("name", self.name)?;
        require_non_empty("public_key", self.public_key)?;

        let body = to_body(self)?;
        self.client
            .call_json("/ssh_key", Method::POST, Some(&body))
            .await
    }
}
//endregion

//region update_ssh_key
#[derive(Builder, Serialize)]
pub struct UpdateSshKey<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    server_id: &'a str,
    #[serde(skip_serializing)]
    ssh_key_id: &'a str,
    #[serde(rename = "ssh_key_name")]
    name: &'a str,
}

impl UpdateSshKey<'_> {
    pub async fn send(&self) -> Result<(), Error> {
        require_non_empty("ssh_key_id", self.ssh_key_id)?;
        require_non_empty("name", self.name)?;

        let body = to_body(self)?;
        let path = format!("/ssh_key/{}", self.ssh_key_id);
        self.client.call(&path, Method::PUT, Some(&body)).await?;
        Ok(())
    }
}
//endregion

//region delete_ssh_key
#[derive(Builder, Serialize)]
pub struct DeleteSshKey<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    server_id: &'a str,
    #[serde(skip_serializing)]
    ssh_key_id: &'a str,
}

impl DeleteSshKey<'_> {
    pub async fn send(&self) -> Result<(), Error> {
        require_non_empty("ssh_key_id", self.ssh_key_id)?;

        let body = to_body(self)?;
        let path = format!("/ssh_key/{}", self.ssh_key_id);
        self.client.call(&path, Method::DELETE, Some(&body)).await?;
        Ok(())
    }
}
//endregion
