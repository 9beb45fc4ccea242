use crate::OperationStatus;
use crate::utils::{lenient_bool, lenient_opt_string, lenient_string, null_as_default};
use serde::Deserialize;

//region list_servers
#[derive(Deserialize, Debug)]
pub(crate) struct ListServersResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) servers: Vec<Server>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Server {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    /// 云服务商，例如`do`、`vultr`、`amazon`
    #[serde(rename = "cloud", default, deserialize_with = "lenient_string")]
    pub provider: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub region: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub instance_type: String,
    #[serde(rename = "server_fqdn", default, deserialize_with = "lenient_string")]
    pub fqdn: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub public_ip: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_terminated: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub apps: Vec<ServerApp>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerApp {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub application: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub app_version: String,
    #[serde(rename = "app_fqdn", default, deserialize_with = "lenient_string")]
    pub fqdn: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub project_id: Option<String>,
}
//endregion

//region create_server
#[derive(Deserialize, Debug)]
pub(crate) struct CreateServerResponse {
    pub(crate) server: Server,
}

#[derive(Debug)]
pub struct CreatedServer {
    pub server: Server,
    pub operation: OperationStatus,
}
//endregion
