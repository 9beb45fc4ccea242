//! 项目，用来给应用分组

use crate::utils::{lenient_bool, lenient_string, null_as_default, require_non_empty, to_body};
use crate::{Client, Error};
use bon::Builder;
use reqwest::Method;
use serde::{Deserialize, Serialize};

impl Client {
    pub fn list_projects(&self) -> ListProjectsBuilder<'_> {
        ListProjects::builder(self)
    }

    pub fn create_project(&self) -> CreateProjectBuilder<'_> {
        CreateProject::builder(self)
    }

    pub fn delete_project(&self) -> DeleteProjectBuilder<'_> {
        DeleteProject::builder(self)
    }
}

//region response
#[derive(Deserialize, Debug, Clone)]
pub struct Project {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_default: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: String,
}

#[derive(Deserialize, Debug)]
struct ListProjectsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    projects: Vec<Project>,
}

#[derive(Deserialize, Debug)]
struct CreateProjectResponse {
    project: Project,
}
//endregion

//region list_projects
#[derive(Builder)]
pub struct ListProjects<'a> {
    #[builder(start_fn)]
    client: &'a Client,
}

impl ListProjects<'_> {
    pub async fn send(&self) -> Result<Vec<Project>, Error> {
        let resp: ListProjectsResponse =
            self.client.call_json("/project", Method::GET, None).await?;
        Ok(resp.projects)
    }
}
//endregion

//region create_project
#[derive(Builder, Serialize)]
pub struct CreateProject<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    /// 加入项目的应用id，发送时用逗号拼接
    // #[builder(field)]需要放在start_fn之后
    #[builder(field)]
    #[serde(serialize_with = "serialize_app_ids")]
    app_ids: Vec<&'a str>,
    name: &'a str,
}

fn serialize_app_ids<S>(ids: &[&str], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&ids.join(","))
}

impl<'a, S: create_project_builder::State> CreateProjectBuilder<'a, S> {
    pub fn app_id(mut self, id: &'a str) -> Self {
        self.app_ids.push(id);
        self
    }

    pub fn app_ids(mut self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        self.app_ids.extend(ids);
        self
    }
}

impl CreateProject<'_> {
    pub async fn send(&self) -> Result<Project, Error> {
        require_non_empty("name", self.name)?;

        let body = to_body(self)?;
        let resp: CreateProjectResponse = self
            .client
            .call_json("/project", Method::POST, Some(&body))
            .await?;
        Ok(resp.project)
    }
}
//endregion

//region delete_project
#[derive(Builder)]
pub struct DeleteProject<'a> {
    #[builder(start_fn)]
    client: &'a Client,
    project_id: &'a str,
}

impl DeleteProject<'_> {
    pub async fn send(&self) -> Result<(), Error> {
        require_non_empty("project_id", self.project_id)?;

        let path = format!("/project/{}", self.project_id);
        self.client.call(&path, Method::DELETE, None).await?;
        Ok(())
    }
}
//endregion
