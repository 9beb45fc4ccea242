//! 团队成员

use crate::utils::{lenient_bool, lenient_string, null_as_default, require_non_empty, to_body};
use crate::{Client, Error};
use bon::Builder;
use reqwest::Method;
use serde::{Deserialize, Serialize};

impl Client {
    pub fn list_team_members(&self) -> ListTeamMembersBuilder<'_> {
        ListTeamMembers::builder(self)
    }

    pub fn add_team_member(&self) -> AddTeamMemberBuilder<'_> {
        AddTeamMember::builder(self)
    }

    pub fn delete_team_member(&self) -> DeleteTeamMemberBuilder<'_> {
        DeleteTeamMember::builder(self)
    }
}

//region response
#[derive(Deserialize, Debug, Clone)]
pub struct TeamMember {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub status: bool,
}

#[derive(Deserialize, Debug)]
struct ListTeamMembersResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    members: Vec<TeamMember>,
}

#[derive(Deserialize, Debug)]
struct AddTeamMemberResponse {
    member: TeamMember,
}
//endregion

//region list_team_members
#[derive(Builder)]
pub struct ListTeamMembers<'a> {
    #[builder(start_fn)]
    client: &'a Client,
}

impl ListTeamMembers<'_> {
    pub async fn send(&self) -> Result<Vec<TeamMember>, Error> {
        let resp: ListTeamMembersResponse =
            self.client.call_json("/member", Method::GET, None).await?;
        Ok(resp.members)
    }
}
//endregion

//region add_team_member
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize)]
pub struct AddTeamMember<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    name: &'a str,
    email: &'a str,
    role: Option<&'a str>,
}

impl AddTeamMember<'_> {
    pub async fn send(&self) -> Result<TeamMember, Error> {
        require_non_empty("name", self.name)?;
        require_non_empty("email", self.email)?;

        let body = to_body(self)?;
        let resp: AddTeamMemberResponse = self
            .client
            .call_json("/member", Method::POST, Some(&body))
            .await?;
        Ok(resp.member)
    }
}
//endregion

//region delete_team_member
#[derive(Builder)]
pub struct DeleteTeamMember<'a> {
    #[builder(start_fn)]
    client: &'a Client,
    member_id: &'a str,
}

impl DeleteTeamMember<'_> {
    pub async fn send(&self) -> Result<(), Error> {
        require_non_empty("member_id", self.member_id)?;

        let path = format!("/member/{}", self.member_id);
        self.client.call(&path, Method::DELETE, None).await?;
        Ok(())
    }
}
//endregion
