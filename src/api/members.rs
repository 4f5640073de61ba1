//! Member resource operations

use reqwest::Method;

use crate::{
    error::ClientResult,
    models::member::{CreateMember, Member, UpdateMember},
};

use super::ApiClient;

impl ApiClient {
    /// List all members
    pub async fn list_members(&self) -> ClientResult<Vec<Member>> {
        self.send(Method::GET, "/members").await
    }

    /// Get a single member by id
    pub async fn get_member(&self, id: i32) -> ClientResult<Member> {
        self.send(Method::GET, &format!("/members/{}", id)).await
    }

    /// Create a member; returns the canonical created record
    pub async fn create_member(&self, member: &CreateMember) -> ClientResult<Member> {
        self.send_json(Method::POST, "/members", member).await
    }

    /// Update a member; returns the canonical updated record
    pub async fn update_member(&self, id: i32, member: &UpdateMember) -> ClientResult<Member> {
        self.send_json(Method::PUT, &format!("/members/{}", id), member)
            .await
    }
}
