//! User management endpoints: users, roles and groups.

use serde_json::json;

use c8y_core::error::C8yResult;
use c8y_models::{Group, Role, User};

use crate::request::CallDescription;
use crate::resource::{Resource, ResourceKind};

/// `/user/{tenant}/users`
#[derive(Debug, Clone, Copy)]
pub struct Users;

impl ResourceKind for Users {
    type Item = User;

    const NAME: &'static str = "user";
    const PLURAL: &'static str = "users";
    const ITEMS_KEY: &'static str = "users";
    const MEDIA_TYPE: &'static str = "user";
    const COLLECTION_MEDIA_TYPE: &'static str = "userCollection";
}

/// `/user/roles`
#[derive(Debug, Clone, Copy)]
pub struct Roles;

impl ResourceKind for Roles {
    type Item = Role;

    const NAME: &'static str = "role";
    const PLURAL: &'static str = "roles";
    const ITEMS_KEY: &'static str = "roles";
    const MEDIA_TYPE: &'static str = "role";
    const COLLECTION_MEDIA_TYPE: &'static str = "roleCollection";
}

/// `/user/{tenant}/groups`
#[derive(Debug, Clone, Copy)]
pub struct Groups;

impl ResourceKind for Groups {
    type Item = Group;

    const NAME: &'static str = "group";
    const PLURAL: &'static str = "groups";
    const ITEMS_KEY: &'static str = "groups";
    const MEDIA_TYPE: &'static str = "group";
    const COLLECTION_MEDIA_TYPE: &'static str = "groupCollection";
}

impl Resource<Groups> {
    /// Add the user behind `user_self_url` to group `group_id`.
    pub fn assign_user(&self, group_id: &str, user_self_url: &str) -> C8yResult<()> {
        let operation = "assign user to group";
        let path = format!("{}/users", self.item_path(operation, group_id)?);

        let media = self.client().media_type("userReference");
        let call = CallDescription::post(operation, path)
            .accept(&media)
            .content_type(&media)
            .allow_empty_body()
            .json_body(&json!({ "user": { "self": user_self_url } }))?;
        self.client().send(&call).map(|_| ())
    }
}
