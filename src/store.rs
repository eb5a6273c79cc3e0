//! The remote side of the user list.

use crate::error::Result;
use crate::types::{User, UserId};

/// Remote user store the list controller reconciles against.
#[allow(async_fn_in_trait)]
pub trait UserStore {
    async fn list_users(&self) -> Result<Vec<User>>;

    async fn create_user(&self, user: &User) -> Result<User>;

    async fn update_user(&self, user: &User) -> Result<User>;

    async fn delete_user(&self, id: UserId) -> Result<()>;
}
