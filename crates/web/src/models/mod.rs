//! Domain models for the catalog site.

pub mod product;
pub mod user;

use serde::{Deserialize, Serialize};

use partfinder_core::UserId;

pub use product::{NewProduct, Product};
pub use user::AdminUser;

/// Session storage keys.
pub mod session_keys {
    /// Key under which the authenticated admin is stored.
    pub const CURRENT_ADMIN: &str = "current_admin";
}

/// The authenticated admin as stored in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Database id of the admin account.
    pub user_id: UserId,
    /// Username, for display in the dashboard chrome.
    pub username: String,
}

impl From<&AdminUser> for CurrentAdmin {
    fn from(user: &AdminUser) -> Self {
        Self {
            user_id: user.id,
            username: user.username.to_string(),
        }
    }
}
