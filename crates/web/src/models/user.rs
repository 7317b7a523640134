//! Admin user model.

use chrono::{DateTime, Utc};

use partfinder_core::{UserId, Username};

/// An admin account.
///
/// The password hash never leaves the repository layer; credential checks
/// go through `services::auth`.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: UserId,
    pub username: Username,
    pub created_at: DateTime<Utc>,
}
