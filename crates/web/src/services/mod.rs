//! Application services.
//!
//! - [`auth`] - Password verification and admin account management
//! - [`export`] - Whole-store snapshot regeneration
//! - [`import`] - Snapshot-to-store migration (guard and reset modes)

pub mod auth;
pub mod export;
pub mod import;
