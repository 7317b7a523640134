//! Partfinder Core - Shared types library.
//!
//! This crate provides common types used across all Partfinder components:
//! - `web` - Public catalog site and admin dashboard
//! - `cli` - Command-line tools for migrations and batch transforms
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used
//! anywhere, including the batch part-number deriver.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and usernames
//! - [`part_number`] - Pure part-number derivation rules
//! - [`snapshot`] - The `products.json` snapshot document model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod part_number;
pub mod snapshot;
pub mod types;

pub use snapshot::{ProductRecord, Snapshot};
pub use types::*;
