//! # Application Layer
//!
//! Contains the core business logic and orchestration of the bot:
//! the modlist registry, release reconciliation, access control and command routing.

pub mod access;
pub mod reconciler;
pub mod registry;
pub mod router;
