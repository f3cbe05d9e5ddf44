//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (ChatProvider, RoleProvider, FeedFetcher).

pub mod feed;
pub mod matrix;
