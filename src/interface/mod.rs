//! # Interface Layer
//!
//! Entry points reached from chat messages.

pub mod commands;
