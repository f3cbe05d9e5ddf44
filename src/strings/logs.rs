//! # Log Messages
//!
//! Startup and lifecycle messages written to the tracing log.

pub const STARTING: &str = "Starting WabbaBot...";
pub const SYNC_LOOP_START: &str = "Starting sync loop...";

pub fn logged_in(user: &str) -> String {
    format!("Logged in as {user}")
}

pub fn set_display_name_fail(err: &str) -> String {
    format!("Failed to set display name: {err}")
}

pub fn join_invite_fail(room: &str, err: &str) -> String {
    format!("Failed to join room {room} after invite: {err}")
}

pub fn sync_loop_fail(err: &str) -> String {
    format!("Sync loop failed: {err}")
}
