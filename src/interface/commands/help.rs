//! # Help Command
//!
//! Handles the `help` command.
//! Displays the command list with usage strings.

pub fn handle_help(prefix: &str) -> String {
    crate::strings::help::main(prefix)
}
