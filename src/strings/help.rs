//! # Help Text
//!
//! Usage strings for bot commands.
//! Displayed via the `help` command and when arguments are missing.

pub const RELEASE_USAGE: &str = "release <modlist_id> <message>";
pub const ADD_USAGE: &str = "addmodlist <user> <modlist_id> <modlist name>";
pub const DEL_USAGE: &str = "delmodlist <modlist_id>";

pub fn main(prefix: &str) -> String {
    format!(
        concat!(
            "**🐇 WabbaBot Help**\n",
            "\n",
            "**📦 Releases**\n",
            "* `{p}{release}`: Put out a new release of your list\n",
            "\n",
            "**🔐 Admin**\n",
            "* `{p}{add}`: Adds a new modlist\n",
            "* `{p}{del}`: Deletes a modlist\n",
            "* `{p}modlists`: Presents a list of all modlists\n",
        ),
        p = prefix,
        release = RELEASE_USAGE,
        add = ADD_USAGE,
        del = DEL_USAGE,
    )
}
