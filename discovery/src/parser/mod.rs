//! Help-text parsing.
//!
//! Splits one `--help` document into the four facets the walker needs:
//! usage line, description, options and sub-command names. Every function
//! here is total; missing sections simply yield empty facets.
//!
//! Section boundaries follow click-style help output: a section header such
//! as `Options:` starts at column zero and its rows are indented. The first
//! non-empty line that is not indented by a space ends the section.
//!
//! # Example
//!
//! ```
//! use help_catalog_discovery::parser::parse_help;
//!
//! let help = "\
//! Usage: verdi process [OPTIONS] COMMAND [ARGS]...
//!
//!   Inspect and manage processes.
//!
//! Options:
//!   -h, --help  Show this message and exit.
//!
//! Commands:
//!   kill   Kill running processes.
//!   list   Show a list of running or terminated processes.
//! ";
//!
//! let parsed = parse_help(help);
//! assert_eq!(parsed.usage, "verdi process [OPTIONS] COMMAND [ARGS]...");
//! assert_eq!(parsed.description, "Inspect and manage processes.");
//! assert_eq!(parsed.sub_commands, vec!["kill", "list"]);
//! ```

mod commands;
mod description;
mod options;
mod usage;

use std::sync::LazyLock;

use help_catalog_core::ParsedHelp;
use regex::Regex;

pub use commands::parse_sub_commands;
pub use description::parse_description;
pub use options::parse_options;
pub use usage::parse_usage;

pub(crate) const USAGE_PREFIX: &str = "Usage: ";
pub(crate) const OPTIONS_HEADER: &str = "Options:";
pub(crate) const COMMANDS_HEADER: &str = "Commands:";
pub(crate) const ARGUMENTS_HEADER: &str = "Arguments:";

static COLUMN_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("static regex must compile"));

/// Parses a whole help document.
///
/// The document is trimmed before it is split into lines, so indentation
/// of the very first line does not count.
pub fn parse_help(help_text: &str) -> ParsedHelp {
    let lines = help_text.trim().lines().collect::<Vec<_>>();
    ParsedHelp {
        usage: parse_usage(&lines),
        description: parse_description(&lines),
        options: parse_options(&lines),
        sub_commands: parse_sub_commands(&lines),
    }
}

/// Splits a row on its first run of two or more whitespace characters.
pub(crate) fn split_columns(trimmed: &str) -> (&str, Option<&str>) {
    let mut parts = COLUMN_GAP.splitn(trimmed, 2);
    let left = parts.next().unwrap_or_default();
    (left, parts.next())
}

/// True when a non-empty line starts at column zero and therefore closes
/// the current section. Checked on the untrimmed line.
pub(crate) fn closes_section(line: &str, trimmed: &str) -> bool {
    !trimmed.is_empty() && !line.starts_with(' ')
}
