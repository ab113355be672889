use serde::{Deserialize, Serialize};

use crate::{CommandPath, HelpOption, ParsedHelp};

/// One flattened record of the catalog: either a leaf command or a single
/// option of some command.
///
/// Serializes with exactly the keys `command`, `usage` and `description`.
///
/// # Examples
///
/// ```
/// use help_catalog_core::{CatalogEntry, CommandPath, ParsedHelp};
///
/// let parsed = ParsedHelp {
///     usage: "verdi status [OPTIONS]".into(),
///     description: "Print status of AiiDA services.".into(),
///     ..ParsedHelp::default()
/// };
/// let entry = CatalogEntry::leaf("verdi", &CommandPath::from_tokens(["status"]), &parsed);
/// assert_eq!(entry.command, "verdi status");
/// assert_eq!(entry.usage, "verdi status [OPTIONS]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub command: String,
    pub usage: String,
    pub description: String,
}

impl CatalogEntry {
    pub fn new(
        command: impl Into<String>,
        usage: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            command: command.into(),
            usage: usage.into(),
            description: description.into(),
        }
    }

    /// Entry for a single option of the command at `path`.
    ///
    /// The command is the program, the path tokens and the combined flag
    /// variants; the description is the command description followed by
    /// the option's own text.
    pub fn for_option(
        program: &str,
        path: &CommandPath,
        parsed: &ParsedHelp,
        option: &HelpOption,
    ) -> Self {
        let command = format!("{} {}", path.command_line(program), option.combined_flags());
        let description = format!("{} {}", parsed.description, option.description);
        Self {
            command,
            usage: parsed.usage.clone(),
            description: description.trim().to_string(),
        }
    }

    /// Entry for the command at `path` itself.
    pub fn leaf(program: &str, path: &CommandPath, parsed: &ParsedHelp) -> Self {
        Self {
            command: path.command_line(program),
            usage: parsed.usage.clone(),
            description: parsed.description.trim().to_string(),
        }
    }
}

/// Derives every entry one parsed node contributes, in order: option
/// entries first, then the leaf entry when the node has no sub-commands.
pub fn node_entries(program: &str, path: &CommandPath, parsed: &ParsedHelp) -> Vec<CatalogEntry> {
    let mut entries = parsed
        .catalog_options()
        .map(|option| CatalogEntry::for_option(program, path, parsed, option))
        .collect::<Vec<_>>();
    if parsed.is_leaf() {
        entries.push(CatalogEntry::leaf(program, path, parsed));
    }
    entries
}

/// Complete output of one traversal.
///
/// Serializes transparently as a JSON array of [`CatalogEntry`] objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted for order-insensitive comparison between runs.
    pub fn sorted_entries(&self) -> Vec<&CatalogEntry> {
        let mut sorted = self.entries.iter().collect::<Vec<_>>();
        sorted.sort();
        sorted
    }

    pub fn find(&self, command: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.command == command)
    }
}
