//! Help tree type definitions.
//!
//! These types describe one node of an external program's help tree as it
//! is discovered: where the node sits ([`CommandPath`]) and what its help
//! text says ([`ParsedHelp`], [`HelpOption`]).

use std::fmt;

/// Flag token that marks the built-in help option.
pub const HELP_FLAG: &str = "-h";

/// Position of a command in the external program's command tree.
///
/// The root command is the empty path. Paths are never mutated in place;
/// [`child`](CommandPath::child) returns a new, longer path.
///
/// # Examples
///
/// ```
/// use help_catalog_core::CommandPath;
///
/// let root = CommandPath::root();
/// assert!(root.is_root());
///
/// let list = root.child("process").child("list");
/// assert_eq!(list.tokens(), ["process", "list"]);
/// assert_eq!(list.to_string(), "process list");
/// assert!(root.is_root());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandPath {
    tokens: Vec<String>,
}

impl CommandPath {
    /// The empty path addressing the program itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path from an ordered list of tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns a new path extended by one sub-command name.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut tokens = Vec::with_capacity(self.tokens.len() + 1);
        tokens.extend(self.tokens.iter().cloned());
        tokens.push(name.into());
        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.tokens.len()
    }

    /// Full argument vector used to request help for this path.
    ///
    /// # Examples
    ///
    /// ```
    /// use help_catalog_core::CommandPath;
    ///
    /// let path = CommandPath::from_tokens(["computer", "setup"]);
    /// assert_eq!(
    ///     path.help_argv("verdi"),
    ///     vec!["verdi", "computer", "setup", "--help"]
    /// );
    /// ```
    pub fn help_argv(&self, program: &str) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.tokens.len() + 2);
        argv.push(program.to_string());
        argv.extend(self.tokens.iter().cloned());
        argv.push("--help".to_string());
        argv
    }

    /// Program name followed by the path tokens, space-separated.
    pub fn command_line(&self, program: &str) -> String {
        std::iter::once(program)
            .chain(self.tokens.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CommandPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

/// One entry of an `Options:` section.
///
/// `flags` keeps the raw comma-joined text (e.g. `-v, --verbose`);
/// `description` holds the first-line text plus any continuation lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpOption {
    pub flags: String,
    pub description: String,
}

impl HelpOption {
    pub fn new(flags: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            flags: flags.into(),
            description: description.into(),
        }
    }

    /// Individual flag spellings, split on `,` and trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use help_catalog_core::HelpOption;
    ///
    /// let option = HelpOption::new("-p, --profile PROFILE", "");
    /// assert_eq!(option.flag_variants(), vec!["-p", "--profile PROFILE"]);
    /// ```
    pub fn flag_variants(&self) -> Vec<&str> {
        self.flags.split(',').map(str::trim).collect()
    }

    /// True when one of the variants is exactly `-h`.
    ///
    /// ```
    /// use help_catalog_core::HelpOption;
    ///
    /// assert!(HelpOption::new("-h, --help", "Show this message.").is_help_flag());
    /// assert!(!HelpOption::new("--help", "Show this message.").is_help_flag());
    /// assert!(!HelpOption::new("-hv", "").is_help_flag());
    /// ```
    pub fn is_help_flag(&self) -> bool {
        self.flag_variants().contains(&HELP_FLAG)
    }

    /// Flag variants joined with ` / `, used as the last command token of
    /// an option entry.
    pub fn combined_flags(&self) -> String {
        self.flag_variants().join(" / ")
    }

    /// Appends a continuation line after a single space.
    pub fn append_description(&mut self, line: &str) {
        self.description.push(' ');
        self.description.push_str(line);
    }
}

/// Structured facets extracted from one help document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedHelp {
    /// Text after `Usage: `, or empty.
    pub usage: String,
    /// Free text above the first `Options:`/`Commands:` header.
    pub description: String,
    pub options: Vec<HelpOption>,
    pub sub_commands: Vec<String>,
}

impl ParsedHelp {
    /// A node with no sub-commands is a leaf of the command tree.
    pub fn is_leaf(&self) -> bool {
        self.sub_commands.is_empty()
    }

    /// Options that produce catalog entries (everything but `-h`).
    pub fn catalog_options(&self) -> impl Iterator<Item = &HelpOption> {
        self.options.iter().filter(|option| !option.is_help_flag())
    }
}
