//! Help tree discovery and flattening.
//!
//! This crate walks the `--help` tree of an external command-line program
//! and flattens it into a [`Catalog`] with one entry per option and one per
//! leaf command.
//!
//! # Main entry points
//!
//! - [`parser::parse_help`] — split one help document into usage,
//!   description, options and sub-command names. Pure, no I/O.
//! - [`walker::TreeWalker`] — recursive traversal over a
//!   [`probe::HelpSource`], bounded by a semaphore.
//! - [`output::write_catalog`] — write the catalog as a JSON array.
//!
//! # Example
//!
//! ```
//! use help_catalog_discovery::catalog_from_help;
//!
//! let help = "\
//! Usage: verdi status [OPTIONS]
//!
//!   Print status of AiiDA services.
//!
//! Options:
//!   -t, --print-traceback  Print the full traceback in case an exception is
//!                          raised.
//!   -h, --help             Show this message and exit.
//! ";
//!
//! let catalog = catalog_from_help("verdi", &["status"], help);
//! assert_eq!(catalog.len(), 2);
//! assert_eq!(catalog.entries[0].command, "verdi status -t / --print-traceback");
//! assert_eq!(
//!     catalog.entries[0].description,
//!     "Print status of AiiDA services. Print the full traceback in case an exception is raised."
//! );
//! assert_eq!(catalog.entries[1].command, "verdi status");
//! ```
//!
//! [`Catalog`]: help_catalog_core::Catalog

pub mod error;
pub mod output;
pub mod parser;
pub mod probe;
pub mod walker;

use help_catalog_core::{Catalog, CommandPath, node_entries};

/// Entries one pre-captured help document contributes, without running
/// anything.
pub fn catalog_from_help(program: &str, path: &[&str], help_text: &str) -> Catalog {
    let parsed = parser::parse_help(help_text);
    let path = CommandPath::from_tokens(path.iter().copied());
    Catalog::new(node_entries(program, &path, &parsed))
}
