//! Core types for flattened CLI help catalogs.
//!
//! This crate defines the data model shared by the discovery walker and the
//! command-line front end:
//!
//! - [`CommandPath`] — position of a command in an external program's
//!   command tree.
//! - [`ParsedHelp`] and [`HelpOption`] — the facets extracted from one
//!   `--help` document.
//! - [`CatalogEntry`] and [`Catalog`] — the flattened, serializable output.
//!
//! # Example
//!
//! ```
//! use help_catalog_core::*;
//!
//! let parsed = ParsedHelp {
//!     usage: "verdi profile list [OPTIONS]".into(),
//!     description: "Display a list of all available profiles.".into(),
//!     options: vec![
//!         HelpOption::new("-h, --help", "Show this message and exit."),
//!         HelpOption::new("-v, --verbosity", "Set the verbosity."),
//!     ],
//!     sub_commands: Vec::new(),
//! };
//!
//! let path = CommandPath::from_tokens(["profile", "list"]);
//! let entries = node_entries("verdi", &path, &parsed);
//! assert_eq!(entries.len(), 2);
//! assert_eq!(entries[0].command, "verdi profile list -v / --verbosity");
//! assert_eq!(entries[1].command, "verdi profile list");
//! ```

mod catalog;
mod types;

pub use catalog::{Catalog, CatalogEntry, node_entries};
pub use types::*;
