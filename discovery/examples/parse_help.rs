//! Help text parsing example.
//!
//! Parses a pre-captured click-style help document and prints its facets
//! and the catalog entries it would contribute, without running anything.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p help-catalog-discovery --example parse_help
//! ```

use help_catalog_discovery::catalog_from_help;
use help_catalog_discovery::parser::parse_help;

fn main() {
    let help_text = r#"
Usage: verdi computer [OPTIONS] COMMAND [ARGS]...

  Setup and manage computers.

Options:
  -v, --verbosity [notset|debug|info|report|warning|error|critical]
                                  Set the verbosity of the output.
  -h, --help                      Show this message and exit.

Commands:
  configure  Configure the transport for a computer and user.
  list       List all available computers.
  setup      Create a new computer.
  test       Test the connection to a computer.
"#;

    let parsed = parse_help(help_text);
    println!("Usage: {}", parsed.usage);
    println!("Description: {}", parsed.description);

    println!("\nOptions ({}):", parsed.options.len());
    for option in &parsed.options {
        let marker = if option.is_help_flag() { " (skipped)" } else { "" };
        println!("  {}{marker}  —  {}", option.flags, option.description);
    }

    println!("\nSub-commands ({}):", parsed.sub_commands.len());
    for name in &parsed.sub_commands {
        println!("  {name}");
    }

    let catalog = catalog_from_help("verdi", &["computer"], help_text);
    println!("\nCatalog entries ({}):", catalog.len());
    for entry in &catalog.entries {
        println!("  {}  —  {}", entry.command, entry.description);
    }
}
