use help_catalog_core::HelpOption;

use super::{ARGUMENTS_HEADER, COMMANDS_HEADER, OPTIONS_HEADER, closes_section, split_columns};

/// Parses the rows of the `Options:` section.
///
/// A row whose trimmed text starts with `-` opens a new option. Other
/// non-empty rows continue the description of the open option. Parsing
/// ends at a `Commands:`/`Arguments:` header or at the first non-empty
/// line that is not indented.
pub fn parse_options(lines: &[&str]) -> Vec<HelpOption> {
    let mut options: Vec<HelpOption> = Vec::new();
    let mut in_options = false;

    for line in lines {
        let trimmed = line.trim();
        if trimmed.starts_with(OPTIONS_HEADER) {
            in_options = true;
            continue;
        }
        if !in_options {
            continue;
        }
        if trimmed.starts_with(COMMANDS_HEADER)
            || trimmed.starts_with(ARGUMENTS_HEADER)
            || closes_section(line, trimmed)
        {
            break;
        }

        if trimmed.starts_with('-') {
            let (flags, description) = split_columns(trimmed);
            options.push(HelpOption::new(
                flags.trim(),
                description.map(str::trim).unwrap_or_default(),
            ));
        } else if !trimmed.is_empty() {
            if let Some(current) = options.last_mut() {
                current.append_description(trimmed);
            }
        }
    }

    options
}
