use super::{ARGUMENTS_HEADER, COMMANDS_HEADER, OPTIONS_HEADER, closes_section, split_columns};

/// Collects sub-command names from the `Commands:` section.
///
/// Each non-empty row contributes its first column. Parsing ends at an
/// `Options:`/`Arguments:` header or at the first non-empty line that is
/// not indented.
pub fn parse_sub_commands(lines: &[&str]) -> Vec<String> {
    let mut sub_commands = Vec::new();
    let mut in_commands = false;

    for line in lines {
        let trimmed = line.trim();
        if trimmed.starts_with(COMMANDS_HEADER) {
            in_commands = true;
            continue;
        }
        if !in_commands {
            continue;
        }
        if trimmed.starts_with(OPTIONS_HEADER)
            || trimmed.starts_with(ARGUMENTS_HEADER)
            || closes_section(line, trimmed)
        {
            break;
        }
        if !trimmed.is_empty() {
            let (name, _) = split_columns(trimmed);
            sub_commands.push(name.trim().to_string());
        }
    }

    sub_commands
}
