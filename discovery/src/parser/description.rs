use super::{COMMANDS_HEADER, OPTIONS_HEADER, USAGE_PREFIX};

/// Joins the free-text lines above the first `Options:`/`Commands:` header.
///
/// Blank lines and the usage line are skipped. Nothing at or after the
/// first header is ever included.
pub fn parse_description(lines: &[&str]) -> String {
    let mut description = Vec::new();
    for line in lines {
        let trimmed = line.trim();
        if trimmed.starts_with(OPTIONS_HEADER) || trimmed.starts_with(COMMANDS_HEADER) {
            break;
        }
        if !trimmed.is_empty() && !line.starts_with(USAGE_PREFIX) {
            description.push(trimmed);
        }
    }
    description.join(" ")
}
