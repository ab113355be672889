use super::USAGE_PREFIX;

/// Returns the text after the first `Usage: ` prefix, trimmed.
///
/// The prefix must start the untrimmed line. Returns an empty string when
/// no line carries it.
pub fn parse_usage(lines: &[&str]) -> String {
    lines
        .iter()
        .find_map(|line| line.strip_prefix(USAGE_PREFIX))
        .map(|rest| rest.trim().to_string())
        .unwrap_or_default()
}
