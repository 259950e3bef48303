/// Lenient parse of the yes/no-style status text the agency extracts use.
/// Unrecognized text is `None`; the caller decides whether to skip the row.
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn parse_flag_for_tests(value: &str) -> Option<bool> {
    parse_flag(value)
}
