/// Extracts the dispatch-table key from a host gesture identifier.
///
/// Host identifiers carry a source prefix, e.g. `kb(desktop):shift+h`
/// or `kb:control+alt+h`; the table is keyed on the part after the
/// colon. Identifiers without a prefix are used as-is.
pub fn normalize_identifier(identifier: &str) -> &str {
    match identifier.split_once(':') {
        Some((_, keystroke)) => keystroke,
        None => identifier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_keyboard_source_prefix() {
        assert_eq!(normalize_identifier("kb:control+alt+h"), "control+alt+h");
        assert_eq!(normalize_identifier("kb(desktop):shift+h"), "shift+h");
    }

    #[test]
    fn bare_keystroke_passes_through() {
        assert_eq!(normalize_identifier("upArrow"), "upArrow");
    }
}
