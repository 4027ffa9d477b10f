// Header normalization shared by input headers and alias entries.

/// Lowercase, trim, then replace internal spaces with underscores.
pub fn normalize_header(raw: &str) -> String {
    raw.to_lowercase().trim().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_trims_and_underscores() {
        assert_eq!(normalize_header("  At Bats "), "at_bats");
        assert_eq!(normalize_header("Fecha de Nacimiento"), "fecha_de_nacimiento");
        assert_eq!(normalize_header("K%"), "k%");
    }

    #[test]
    fn already_normalized_is_unchanged() {
        assert_eq!(normalize_header("bb/9"), "bb/9");
        assert_eq!(normalize_header("range_factor"), "range_factor");
    }

    #[test]
    fn only_spaces_become_underscores() {
        assert_eq!(normalize_header("so\t9"), "so\t9");
        assert_eq!(normalize_header("% de fildeo"), "%_de_fildeo");
    }
}
