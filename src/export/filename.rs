//! Artifact filename derivation.

/// Sanitizes an organization name into a filename stem: lowercased,
/// with every run of non-alphanumeric characters collapsed into a
/// single underscore and stripped from the ends. Idempotent.
pub fn sanitize(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Full artifact filename: sanitized organization plus the format's
/// suffix. An organization that sanitizes to nothing falls back to
/// `export` so the artifact never starts with its suffix alone.
pub fn artifact_filename(organization: &str, suffix: &str) -> String {
    let stem = sanitize(organization);
    if stem.is_empty() {
        format!("export{suffix}")
    } else {
        format!("{stem}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_collapses_punctuation_runs() {
        assert_eq!(sanitize("Acme, Inc. / North"), "acme_inc_north");
    }

    #[test]
    fn test_sanitize_lowercases_and_keeps_digits() {
        assert_eq!(sanitize("Area 51 Labs"), "area_51_labs");
    }

    #[test]
    fn test_sanitize_trims_edges() {
        assert_eq!(sanitize("  --Acme-- "), "acme");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for name in ["Acme, Inc. / North", "a__b", "ALL CAPS!", "héllo wörld"] {
            let once = sanitize(name);
            assert_eq!(sanitize(&once), once, "input: {name}");
        }
    }

    #[test]
    fn test_sanitize_output_alphabet() {
        let out = sanitize("Weird – Name (2024) ©");
        assert!(
            out.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        );
        assert!(!out.contains("__"));
    }

    #[test]
    fn test_artifact_filename_suffixes() {
        assert_eq!(
            artifact_filename("Acme, Inc. / North", "_diagram.svg"),
            "acme_inc_north_diagram.svg"
        );
        assert_eq!(
            artifact_filename("Acme", "_infrastructure_diagram.pdf"),
            "acme_infrastructure_diagram.pdf"
        );
    }

    #[test]
    fn test_blank_organization_falls_back() {
        assert_eq!(artifact_filename("  ", "_diagram.png"), "export_diagram.png");
    }
}
