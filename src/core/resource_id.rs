use regex::Regex;
use std::sync::LazyLock;

static NON_SLUG_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is a valid regex"));

/// Turn a definition filename into an Aspect Type ID.
///
/// The extension is dropped, the stem lowercased, and every run of characters
/// outside `[a-z0-9]` collapsed to a single `-`. Leading and trailing hyphens
/// are trimmed, so the result is either empty or a valid slug.
///
/// `"my_data_contract.json"` becomes `"my-data-contract"`.
pub fn derive_resource_id(filename: &str) -> String {
    let lowered = stem(filename).to_lowercase();
    NON_SLUG_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Filename without its final extension.
///
/// Leading dots never start an extension, so `..json` keeps its whole name
/// while `.a.json` becomes `.a`.
fn stem(filename: &str) -> &str {
    let leading_dots = filename.len() - filename.trim_start_matches('.').len();
    match filename[leading_dots..].rfind('.') {
        Some(dot) => &filename[..leading_dots + dot],
        None => filename,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underscores_become_hyphens() {
        assert_eq!(derive_resource_id("my_data_contract.json"), "my-data-contract");
    }

    #[test]
    fn test_mixed_case_and_punctuation() {
        assert_eq!(derive_resource_id("My Aspect (v2).json"), "my-aspect-v2");
        assert_eq!(derive_resource_id("PII--Tags__.json"), "pii-tags");
    }

    #[test]
    fn test_only_last_extension_is_dropped() {
        assert_eq!(derive_resource_id("quality.rules.json"), "quality-rules");
    }

    #[test]
    fn test_dotfile_keeps_its_name() {
        assert_eq!(derive_resource_id(".json"), "json");
        assert_eq!(derive_resource_id("..json"), "json");
        assert_eq!(derive_resource_id("...json"), "json");
    }

    #[test]
    fn test_leading_dot_then_extension() {
        assert_eq!(stem(".a.json"), ".a");
        assert_eq!(derive_resource_id(".hidden.aspect.json"), "hidden-aspect");
        assert_eq!(stem("noext"), "noext");
    }

    #[test]
    fn test_no_alphanumerics_yields_empty_id() {
        assert_eq!(derive_resource_id("___.json"), "");
        assert_eq!(derive_resource_id("-- --.json"), "");
    }

    #[test]
    fn test_non_ascii_letters_are_separators() {
        assert_eq!(derive_resource_id("données_clés.json"), "donn-es-cl-s");
        assert_eq!(derive_resource_id("日本.json"), "");
    }
}
