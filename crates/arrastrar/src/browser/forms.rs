//! Form-control classification for the press default-action exception.

/// Tags whose default press behavior (focus, caret placement, dropdown
/// opening) must survive a drag gesture starting on them.
const NATIVE_DEFAULT_TAGS: [&str; 5] = ["SELECT", "INPUT", "TEXTAREA", "BUTTON", "OPTION"];

/// Whether a mouse press on an element with this tag name keeps its
/// default action instead of being suppressed for drag recognition.
#[must_use]
pub fn keeps_native_default(tag_name: &str) -> bool {
    NATIVE_DEFAULT_TAGS
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case(tag_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_controls_keep_default() {
        for tag in ["SELECT", "INPUT", "TEXTAREA", "BUTTON", "OPTION"] {
            assert!(keeps_native_default(tag), "{tag} should keep its default");
        }
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert!(keeps_native_default("input"));
        assert!(keeps_native_default("TextArea"));
    }

    #[test]
    fn test_other_elements_are_suppressed() {
        for tag in ["DIV", "SPAN", "IMG", "A", "CANVAS", "LABEL"] {
            assert!(!keeps_native_default(tag), "{tag} should be suppressed");
        }
    }
}
