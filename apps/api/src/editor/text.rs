//! Conversions between list fields and the single text box they are edited in.
//!
//! These determine exactly what gets persisted, so they must stay stable:
//! descriptions split on newlines and keep blank lines as empty bullets;
//! skill items split on commas, trimmed, with empty segments dropped.

pub fn split_description_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

pub fn join_description_lines(lines: &[String]) -> String {
    lines.join("\n")
}

pub fn split_skill_items(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_skill_items(items: &[String]) -> String {
    items.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_items_trimmed_and_empties_dropped() {
        assert_eq!(
            split_skill_items("UX, UI,  Branding ,"),
            vec!["UX", "UI", "Branding"]
        );
    }

    #[test]
    fn test_skill_items_blank_input_is_empty() {
        assert!(split_skill_items("").is_empty());
        assert!(split_skill_items(" , ,").is_empty());
    }

    #[test]
    fn test_description_keeps_blank_lines_and_spacing() {
        assert_eq!(
            split_description_lines("Led rebrand\n\n  Grew sales "),
            vec!["Led rebrand", "", "  Grew sales "]
        );
    }

    #[test]
    fn test_empty_description_is_one_empty_bullet() {
        assert_eq!(split_description_lines(""), vec![""]);
    }

    #[test]
    fn test_join_then_split_is_stable() {
        let items = vec!["Figma".to_string(), "SEO".to_string()];
        assert_eq!(split_skill_items(&join_skill_items(&items)), items);

        let lines = vec!["one".to_string(), String::new(), "three".to_string()];
        assert_eq!(split_description_lines(&join_description_lines(&lines)), lines);
    }
}
