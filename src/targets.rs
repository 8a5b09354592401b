//! Jump target search
//!
//! Finds word starts in a buffer and labels them with the configured
//! placeholder characters, top to bottom, until the labels run out.

use regex::Regex;

use crate::buffer::Buffer;
use crate::config::StyleConfig;
use crate::glyph::placeholder_label;
use crate::position::PlaceholderTarget;

/// Default pattern: the first character of every word
pub const WORD_START: &str = r"\b\w";

/// Pattern-based target finder
pub struct TargetFinder {
    pattern: Regex,
}

impl TargetFinder {
    /// Create a finder; `None` if the pattern doesn't compile
    pub fn new(pattern: &str) -> Option<Self> {
        Regex::new(pattern).ok().map(|pattern| Self { pattern })
    }

    /// Label up to `labels.len()` matches in buffer order
    pub fn find(&self, buffer: &Buffer, labels: &[char]) -> Vec<PlaceholderTarget> {
        let mut targets = Vec::with_capacity(labels.len());
        let mut labels = labels.iter().copied();

        for (line_idx, text) in buffer.lines().enumerate() {
            for m in self.pattern.find_iter(text) {
                let Some(label) = labels.next() else {
                    return targets;
                };
                // Columns count characters, not bytes
                let column = text[..m.start()].chars().count();
                targets.push(PlaceholderTarget::new(line_idx, column, label));
            }
        }

        targets
    }
}

/// Find the target whose on-screen label matches a typed key, ignoring case
pub fn target_for_key(
    targets: &[PlaceholderTarget],
    key: char,
    config: &StyleConfig,
) -> Option<PlaceholderTarget> {
    let key: String = key.to_lowercase().collect();
    targets
        .iter()
        .copied()
        .find(|t| placeholder_label(t.placeholder, config).to_lowercase() == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_starts() -> TargetFinder {
        TargetFinder::new(WORD_START).unwrap()
    }

    #[test]
    fn test_word_starts() {
        let buffer = Buffer::from_text("t", "let x = 42;\n  fn main()");
        let targets = word_starts().find(&buffer, &['a', 'b', 'c', 'd', 'e', 'f']);

        assert_eq!(
            targets,
            vec![
                PlaceholderTarget::new(0, 0, 'a'),
                PlaceholderTarget::new(0, 4, 'b'),
                PlaceholderTarget::new(0, 8, 'c'),
                PlaceholderTarget::new(1, 2, 'd'),
                PlaceholderTarget::new(1, 5, 'e'),
            ]
        );
    }

    #[test]
    fn test_stops_when_labels_run_out() {
        let buffer = Buffer::from_text("t", "one two three\nfour");
        let targets = word_starts().find(&buffer, &['x', 'y']);
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[1], PlaceholderTarget::new(0, 4, 'y'));
    }

    #[test]
    fn test_columns_are_characters() {
        let buffer = Buffer::from_text("t", "é word");
        let targets = word_starts().find(&buffer, &['a', 'b']);
        assert_eq!(targets[1], PlaceholderTarget::new(0, 2, 'b'));
    }

    #[test]
    fn test_custom_pattern() {
        let finder = TargetFinder::new(r"[A-Z]").unwrap();
        let buffer = Buffer::from_text("t", "fooBar Baz");
        let targets = finder.find(&buffer, &['a', 'b', 'c']);
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].character, 3);
        assert!(TargetFinder::new("(").is_none());
    }

    #[test]
    fn test_target_for_key() {
        let config = StyleConfig::default();
        let targets = vec![
            PlaceholderTarget::new(0, 0, 'a'),
            PlaceholderTarget::new(2, 3, 's'),
        ];
        assert_eq!(
            target_for_key(&targets, 's', &config),
            Some(PlaceholderTarget::new(2, 3, 's'))
        );
        assert_eq!(
            target_for_key(&targets, 'S', &config),
            Some(PlaceholderTarget::new(2, 3, 's'))
        );
        assert_eq!(target_for_key(&targets, 'q', &config), None);
    }

    #[test]
    fn test_key_matches_lower_cased_label_of_upper_code() {
        let mut config = StyleConfig::default();
        config.placeholder.characters = vec!['A', 'B'];
        config.placeholder.upper_case = false;
        let targets = vec![
            PlaceholderTarget::new(0, 0, 'A'),
            PlaceholderTarget::new(1, 0, 'B'),
        ];

        assert_eq!(
            target_for_key(&targets, 'b', &config),
            Some(PlaceholderTarget::new(1, 0, 'B'))
        );
        assert_eq!(
            target_for_key(&targets, 'A', &config),
            Some(PlaceholderTarget::new(0, 0, 'A'))
        );
    }

    #[test]
    fn test_key_matches_upper_cased_label() {
        let mut config = StyleConfig::default();
        config.placeholder.upper_case = true;
        let targets = vec![PlaceholderTarget::new(4, 1, 'k')];

        assert_eq!(
            target_for_key(&targets, 'k', &config),
            Some(PlaceholderTarget::new(4, 1, 'k'))
        );
    }
}
