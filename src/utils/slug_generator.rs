//! Random word-based slug generation.
//!
//! Produces human-typable slugs such as `amber` or `quiet-harbor`, the same
//! shape the creation form offers behind its "random" button.

use rand::Rng;
use rand::seq::IndexedRandom;

/// Minimum number of words in a generated slug.
const MIN_WORDS: usize = 1;

/// Maximum number of words in a generated slug.
const MAX_WORDS: usize = 2;

/// Separator between words.
const SEPARATOR: &str = "-";

/// Lowercase ASCII words; every entry must itself be a valid slug.
const WORDS: &[&str] = &[
    "acorn", "amber", "anchor", "apple", "arrow", "aspen", "atlas", "autumn", "badge", "bamboo",
    "banner", "basil", "beacon", "birch", "blossom", "bolt", "breeze", "brick", "brook", "cabin",
    "cactus", "candle", "canyon", "cedar", "chalk", "cherry", "cider", "cinder", "clover", "cobalt",
    "comet", "copper", "coral", "cotton", "crane", "crystal", "dawn", "delta", "desert", "dune",
    "eagle", "ember", "falcon", "fern", "field", "flint", "forest", "fox", "frost", "garden",
    "garnet", "glacier", "granite", "grove", "harbor", "hazel", "heron", "hollow", "honey",
    "island", "ivory", "jade", "jasper", "juniper", "kettle", "lantern", "lark", "lemon", "lilac",
    "linen", "lotus", "maple", "marble", "meadow", "mint", "mist", "moss", "nectar", "north",
    "oak", "ocean", "olive", "onyx", "orchid", "otter", "pebble", "pepper", "pine", "plum",
    "prairie", "quartz", "quiet", "rain", "raven", "reef", "ridge", "river", "robin", "saffron",
    "sage", "salt", "sand", "shadow", "shore", "silver", "slate", "spark", "spruce", "stone",
    "storm", "summit", "sun", "thistle", "thunder", "tide", "timber", "topaz", "tulip", "valley",
    "velvet", "violet", "walnut", "willow", "winter", "wren", "zephyr",
];

/// Generates a random slug of one or two words joined by `-`.
///
/// The result always matches `^[-a-z]+$` and therefore passes
/// [`crate::utils::slug_validator::validate_slug`].
pub fn generate_slug() -> String {
    let mut rng = rand::rng();
    let count = rng.random_range(MIN_WORDS..=MAX_WORDS);

    (0..count)
        .filter_map(|_| WORDS.choose(&mut rng).copied())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::slug_validator::is_valid_slug;
    use std::collections::HashSet;

    #[test]
    fn test_generate_slug_not_empty() {
        assert!(!generate_slug().is_empty());
    }

    #[test]
    fn test_generate_slug_is_valid() {
        for _ in 0..500 {
            let slug = generate_slug();
            assert!(is_valid_slug(&slug), "generated invalid slug {slug:?}");
        }
    }

    #[test]
    fn test_generate_slug_word_count() {
        for _ in 0..500 {
            let slug = generate_slug();
            let words: Vec<&str> = slug.split(SEPARATOR).collect();
            assert!((MIN_WORDS..=MAX_WORDS).contains(&words.len()));
            assert!(words.iter().all(|w| WORDS.contains(w)));
        }
    }

    #[test]
    fn test_generate_slug_varies() {
        let slugs: HashSet<String> = (0..200).map(|_| generate_slug()).collect();
        assert!(slugs.len() > 50);
    }

    #[test]
    fn test_word_list_entries_are_valid_slugs() {
        for word in WORDS {
            assert!(is_valid_slug(word));
            assert!(word.chars().all(|c| c.is_ascii_lowercase()));
        }
    }
}
