//! Edge-case coverage for truncation and tree walking.
//!
//! These tests focus on Unicode handling (multi-byte characters, emoji and
//! combining marks), boundary lengths, and unusual but valid inputs such as
//! empty containers, odd keys and deep nesting.

use fieldmask::{MaskError, Masker, Node, truncate};
use regex::Regex;
use serde_json::{Value as JsonValue, json};

mod truncation {
    use super::*;

    #[test]
    fn boundary_lengths() {
        assert_eq!(truncate("", 3), "");
        assert_eq!(truncate("abc", 3), "abc");
        assert_eq!(truncate("abcd", 3), "abc ... (1 more runes)");
        assert_eq!(truncate("abcd", 1), "a ... (3 more runes)");
    }

    #[test]
    fn never_splits_code_points() {
        for text in ["Go语言泛型", "🔒secret🔒data", "秘密数据", "наименование"] {
            for max in 1..8 {
                let truncated = truncate(text, max);
                let total = text.chars().count();
                if total <= max {
                    assert_eq!(truncated, text);
                } else {
                    let expected: String = text.chars().take(max).collect();
                    assert_eq!(
                        truncated,
                        format!("{expected} ... ({} more runes)", total - max)
                    );
                }
            }
        }
    }

    #[test]
    fn combining_marks_count_as_separate_runes() {
        // "e" followed by U+0301 COMBINING ACUTE ACCENT.
        let text = "e\u{301}e\u{301}";
        assert_eq!(truncate(text, 1), "e ... (3 more runes)");
    }

    #[test]
    fn large_inputs_report_exact_remaining_count() {
        let text = "界".repeat(10_000);
        assert_eq!(
            truncate(&text, 5),
            format!("{} ... (9995 more runes)", "界".repeat(5))
        );
    }
}

mod tree_walking {
    use super::*;

    fn mask(masker: &Masker, value: JsonValue) -> JsonValue {
        masker.mask(&value).unwrap().into()
    }

    #[test]
    fn empty_containers_pass_through() {
        let masker = Masker::builder()
            .always_mask(Regex::new(".").unwrap())
            .build();
        assert_eq!(mask(&masker, json!({})), json!({}));
        assert_eq!(mask(&masker, json!([])), json!([]));
    }

    #[test]
    fn empty_keys_are_matched_like_any_other() {
        let masker = Masker::builder()
            .always_mask(Regex::new("^$").unwrap())
            .build();
        assert_eq!(
            mask(&masker, json!({"": "hidden", "k": "shown"})),
            json!({"": "***", "k": "shown"})
        );
    }

    #[test]
    fn unanchored_index_patterns_match_multiple_positions() {
        let masker = Masker::builder()
            .always_mask(Regex::new("1").unwrap())
            .build();
        let input: Vec<u32> = (0..12).collect();
        let masked = mask(&masker, json!(input));
        let masked_positions: Vec<usize> = masked
            .as_array()
            .unwrap()
            .iter()
            .enumerate()
            .filter(|(_, v)| *v == "***")
            .map(|(i, _)| i)
            .collect();
        assert_eq!(masked_positions, [1, 10, 11]);
    }

    #[test]
    fn object_keys_that_look_like_indices_are_still_object_keys() {
        let masker = Masker::builder()
            .always_mask(Regex::new("^0$").unwrap())
            .build();
        assert_eq!(
            mask(&masker, json!({"0": "zero", "1": "one"})),
            json!({"0": "***", "1": "one"})
        );
    }

    #[test]
    fn large_numbers_survive_unchanged() {
        let masker = Masker::builder().max_length(1).build();
        let input = json!({"big": u64::MAX, "neg": i64::MIN, "float": 1e300});
        assert_eq!(mask(&masker, input.clone()), input);
    }

    #[test]
    fn deep_nesting_is_bounded_when_configured() {
        let mut deep = json!("leaf");
        for _ in 0..64 {
            deep = json!({"n": deep});
        }
        assert!(Masker::default().mask(&deep).is_ok());

        let bounded = Masker::builder().max_depth(32).build();
        assert!(matches!(
            bounded.mask(&deep),
            Err(MaskError::DepthLimitExceeded { limit: 32 })
        ));
    }

    #[test]
    fn owned_and_borrowed_entry_points_agree() {
        let masker = Masker::builder()
            .always_mask(Regex::new("pw").unwrap())
            .max_length(2)
            .build();
        let tree = Node::from(json!({"pw": "x", "list": ["abc", {"pw": 1}]}));
        let borrowed = masker.mask_tree(&tree).unwrap();
        let owned = masker.mask_tree_owned(tree).unwrap();
        assert_eq!(borrowed, owned);
    }
}
