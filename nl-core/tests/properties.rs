//! Propriedades da segmentação e da identificação sobre textos arbitrários.

use nl_core::{segment, LanguageRecognizer, Segmenter, TokenOptions, Unit};
use proptest::prelude::*;

const UNITS: [Unit; 4] = [Unit::Word, Unit::Sentence, Unit::Paragraph, Unit::Document];

/// Mistura de escritas, pontuação, quebras de linha e contrações.
fn mixed_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z]{1,8}",
            "[àéîõüç]{1,3}",
            "[а-я]{1,6}",
            "[ぁ-ん]{1,4}",
            Just("'".to_string()),
            Just("n't".to_string()),
            Just(". ".to_string()),
            Just("。".to_string()),
            Just("\n".to_string()),
            Just("\r\n".to_string()),
            Just("\n\n".to_string()),
            Just(" ".to_string()),
            "[0-9]{1,4}",
            "[!?,;:\"()]",
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn words_without_options_cover_the_text(text in mixed_text()) {
        let joined: String = segment(&text, Unit::Word, TokenOptions::NONE)
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        prop_assert_eq!(joined, text);
    }

    #[test]
    fn tokens_are_ordered_disjoint_and_on_char_boundaries(
        text in prop_oneof![mixed_text(), ".{0,80}"],
        join in any::<bool>(),
    ) {
        let options = if join {
            TokenOptions::JOIN_CONTRACTIONS
        } else {
            TokenOptions::NONE
        };
        for unit in UNITS {
            let tokens = segment(&text, unit, options);
            let mut previous_end = 0;
            for (i, token) in tokens.iter().enumerate() {
                prop_assert_eq!(token.index, i);
                prop_assert!(token.start < token.end);
                prop_assert!(token.start >= previous_end);
                prop_assert!(token.end <= text.len());
                prop_assert!(text.is_char_boundary(token.start));
                prop_assert!(text.is_char_boundary(token.end));
                prop_assert_eq!(&text[token.range()], token.text.as_str());
                previous_end = token.end;
            }
        }
    }

    #[test]
    fn segmentation_is_deterministic(text in mixed_text()) {
        for unit in UNITS {
            prop_assert_eq!(
                segment(&text, unit, TokenOptions::WORDS_ONLY),
                segment(&text, unit, TokenOptions::WORDS_ONLY)
            );
        }
    }

    #[test]
    fn omitting_whitespace_only_removes_whitespace(text in mixed_text()) {
        let all = segment(&text, Unit::Word, TokenOptions::NONE);
        let kept = segment(&text, Unit::Word, TokenOptions::OMIT_WHITESPACE);
        let expected: Vec<&str> = all
            .iter()
            .filter(|t| !t.text.chars().all(char::is_whitespace))
            .map(|t| t.text.as_str())
            .collect();
        let actual: Vec<&str> = kept.iter().map(|t| t.text.as_str()).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn subrange_offsets_stay_absolute(text in mixed_text(), cut in 0usize..200) {
        let mut cut = cut.min(text.len());
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        let tokens: Vec<_> = Segmenter::new(Unit::Word)
            .tokens_in(&text, cut..text.len())
            .unwrap()
            .collect();
        for token in tokens {
            prop_assert!(token.start >= cut);
            prop_assert_eq!(&text[token.range()], token.text.as_str());
        }
    }

    #[test]
    fn hypotheses_form_a_distribution(text in mixed_text()) {
        let recognizer = LanguageRecognizer::default();
        let hypotheses = recognizer.hypotheses(&text, usize::MAX);
        if hypotheses.is_empty() {
            prop_assert_eq!(recognizer.identify(&text), None);
        } else {
            prop_assert!((hypotheses.total() - 1.0).abs() < 1e-9);
            prop_assert_eq!(recognizer.identify(&text), hypotheses.best());
            let probabilities: Vec<f64> = hypotheses.iter().map(|h| h.probability).collect();
            prop_assert!(probabilities.windows(2).all(|w| w[0] >= w[1]));
        }
    }
}
