use crate::{tokenize, Granularity, Span};
use proptest::prelude::*;

fn granularity() -> impl Strategy<Value = Granularity> {
    prop_oneof![Just(Granularity::Token), Just(Granularity::Subtoken)]
}

proptest! {
    #[test]
    fn tokenization_is_deterministic_and_covers_all_material(
        text in "[a-zA-Z0-9 .,;:'\"`$%&()?!\u{2019}\u{201C}\u{201D}\t\n-]{0,60}",
        granularity in granularity(),
    ) {
        let tokens = tokenize(&text, Span::of(&text), granularity);
        prop_assert_eq!(&tokens, &tokenize(&text, Span::of(&text), granularity));

        let mut previous_end = 0;
        for token in &tokens {
            prop_assert!(!token.span.is_empty());
            prop_assert!(token.span.begin >= previous_end);
            prop_assert!(token.span.end <= text.len());
            prop_assert!(!token.text(&text).chars().any(char::is_whitespace));
            previous_end = token.span.end;
        }

        let covered: String = tokens.iter().map(|t| t.text(&text)).collect();
        let material: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        prop_assert_eq!(covered, material);
    }

    #[test]
    fn tokens_are_contained_in_any_window(
        text in "[a-zA-Z0-9 .,'\"$%:-]{0,60}",
        a in 0usize..61,
        b in 0usize..61,
        granularity in granularity(),
    ) {
        let (begin, end) = (a.min(b).min(text.len()), a.max(b).min(text.len()));
        let window = Span::new(begin, end);
        for token in tokenize(&text, window, granularity) {
            prop_assert!(window.covers(&token.span));
            prop_assert!(!token.span.is_empty());
        }
    }
}
