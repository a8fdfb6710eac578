use crate::{forest_terminals, parse_forest, Aligner};
use proptest::prelude::*;

fn word_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,6}", 1..10)
}

fn separator() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(" "), Just("  "), Just("\n"), Just(" \n\t")]
}

fn tree_of(words: &[String]) -> String {
    let leaves: Vec<String> = words.iter().map(|w| format!("(NN {})", w)).collect();
    format!("( (S (`` ``) {} ('' '')) )", leaves.join(" "))
}

proptest! {
    #[test]
    fn leaves_present_in_order_always_align(
        words in word_list(),
        separators in prop::collection::vec(separator(), 10),
        quotes in prop_oneof![Just(("\"", "\"")), Just(("\u{201C}", "\u{201D}")), Just(("``", "''"))],
    ) {
        let mut text = String::from(quotes.0);
        for (word, separator) in words.iter().zip(&separators) {
            text.push_str(word);
            text.push_str(separator);
        }
        text.push_str(quotes.1);

        let forest = Aligner::new()
            .align(&text, 0, parse_forest(&tree_of(&words)).unwrap())
            .unwrap();
        prop_assert_eq!(forest[0].span.map(|s| s.begin), Some(0));
        prop_assert_eq!(forest[0].span.map(|s| s.end), Some(text.len()));

        let terminals = forest_terminals(&forest);
        let mut previous_end = 0;
        for (terminal, expected) in terminals[1..terminals.len() - 1].iter().zip(&words) {
            let span = terminal.span.unwrap();
            prop_assert!(span.begin >= previous_end);
            prop_assert_eq!(span.text(&text), expected.as_str());
            previous_end = span.end;
        }
    }

    #[test]
    fn a_missing_word_fails_the_whole_forest(
        words in prop::collection::vec("[a-z]{1,6}", 2..10),
        missing in any::<prop::sample::Index>(),
    ) {
        let missing = missing.index(words.len());
        let text: Vec<&str> = words
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != missing)
            .map(|(_, w)| w.as_str())
            .collect();
        let text = format!("\"{}\"", text.join(" "));

        let outcome = Aligner::new().align(&text, 0, parse_forest(&tree_of(&words)).unwrap());
        prop_assert!(outcome.is_err());
    }
}
