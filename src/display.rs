use crate::span::Token;
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

/// Terminal rendering of a token sequence.
///
/// ```text
/// You  `  paid  '  US$  170,000  ?  !
///      ╰`
///               ╰'
/// ```
///
/// The first line shows the covered text of every token. Each included
/// attribute adds one line marking the token it belongs to.
pub struct TokenDisplay<'a> {
    text: &'a str,
    tokens: &'a [Token],
    show_labels: bool,
    show_forms: bool,
}

impl<'a> std::fmt::Display for TokenDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SPACE_PADDING: usize = 2;
        let mut start_columns = Vec::with_capacity(self.tokens.len());
        let mut opening_line = String::new();
        for (idx, token) in self.tokens.iter().enumerate() {
            if idx > 0 {
                opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
            }
            start_columns.push(UnicodeWidthStr::width(&*opening_line));
            match token.span.get(self.text) {
                Some(covered) => opening_line.push_str(covered),
                None => write!(&mut opening_line, "<{:?}>", token.span)?,
            }
        }

        f.write_str(&opening_line)?;

        for (token, start_column) in self.tokens.iter().zip(start_columns) {
            let label = token.label.as_deref().filter(|_| self.show_labels);
            let form = token.form.filter(|_| self.show_forms);
            for attr in label.into_iter().chain(form) {
                f.write_char('\n')?;
                for _ in 0..start_column {
                    f.write_char(' ')?;
                }
                f.write_char('╰')?;
                f.write_str(attr)?;
            }
        }

        Ok(())
    }
}

impl<'a> TokenDisplay<'a> {
    pub fn new(text: &'a str, tokens: &'a [Token]) -> Self {
        TokenDisplay {
            text,
            tokens,
            show_labels: false,
            show_forms: false,
        }
    }

    /// Show category labels (part-of-speech tags) under their tokens.
    pub fn with_labels(mut self) -> Self {
        self.show_labels = true;
        self
    }

    /// Show normalized quote forms under their tokens.
    pub fn with_forms(mut self) -> Self {
        self.show_forms = true;
        self
    }
}
