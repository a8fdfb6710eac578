//! Treebank escape sequences.

/// Bracket escapes and the literal they stand for.
pub(crate) const BRACKET_ESCAPES: &[(&str, char)] = &[
    ("-LRB-", '('),
    ("-RRB-", ')'),
    ("-LCB-", '{'),
    ("-RCB-", '}'),
    ("-LSB-", '['),
    ("-RSB-", ']'),
];

/// Decode bracket escapes and backslash-escaped `/` and `*`.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(c) = rest.chars().next() {
        if let Some((escape, literal)) = bracket_escape_at(rest) {
            out.push(literal);
            rest = &rest[escape.len()..];
        } else if c == '\\' && matches!(rest[1..].chars().next(), Some('/') | Some('*')) {
            out.push_str(&rest[1..2]);
            rest = &rest[2..];
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    out
}

/// The bracket escape starting `input`, if any.
pub(crate) fn bracket_escape_at(input: &str) -> Option<(&'static str, char)> {
    BRACKET_ESCAPES
        .iter()
        .copied()
        .find(|(escape, _)| input.starts_with(escape))
}
