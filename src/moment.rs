//! Translation of moment.js-style date formats (as stored in Obsidian's
//! daily-notes settings) into chrono `strftime` formats.

/// Moment tokens and their strftime equivalents.
///
/// Lookup is longest-match-first, so `MMMM` wins over `MM` and `M`.
const TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("GGGG", "%G"),
    ("gggg", "%G"),
    ("MMMM", "%B"),
    ("DDDD", "%j"),
    ("dddd", "%A"),
    ("MMM", "%b"),
    ("ddd", "%a"),
    ("YY", "%y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("WW", "%V"),
    ("HH", "%H"),
    ("hh", "%I"),
    ("mm", "%M"),
    ("ss", "%S"),
    ("M", "%-m"),
    ("D", "%-d"),
    ("d", "%w"),
    ("E", "%u"),
    ("H", "%-H"),
    ("h", "%-I"),
    ("m", "%-M"),
    ("s", "%-S"),
    ("A", "%p"),
    ("a", "%P"),
    ("X", "%s"),
];

/// Rewrites a moment format string into a strftime format string.
///
/// `[...]` segments are copied literally, unknown characters pass through and
/// `%` is escaped. Never fails.
pub fn translate(moment: &str) -> String {
    let mut out = String::with_capacity(moment.len() * 2);
    let mut rest = moment;

    while let Some(c) = rest.chars().next() {
        if c == '[' {
            let body = &rest[1..];
            let (literal, tail) = match body.find(']') {
                Some(end) => (&body[..end], &body[end + 1..]),
                None => (body, ""),
            };
            push_literal(&mut out, literal);
            rest = tail;
            continue;
        }

        if let Some((token, strftime)) = TOKENS.iter().find(|(t, _)| rest.starts_with(t)) {
            out.push_str(strftime);
            rest = &rest[token.len()..];
            continue;
        }

        push_literal(&mut out, &rest[..c.len_utf8()]);
        rest = &rest[c.len_utf8()..];
    }

    out
}

fn push_literal(out: &mut String, literal: &str) {
    for c in literal.chars() {
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
    }
}
