//! Locating the JSON candidate inside free-form agent text.

const FENCE: &str = "```";

/// Tracks whether a scan position sits inside a string literal.
///
/// Both `"` and `'` open a literal; it closes on the same quote character.
/// A backslash escapes the next character.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct QuoteTracker {
    open: Option<char>,
    escaped: bool,
}

impl QuoteTracker {
    /// Feed one character. Returns `true` when the character is part of a
    /// string literal, delimiters included.
    pub(crate) fn step(&mut self, c: char) -> bool {
        match self.open {
            Some(quote) => {
                if self.escaped {
                    self.escaped = false;
                } else if c == '\\' {
                    self.escaped = true;
                } else if c == quote {
                    self.open = None;
                }
                true
            }
            None => {
                if c == '"' || c == '\'' {
                    self.open = Some(c);
                    true
                } else {
                    false
                }
            }
        }
    }

    pub(crate) fn in_string(&self) -> bool {
        self.open.is_some()
    }
}

/// Where the bracket scan ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Candidate<'a> {
    /// A complete `{...}` / `[...]` span.
    Balanced(&'a str),
    /// No balanced span; everything from the first bracket (or the whole
    /// text when there is none).
    Unbalanced(&'a str),
}

impl<'a> Candidate<'a> {
    pub(crate) fn text(&self) -> &'a str {
        match self {
            Candidate::Balanced(s) | Candidate::Unbalanced(s) => s,
        }
    }
}

/// Body of the first fenced block, if the text has an opening and a closing
/// triple-backtick marker.
///
/// A language tag directly after the opening marker is skipped when it is
/// followed by whitespace. The block closes at the first marker that starts
/// a line, or at the first marker at all when the block is inline.
pub(crate) fn fenced_body(text: &str) -> Option<&str> {
    let open = text.find(FENCE)?;
    let after = &text[open + FENCE.len()..];

    let tag_len = after
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+' | '.')))
        .unwrap_or(after.len());
    let tag_ends_line = after[tag_len..]
        .chars()
        .next()
        .map_or(true, char::is_whitespace);
    let body = if tag_ends_line {
        &after[tag_len..]
    } else {
        after
    };

    let close = body
        .match_indices(FENCE)
        .map(|(at, _)| at)
        .find(|&at| starts_line(body, at))
        .or_else(|| body.find(FENCE))?;
    Some(body[..close].trim())
}

fn starts_line(text: &str, at: usize) -> bool {
    text[..at]
        .rfind('\n')
        .is_some_and(|nl| text[nl + 1..at].chars().all(|c| c == ' ' || c == '\t'))
}

/// Find the first balanced bracket span, skipping brackets inside string
/// literals.
pub(crate) fn locate(text: &str) -> Candidate<'_> {
    let Some(start) = text.find(['{', '[']) else {
        return Candidate::Unbalanced(text);
    };

    let rest = &text[start..];
    let mut depth = 0usize;
    let mut quotes = QuoteTracker::default();

    for (offset, c) in rest.char_indices() {
        if quotes.step(c) {
            continue;
        }
        match c {
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Candidate::Balanced(&rest[..offset + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    Candidate::Unbalanced(rest)
}
