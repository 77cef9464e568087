//! String-literal helpers shared by both extractors.
//!
//! Both the grammar path and the pattern path reduce literal text through
//! these functions so that the same source produces the same `RawArgument`
//! whichever path read it.

use std::borrow::Cow;
use std::ops::Range;

/// Content of `text` if it is exactly one quoted string literal.
///
/// Accepts `"…"`, `'…'` and triple-quoted `"""…"""`. Escapes are left as
/// written. Returns `None` for anything else, including concatenations such
/// as `"a" + "b"`.
pub fn unquote(text: &str) -> Option<&str> {
    let text = text.trim();

    if text.len() >= 6 && text.starts_with("\"\"\"") && text.ends_with("\"\"\"") {
        let inner = &text[3..text.len() - 3];
        return (!inner.contains("\"\"\"")).then_some(inner);
    }

    let quote = text.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }

    let mut chars = text.char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            chars.next();
        } else if c == quote {
            // The closing quote must end the text.
            return (i + c.len_utf8() == text.len()).then(|| &text[1..i]);
        }
    }
    None
}

/// Split `text` on `sep` at nesting depth zero, outside string literals.
///
/// Empty trailing segments (`"a", "b",`) are dropped. Never fails: unbalanced
/// input simply yields fewer splits.
pub fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: usize = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);

    while parts.last().is_some_and(|p| p.trim().is_empty()) {
        parts.pop();
    }
    parts
}

/// Byte offset just past the `)` matching the `(` at `open`, skipping string
/// literals. `None` if `open` is not a `(` or the parenthesis never closes.
pub fn matching_paren(text: &str, open: usize) -> Option<usize> {
    if !text[open..].starts_with('(') {
        return None;
    }
    let mut depth: usize = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text[open..].char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Byte ranges of `//` line comments and `/* */` block comments, skipping
/// string literals. A comment left open runs to the end of `text`.
pub fn comment_spans(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 1;
            } else if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        match (b, bytes.get(i + 1)) {
            (b'"' | b'\'', _) => quote = Some(b),
            (b'/', Some(b'/')) => {
                let end = text[i..].find('\n').map_or(text.len(), |n| i + n);
                spans.push(i..end);
                i = end;
                continue;
            }
            (b'/', Some(b'*')) => {
                let end = text[i + 2..]
                    .find("*/")
                    .map_or(text.len(), |n| i + 2 + n + 2);
                spans.push(i..end);
                i = end;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    spans
}

/// Replace every character inside `spans` with spaces, keeping newlines and
/// byte offsets. `spans` must be sorted, disjoint and on char boundaries.
pub fn blank_spans<'a>(text: &'a str, spans: &[Range<usize>]) -> Cow<'a, str> {
    if spans.is_empty() {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for span in spans {
        out.push_str(&text[last..span.start]);
        for c in text[span.clone()].chars() {
            if c == '\n' {
                out.push('\n');
            } else {
                out.extend(std::iter::repeat(' ').take(c.len_utf8()));
            }
        }
        last = span.end;
    }
    out.push_str(&text[last..]);
    Cow::Owned(out)
}

/// `text` with its comments blanked out; offsets and line numbers unchanged.
pub fn strip_comments(text: &str) -> Cow<'_, str> {
    blank_spans(text, &comment_spans(text))
}
