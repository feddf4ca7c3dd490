use std::borrow::Cow;

const ESC: char = '\u{1b}';

fn is_stripped_control(c: char) -> bool {
    c.is_control() && !matches!(c, '\t' | '\n' | '\r')
}

/// Removes control characters and ANSI escape sequences from text that
/// originates in a feed, keeping tab, newline and carriage return.
///
/// Terminal sequences (`ESC [ ... final` and `ESC ] ... BEL|ESC \`) are
/// dropped whole so their parameters do not leak into the output. Returns
/// `Cow::Borrowed` when there is nothing to strip.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_stripped_control) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != ESC {
            if !is_stripped_control(c) {
                out.push(c);
            }
            continue;
        }
        match chars.peek() {
            Some('[') => {
                chars.next();
                // parameters and intermediates up to the final byte
                for c in chars.by_ref() {
                    if ('\u{40}'..='\u{7e}').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                chars.next();
                while let Some(c) = chars.next() {
                    if c == '\u{07}' {
                        break;
                    }
                    if c == ESC && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    Cow::Owned(out)
}

/// Collapses every run of whitespace into a single space and trims the ends.
pub fn collapse_whitespace(s: &str) -> Cow<'_, str> {
    let needs_work = s.starts_with(char::is_whitespace)
        || s.ends_with(char::is_whitespace)
        || s.split(char::is_whitespace).any(str::is_empty)
        || s.contains(|c: char| c.is_whitespace() && c != ' ');
    if !needs_work {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.split_whitespace().collect::<Vec<_>>().join(" "))
}
