//! java.util.Properties rendering and parsing
//!
//! Keys escape every separator and whitespace character; values escape
//! backslashes, line breaks and leading whitespace, which is all the
//! store format of Properties requires for a lossless reload.

use crate::{ConfigMap, ExportError};

fn escape_common(c: char, out: &mut String) -> bool {
    match c {
        '\\' => out.push_str("\\\\"),
        '\t' => out.push_str("\\t"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '=' => out.push_str("\\="),
        ':' => out.push_str("\\:"),
        '#' => out.push_str("\\#"),
        '!' => out.push_str("\\!"),
        _ => return false,
    }
    true
}

fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        if escape_common(c, &mut out) {
            continue;
        }
        if c == ' ' {
            out.push_str("\\ ");
        } else {
            out.push(c);
        }
    }
    out
}

fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut leading = true;
    for c in value.chars() {
        if escape_common(c, &mut out) {
            leading = false;
            continue;
        }
        if c == ' ' && leading {
            out.push_str("\\ ");
        } else {
            out.push(c);
            leading = false;
        }
    }
    out
}

pub(crate) fn render(map: &ConfigMap) -> String {
    let mut out = String::new();
    for (key, value) in map {
        out.push_str(&escape_key(key));
        out.push('=');
        out.push_str(&escape_value(value));
        out.push('\n');
    }
    out
}

pub(crate) fn parse(input: &str) -> Result<ConfigMap, ExportError> {
    let mut map = ConfigMap::new();
    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let (key, value) = split_pair(trimmed, line_no)?;
        map.insert(key, value);
    }
    Ok(map)
}

/// Split at the first unescaped `=` or `:`, unescaping both halves.
/// A line with no separator is a key with an empty value, as in
/// Properties itself.
fn split_pair(line: &str, line_no: usize) -> Result<(String, String), ExportError> {
    let mut key = String::new();
    let mut chars = line.chars().peekable();

    let mut separated = false;
    while let Some(c) = chars.next() {
        match c {
            '=' | ':' => {
                separated = true;
                break;
            }
            '\\' => key.push(unescape_next(&mut chars, line_no)?),
            _ => key.push(c),
        }
    }

    if !separated {
        return Ok((key, String::new()));
    }

    // Leading raw whitespace before the value is not part of it
    while matches!(chars.peek(), Some(' ') | Some('\t')) {
        chars.next();
    }

    let mut value = String::new();
    while let Some(c) = chars.next() {
        match c {
            '\\' => value.push(unescape_next(&mut chars, line_no)?),
            _ => value.push(c),
        }
    }
    Ok((key, value))
}

fn unescape_next(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    line_no: usize,
) -> Result<char, ExportError> {
    match chars.next() {
        Some('t') => Ok('\t'),
        Some('n') => Ok('\n'),
        Some('r') => Ok('\r'),
        Some(other) => Ok(other),
        None => Err(ExportError::Parse {
            line: line_no,
            message: "dangling escape".to_string(),
        }),
    }
}
