//! Dotenv-style rendering and parsing
//!
//! Keys and values that would confuse a shell `source` are double-quoted
//! and escaped; plain entries are emitted bare so the common case stays
//! readable.

use crate::{ConfigMap, ExportError};

fn needs_quoting(text: &str) -> bool {
    text.is_empty()
        || text
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '=' | '"' | '\'' | '#' | '\\' | '$' | '`'))
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '$' => out.push_str("\\$"),
            '`' => out.push_str("\\`"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn push_field(out: &mut String, text: &str) {
    if needs_quoting(text) {
        out.push_str(&quote(text));
    } else {
        out.push_str(text);
    }
}

pub(crate) fn render(map: &ConfigMap) -> String {
    let mut out = String::new();
    for (key, value) in map {
        push_field(&mut out, key);
        out.push('=');
        push_field(&mut out, value);
        out.push('\n');
    }
    out
}

pub(crate) fn parse(input: &str) -> Result<ConfigMap, ExportError> {
    let mut map = ConfigMap::new();
    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (key, raw_value) = if trimmed.starts_with('"') {
            let (key, rest) = take_quoted(trimmed, line_no)?;
            let rest = rest.strip_prefix('=').ok_or_else(|| ExportError::Parse {
                line: line_no,
                message: "expected '=' after quoted key".to_string(),
            })?;
            (key, rest)
        } else {
            let (key, value) = trimmed.split_once('=').ok_or_else(|| ExportError::Parse {
                line: line_no,
                message: "expected KEY=VALUE".to_string(),
            })?;
            let key = key.trim().to_string();
            if key.is_empty() {
                return Err(ExportError::Parse {
                    line: line_no,
                    message: "empty key".to_string(),
                });
            }
            (key, value)
        };

        let value = if raw_value.starts_with('"') {
            let (value, rest) = take_quoted(raw_value, line_no)?;
            if !rest.is_empty() {
                return Err(ExportError::Parse {
                    line: line_no,
                    message: "trailing characters after quoted value".to_string(),
                });
            }
            value
        } else {
            raw_value.to_string()
        };
        map.insert(key, value);
    }
    Ok(map)
}

/// Consume a leading double-quoted field, returning its unescaped content
/// and whatever follows the closing quote
fn take_quoted(raw: &str, line_no: usize) -> Result<(String, &str), ExportError> {
    let mut out = String::new();
    let mut chars = raw.char_indices();
    chars.next(); // opening quote

    while let Some((idx, c)) = chars.next() {
        match c {
            '"' => return Ok((out, &raw[idx + 1..])),
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, escaped)) => out.push(escaped),
                None => {
                    return Err(ExportError::Parse {
                        line: line_no,
                        message: "dangling escape in quoted field".to_string(),
                    })
                }
            },
            _ => out.push(c),
        }
    }
    Err(ExportError::Parse {
        line: line_no,
        message: "unterminated quoted field".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_values_stay_bare() {
        let mut map = ConfigMap::new();
        map.insert("DB_PORT".to_string(), "5432".to_string());
        assert_eq!(render(&map), "DB_PORT=5432\n");
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let parsed = parse("# comment\n\nDB_HOST=db.internal\n").unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["DB_HOST"], "db.internal");
    }

    #[test]
    fn quoted_value_with_hash_is_not_a_comment() {
        let mut map = ConfigMap::new();
        map.insert("K".to_string(), "a #b".to_string());
        let rendered = render(&map);
        assert_eq!(rendered, "K=\"a #b\"\n");
        assert_eq!(parse(&rendered).unwrap(), map);
    }

    #[test]
    fn punctuated_keys_are_quoted_and_round_trip() {
        let mut map = ConfigMap::new();
        map.insert("ODD=KEY".to_string(), "v1".to_string());
        map.insert("SPACED KEY".to_string(), "v2".to_string());
        let rendered = render(&map);
        assert_eq!(rendered, "\"ODD=KEY\"=v1\n\"SPACED KEY\"=v2\n");
        assert_eq!(parse(&rendered).unwrap(), map);
    }

    #[test]
    fn missing_separator_is_an_error() {
        let err = parse("NOT A PAIR\n").unwrap_err();
        assert!(matches!(err, ExportError::Parse { line: 1, .. }));
    }

    #[test]
    fn unterminated_quoted_key_is_an_error() {
        let err = parse("\"BROKEN=v\n").unwrap_err();
        assert!(matches!(err, ExportError::Parse { line: 1, .. }));
    }
}
