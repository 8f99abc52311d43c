//! Steering-file parser.
//!
//! Grammar: one `NAME = VALUE` parameter per logical line. A `/` outside
//! quotes and outside an open continuation starts an end-of-line comment;
//! a `/` embedded in a non-whitespace token (file paths) is literal. A
//! physical line truncated at the 72-column boundary without closing its
//! context (open quote, dangling list delimiter) continues on the next
//! physical line.

use std::fs;
use std::path::Path;

use crate::set::SteeringSet;
use crate::value::{Scalar, Value};
use crate::{LINE_WIDTH, SteeringError, SteeringResult};

/// Parse steering-file text. The result has no source file.
pub fn parse_str(text: &str) -> SteeringResult<SteeringSet> {
    parse_inner(text, None)
}

/// Parse the steering file at `path`; the result's source file is `path`.
pub fn parse_file(path: impl AsRef<Path>) -> SteeringResult<SteeringSet> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    parse_inner(&text, Some(path))
}

/// Type a single value the way file values are typed: integer, then real,
/// then boolean token, else string; `;`-separated input yields a list.
pub fn parse_value(text: &str) -> Value {
    type_value(text.trim())
}

enum Mode {
    /// Inside an unbalanced quote; appended text is kept verbatim.
    Quote,
    /// After a dangling list delimiter on a full-width line.
    List,
}

struct Pending {
    name: String,
    value: String,
    start_line: usize,
    mode: Mode,
}

fn parse_inner(text: &str, source: Option<&Path>) -> SteeringResult<SteeringSet> {
    let mut set = SteeringSet::new();
    let mut pending: Option<Pending> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;

        // Continuation lines take the whole physical line: no comment
        // stripping, no '=' scanning.
        if let Some(mut p) = pending.take() {
            match p.mode {
                Mode::Quote => p.value.push_str(raw),
                Mode::List => p.value.push_str(raw.trim_start()),
            }
            pending = settle(p, raw, &mut set);
            continue;
        }

        let (content, comment) = split_comment(raw);
        if comment.is_some() {
            warn_if_ambiguous(content, line_no);
        }
        if content.trim().is_empty() {
            continue;
        }
        let Some(eq) = content.find('=') else {
            return Err(SteeringError::MissingEquals {
                line: line_no,
                text: raw.trim().to_string(),
            });
        };
        let name = content[..eq].trim();
        if name.is_empty() {
            return Err(SteeringError::EmptyName { line: line_no });
        }
        let p = Pending {
            name: name.to_string(),
            value: content[eq + 1..].trim_start().to_string(),
            start_line: line_no,
            mode: Mode::Quote,
        };
        pending = settle(p, raw, &mut set);
    }

    if let Some(p) = pending {
        return Err(SteeringError::UnterminatedContinuation { line: p.start_line });
    }

    Ok(set.with_source_file(source.map(Path::to_path_buf)))
}

/// Decide whether the logical value is complete after seeing `raw`.
fn settle(mut p: Pending, raw: &str, set: &mut SteeringSet) -> Option<Pending> {
    if has_open_quote(&p.value) {
        p.mode = Mode::Quote;
        return Some(p);
    }
    let trimmed_len = p.value.trim_end().len();
    p.value.truncate(trimmed_len);
    if p.value.ends_with(';') && raw.chars().count() >= LINE_WIDTH {
        p.mode = Mode::List;
        return Some(p);
    }
    finish(set, p);
    None
}

fn finish(set: &mut SteeringSet, p: Pending) {
    if set.contains_key(&p.name) {
        tracing::warn!(key = %p.name, line = p.start_line, "duplicate steering key, last value wins");
    }
    set.insert(p.name, type_value(&p.value));
}

/// Split an end-of-line comment off `line`. A `/` opens a comment only at
/// column zero or after whitespace, and never inside quotes.
fn split_comment(line: &str) -> (&str, Option<usize>) {
    let bytes = line.as_bytes();
    let mut in_quote: Option<u8> = None;
    let mut prev_ws = true;
    for (i, &b) in bytes.iter().enumerate() {
        match in_quote {
            Some(q) => {
                if b == q {
                    in_quote = None;
                }
            }
            None => {
                if b == b'\'' || b == b'"' {
                    in_quote = Some(b);
                } else if b == b'/' && prev_ws {
                    return (&line[..i], Some(i));
                }
            }
        }
        prev_ws = b == b' ' || b == b'\t';
    }
    (line, None)
}

/// A stripped comment right after a path-like value is the one genuinely
/// ambiguous case in the grammar; flag it instead of guessing silently.
fn warn_if_ambiguous(content: &str, line: usize) {
    if let Some(last) = content.trim_end().split_whitespace().last()
        && (last.contains('/') || last.contains('\\'))
    {
        tracing::warn!(line, token = %last, "comment after path-like value, check the steering line");
    }
}

fn has_open_quote(text: &str) -> bool {
    let mut in_quote: Option<u8> = None;
    for &b in text.as_bytes() {
        match in_quote {
            Some(q) => {
                if b == q {
                    in_quote = None;
                }
            }
            None => {
                if b == b'\'' || b == b'"' {
                    in_quote = Some(b);
                }
            }
        }
    }
    in_quote.is_some()
}

fn type_value(text: &str) -> Value {
    match split_list(text) {
        Some(elements) => Value::List(elements.iter().map(|e| type_scalar(e)).collect()),
        None => Value::Scalar(type_scalar(text)),
    }
}

/// Split on top-level `;` delimiters. `None` when the text holds a single
/// scalar; empty elements (dangling delimiters) are dropped.
fn split_list(text: &str) -> Option<Vec<&str>> {
    let bytes = text.as_bytes();
    let mut in_quote: Option<u8> = None;
    let mut cuts = Vec::new();
    for (i, &b) in bytes.iter().enumerate() {
        match in_quote {
            Some(q) => {
                if b == q {
                    in_quote = None;
                }
            }
            None => {
                if b == b'\'' || b == b'"' {
                    in_quote = Some(b);
                } else if b == b';' {
                    cuts.push(i);
                }
            }
        }
    }
    if cuts.is_empty() {
        return None;
    }
    let mut elements = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts {
        elements.push(&text[start..cut]);
        start = cut + 1;
    }
    elements.push(&text[start..]);
    Some(
        elements
            .into_iter()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .collect(),
    )
}

fn type_scalar(text: &str) -> Scalar {
    if let Ok(v) = text.parse::<i64>() {
        return Scalar::Int(v);
    }
    if let Ok(v) = text.parse::<f64>() {
        return Scalar::Real(v);
    }
    match text.to_ascii_uppercase().as_str() {
        "YES" | "TRUE" | "OUI" | "VRAI" => return Scalar::Bool(true),
        "NO" | "FALSE" | "NON" | "FAUX" => return Scalar::Bool(false),
        _ => {}
    }
    Scalar::Str(unquote(text))
}

/// Strip one pair of surrounding quotes and collapse the solver's doubled
/// inner quotes.
fn unquote(text: &str) -> String {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'\'' || first == b'"') && bytes[bytes.len() - 1] == first {
            let inner = &text[1..text.len() - 1];
            let quote = first as char;
            return inner.replace(&format!("{quote}{quote}"), &quote.to_string());
        }
    }
    text.to_string()
}
