//! Steering-file writer.
//!
//! Inverse of the parser: one `KEY = VALUE` logical line per parameter, in
//! insertion order. Lines longer than 72 columns split at a list delimiter
//! or at a space inside a quoted string, so that no emitted physical line
//! starts with `/` and the key name is never split. Non-final list segments
//! are padded to exactly 72 columns so the reader's continuation rule
//! fires; quoted-string segments leave the quote open instead.

use std::fs;
use std::io;
use std::path::Path;

use crate::set::SteeringSet;
use crate::value::{Scalar, Value};
use crate::{LINE_WIDTH, SteeringResult};

/// Render the whole set as steering-file text.
pub fn render(set: &SteeringSet) -> String {
    let mut out = String::new();
    for (name, value) in set.iter() {
        for segment in wrap_logical(name, value) {
            out.push_str(&segment);
            out.push('\n');
        }
    }
    out
}

/// Write the rendered set to `path` atomically: the text goes to a `.tmp`
/// sibling first and is renamed over the target, so a reader never sees a
/// torn file.
pub fn write_file(set: &SteeringSet, path: impl AsRef<Path>) -> SteeringResult<()> {
    let path = path.as_ref();
    let text = render(set);
    let tmp = match path.file_name() {
        Some(name) => {
            let mut tmp_name = name.to_os_string();
            tmp_name.push(".tmp");
            path.with_file_name(tmp_name)
        }
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a file path: {}", path.display()),
            )
            .into());
        }
    };
    fs::write(&tmp, &text)?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    Ok(())
}

pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::Scalar(scalar) => render_scalar(scalar),
        Value::List(items) => match items.len() {
            // a trailing delimiter keeps short lists recognizable as lists
            0 => ";".to_string(),
            1 => format!("{};", render_scalar(&items[0])),
            _ => items
                .iter()
                .map(render_scalar)
                .collect::<Vec<_>>()
                .join(";"),
        },
    }
}

fn render_scalar(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Int(v) => v.to_string(),
        // Debug form always keeps a '.' or exponent, so the value re-types
        // as a real on the way back in
        Scalar::Real(v) => format!("{v:?}"),
        Scalar::Bool(true) => "YES".to_string(),
        Scalar::Bool(false) => "NO".to_string(),
        Scalar::Str(v) => format!("'{}'", v.replace('\'', "''")),
    }
}

fn is_path_like(value: &Value) -> bool {
    match value {
        Value::Scalar(Scalar::Str(s)) => {
            (s.contains('/') || s.contains('\\')) && !s.chars().any(char::is_whitespace)
        }
        _ => false,
    }
}

fn fits(line: &str) -> bool {
    let len = line.chars().count();
    len < LINE_WIDTH || (len == LINE_WIDTH && !line.ends_with(';'))
}

fn wrap_logical(name: &str, value: &Value) -> Vec<String> {
    let line = format!("{name} = {}", render_value(value));
    if fits(&line) {
        return vec![line];
    }
    if is_path_like(value) {
        tracing::warn!(key = %name, "path value exceeds the 72-column line width and cannot be split");
        return vec![line];
    }
    match split_long(&line) {
        Some(segments) => segments,
        None => {
            tracing::warn!(key = %name, "steering line has no safe split point within 72 columns");
            vec![line]
        }
    }
}

/// Split one over-long logical line into physical segments. Returns `None`
/// when no safe break point exists.
fn split_long(line: &str) -> Option<Vec<String>> {
    let chars: Vec<char> = line.chars().collect();

    // break candidates: after a top-level ';', or after a space inside a
    // quoted string (the "KEY = " spaces are outside quotes and never match)
    let mut candidates: Vec<(usize, bool)> = Vec::new();
    let mut in_quote: Option<char> = None;
    for (i, &c) in chars.iter().enumerate() {
        match in_quote {
            Some(q) => {
                if c == q {
                    in_quote = None;
                } else if c == ' ' {
                    candidates.push((i + 1, false));
                }
            }
            None => {
                if c == '\'' || c == '"' {
                    in_quote = Some(c);
                } else if c == ';' {
                    candidates.push((i + 1, true));
                }
            }
        }
    }

    let mut segments = Vec::new();
    let mut start = 0;
    loop {
        let rest = &chars[start..];
        if rest.len() < LINE_WIDTH || (rest.len() == LINE_WIDTH && rest.last() != Some(&';')) {
            segments.push(rest.iter().collect());
            break;
        }
        let mut chosen: Option<(usize, bool)> = None;
        for &(pos, is_delim) in &candidates {
            if pos <= start || pos >= chars.len() {
                continue;
            }
            if pos - start > LINE_WIDTH {
                break;
            }
            chosen = Some((pos, is_delim));
        }
        let (mut pos, is_delim) = chosen?;
        if !is_delim && chars[pos] == '/' {
            // keep the space on the continuation line instead
            pos -= 1;
            if pos == start {
                return None;
            }
        }
        let mut segment: String = chars[start..pos].iter().collect();
        if is_delim {
            while segment.chars().count() < LINE_WIDTH {
                segment.push(' ');
            }
        }
        segments.push(segment);
        start = pos;
    }
    Some(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_str;
    use crate::source::SteeringSource;
    use crate::value::RawValue;

    fn from_pairs(pairs: Vec<(&str, RawValue)>) -> SteeringSet {
        let pairs = pairs
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        SteeringSet::from_source(SteeringSource::Pairs(pairs), None).unwrap()
    }

    #[test]
    fn renders_one_line_per_parameter() {
        let set = from_pairs(vec![
            ("DURATION", 25200.into()),
            ("TIME STEP", 60.into()),
            ("RAIN OR EVAPORATION", "YES".into()),
        ]);
        // the string value keeps its quotes so it does not come back a bool
        assert_eq!(
            render(&set),
            "DURATION = 25200\nTIME STEP = 60\nRAIN OR EVAPORATION = 'YES'\n"
        );
    }

    #[test]
    fn list_elements_join_without_spaces() {
        let set = from_pairs(vec![(
            "ABSCISSAE OF SOURCES",
            RawValue::List(vec![10.into(), 20.into(), 30.into()]),
        )]);
        assert_eq!(render(&set), "ABSCISSAE OF SOURCES = 10;20;30\n");
    }

    #[test]
    fn single_element_list_keeps_a_delimiter() {
        let set = from_pairs(vec![(
            "SOURCE REGIONS",
            RawValue::List(vec![4.into()]),
        )]);
        let text = render(&set);
        assert_eq!(text, "SOURCE REGIONS = 4;\n");
        assert_eq!(parse_str(&text).unwrap(), set);
    }

    #[test]
    fn long_list_wraps_at_delimiters() {
        let values: Vec<RawValue> = (0..30i64).map(|i| RawValue::from(1000 + i)).collect();
        let set = from_pairs(vec![("PRESCRIBED ELEVATIONS", RawValue::List(values))]);
        let text = render(&set);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(line.chars().count() <= LINE_WIDTH);
            assert!(!line.starts_with('/'));
        }
        assert_eq!(parse_str(&text).unwrap(), set);
    }

    #[test]
    fn long_title_wraps_inside_the_quotes() {
        let title = "TIDAL FLAT SIMULATION OF THE GIRONDE ESTUARY WITH WIND \
                     AND RAIN FORCING APPLIED";
        let set = from_pairs(vec![("TITLE", title.into())]);
        let text = render(&set);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(!line.starts_with('/'));
        }
        assert_eq!(parse_str(&text).unwrap(), set);
    }

    #[test]
    fn long_path_is_never_split() {
        let path = "projects/gironde/simulations/2024/tidal_flats/geo_gironde_v2.slf";
        let set = from_pairs(vec![("GEOMETRY FILE", path.into())]);
        let text = render(&set);
        assert_eq!(text.lines().count(), 1);
        assert_eq!(parse_str(&text).unwrap(), set);
    }

    #[test]
    fn reals_keep_their_type() {
        let set = from_pairs(vec![("TIME STEP", 60.0.into())]);
        let text = render(&set);
        assert_eq!(text, "TIME STEP = 60.0\n");
        assert_eq!(parse_str(&text).unwrap().get_real("TIME STEP"), Some(60.0));
    }

    #[test]
    fn empty_list_round_trips() {
        let set = from_pairs(vec![("SOURCES", RawValue::List(vec![]))]);
        let text = render(&set);
        assert_eq!(parse_str(&text).unwrap(), set);
    }
}
