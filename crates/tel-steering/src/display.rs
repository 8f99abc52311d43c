//! Steering set previews.

use std::fmt;

use crate::render::render_value;
use crate::set::SteeringSet;

/// Preview up to `n` parameters plus a remainder count and the source
/// file. `n <= 0` gives only the one-line summary.
pub fn preview(set: &SteeringSet, n: isize) -> String {
    let total = set.len();
    if n <= 0 {
        let mut line = format!("{total} parameters");
        if let Some(path) = set.source_file() {
            line.push_str(&format!(" (source file: {})", path.display()));
        }
        return line;
    }
    let shown = (n as usize).min(total);
    let mut out = String::new();
    for (name, value) in set.iter().take(shown) {
        out.push_str(&format!("{name} = {}\n", render_value(value)));
    }
    if total > shown {
        out.push_str(&format!("... {} more parameters\n", total - shown));
    }
    if let Some(path) = set.source_file() {
        out.push_str(&format!("source file: {}\n", path.display()));
    }
    out
}

impl fmt::Display for SteeringSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&preview(self, 10))
    }
}
