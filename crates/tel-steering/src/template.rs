//! Built-in baseline steering template.

use std::sync::LazyLock;

use crate::parse::parse_str;
use crate::set::SteeringSet;

const TEMPLATE_CAS: &str = include_str!("default.cas");

// Parsed once, never mutated; callers always get their own copy.
static TEMPLATE: LazyLock<SteeringSet> =
    LazyLock::new(|| parse_str(TEMPLATE_CAS).expect("embedded steering template is valid"));

/// Baseline parameter set for a new steering file.
///
/// Deterministic, side-effect free, and detached: the result has no source
/// file until the caller attaches one.
pub fn generate_template() -> SteeringSet {
    TEMPLATE.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;

    #[test]
    fn template_is_populated_and_detached() {
        let template = generate_template();
        assert!(!template.is_empty());
        assert!(template.source_file().is_none());
        assert_eq!(template.get_real("DURATION"), Some(3600.0));
        assert!(template.contains_key("BOUNDARY CONDITIONS FILE"));
    }

    #[test]
    fn template_round_trips() {
        let template = generate_template();
        assert_eq!(parse_str(&render(&template)).unwrap(), template);
    }
}
