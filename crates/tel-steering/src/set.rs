//! Ordered steering parameter set.

use std::ops::Range;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::keys;
use crate::value::{Scalar, Value};
use crate::{SteeringError, SteeringResult};

/// An ordered `NAME = VALUE` mapping mirroring one steering file.
///
/// Keys are unique (last write wins) and keep their insertion order, which
/// reflects the file layout. The set behaves as an immutable value: every
/// update API returns a new set and leaves the receiver untouched.
#[derive(Debug, Clone, Serialize)]
pub struct SteeringSet {
    entries: IndexMap<String, Value>,
    /// Where the set was read from, or is destined to be written.
    /// Metadata only; never consulted by the parser or writer.
    #[serde(skip_serializing_if = "Option::is_none")]
    source_file: Option<PathBuf>,
}

impl SteeringSet {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            source_file: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn source_file(&self) -> Option<&Path> {
        self.source_file.as_deref()
    }

    /// Replace the source-file attribute, consuming the set.
    pub fn with_source_file(mut self, source: Option<PathBuf>) -> Self {
        self.source_file = source;
        self
    }

    /// Insert or replace. An existing key keeps its position; a new key
    /// appends at the end.
    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.entries.insert(name.into(), value);
    }

    /// Remove a key, shifting later entries up so order is preserved.
    /// Removing an absent key is a no-op.
    pub(crate) fn remove(&mut self, name: &str) {
        self.entries.shift_remove(name);
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            Value::Scalar(Scalar::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Real-valued lookup; integer values coerce.
    pub fn get_real(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            Value::Scalar(Scalar::Real(v)) => Some(*v),
            Value::Scalar(Scalar::Int(v)) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            Value::Scalar(Scalar::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Value::Scalar(Scalar::Str(v)) => Some(v),
            _ => None,
        }
    }

    pub fn get_list(&self, name: &str) -> Option<&[Scalar]> {
        self.get(name)?.as_list()
    }

    /// Key name at a position, in insertion order.
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.entries.get_index(index).map(|(name, _)| name.as_str())
    }

    /// Entry at a position, in insertion order.
    pub fn get_index(&self, index: usize) -> Option<(&str, &Value)> {
        self.entries
            .get_index(index)
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Position of a key, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.get_index_of(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Positional slice, clamped at the ends like ordinary collection
    /// slicing. The result keeps the set type and its source file.
    pub fn slice(&self, range: Range<usize>) -> SteeringSet {
        let start = range.start.min(self.entries.len());
        let end = range.end.min(self.entries.len()).max(start);
        let entries = self
            .entries
            .iter()
            .skip(start)
            .take(end - start)
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        SteeringSet {
            entries,
            source_file: self.source_file.clone(),
        }
    }

    /// Subset by key names, keeping the keys' relative order in this set
    /// and the source file. All missing names are reported together.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> SteeringResult<SteeringSet> {
        let missing: Vec<String> = names
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| !self.entries.contains_key(*name))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(SteeringError::UnknownKeys { keys: missing });
        }
        let wanted: Vec<&str> = names.iter().map(|name| name.as_ref()).collect();
        let entries = self
            .entries
            .iter()
            .filter(|(name, _)| wanted.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Ok(SteeringSet {
            entries,
            source_file: self.source_file.clone(),
        })
    }

    /// Copy with `BOUNDARY CONDITIONS FILE` pointing at the path supplied
    /// by the boundary-condition collaborator.
    pub fn with_boundary_conditions_file(&self, path: impl AsRef<Path>) -> SteeringSet {
        let mut out = self.clone();
        out.insert(
            keys::BOUNDARY_CONDITIONS_FILE,
            Value::from(path.as_ref().to_string_lossy().as_ref()),
        );
        out
    }

    /// Cross-check `NAMES OF PRIVATE VARIABLES` against the variable names
    /// the geometry actually carries. Returns the declared names that are
    /// absent from the geometry; never fails.
    pub fn missing_private_variables(&self, geometry_vars: &[&str]) -> Vec<String> {
        let declared: Vec<String> = match self.get(keys::NAMES_OF_PRIVATE_VARIABLES) {
            Some(Value::Scalar(Scalar::Str(name))) => vec![name.clone()],
            Some(Value::List(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Scalar::Str(name) => Some(name.clone()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        let missing: Vec<String> = declared
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .filter(|name| {
                !geometry_vars
                    .iter()
                    .any(|var| var.trim().eq_ignore_ascii_case(name))
            })
            .collect();
        for name in &missing {
            tracing::warn!(variable = %name, "private variable not present in geometry");
        }
        missing
    }
}

impl Default for SteeringSet {
    fn default() -> Self {
        Self::new()
    }
}

// Order-sensitive, unlike IndexMap's map equality.
impl PartialEq for SteeringSet {
    fn eq(&self, other: &Self) -> bool {
        self.source_file == other.source_file
            && self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|(a, b)| a == b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SteeringSet {
        let mut set = SteeringSet::new();
        set.insert("A", Value::from(1));
        set.insert("B", Value::from(2));
        set.insert("C", Value::from(3));
        set
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut set = sample();
        set.insert("B", Value::from(20));
        assert_eq!(set.position("B"), Some(1));
        assert_eq!(set.get_int("B"), Some(20));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn equality_is_order_sensitive() {
        let mut reordered = SteeringSet::new();
        reordered.insert("B", Value::from(2));
        reordered.insert("A", Value::from(1));
        reordered.insert("C", Value::from(3));
        assert_ne!(sample(), reordered);
    }

    #[test]
    fn slice_clamps_like_collection_slicing() {
        let set = sample().with_source_file(Some("x.cas".into()));
        let tail = set.slice(1..99);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail.name_at(0), Some("B"));
        assert_eq!(tail.source_file(), Some(Path::new("x.cas")));
        assert!(set.slice(5..9).is_empty());
    }

    #[test]
    fn select_reports_all_missing_keys() {
        let err = sample().select(&["A", "X", "Y"]).unwrap_err();
        match err {
            SteeringError::UnknownKeys { keys } => assert_eq!(keys, vec!["X", "Y"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn boundary_conditions_file_is_filled_in() {
        let set = sample().with_boundary_conditions_file("bc/gironde.cli");
        assert_eq!(
            set.get_str(keys::BOUNDARY_CONDITIONS_FILE),
            Some("bc/gironde.cli")
        );
        assert_eq!(sample().len() + 1, set.len());
    }

    #[test]
    fn missing_private_variables_compares_case_insensitively() {
        let mut set = SteeringSet::new();
        set.insert(
            keys::NAMES_OF_PRIVATE_VARIABLES,
            Value::List(vec![
                Scalar::Str("BED SHEAR".into()),
                Scalar::Str("SCOUR".into()),
            ]),
        );
        let missing = set.missing_private_variables(&["bed shear", "VELOCITY"]);
        assert_eq!(missing, vec!["SCOUR"]);
    }
}
