//! Single construction entry point over the four input shapes.

use std::path::PathBuf;

use crate::parse::parse_file;
use crate::set::SteeringSet;
use crate::template::generate_template;
use crate::update::UpdateSet;
use crate::value::{RawValue, Value};
use crate::{SteeringError, SteeringResult};

/// Where a steering set comes from. One handler per variant; no shape
/// guessing on untyped input.
#[derive(Debug, Clone)]
pub enum SteeringSource {
    /// The built-in baseline template.
    Template,
    /// Parse the steering file at this path.
    File(PathBuf),
    /// Wrap a key/value collection directly.
    Pairs(Vec<(String, RawValue)>),
    /// Start from an existing set ("save-as" or merge base).
    Existing(SteeringSet),
}

impl SteeringSet {
    /// Build a set from any supported input shape. When `target` is given
    /// it becomes the set's source file without touching the filesystem:
    /// the attribute tracks the destination, not the origin.
    pub fn from_source(
        source: SteeringSource,
        target: Option<PathBuf>,
    ) -> SteeringResult<SteeringSet> {
        Self::from_source_with_updates(source, target, None)
    }

    /// [`SteeringSet::from_source`] plus an optional update batch applied
    /// to the freshly built set.
    pub fn from_source_with_updates(
        source: SteeringSource,
        target: Option<PathBuf>,
        updates: Option<&UpdateSet>,
    ) -> SteeringResult<SteeringSet> {
        let set = match source {
            SteeringSource::Template => generate_template().with_source_file(target),
            SteeringSource::File(path) => {
                let set = parse_file(&path)?;
                match target {
                    Some(target) => set.with_source_file(Some(target)),
                    None => set,
                }
            }
            SteeringSource::Pairs(pairs) => {
                let mut set = SteeringSet::new();
                for (name, raw) in &pairs {
                    let name = name.trim();
                    if name.is_empty() {
                        return Err(SteeringError::BlankKey);
                    }
                    set.insert(name, Value::from_raw(name, raw)?);
                }
                set.with_source_file(target)
            }
            SteeringSource::Existing(set) => match target {
                Some(target) => set.with_source_file(Some(target)),
                None => set,
            },
        };
        Ok(match updates {
            Some(updates) => updates.apply(&set),
            None => set,
        })
    }
}
