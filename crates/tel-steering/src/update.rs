//! Copy-on-write merge/update API.

use crate::set::SteeringSet;
use crate::value::Value;

/// One change to apply to a set.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Insert the value, replacing an existing key in place or appending a
    /// new key at the end.
    Set(Value),
    /// Delete the key when present; an absent key is not an error.
    Remove,
}

/// An ordered batch of updates.
#[derive(Debug, Clone, Default)]
pub struct UpdateSet {
    items: Vec<(String, Update)>,
}

impl UpdateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.items.push((name.into(), Update::Set(value.into())));
        self
    }

    pub fn remove(mut self, name: impl Into<String>) -> Self {
        self.items.push((name.into(), Update::Remove));
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Apply every update to a copy of `set`, leaving `set` untouched.
    /// Keys not named here keep their value and position.
    pub fn apply(&self, set: &SteeringSet) -> SteeringSet {
        let mut out = set.clone();
        for (name, update) in &self.items {
            match update {
                Update::Set(value) => out.insert(name.clone(), value.clone()),
                Update::Remove => out.remove(name),
            }
        }
        out
    }
}

impl FromIterator<(String, Update)> for UpdateSet {
    fn from_iter<I: IntoIterator<Item = (String, Update)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl SteeringSet {
    /// Convenience for [`UpdateSet::apply`].
    pub fn merged(&self, updates: &UpdateSet) -> SteeringSet {
        updates.apply(self)
    }
}
