//! Flattened event model.
//!
//! An [`Event`] is one tag occurrence in document order: an open marker, a
//! close marker, or a leaf. After flattening, ordering is the only structural
//! signal left; there are no parent pointers.

use crate::colour::Colour;

/// A single named (or positional) property on an event.
///
/// A `None` value is the in-memory form of the grammar's `*` sentinel: the
/// property's presence is recorded but it carried no value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub value: Option<String>,
}

/// An ordered list of properties.
///
/// Order matters: the grammar serializes properties positionally, and
/// unnamed properties are keyed by their ordinal index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Properties(Vec<Property>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a property's value by name. Returns `None` both when the property
    /// is absent and when it is present without a value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.value.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|p| p.name == name)
    }

    /// Set a property, replacing any existing property of that name.
    pub fn set(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        if let Some(p) = self.0.iter_mut().find(|p| p.name == name) {
            p.value = value;
        } else {
            self.0.push(Property { name, value });
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.0.retain(|p| p.name != name);
    }

    /// Append a positional property, keyed by its ordinal index.
    pub fn push_positional(&mut self, value: impl Into<String>) {
        let name = self.0.len().to_string();
        self.0.push(Property {
            name,
            value: Some(value.into()),
        });
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Option<String>)> for Properties {
    fn from_iter<T: IntoIterator<Item = (String, Option<String>)>>(iter: T) -> Self {
        let mut props = Properties::new();
        for (name, value) in iter {
            props.set(name, value);
        }
        props
    }
}

/// One flattened tag occurrence.
///
/// A container tag with children produces exactly two events, one with
/// `start_tag` set and one with `end_tag` set, bracketing its descendants.
/// A leaf produces a single event with neither marker. A close event carries
/// no properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Event {
    /// Compact tag code (e.g. "p" for path).
    pub tag: String,
    /// Derived fill colour, present only on colour-bearing tags.
    pub colour: Option<Colour>,
    pub properties: Properties,
    pub start_tag: bool,
    pub end_tag: bool,
}

impl Event {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// A close marker for the given code.
    pub fn close(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            end_tag: true,
            ..Self::default()
        }
    }
}

/// Splice events into an existing sequence: either right after the opening
/// root event, or just before the final (closing) event. Useful for
/// composing a document out of separately built fragments.
pub fn insert_events(events: &mut Vec<Event>, inserted: Vec<Event>, below_first: bool) {
    let at = if below_first {
        events.len().min(1)
    } else {
        events.len().saturating_sub(1)
    };
    events.splice(at..at, inserted);
}
