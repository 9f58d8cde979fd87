// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property bags.
//!
//! This module provides [`Props`], the flat set of property values a scheme
//! is resolved against.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use hashbrown::HashMap;

use crate::key::PASSTHROUGH_KEYS;

/// A single property value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum PropValue {
    /// A boolean, read by flag conditions.
    Bool(bool),
    /// A string, read by variant conditions.
    Str(Box<str>),
}

impl PropValue {
    /// Returns `true` if the value counts as set for a flag condition.
    ///
    /// `Bool(b)` is `b`; a string is truthy unless it is empty.
    #[must_use]
    #[inline]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Str(s) => !s.is_empty(),
        }
    }

    /// Returns the string, if this is a [`PropValue::Str`].
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Bool(_) => None,
            Self::Str(s) => Some(s),
        }
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Str(value.into_boxed_str())
    }
}

/// A flat, read-only bag of property values.
///
/// The two passthrough names, `class` and `className`, are not conditions:
/// string values stored under them are kept aside as extra classes that the
/// [`ClassVariants`](crate::ClassVariants) wrapper appends after
/// reconciliation.
///
/// # Example
///
/// ```rust
/// use understory_variants::Props;
///
/// let props = Props::new()
///     .with("variant", "primary")
///     .with("isDisabled", true)
///     .with("className", "mt-2");
///
/// assert_eq!(props.len(), 2);
/// assert!(props.is_truthy("isDisabled"));
/// assert_eq!(props.get("variant").and_then(|v| v.as_str()), Some("primary"));
/// assert_eq!(props.class_name(), Some("mt-2"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Props {
    values: HashMap<Box<str>, PropValue>,
    /// One slot per entry of `PASSTHROUGH_KEYS`.
    passthrough: [Option<Box<str>>; 2],
}

impl Props {
    /// Creates an empty property bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, replacing any previous value.
    ///
    /// A string set under a passthrough name is stored as extra classes;
    /// a boolean set under one clears it.
    pub fn set(&mut self, key: impl Into<Box<str>>, value: impl Into<PropValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = PASSTHROUGH_KEYS.iter().position(|k| **k == *key) {
            self.passthrough[slot] = match value {
                PropValue::Str(s) => Some(s),
                PropValue::Bool(_) => None,
            };
            return;
        }
        self.values.insert(key, value);
    }

    /// Sets a property and returns the bag, for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<Box<str>>, value: impl Into<PropValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Removes a property, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.values.remove(key)
    }

    /// Gets the value of a property, if set.
    #[must_use]
    #[inline]
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.values.get(key)
    }

    /// Returns `true` if the property is set and truthy.
    #[must_use]
    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(PropValue::is_truthy)
    }

    /// Returns the number of condition properties (passthrough excluded).
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no condition properties are set.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns an iterator over the condition properties, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> + '_ {
        self.values.iter().map(|(k, v)| (&**k, v))
    }

    /// Extra classes supplied under `class`.
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        self.passthrough[0].as_deref()
    }

    /// Extra classes supplied under `className`.
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        self.passthrough[1].as_deref()
    }
}

impl<K, V> FromIterator<(K, V)> for Props
where
    K: Into<Box<str>>,
    V: Into<PropValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (key, value) in iter {
            props.set(key, value);
        }
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness() {
        assert!(PropValue::Bool(true).is_truthy());
        assert!(!PropValue::Bool(false).is_truthy());
        assert!(PropValue::from("x").is_truthy());
        assert!(!PropValue::from("").is_truthy());
    }

    #[test]
    fn missing_property_is_falsy() {
        let props = Props::new();
        assert!(props.get("isDisabled").is_none());
        assert!(!props.is_truthy("isDisabled"));
    }

    #[test]
    fn set_replaces_value() {
        let mut props = Props::new();
        props.set("size", "sm");
        props.set("size", "lg");
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("size"), Some(&PropValue::from("lg")));
        assert_eq!(props.remove("size"), Some(PropValue::from("lg")));
        assert!(props.is_empty());
    }

    #[test]
    fn passthrough_keys_are_kept_aside() {
        let props: Props = [("class", "a"), ("variant", "primary")].into_iter().collect();
        assert_eq!(props.len(), 1);
        assert_eq!(props.class(), Some("a"));
        assert_eq!(props.class_name(), None);
        assert!(props.get("class").is_none());

        let cleared = props.with("class", false);
        assert_eq!(cleared.class(), None);
    }

    #[test]
    fn debug_is_compact() {
        assert_eq!(alloc::format!("{:?}", PropValue::from("a")), "\"a\"");
        assert_eq!(alloc::format!("{:?}", PropValue::Bool(true)), "true");
    }
}
