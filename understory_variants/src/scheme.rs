// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable scheme trees.
//!
//! A [`Scheme`] is one level of conditional class rules: an optional base
//! value, an optional fallback value, and an ordered list of [`Condition`]s.
//! Condition values may nest further schemes.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::key::{BASE_KEY, ConditionKind, FALLBACK_KEY};
use crate::value::ClassValue;

/// A shared, immutable level of conditional class rules.
///
/// Schemes are built once with [`SchemeBuilder`] and resolved any number of
/// times. Cloning only bumps a reference count, and a scheme can be shared
/// across threads.
///
/// # Example
///
/// ```rust
/// use understory_variants::{SchemeBuilder, VariantMapBuilder};
///
/// let button = SchemeBuilder::new()
///     .base("px-4")
///     .condition(
///         "variant",
///         VariantMapBuilder::new()
///             .arm("primary", "bg-blue")
///             .arm("secondary", "bg-gray")
///             .build(),
///     )
///     .condition("isDisabled", "opacity-50")
///     .build();
///
/// assert_eq!(button.len(), 2);
/// let keys: Vec<_> = button.conditions().map(|c| c.key()).collect();
/// assert_eq!(keys, ["variant", "isDisabled"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Scheme {
    inner: Arc<SchemeData>,
}

#[derive(Debug, Default)]
struct SchemeData {
    base: ClassValue,
    fallback: ClassValue,
    /// Declaration order; later conditions emit later fragments.
    conditions: Vec<Condition>,
}

impl Scheme {
    /// Returns the unconditional base value of this level.
    #[must_use]
    #[inline]
    pub fn base(&self) -> &ClassValue {
        &self.inner.base
    }

    /// Returns the fallback value, used when no flag of this level matched.
    #[must_use]
    #[inline]
    pub fn fallback(&self) -> &ClassValue {
        &self.inner.fallback
    }

    /// Returns the conditions of this level in declaration order.
    pub fn conditions(&self) -> impl ExactSizeIterator<Item = &Condition> + '_ {
        self.inner.conditions.iter()
    }

    /// Returns the number of conditions at this level.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.conditions.len()
    }

    /// Returns `true` if this level has no conditions, base, or fallback.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.conditions.is_empty() && self.base().is_empty() && self.fallback().is_empty()
    }

    /// Returns the value of the condition declared under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConditionValue> {
        self.inner
            .conditions
            .iter()
            .find(|c| &*c.key == key)
            .map(|c| &c.value)
    }

    /// Returns `true` if this level declares a condition under `key`.
    #[must_use]
    pub fn declares(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// A single condition entry of a [`Scheme`] level.
#[derive(Clone, Debug)]
pub struct Condition {
    key: Box<str>,
    kind: ConditionKind,
    value: ConditionValue,
}

impl Condition {
    /// Returns the condition key, which is also the property name it reads.
    #[must_use]
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the kind the key was classified as.
    #[must_use]
    #[inline]
    pub fn kind(&self) -> ConditionKind {
        self.kind
    }

    /// Returns the condition's value.
    #[must_use]
    #[inline]
    pub fn value(&self) -> &ConditionValue {
        &self.value
    }
}

/// The value of a condition entry.
#[derive(Clone, Debug)]
pub enum ConditionValue {
    /// A class value, emitted as a whole.
    Class(ClassValue),
    /// Variant arms selected by a string property.
    Variants(VariantMap),
}

impl From<ClassValue> for ConditionValue {
    fn from(value: ClassValue) -> Self {
        Self::Class(value)
    }
}

impl From<VariantMap> for ConditionValue {
    fn from(value: VariantMap) -> Self {
        Self::Variants(value)
    }
}

impl From<Scheme> for ConditionValue {
    fn from(value: Scheme) -> Self {
        Self::Class(ClassValue::Nested(value))
    }
}

impl From<&str> for ConditionValue {
    fn from(value: &str) -> Self {
        Self::Class(value.into())
    }
}

impl From<String> for ConditionValue {
    fn from(value: String) -> Self {
        Self::Class(value.into())
    }
}

impl From<Vec<&str>> for ConditionValue {
    fn from(value: Vec<&str>) -> Self {
        Self::Class(value.into())
    }
}

impl<const N: usize> From<[&str; N]> for ConditionValue {
    fn from(value: [&str; N]) -> Self {
        Self::Class(value.into())
    }
}

/// Variant arms of a variant condition, plus the map's own fallback.
///
/// The fallback is used when the property is absent or names no arm.
#[derive(Clone, Debug, Default)]
pub struct VariantMap {
    /// Declaration order.
    arms: Vec<(Box<str>, ClassValue)>,
    fallback: ClassValue,
}

impl VariantMap {
    /// Returns the value of the arm named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ClassValue> {
        self.arms
            .iter()
            .find(|(arm, _)| &**arm == name)
            .map(|(_, value)| value)
    }

    /// Returns the fallback value of this map.
    #[must_use]
    #[inline]
    pub fn fallback(&self) -> &ClassValue {
        &self.fallback
    }

    /// Returns the arms in declaration order.
    pub fn arms(&self) -> impl ExactSizeIterator<Item = (&str, &ClassValue)> + '_ {
        self.arms.iter().map(|(name, value)| (&**name, value))
    }

    /// Reinterprets the map as a nested scheme level.
    ///
    /// The fallback becomes the level's fallback, an arm named [`BASE_KEY`]
    /// becomes the level's base, and every other arm becomes a condition
    /// classified by its name.
    #[must_use]
    pub fn into_scheme(self) -> Scheme {
        let mut base = ClassValue::Empty;
        let mut conditions = Vec::with_capacity(self.arms.len());
        for (key, value) in self.arms {
            if &*key == BASE_KEY {
                base = value;
                continue;
            }
            conditions.push(Condition {
                kind: ConditionKind::of(&key),
                key,
                value: ConditionValue::Class(value),
            });
        }
        Scheme {
            inner: Arc::new(SchemeData {
                base,
                fallback: self.fallback,
                conditions,
            }),
        }
    }
}

/// Builder for constructing [`Scheme`] instances.
#[derive(Debug, Default)]
pub struct SchemeBuilder {
    data: SchemeData,
}

impl SchemeBuilder {
    /// Creates a new empty scheme builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the unconditional base value.
    #[must_use]
    pub fn base(mut self, value: impl Into<ClassValue>) -> Self {
        self.data.base = value.into();
        self
    }

    /// Sets the fallback value, used when no flag of this level matches.
    #[must_use]
    pub fn fallback(mut self, value: impl Into<ClassValue>) -> Self {
        self.data.fallback = value.into();
        self
    }

    /// Adds a condition.
    ///
    /// The key is classified by [`ConditionKind::of`]. A [`VariantMap`]
    /// given to a flag key is converted with [`VariantMap::into_scheme`].
    ///
    /// Under a variant key only a [`VariantMap`] selects by the property's
    /// value. Any other value, including a nested [`Scheme`], is emitted
    /// whatever the property holds.
    ///
    /// If the key was already declared, its value is replaced and it keeps
    /// its original position.
    #[must_use]
    pub fn condition(mut self, key: impl Into<Box<str>>, value: impl Into<ConditionValue>) -> Self {
        let key = key.into();
        let kind = ConditionKind::of(&key);
        let value = match (kind, value.into()) {
            (ConditionKind::Flag, ConditionValue::Variants(map)) => {
                ConditionValue::Class(ClassValue::Nested(map.into_scheme()))
            }
            (_, value) => value,
        };

        match self.data.conditions.iter_mut().find(|c| c.key == key) {
            Some(existing) => existing.value = value,
            None => self.data.conditions.push(Condition { key, kind, value }),
        }
        self
    }

    /// Builds the scheme.
    #[must_use]
    pub fn build(self) -> Scheme {
        Scheme {
            inner: Arc::new(self.data),
        }
    }
}

/// Builder for constructing [`VariantMap`] instances.
#[derive(Debug, Default)]
pub struct VariantMapBuilder {
    map: VariantMap,
}

impl VariantMapBuilder {
    /// Creates a new empty variant map builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an arm selected when the property equals `name`.
    ///
    /// An arm named [`FALLBACK_KEY`] sets the fallback instead. Re-adding a
    /// name replaces its value in place.
    #[must_use]
    pub fn arm(mut self, name: impl Into<Box<str>>, value: impl Into<ClassValue>) -> Self {
        let name = name.into();
        let value = value.into();
        if &*name == FALLBACK_KEY {
            self.map.fallback = value;
            return self;
        }
        match self.map.arms.iter_mut().find(|(arm, _)| *arm == name) {
            Some((_, existing)) => *existing = value,
            None => self.map.arms.push((name, value)),
        }
        self
    }

    /// Sets the value used when the property names no arm.
    #[must_use]
    pub fn fallback(mut self, value: impl Into<ClassValue>) -> Self {
        self.map.fallback = value.into();
        self
    }

    /// Builds the variant map.
    #[must_use]
    pub fn build(self) -> VariantMap {
        self.map
    }
}
