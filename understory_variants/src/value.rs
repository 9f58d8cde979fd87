// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class values stored in schemes and the fragments produced from them.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::slice;

use smallvec::SmallVec;

use crate::scheme::Scheme;

/// Inline capacity of [`Fragments`] before spilling to the heap.
const INLINE_FRAGMENTS: usize = 8;

/// A class value held by a scheme entry.
///
/// A class value is either nothing, a literal class string, an ordered
/// sequence of class strings, or a nested [`Scheme`] that is resolved against
/// the same property bag.
#[derive(Clone, Debug, Default)]
pub enum ClassValue {
    /// No classes. Tolerated everywhere, contributes nothing.
    #[default]
    Empty,
    /// A literal class string, possibly holding several space-separated tokens.
    Literal(Box<str>),
    /// An ordered sequence of class strings.
    Sequence(Box<[Box<str>]>),
    /// A nested scheme level.
    Nested(Scheme),
}

impl ClassValue {
    /// Returns `true` if this is [`ClassValue::Empty`].
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the nested scheme, if this value is one.
    #[must_use]
    pub fn as_scheme(&self) -> Option<&Scheme> {
        match self {
            Self::Nested(scheme) => Some(scheme),
            _ => None,
        }
    }
}

impl From<&str> for ClassValue {
    fn from(value: &str) -> Self {
        Self::Literal(value.into())
    }
}

impl From<String> for ClassValue {
    fn from(value: String) -> Self {
        Self::Literal(value.into_boxed_str())
    }
}

impl From<Vec<&str>> for ClassValue {
    fn from(value: Vec<&str>) -> Self {
        Self::Sequence(value.into_iter().map(Box::from).collect())
    }
}

impl From<Vec<String>> for ClassValue {
    fn from(value: Vec<String>) -> Self {
        Self::Sequence(value.into_iter().map(String::into_boxed_str).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ClassValue {
    fn from(value: [&str; N]) -> Self {
        Self::Sequence(value.into_iter().map(Box::from).collect())
    }
}

impl From<Scheme> for ClassValue {
    fn from(value: Scheme) -> Self {
        Self::Nested(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for ClassValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// One unit of resolver output, borrowed from the scheme.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fragment<'s> {
    /// A literal class string.
    Literal(&'s str),
    /// An ordered sequence of class strings.
    Sequence(&'s [Box<str>]),
}

impl<'s> Fragment<'s> {
    /// Returns the non-empty, whitespace-separated tokens of this fragment.
    ///
    /// ```rust
    /// use understory_variants::Fragment;
    ///
    /// let tokens: Vec<_> = Fragment::Literal("  px-4 py-2 ").tokens().collect();
    /// assert_eq!(tokens, ["px-4", "py-2"]);
    /// ```
    pub fn tokens(self) -> impl Iterator<Item = &'s str> {
        let (head, parts): (Option<&'s str>, &'s [Box<str>]) = match self {
            Self::Literal(s) => (Some(s), &[]),
            Self::Sequence(parts) => (None, parts),
        };
        head.into_iter()
            .chain(parts.iter().map(|part| &**part))
            .flat_map(str::split_whitespace)
    }
}

/// The ordered output of a resolution.
///
/// Later fragments are meant to take precedence over earlier ones when a
/// reconciler resolves textual conflicts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fragments<'s> {
    items: SmallVec<[Fragment<'s>; INLINE_FRAGMENTS]>,
}

impl<'s> Fragments<'s> {
    /// Creates an empty fragment list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of fragments.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no fragments.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the fragments as a slice.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[Fragment<'s>] {
        &self.items
    }

    /// Returns an iterator over the fragments in order.
    pub fn iter(&self) -> slice::Iter<'_, Fragment<'s>> {
        self.items.iter()
    }

    /// Returns every token of every fragment, in order.
    pub fn tokens(&self) -> impl Iterator<Item = &'s str> + '_ {
        self.items.iter().flat_map(|fragment| fragment.tokens())
    }

    /// Appends the fragments of `other` after these.
    pub fn extend(&mut self, other: Self) {
        self.items.extend(other.items);
    }

    /// Converts into a plain vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<Fragment<'s>> {
        self.items.into_vec()
    }

    pub(crate) fn push(&mut self, fragment: Fragment<'s>) {
        self.items.push(fragment);
    }

    /// Moves everything from `start` onwards out into a new list.
    pub(crate) fn split_off(&mut self, start: usize) -> Self {
        let tail: SmallVec<[Fragment<'s>; INLINE_FRAGMENTS]> = self.items.drain(start..).collect();
        Self { items: tail }
    }

    pub(crate) fn append(&mut self, mut other: Self) {
        self.items.append(&mut other.items);
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }
}

impl<'s> IntoIterator for Fragments<'s> {
    type Item = Fragment<'s>;
    type IntoIter = smallvec::IntoIter<[Fragment<'s>; INLINE_FRAGMENTS]>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, 's> IntoIterator for &'a Fragments<'s> {
    type Item = &'a Fragment<'s>;
    type IntoIter = slice::Iter<'a, Fragment<'s>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'s> FromIterator<Fragment<'s>> for Fragments<'s> {
    fn from_iter<I: IntoIterator<Item = Fragment<'s>>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
