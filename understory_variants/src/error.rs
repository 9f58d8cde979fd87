// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use alloc::boxed::Box;
use core::fmt;

use crate::key::FALLBACK_KEY;

/// Error returned when a property value equals the reserved fallback sentinel.
///
/// `"$default"` names the fallback branch of a scheme; it is never a valid
/// property value. Resolution aborts at the first condition that reads it.
#[derive(Clone, PartialEq, Eq)]
pub struct ReservedValueError {
    /// The condition key whose property carried the sentinel.
    pub key: Box<str>,
}

impl fmt::Debug for ReservedValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReservedValueError {{ key: {:?} }}", self.key)
    }
}

impl fmt::Display for ReservedValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "property `{}` is set to the reserved value `{FALLBACK_KEY}`; \
             omit the property to select the fallback instead",
            self.key
        )
    }
}

impl core::error::Error for ReservedValueError {}

/// Error returned when a scheme declares a passthrough key as a condition.
#[derive(Clone, PartialEq, Eq)]
pub struct SchemeKeyError {
    /// The offending top-level condition key.
    pub key: Box<str>,
}

impl fmt::Debug for SchemeKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SchemeKeyError {{ key: {:?} }}", self.key)
    }
}

impl fmt::Display for SchemeKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scheme declares `{}` as a condition, but it is reserved for extra classes",
            self.key
        )
    }
}

impl core::error::Error for SchemeKeyError {}

/// Error returned by [`ClassVariants::class_list`](crate::ClassVariants::class_list).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VariantsError {
    /// Resolution hit the reserved fallback sentinel.
    Reserved(ReservedValueError),
    /// Both `class` and `className` were supplied.
    ConflictingPassthrough,
}

impl fmt::Display for VariantsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reserved(err) => fmt::Display::fmt(err, f),
            Self::ConflictingPassthrough => {
                f.write_str("extra classes were supplied under both `class` and `className`")
            }
        }
    }
}

impl core::error::Error for VariantsError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Reserved(err) => Some(err),
            Self::ConflictingPassthrough => None,
        }
    }
}

impl From<ReservedValueError> for VariantsError {
    fn from(err: ReservedValueError) -> Self {
        Self::Reserved(err)
    }
}
