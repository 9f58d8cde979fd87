// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Condition-key classification and reserved names.
//!
//! Every condition key in a [`Scheme`](crate::Scheme) is either a *flag*
//! (`isDisabled`, `allowsRemoving`) or a *variant* (`size`, `variant`). The
//! kind is decided purely by the key's spelling, by [`is_flag_key`], once per
//! key when the scheme is built.

/// Reserved name of a scheme level's fallback entry.
///
/// This string is also the sentinel that must never appear as a property
/// value; resolution fails if it does.
pub const FALLBACK_KEY: &str = "$default";

/// Reserved name of a scheme level's base entry in serialized schemes.
pub const BASE_KEY: &str = "$base";

/// Property names that carry extra classes instead of conditions.
///
/// Only one of them may be supplied per call. Schemes must not declare them.
pub const PASSTHROUGH_KEYS: [&str; 2] = ["class", "className"];

/// Prefixes that mark a key as a flag when followed by an uppercase letter.
const FLAG_PREFIXES: [&str; 2] = ["is", "allows"];

/// The kind of a condition key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    /// A boolean condition, applied when its property is truthy.
    ///
    /// A matched flag suppresses the fallback of its level.
    Flag,
    /// A string-valued condition selecting one arm of a variant map.
    ///
    /// A matched variant never suppresses the fallback of its level.
    Variant,
}

impl ConditionKind {
    /// Classifies `key` by its spelling.
    ///
    /// ```rust
    /// use understory_variants::ConditionKind;
    ///
    /// assert_eq!(ConditionKind::of("isSelected"), ConditionKind::Flag);
    /// assert_eq!(ConditionKind::of("allowsDragging"), ConditionKind::Flag);
    /// assert_eq!(ConditionKind::of("size"), ConditionKind::Variant);
    /// assert_eq!(ConditionKind::of("island"), ConditionKind::Variant);
    /// ```
    #[must_use]
    pub fn of(key: &str) -> Self {
        if is_flag_key(key) {
            Self::Flag
        } else {
            Self::Variant
        }
    }
}

/// Returns `true` if `key` names a flag condition.
///
/// A flag key is `is` or `allows` immediately followed by an ASCII uppercase
/// letter. Everything else is a variant key.
#[must_use]
pub fn is_flag_key(key: &str) -> bool {
    FLAG_PREFIXES.iter().any(|prefix| {
        key.strip_prefix(*prefix)
            .and_then(|rest| rest.bytes().next())
            .is_some_and(|b| b.is_ascii_uppercase())
    })
}

/// Returns `true` if `key` is one of the [`PASSTHROUGH_KEYS`].
#[must_use]
pub fn is_passthrough_key(key: &str) -> bool {
    PASSTHROUGH_KEYS.contains(&key)
}
