// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Condition resolution.
//!
//! This module walks a [`Scheme`] against a [`Props`] bag and produces the
//! ordered [`Fragments`] to hand to a reconciler. Each level emits, in order:
//!
//! **Base → Fallback → Conditions (declaration order)**
//!
//! The fallback is only emitted when no flag condition of that level matched.
//! Variant matches never suppress it. Nested schemes are resolved depth-first
//! in place, so a parent's base precedes everything its children emit.

use crate::error::ReservedValueError;
use crate::key::{ConditionKind, FALLBACK_KEY};
use crate::props::{PropValue, Props};
use crate::scheme::{ConditionValue, Scheme};
use crate::trace::{ConditionOutcome, ResolveTrace};
use crate::value::{ClassValue, Fragment, Fragments};

/// Resolves `scheme` against `props`.
///
/// Resolution is pure: the same scheme and props always give the same
/// fragments, and neither input is modified.
///
/// # Errors
///
/// Returns [`ReservedValueError`] if any condition reached during resolution
/// reads a property whose value is the reserved fallback sentinel
/// (`"$default"`). Absent or unmatched properties are never errors.
///
/// # Example
///
/// ```rust
/// use understory_variants::{resolve, Fragment, Props, SchemeBuilder, VariantMapBuilder};
///
/// let scheme = SchemeBuilder::new()
///     .base("px-4")
///     .condition(
///         "variant",
///         VariantMapBuilder::new()
///             .arm("primary", "bg-blue")
///             .arm("secondary", "bg-gray")
///             .build(),
///     )
///     .build();
///
/// let props = Props::new().with("variant", "primary");
/// let fragments = resolve(&scheme, &props).unwrap();
/// assert_eq!(
///     fragments.as_slice(),
///     &[Fragment::Literal("px-4"), Fragment::Literal("bg-blue")]
/// );
/// ```
pub fn resolve<'s>(scheme: &'s Scheme, props: &Props) -> Result<Fragments<'s>, ReservedValueError> {
    resolve_with_trace(scheme, props, &mut ())
}

/// Resolves `scheme` against `props`, reporting every decision to `trace`.
///
/// # Errors
///
/// See [`resolve`].
pub fn resolve_with_trace<'s, T>(
    scheme: &'s Scheme,
    props: &Props,
    trace: &mut T,
) -> Result<Fragments<'s>, ReservedValueError>
where
    T: ResolveTrace<'s>,
{
    let mut out = Fragments::new();
    Resolver { props, trace }.level(scheme, 0, &mut out)?;
    Ok(out)
}

/// Resolves `scheme` against `props`, appending to `out`.
///
/// On error, `out` is restored to the length it had on entry.
///
/// # Errors
///
/// See [`resolve`].
pub fn resolve_into<'s>(
    scheme: &'s Scheme,
    props: &Props,
    out: &mut Fragments<'s>,
) -> Result<(), ReservedValueError> {
    let start = out.len();
    let result = Resolver {
        props,
        trace: &mut (),
    }
    .level(scheme, 0, out);
    if result.is_err() {
        out.truncate(start);
    }
    result
}

/// Per-call resolution state.
struct Resolver<'p, 't, T> {
    props: &'p Props,
    trace: &'t mut T,
}

impl<'s, T> Resolver<'_, '_, T>
where
    T: ResolveTrace<'s>,
{
    fn level(
        &mut self,
        scheme: &'s Scheme,
        depth: usize,
        out: &mut Fragments<'s>,
    ) -> Result<(), ReservedValueError> {
        // 1. Base, unconditionally first.
        self.emit(scheme.base(), depth, out)?;

        // 2. Conditions, in declaration order.
        let fallback_at = out.len();
        let mut matched_flag = false;

        for condition in scheme.conditions() {
            let key = condition.key();
            let prop = self.props.get(key);

            if prop.and_then(PropValue::as_str) == Some(FALLBACK_KEY) {
                #[cfg(feature = "tracing")]
                tracing::debug!(key, depth, "reserved fallback sentinel used as a property value");
                return Err(ReservedValueError { key: key.into() });
            }

            match condition.value() {
                ConditionValue::Class(value) if condition.kind() == ConditionKind::Flag => {
                    if prop.is_some_and(PropValue::is_truthy) {
                        matched_flag = true;
                        self.note(depth, key, ConditionOutcome::FlagMatched);
                        self.emit(value, depth, out)?;
                    } else {
                        self.note(depth, key, ConditionOutcome::FlagSkipped);
                    }
                }
                ConditionValue::Class(value) => {
                    self.note(depth, key, ConditionOutcome::Opaque);
                    self.emit(value, depth, out)?;
                }
                ConditionValue::Variants(map) => {
                    let arm = prop
                        .and_then(PropValue::as_str)
                        .and_then(|name| map.arms().find(|(arm, _)| *arm == name));
                    match arm {
                        Some((name, value)) => {
                            self.note(depth, key, ConditionOutcome::VariantMatched(name));
                            self.emit(value, depth, out)?;
                        }
                        None => {
                            self.note(depth, key, ConditionOutcome::VariantFallback);
                            self.emit(map.fallback(), depth, out)?;
                        }
                    }
                }
            }
        }

        // 3. Fallback, between base and conditions, unless a flag matched.
        let emit = !matched_flag && !scheme.fallback().is_empty();
        self.trace.fallback(depth, emit);
        if emit {
            let conditions = out.split_off(fallback_at);
            self.emit(scheme.fallback(), depth, out)?;
            out.append(conditions);
        }

        Ok(())
    }

    fn emit(
        &mut self,
        value: &'s ClassValue,
        depth: usize,
        out: &mut Fragments<'s>,
    ) -> Result<(), ReservedValueError> {
        match value {
            ClassValue::Empty => {}
            ClassValue::Literal(s) => out.push(Fragment::Literal(s)),
            ClassValue::Sequence(parts) => out.push(Fragment::Sequence(parts)),
            ClassValue::Nested(scheme) => self.level(scheme, depth + 1, out)?,
        }
        Ok(())
    }

    fn note(&mut self, depth: usize, key: &'s str, outcome: ConditionOutcome<'s>) {
        #[cfg(feature = "tracing")]
        tracing::trace!(key, depth, ?outcome, "condition resolved");
        self.trace.condition(depth, key, outcome);
    }
}
