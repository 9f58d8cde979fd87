// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explainability hooks for resolution.
//!
//! Resolution itself records nothing. When an embedder needs to answer
//! "why is this class here?" or "why is it missing?", it can pass a
//! [`ResolveTrace`] sink to [`resolve_with_trace`](crate::resolve_with_trace)
//! and receive one callback per decision. [`TraceLog`] is a small recorder
//! that keeps every event in order.

use alloc::vec::Vec;

/// What a single condition contributed during resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConditionOutcome<'s> {
    /// A flag whose property was truthy; its value was emitted.
    FlagMatched,
    /// A flag whose property was falsy or absent; nothing was emitted.
    FlagSkipped,
    /// A variant whose property named an arm; that arm was emitted.
    VariantMatched(&'s str),
    /// A variant whose property named no arm; the map's fallback was emitted.
    VariantFallback,
    /// A variant key holding a plain class value, emitted as-is.
    Opaque,
}

/// A callback sink for resolution decisions.
///
/// `depth` is the nesting level of the scheme being resolved, `0` for the
/// scheme passed in by the caller.
pub trait ResolveTrace<'s> {
    /// Called once per condition, in declaration order.
    fn condition(&mut self, depth: usize, key: &'s str, outcome: ConditionOutcome<'s>);

    /// Called once per level after its conditions, with whether the level's
    /// fallback was emitted.
    fn fallback(&mut self, depth: usize, emitted: bool);
}

impl<'s> ResolveTrace<'s> for () {
    #[inline]
    fn condition(&mut self, _depth: usize, _key: &'s str, _outcome: ConditionOutcome<'s>) {}

    #[inline]
    fn fallback(&mut self, _depth: usize, _emitted: bool) {}
}

/// A recorded resolution decision.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent<'s> {
    /// See [`ResolveTrace::condition`].
    Condition {
        /// Nesting level.
        depth: usize,
        /// Condition key.
        key: &'s str,
        /// What the condition contributed.
        outcome: ConditionOutcome<'s>,
    },
    /// See [`ResolveTrace::fallback`].
    Fallback {
        /// Nesting level.
        depth: usize,
        /// Whether the level's fallback was emitted.
        emitted: bool,
    },
}

/// Records every resolution decision in order.
#[derive(Clone, Debug, Default)]
pub struct TraceLog<'s> {
    events: Vec<TraceEvent<'s>>,
}

impl<'s> TraceLog<'s> {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Returns the recorded events in order.
    #[must_use]
    pub fn events(&self) -> &[TraceEvent<'s>] {
        &self.events
    }

    /// Returns the outcomes recorded for `key`, at any depth, in order.
    pub fn outcomes_of<'a>(
        &'a self,
        key: &'a str,
    ) -> impl Iterator<Item = ConditionOutcome<'s>> + 'a {
        self.events.iter().filter_map(move |event| match *event {
            TraceEvent::Condition {
                key: k, outcome, ..
            } if k == key => Some(outcome),
            _ => None,
        })
    }
}

impl<'s> ResolveTrace<'s> for TraceLog<'s> {
    fn condition(&mut self, depth: usize, key: &'s str, outcome: ConditionOutcome<'s>) {
        self.events.push(TraceEvent::Condition {
            depth,
            key,
            outcome,
        });
    }

    fn fallback(&mut self, depth: usize, emitted: bool) {
        self.events.push(TraceEvent::Fallback { depth, emitted });
    }
}
