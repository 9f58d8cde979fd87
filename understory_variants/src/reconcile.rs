// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class-list reconcilers.
//!
//! A [`Reconciler`] turns the ordered [`Fragment`]s produced by resolution into
//! the final class string. Fragments later in the list take precedence over
//! earlier ones; how much a reconciler does with that is up to it. Framework
//! specific conflict resolution (for example utility-CSS merging) plugs in
//! here by implementing the trait or passing a closure.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::value::Fragment;

/// Turns an ordered fragment list into a class string.
pub trait Reconciler {
    /// Reconciles `fragments` into a single space-separated class string.
    fn reconcile(&self, fragments: &[Fragment<'_>]) -> String;
}

impl<F> Reconciler for F
where
    F: Fn(&[Fragment<'_>]) -> String,
{
    fn reconcile(&self, fragments: &[Fragment<'_>]) -> String {
        self(fragments)
    }
}

/// Space-joins every token in order, without conflict resolution.
///
/// ```rust
/// use understory_variants::{Fragment, JoinReconciler, Reconciler};
///
/// let fragments = [Fragment::Literal("px-4"), Fragment::Literal(""), Fragment::Literal("px-4 py-2")];
/// assert_eq!(JoinReconciler.reconcile(&fragments), "px-4 px-4 py-2");
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct JoinReconciler;

impl Reconciler for JoinReconciler {
    fn reconcile(&self, fragments: &[Fragment<'_>]) -> String {
        join(fragments.iter().flat_map(|fragment| fragment.tokens()))
    }
}

/// Space-joins tokens, keeping only the last occurrence of each token.
///
/// ```rust
/// use understory_variants::{Fragment, LastWinsReconciler, Reconciler};
///
/// let fragments = [Fragment::Literal("a b"), Fragment::Literal("c a")];
/// assert_eq!(LastWinsReconciler.reconcile(&fragments), "b c a");
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LastWinsReconciler;

impl Reconciler for LastWinsReconciler {
    fn reconcile(&self, fragments: &[Fragment<'_>]) -> String {
        let tokens: Vec<&str> = fragments.iter().flat_map(|f| f.tokens()).collect();
        let mut seen: HashSet<&str> = HashSet::with_capacity(tokens.len());
        let mut kept: Vec<&str> = tokens
            .into_iter()
            .rev()
            .filter(|token| seen.insert(*token))
            .collect();
        kept.reverse();
        join(kept)
    }
}

/// Appends `extra` classes after an already reconciled string.
pub(crate) fn append_classes(classes: String, extra: &str) -> String {
    push_tokens(classes, extra.split_whitespace())
}

fn join<'a>(tokens: impl IntoIterator<Item = &'a str>) -> String {
    push_tokens(String::new(), tokens)
}

fn push_tokens<'a>(mut out: String, tokens: impl IntoIterator<Item = &'a str>) -> String {
    for token in tokens {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use alloc::vec;

    #[test]
    fn join_empty_is_empty_string() {
        assert_eq!(JoinReconciler.reconcile(&[]), "");
        assert_eq!(LastWinsReconciler.reconcile(&[]), "");
    }

    #[test]
    fn join_flattens_sequences() {
        let parts: Box<[Box<str>]> = vec!["b".into(), "c".into()].into();
        let fragments = [Fragment::Literal("a"), Fragment::Sequence(&parts)];
        assert_eq!(JoinReconciler.reconcile(&fragments), "a b c");
    }

    #[test]
    fn last_wins_moves_duplicates_to_their_last_position() {
        let fragments = [
            Fragment::Literal("rounded px-4"),
            Fragment::Literal("shadow"),
            Fragment::Literal("px-4"),
        ];
        assert_eq!(
            LastWinsReconciler.reconcile(&fragments),
            "rounded shadow px-4"
        );
    }

    #[test]
    fn functions_are_reconcilers() {
        fn upper(fragments: &[Fragment<'_>]) -> String {
            JoinReconciler.reconcile(fragments).to_uppercase()
        }
        assert_eq!(upper.reconcile(&[Fragment::Literal("a b")]), "A B");
    }

    #[test]
    fn append_classes_skips_blank_extra() {
        assert_eq!(append_classes("a".into(), "  "), "a");
        assert_eq!(append_classes(String::new(), "b c"), "b c");
        assert_eq!(append_classes("a".into(), " b "), "a b");
    }
}
