// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configured resolvers.
//!
//! [`ClassVariants`] pairs a [`Scheme`] with a [`Reconciler`] and handles the
//! passthrough extra classes, so component code only supplies props.
//! [`Composition`] concatenates several of them before reconciling once.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{SchemeKeyError, VariantsError};
use crate::key::PASSTHROUGH_KEYS;
use crate::props::Props;
use crate::reconcile::{JoinReconciler, Reconciler, append_classes};
use crate::resolve::{resolve, resolve_into};
use crate::scheme::Scheme;
use crate::value::Fragments;

/// A scheme paired with the reconciler that renders its fragments.
///
/// # Example
///
/// ```rust
/// use understory_variants::{ClassVariants, Props, SchemeBuilder, VariantMapBuilder};
///
/// let button = ClassVariants::new(
///     SchemeBuilder::new()
///         .base("inline-flex")
///         .fallback("bg-white")
///         .condition("isPressed", "bg-gray-200")
///         .condition(
///             "size",
///             VariantMapBuilder::new()
///                 .arm("sm", "h-8")
///                 .fallback("h-10")
///                 .build(),
///         )
///         .build(),
/// )
/// .unwrap();
///
/// let props = Props::new().with("isPressed", true).with("className", "w-full");
/// assert_eq!(button.class_list(&props).unwrap(), "inline-flex bg-gray-200 h-10 w-full");
/// ```
#[derive(Clone, Debug)]
pub struct ClassVariants<R = JoinReconciler> {
    scheme: Scheme,
    reconciler: R,
}

impl ClassVariants {
    /// Creates a configured resolver using [`JoinReconciler`].
    ///
    /// # Errors
    ///
    /// Returns [`SchemeKeyError`] if the scheme declares `class` or
    /// `className` as a top-level condition.
    pub fn new(scheme: Scheme) -> Result<Self, SchemeKeyError> {
        if let Some(key) = PASSTHROUGH_KEYS.iter().find(|key| scheme.declares(key)) {
            return Err(SchemeKeyError { key: (*key).into() });
        }
        Ok(Self {
            scheme,
            reconciler: JoinReconciler,
        })
    }
}

impl<R: Reconciler> ClassVariants<R> {
    /// Replaces the reconciler.
    #[must_use]
    pub fn with_reconciler<S: Reconciler>(self, reconciler: S) -> ClassVariants<S> {
        ClassVariants {
            scheme: self.scheme,
            reconciler,
        }
    }

    /// Returns the scheme.
    #[must_use]
    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Returns the reconciler.
    #[must_use]
    pub fn reconciler(&self) -> &R {
        &self.reconciler
    }

    /// Resolves the scheme against `props` without reconciling.
    ///
    /// # Errors
    ///
    /// See [`resolve`].
    pub fn fragments(&self, props: &Props) -> Result<Fragments<'_>, VariantsError> {
        Ok(resolve(&self.scheme, props)?)
    }

    /// Resolves and reconciles, then appends the props' extra classes.
    ///
    /// # Errors
    ///
    /// Returns [`VariantsError::ConflictingPassthrough`] if both `class` and
    /// `className` are set, and [`VariantsError::Reserved`] if resolution
    /// fails.
    pub fn class_list(&self, props: &Props) -> Result<String, VariantsError> {
        let extra = passthrough(props)?;
        let fragments = self.fragments(props)?;
        Ok(render(&self.reconciler, &fragments, extra))
    }
}

/// Several configured resolvers rendered as one class list.
///
/// Fragments are concatenated in part order and reconciled once by the
/// composition's own reconciler, so later parts win conflicts.
#[derive(Clone, Debug)]
pub struct Composition<R = JoinReconciler> {
    parts: Vec<Scheme>,
    reconciler: R,
}

/// Composes several configured resolvers.
///
/// The composition uses the reconciler of the first part, or
/// [`JoinReconciler`] when `parts` is empty.
///
/// ```rust
/// use understory_variants::{ClassVariants, Props, SchemeBuilder, compose};
///
/// let layout = ClassVariants::new(SchemeBuilder::new().base("flex").build()).unwrap();
/// let tone = ClassVariants::new(
///     SchemeBuilder::new().fallback("text-gray").condition("isError", "text-red").build(),
/// )
/// .unwrap();
///
/// let both = compose([&layout, &tone]);
/// let props = Props::new().with("isError", true);
/// assert_eq!(both.class_list(&props).unwrap(), "flex text-red");
/// ```
pub fn compose<'a, R>(parts: impl IntoIterator<Item = &'a ClassVariants<R>>) -> Composition<R>
where
    R: Reconciler + Clone + Default + 'a,
{
    let mut reconciler = None;
    let parts = parts
        .into_iter()
        .map(|part| {
            if reconciler.is_none() {
                reconciler = Some(part.reconciler.clone());
            }
            part.scheme.clone()
        })
        .collect();
    Composition {
        parts,
        reconciler: reconciler.unwrap_or_default(),
    }
}

impl<R: Reconciler> Composition<R> {
    /// Returns the number of composed parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` if nothing was composed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Resolves every part in order into one fragment list.
    ///
    /// # Errors
    ///
    /// Fails on the first part whose resolution fails.
    pub fn fragments(&self, props: &Props) -> Result<Fragments<'_>, VariantsError> {
        let mut out = Fragments::new();
        for scheme in &self.parts {
            resolve_into(scheme, props, &mut out)?;
        }
        Ok(out)
    }

    /// Resolves every part, reconciles once, then appends extra classes.
    ///
    /// # Errors
    ///
    /// See [`ClassVariants::class_list`].
    pub fn class_list(&self, props: &Props) -> Result<String, VariantsError> {
        let extra = passthrough(props)?;
        let fragments = self.fragments(props)?;
        Ok(render(&self.reconciler, &fragments, extra))
    }
}

fn render<R: Reconciler>(reconciler: &R, fragments: &Fragments<'_>, extra: Option<&str>) -> String {
    let classes = reconciler.reconcile(fragments.as_slice());
    match extra {
        Some(extra) => append_classes(classes, extra),
        None => classes,
    }
}

fn passthrough(props: &Props) -> Result<Option<&str>, VariantsError> {
    match (props.class(), props.class_name()) {
        (Some(_), Some(_)) => Err(VariantsError::ConflictingPassthrough),
        (class, class_name) => Ok(class.or(class_name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReservedValueError;
    use crate::reconcile::LastWinsReconciler;
    use crate::scheme::{SchemeBuilder, VariantMapBuilder};
    use crate::value::Fragment;

    fn button() -> ClassVariants {
        ClassVariants::new(
            SchemeBuilder::new()
                .base("px-4 rounded")
                .condition(
                    "variant",
                    VariantMapBuilder::new()
                        .arm("primary", "bg-blue")
                        .arm("ghost", "bg-none rounded")
                        .build(),
                )
                .build(),
        )
        .unwrap()
    }

    #[test]
    fn passthrough_key_in_scheme_is_rejected() {
        let scheme = SchemeBuilder::new().condition("className", "x").build();
        let err = ClassVariants::new(scheme).unwrap_err();
        assert_eq!(&*err.key, "className");

        let nested_is_fine = SchemeBuilder::new()
            .condition("isOpen", SchemeBuilder::new().condition("class", "x").build())
            .build();
        assert!(ClassVariants::new(nested_is_fine).is_ok());
    }

    #[test]
    fn extra_classes_follow_reconciled_output() {
        let props = Props::new().with("variant", "primary").with("class", "mt-2 mb-2");
        assert_eq!(
            button().class_list(&props).unwrap(),
            "px-4 rounded bg-blue mt-2 mb-2"
        );
    }

    #[test]
    fn empty_output_with_extra_classes() {
        let empty = ClassVariants::new(Scheme::default()).unwrap();
        assert_eq!(empty.class_list(&Props::new()).unwrap(), "");
        assert_eq!(
            empty.class_list(&Props::new().with("className", "x")).unwrap(),
            "x"
        );
    }

    #[test]
    fn both_passthrough_keys_conflict() {
        let props = Props::new().with("class", "a").with("className", "b");
        assert_eq!(
            button().class_list(&props),
            Err(VariantsError::ConflictingPassthrough)
        );
    }

    #[test]
    fn reserved_value_surfaces_through_class_list() {
        let props = Props::new().with("variant", "$default");
        assert_eq!(
            button().class_list(&props),
            Err(VariantsError::Reserved(ReservedValueError {
                key: "variant".into()
            }))
        );
    }

    #[test]
    fn custom_reconciler() {
        let props = Props::new().with("variant", "ghost");
        assert_eq!(
            button().class_list(&props).unwrap(),
            "px-4 rounded bg-none rounded"
        );
        let dedup = button().with_reconciler(LastWinsReconciler);
        assert_eq!(dedup.class_list(&props).unwrap(), "px-4 bg-none rounded");

        fn count(fragments: &[Fragment<'_>]) -> String {
            alloc::format!("{}", fragments.len())
        }
        let counting = button().with_reconciler(count);
        assert_eq!(counting.class_list(&props).unwrap(), "2");
    }

    #[test]
    fn composition_concatenates_in_order() {
        let tone = ClassVariants::new(
            SchemeBuilder::new()
                .fallback("text-gray")
                .condition("isError", "text-red")
                .build(),
        )
        .unwrap();
        let parts = [button(), tone];
        let both = compose(&parts);
        assert_eq!(both.len(), 2);

        let props = Props::new().with("variant", "primary").with("className", "w-full");
        assert_eq!(
            both.class_list(&props).unwrap(),
            "px-4 rounded bg-blue text-gray w-full"
        );
        assert_eq!(both.fragments(&props).unwrap().len(), 3);
    }

    #[test]
    fn empty_composition() {
        let none: [&ClassVariants; 0] = [];
        let composed = compose(none);
        assert!(composed.is_empty());
        assert_eq!(composed.class_list(&Props::new()).unwrap(), "");
    }
}
