// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Variants: conditional class-list resolution for UI components.
//!
//! Component authors describe *"when these states are active, apply these
//! classes"* as a nested [`Scheme`], and this crate turns a concrete set of
//! [`Props`] into the ordered list of class fragments to render.
//!
//! Each scheme level emits, in order:
//!
//! **Base → Fallback → Conditions**
//!
//! Later fragments are meant to win textual conflicts, so a reconciler that
//! applies last-wins precedence gets specificity-like behavior for free.
//!
//! ## Core Concepts
//!
//! ### Conditions
//!
//! Condition keys come in two kinds, decided by spelling alone (see
//! [`is_flag_key`]):
//!
//! - **Flags** (`isDisabled`, `allowsRemoving`) apply their value when the
//!   property is truthy. Any matched flag suppresses its level's fallback.
//! - **Variants** (`size`, `variant`) select one arm of a [`VariantMap`] by
//!   the property's string value, or the map's own fallback. A variant match
//!   never suppresses its level's fallback.
//!
//! ```rust
//! use understory_variants::{Props, SchemeBuilder, VariantMapBuilder, resolve};
//!
//! let scheme = SchemeBuilder::new()
//!     .fallback("root-default")
//!     .condition(
//!         "variant",
//!         VariantMapBuilder::new()
//!             .fallback("variant-default")
//!             .arm("primary", "variant-primary")
//!             .build(),
//!     )
//!     .build();
//!
//! let none = resolve(&scheme, &Props::new()).unwrap();
//! assert_eq!(none.tokens().collect::<Vec<_>>(), ["root-default", "variant-default"]);
//!
//! let primary = Props::new().with("variant", "primary");
//! let out = resolve(&scheme, &primary).unwrap();
//! assert_eq!(out.tokens().collect::<Vec<_>>(), ["root-default", "variant-primary"]);
//! ```
//!
//! ### Nesting
//!
//! Any class value may be a nested [`Scheme`], resolved against the same
//! props. Each level has its own base and fallback.
//!
//! ```rust
//! use understory_variants::{Props, SchemeBuilder, resolve};
//!
//! let selected = SchemeBuilder::new()
//!     .fallback("sel-default")
//!     .condition("isEmphasized", "sel-emph")
//!     .build();
//! let scheme = SchemeBuilder::new().condition("isSelected", selected).build();
//!
//! let props = Props::new().with("isSelected", true).with("isEmphasized", true);
//! let out = resolve(&scheme, &props).unwrap();
//! assert_eq!(out.tokens().collect::<Vec<_>>(), ["sel-emph"]);
//! ```
//!
//! ### The Reserved Fallback Value
//!
//! `"$default"` ([`FALLBACK_KEY`]) names fallback entries in schemes. Passing
//! it as a property value is a caller bug and fails with
//! [`ReservedValueError`], naming the offending key.
//!
//! ### Reconciling
//!
//! [`ClassVariants`] pairs a scheme with a [`Reconciler`] and appends the
//! passthrough `class`/`className` extra classes after reconciliation.
//! [`compose`] renders several of them as one list.
//!
//! ## Features
//!
//! - `serde`: `Deserialize` for [`Scheme`] and [`Props`], so schemes can be
//!   authored as data (`"$base"`, `"$default"`, and condition keys).
//! - `tracing`: emit `tracing` events for each resolution decision. For
//!   structured inspection without a subscriber, use [`resolve_with_trace`].
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod error;
mod key;
mod props;
mod reconcile;
mod resolve;
mod scheme;
mod trace;
mod value;
mod variants;

#[cfg(feature = "serde")]
mod de;

pub use error::{ReservedValueError, SchemeKeyError, VariantsError};
pub use key::{
    BASE_KEY, ConditionKind, FALLBACK_KEY, PASSTHROUGH_KEYS, is_flag_key, is_passthrough_key,
};
pub use props::{PropValue, Props};
pub use reconcile::{JoinReconciler, LastWinsReconciler, Reconciler};
pub use resolve::{resolve, resolve_into, resolve_with_trace};
pub use scheme::{
    Condition, ConditionValue, Scheme, SchemeBuilder, VariantMap, VariantMapBuilder,
};
pub use trace::{ConditionOutcome, ResolveTrace, TraceEvent, TraceLog};
pub use value::{ClassValue, Fragment, Fragments};
pub use variants::{ClassVariants, Composition, compose};
