// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `serde` support for authoring schemes and props as data.
//!
//! Schemes deserialize from ordered maps. `"$base"` and `"$default"` name the
//! reserved entries; every other key is a condition. Values are strings,
//! arrays of strings, `null`, or nested maps. A nested map is a nested scheme
//! under a flag key and a variant map under a variant key.
//!
//! Entry order is taken from the input as it is visited, so formats that
//! stream maps in document order (such as JSON) preserve declaration order.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::key::{BASE_KEY, ConditionKind, FALLBACK_KEY};
use crate::props::{PropValue, Props};
use crate::scheme::{ConditionValue, Scheme, SchemeBuilder, VariantMap, VariantMapBuilder};
use crate::value::ClassValue;

impl<'de> Deserialize<'de> for Scheme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SchemeVisitor)
    }
}

impl<'de> Deserialize<'de> for ClassValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ClassValueVisitor)
    }
}

impl<'de> Deserialize<'de> for VariantMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(VariantMapVisitor)
    }
}

impl<'de> Deserialize<'de> for ConditionValue {
    /// Maps become [`ConditionValue::Variants`]; anything else is a class value.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ConditionValueVisitor)
    }
}

impl<'de> Deserialize<'de> for PropValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PropValueVisitor)
    }
}

impl<'de> Deserialize<'de> for Props {
    /// `null` values are treated as absent.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PropsVisitor)
    }
}

struct SchemeVisitor;

impl<'de> Visitor<'de> for SchemeVisitor {
    type Value = Scheme;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of scheme entries")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Scheme, A::Error> {
        let mut builder = SchemeBuilder::new();
        while let Some(key) = map.next_key::<String>()? {
            builder = match key.as_str() {
                BASE_KEY => builder.base(map.next_value::<ClassValue>()?),
                FALLBACK_KEY => builder.fallback(map.next_value::<ClassValue>()?),
                _ => match ConditionKind::of(&key) {
                    ConditionKind::Flag => builder.condition(key, map.next_value::<ClassValue>()?),
                    ConditionKind::Variant => {
                        builder.condition(key, map.next_value::<ConditionValue>()?)
                    }
                },
            };
        }
        Ok(builder.build())
    }
}

struct VariantMapVisitor;

impl<'de> Visitor<'de> for VariantMapVisitor {
    type Value = VariantMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of variant arms")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<VariantMap, A::Error> {
        let mut builder = VariantMapBuilder::new();
        while let Some((name, value)) = map.next_entry::<String, ClassValue>()? {
            builder = builder.arm(name, value);
        }
        Ok(builder.build())
    }
}

struct ClassValueVisitor;

impl<'de> Visitor<'de> for ClassValueVisitor {
    type Value = ClassValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a class string, an array of class strings, null, or a nested scheme")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ClassValue, E> {
        Ok(ClassValue::Literal(v.into()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<ClassValue, E> {
        Ok(ClassValue::Literal(v.into_boxed_str()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<ClassValue, E> {
        Ok(ClassValue::Empty)
    }

    fn visit_none<E: de::Error>(self) -> Result<ClassValue, E> {
        Ok(ClassValue::Empty)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ClassValue, A::Error> {
        let mut parts: Vec<Box<str>> = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(part) = seq.next_element::<String>()? {
            parts.push(part.into_boxed_str());
        }
        Ok(ClassValue::Sequence(parts.into_boxed_slice()))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<ClassValue, A::Error> {
        SchemeVisitor.visit_map(map).map(ClassValue::Nested)
    }
}

struct ConditionValueVisitor;

impl<'de> Visitor<'de> for ConditionValueVisitor {
    type Value = ConditionValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of variant arms or a class value")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ConditionValue, E> {
        ClassValueVisitor.visit_str(v).map(ConditionValue::Class)
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<ConditionValue, E> {
        ClassValueVisitor.visit_string(v).map(ConditionValue::Class)
    }

    fn visit_unit<E: de::Error>(self) -> Result<ConditionValue, E> {
        Ok(ConditionValue::Class(ClassValue::Empty))
    }

    fn visit_none<E: de::Error>(self) -> Result<ConditionValue, E> {
        Ok(ConditionValue::Class(ClassValue::Empty))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<ConditionValue, A::Error> {
        ClassValueVisitor.visit_seq(seq).map(ConditionValue::Class)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<ConditionValue, A::Error> {
        VariantMapVisitor.visit_map(map).map(ConditionValue::Variants)
    }
}

struct PropValueVisitor;

impl<'de> Visitor<'de> for PropValueVisitor {
    type Value = PropValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean or a string")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<PropValue, E> {
        Ok(PropValue::Bool(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<PropValue, E> {
        Ok(PropValue::Str(v.into()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<PropValue, E> {
        Ok(PropValue::Str(v.into_boxed_str()))
    }
}

struct PropsVisitor;

impl<'de> Visitor<'de> for PropsVisitor {
    type Value = Props;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of property values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Props, A::Error> {
        let mut props = Props::new();
        while let Some((key, value)) = map.next_entry::<String, Option<PropValue>>()? {
            if let Some(value) = value {
                props.set(key, value);
            }
        }
        Ok(props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve;
    use crate::scheme::Condition;

    fn scheme(json: &str) -> Scheme {
        serde_json::from_str(json).unwrap()
    }

    fn props(json: &str) -> Props {
        serde_json::from_str(json).unwrap()
    }

    fn class_list(scheme: &Scheme, props: &Props) -> Vec<String> {
        resolve(scheme, props)
            .unwrap()
            .tokens()
            .map(Into::into)
            .collect()
    }

    #[test]
    fn keys_keep_document_order() {
        let s = scheme(r#"{ "zeta": "z", "isAlpha": "a", "mid": { "x": "m" } }"#);
        let keys: Vec<_> = s.conditions().map(Condition::key).collect();
        assert_eq!(keys, ["zeta", "isAlpha", "mid"]);
        let kinds: Vec<_> = s.conditions().map(Condition::kind).collect();
        assert_eq!(
            kinds,
            [ConditionKind::Variant, ConditionKind::Flag, ConditionKind::Variant]
        );
    }

    #[test]
    fn reserved_entries_and_variant_fallback() {
        let s = scheme(
            r#"{
                "$default": "root-default",
                "variant": { "$default": "variant-default", "primary": "variant-primary" }
            }"#,
        );
        assert_eq!(
            class_list(&s, &Props::new()),
            ["root-default", "variant-default"]
        );
        assert_eq!(
            class_list(&s, &props(r#"{ "variant": "primary" }"#)),
            ["root-default", "variant-primary"]
        );
    }

    #[test]
    fn map_under_flag_is_nested_scheme() {
        let s = scheme(
            r#"{ "isSelected": { "$default": "sel-default", "isEmphasized": "sel-emph" } }"#,
        );
        assert!(matches!(
            s.get("isSelected"),
            Some(ConditionValue::Class(ClassValue::Nested(_)))
        ));
        let p = props(r#"{ "isSelected": true, "isEmphasized": true }"#);
        assert_eq!(class_list(&s, &p), ["sel-emph"]);
    }

    #[test]
    fn value_shapes() {
        let s = scheme(
            r#"{
                "$base": ["flex", "gap-2"],
                "isHidden": null,
                "size": { "sm": ["h-8", "text-sm"], "lg": null }
            }"#,
        );
        let p = props(r#"{ "isHidden": true, "size": "sm", "tone": null }"#);
        assert_eq!(p.len(), 2);
        assert_eq!(class_list(&s, &p), ["flex", "gap-2", "h-8", "text-sm"]);
        assert_eq!(class_list(&s, &props(r#"{ "size": "lg" }"#)), ["flex", "gap-2"]);
    }

    #[test]
    fn passthrough_props_are_kept_aside() {
        let p = props(r#"{ "className": "mt-4", "variant": "primary" }"#);
        assert_eq!(p.class_name(), Some("mt-4"));
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn invalid_shapes_are_rejected() {
        assert!(serde_json::from_str::<Scheme>(r#"{ "isOpen": 3 }"#).is_err());
        assert!(serde_json::from_str::<Scheme>(r#"["a"]"#).is_err());
        assert!(serde_json::from_str::<Props>(r#"{ "size": 1 }"#).is_err());
    }
}
