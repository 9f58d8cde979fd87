// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_variants`.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::sync::Once;

use understory_variants::{
    ClassVariants, Fragments, JoinReconciler, LastWinsReconciler, Props, Reconciler, Scheme,
    SchemeBuilder, VariantMapBuilder, resolve,
};

fn button_scheme() -> Scheme {
    SchemeBuilder::new()
        .base("inline-flex items-center rounded px-4")
        .fallback("bg-white text-gray-900")
        .condition(
            "variant",
            VariantMapBuilder::new()
                .arm("primary", "bg-blue-600 text-white")
                .arm("secondary", "bg-gray-100 text-gray-900")
                .arm("ghost", "bg-transparent")
                .fallback("bg-white")
                .build(),
        )
        .condition(
            "size",
            VariantMapBuilder::new()
                .arm("sm", "h-8 text-sm")
                .arm("lg", "h-12 text-lg")
                .fallback("h-10")
                .build(),
        )
        .condition("isHovered", "bg-opacity-90")
        .condition("isPressed", ["bg-opacity-80", "scale-95"])
        .condition("isDisabled", "opacity-50 cursor-not-allowed")
        .build()
}

/// A scheme nested `depth` levels deep through `isOpen`.
fn nested_scheme(depth: usize) -> Scheme {
    (0..depth).fold(SchemeBuilder::new().base("leaf").build(), |inner, level| {
        SchemeBuilder::new()
            .base("level")
            .fallback("closed")
            .condition(
                "tone",
                VariantMapBuilder::new().arm("loud", "font-bold").build(),
            )
            .condition("isOpen", inner)
            .condition(if level % 2 == 0 { "isEven" } else { "isOdd" }, "marker")
            .build()
    })
}

fn bench_variants(c: &mut Criterion) {
    static PRINT_SIZES: Once = Once::new();
    PRINT_SIZES.call_once(|| {
        eprintln!(
            "sizes: Scheme={} Props={} Fragments={}",
            core::mem::size_of::<Scheme>(),
            core::mem::size_of::<Props>(),
            core::mem::size_of::<Fragments<'static>>(),
        );
    });

    let scheme = button_scheme();
    let idle = Props::new();
    let active = Props::new()
        .with("variant", "primary")
        .with("size", "lg")
        .with("isHovered", true)
        .with("isPressed", true);

    let mut group = c.benchmark_group("variants/resolve");

    group.bench_function("idle", |b| {
        b.iter(|| black_box(resolve(&scheme, &idle).map(|f| f.len())))
    });

    group.bench_function("active", |b| {
        b.iter(|| black_box(resolve(&scheme, &active).map(|f| f.len())))
    });

    for depth in [1_usize, 4, 16] {
        let nested = nested_scheme(depth);
        let open = Props::new().with("isOpen", true).with("tone", "loud");
        group.bench_function(BenchmarkId::new("nested", depth), |b| {
            b.iter(|| black_box(resolve(&nested, &open).map(|f| f.len())))
        });
    }

    group.finish();

    let mut group = c.benchmark_group("variants/reconcile");

    let fragments = resolve(&scheme, &active).unwrap_or_default();
    group.bench_function("join", |b| {
        b.iter(|| black_box(JoinReconciler.reconcile(fragments.as_slice())))
    });
    group.bench_function("last_wins", |b| {
        b.iter(|| black_box(LastWinsReconciler.reconcile(fragments.as_slice())))
    });

    group.finish();

    let mut group = c.benchmark_group("variants/class_list");

    let button =
        ClassVariants::new(button_scheme()).expect("button scheme has no passthrough keys");
    group.bench_function("with_extra_classes", |b| {
        b.iter_batched(
            || active.clone().with("className", "w-full mt-2"),
            |props| black_box(button.class_list(&props).ok()),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_variants);
criterion_main!(benches);
