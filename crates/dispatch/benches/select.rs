//! Path and kernel selection benchmarks.
//!
//! Run: `cargo bench -p dispatch -- select`

#![allow(missing_docs)]

use core::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use dispatch::{Context, Dispatcher, KernelTable, detect, kernels};
use paths::{ALL_PATHS, DEFAULT_PATHS, Native, NativePath};

type CountFn = fn(&[u8]) -> usize;

fn count_portable(data: &[u8]) -> usize {
  data.iter().filter(|&&b| b != 0).count()
}

const COUNT: KernelTable<'static, Native, CountFn> = kernels!(Native, CountFn;
  NativePath::PORTABLE => count_portable,
);

static COUNT_DISPATCH: Dispatcher<CountFn> = Dispatcher::new(COUNT);

fn bench_context(c: &mut Criterion) {
  let mut group = c.benchmark_group("select/context");

  let detected = Context::new();
  group.bench_function("detected", |b| {
    b.iter(|| black_box(detected.select_path(black_box(DEFAULT_PATHS))));
  });

  let explicit = Context::new();
  let _ = explicit.set_runtime_enabled_paths(ALL_PATHS);
  group.bench_function("explicit", |b| {
    b.iter(|| black_box(explicit.select_path(black_box(ALL_PATHS))));
  });

  group.bench_function("kernel", |b| {
    b.iter(|| black_box(detected.select_kernel(black_box(&COUNT)).map(|k| k.path)));
  });

  group.finish();
}

fn bench_cached(c: &mut Criterion) {
  let mut group = c.benchmark_group("select/cached");

  group.bench_function("supported", |b| {
    b.iter(|| black_box(detect::supported()));
  });

  let data = [1u8; 64];
  group.bench_function("dispatcher", |b| {
    b.iter(|| COUNT_DISPATCH.get().map(|k| (k.kernel)(black_box(&data))));
  });

  group.finish();
}

criterion_group!(benches, bench_context, bench_cached);
criterion_main!(benches);
