//! Kernel tables: selection and caching.
//!
//! - [`Candidate`]: a kernel registered for one single-bit path
//! - [`KernelTable`]: the kernels compiled for one family
//! - [`Dispatcher`]: a table plus a process-wide cached selection
//!
//! A table's compiled paths are the union of its entries. Selection reduces
//! `compiled & supported` to its most significant path and returns the
//! kernel registered for it, so the order of entries does not matter.
//!
//! ```
//! use dispatch::{KernelTable, kernels};
//! use paths::{Path, X86};
//!
//! type SumFn = fn(&[u32]) -> u32;
//!
//! fn sum_portable(xs: &[u32]) -> u32 {
//!   xs.iter().sum()
//! }
//!
//! fn sum_avx2(xs: &[u32]) -> u32 {
//!   xs.iter().sum()
//! }
//!
//! const SUM: KernelTable<'static, X86, SumFn> = kernels!(X86, SumFn;
//!   Path::<X86>::PORTABLE => sum_portable,
//!   Path::<X86>::AVX2 => sum_avx2,
//! );
//!
//! let chosen = SUM.select(Path::<X86>::PORTABLE | Path::<X86>::SSE42).unwrap();
//! assert_eq!(chosen.path, Path::<X86>::PORTABLE);
//! assert_eq!((chosen.kernel)(&[1, 2, 3]), 6);
//! ```

use core::fmt;

use paths::{Family, Native, Path};

use crate::detect;

/// A kernel registered for one path.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Candidate<F: Family, K> {
  /// The single path this kernel implements.
  pub path: Path<F>,
  /// The kernel (usually a function pointer).
  pub kernel: K,
}

impl<F: Family, K> Candidate<F, K> {
  /// Create a new candidate.
  #[inline]
  #[must_use]
  pub const fn new(path: Path<F>, kernel: K) -> Self {
    Self { path, kernel }
  }
}

impl<F: Family, K> fmt::Debug for Candidate<F, K> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Candidate").field("path", &self.path).finish_non_exhaustive()
  }
}

/// The kernels compiled for one family, keyed by single-bit path.
#[derive(Clone, Copy)]
pub struct KernelTable<'a, F: Family, K> {
  entries: &'a [Candidate<F, K>],
  compiled: Path<F>,
}

impl<'a, F: Family, K> KernelTable<'a, F, K> {
  /// Create a table from its entries.
  ///
  /// Usually built through [`kernels!`](crate::kernels) in a `const`, which
  /// turns the checks below into build failures.
  ///
  /// # Panics
  ///
  /// Panics if an entry is not a single path of `F::ALL`, or if two entries
  /// share a path.
  #[must_use]
  pub const fn new(entries: &'a [Candidate<F, K>]) -> Self {
    paths::ensure_catalog::<F>();

    let mut compiled = Path::<F>::NONE;
    let mut rest = entries;
    while let [entry, tail @ ..] = rest {
      let path = entry.path;
      assert!(path.is_single(), "kernel table entries must be single paths");
      assert!(F::ALL.contains(path), "kernel table entry is not in the family catalog");
      assert!(compiled.is_disjoint(path), "kernel table has two entries for one path");
      compiled = compiled.union(path);
      rest = tail;
    }
    Self { entries, compiled }
  }

  /// Union of every entry's path.
  #[inline]
  #[must_use]
  pub const fn compiled(&self) -> Path<F> {
    self.compiled
  }

  /// Number of entries.
  #[inline]
  #[must_use]
  pub const fn len(&self) -> usize {
    self.entries.len()
  }

  /// Whether the table has no entries.
  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// The entries, in registration order.
  #[inline]
  #[must_use]
  pub const fn entries(&self) -> &'a [Candidate<F, K>] {
    self.entries
  }
}

impl<F: Family, K: Copy> KernelTable<'_, F, K> {
  /// The kernel registered for exactly `path`.
  #[must_use]
  pub fn get(&self, path: Path<F>) -> Option<Candidate<F, K>> {
    self.entries.iter().find(|c| c.path == path).copied()
  }

  /// Pick the kernel of the most significant path in `compiled & supported`.
  ///
  /// Returns `None` when no compiled path is supported.
  #[must_use]
  pub fn select(&self, supported: Path<F>) -> Option<Candidate<F, K>> {
    let path = self.compiled.intersection(supported).most_significant();
    if path.is_empty() {
      return None;
    }
    self.get(path)
  }
}

impl<F: Family, K> fmt::Debug for KernelTable<'_, F, K> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("KernelTable")
      .field("family", &F::NAME)
      .field("compiled", &self.compiled)
      .finish()
  }
}

/// Build a [`KernelTable`] from `path => kernel` pairs.
///
/// The family and kernel types are explicit so function items coerce to the
/// kernel's function pointer type. Use it to initialize a `const` so the
/// table checks run at build time.
#[macro_export]
macro_rules! kernels {
  ($family:ty, $kernel:ty; $($path:expr => $func:expr),+ $(,)?) => {
    $crate::KernelTable::<$family, $kernel>::new(&[
      $($crate::Candidate::<$family, $kernel>::new($path, $func)),+
    ])
  };
}

// ─────────────────────────────────────────────────────────────────────────────
// Cached Dispatcher
// ─────────────────────────────────────────────────────────────────────────────

/// A native kernel table with a cached, process-wide selection.
///
/// Selection runs against [`detect::supported`] on first access. Under `std`
/// the result is cached in a `OnceLock`; without `std` the selected path is
/// cached in an atomic and looked up again on each call.
///
/// ```
/// use dispatch::{Dispatcher, kernels};
/// use paths::{NativePath, Native};
///
/// fn portable() -> &'static str {
///   "portable"
/// }
///
/// static DISPATCH: Dispatcher<fn() -> &'static str> =
///   Dispatcher::new(kernels!(Native, fn() -> &'static str; NativePath::PORTABLE => portable));
///
/// assert_eq!(DISPATCH.call(), Some("portable"));
/// ```
pub struct Dispatcher<K: Copy + 'static> {
  table: KernelTable<'static, Native, K>,

  #[cfg(feature = "std")]
  inner: std::sync::OnceLock<Option<Candidate<Native, K>>>,

  #[cfg(not(feature = "std"))]
  selected: core::sync::atomic::AtomicU8,
}

impl<K: Copy + 'static> Dispatcher<K> {
  /// Create a dispatcher over `table`.
  #[must_use]
  pub const fn new(table: KernelTable<'static, Native, K>) -> Self {
    Self {
      table,
      #[cfg(feature = "std")]
      inner: std::sync::OnceLock::new(),
      #[cfg(not(feature = "std"))]
      selected: core::sync::atomic::AtomicU8::new(0),
    }
  }

  /// The selected kernel, selecting on first call.
  #[inline]
  #[must_use]
  pub fn get(&self) -> Option<Candidate<Native, K>> {
    #[cfg(feature = "std")]
    {
      *self.inner.get_or_init(|| self.select())
    }

    #[cfg(not(feature = "std"))]
    {
      use core::sync::atomic::Ordering;

      // 0 = not yet selected. Selected paths are never empty.
      let bits = self.selected.load(Ordering::Acquire);
      if bits != 0 {
        return self.table.get(Path::from_bits(bits));
      }
      let selected = self.select();
      if let Some(candidate) = selected {
        self.selected.store(candidate.path.bits(), Ordering::Release);
      }
      selected
    }
  }

  /// The selected path, or `NONE` when no compiled path is supported.
  #[inline]
  #[must_use]
  pub fn path(&self) -> Path<Native> {
    self.get().map_or(Path::NONE, |c| c.path)
  }

  /// The underlying table.
  #[inline]
  #[must_use]
  pub const fn table(&self) -> &KernelTable<'static, Native, K> {
    &self.table
  }

  fn select(&self) -> Option<Candidate<Native, K>> {
    let supported = detect::supported();
    let selected = self.table.select(supported);
    tracing::debug!(
      compiled = %self.table.compiled(),
      %supported,
      selected = %selected.map_or(Path::NONE, |c| c.path),
      "selected kernel"
    );
    selected
  }
}

impl<R: 'static> Dispatcher<fn() -> R> {
  /// Call the selected nullary kernel.
  #[inline]
  pub fn call(&self) -> Option<R> {
    self.get().map(|c| (c.kernel)())
  }
}

impl<K: Copy + 'static> fmt::Debug for Dispatcher<K> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Dispatcher").field("table", &self.table).finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use paths::{Arm64, X86};

  use super::*;

  type P = Path<X86>;
  type ScaleFn = fn(u32) -> u32;

  fn scale_portable(x: u32) -> u32 {
    x
  }

  fn scale_sse42(x: u32) -> u32 {
    x * 2
  }

  fn scale_avx2(x: u32) -> u32 {
    x * 4
  }

  fn scale_avx512(x: u32) -> u32 {
    x * 8
  }

  const SCALE: KernelTable<'static, X86, ScaleFn> = kernels!(X86, ScaleFn;
    P::AVX2 => scale_avx2,
    P::PORTABLE => scale_portable,
    P::AVX512 => scale_avx512,
    P::SSE42 => scale_sse42,
  );

  #[test]
  fn candidate_creation() {
    let c = Candidate::<X86, ScaleFn>::new(P::AVX2, scale_avx2);
    assert_eq!(c.path, P::AVX2);
    assert_eq!((c.kernel)(1), 4);
  }

  #[test]
  fn table_compiled_is_union_of_entries() {
    assert_eq!(SCALE.compiled(), P::PORTABLE | P::SSE42 | P::AVX2 | P::AVX512);
    assert_eq!(SCALE.len(), 4);
    assert!(!SCALE.is_empty());
    assert_eq!(SCALE.entries()[0].path, P::AVX2);
  }

  #[test]
  fn get_matches_exact_path_only() {
    assert_eq!(SCALE.get(P::SSE42).map(|c| (c.kernel)(3)), Some(6));
    assert!(SCALE.get(P::AVX_VNNI).is_none());
    assert!(SCALE.get(P::AVX2 | P::PORTABLE).is_none());
    assert!(SCALE.get(P::NONE).is_none());
  }

  #[test]
  fn select_best_match() {
    let chosen = SCALE.select(X86::ALL).map(|c| c.path);
    assert_eq!(chosen, Some(P::AVX512));
  }

  #[test]
  fn select_skips_unavailable() {
    let chosen = SCALE.select(P::PORTABLE | P::SSE42 | P::AVX2);
    assert_eq!(chosen.map(|c| (c.kernel)(1)), Some(4));
  }

  #[test]
  fn select_portable_fallback() {
    assert_eq!(SCALE.select(P::PORTABLE).map(|c| c.path), Some(P::PORTABLE));
  }

  #[test]
  fn select_ignores_supported_paths_without_kernels() {
    // avx-vnni outranks avx512 but has no kernel here.
    let chosen = SCALE.select(P::PORTABLE | P::AVX512 | P::AVX_VNNI);
    assert_eq!(chosen.map(|c| c.path), Some(P::AVX512));
  }

  #[test]
  fn select_nothing_supported() {
    assert!(SCALE.select(P::NONE).is_none());
    const VNNI_ONLY: KernelTable<'static, X86, ScaleFn> = kernels!(X86, ScaleFn; P::AVX_VNNI => scale_avx2);
    assert!(VNNI_ONLY.select(P::PORTABLE | P::AVX2).is_none());
  }

  #[test]
  fn empty_table() {
    let table = KernelTable::<Arm64, ScaleFn>::new(&[]);
    assert!(table.is_empty());
    assert!(table.compiled().is_empty());
    assert!(table.select(Arm64::ALL).is_none());
  }

  #[test]
  #[should_panic(expected = "single paths")]
  fn table_rejects_multi_bit_entries() {
    let entries = [Candidate::<X86, ScaleFn>::new(P::AVX2 | P::PORTABLE, scale_avx2)];
    let _ = KernelTable::new(&entries);
  }

  #[test]
  #[should_panic(expected = "two entries")]
  fn table_rejects_duplicate_paths() {
    let entries = [
      Candidate::<X86, ScaleFn>::new(P::AVX2, scale_avx2),
      Candidate::<X86, ScaleFn>::new(P::AVX2, scale_sse42),
    ];
    let _ = KernelTable::new(&entries);
  }

  #[test]
  #[should_panic(expected = "family catalog")]
  fn table_rejects_paths_outside_catalog() {
    let entries = [Candidate::<X86, ScaleFn>::new(P::from_bits(0x40), scale_avx2)];
    let _ = KernelTable::new(&entries);
  }

  #[test]
  fn debug_output() {
    extern crate alloc;
    let s = alloc::format!("{:?}", SCALE);
    assert!(s.starts_with("KernelTable { family: \"x86\""), "{s}");
    let c = alloc::format!("{:?}", Candidate::<X86, ScaleFn>::new(P::AVX2, scale_avx2));
    assert_eq!(c, "Candidate { path: Path(x86, [avx2]), .. }");
  }
}
