//! Compile-time specialization on a resolved path.
//!
//! A resolved path is a single bit, so it can key a const generic. Code that
//! wants one monomorphized body per path implements [`Specialized`]; the
//! runtime path is turned into a call of `call::<BITS>()` by [`specialize`].
//!
//! ```
//! use dispatch::{Specialized, specialize};
//! use paths::{Path, X86, X86Path};
//!
//! struct Width;
//!
//! impl Specialized<X86> for Width {
//!   type Output = usize;
//!
//!   fn call<const BITS: u8>(self) -> usize {
//!     match Path::<X86>::from_bits(BITS).variant() {
//!       Some(X86Path::Avx512 | X86Path::AvxVnni) => 64,
//!       Some(X86Path::Avx2) => 32,
//!       Some(X86Path::Sse42) => 16,
//!       _ => 1,
//!     }
//!   }
//! }
//!
//! assert_eq!(specialize(Path::<X86>::AVX2, Width), Some(32));
//! assert_eq!(specialize(Path::<X86>::NONE, Width), None);
//! ```

use paths::{Family, Path};

/// A computation with one instantiation per path bit.
pub trait Specialized<F: Family> {
  /// Result of the computation.
  type Output;

  /// Run the computation specialized for the single path `BITS`.
  fn call<const BITS: u8>(self) -> Self::Output;
}

/// Run `s` specialized for `path`.
///
/// Returns `None` unless `path` is a single path of `F::ALL`.
#[inline]
pub fn specialize<F: Family, S: Specialized<F>>(path: Path<F>, s: S) -> Option<S::Output> {
  paths::ensure_catalog::<F>();
  if !path.is_single() || !F::ALL.contains(path) {
    return None;
  }
  match path.bits() {
    0x01 => Some(s.call::<0x01>()),
    0x02 => Some(s.call::<0x02>()),
    0x04 => Some(s.call::<0x04>()),
    0x08 => Some(s.call::<0x08>()),
    0x10 => Some(s.call::<0x10>()),
    0x20 => Some(s.call::<0x20>()),
    0x40 => Some(s.call::<0x40>()),
    0x80 => Some(s.call::<0x80>()),
    _ => None,
  }
}
