//! Implementation paths for SIMD kernel selection.
//!
//! A [`Path`] names one implementation strategy of a numeric kernel (the
//! portable fallback, or one SIMD extension tier), or a set of them. Paths are
//! bits: sets are built with `|`, `&`, `^` and `!`, and a set is resolved to
//! the one path to run with [`Path::most_significant`].
//!
//! # Families
//!
//! Which paths exist depends on the CPU architecture. Each architecture family
//! is its own type with its own bit space:
//!
//! | family      | paths                                        |
//! |-------------|----------------------------------------------|
//! | [`X86`]     | portable, sse4.2, avx2, avx512, avx-vnni     |
//! | [`Arm64`]   | portable, neon, neon-dotprod                 |
//! | [`Arm32`]   | portable, neon                               |
//! | [`Generic`] | portable                                     |
//!
//! A `Path<X86>` cannot be combined with a `Path<Arm64>`:
//!
//! ```compile_fail
//! use paths::{Arm64, Path, X86};
//!
//! let _mixed = Path::<X86>::AVX2 | Path::<Arm64>::NEON;
//! ```
//!
//! [`Native`] is the family of the compilation target.
//!
//! # Catalog
//!
//! Every family partitions its paths into three disjoint groups
//! ([`Family::NON_ARCH`], [`Family::DEFAULT_ARCH`], [`Family::EXTRA_ARCH`])
//! and derives [`Family::DEFAULT`] and [`Family::ALL`] from them. These
//! invariants are checked at compile time for every family.
//!
//! # Selection
//!
//! ```
//! use paths::{ALL_PATHS, DEFAULT_PATHS, NativePath};
//!
//! // Supplied by runtime CPU detection.
//! let supported = NativePath::PORTABLE;
//!
//! let path = (supported & DEFAULT_PATHS).most_significant();
//! assert_eq!(path, NativePath::PORTABLE);
//! assert!(ALL_PATHS.contains(path));
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

mod arm;
mod catalog;
mod family;
mod generic;
mod path;
mod x86;

pub use arm::{Arm32, Arm64, ArmPath};
pub use catalog::{
  ALL_PATHS, DEFAULT_ARCH_PATHS, DEFAULT_PATHS, EXTRA_ARCH_PATHS, NON_ARCH_PATHS, Native, NativePath,
};
pub use family::{Family, Variant, ensure_catalog};
pub use generic::{Generic, GenericPath};
pub use path::{Iter, Path, disjoint, most_significant};
pub use x86::{X86, X86Path};
